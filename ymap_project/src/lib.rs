use log::debug;
use std::{
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
};
use toml::Value;
use ymap_core::{ConvertOptions, NameTable};
use ymap_sources::SourceOptions;
use ymap_structs::EulerConvention;

pub const CONFIG_FILE_NAME: &str = "ymap.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSettings {
    pub spooner_euler: EulerConvention,
    pub require_placements: bool,
    pub pretty: bool,
    pub name: Option<String>,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            spooner_euler: EulerConvention::Raw,
            require_placements: false,
            pretty: true,
            name: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    pub convert: ConvertSettings,
    pub names: NameTable,
}

impl ProjectConfig {
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            name: self.convert.name.clone(),
            require_placements: self.convert.require_placements,
        }
    }

    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            spooner_euler: self.convert.spooner_euler,
            ..SourceOptions::default()
        }
    }
}

#[derive(Debug)]
pub enum ProjectError {
    Io(std::io::Error),
    ParseToml(toml::de::Error),
    InvalidField(&'static str, String),
}

impl Display for ProjectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::ParseToml(err) => write!(f, "{err}"),
            Self::InvalidField(field, reason) => write!(f, "invalid field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ProjectError {}

impl From<std::io::Error> for ProjectError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::de::Error> for ProjectError {
    fn from(value: toml::de::Error) -> Self {
        Self::ParseToml(value)
    }
}

/// Maps `local://rel` onto `local_root`. Any other input, absolute or
/// relative, is taken as given.
pub fn resolve_local_path(input: &str, local_root: &Path) -> PathBuf {
    let Some(stripped) = input.strip_prefix("local://") else {
        return PathBuf::from(input);
    };

    let rel = stripped.trim_start_matches('/');
    if rel.is_empty() {
        return local_root.to_path_buf();
    }
    local_root.join(rel)
}

pub fn ensure_project_toml(root: &Path, default_name: &str) -> std::io::Result<PathBuf> {
    fs::create_dir_all(root)?;
    let project_toml = root.join(CONFIG_FILE_NAME);
    if !project_toml.exists() {
        fs::write(&project_toml, default_project_toml(default_name))?;
    }
    Ok(project_toml)
}

pub fn default_project_toml(name: &str) -> String {
    format!(
        r#"[convert]
name = "{name}"
spooner_euler = "raw"
require_placements = false
pretty = true

# Model names for numeric hashes, keyed by hex or decimal hash.
[names]
"#
    )
}

/// Reads `ymap.toml` from `root`. A missing file yields the defaults.
pub fn load_project_toml(root: &Path) -> Result<ProjectConfig, ProjectError> {
    load_config_file(&root.join(CONFIG_FILE_NAME))
}

/// Reads a config file by path. A missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ProjectError> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_project_toml(&contents),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!("no config at {}, using defaults", path.display());
            Ok(ProjectConfig::default())
        }
        Err(err) => Err(err.into()),
    }
}

pub fn parse_project_toml(contents: &str) -> Result<ProjectConfig, ProjectError> {
    let value: Value = contents.parse::<Value>()?;
    let mut config = ProjectConfig::default();

    if let Some(convert) = value.get("convert") {
        let table = convert.as_table().ok_or(ProjectError::InvalidField(
            "convert",
            "must be a table".to_string(),
        ))?;

        if let Some(raw) = table.get("spooner_euler") {
            let raw = raw.as_str().ok_or(ProjectError::InvalidField(
                "convert.spooner_euler",
                "must be a string".to_string(),
            ))?;
            config.convert.spooner_euler = parse_euler_convention(raw)?;
        }

        if let Some(raw) = table.get("require_placements") {
            config.convert.require_placements =
                raw.as_bool().ok_or(ProjectError::InvalidField(
                    "convert.require_placements",
                    "must be a boolean".to_string(),
                ))?;
        }

        if let Some(raw) = table.get("pretty") {
            config.convert.pretty = raw.as_bool().ok_or(ProjectError::InvalidField(
                "convert.pretty",
                "must be a boolean".to_string(),
            ))?;
        }

        if let Some(raw) = table.get("name") {
            let name = raw.as_str().ok_or(ProjectError::InvalidField(
                "convert.name",
                "must be a string".to_string(),
            ))?;
            config.convert.name = Some(name.to_string());
        }
    }

    if let Some(names) = value.get("names") {
        let table = names.as_table().ok_or(ProjectError::InvalidField(
            "names",
            "must be a table".to_string(),
        ))?;
        for (key, name) in table {
            let hash = parse_hash_key(key)?;
            let name = name.as_str().ok_or(ProjectError::InvalidField(
                "names",
                format!("value for `{key}` must be a string"),
            ))?;
            config.names.insert(hash, name);
        }
    }

    Ok(config)
}

fn parse_euler_convention(raw: &str) -> Result<EulerConvention, ProjectError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "raw" => Ok(EulerConvention::Raw),
        "denormalized" => Ok(EulerConvention::Denormalized),
        _ => Err(ProjectError::InvalidField(
            "convert.spooner_euler",
            format!("expected `raw` or `denormalized`, got `{raw}`"),
        )),
    }
}

/// `0x`-prefixed hex, unsigned decimal, or signed decimal as the Map Editor writes it.
fn parse_hash_key(key: &str) -> Result<u32, ProjectError> {
    let trimmed = key.trim();
    let parsed = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else {
        trimmed
            .parse::<u32>()
            .ok()
            .or_else(|| trimmed.parse::<i32>().ok().map(|h| h as u32))
    };

    parsed.ok_or(ProjectError::InvalidField(
        "names",
        format!("`{key}` is not a hex or decimal hash"),
    ))
}
