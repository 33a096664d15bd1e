use log::info;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use ymap_core::{CanonicalMap, MapBuilder, ingest};
use ymap_project::{
    ProjectConfig, ensure_project_toml, load_config_file, load_project_toml, resolve_local_path,
};
use ymap_sources::{SourceDocument, refresh_extents};

const DEFAULT_MAP_NAME: &str = "converted_map";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let Some(command) = args.get(1).map(String::as_str) else {
        print_usage();
        std::process::exit(2);
    };

    let result = match command {
        "convert" => convert_command(&args, &cwd),
        "inspect" => inspect_command(&args, &cwd),
        "extents" => extents_command(&args, &cwd),
        "init" => init_command(&args, &cwd),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            Err(format!("unknown command `{command}`"))
        }
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  ymap_cli convert --input <file> [--output <file>] [--config <ymap.toml>] [--name <map_name>]");
    eprintln!("  ymap_cli inspect --input <file> [--config <ymap.toml>]");
    eprintln!("  ymap_cli extents --input <map.json> [--output <file>] [--config <ymap.toml>]   # recompute extents in place");
    eprintln!("  ymap_cli init [--path <dir>] [--name <map_name>]   # writes a default ymap.toml");
}

fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

fn required_path(args: &[String], flag: &str, cwd: &Path) -> Result<PathBuf, String> {
    parse_flag_value(args, flag)
        .map(|p| resolve_local_path(&p, cwd))
        .ok_or_else(|| format!("missing required flag `{flag}`"))
}

fn load_config(args: &[String], cwd: &Path) -> Result<ProjectConfig, String> {
    match parse_flag_value(args, "--config") {
        Some(path) => {
            let path = resolve_local_path(&path, cwd);
            if !path.is_file() {
                return Err(format!("config file not found: {}", path.display()));
            }
            load_config_file(&path)
                .map_err(|err| format!("failed to load {}: {err}", path.display()))
        }
        None => load_project_toml(cwd).map_err(|err| format!("failed to load ymap.toml: {err}")),
    }
}

fn read_document(input: &Path) -> Result<SourceDocument, String> {
    let text = fs::read_to_string(input)
        .map_err(|err| format!("failed to read {}: {err}", input.display()))?;
    SourceDocument::detect(&text).map_err(|err| format!("{}: {err}", input.display()))
}

fn write_map(map: &CanonicalMap, output: Option<&Path>, pretty: bool) -> Result<(), String> {
    let json = if pretty {
        serde_json::to_string_pretty(map)
    } else {
        serde_json::to_string(map)
    }
    .map_err(|err| format!("failed to serialize map: {err}"))?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|err| format!("failed to create {}: {err}", parent.display()))?;
            }
            fs::write(path, json)
                .map_err(|err| format!("failed to write {}: {err}", path.display()))
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn convert_command(args: &[String], cwd: &Path) -> Result<(), String> {
    let input = required_path(args, "--input", cwd)?;
    let output = parse_flag_value(args, "--output").map(|p| resolve_local_path(&p, cwd));
    let config = load_config(args, cwd)?;

    let mut options = config.convert_options();
    if let Some(name) = parse_flag_value(args, "--name") {
        options.name = Some(name);
    } else if options.name.is_none() {
        options.name = Some(
            input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(DEFAULT_MAP_NAME)
                .to_string(),
        );
    }

    let document = read_document(&input)?;
    let format = document.format();
    let (metadata, records) = document.into_records(&config.source_options());
    let builder = MapBuilder::new().with_metadata(metadata);
    let map = ymap_core::convert_with(builder, &records, &config.names, &options)
        .map_err(|err| format!("{}: {err}", input.display()))?;

    info!(
        "{format} export {} -> {} entities, {} vehicle generators",
        input.display(),
        map.entities.len(),
        map.car_generators.len()
    );

    write_map(&map, output.as_deref(), config.convert.pretty)?;
    if let Some(path) = output {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn inspect_command(args: &[String], cwd: &Path) -> Result<(), String> {
    let input = required_path(args, "--input", cwd)?;
    let config = load_config(args, cwd)?;
    let document = read_document(&input)?;

    println!("format:  {}", document.format());
    println!("records: {}", document.len());

    let records = document.records(&config.source_options());
    let mut builder = MapBuilder::new().with_metadata(document.metadata());
    let summary = ingest(&records, &config.names, &mut builder);
    println!("entities:           {}", summary.entities);
    println!("vehicle generators: {}", summary.vehicle_generators);
    println!("skipped:            {}", summary.skipped);

    let map = builder.build();
    let static_entities = map.entities().iter().filter(|e| e.is_static()).count();
    println!("static entities:    {static_entities}");
    if map.is_empty() {
        println!("extents: none");
    } else {
        println!(
            "streaming extents: {} .. {}",
            map.extents.streaming_extents_min, map.extents.streaming_extents_max
        );
        println!(
            "entities extents:  {} .. {}",
            map.extents.entities_extents_min, map.extents.entities_extents_max
        );
    }
    Ok(())
}

fn extents_command(args: &[String], cwd: &Path) -> Result<(), String> {
    let input = required_path(args, "--input", cwd)?;
    let output = parse_flag_value(args, "--output")
        .map(|p| resolve_local_path(&p, cwd))
        .unwrap_or_else(|| input.clone());
    let config = load_config(args, cwd)?;

    let text = fs::read_to_string(&input)
        .map_err(|err| format!("failed to read {}: {err}", input.display()))?;
    let (map, updated) =
        refresh_extents(&text).map_err(|err| format!("{}: {err}", input.display()))?;

    write_map(&map, Some(output.as_path()), config.convert.pretty)?;
    if updated {
        println!("recalculated extents, wrote {}", output.display());
    } else {
        println!("map is empty, extents unchanged, wrote {}", output.display());
    }
    Ok(())
}

fn init_command(args: &[String], cwd: &Path) -> Result<(), String> {
    let dir = parse_flag_value(args, "--path")
        .map(|p| resolve_local_path(&p, cwd))
        .unwrap_or_else(|| cwd.to_path_buf());
    let name = parse_flag_value(args, "--name").unwrap_or_else(|| DEFAULT_MAP_NAME.to_string());

    let path = ensure_project_toml(&dir, &name)
        .map_err(|err| format!("failed to write config in {}: {err}", dir.display()))?;
    println!("config at {}", path.display());
    Ok(())
}
