pub mod quaternion;
pub mod rotation;
pub mod vector3;

pub use quaternion::Quaternion;
pub use rotation::{
    EulerConvention, RotationSource, canonicalize_hemisphere, denormalize_degrees,
    euler_denormalized_to_quaternion, euler_raw_to_quaternion,
};
pub use vector3::Vector3;
