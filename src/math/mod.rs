mod mat3;
mod quat;
mod vec3;

pub use mat3::Mat3;
pub use quat::Quat;
pub use vec3::Vec3;

/// Common math constants
pub mod consts {
    /// A small epsilon value for floating point comparisons
    pub const EPSILON: f32 = 1e-6;

    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi divided by 2
    pub const FRAC_PI_2: f32 = std::f32::consts::FRAC_PI_2;
}
