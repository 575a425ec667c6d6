//! Value types shared by the scene model and the handles.
//!
//! Vector and quaternion algebra comes from `glam`; this module only adds
//! the composite types the scene stores in parameters and the geometry of
//! measurements.

pub mod color;
pub mod measure;
pub mod xfo;

pub use color::Color;
pub use glam::{DQuat, DVec3};
pub use measure::{measure_angle, measure_radius, AngleMeasurement, RadialFeature};
pub use xfo::Xfo;
