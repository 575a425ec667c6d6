//! # HandleKit Core
//!
//! Core types for HandleKit.
//! Provides the error types, signals, transform math and the host scene
//! model that the undo system and the manipulation handles operate on.

pub mod error;
pub mod math;
pub mod scene;
pub mod signal;
pub mod types;

pub use error::SceneError;

pub use math::{
    measure_angle, measure_radius, AngleMeasurement, Color, DQuat, DVec3, RadialFeature, Xfo,
};

pub use scene::{
    ChildEvent, Parameter, ParameterRef, SceneNode, ScenePath, TreeItem, TreeItemRef, Value,
    ValueKind, LOCAL_XFO_PARAM,
};

pub use signal::{Signal, SubscriptionId};

// Re-export type aliases for convenience
pub use types::{shared, thread_safe_rw_map, Handler, Shared, ThreadSafeRwMap};
