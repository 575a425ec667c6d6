//! Host scene model.
//!
//! A minimal tree of named items carrying typed parameters. It is the
//! surface the undo system and the handles operate on: parameters are
//! settable cells with change notification, items form a parent/child
//! tree addressable by [`ScenePath`].

pub mod parameter;
pub mod path;
pub mod tree_item;
pub mod value;

pub use parameter::{Parameter, ParameterRef};
pub use path::{ScenePath, PATH_SEPARATOR};
pub use tree_item::{ChildEvent, SceneNode, TreeItem, TreeItemRef, LOCAL_XFO_PARAM};
pub use value::{Value, ValueKind};
