//! Type system utilities and aliases.
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>`, the registry map and signal handlers.

pub mod aliases;

pub use aliases::*;
