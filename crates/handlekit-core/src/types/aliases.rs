//! Type aliases for commonly used complex types.
//!
//! The scene model and the interaction layer are single-threaded and share
//! state through `Rc<RefCell<T>>`. The only cross-thread state is the
//! process-wide change registry, which uses `parking_lot` locks.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use handlekit_core::types::*;
//!
//! // Instead of: Rc<RefCell<UndoRedoManager>>
//! let manager: Shared<UndoRedoManager> = shared(UndoRedoManager::new());
//! ```

use parking_lot::RwLock;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

// =============================================================================
// SINGLE-THREADED SHARED TYPES (Rc<RefCell<T>>)
// =============================================================================

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Handles hold their selection group this way.
pub type Shared<T> = Rc<RefCell<T>>;

// =============================================================================
// THREAD-SAFE SHARED TYPES
// =============================================================================

/// A thread-safe reader-writer hash map.
///
/// Reads greatly outnumber writes: entries are registered once at startup
/// and looked up on every history load.
pub type ThreadSafeRwMap<K, V> = Arc<RwLock<HashMap<K, V>>>;

// =============================================================================
// CALLBACK TYPES
// =============================================================================

/// A signal handler receiving the emitted payload by reference.
pub type Handler<T> = Rc<dyn Fn(&T)>;

// =============================================================================
// CONSTRUCTOR HELPERS
// =============================================================================

/// Create a new `Shared<T>` from a value.
///
/// # Example
/// ```
/// use handlekit_core::types::shared;
/// let counter = shared(0_u32);
/// *counter.borrow_mut() += 1;
/// assert_eq!(*counter.borrow(), 1);
/// ```
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create an empty `ThreadSafeRwMap<K, V>`.
#[inline]
pub fn thread_safe_rw_map<K, V>() -> ThreadSafeRwMap<K, V> {
    Arc::new(RwLock::new(HashMap::new()))
}
