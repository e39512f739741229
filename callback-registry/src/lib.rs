//! Callback Registry Library
//!
//! Typed callable references and an ordered registry that dispatches to them.
//!
//! # Architecture
//!
//! - [`Callable`] wraps a closure, a free function, or a method bound to a
//!   receiver behind one opaque handle with reference identity
//! - [`Registry`] keeps callables of one signature in insertion order and
//!   invokes one of them or all of them (multicast), collecting every result
//! - [`SharedRegistry`] adds a per-instance lock so a registry can be
//!   mutated while it is being invoked, with snapshot semantics
//!
//! The library does NOT:
//! - Print, log to files, or otherwise act on behalf of callables
//! - Retry or recover from a failing callable (dispatch is fail-fast)
//!
//! Demonstration programs built on top live in the application layer
//! (callback-cli).
//!
//! # Example Usage
//!
//! ```
//! use callback_registry::{Callable, Registry};
//!
//! let add_one = Callable::new(|x: i32| x + 1);
//! let double = Callable::new(|x: i32| x * 2);
//!
//! let mut registry = Registry::with_callable(add_one.clone());
//! registry += double;
//! assert_eq!(registry.invoke(3), vec![4, 6]);
//!
//! registry -= &add_one;
//! assert_eq!(registry.invoke(3), vec![6]);
//! assert!(registry.invoke_one(1, 3).is_err());
//! ```

// Public modules
pub mod callable;
pub mod filter;
pub mod registry;
pub mod shared;
pub mod types;

// Re-export main types for convenience
pub use callable::{Action, Callable, Func, Predicate};
pub use filter::FilterExt;
pub use registry::Registry;
pub use shared::SharedRegistry;
pub use types::{RegistryError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: ensure we can create a registry
        let registry: Registry<(), ()> = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.invoke(()).is_empty());
    }
}
