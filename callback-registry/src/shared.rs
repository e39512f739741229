//! Registry shared between owners
//!
//! [`SharedRegistry`] guards a [`Registry`] with one mutex per instance. The
//! lock is held only while the sequence is read or replaced, never while
//! callables run: each invocation dispatches over the snapshot taken when it
//! began, so a callable may add or remove entries mid-dispatch without
//! affecting that dispatch.

use crate::callable::Callable;
use crate::registry::Registry;
use crate::types::Result;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A registry that can be mutated and invoked through a shared reference
pub struct SharedRegistry<A, R> {
    inner: Mutex<Registry<A, R>>,
}

impl<A, R> SharedRegistry<A, R> {
    pub fn new() -> Self {
        Self::from_registry(Registry::new())
    }

    pub fn from_registry(registry: Registry<A, R>) -> Self {
        Self {
            inner: Mutex::new(registry),
        }
    }

    // A panicking callable never runs under the lock, and the guarded value
    // is replaced wholesale, so a poisoned lock still holds a valid sequence.
    fn lock(&self) -> MutexGuard<'_, Registry<A, R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current sequence
    pub fn snapshot(&self) -> Registry<A, R> {
        self.lock().clone()
    }

    pub fn add(&self, callable: Callable<A, R>) {
        self.lock().add(callable);
    }

    pub fn try_add(&self, callable: Option<Callable<A, R>>) -> Result<()> {
        self.lock().try_add(callable)
    }

    pub fn remove(&self, callable: &Callable<A, R>) -> bool {
        self.lock().remove(callable)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn invoke_one(&self, index: usize, args: A) -> Result<R> {
        self.snapshot().invoke_one(index, args)
    }
}

impl<A: Clone, R> SharedRegistry<A, R> {
    pub fn invoke(&self, args: A) -> Vec<R> {
        self.snapshot().invoke(args)
    }

    pub fn dispatch(&self, args: A) {
        self.snapshot().dispatch(args)
    }

    pub fn invoke_last(&self, args: A) -> Option<R> {
        self.snapshot().invoke_last(args)
    }
}

impl<A: Clone, T, E> SharedRegistry<A, std::result::Result<T, E>> {
    pub fn try_invoke(&self, args: A) -> std::result::Result<Vec<T>, E> {
        self.snapshot().try_invoke(args)
    }
}

impl<A, R> Default for SharedRegistry<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> From<Registry<A, R>> for SharedRegistry<A, R> {
    fn from(registry: Registry<A, R>) -> Self {
        Self::from_registry(registry)
    }
}
