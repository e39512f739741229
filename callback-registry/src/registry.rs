//! Main registry API
//!
//! A [`Registry`] holds an ordered sequence of callables sharing one
//! signature and invokes them individually or all at once (multicast).
//!
//! Storage is copy-on-write: cloning a registry is cheap and yields a
//! snapshot that later `add`/`remove` calls on the original never affect.

use crate::callable::Callable;
use crate::types::{RegistryError, Result};
use std::fmt;
use std::sync::Arc;

/// Ordered collection of callables with a common signature
pub struct Registry<A, R> {
    callables: Arc<Vec<Callable<A, R>>>,
}

impl<A, R> Registry<A, R> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            callables: Arc::new(Vec::new()),
        }
    }

    /// Create a registry seeded with one callable
    pub fn with_callable(callable: Callable<A, R>) -> Self {
        Self {
            callables: Arc::new(vec![callable]),
        }
    }

    /// Create a registry from an optional seed
    pub fn from_option(initial: Option<Callable<A, R>>) -> Self {
        match initial {
            Some(callable) => Self::with_callable(callable),
            None => Self::new(),
        }
    }

    /// Append a callable at the end
    ///
    /// Duplicates are permitted; each entry is invoked independently.
    pub fn add(&mut self, callable: Callable<A, R>) {
        log::debug!("Adding {:?} at position {}", callable, self.len());
        Arc::make_mut(&mut self.callables).push(callable);
    }

    /// Append a callable that may be absent
    ///
    /// # Returns
    /// * `Err(RegistryError::InvalidArgument)` if `callable` is `None`
    pub fn try_add(&mut self, callable: Option<Callable<A, R>>) -> Result<()> {
        let callable = callable.ok_or_else(|| {
            RegistryError::InvalidArgument("cannot add an absent callable".to_string())
        })?;
        self.add(callable);
        Ok(())
    }

    /// Remove the first entry referring to `callable`
    ///
    /// Returns `false`, leaving the registry untouched, if no entry matches.
    pub fn remove(&mut self, callable: &Callable<A, R>) -> bool {
        match self.position(callable) {
            Some(index) => {
                log::debug!("Removing {:?} from position {}", callable, index);
                Arc::make_mut(&mut self.callables).remove(index);
                true
            }
            None => {
                log::trace!("{:?} not registered, nothing removed", callable);
                false
            }
        }
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.callables = Arc::new(Vec::new());
    }

    /// Position of the first entry referring to `callable`
    pub fn position(&self, callable: &Callable<A, R>) -> Option<usize> {
        self.callables.iter().position(|c| c == callable)
    }

    /// True if any entry refers to `callable`
    pub fn contains(&self, callable: &Callable<A, R>) -> bool {
        self.position(callable).is_some()
    }

    /// The callable at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Callable<A, R>> {
        self.callables.get(index)
    }

    /// Iterate over the registered callables in invocation order
    pub fn iter(&self) -> std::slice::Iter<'_, Callable<A, R>> {
        self.callables.iter()
    }

    pub fn len(&self) -> usize {
        self.callables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callables.is_empty()
    }

    /// Invoke only the callable at `index`
    ///
    /// # Returns
    /// * `Err(RegistryError::OutOfRange)` if `index` is not a valid position
    pub fn invoke_one(&self, index: usize, args: A) -> Result<R> {
        let callable = self.get(index).ok_or(RegistryError::OutOfRange {
            index,
            len: self.len(),
        })?;
        Ok(callable.call(args))
    }
}

impl<A: Clone, R> Registry<A, R> {
    /// Invoke every callable in insertion order, collecting all results
    ///
    /// An empty registry yields an empty vector. A panic in one callable
    /// propagates immediately and the remaining callables are not run.
    ///
    /// # Example
    /// ```
    /// use callback_registry::{Callable, Registry};
    ///
    /// let mut registry = Registry::new();
    /// registry.add(Callable::new(|x: i32| x + 1));
    /// registry.add(Callable::new(|x: i32| x * 2));
    ///
    /// assert_eq!(registry.invoke(3), vec![4, 6]);
    /// ```
    pub fn invoke(&self, args: A) -> Vec<R> {
        log::trace!("Dispatching to {} callable(s)", self.len());
        self.callables
            .iter()
            .map(|callable| callable.call(args.clone()))
            .collect()
    }

    /// Invoke every callable in insertion order, discarding results
    pub fn dispatch(&self, args: A) {
        log::trace!("Dispatching to {} callable(s)", self.len());
        for callable in self.callables.iter() {
            callable.call(args.clone());
        }
    }

    /// Invoke every callable in insertion order, keeping only the last result
    ///
    /// This mirrors plain multicast delegates, where earlier results are
    /// dropped. Returns `None` for an empty registry.
    pub fn invoke_last(&self, args: A) -> Option<R> {
        log::trace!("Dispatching to {} callable(s), keeping last result", self.len());
        self.callables
            .iter()
            .fold(None, |_, callable| Some(callable.call(args.clone())))
    }
}

impl<A: Clone, T, E> Registry<A, std::result::Result<T, E>> {
    /// Invoke fallible callables in order, stopping at the first failure
    ///
    /// Callables after the failing one are not invoked.
    pub fn try_invoke(&self, args: A) -> std::result::Result<Vec<T>, E> {
        let mut results = Vec::with_capacity(self.len());
        for (index, callable) in self.callables.iter().enumerate() {
            match callable.call(args.clone()) {
                Ok(value) => results.push(value),
                Err(e) => {
                    log::debug!(
                        "Callable at position {} failed, skipping {} remaining",
                        index,
                        self.len() - index - 1
                    );
                    return Err(e);
                }
            }
        }
        Ok(results)
    }
}

impl<A, R> Default for Registry<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> Clone for Registry<A, R> {
    fn clone(&self) -> Self {
        Self {
            callables: Arc::clone(&self.callables),
        }
    }
}

/// Structural equality: same references in the same order
impl<A, R> PartialEq for Registry<A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.callables.as_slice() == other.callables.as_slice()
    }
}

impl<A, R> Eq for Registry<A, R> {}

impl<A, R> fmt::Debug for Registry<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.callables.iter()).finish()
    }
}

impl<A, R> From<Callable<A, R>> for Registry<A, R> {
    fn from(callable: Callable<A, R>) -> Self {
        Self::with_callable(callable)
    }
}

impl<A, R> FromIterator<Callable<A, R>> for Registry<A, R> {
    fn from_iter<I: IntoIterator<Item = Callable<A, R>>>(iter: I) -> Self {
        Self {
            callables: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl<A, R> Extend<Callable<A, R>> for Registry<A, R> {
    fn extend<I: IntoIterator<Item = Callable<A, R>>>(&mut self, iter: I) {
        for callable in iter {
            self.add(callable);
        }
    }
}

impl<'a, A, R> IntoIterator for &'a Registry<A, R> {
    type Item = &'a Callable<A, R>;
    type IntoIter = std::slice::Iter<'a, Callable<A, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Multicast combination: the right-hand entries follow the left-hand ones
impl<A, R> std::ops::Add for Registry<A, R> {
    type Output = Registry<A, R>;

    fn add(mut self, rhs: Registry<A, R>) -> Self::Output {
        self.extend(rhs.iter().cloned());
        self
    }
}

impl<A, R> std::ops::Add<Callable<A, R>> for Registry<A, R> {
    type Output = Registry<A, R>;

    fn add(mut self, rhs: Callable<A, R>) -> Self::Output {
        Registry::add(&mut self, rhs);
        self
    }
}

impl<A, R> std::ops::AddAssign<Callable<A, R>> for Registry<A, R> {
    fn add_assign(&mut self, rhs: Callable<A, R>) {
        self.add(rhs);
    }
}

impl<A, R> std::ops::SubAssign<&Callable<A, R>> for Registry<A, R> {
    fn sub_assign(&mut self, rhs: &Callable<A, R>) {
        self.remove(rhs);
    }
}
