//! Predicate-driven filtering over slices

use crate::callable::{Action, Predicate};

/// Filtering and per-item actions driven by callables
pub trait FilterExt<T> {
    /// Items for which `predicate` holds, in their original order
    fn filter_by<'a>(&'a self, predicate: &Predicate<&'a T>) -> Vec<&'a T>;

    /// Owned copies of the items for which `predicate` holds
    fn filter_cloned<'a>(&'a self, predicate: &Predicate<&'a T>) -> Vec<T>
    where
        T: Clone;

    /// Run `action` on every item in order
    fn apply_each<'a>(&'a self, action: &Action<&'a T>);
}

impl<T> FilterExt<T> for [T] {
    fn filter_by<'a>(&'a self, predicate: &Predicate<&'a T>) -> Vec<&'a T> {
        self.iter().filter(|item| predicate.call(*item)).collect()
    }

    fn filter_cloned<'a>(&'a self, predicate: &Predicate<&'a T>) -> Vec<T>
    where
        T: Clone,
    {
        self.filter_by(predicate).into_iter().cloned().collect()
    }

    fn apply_each<'a>(&'a self, action: &Action<&'a T>) {
        for item in self {
            action.call(item);
        }
    }
}
