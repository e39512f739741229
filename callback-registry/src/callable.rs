//! Callable references
//!
//! A [`Callable`] is an opaque, cheaply clonable handle to behavior with a
//! fixed signature `Fn(A) -> R`. Signatures with several parameters use a
//! tuple for `A`.
//!
//! Identity is per construction: clones of one callable are the same
//! reference, while two callables built separately are different references
//! even when they wrap the same function.

use std::fmt;
use std::sync::Arc;

type Erased<A, R> = dyn Fn(A) -> R + Send + Sync;

/// A typed reference to invocable behavior
pub struct Callable<A, R> {
    inner: Arc<Erased<A, R>>,
}

/// A callable that produces a value
pub type Func<A, R> = Callable<A, R>;

/// A callable invoked only for its side effects
pub type Action<A> = Callable<A, ()>;

/// A callable answering a yes/no question about its argument
pub type Predicate<A> = Callable<A, bool>;

impl<A, R> Callable<A, R> {
    /// Wrap a free function or closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Bind a method to a receiver
    ///
    /// The receiver is shared with the caller; the callable keeps it alive
    /// for as long as the callable (or any clone of it) exists.
    ///
    /// # Example
    /// ```
    /// use callback_registry::Callable;
    /// use std::sync::Arc;
    ///
    /// struct Pricer { markup: i32 }
    ///
    /// impl Pricer {
    ///     fn price(&self, base: i32) -> i32 { base + self.markup }
    /// }
    ///
    /// let pricer = Arc::new(Pricer { markup: 5 });
    /// let price = Callable::bound(pricer, Pricer::price);
    /// assert_eq!(price.call(10), 15);
    /// ```
    pub fn bound<T, M>(receiver: Arc<T>, method: M) -> Self
    where
        T: Send + Sync + 'static,
        M: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        Self::new(move |args| method(&receiver, args))
    }

    /// Invoke the referenced behavior
    pub fn call(&self, args: A) -> R {
        (self.inner)(args)
    }

    /// True if both handles refer to the same callable
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        a.id() == b.id()
    }

    fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }
}

impl<A: 'static, R: 'static> Callable<A, R> {
    /// Post-process the result, producing a callable of a new result type
    pub fn map_result<R2, G>(self, g: G) -> Callable<A, R2>
    where
        G: Fn(R) -> R2 + Send + Sync + 'static,
    {
        let inner = self.inner;
        Callable::new(move |args| g(inner(args)))
    }

    /// Pre-process the arguments, producing a callable of a new parameter type
    pub fn map_args<A2, G>(self, g: G) -> Callable<A2, R>
    where
        G: Fn(A2) -> A + Send + Sync + 'static,
    {
        let inner = self.inner;
        Callable::new(move |args| inner(g(args)))
    }

    /// Result covariance: use a callable returning `R` where a more general
    /// result type is expected
    pub fn widen<R2>(self) -> Callable<A, R2>
    where
        R2: From<R> + 'static,
    {
        self.map_result(R2::from)
    }

    /// Parameter contravariance: use a callable accepting `A` where a more
    /// specific parameter type is supplied
    pub fn narrow<A2: 'static>(self) -> Callable<A2, R>
    where
        A: From<A2>,
    {
        self.map_args(A::from)
    }
}

impl<A, R> Clone for Callable<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, R> PartialEq for Callable<A, R> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

impl<A, R> Eq for Callable<A, R> {}

impl<A, R> fmt::Debug for Callable<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable(0x{:x})", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        step: i32,
    }

    impl Counter {
        fn advance(&self, from: i32) -> i32 {
            from + self.step
        }
    }

    #[test]
    fn test_free_and_bound_invoke_alike() {
        let free = Callable::new(|x: i32| x + 3);
        let bound = Callable::bound(Arc::new(Counter { step: 3 }), Counter::advance);

        assert_eq!(free.call(4), 7);
        assert_eq!(bound.call(4), 7);
    }

    #[test]
    fn test_identity() {
        fn double(x: i32) -> i32 {
            x * 2
        }

        let a = Callable::new(double);
        let b = Callable::new(double);
        let a_again = a.clone();

        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert!(Callable::ptr_eq(&a, &a_again));
    }

    #[test]
    fn test_tuple_arguments() {
        let add: Func<(i32, i32), i32> = Callable::new(|(a, b): (i32, i32)| a + b);
        assert_eq!(add.call((10, 20)), 30);
    }

    #[test]
    fn test_widen_and_narrow() {
        // u8 -> u32 is a widening result; u8 can also be supplied where u16 is accepted
        let small: Func<i32, u8> = Callable::new(|x: i32| x as u8);
        let wide: Func<i32, u32> = small.widen();
        assert_eq!(wide.call(7), 7u32);

        let takes_wide: Predicate<u16> = Callable::new(|x: u16| x > 255);
        let takes_narrow: Predicate<u8> = takes_wide.narrow();
        assert!(!takes_narrow.call(200));
    }

    #[derive(Debug, PartialEq)]
    struct Receipt(String);

    impl From<String> for Receipt {
        fn from(text: String) -> Self {
            Receipt(text)
        }
    }

    #[test]
    fn test_widen_and_narrow_owned_types() {
        let label: Func<u32, String> = Callable::new(|n: u32| format!("#{}", n));
        let receipt: Func<u32, Receipt> = label.widen();
        assert_eq!(receipt.call(4), Receipt("#4".to_string()));

        let measure: Func<String, usize> = Callable::new(|text: String| text.len());
        let measure_chars: Func<char, usize> = measure.narrow();
        assert_eq!(measure_chars.call('x'), 1);
    }

    #[test]
    fn test_debug_is_opaque() {
        let c: Action<()> = Callable::new(|_: ()| {});
        assert!(format!("{:?}", c).starts_with("Callable(0x"));
    }
}
