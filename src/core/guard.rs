//! Guard predicates.
//!
//! A guard is a pure boolean function over some context value. Redirect
//! rules are built from guards, and because guards never mutate anything
//! the same inputs always produce the same answer.

/// Pure predicate over a context value `C`.
///
/// # Example
///
/// ```rust
/// use sessiongate::core::Guard;
///
/// let even = Guard::new(|n: &u32| n % 2 == 0);
///
/// assert!(even.check(&4));
/// assert!(!even.check(&7));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the predicate against `context`.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }

    /// Guard that holds when both `self` and `other` hold.
    ///
    /// ```rust
    /// use sessiongate::core::Guard;
    ///
    /// let small_even = Guard::new(|n: &u32| n % 2 == 0).and(Guard::new(|n: &u32| *n < 10));
    /// assert!(small_even.check(&4));
    /// assert!(!small_even.check(&12));
    /// ```
    pub fn and(self, other: Guard<C>) -> Guard<C>
    where
        C: 'static,
    {
        Guard::new(move |context: &C| self.check(context) && other.check(context))
    }

    /// Guard that holds when `self` does not.
    pub fn negate(self) -> Guard<C>
    where
        C: 'static,
    {
        Guard::new(move |context: &C| !self.check(context))
    }
}

impl<C> std::fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Guard(..)")
    }
}
