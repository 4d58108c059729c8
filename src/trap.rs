//! Deferred error capture for a single attempt.
//!
//! An [`ErrorTrap`] runs a fallible closure and, instead of letting a failure
//! propagate, parks the error in an internal slot. The caller decides later
//! whether to inspect it ([`ErrorTrap::error`]) or surface it
//! ([`ErrorTrap::reraise`]). This is the building block the retry loop in
//! [`crate::trial`] hands out, one trap per attempt.

/// A single-attempt scope that captures an error instead of propagating it.
///
/// The trap starts empty. Running a closure through [`trap`](ErrorTrap::trap)
/// either leaves the slot empty (success) or fills it with the closure's
/// error. The scope itself always completes normally: `trap` never returns
/// the error directly.
///
/// One trap serves one attempt. Reusing a trap across attempts overwrites the
/// slot with the most recent error and is a caller bug; the retry loop in
/// [`crate::trial`] constructs a fresh trap per attempt for this reason.
///
/// # Examples
///
/// ```rust
/// use retrial::ErrorTrap;
///
/// let mut trap = ErrorTrap::new();
/// let value: Option<i32> = trap.trap(|| Err("flaky".to_string()));
///
/// assert!(value.is_none());
/// assert_eq!(trap.error().map(String::as_str), Some("flaky"));
/// assert_eq!(trap.reraise(), Err("flaky".to_string()));
/// ```
#[derive(Debug)]
pub struct ErrorTrap<E> {
    slot: Option<E>,
}

impl<E> ErrorTrap<E> {
    /// Create an empty trap.
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Run `op` inside the trap's scope.
    ///
    /// On success the value is returned as `Some` and the slot stays empty.
    /// On failure the error is stored and `None` is returned; execution
    /// continues past the scope as if nothing was raised.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrial::ErrorTrap;
    ///
    /// let mut trap = ErrorTrap::<String>::new();
    /// assert_eq!(trap.trap(|| Ok::<_, String>(7)), Some(7));
    /// assert!(trap.error().is_none());
    /// ```
    pub fn trap<T, F>(&mut self, op: F) -> Option<T>
    where
        F: FnOnce() -> Result<T, E>,
    {
        match op() {
            Ok(value) => Some(value),
            Err(err) => {
                self.slot = Some(err);
                None
            }
        }
    }

    /// The captured error, if any, without surfacing it.
    pub fn error(&self) -> Option<&E> {
        self.slot.as_ref()
    }

    /// Consume the trap and extract the captured error, if any.
    pub fn into_error(self) -> Option<E> {
        self.slot
    }

    /// Surface the captured error.
    ///
    /// Returns `Err` with the original error value, identity preserved, if
    /// the slot is full; `Ok(())` if nothing was captured. Consumes the trap,
    /// matching its single-attempt lifecycle.
    pub fn reraise(self) -> Result<(), E> {
        match self.slot {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<E> Default for ErrorTrap<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trap_passes_through_success() {
        let mut trap = ErrorTrap::<String>::new();
        let mut a = 10;

        let value = trap.trap(|| {
            a = 20;
            Ok::<_, String>(a)
        });

        assert_eq!(value, Some(20));
        assert_eq!(a, 20);
        assert!(trap.error().is_none());
        assert_eq!(trap.reraise(), Ok(()));
    }

    #[test]
    fn trap_captures_error() {
        let mut trap = ErrorTrap::new();

        let value: Option<()> = trap.trap(|| Err("foo".to_string()));

        assert!(value.is_none());
        assert_eq!(trap.error().map(String::as_str), Some("foo"));
        assert_eq!(trap.reraise(), Err("foo".to_string()));
    }

    #[test]
    fn reraise_on_empty_trap_is_noop() {
        let trap = ErrorTrap::<String>::new();
        assert_eq!(trap.reraise(), Ok(()));
    }

    #[test]
    fn reraise_preserves_error_identity() {
        #[derive(Debug, PartialEq)]
        enum TestError {
            Transient(u32),
        }

        let mut trap = ErrorTrap::new();
        let _: Option<()> = trap.trap(|| Err(TestError::Transient(7)));

        assert_eq!(trap.reraise(), Err(TestError::Transient(7)));
    }

    #[test]
    fn into_error_extracts_captured_error() {
        let mut trap = ErrorTrap::new();
        let _: Option<()> = trap.trap(|| Err("gone".to_string()));

        assert_eq!(trap.into_error(), Some("gone".to_string()));
    }

    #[test]
    fn default_is_empty() {
        let trap = ErrorTrap::<String>::default();
        assert!(trap.error().is_none());
    }
}
