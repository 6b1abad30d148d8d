use core::mem;

use crate::{CantDereference, NotHaveFailedObject, State};

// -----------------------------------------------------------------------------
// DiscriminatedResult

/// Holds exactly one of a success value `S`, a failure value `F`, or nothing.
///
/// Meant as a function return type: the normal result and the error payload
/// travel through the same value, and [`is_succeeded`](Self::is_succeeded)
/// tells them apart.
///
/// # Access rules
///
/// - [`get`](Self::get) and [`get_mut`](Self::get_mut) succeed only in
///   [`State::Succeeded`], otherwise they return [`CantDereference`].
/// - [`fail`](Self::fail) and [`fail_mut`](Self::fail_mut) succeed only in
///   [`State::Failed`], otherwise they return [`NotHaveFailedObject`].
///   An `Uninit` result never yields a failure value.
///
/// # Assignment
///
/// Every assignment drops the payload currently held before the new one
/// takes its place, so the old payload is destroyed exactly once.
///
/// # Examples
///
/// ```
/// use ownkit_result::DiscriminatedResult;
///
/// let mut r = DiscriminatedResult::<i32, &str>::succeeded(5);
/// assert!(r.is_succeeded());
/// assert_eq!(r.get(), Ok(&5));
///
/// r.set_failed("boom");
/// assert!(!r.is_succeeded());
/// assert_eq!(r.fail(), Ok(&"boom"));
/// assert!(r.get().is_err());
/// ```
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum DiscriminatedResult<S, F> {
    /// Holds nothing.
    Uninit,
    /// Holds a success payload.
    Succeeded(S),
    /// Holds a failure payload.
    Failed(F),
}

impl<S, F> Default for DiscriminatedResult<S, F> {
    #[inline]
    fn default() -> Self {
        Self::Uninit
    }
}

impl<S: Clone, F: Clone> Clone for DiscriminatedResult<S, F> {
    fn clone(&self) -> Self {
        match self {
            Self::Uninit => Self::Uninit,
            Self::Succeeded(s) => Self::Succeeded(s.clone()),
            Self::Failed(f) => Self::Failed(f.clone()),
        }
    }

    /// Drops the current payload before cloning `source`.
    ///
    /// If cloning the payload panics, `self` is left [`Uninit`](Self::Uninit).
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        *self = source.clone();
    }
}

impl<S, F> From<Result<S, F>> for DiscriminatedResult<S, F> {
    #[inline]
    fn from(value: Result<S, F>) -> Self {
        match value {
            Ok(s) => Self::Succeeded(s),
            Err(f) => Self::Failed(f),
        }
    }
}

impl<S, F> DiscriminatedResult<S, F> {
    /// Creates an uninitialized result.
    #[inline]
    pub const fn new() -> Self {
        Self::Uninit
    }

    /// Creates a result holding the success value `value`.
    #[inline]
    pub const fn succeeded(value: S) -> Self {
        Self::Succeeded(value)
    }

    /// Creates a result holding the failure value `value`.
    #[inline]
    pub const fn failed(value: F) -> Self {
        Self::Failed(value)
    }

    /// Creates a result holding a copy of `value` as its success payload.
    #[inline]
    pub fn from_success_ref(value: &S) -> Self
    where
        S: Clone,
    {
        Self::Succeeded(value.clone())
    }

    /// Creates a result holding a copy of `value` as its failure payload.
    #[inline]
    pub fn from_failure_ref(value: &F) -> Self
    where
        F: Clone,
    {
        Self::Failed(value.clone())
    }

    /// Returns the discriminant without borrowing the payload.
    #[inline]
    pub const fn state(&self) -> State {
        match self {
            Self::Uninit => State::Uninit,
            Self::Succeeded(_) => State::Succeeded,
            Self::Failed(_) => State::Failed,
        }
    }

    /// Returns `true` if a success payload is held.
    ///
    /// A failed and an uninitialized result both return `false`;
    /// use [`state`](Self::state) or [`fail`](Self::fail) to tell them apart.
    #[inline]
    pub const fn is_succeeded(&self) -> bool {
        self.state().is_succeeded()
    }

    /// Returns `true` if a failure payload is held.
    #[inline]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns `true` if nothing is held.
    #[inline]
    pub const fn is_uninit(&self) -> bool {
        matches!(self, Self::Uninit)
    }

    /// Returns a reference to the success payload.
    ///
    /// # Errors
    ///
    /// [`CantDereference`] if the result is failed or uninitialized.
    #[inline]
    pub const fn get(&self) -> Result<&S, CantDereference> {
        match self {
            Self::Succeeded(s) => Ok(s),
            _ => Err(CantDereference { found: self.state() }),
        }
    }

    /// Returns a mutable reference to the success payload.
    ///
    /// # Errors
    ///
    /// [`CantDereference`] if the result is failed or uninitialized.
    #[inline]
    pub fn get_mut(&mut self) -> Result<&mut S, CantDereference> {
        let found = self.state();
        match self {
            Self::Succeeded(s) => Ok(s),
            _ => Err(CantDereference { found }),
        }
    }

    /// Consumes the result and returns its success payload.
    ///
    /// # Errors
    ///
    /// [`CantDereference`] if the result is failed or uninitialized.
    /// The payload, if any, is dropped.
    #[inline]
    pub fn into_success(self) -> Result<S, CantDereference> {
        match self {
            Self::Succeeded(s) => Ok(s),
            other => Err(CantDereference { found: other.state() }),
        }
    }

    /// Returns a reference to the failure payload.
    ///
    /// # Errors
    ///
    /// [`NotHaveFailedObject`] if the result is succeeded or uninitialized.
    #[inline]
    pub const fn fail(&self) -> Result<&F, NotHaveFailedObject> {
        match self {
            Self::Failed(f) => Ok(f),
            _ => Err(NotHaveFailedObject { found: self.state() }),
        }
    }

    /// Returns a mutable reference to the failure payload.
    ///
    /// # Errors
    ///
    /// [`NotHaveFailedObject`] if the result is succeeded or uninitialized.
    #[inline]
    pub fn fail_mut(&mut self) -> Result<&mut F, NotHaveFailedObject> {
        let found = self.state();
        match self {
            Self::Failed(f) => Ok(f),
            _ => Err(NotHaveFailedObject { found }),
        }
    }

    /// Consumes the result and returns its failure payload.
    ///
    /// # Errors
    ///
    /// [`NotHaveFailedObject`] if the result is succeeded or uninitialized.
    #[inline]
    pub fn into_failure(self) -> Result<F, NotHaveFailedObject> {
        match self {
            Self::Failed(f) => Ok(f),
            other => Err(NotHaveFailedObject { found: other.state() }),
        }
    }

    /// Returns the success payload, panicking with the access error otherwise.
    #[track_caller]
    pub fn unwrap_success(self) -> S {
        match self.into_success() {
            Ok(s) => s,
            Err(e) => e.handle_error(),
        }
    }

    /// Returns the failure payload, panicking with the access error otherwise.
    #[track_caller]
    pub fn unwrap_failure(self) -> F {
        match self.into_failure() {
            Ok(f) => f,
            Err(e) => e.handle_error(),
        }
    }

    /// Replaces the held payload with the success value `value`.
    ///
    /// The previous payload is dropped first.
    #[inline]
    pub fn set_succeeded(&mut self, value: S) -> &mut Self {
        self.clear();
        *self = Self::Succeeded(value);
        self
    }

    /// Replaces the held payload with the failure value `value`.
    ///
    /// The previous payload is dropped first.
    #[inline]
    pub fn set_failed(&mut self, value: F) -> &mut Self {
        self.clear();
        *self = Self::Failed(value);
        self
    }

    /// Replaces `self` with `other`, dropping the current payload first.
    #[inline]
    pub fn assign(&mut self, other: Self) -> &mut Self {
        self.clear();
        *self = other;
        self
    }

    /// Drops the held payload, if any, and leaves the result uninitialized.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::Uninit;
    }

    /// Moves the whole result out, leaving `self` uninitialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use ownkit_result::DiscriminatedResult;
    ///
    /// let mut src = DiscriminatedResult::<String, ()>::succeeded("x".into());
    /// let dst = src.take();
    ///
    /// assert!(src.is_uninit());
    /// assert_eq!(dst.get().map(String::as_str), Ok("x"));
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::Uninit)
    }

    /// Borrows both payloads.
    #[inline]
    pub const fn as_ref(&self) -> DiscriminatedResult<&S, &F> {
        match self {
            Self::Uninit => DiscriminatedResult::Uninit,
            Self::Succeeded(s) => DiscriminatedResult::Succeeded(s),
            Self::Failed(f) => DiscriminatedResult::Failed(f),
        }
    }

    /// Mutably borrows both payloads.
    #[inline]
    pub fn as_mut(&mut self) -> DiscriminatedResult<&mut S, &mut F> {
        match self {
            Self::Uninit => DiscriminatedResult::Uninit,
            Self::Succeeded(s) => DiscriminatedResult::Succeeded(s),
            Self::Failed(f) => DiscriminatedResult::Failed(f),
        }
    }

    /// Converts into a standard [`Result`], or `None` if uninitialized.
    #[inline]
    pub fn into_result(self) -> Option<Result<S, F>> {
        match self {
            Self::Uninit => None,
            Self::Succeeded(s) => Some(Ok(s)),
            Self::Failed(f) => Some(Err(f)),
        }
    }
}
