use core::fmt;

/// Which payload, if any, a [`DiscriminatedResult`](crate::DiscriminatedResult) holds.
///
/// # Examples
///
/// ```
/// use ownkit_result::{DiscriminatedResult, State};
///
/// let r = DiscriminatedResult::<u8, ()>::new();
/// assert_eq!(r.state(), State::Uninit);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// No payload is held.
    #[default]
    Uninit,
    /// A success payload is held.
    Succeeded,
    /// A failure payload is held.
    Failed,
}

impl State {
    /// Returns `true` only for [`State::Succeeded`].
    #[inline]
    pub const fn is_succeeded(self) -> bool {
        matches!(self, State::Succeeded)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            State::Uninit => "uninitialized",
            State::Succeeded => "succeeded",
            State::Failed => "failed",
        })
    }
}
