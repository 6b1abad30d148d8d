use thiserror::Error;

use crate::State;

// -----------------------------------------------------------------------------
// Error

/// Returned when the success payload is requested from a result that is
/// not [`State::Succeeded`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot dereference result: state is {found}")]
pub struct CantDereference {
    /// The state the result was in at the time of access.
    pub found: State,
}

/// Returned when the failure payload is requested from a result that is
/// not [`State::Failed`]. An uninitialized result is treated like a
/// succeeded one here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("result has no failed object: state is {found}")]
pub struct NotHaveFailedObject {
    /// The state the result was in at the time of access.
    pub found: State,
}

macro_rules! impl_handle_error {
    ($name:ident) => {
        impl $name {
            /// Escalates the access error to a panic carrying its message.
            #[cold]
            #[inline(never)]
            #[track_caller]
            pub fn handle_error(&self) -> ! {
                log::debug!("escalating result access error: {self}");
                panic!("{self}");
            }
        }
    };
}

impl_handle_error!(CantDereference);
impl_handle_error!(NotHaveFailedObject);

#[cfg(test)]
mod tests {
    use super::{CantDereference, NotHaveFailedObject};
    use crate::State;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_state() {
        let e = CantDereference { found: State::Failed };
        assert_eq!(e.to_string(), "cannot dereference result: state is failed");

        let e = NotHaveFailedObject { found: State::Uninit };
        assert_eq!(
            e.to_string(),
            "result has no failed object: state is uninitialized"
        );
    }

    #[test]
    fn usable_as_dyn_error() {
        fn erase(e: impl core::error::Error + 'static) -> alloc::boxed::Box<dyn core::error::Error> {
            alloc::boxed::Box::new(e)
        }

        let e = erase(CantDereference { found: State::Uninit });
        assert!(e.to_string().contains("uninitialized"));
        let e = erase(NotHaveFailedObject { found: State::Succeeded });
        assert!(e.to_string().ends_with("state is succeeded"));
    }

    #[test]
    #[should_panic(expected = "cannot dereference result: state is failed")]
    fn handle_error_panics_with_message() {
        CantDereference { found: State::Failed }.handle_error();
    }
}
