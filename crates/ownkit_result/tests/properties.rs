use ownkit_result::{DiscriminatedResult, State};
use proptest::prelude::*;

proptest! {
    #[test]
    fn success_is_readable_and_has_no_failure(s in any::<i64>()) {
        let r = DiscriminatedResult::<i64, String>::succeeded(s);
        prop_assert!(r.is_succeeded());
        prop_assert_eq!(r.get(), Ok(&s));
        prop_assert_eq!(r.fail().unwrap_err().found, State::Succeeded);
    }

    #[test]
    fn failure_is_readable_and_not_dereferenceable(f in ".*") {
        let r = DiscriminatedResult::<i64, String>::failed(f.clone());
        prop_assert!(!r.is_succeeded());
        prop_assert_eq!(r.fail(), Ok(&f));
        prop_assert_eq!(r.get().unwrap_err().found, State::Failed);
    }

    #[test]
    fn clone_preserves_state_and_payload(v in any::<Option<Result<u32, u32>>>()) {
        let r = match v {
            None => DiscriminatedResult::new(),
            Some(v) => DiscriminatedResult::from(v),
        };
        let c = r.clone();
        prop_assert_eq!(c.state(), r.state());
        prop_assert_eq!(c.into_result(), v);
    }

    #[test]
    fn last_assignment_wins(a in any::<u32>(), b in any::<u32>(), fail_last in any::<bool>()) {
        let mut r = DiscriminatedResult::<u32, u32>::new();
        r.set_failed(a);
        if fail_last {
            r.set_failed(b);
            prop_assert_eq!(r.fail(), Ok(&b));
            prop_assert!(r.get().is_err());
        } else {
            r.set_succeeded(b);
            prop_assert_eq!(r.get(), Ok(&b));
            prop_assert!(r.fail().is_err());
        }
    }
}
