//! Tests for field validators and their composition.

#[cfg(test)]
mod tests {
    use crate::validation::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, RwLock};

    struct CountingValidator {
        calls: Arc<AtomicUsize>,
    }

    impl FieldValidator<String> for CountingValidator {
        fn validate(&self, _value: &String) -> ValidationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ValidationResult::Valid
        }
    }

    fn s(value: &str) -> String {
        value.to_string()
    }

    // ==================== Required / Email ====================

    #[test]
    fn test_required_rejects_blank() {
        let v = RequiredValidator::default();
        assert_eq!(v.validate(&s("")), ValidationResult::invalid("Field is required"));
        assert_eq!(v.validate(&s("   ")), ValidationResult::invalid("Field is required"));
        assert!(v.validate(&s("x")).is_valid());
    }

    #[test]
    fn test_required_custom_message() {
        let v = RequiredValidator::new("Name is required");
        assert_eq!(v.validate(&s("")).error(), Some("Name is required"));
    }

    #[test]
    fn test_email_format() {
        let v = EmailValidator;
        assert!(v.validate(&s("jane.doe@example.com")).is_valid());
        assert!(v.validate(&s("a+tag@sub.example.org")).is_valid());
        assert!(!v.validate(&s("jane.doe")).is_valid());
        assert!(!v.validate(&s("jane@")).is_valid());
        assert!(!v.validate(&s("@example.com")).is_valid());
        assert!(!v.validate(&s("jane@example")).is_valid());
    }

    // ==================== Password ====================

    #[test]
    fn test_password_strength() {
        let v = PasswordValidator;
        assert!(v.validate(&s("Abc12345!")).is_valid());
        assert!(!v.validate(&s("Ab1!")).is_valid(), "too short");
        assert!(!v.validate(&s("abc12345!")).is_valid(), "no upper");
        assert!(!v.validate(&s("ABC12345!")).is_valid(), "no lower");
        assert!(!v.validate(&s("Abcdefgh!")).is_valid(), "no digit");
        assert!(!v.validate(&s("Abc123456")).is_valid(), "no symbol");
    }

    // ==================== Composite ====================

    #[test]
    fn test_composite_returns_first_failure() {
        let v = CompositeValidator::new()
            .with(RequiredValidator::default())
            .with(EmailValidator);
        assert_eq!(v.validate(&s("")).error(), Some("Field is required"));
        assert_eq!(
            v.validate(&s("nope")).error(),
            Some("Invalid email address format")
        );
        assert!(v.validate(&s("a@b.co")).is_valid());
    }

    #[test]
    fn test_composite_stops_evaluating_after_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let v = CompositeValidator::new()
            .with(RequiredValidator::default())
            .with(CountingValidator {
                calls: calls.clone(),
            });

        v.validate(&s(""));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        v.validate(&s("filled"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_composite_is_valid() {
        let v: CompositeValidator<String> = CompositeValidator::default();
        assert!(v.is_empty());
        assert!(v.validate(&s("")).is_valid());
    }

    // ==================== Match ====================

    #[test]
    fn test_match_reads_current_target() {
        let password = Arc::new(RwLock::new(s("Abc12345!")));
        let target = password.clone();
        let v = MatchValidator::with_message(
            move || target.read().unwrap().clone(),
            "Passwords do not match",
        );

        assert!(v.validate(&s("Abc12345!")).is_valid());

        *password.write().unwrap() = s("Xyz99999!");
        assert_eq!(
            v.validate(&s("Abc12345!")).error(),
            Some("Passwords do not match")
        );
        assert!(v.validate(&s("Xyz99999!")).is_valid());
    }

    // ==================== MinValue / Collections / NoOp ====================

    #[test]
    fn test_min_value() {
        let v = MinValueValidator::new(1);
        assert!(v.validate(&1).is_valid());
        assert!(v.validate(&30).is_valid());
        assert_eq!(v.validate(&0).error(), Some("Value must be at least 1"));
        assert!(!v.validate(&-4).is_valid());
    }

    #[test]
    fn test_not_empty_collection() {
        let v = NotEmptyCollectionValidator::default();
        assert!(v.validate(&vec!["p1".to_string()]).is_valid());
        assert_eq!(
            v.validate(&Vec::<String>::new()).error(),
            Some("Selection cannot be empty")
        );
    }

    #[test]
    fn test_noop_accepts_anything() {
        let v = NoOpValidator;
        assert!(FieldValidator::<String>::validate(&v, &s("")).is_valid());
        assert!(FieldValidator::<i64>::validate(&v, &-1).is_valid());
    }

    // ==================== Weekday mask ====================

    #[test]
    fn test_weekday_mask_messages() {
        let v = WeekdayMaskValidator;
        assert_eq!(
            v.validate(&vec![1, 0, 1]).error(),
            Some("Weekday mask must have exactly 7 elements")
        );
        assert_eq!(
            v.validate(&vec![1, 0, 2, 0, 0, 0, 0]).error(),
            Some("Weekday mask can only contain 0s and 1s")
        );
        assert_eq!(
            v.validate(&vec![0; 7]).error(),
            Some("At least one day must be selected")
        );
        assert!(v.validate(&vec![0, 0, 0, 0, 0, 1, 1]).is_valid());
    }

    proptest! {
        #[test]
        fn prop_weekday_mask_valid_iff_binary_seven_nonzero(
            mask in proptest::collection::vec(-1i32..3, 0..10)
        ) {
            let expected = mask.len() == 7
                && mask.iter().all(|d| *d == 0 || *d == 1)
                && mask.contains(&1);
            prop_assert_eq!(WeekdayMaskValidator.validate(&mask).is_valid(), expected);
        }

        #[test]
        fn prop_min_value_threshold(value in -1000i64..1000, min in -10i64..10) {
            prop_assert_eq!(MinValueValidator::new(min).validate(&value).is_valid(), value >= min);
        }
    }
}
