#[cfg(test)]
mod tests {
    use crate::cache::Cleanable;
    use crate::errors::{Error, RemoteError, Result, ValidationError};
    use crate::patch::Patch;
    use crate::users::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockUserRemote {
        registered: Mutex<Vec<String>>,
        fail_update: Mutex<bool>,
    }

    fn alice() -> User {
        User {
            id: "u1".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            surname: "Smith".to_string(),
            username: "alice".to_string(),
        }
    }

    #[async_trait]
    impl UserRemoteTrait for MockUserRemote {
        async fn register(&self, registration: &UserRegistration) -> Result<User> {
            self.registered
                .lock()
                .unwrap()
                .push(registration.username.clone());
            Ok(User {
                username: registration.username.clone(),
                ..alice()
            })
        }

        async fn me(&self) -> Result<User> {
            Ok(alice())
        }

        async fn update_me(&self, update: &UserUpdate) -> Result<User> {
            if *self.fail_update.lock().unwrap() {
                return Err(RemoteError::unknown("boom").into());
            }
            let mut user = alice();
            if let Some(name) = update.name.as_set() {
                user.name = name.clone();
            }
            Ok(user)
        }
    }

    fn registration() -> UserRegistration {
        UserRegistration {
            email: "bob@example.com".to_string(),
            name: "Bob".to_string(),
            surname: "Jones".to_string(),
            username: "bob".to_string(),
            password: "Secr3t!pass".to_string(),
        }
    }

    #[test]
    fn test_registration_validation_messages() {
        let mut reg = registration();
        reg.email = String::new();
        match reg.validate().unwrap_err() {
            Error::Validation(ValidationError::Field { field, message }) => {
                assert_eq!(field, "email");
                assert_eq!(message, "Email is required");
            }
            other => panic!("unexpected {:?}", other),
        }

        let mut reg = registration();
        reg.password = "short".to_string();
        let err = reg.validate().unwrap_err();
        assert!(err.to_string().starts_with("Input validation failed: password:"));
    }

    #[test]
    fn test_registration_debug_hides_password() {
        let printed = format!("{:?}", registration());
        assert!(!printed.contains("Secr3t"));
    }

    #[test]
    fn test_update_rejects_clear_and_bad_email() {
        let update = UserUpdate {
            surname: Patch::Clear,
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UserUpdate {
            email: Patch::Set("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UserUpdate {
            name: Patch::Set("Alicia".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[tokio::test]
    async fn test_register_does_not_cache_user() {
        let remote = Arc::new(MockUserRemote::default());
        let repo = UserRepository::new(remote.clone());

        let user = repo.register(registration()).await.unwrap();
        assert_eq!(user.username, "bob");
        assert!(repo.user().is_none());
        assert_eq!(*remote.registered.lock().unwrap(), vec!["bob".to_string()]);
    }

    #[tokio::test]
    async fn test_profile_and_update_cache_user() {
        let remote = Arc::new(MockUserRemote::default());
        let repo = UserRepository::new(remote.clone());
        let mut rx = repo.subscribe();

        repo.profile().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().name, "Alice");

        let update = UserUpdate {
            name: Patch::Set("Alicia".to_string()),
            ..Default::default()
        };
        repo.update(update.clone()).await.unwrap();
        assert_eq!(repo.user().unwrap().name, "Alicia");

        *remote.fail_update.lock().unwrap() = true;
        assert!(repo.update(update).await.is_err());
        assert_eq!(repo.user().unwrap().name, "Alicia");

        repo.clear();
        assert!(repo.user().is_none());
    }
}
