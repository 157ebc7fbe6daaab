//! Process-local `UserRepository` used when no database is configured.
//!
//! Records live for the lifetime of the process. The mutex is never held
//! across an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId};

#[derive(Default)]
struct Store {
    by_email: HashMap<EmailAddress, User>,
}

/// In-memory implementation of the user repository port.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<Mutex<Store>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryUserRepository {
    /// Create an empty store stamping `created_at` from `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::default())),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        if store.by_email.contains_key(&user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        let email = user.email.clone();
        let saved = User::from_new(UserId::random(), user, self.clock.utc());
        store.by_email.insert(email, saved.clone());
        Ok(saved)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.by_email.get(email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut users: Vec<User> = self.lock()?.by_email.values().cloned().collect();
        users.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use crate::domain::{FullName, PasswordHash, Role};
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    struct SteppingClock {
        ticks: Mutex<i64>,
    }

    impl Clock for SteppingClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            let mut ticks = self.ticks.lock().expect("clock lock");
            *ticks += 1;
            Utc.timestamp_opt(1_700_000_000 + *ticks, 0)
                .single()
                .expect("valid timestamp")
        }
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new(Arc::new(SteppingClock {
            ticks: Mutex::new(0),
        }))
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            full_name: FullName::new("Ann Example").expect("valid name"),
            email: EmailAddress::new(email).expect("valid email"),
            password_hash: PasswordHash::from_encoded("hash"),
            role: Role::User,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn saved_user_is_found_by_email(repo: InMemoryUserRepository) {
        let saved = repo
            .save(new_user("ann@example.com"))
            .await
            .expect("save succeeds");
        let email = EmailAddress::new("ANN@example.com").expect("valid email");

        let found = repo.find_by_email(&email).await.expect("lookup succeeds");
        assert_eq!(found, Some(saved));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected_without_overwrite(repo: InMemoryUserRepository) {
        let first = repo
            .save(new_user("ann@example.com"))
            .await
            .expect("first save");
        let err = repo
            .save(new_user("ann@example.com"))
            .await
            .expect_err("second save must fail");
        assert_eq!(err, UserPersistenceError::duplicate_email("ann@example.com"));

        let listed = repo.list().await.expect("list succeeds");
        assert_eq!(listed, vec![first]);
    }

    #[rstest]
    #[tokio::test]
    async fn list_orders_by_creation(repo: InMemoryUserRepository) {
        for email in ["c@example.com", "a@example.com", "b@example.com"] {
            repo.save(new_user(email)).await.expect("save succeeds");
        }
        let emails: Vec<String> = repo
            .list()
            .await
            .expect("list succeeds")
            .iter()
            .map(|user| user.email().to_string())
            .collect();
        assert_eq!(emails, ["c@example.com", "a@example.com", "b@example.com"]);
    }
}
