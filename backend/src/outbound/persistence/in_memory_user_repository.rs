//! [`UserRepository`] backed by a lock-guarded vector.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::error;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, UserValidationError};

/// Users present at startup unless seeding is disabled.
const SEED_USERS: [(i64, &str, (i32, u32, u32)); 3] = [
    (1, "John", (1990, 1, 1)),
    (2, "Jane", (1991, 2, 2)),
    (3, "Bob", (1992, 3, 3)),
];

/// Flat, insertion-ordered user list.
///
/// Reads share the lock; `save` and `delete` take it exclusively. The adapter
/// does not check id uniqueness.
///
/// # Examples
/// ```
/// use users_api::domain::ports::UserRepository;
/// use users_api::outbound::persistence::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repository = InMemoryUserRepository::seeded().expect("valid seed");
/// let users = repository.find_all().await.expect("readable store");
/// assert_eq!(users.len(), 3);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `users` in the given order.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Store holding the demonstration users John, Jane and Bob.
    pub fn seeded() -> Result<Self, UserValidationError> {
        let users = SEED_USERS
            .iter()
            .map(|&(id, name, (year, month, day))| {
                User::try_from_parts(id, name, NaiveDate::from_ymd_opt(year, month, day))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_users(users))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users.read().map_err(|_| {
            error!("user store lock poisoned on read");
            UserPersistenceError::unavailable("lock poisoned")
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users.write().map_err(|_| {
            error!("user store lock poisoned on write");
            UserPersistenceError::unavailable("lock poisoned")
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.read()?.clone())
    }

    async fn find_one(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.read()?.iter().find(|user| user.id() == id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, UserPersistenceError> {
        self.write()?.push(user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        self.write()?.retain(|user| user.id() != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use super::*;

    fn user(id: i64, name: &str) -> User {
        User::try_from_parts(id, name, None).expect("valid user")
    }

    fn id(raw: i64) -> UserId {
        UserId::new(raw).expect("valid id")
    }

    #[fixture]
    fn repository() -> InMemoryUserRepository {
        InMemoryUserRepository::seeded().expect("seed users are valid")
    }

    #[rstest]
    #[tokio::test]
    async fn seed_holds_three_users_in_order(repository: InMemoryUserRepository) {
        let names: Vec<String> = repository
            .find_all()
            .await
            .expect("readable store")
            .iter()
            .map(|user| user.name().to_string())
            .collect();
        assert_eq!(names, ["John", "Jane", "Bob"]);
    }

    #[rstest]
    #[tokio::test]
    async fn save_appends_and_returns_user(repository: InMemoryUserRepository) {
        let saved = repository.save(user(4, "Amy")).await.expect("writable store");
        assert_eq!(saved, user(4, "Amy"));

        let all = repository.find_all().await.expect("readable store");
        assert_eq!(all.last(), Some(&saved));
    }

    #[rstest]
    #[tokio::test]
    async fn find_one_returns_first_match() {
        let repository =
            InMemoryUserRepository::with_users(vec![user(5, "First"), user(5, "Second")]);
        let found = repository.find_one(id(5)).await.expect("readable store");
        assert_eq!(found.map(|u| u.name().to_string()), Some("First".to_owned()));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_every_match() {
        let repository = InMemoryUserRepository::with_users(vec![
            user(5, "First"),
            user(6, "Other"),
            user(5, "Second"),
        ]);
        repository.delete(id(5)).await.expect("writable store");
        let remaining = repository.find_all().await.expect("readable store");
        assert_eq!(remaining, vec![user(6, "Other")]);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_absent_id_is_a_no_op(repository: InMemoryUserRepository) {
        repository.delete(id(99)).await.expect("writable store");
        assert_eq!(repository.find_all().await.expect("readable store").len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn poisoned_lock_reports_unavailable() {
        let repository = Arc::new(InMemoryUserRepository::new());
        let poisoner = Arc::clone(&repository);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.users.write().expect("fresh lock");
            panic!("poison the lock");
        })
        .join();

        let err = repository.find_all().await.expect_err("poisoned lock");
        assert_eq!(err, UserPersistenceError::unavailable("lock poisoned"));
    }
}
