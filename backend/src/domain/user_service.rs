//! CRUD use-cases shared by every API version.
//!
//! Handlers differ only in how they shape responses; lookup, duplicate
//! checks, id assignment and localised messages all live here.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::ports::{MessageCatalog, UserRepository};
use super::{Error, Locale, MessageKey, NewUser, User, UserId};

/// Outcome of a successful create: the stored record and a localised notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedUser {
    pub user: User,
    pub message: String,
}

/// User use-cases over a [`UserRepository`].
///
/// Creates and deletes run one at a time behind a writer gate, so the
/// existence check and the mutation that follows it cannot interleave with
/// another writer.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    messages: Arc<dyn MessageCatalog>,
    clock: Arc<dyn Clock>,
    writer: Mutex<()>,
}

impl UserService {
    /// Build the service from its ports.
    pub fn new(
        repository: Arc<dyn UserRepository>,
        messages: Arc<dyn MessageCatalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            messages,
            clock,
            writer: Mutex::new(()),
        }
    }

    /// Current date according to the injected clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    /// Look up a user by raw id. Non-positive ids never match.
    pub async fn find(&self, raw_id: i64) -> Result<Option<User>, Error> {
        let Ok(id) = UserId::new(raw_id) else {
            debug!(raw_id, "lookup with non-positive id");
            return Ok(None);
        };
        Ok(self.repository.find_one(id).await?)
    }

    /// Look up a user by raw id, raising a localised not-found error when absent.
    pub async fn find_existing(&self, raw_id: i64, locale: &Locale) -> Result<User, Error> {
        match self.find(raw_id).await? {
            Some(user) => Ok(user),
            None => Err(self.not_found(raw_id, locale)),
        }
    }

    /// Every stored user in insertion order.
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        Ok(self.repository.find_all().await?)
    }

    /// Store a validated user.
    ///
    /// A requested id already in use is a [`Conflict`](super::ErrorCode::Conflict).
    /// Without a requested id the next free one (highest stored id plus one)
    /// is assigned; once the highest stored id is `i64::MAX` that is a
    /// [`Conflict`](super::ErrorCode::Conflict) too.
    pub async fn create(&self, new_user: NewUser, locale: &Locale) -> Result<CreatedUser, Error> {
        let _writer = self.writer.lock().await;

        let id = match new_user.requested_id() {
            Some(id) => {
                if self.repository.find_one(id).await?.is_some() {
                    warn!(user_id = %id, "rejected duplicate user id");
                    let id = id.to_string();
                    return Err(Error::conflict(self.messages.message(
                        MessageKey::UserAlreadyExists,
                        locale,
                        &[&id],
                    )));
                }
                id
            }
            None => self.next_id(locale).await?,
        };

        let user = self.repository.save(new_user.into_user(id)).await?;
        info!(user_id = %user.id(), "user created");
        Ok(CreatedUser {
            user,
            message: self.messages.message(MessageKey::UserCreated, locale, &[]),
        })
    }

    /// Remove the user with `id`, returning a localised confirmation.
    pub async fn delete(&self, id: UserId, locale: &Locale) -> Result<String, Error> {
        let _writer = self.writer.lock().await;

        if self.repository.find_one(id).await?.is_none() {
            warn!(user_id = %id, "delete of unknown user");
            return Err(self.not_found(id.get(), locale));
        }
        self.repository.delete(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(self.messages.message(MessageKey::UserDeleted, locale, &[]))
    }

    async fn next_id(&self, locale: &Locale) -> Result<UserId, Error> {
        let users = self.repository.find_all().await?;
        let Some(highest) = users.iter().map(User::id).max() else {
            return UserId::new(1)
                .map_err(|err| Error::internal(format!("failed to assign user id: {err}")));
        };
        highest.successor().ok_or_else(|| {
            warn!(highest = %highest, "no user id left to assign");
            Error::conflict(
                self.messages
                    .message(MessageKey::UserIdsExhausted, locale, &[]),
            )
        })
    }

    fn not_found(&self, raw_id: i64, locale: &Locale) -> Error {
        let id = raw_id.to_string();
        Error::not_found(
            self.messages
                .message(MessageKey::UserNotFound, locale, &[&id]),
        )
    }
}
