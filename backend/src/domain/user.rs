//! User data model.
//!
//! A [`User`] is the stored record. Requests arrive as an unvalidated
//! [`UserDraft`]; [`UserDraft::validate`] reports every violated constraint at
//! once so adapters can answer with a single aggregated message.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised by the user constructors and [`UserDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NonPositiveId,
    MissingName,
    NameTooShort { min: usize },
    BirthDateNotInPast,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "ID must be positive"),
            Self::MissingName => write!(f, "Name is required"),
            Self::NameTooShort { min } => {
                write!(f, "Name should have at least {min} characters")
            }
            Self::BirthDateNotInPast => write!(f, "Birth Date should be in the past"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Positive integer identifying a stored user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::UserId;
    ///
    /// assert_eq!(UserId::new(4).map(UserId::get), Ok(4));
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(raw: i64) -> Result<Self, UserValidationError> {
        if raw <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(raw))
    }

    /// Identifier following this one, used when assigning ids; `None` at
    /// `i64::MAX`.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::UserId;
    ///
    /// let id = UserId::new(4).expect("positive id");
    /// assert_eq!(id.successor().map(UserId::get), Some(5));
    /// let last = UserId::new(i64::MAX).expect("positive id");
    /// assert!(last.successor().is_none());
    /// ```
    #[must_use]
    pub fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Raw integer value.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minimum allowed length for a user name, counted in characters.
pub const USER_NAME_MIN: usize = 2;

/// User name of at least [`USER_NAME_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, UserValidationError> {
        if name.chars().count() < USER_NAME_MIN {
            return Err(UserValidationError::NameTooShort {
                min: USER_NAME_MIN,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `id` is positive and unique among stored records; uniqueness is checked
///   by the service before insertion, not by the type.
/// - `name` has at least [`USER_NAME_MIN`] characters.
/// - `dob`, when present, was in the past at the time of creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = i64, example = 4)]
    id: UserId,
    #[schema(value_type = String, example = "Amy")]
    name: UserName,
    #[schema(value_type = Option<String>, format = Date, example = "2000-05-01")]
    dob: Option<NaiveDate>,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, name: UserName, dob: Option<NaiveDate>) -> Self {
        Self { id, name, dob }
    }

    /// Fallible constructor from raw parts. Does not check `dob`; that
    /// depends on the current date and is the job of [`UserDraft::validate`].
    pub fn try_from_parts(
        id: i64,
        name: impl Into<String>,
        dob: Option<NaiveDate>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, UserName::new(name)?, dob))
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Name as submitted.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Date of birth, if known.
    pub fn dob(&self) -> Option<NaiveDate> {
        self.dob
    }

    /// Whole years between the date of birth and `today`.
    ///
    /// Returns `None` when the date of birth is unknown or after `today`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use users_api::domain::User;
    ///
    /// let dob = NaiveDate::from_ymd_opt(2000, 5, 1);
    /// let user = User::try_from_parts(4, "Amy", dob).expect("valid user");
    /// let today = NaiveDate::from_ymd_opt(2024, 4, 30).expect("valid date");
    /// assert_eq!(user.age_on(today), Some(23));
    /// ```
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.dob.and_then(|dob| today.years_since(dob))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDto {
    id: i64,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dob: Option<NaiveDate>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, name, dob } = value;
        Self {
            id: id.into(),
            name: name.into(),
            dob,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_parts(value.id, value.name, value.dob)
    }
}

/// Unvalidated user submission.
///
/// Every field is optional so that a request missing several of them can be
/// reported in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
}

impl UserDraft {
    /// Check every constraint and collect all violations, in field order.
    ///
    /// `today` is the date the `dob` must precede.
    pub fn validate(self, today: NaiveDate) -> Result<NewUser, Vec<UserValidationError>> {
        let mut violations = Vec::new();

        let id = self.id.map(UserId::new).transpose().unwrap_or_else(|err| {
            violations.push(err);
            None
        });

        let name = match self.name {
            Some(raw) => UserName::new(raw)
                .map_err(|err| violations.push(err))
                .ok(),
            None => {
                violations.push(UserValidationError::MissingName);
                None
            }
        };

        if self.dob.is_some_and(|dob| dob >= today) {
            violations.push(UserValidationError::BirthDateNotInPast);
        }

        match name {
            Some(name) if violations.is_empty() => Ok(NewUser {
                id,
                name,
                dob: self.dob,
            }),
            _ => Err(violations),
        }
    }
}

/// Validated submission awaiting an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    id: Option<UserId>,
    name: UserName,
    dob: Option<NaiveDate>,
}

impl NewUser {
    /// Identifier requested by the client, if any.
    pub fn requested_id(&self) -> Option<UserId> {
        self.id
    }

    /// Materialise the stored record under `id`.
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.name, self.dob)
    }
}

#[cfg(test)]
mod tests;
