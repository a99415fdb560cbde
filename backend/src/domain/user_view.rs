//! Enriched read-only projection of a [`User`].

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::User;

/// Salutation prepended to the name to form [`UserView::full_name`].
pub const FULL_NAME_PREFIX: &str = "Mr./Ms. ";

/// Derived view carrying the stored fields plus `fullName` and `age`.
///
/// Never persisted; build a fresh one per read with [`UserView::project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[schema(example = 4)]
    pub id: i64,
    #[schema(example = "Amy")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = Date, example = "2000-05-01")]
    pub dob: Option<NaiveDate>,
    #[schema(example = "Mr./Ms. Amy")]
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl UserView {
    /// Project `user` as seen on `today`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use users_api::domain::{User, UserView};
    ///
    /// let user = User::try_from_parts(1, "John", NaiveDate::from_ymd_opt(1990, 1, 1))
    ///     .expect("valid user");
    /// let today = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
    /// let view = UserView::project(&user, today);
    /// assert_eq!(view.full_name, "Mr./Ms. John");
    /// assert_eq!(view.age, Some(30));
    /// ```
    pub fn project(user: &User, today: NaiveDate) -> Self {
        Self {
            id: user.id().get(),
            name: user.name().to_string(),
            dob: user.dob(),
            full_name: format!("{FULL_NAME_PREFIX}{}", user.name()),
            age: user.age_on(today),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the enriched projection.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(34)]
    fn age_matches_years_elapsed(#[case] years: i32) {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        let dob = NaiveDate::from_ymd_opt(2024 - years, 5, 1);
        let user = User::try_from_parts(9, "Kim", dob).expect("valid user");

        let view = UserView::project(&user, today);
        assert_eq!(view.age, u32::try_from(years).ok());
    }

    #[rstest]
    fn view_serialises_camel_case_fields() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date");
        let user = User::try_from_parts(4, "Amy", NaiveDate::from_ymd_opt(2000, 5, 1))
            .expect("valid user");

        let value = serde_json::to_value(UserView::project(&user, today)).expect("serialise");
        assert_eq!(
            value,
            json!({
                "id": 4,
                "name": "Amy",
                "dob": "2000-05-01",
                "fullName": "Mr./Ms. Amy",
                "age": 25,
            })
        );
    }

    #[rstest]
    fn view_without_birth_date_has_no_age() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date");
        let user = User::try_from_parts(4, "Amy", None).expect("valid user");

        let value = serde_json::to_value(UserView::project(&user, today)).expect("serialise");
        assert!(value.get("age").is_none());
        assert!(value.get("dob").is_none());
    }
}
