//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

fn draft(id: Option<i64>, name: Option<&str>, dob: Option<NaiveDate>) -> UserDraft {
    UserDraft {
        id,
        name: name.map(str::to_owned),
        dob,
    }
}

#[rstest]
#[case(1)]
#[case(i64::MAX)]
fn user_id_accepts_positive_values(#[case] raw: i64) {
    let id = UserId::new(raw).expect("positive id");
    assert_eq!(id.get(), raw);
}

#[rstest]
#[case(0)]
#[case(-7)]
fn user_id_rejects_non_positive_values(#[case] raw: i64) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::NonPositiveId));
}

#[rstest]
fn user_name_counts_characters_not_bytes() {
    assert!(UserName::new("Zé").is_ok());
    assert_eq!(
        UserName::new("é"),
        Err(UserValidationError::NameTooShort { min: USER_NAME_MIN })
    );
}

#[rstest]
fn user_serialises_with_plain_fields() {
    let user = User::try_from_parts(4, "Amy", NaiveDate::from_ymd_opt(2000, 5, 1))
        .expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value, json!({"id": 4, "name": "Amy", "dob": "2000-05-01"}));
}

#[rstest]
fn user_omits_absent_birth_date() {
    let user = User::try_from_parts(5, "Bea", None).expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value, json!({"id": 5, "name": "Bea"}));
}

#[rstest]
fn user_deserialisation_enforces_invariants() {
    let err = serde_json::from_value::<User>(json!({"id": -1, "name": "Amy"}))
        .expect_err("negative id should fail");
    assert!(err.to_string().contains("ID must be positive"));
}

#[rstest]
#[case(NaiveDate::from_ymd_opt(2000, 6, 15), Some(24))]
#[case(NaiveDate::from_ymd_opt(2000, 6, 16), Some(23))]
#[case(NaiveDate::from_ymd_opt(2024, 1, 1), Some(0))]
#[case(None, None)]
fn age_counts_whole_years(
    today: NaiveDate,
    #[case] dob: Option<NaiveDate>,
    #[case] expected: Option<u32>,
) {
    let user = User::try_from_parts(1, "John", dob).expect("valid user");
    assert_eq!(user.age_on(today), expected);
}

#[rstest]
fn valid_draft_becomes_new_user(today: NaiveDate) {
    let dob = NaiveDate::from_ymd_opt(2000, 5, 1);
    let new_user = draft(Some(4), Some("Amy"), dob)
        .validate(today)
        .expect("valid draft");
    assert_eq!(new_user.requested_id().map(UserId::get), Some(4));

    let user = new_user.into_user(UserId::new(4).expect("valid id"));
    assert_eq!(user.name().as_ref(), "Amy");
    assert_eq!(user.dob(), dob);
}

#[rstest]
fn draft_without_id_is_accepted(today: NaiveDate) {
    let new_user = draft(None, Some("Amy"), None)
        .validate(today)
        .expect("valid draft");
    assert!(new_user.requested_id().is_none());
}

#[rstest]
fn draft_reports_every_violation_in_field_order(today: NaiveDate) {
    let violations = draft(Some(0), Some("A"), Some(today))
        .validate(today)
        .expect_err("invalid draft");
    assert_eq!(
        violations,
        vec![
            UserValidationError::NonPositiveId,
            UserValidationError::NameTooShort { min: USER_NAME_MIN },
            UserValidationError::BirthDateNotInPast,
        ]
    );
}

#[rstest]
fn draft_requires_a_name(today: NaiveDate) {
    let violations = draft(Some(3), None, None)
        .validate(today)
        .expect_err("missing name");
    assert_eq!(violations, vec![UserValidationError::MissingName]);
}

#[rstest]
fn future_birth_date_is_rejected(today: NaiveDate) {
    let tomorrow = today.succ_opt();
    let violations = draft(Some(3), Some("Amy"), tomorrow)
        .validate(today)
        .expect_err("future dob");
    assert_eq!(violations, vec![UserValidationError::BirthDateNotInPast]);
}

#[rstest]
fn validation_messages_are_human_readable() {
    assert_eq!(
        UserValidationError::NonPositiveId.to_string(),
        "ID must be positive"
    );
    assert_eq!(
        UserValidationError::NameTooShort { min: 2 }.to_string(),
        "Name should have at least 2 characters"
    );
    assert_eq!(
        UserValidationError::BirthDateNotInPast.to_string(),
        "Birth Date should be in the past"
    );
}
