//! Login, first-access password change and administrative reset rules.

use crate::error::CoreError;
use crate::models::{Person, PersonUpdate};
use crate::password::{hash_password, validate_password_strength, verify_password};

/// Minimum length of a password chosen by the user.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Password assigned by an administrative reset. The account is flagged so
/// the user must replace it at the next login.
pub const DEFAULT_PASSWORD: &str = "123";

/// Why a login attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Account is inactive")]
    Inactive,
}

impl From<LoginError> for CoreError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => CoreError::Unauthorized(err.to_string()),
            LoginError::Inactive => CoreError::Forbidden(err.to_string()),
        }
    }
}

/// Check a password against the person found for the submitted username.
///
/// The inactive check runs after the password verifies, so only a caller
/// holding valid credentials learns that the account is disabled. A stored
/// hash that cannot be parsed counts as a mismatch.
pub fn authenticate(person: Option<Person>, password: &str) -> Result<Person, LoginError> {
    let person = person.ok_or(LoginError::InvalidCredentials)?;
    let hash = person
        .password_hash
        .as_deref()
        .ok_or(LoginError::InvalidCredentials)?;

    if !verify_password(password, hash).unwrap_or(false) {
        return Err(LoginError::InvalidCredentials);
    }
    if !person.active {
        return Err(LoginError::Inactive);
    }
    Ok(person)
}

/// Validate a first-access password: minimum length and confirmation match.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), CoreError> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(CoreError::Validation)?;
    if password != confirmation {
        return Err(CoreError::Validation("Passwords do not match".into()));
    }
    Ok(())
}

/// Build the update that stores a new password and clears the
/// forced-change flag.
pub fn password_change_update(password: &str, confirmation: &str) -> Result<PersonUpdate, CoreError> {
    validate_new_password(password, confirmation)?;
    let hash = hash_password(password)
        .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;
    Ok(PersonUpdate {
        password_hash: Some(hash),
        must_change_password: Some(false),
        ..Default::default()
    })
}

/// Build the update for an administrative reset to [`DEFAULT_PASSWORD`].
pub fn reset_password_update() -> Result<PersonUpdate, CoreError> {
    let hash = hash_password(DEFAULT_PASSWORD)
        .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;
    Ok(PersonUpdate {
        password_hash: Some(hash),
        must_change_password: Some(true),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::models::NewPerson;

    fn person(password: &str, active: bool) -> Person {
        NewPerson {
            name: "Diana Prince".into(),
            role_id: "role-staff".into(),
            email: "staff@example.com".into(),
            phone: "0".into(),
            username: Some("diana".into()),
            password_hash: Some(hash_password(password).unwrap()),
            active,
            ..Default::default()
        }
        .into_person("p4".into())
    }

    #[test]
    fn correct_credentials_succeed() {
        let p = authenticate(Some(person("123", true)), "123").unwrap();
        assert_eq!(p.id, "p4");
    }

    #[test]
    fn unknown_user_is_invalid_credentials() {
        assert_matches!(authenticate(None, "123"), Err(LoginError::InvalidCredentials));
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        assert_matches!(
            authenticate(Some(person("123", true)), "nope"),
            Err(LoginError::InvalidCredentials)
        );
    }

    #[test]
    fn inactive_with_correct_password_is_distinct() {
        assert_matches!(
            authenticate(Some(person("123", false)), "123"),
            Err(LoginError::Inactive)
        );
    }

    #[test]
    fn inactive_with_wrong_password_stays_generic() {
        assert_matches!(
            authenticate(Some(person("123", false)), "bad"),
            Err(LoginError::InvalidCredentials)
        );
    }

    #[test]
    fn person_without_credentials_cannot_log_in() {
        let mut p = person("123", true);
        p.password_hash = None;
        assert_matches!(authenticate(Some(p), "123"), Err(LoginError::InvalidCredentials));
    }

    #[test]
    fn login_errors_map_to_distinct_core_errors() {
        assert_matches!(
            CoreError::from(LoginError::InvalidCredentials),
            CoreError::Unauthorized(_)
        );
        assert_matches!(CoreError::from(LoginError::Inactive), CoreError::Forbidden(_));
    }

    #[test]
    fn new_password_policy() {
        assert_matches!(validate_new_password("12345", "12345"), Err(CoreError::Validation(_)));
        assert_matches!(validate_new_password("123456", "123457"), Err(CoreError::Validation(_)));
        assert!(validate_new_password("123456", "123456").is_ok());
    }

    #[test]
    fn password_change_clears_flag() {
        let update = password_change_update("s3cret!", "s3cret!").unwrap();
        assert_eq!(update.must_change_password, Some(false));
        let hash = update.password_hash.unwrap();
        assert!(verify_password("s3cret!", &hash).unwrap());
    }

    #[test]
    fn reset_sets_default_and_flag() {
        let update = reset_password_update().unwrap();
        assert_eq!(update.must_change_password, Some(true));
        assert!(verify_password(DEFAULT_PASSWORD, &update.password_hash.unwrap()).unwrap());
        assert!(update.active.is_none());
    }
}
