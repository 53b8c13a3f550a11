use thiserror::Error;

use crate::domain::models::user::Field;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// A single failed field rule. The display text is the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Username is required")]
    UsernameRequired,

    #[error("Username must be between 6 and 12 characters")]
    UsernameLength,

    #[error("Email is required")]
    EmailRequired,

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Password should contain at least 1 Uppercase character")]
    PasswordMissingUppercase,

    #[error("Password should contain at least 1 Lowercase character")]
    PasswordMissingLowercase,

    #[error("Password should contain at least 1 Number")]
    PasswordMissingDigit,
}

impl Violation {
    pub fn field(&self) -> Field {
        match self {
            Self::UsernameRequired | Self::UsernameLength => Field::Username,
            Self::EmailRequired | Self::InvalidEmail => Field::Email,
            Self::PasswordRequired
            | Self::PasswordTooShort
            | Self::PasswordMissingUppercase
            | Self::PasswordMissingLowercase
            | Self::PasswordMissingDigit => Field::Password,
        }
    }
}

/// Every violation found in one pass over a submitted record, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field rule(s) violated", .0.len())]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &Violation> {
        self.0.iter().filter(move |v| v.field() == field)
    }

    /// Names of the fields with at least one violation, without repeats.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = Vec::new();
        for violation in &self.0 {
            if !fields.contains(&violation.field()) {
                fields.push(violation.field());
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_messages_are_user_facing() {
        assert_eq!(
            Violation::UsernameLength.to_string(),
            "Username must be between 6 and 12 characters"
        );
        assert_eq!(Violation::InvalidEmail.to_string(), "Enter a valid email address");
        assert_eq!(
            Violation::PasswordMissingDigit.to_string(),
            "Password should contain at least 1 Number"
        );
    }

    #[test]
    fn groups_violations_by_field() {
        let errors = ValidationErrors::new(vec![
            Violation::UsernameLength,
            Violation::PasswordTooShort,
            Violation::PasswordMissingDigit,
        ]);

        assert_eq!(errors.fields(), vec![Field::Username, Field::Password]);
        assert_eq!(errors.for_field(Field::Password).count(), 2);
        assert_eq!(errors.for_field(Field::Email).count(), 0);
        assert_eq!(errors.to_string(), "3 field rule(s) violated");
    }
}
