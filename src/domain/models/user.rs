use std::fmt;

use serde::Deserialize;

use crate::domain::{
    error::ValidationErrors,
    validation::{validate_email, validate_password, validate_username},
};

/// Form fields of the registration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Email,
    Password,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier generated by the storage engine on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i64);
impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Submitted fields bound as-is. A field missing from the request stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserDraft {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserDraft {
    #[cfg(test)]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    /// Runs every field rule once and collects all violations.
    pub fn validate(&self) -> Result<NewUser, ValidationErrors> {
        let mut violations = validate_username(self.username.as_deref());
        violations.extend(validate_email(self.email.as_deref()));
        violations.extend(validate_password(self.password.as_deref()));

        if !violations.is_empty() {
            return Err(ValidationErrors::new(violations));
        }

        Ok(NewUser {
            username: self.username.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
        })
    }
}

/// A validated user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: String,
    email: String,
    password: String,
}

impl NewUser {
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The password stays in storage; the persisted value only carries what is shown back.
    pub fn into_persisted(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
}

impl User {
    // getterのみ提供
    pub fn id(&self) -> UserId {
        self.id
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn email(&self) -> &str {
        &self.email
    }
}
