use askama::Template;

use crate::domain::{
    error::ValidationErrors,
    models::user::{Field, User, UserDraft},
};

pub const UNREADABLE_FORM_MESSAGE: &str =
    "The submitted form could not be read. Please fill it in again.";

/// Registration form. Re-rendered with the submitted values and messages after a rejected submission.
#[derive(Template, Debug, Default)]
#[template(path = "user_register.html")]
pub struct RegisterPage {
    pub form_error: Option<String>,
    pub username: String,
    pub email: String,
    pub password: String,
    pub username_errors: Vec<String>,
    pub email_errors: Vec<String>,
    pub password_errors: Vec<String>,
}

impl RegisterPage {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Empty form with a form-level message, for bodies that could not be read at all.
    pub fn unreadable() -> Self {
        Self {
            form_error: Some(UNREADABLE_FORM_MESSAGE.to_string()),
            ..Self::default()
        }
    }

    pub fn rejected(draft: &UserDraft, errors: &ValidationErrors) -> Self {
        let messages = |field: Field| -> Vec<String> {
            errors.for_field(field).map(ToString::to_string).collect()
        };

        Self {
            form_error: None,
            username: draft.username.clone().unwrap_or_default(),
            email: draft.email.clone().unwrap_or_default(),
            password: draft.password.clone().unwrap_or_default(),
            username_errors: messages(Field::Username),
            email_errors: messages(Field::Email),
            password_errors: messages(Field::Password),
        }
    }
}

/// Confirmation shown once the user is stored.
#[derive(Template, Debug)]
#[template(path = "result.html")]
pub struct ResultPage {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for ResultPage {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            username: user.username().to_string(),
            email: user.email().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::UserId;

    #[test]
    fn empty_form_has_no_messages() {
        let html = RegisterPage::empty().render().unwrap();

        assert!(html.contains(r#"name="username" value="""#));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn rejected_form_keeps_values_and_lists_messages_per_field() {
        let draft = UserDraft::new("usr", "a@b.com", "abc");
        let errors = draft.validate().unwrap_err();

        let page = RegisterPage::rejected(&draft, &errors);

        assert_eq!(page.username, "usr");
        assert_eq!(page.email, "a@b.com");
        assert_eq!(page.password, "abc");
        assert_eq!(
            page.username_errors,
            vec!["Username must be between 6 and 12 characters"]
        );
        assert!(page.email_errors.is_empty());
        assert_eq!(page.password_errors.len(), 3);

        let html = page.render().unwrap();
        assert!(html.contains(r#"value="usr""#));
        assert!(html.contains("Password should contain at least 1 Number"));
    }

    #[test]
    fn unreadable_form_shows_form_level_message_only() {
        let html = RegisterPage::unreadable().render().unwrap();

        assert!(html.contains(UNREADABLE_FORM_MESSAGE));
        assert!(html.contains(r#"name="username" value="""#));
        assert!(!html.contains("data-field="));
    }

    #[test]
    fn escapes_submitted_values() {
        let draft = UserDraft::new("<script>", "x", "y");
        let errors = draft.validate().unwrap_err();

        let html = RegisterPage::rejected(&draft, &errors).render().unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn result_page_shows_generated_id() {
        let user = UserDraft::new("validUser", "a@b.com", "Abcdef1")
            .validate()
            .unwrap()
            .into_persisted(UserId::new(7));

        let html = ResultPage::from(&user).render().unwrap();

        assert!(html.contains(r#"<dd id="user-id">7</dd>"#));
        assert!(html.contains("validUser"));
        assert!(!html.contains("Abcdef1"));
    }
}
