use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, instrument, warn};

use crate::{
    domain::{models::user::UserDraft, repositories::user_repository::UserRepository},
    presentation::{
        error::AppError,
        views::{RegisterPage, ResultPage},
    },
    usecase::register_user_usecase::RegisterUserUsecase,
};

/* Router Function and Handler Function */

/// function return Router object
/// `GET /` shows the form, `POST /register` submits it
pub fn create_user_router<R: UserRepository + Send + Sync + 'static + Clone>(
    register_service: RegisterUserUsecase<R>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/", get(show_form))
        .route("/register", post(register::<R>))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<R: UserRepository> {
    pub register_service: Arc<RegisterUserUsecase<R>>,
}

// handler function

/// handler function for the empty registration form
async fn show_form() -> Result<Html<String>, AppError> {
    Ok(Html(RegisterPage::empty().render()?))
}

/// handler function for register
///
/// Rejected submissions re-render the form with status 200. A body that cannot
/// be read as the form re-renders it with the rejection's status. Only storage
/// and rendering failures become a server error.
#[instrument(skip_all)]
async fn register<R: UserRepository + Send + Sync>(
    State(state): State<AppState<R>>,
    form: Result<Form<UserDraft>, FormRejection>,
) -> Result<Response, AppError> {
    let draft = match form {
        Ok(Form(draft)) => draft,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable registration form");
            let page = RegisterPage::unreadable().render()?;
            return Ok((rejection.status(), Html(page)).into_response());
        }
    };

    let new_user = match draft.validate() {
        Ok(new_user) => new_user,
        Err(errors) => {
            let fields = errors
                .fields()
                .iter()
                .map(|field| field.as_str())
                .collect::<Vec<_>>()
                .join(",");
            warn!(%fields, violations = errors.violations().len(), "registration rejected");
            let page = RegisterPage::rejected(&draft, &errors).render()?;
            return Ok(Html(page).into_response());
        }
    };

    let user = state.register_service.save_user(new_user).await?;
    info!(user_id = %user.id(), username = user.username(), "user registered");

    Ok(Html(ResultPage::from(&user).render()?).into_response())
}
