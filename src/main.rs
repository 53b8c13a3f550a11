mod config;
mod domain;
mod entity;
mod infrastructure;
mod logging;
mod presentation;
mod usecase;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::{
    config::AppConfig,
    domain::repositories::user_repository::UserRepository,
    infrastructure::{schema::ensure_schema, user_repository::SqlUserRepository},
    presentation::handlers::user_handler::create_user_router,
    usecase::register_user_usecase::RegisterUserUsecase,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    logging::init_logging(config.log_format);

    let mut opt = ConnectOptions::new(config.database.url.clone());
    opt.max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .sqlx_logging(config.database.sql_logging);

    let db = Database::connect(opt).await?;
    ensure_schema(&db).await?;

    let user_repository = SqlUserRepository::new(db.clone());
    let register_user_usecase = RegisterUserUsecase::new(user_repository);
    let app = build_app(register_user_usecase);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    tracing::info!("shut down");
    Ok(())
}

fn build_app<R: UserRepository + Send + Sync + 'static + Clone>(
    register_user_usecase: RegisterUserUsecase<R>,
) -> Router {
    create_user_router(register_user_usecase).layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
            })
            .on_response(|res: &Response<_>, latency: Duration, span: &Span| {
                let status = res.status();
                span.record("status", tracing::field::display(status));
                if status.is_server_error() {
                    tracing::error!(%status, ?latency, "response");
                } else {
                    tracing::info!(%status, ?latency, "response");
                }
            }),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
