mod application;
mod domain;
mod error;
mod infrastructure;
mod routing;
mod settings;

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::application::ports::{CourseRepository, EnrollmentRepository, SessionRepository};
use crate::infrastructure::driven::{
    InMemoryCatalog, PostgresCourseRepository, PostgresEnrollmentRepository, PostgresSessionRepository,
};
use crate::infrastructure::driving::http::api_routes;
use crate::infrastructure::{driving::create_router, AppState};
use crate::settings::Settings;

struct Repositories {
    sessions: Arc<dyn SessionRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    courses: Arc<dyn CourseRepository>,
}

async fn repositories(settings: &Settings) -> anyhow::Result<Repositories> {
    let Some(database_url) = &settings.database_url else {
        tracing::warn!("no database_url configured, using empty in-memory repositories");
        let catalog = Arc::new(InMemoryCatalog::new());
        return Ok(Repositories {
            sessions: catalog.clone(),
            enrollments: catalog.clone(),
            courses: catalog,
        });
    };

    let pool = PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("connected to database");

    Ok(Repositories {
        sessions: Arc::new(PostgresSessionRepository::new(pool.clone())),
        enrollments: Arc::new(PostgresEnrollmentRepository::new(pool.clone())),
        courses: Arc::new(PostgresCourseRepository::new(pool)),
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;

    let routes = api_routes().and_then(|routes| routes.verify().map(|()| routes));
    let routes = match routes {
        Ok(routes) => routes,
        Err(e) => {
            tracing::error!(error = %e, "route table failed its self-check");
            return Err(e.into());
        }
    };

    let repos = repositories(&settings).await?;
    let state = AppState {
        jwt_secret: settings.jwt_secret.clone(),
        entry_points: settings.entry_points(),
        routes: Arc::new(routes),
        session_repo: repos.sessions,
        enrollment_repo: repos.enrollments,
        course_repo: repos.courses,
    };

    let app = create_router(state, &settings.cors_origins);

    let addr = settings.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "live-training server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
