use anyhow::Context;
use axum::Router;
use storage::Database;
use storage::services::scoring::ScoringConfig;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod auth;
mod config;
mod error;
mod features;
mod state;

use auth::ApiKeys;
use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::projects::handlers::list_projects,
        features::projects::handlers::get_project,
        features::projects::handlers::create_project,
        features::projects::handlers::update_project,
        features::projects::handlers::delete_project,
        features::votes::handlers::cast_vote,
        features::votes::handlers::list_user_votes,
        features::badges::handlers::award_badge,
        features::badges::handlers::update_badge,
        features::badges::handlers::revoke_badge,
        features::badges::handlers::list_project_badges,
        features::users::handlers::get_user,
        features::users::handlers::update_verification,
    ),
    components(
        schemas(
            storage::dto::project::CreateProjectRequest,
            storage::dto::project::UpdateProjectRequest,
            storage::dto::project::ProjectResponse,
            storage::dto::project::FeedSort,
            storage::dto::vote::CastVoteRequest,
            storage::dto::vote::VoteOutcome,
            storage::dto::vote::VoteResponse,
            storage::dto::badge::AwardBadgeRequest,
            storage::dto::badge::UpdateBadgeRequest,
            storage::dto::user::UpdateVerificationRequest,
            storage::dto::user::UserResponse,
            storage::dto::common::PaginationMeta,
            storage::models::Project,
            storage::models::Badge,
            storage::models::BadgeTier,
            storage::models::Vote,
            storage::models::VoteType,
            features::badges::handlers::BadgeResponse,
            features::users::handlers::VerificationResponse,
        )
    ),
    tags(
        (name = "projects", description = "Project feed and publishing endpoints"),
        (name = "votes", description = "Voting endpoints"),
        (name = "badges", description = "Validator badge endpoints"),
        (name = "users", description = "Creator verification endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Proofboard API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    let state = AppState::new(db, ScoringConfig::default(), api_keys);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/projects", features::projects::routes::routes())
        .nest("/api/votes", features::votes::routes::routes())
        .nest("/api/badges", features::badges::routes::routes())
        .nest("/api/users", features::users::routes::routes())
        .layer(cors)
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, app).await?;

    Ok(())
}
