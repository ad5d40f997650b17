//! # Power Routine Binary
//!
//! Loads the settings, assembles the hub and identity provider, and serves
//! the feed, groups and fitness routes.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use pr_api::middleware::{cors_policy, security_headers, standard_middleware};
use pr_api::{configure_routes, AppState};
use pr_auth_simple::SimpleIdentityProvider;
use pr_config::Settings;
use pr_core::SocialHub;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Before the logger so RUST_LOG from .env applies, and before the settings
    let dotenv = dotenvy::dotenv();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    if let Ok(path) = dotenv {
        log::debug!("loaded environment from {}", path.display());
    }

    let settings = Settings::load().context("failed to load settings")?;
    let bind = settings.bind_address();

    // 1. Identity: display names come from the client, guests get a salted handle
    let identity = SimpleIdentityProvider::new(
        settings.identity.session_salt,
        settings.identity.max_name_len,
    );

    // 2. One in-memory hub for the whole process
    let state = web::Data::new(AppState::new(
        SocialHub::new(),
        Box::new(identity),
        settings.uploads.max_image_bytes,
    ));

    log::info!("Power Routine starting on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(security_headers())
            .wrap(cors_policy())
            .wrap(standard_middleware())
            .configure(configure_routes)
    })
    .bind(bind.clone())
    .with_context(|| format!("failed to bind {}:{}", bind.0, bind.1))?
    .run()
    .await
    .context("server terminated with an error")
}
