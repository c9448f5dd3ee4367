use std::sync::Arc;

use anyhow::Result;
use teloxide::{dispatching::UpdateHandler, prelude::*};

pub mod ai;
pub mod commands;
pub mod config;
pub mod db;
pub mod handlers;
pub mod location;
pub mod messages;
pub mod orchestrator;
pub mod session;
pub mod text_utils;
pub mod utils;

pub use ai::prompts::MessageIntent;
pub use commands::Command;
pub use config::Config;
pub use location::{Coordinates, LocationDescriptor, LocationProvider};
pub use orchestrator::{
    GenerationRequest, GenerativeBackend, LazyBackend, Orchestrator, ResultState,
};
pub use session::Sessions;

// ──────────────────────────────────────────────────────────────
// Update routing
// ──────────────────────────────────────────────────────────────

/// Routes updates to handlers. Needs `Database` and `Sessions` as dependencies.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter(|msg: Message| msg.location().is_some())
                .endpoint(handlers::save_shared_location),
        )
        .branch(
            dptree::entry()
                .filter(|msg: Message| msg.photo().is_some())
                .endpoint(handlers::explain_photo),
        )
        .branch(dptree::entry().filter_command::<Command>().endpoint(
            |bot: Bot, msg: Message, cmd: Command, db: db::Database, sessions: Sessions| async move {
                cmd.dispatch(bot, msg, db, sessions).await
            },
        ))
        .branch(dptree::endpoint(handlers::ask_from_text))
}

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

pub async fn run() -> Result<()> {
    // Load .env file if it exists (for local development)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting travel guide bot...");

    let config = Config::from_env();
    let bot = Bot::from_env();

    let db_url = db::prepare_sqlite_url(&config.db_url);
    tracing::info!("Connecting to database at: {}", &db_url);
    let db = db::connect_db(&db_url, 5).await?;
    db.migrate().await?;
    tracing::info!("Database connection successful.");

    let backend = Arc::new(ai::gemini_backend(config.ai.as_ref()));
    if let Err(err) = backend.initialize().await {
        tracing::warn!(error = %err, "Backend not initialized; retrying on the next request");
    }
    let sessions = Sessions::new(db.clone(), backend);

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![db, sessions])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
