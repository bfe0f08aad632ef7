use std::sync::Arc;

use engine::{
    Engine,
    store::{MemoryStore, RecordStore, SqlStore},
};
use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spendwise={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let url = settings
        .database
        .url
        .as_deref()
        .filter(|url| !url.trim().is_empty());
    let store = select_store(url).await;
    let engine = Engine::builder().store(store).build()?;

    if settings.app.seed_demo_user {
        match engine.ensure_demo_user().await {
            Ok(user) => tracing::info!(user_id = %user.id, "demo user ready"),
            Err(err) => tracing::warn!("failed to create demo user: {err}"),
        }
    }

    server::run(
        engine,
        &settings.server.address(),
        &settings.server.allowed_origins,
    )
    .await?;

    Ok(())
}

/// Pick the backend for the whole process lifetime.
///
/// A configured database that cannot be reached or migrated falls back to
/// the in-memory store.
async fn select_store(url: Option<&str>) -> Arc<dyn RecordStore> {
    let Some(url) = url else {
        tracing::info!("no database configured, using in-memory storage");
        return Arc::new(MemoryStore::default());
    };

    match connect(url).await {
        Ok(database) => {
            tracing::info!("using persistent storage");
            Arc::new(SqlStore::new(database))
        }
        Err(err) => {
            tracing::warn!("database unavailable, falling back to in-memory storage: {err}");
            Arc::new(MemoryStore::default())
        }
    }
}

async fn connect(url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
