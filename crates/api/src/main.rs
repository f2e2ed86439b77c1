use std::sync::Arc;

use anyhow::Context;

use snippetbox_api::{app::build_app, context::AppContext};
use snippetbox_infra::{Config, InMemorySnippetStore, PostgresSnippetStore, SnippetStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    snippetbox_observability::init();

    let config = Config::from_env().context("failed to load configuration")?;

    let snippets: Arc<dyn SnippetStore> = match &config.database_url {
        Some(url) => {
            let store = PostgresSnippetStore::connect(url, config.db_max_connections)
                .await
                .context("failed to connect to Postgres")?;
            store
                .ensure_schema()
                .await
                .context("failed to create snippets schema")?;
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory snippet store");
            Arc::new(InMemorySnippetStore::new())
        }
    };

    let ctx = Arc::new(AppContext::new(snippets, config.static_dir.clone()));
    let app = build_app(ctx)?;

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    tracing::info!(addr = %listener.local_addr()?, "starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
