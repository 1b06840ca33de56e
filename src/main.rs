// src/main.rs
use aula::{
    config::{AppConfig, DEFAULT_LOG_FILTER},
    db::{self, Database, SchoolRepository},
    services::user_service,
    state::AppState,
    web,
};
use axum::serve;
use std::{env, sync::Arc};
use tokio::net::TcpListener;
use tower_sessions::{cookie::Key, ExpiredDeletion, SessionStore};
use tower_sessions_sqlx_store::{PostgresStore, SqliteStore};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                env::var("RUST_LOG")
                    .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
                    .into()
            }),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando servidor da escola...");

    let config = AppConfig::from_env()?;
    let key = config.session_key()?;

    // --- Base de Dados (backend escolhido pelo DATABASE_URL) ---
    let database = match db::connect(&config.database_url).await {
        Ok(database) => database,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
            return Err(anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e));
        }
    };

    // O session store vive no mesmo backend que os dados
    match database {
        Database::Sqlite(repo) => {
            let session_store = SqliteStore::new(repo.pool().clone())
                .with_table_name("sessions")
                .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;
            session_store.migrate().await?;
            run(config, Arc::new(repo), session_store, key).await
        }
        Database::Postgres(repo) => {
            let session_store = PostgresStore::new(repo.pool().clone())
                .with_table_name("sessions")
                .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;
            session_store.migrate().await?;
            run(config, Arc::new(repo), session_store, key).await
        }
    }
}

async fn run<S>(
    config: AppConfig,
    repo: Arc<dyn SchoolRepository>,
    session_store: S,
    key: Key,
) -> anyhow::Result<()>
where
    S: SessionStore + ExpiredDeletion + Clone,
{
    tracing::info!("💾 Backend de dados: {:?}", repo.backend());

    if config.seed_default_users {
        let created = user_service::seed_default_users(repo.as_ref(), config.bcrypt_cost).await?;
        if created > 0 {
            tracing::info!("🌱 {} utilizadores iniciais criados.", created);
        }
    }

    // Limpeza periódica das sessões expiradas
    let session_store_clone = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = session_store_clone
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Erro na task de limpeza de sessões: {:?}", e);
        }
    });
    tracing::info!("🧹 Tarefa de limpeza de sessões iniciada.");

    let app_state = AppState::new(repo, config.bcrypt_cost);
    let app = web::routes::build_app(app_state, session_store, key);

    tracing::info!("📡 Servidor escutando em http://{}", config.bind_addr);
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", config.bind_addr, e);
            return Err(e.into());
        }
    };

    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
