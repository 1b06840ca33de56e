// src/config.rs
use crate::error::{AppError, AppResult};
use std::net::SocketAddr;
use tower_sessions::cookie::Key;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_FILTER: &str = "aula=debug,tower_http=info,sqlx=warn,tower_sessions=info";

/// Configuração lida do ambiente (e de `.env`, carregado em `main`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub session_secret: String,
    pub bind_addr: SocketAddr,
    pub bcrypt_cost: u32,
    pub seed_default_users: bool,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Constrói a configuração a partir de uma função de lookup (usada nos testes).
    pub fn from_lookup<F>(get: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL")
            .ok_or_else(|| AppError::Config("DATABASE_URL não definida".into()))?;
        let session_secret = get("SESSION_SECRET")
            .ok_or_else(|| AppError::Config("SESSION_SECRET não definida".into()))?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR inválido: {}", e)))?;

        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(raw) => {
                let cost = raw
                    .parse::<u32>()
                    .map_err(|e| AppError::Config(format!("BCRYPT_COST inválido: {}", e)))?;
                if !(4..=31).contains(&cost) {
                    return Err(AppError::Config(format!(
                        "BCRYPT_COST fora do intervalo 4..=31: {}",
                        cost
                    )));
                }
                cost
            }
            None => bcrypt::DEFAULT_COST,
        };

        let seed_default_users = match get("SEED_DEFAULT_USERS").as_deref() {
            None => true,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "SEED_DEFAULT_USERS inválido: {}",
                    other
                )))
            }
        };

        Ok(Self {
            database_url,
            session_secret,
            bind_addr,
            bcrypt_cost,
            seed_default_users,
        })
    }

    /// Chave para assinar o cookie de sessão. Exige pelo menos 64 bytes.
    pub fn session_key(&self) -> AppResult<Key> {
        Key::try_from(self.session_secret.as_bytes()).map_err(|_| {
            AppError::Config("SESSION_SECRET deve ter pelo menos 64 bytes".into())
        })
    }
}
