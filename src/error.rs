// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro ao renderizar template: {0}")]
    TemplateError(#[from] askama::Error),

    // Violação da constraint UNIQUE de users.username
    #[error("O utilizador '{0}' já existe")]
    UsernameTaken(String),

    #[error("Acesso restringido")]
    Forbidden,

    #[error("Docente não encontrado")]
    NotFound,

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl AppError {
    /// Converte um erro do sqlx em `UsernameTaken` quando é uma violação de UNIQUE.
    pub fn from_insert(err: sqlx::Error, username: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::UsernameTaken(username.to_string())
            }
            _ => AppError::SqlxError(err),
        }
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 403 e 404 são respostas de texto simples, sem página de erro
        match self {
            AppError::Forbidden => {
                return (StatusCode::FORBIDDEN, "Acceso restringido").into_response();
            }
            AppError::NotFound => {
                return (StatusCode::NOT_FOUND, "Docente no encontrado").into_response();
            }
            _ => {}
        }

        // Loga o erro detalhado no servidor
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error al acceder a los datos.")
            }
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error de configuración."),
            AppError::PasswordHashingError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error al procesar las credenciales.")
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error en la gestión de su sesión.")
            }
            AppError::UsernameTaken(_) => (StatusCode::CONFLICT, "El usuario ya existe."),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Ocurrió un error inesperado."),
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Error</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Error {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Volver</a></body></html>
         "#, status_code=status.as_u16(), message=user_message))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
