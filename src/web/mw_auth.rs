// src/web/mw_auth.rs
use crate::{error::AppError, models::user::CurrentUser};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Chave da sessão onde fica o `CurrentUser` serializado.
pub const SESSION_USER_KEY: &str = "current_user";

/// Caminhos acessíveis sem sessão.
pub const PUBLIC_PATHS: &[&str] = &["/login", "/logout"];

// Middleware que corre antes de todas as rotas (incluindo as inexistentes)
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_owned();
    if PUBLIC_PATHS.contains(&path.as_str()) {
        return Ok(next.run(request).await);
    }

    match session.get::<CurrentUser>(SESSION_USER_KEY).await {
        Ok(Some(user)) => {
            tracing::debug!("Autenticação MW: '{}' autenticado em {}", user.username, path);
            // Os handlers recebem o utilizador via Extension<CurrentUser>
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Autenticação MW: sem sessão em {}. Redirecionando para /login", path);
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => {
            tracing::error!("Autenticação MW: Erro ao ler sessão: {:?}", e);
            Err(AppError::SessionError(format!("Erro ao verificar sessão: {}", e)))
        }
    }
}
