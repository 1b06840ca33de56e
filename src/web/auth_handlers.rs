// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{CurrentUser, LoginForm},
    services::auth_service,
    state::AppState,
    templates::{render, LoginPage},
    web::mw_auth::SESSION_USER_KEY,
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

const LOGIN_ERROR: &str = "Credenciales incorrectas";

// GET /login
pub async fn show_login_form(session: Session) -> AppResult<Response> {
    // Já logado? Vai direto para a página inicial
    if session
        .get::<CurrentUser>(SESSION_USER_KEY)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        tracing::debug!("GET /login: Utilizador já logado, redirecionando para /");
        return Ok(Redirect::to("/").into_response());
    }

    Ok(render(&LoginPage { error: None })?.into_response())
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Tentativa de login para: {}", form.username);

    match auth_service::authenticate(state.repo.as_ref(), &form.username, &form.password).await? {
        Some(user) => {
            // Novo ID de sessão a cada login
            session
                .cycle_id()
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
            session
                .insert(SESSION_USER_KEY, &user)
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;

            tracing::info!("✅ Login bem-sucedido para: {} ({})", user.username, user.role);
            Ok(Redirect::to("/").into_response())
        }
        None => {
            // Mensagem genérica: não distingue utilizador inexistente de senha errada
            let page = LoginPage {
                error: Some(LOGIN_ERROR.to_string()),
            };
            Ok(render(&page)?.into_response())
        }
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user: Option<CurrentUser> = session.get(SESSION_USER_KEY).await.ok().flatten();

    // Limpa os dados, apaga do store e faz o layer remover o cookie
    session
        .flush()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    match user {
        Some(user) => tracing::info!("🚪 Utilizador '{}' desligado.", user.username),
        None => tracing::info!("🚪 Sessão anónima desligada."),
    }

    Ok(Redirect::to("/login"))
}
