// src/web/user_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::CurrentUser,
    state::AppState,
    templates::{render, HomePage, ProfilePage},
};
use axum::{
    extract::{Extension, State},
    response::IntoResponse,
};

// GET /
pub async fn home_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!("GET /: Acesso para {}", user.username);

    // O admin não tem perfil de docente: nome e apelido ficam vazios
    let (first_name, last_name) = match state.repo.find_profile_by_user(user.id).await? {
        Some(profile) => (profile.first_name, profile.last_name),
        None => (String::new(), String::new()),
    };

    render(&HomePage {
        username: user.username,
        first_name,
        last_name,
        is_admin: user.role.is_admin(),
    })
}

// GET /perfil
pub async fn profile_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let profile = state
        .repo
        .find_profile_by_user(user.id)
        .await?
        .ok_or_else(|| {
            tracing::debug!("GET /perfil: '{}' não tem perfil de docente", user.username);
            AppError::NotFound
        })?;

    render(&ProfilePage { profile: &profile })
}
