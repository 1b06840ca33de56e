// src/services/auth_service.rs
use crate::{
    db::SchoolRepository,
    error::{AppError, AppResult},
    models::user::CurrentUser,
};

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verificando hash bcrypt...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Gerando hash bcrypt (custo {})...", cost);
        bcrypt::hash(&password, cost)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Valida username + senha. `None` para utilizador inexistente ou senha errada.
pub async fn authenticate(
    repo: &dyn SchoolRepository,
    username: &str,
    password: &str,
) -> AppResult<Option<CurrentUser>> {
    let Some(user) = repo.find_user_by_username(username).await? else {
        tracing::warn!("Utilizador não encontrado: {}", username);
        return Ok(None);
    };

    if verify_password(password, &user.password_hash).await? {
        Ok(Some(CurrentUser::from(&user)))
    } else {
        tracing::warn!("Senha incorreta para: {}", username);
        Ok(None)
    }
}
