// src/web/registration_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{teacher::TeacherForm, user::CurrentUser},
    services::teacher_service,
    state::AppState,
    templates::{render, RegisterPage},
};
use axum::{
    extract::{Extension, Form, State},
    response::IntoResponse,
};

const REGISTERED: &str = "Docente registrado correctamente.";
const USERNAME_TAKEN: &str = "El usuario ya existe. Elegí otro nombre de usuario.";

// GET /registrar
pub async fn show_register_form() -> AppResult<impl IntoResponse> {
    render(&RegisterPage { message: None })
}

// POST /registrar
pub async fn handle_register(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<TeacherForm>,
) -> AppResult<impl IntoResponse> {
    tracing::info!("POST /registrar por {}: novo docente {}", user.username, form.username);

    let message = match teacher_service::register_teacher(state.repo.as_ref(), &form, state.bcrypt_cost).await {
        Ok(user_id) => {
            tracing::info!("Docente {} registado com id {}", form.username, user_id);
            REGISTERED
        }
        Err(AppError::UsernameTaken(username)) => {
            tracing::warn!("Registo falhou: username '{}' já existe.", username);
            USERNAME_TAKEN
        }
        Err(e) => return Err(e),
    };

    render(&RegisterPage {
        message: Some(message.to_string()),
    })
}
