// src/web/admin_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::teacher::TeacherForm,
    services::teacher_service,
    state::AppState,
    templates::{render, AdminEditTeacherPage, AdminTeachersPage},
};
use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct FeedbackParams {
    success: Option<String>,
    error: Option<String>,
}

fn redirect_with(kind: &str, message: &str) -> Redirect {
    let redirect_url = format!("/admin?{}={}", kind, urlencoding::encode(message));
    Redirect::to(&redirect_url)
}

// --- Handlers ---

/// GET /admin - lista de docentes com username e email
pub async fn show_admin_panel(
    State(state): State<AppState>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!("GET /admin: Carregando lista de docentes...");
    let teachers = state.repo.list_teachers().await?;

    render(&AdminTeachersPage {
        teachers,
        success_message: params.success,
        error_message: params.error,
    })
}

/// GET /editar/{id}
pub async fn show_edit_teacher_form(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!("GET /editar/{}: Mostrando formulário", teacher_id);

    let teacher = state.repo.find_teacher(teacher_id).await?.ok_or_else(|| {
        tracing::warn!("Tentativa de editar docente inexistente: {}", teacher_id);
        AppError::NotFound
    })?;

    render(&AdminEditTeacherPage {
        teacher: &teacher,
        error_message: None,
    })
}

/// POST /editar/{id}
pub async fn handle_edit_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
    Form(form): Form<TeacherForm>,
) -> AppResult<Response> {
    tracing::info!("POST /editar/{}: Atualizando docente {}", teacher_id, form.username);

    match teacher_service::update_teacher(state.repo.as_ref(), teacher_id, &form, state.bcrypt_cost).await {
        Ok(true) => {
            let message = format!("Docente '{}' actualizado.", form.username);
            Ok(redirect_with("success", &message).into_response())
        }
        Ok(false) => Err(AppError::NotFound),
        Err(AppError::UsernameTaken(username)) => {
            tracing::warn!("Edição de {} falhou: username '{}' já existe.", teacher_id, username);
            // Nada foi alterado; mostra os dados atuais com o erro
            let teacher = state
                .repo
                .find_teacher(teacher_id)
                .await?
                .ok_or(AppError::NotFound)?;
            let page = AdminEditTeacherPage {
                teacher: &teacher,
                error_message: Some(format!("El usuario '{}' ya existe.", username)),
            };
            Ok(render(&page)?.into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /eliminar/{id} - apaga o utilizador dono; perfil e registos saem por cascata
pub async fn handle_delete_teacher(
    State(state): State<AppState>,
    Path(teacher_id): Path<i64>,
) -> AppResult<Redirect> {
    if state.repo.delete_teacher(teacher_id).await? {
        tracing::info!("🗑️ Docente {} eliminado.", teacher_id);
        Ok(redirect_with("success", "Docente eliminado."))
    } else {
        tracing::warn!("Eliminar: docente {} não existe.", teacher_id);
        Ok(Redirect::to("/admin"))
    }
}
