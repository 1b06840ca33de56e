// src/web/record_handlers.rs
use crate::{
    error::AppResult,
    models::{
        record::{AttendanceForm, GradeForm},
        user::CurrentUser,
    },
    services::export_service,
    state::AppState,
    templates::{render, AttendancePage, GradesPage},
};
use axum::{
    extract::{Extension, Form, State},
    response::{IntoResponse, Response},
};

// GET /asistencia
pub async fn attendance_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let entries = state.repo.list_attendance(user.id).await?;
    tracing::debug!("GET /asistencia: {} registos de {}", entries.len(), user.username);
    render(&AttendancePage { entries: &entries })
}

// POST /asistencia
pub async fn handle_attendance(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<AttendanceForm>,
) -> AppResult<impl IntoResponse> {
    let entry = state
        .repo
        .add_attendance(user.id, &form.student, &form.present)
        .await?;
    tracing::info!(
        "Asistência registada por {}: #{} {} = {}",
        user.username,
        entry.id,
        entry.student,
        entry.present
    );

    let entries = state.repo.list_attendance(user.id).await?;
    render(&AttendancePage { entries: &entries })
}

// GET /notas
pub async fn grades_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let entries = state.repo.list_grades(user.id).await?;
    tracing::debug!("GET /notas: {} registos de {}", entries.len(), user.username);
    render(&GradesPage { entries: &entries })
}

// POST /notas
pub async fn handle_grade(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<GradeForm>,
) -> AppResult<impl IntoResponse> {
    let entry = state
        .repo
        .add_grade(user.id, &form.student, &form.grade)
        .await?;
    tracing::info!(
        "Nota registada por {}: #{} {} = {}",
        user.username,
        entry.id,
        entry.student,
        entry.grade
    );

    let entries = state.repo.list_grades(user.id).await?;
    render(&GradesPage { entries: &entries })
}

// GET /exportar_asistencia
pub async fn export_attendance(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Response> {
    let entries = state.repo.list_attendance(user.id).await?;
    tracing::info!("Exportando {} registos de asistência de {}", entries.len(), user.username);
    Ok(export_service::csv_response(&entries))
}

// GET /exportar_notas
pub async fn export_grades(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Response> {
    let entries = state.repo.list_grades(user.id).await?;
    tracing::info!("Exportando {} notas de {}", entries.len(), user.username);
    Ok(export_service::csv_response(&entries))
}
