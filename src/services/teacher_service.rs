// src/services/teacher_service.rs
use crate::{
    db::SchoolRepository,
    error::AppResult,
    models::teacher::{non_empty, NewTeacher, TeacherForm, TeacherUpdate},
    services::auth_service,
};

/// Regista um docente a partir do formulário de /registrar. Devolve o id do utilizador.
pub async fn register_teacher(
    repo: &dyn SchoolRepository,
    form: &TeacherForm,
    bcrypt_cost: u32,
) -> AppResult<i64> {
    tracing::info!("Tentando registar docente: {}", form.username);
    let password_hash = auth_service::hash_password(&form.password, bcrypt_cost).await?;

    repo.create_teacher(&NewTeacher {
        username: form.username.clone(),
        password_hash,
        email: non_empty(&form.email),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        area: non_empty(&form.area),
    })
    .await
}

/// Aplica o formulário de /editar/{id}. Senha vazia mantém a atual.
pub async fn update_teacher(
    repo: &dyn SchoolRepository,
    teacher_id: i64,
    form: &TeacherForm,
    bcrypt_cost: u32,
) -> AppResult<bool> {
    tracing::info!("Atualizando docente {} ({})", teacher_id, form.username);

    let password_hash = if form.password.is_empty() {
        None
    } else {
        Some(auth_service::hash_password(&form.password, bcrypt_cost).await?)
    };

    repo.update_teacher(
        teacher_id,
        &TeacherUpdate {
            username: form.username.clone(),
            password_hash,
            email: non_empty(&form.email),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            area: non_empty(&form.area),
        },
    )
    .await
}
