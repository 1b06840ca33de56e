// src/templates.rs
use crate::{
    error::AppResult,
    models::{
        record::{AttendanceEntry, GradeEntry},
        teacher::{TeacherProfile, TeacherSummary},
    },
};
use askama::Template; // Trait necessário para Askama
use axum::response::Html;

/// Renderiza um template, logando a falha antes de a propagar.
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Falha ao renderizar template: {}", e);
            Err(e.into())
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage<'a> {
    pub profile: &'a TeacherProfile,
}

impl ProfilePage<'_> {
    pub fn area(&self) -> &str {
        self.profile.area.as_deref().unwrap_or("")
    }
}

#[derive(Template)]
#[template(path = "attendance.html")]
pub struct AttendancePage<'a> {
    pub entries: &'a [AttendanceEntry],
}

#[derive(Template)]
#[template(path = "grades.html")]
pub struct GradesPage<'a> {
    pub entries: &'a [GradeEntry],
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub message: Option<String>,
}

#[derive(Template)]
#[template(path = "admin_teachers.html")]
pub struct AdminTeachersPage {
    pub teachers: Vec<TeacherSummary>,
    // Mensagens de feedback opcionais (via query string)
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Template)]
#[template(path = "admin_edit_teacher.html")]
pub struct AdminEditTeacherPage<'a> {
    pub teacher: &'a TeacherSummary,
    pub error_message: Option<String>,
}
