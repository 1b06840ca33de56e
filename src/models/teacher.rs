// src/models/teacher.rs
use serde::Deserialize;
use sqlx::FromRow;

/// Linha da tabela 'teachers' (perfil 1:1 com um utilizador).
#[derive(Debug, Clone, FromRow)]
pub struct TeacherProfile {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub area: Option<String>,
}

/// Perfil junto com o username e email do utilizador dono (painel de admin).
#[derive(Debug, Clone, FromRow)]
pub struct TeacherSummary {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub area: Option<String>,
}

impl TeacherSummary {
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn area_or_empty(&self) -> &str {
        self.area.as_deref().unwrap_or("")
    }
}

/// Registo de um docente: utilizador (papel teacher) + perfil.
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub area: Option<String>,
}

/// Perfil de um docente ainda por inserir (o utilizador dono é criado na mesma transação).
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub first_name: String,
    pub last_name: String,
    pub area: Option<String>,
}

/// Alterações feitas pelo admin. `password_hash = None` mantém a password atual.
#[derive(Debug, Clone)]
pub struct TeacherUpdate {
    pub username: String,
    pub password_hash: Option<String>,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub area: Option<String>,
}

// Formulário partilhado por /registrar e /editar/{id}
#[derive(Debug, Deserialize)]
pub struct TeacherForm {
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "clave")]
    pub password: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(default)]
    pub area: String,
}

/// Campos opcionais vazios ficam como NULL na DB; o resto é guardado tal como veio.
pub fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
