// src/models/record.rs
use serde::Deserialize;
use sqlx::FromRow;

/// Uma linha da tabela 'attendance'.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AttendanceEntry {
    pub id: i64,
    pub student: String,
    pub present: String, // texto livre ("si"/"no")
    pub user_id: i64,
}

/// Uma linha da tabela 'grades'.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct GradeEntry {
    pub id: i64,
    pub student: String,
    pub grade: String,
    pub user_id: i64,
}

fn default_presence() -> String {
    "no".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AttendanceForm {
    #[serde(rename = "nombre")]
    pub student: String,
    #[serde(rename = "presente", default = "default_presence")]
    pub present: String,
}

#[derive(Debug, Deserialize)]
pub struct GradeForm {
    #[serde(rename = "alumno")]
    pub student: String,
    #[serde(rename = "nota")]
    pub grade: String,
}
