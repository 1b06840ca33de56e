// src/services/export_service.rs
use crate::models::record::{AttendanceEntry, GradeEntry};
use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::stream;
use std::borrow::Cow;
use std::convert::Infallible;

/// Um registo exportável como linha CSV.
pub trait CsvRow {
    const HEADER: &'static str;
    const FILENAME: &'static str;

    fn fields(&self) -> Vec<Cow<'_, str>>;
}

impl CsvRow for AttendanceEntry {
    const HEADER: &'static str = "id,nombre,presente";
    const FILENAME: &'static str = "asistencia.csv";

    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Owned(self.id.to_string()),
            Cow::Borrowed(&self.student),
            Cow::Borrowed(&self.present),
        ]
    }
}

impl CsvRow for GradeEntry {
    const HEADER: &'static str = "id,alumno,nota";
    const FILENAME: &'static str = "notas.csv";

    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Owned(self.id.to_string()),
            Cow::Borrowed(&self.student),
            Cow::Borrowed(&self.grade),
        ]
    }
}

/// Aspas só quando o campo tem vírgula, aspas ou quebra de linha (RFC 4180).
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub fn csv_line<T: CsvRow>(row: &T) -> String {
    let mut line = row
        .fields()
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Cabeçalho seguido de uma linha por registo, na ordem recebida.
pub fn csv_lines<T: CsvRow>(rows: &[T]) -> Vec<String> {
    std::iter::once(format!("{}\n", T::HEADER))
        .chain(rows.iter().map(csv_line::<T>))
        .collect()
}

/// Resposta `text/csv` em streaming, como anexo com nome fixo.
pub fn csv_response<T: CsvRow>(rows: &[T]) -> Response {
    let lines = csv_lines(rows);
    let body = Body::from_stream(stream::iter(lines.into_iter().map(Ok::<_, Infallible>)));

    let disposition = format!("attachment;filename={}", T::FILENAME);
    let mut response = (StatusCode::OK, body).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8"));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}
