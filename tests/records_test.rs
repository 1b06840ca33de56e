// tests/records_test.rs
mod common;

use aula::db::SchoolRepository;
use axum::http::{header, StatusCode};
use common::{body_string, spawn_app};

#[tokio::test]
async fn attendance_is_recorded_for_the_session_user_only() {
    let app = spawn_app().await;
    let juan_cookie = app.login("juan", "clave123").await;
    let maria_cookie = app.login("maria", "clave456").await;

    let response = app
        .post_form("/asistencia", "nombre=Ana&presente=si", Some(&juan_cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Ana"));

    let juan = app.user_id("juan").await;
    let entries = app.repo.list_attendance(juan).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].student, "Ana");
    assert_eq!(entries[0].present, "si");
    assert_eq!(entries[0].user_id, juan);

    let body = body_string(app.get("/asistencia", Some(&juan_cookie)).await).await;
    assert!(body.contains("Ana"));

    let body = body_string(app.get("/asistencia", Some(&maria_cookie)).await).await;
    assert!(!body.contains("Ana"));
}

#[tokio::test]
async fn missing_presence_defaults_to_no() {
    let app = spawn_app().await;
    let cookie = app.login("juan", "clave123").await;

    app.post_form("/asistencia", "nombre=Luis", Some(&cookie)).await;

    let juan = app.user_id("juan").await;
    let entries = app.repo.list_attendance(juan).await.unwrap();
    assert_eq!(entries[0].present, "no");
}

#[tokio::test]
async fn attendance_export_has_header_and_one_line_per_record() {
    let app = spawn_app().await;
    let cookie = app.login("juan", "clave123").await;
    app.post_form("/asistencia", "nombre=Ana&presente=si", Some(&cookie)).await;
    app.post_form("/asistencia", "nombre=Luis&presente=no", Some(&cookie)).await;

    // Registos de outro docente não aparecem
    let maria_cookie = app.login("maria", "clave456").await;
    app.post_form("/asistencia", "nombre=Sofía&presente=si", Some(&maria_cookie)).await;

    let response = app.get("/exportar_asistencia", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment;filename=asistencia.csv"
    );
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let juan = app.user_id("juan").await;
    let ids: Vec<i64> = app
        .repo
        .list_attendance(juan)
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();

    let body = body_string(response).await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines,
        [
            "id,nombre,presente".to_string(),
            format!("{},Ana,si", ids[0]),
            format!("{},Luis,no", ids[1]),
        ]
    );
}

#[tokio::test]
async fn grades_are_recorded_and_exported() {
    let app = spawn_app().await;
    let cookie = app.login("maria", "clave456").await;

    let response = app
        .post_form("/notas", "alumno=Pedro&nota=9", Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Pedro"));

    // Vírgula no nome sai entre aspas
    app.post_form("/notas", "alumno=G%C3%B3mez%2C+Ana&nota=7", Some(&cookie))
        .await;

    let response = app.get("/exportar_notas", Some(&cookie)).await;
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment;filename=notas.csv"
    );
    let body = body_string(response).await;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "id,alumno,nota");
    assert!(lines[1].ends_with(",Pedro,9"));
    assert!(lines[2].ends_with(",\"Gómez, Ana\",7"));

    let juan_cookie = app.login("juan", "clave123").await;
    let body = body_string(app.get("/exportar_notas", Some(&juan_cookie)).await).await;
    assert_eq!(body, "id,alumno,nota\n");
}

#[tokio::test]
async fn profile_shows_teacher_data_or_404() {
    let app = spawn_app().await;

    let cookie = app.login("juan", "clave123").await;
    let response = app.get("/perfil", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Pérez"));
    assert!(body.contains("Taller"));

    let cookie = app.login("admin", "adminpass").await;
    let response = app.get("/perfil", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "Docente no encontrado");
}
