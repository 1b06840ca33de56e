// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        admin_handlers, auth_handlers, mw_admin, mw_auth, record_handlers, registration_handlers,
        user_handlers,
    },
};
use axum::{
    middleware,
    routing::get,
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::Key, Expiry, SessionManagerLayer, SessionStore};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/logout", get(auth_handlers::handle_logout));

    // --- Rotas de Admin ---
    // O papel é verificado a cada pedido a partir da sessão
    let admin_routes = Router::new()
        .route("/admin", get(admin_handlers::show_admin_panel))
        .route(
            "/editar/{id}",
            get(admin_handlers::show_edit_teacher_form).post(admin_handlers::handle_edit_teacher),
        )
        .route("/eliminar/{id}", get(admin_handlers::handle_delete_teacher))
        .route_layer(middleware::from_fn(mw_admin::require_admin));

    // --- Rotas Autenticadas ---
    let authenticated_routes = Router::new()
        .route("/", get(user_handlers::home_page))
        .route("/perfil", get(user_handlers::profile_page))
        .route(
            "/asistencia",
            get(record_handlers::attendance_page).post(record_handlers::handle_attendance),
        )
        .route("/notas", get(record_handlers::grades_page).post(record_handlers::handle_grade))
        .route("/exportar_asistencia", get(record_handlers::export_attendance))
        .route("/exportar_notas", get(record_handlers::export_grades))
        .route(
            "/registrar",
            get(registration_handlers::show_register_form)
                .post(registration_handlers::handle_register),
        )
        .merge(admin_routes);

    // --- Router Final ---
    // require_auth é um layer (não route_layer) para cobrir também o fallback 404
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(middleware::from_fn(mw_auth::require_auth))
        .with_state(app_state)
}

/// Router completo com sessões (cookie assinado) e tracing HTTP.
pub fn build_app<S>(app_state: AppState, session_store: S, key: Key) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_signed(key);

    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer),
    )
}
