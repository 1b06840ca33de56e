// src/services/mod.rs
pub mod auth_service;
pub mod export_service;
pub mod teacher_service;
pub mod user_service;
