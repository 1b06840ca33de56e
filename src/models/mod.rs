// src/models/mod.rs
pub mod record;
pub mod teacher;
pub mod user;
