// src/state.rs
use crate::db::SchoolRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // Backend escolhido no arranque (SQLite ou PostgreSQL)
    pub repo: Arc<dyn SchoolRepository>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(repo: Arc<dyn SchoolRepository>, bcrypt_cost: u32) -> Self {
        Self { repo, bcrypt_cost }
    }
}

