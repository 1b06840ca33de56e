// src/services/user_service.rs
use crate::{
    db::SchoolRepository,
    error::AppResult,
    models::{
        teacher::NewProfile,
        user::{NewUser, Role, SeedAccount},
    },
    services::auth_service,
};

struct SeedUser {
    username: &'static str,
    password: &'static str,
    email: &'static str,
    role: Role,
    // (nome, apelido, área) para docentes
    profile: Option<(&'static str, &'static str, &'static str)>,
}

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        username: "juan",
        password: "clave123",
        email: "juan@escuela.edu",
        role: Role::Teacher,
        profile: Some(("Juan", "Pérez", "Taller")),
    },
    SeedUser {
        username: "maria",
        password: "clave456",
        email: "maria@escuela.edu",
        role: Role::Teacher,
        profile: Some(("María", "Gómez", "Taller")),
    },
    SeedUser {
        username: "admin",
        password: "adminpass",
        email: "admin@escuela.edu",
        role: Role::Admin,
        profile: None,
    },
];

/// Cria os utilizadores iniciais se a tabela 'users' estiver vazia.
/// Devolve quantos foram criados. Ou ficam todos criados, ou nenhum.
pub async fn seed_default_users(repo: &dyn SchoolRepository, bcrypt_cost: u32) -> AppResult<usize> {
    // Evita gerar hashes quando já há dados; seed_users volta a verificar dentro da transação
    if repo.count_users().await? > 0 {
        tracing::debug!("Tabela users já tem dados, sem seed.");
        return Ok(0);
    }

    tracing::info!("🌱 Base de dados vazia, criando utilizadores iniciais...");
    let mut accounts = Vec::with_capacity(SEED_USERS.len());
    for seed in SEED_USERS {
        let password_hash = auth_service::hash_password(seed.password, bcrypt_cost).await?;
        accounts.push(SeedAccount {
            user: NewUser {
                username: seed.username.to_string(),
                password_hash,
                email: Some(seed.email.to_string()),
                role: seed.role,
            },
            profile: seed.profile.map(|(first_name, last_name, area)| NewProfile {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                area: Some(area.to_string()),
            }),
        });
    }

    repo.seed_users(&accounts).await
}
