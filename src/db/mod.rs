// src/db/mod.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        record::{AttendanceEntry, GradeEntry},
        teacher::{NewTeacher, TeacherProfile, TeacherSummary, TeacherUpdate},
        user::{NewUser, SeedAccount, User},
    },
};
use async_trait::async_trait;

pub mod postgres;
pub mod sqlite;

pub use postgres::PgRepository;
pub use sqlite::SqliteRepository;

/// Backend escolhido pelo esquema do `DATABASE_URL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn from_url(database_url: &str) -> AppResult<Self> {
        if database_url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else {
            Err(AppError::Config(format!(
                "DATABASE_URL com esquema não suportado: {}",
                database_url
            )))
        }
    }
}

/// Operações de persistência usadas pelos handlers.
///
/// Cada backend implementa a mesma interface; a aplicação só vê
/// `Arc<dyn SchoolRepository>`. Inserções com username repetido devolvem
/// `AppError::UsernameTaken` e não deixam nada escrito.
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    fn backend(&self) -> Backend;

    async fn count_users(&self) -> AppResult<i64>;

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Cria todas as contas numa só transação, apenas se `users` estiver vazia.
    /// Devolve quantas foram criadas (0 se já havia utilizadores). Qualquer
    /// falha desfaz tudo.
    async fn seed_users(&self, accounts: &[SeedAccount]) -> AppResult<usize>;

    /// Insere apenas o utilizador (sem perfil). Devolve o id.
    async fn create_user(&self, user: &NewUser) -> AppResult<i64>;

    /// Insere utilizador (papel teacher) + perfil numa transação. Devolve o id do utilizador.
    async fn create_teacher(&self, teacher: &NewTeacher) -> AppResult<i64>;

    async fn find_profile_by_user(&self, user_id: i64) -> AppResult<Option<TeacherProfile>>;

    async fn list_teachers(&self) -> AppResult<Vec<TeacherSummary>>;

    async fn find_teacher(&self, teacher_id: i64) -> AppResult<Option<TeacherSummary>>;

    /// Atualiza utilizador e perfil numa transação. `false` se o perfil não existe.
    async fn update_teacher(&self, teacher_id: i64, update: &TeacherUpdate) -> AppResult<bool>;

    /// Apaga o utilizador dono do perfil; o resto sai por cascata.
    async fn delete_teacher(&self, teacher_id: i64) -> AppResult<bool>;

    async fn list_attendance(&self, user_id: i64) -> AppResult<Vec<AttendanceEntry>>;

    async fn add_attendance(&self, user_id: i64, student: &str, present: &str) -> AppResult<AttendanceEntry>;

    async fn list_grades(&self, user_id: i64) -> AppResult<Vec<GradeEntry>>;

    async fn add_grade(&self, user_id: i64, student: &str, grade: &str) -> AppResult<GradeEntry>;
}

/// Um repositório já ligado e migrado, com o pool concreto acessível
/// (o `main` usa-o para criar o session store no mesmo backend).
pub enum Database {
    Sqlite(SqliteRepository),
    Postgres(PgRepository),
}

pub async fn connect(database_url: &str) -> AppResult<Database> {
    match Backend::from_url(database_url)? {
        Backend::Sqlite => Ok(Database::Sqlite(SqliteRepository::connect(database_url).await?)),
        Backend::Postgres => Ok(Database::Postgres(PgRepository::connect(database_url).await?)),
    }
}
