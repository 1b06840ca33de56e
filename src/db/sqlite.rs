// src/db/sqlite.rs
use super::{Backend, SchoolRepository};
use crate::{
    error::{AppError, AppResult},
    models::{
        record::{AttendanceEntry, GradeEntry},
        teacher::{NewTeacher, TeacherProfile, TeacherSummary, TeacherUpdate},
        user::{NewUser, Role, SeedAccount, User},
    },
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

const TEACHER_SUMMARY_SELECT: &str = r#"
    SELECT t.id, t.user_id, u.username, u.email, t.first_name, t.last_name, t.area
    FROM teachers t
    JOIN users u ON u.id = t.user_id
"#;

/// Repositório sobre SQLite (base de dados local embutida).
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        tracing::info!("Ligando à base de dados SQLite: {}", database_url);

        // Opções de conexão (criar se não existir, timeout, FKs para o ON DELETE CASCADE)
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    /// Base de dados em memória numa única conexão que nunca expira.
    pub async fn in_memory() -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> AppResult<()> {
        tracing::info!("Executando migrações SQLite...");
        sqlx::migrate!("./migrations/sqlite").run(&self.pool).await?;
        tracing::info!("Migrações concluídas.");
        Ok(())
    }
}

#[async_trait]
impl SchoolRepository for SqliteRepository {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    async fn count_users(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        tracing::debug!("Buscando utilizador por username: {}", username);
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, email, role FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn seed_users(&self, accounts: &[SeedAccount]) -> AppResult<usize> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            // tx sai de escopo sem commit => rollback
            return Ok(0);
        }

        for account in accounts {
            let user_id = sqlx::query(
                "INSERT INTO users (username, password_hash, email, role) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&account.user.username)
            .bind(&account.user.password_hash)
            .bind(&account.user.email)
            .bind(account.user.role.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_insert(e, &account.user.username))?
            .last_insert_rowid();

            if let Some(profile) = &account.profile {
                sqlx::query(
                    "INSERT INTO teachers (user_id, first_name, last_name, area) VALUES (?1, ?2, ?3, ?4)",
                )
                .bind(user_id)
                .bind(&profile.first_name)
                .bind(&profile.last_name)
                .bind(&profile.area)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(accounts.len())
    }

    async fn create_user(&self, user: &NewUser) -> AppResult<i64> {
        let id = sqlx::query(
            "INSERT INTO users (username, password_hash, email, role) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_insert(e, &user.username))?
        .last_insert_rowid();

        tracing::info!("✅ Utilizador '{}' criado (id {}).", user.username, id);
        Ok(id)
    }

    async fn create_teacher(&self, teacher: &NewTeacher) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query(
            "INSERT INTO users (username, password_hash, email, role) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&teacher.username)
        .bind(&teacher.password_hash)
        .bind(&teacher.email)
        .bind(Role::Teacher.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_insert(e, &teacher.username))?
        .last_insert_rowid();

        sqlx::query(
            "INSERT INTO teachers (user_id, first_name, last_name, area) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(user_id)
        .bind(&teacher.first_name)
        .bind(&teacher.last_name)
        .bind(&teacher.area)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!("✅ Docente '{}' registado (user id {}).", teacher.username, user_id);
        Ok(user_id)
    }

    async fn find_profile_by_user(&self, user_id: i64) -> AppResult<Option<TeacherProfile>> {
        let profile = sqlx::query_as::<_, TeacherProfile>(
            "SELECT id, user_id, first_name, last_name, area FROM teachers WHERE user_id = ?1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn list_teachers(&self) -> AppResult<Vec<TeacherSummary>> {
        let teachers = sqlx::query_as::<_, TeacherSummary>(&format!(
            "{} ORDER BY t.id ASC",
            TEACHER_SUMMARY_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;
        tracing::debug!("Encontrados {} docentes.", teachers.len());
        Ok(teachers)
    }

    async fn find_teacher(&self, teacher_id: i64) -> AppResult<Option<TeacherSummary>> {
        let teacher = sqlx::query_as::<_, TeacherSummary>(&format!(
            "{} WHERE t.id = ?1",
            TEACHER_SUMMARY_SELECT
        ))
        .bind(teacher_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }

    async fn update_teacher(&self, teacher_id: i64, update: &TeacherUpdate) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        // password_hash NULL => mantém a atual
        sqlx::query(
            r#"
            UPDATE users
            SET username = ?1,
                email = ?2,
                password_hash = COALESCE(?3, password_hash)
            WHERE id = (SELECT user_id FROM teachers WHERE id = ?4)
            "#,
        )
        .bind(&update.username)
        .bind(&update.email)
        .bind(&update.password_hash)
        .bind(teacher_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_insert(e, &update.username))?;

        let rows_affected = sqlx::query(
            "UPDATE teachers SET first_name = ?1, last_name = ?2, area = ?3 WHERE id = ?4",
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.area)
        .bind(teacher_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        Ok(rows_affected > 0)
    }

    async fn delete_teacher(&self, teacher_id: i64) -> AppResult<bool> {
        let rows_affected = sqlx::query(
            "DELETE FROM users WHERE id = (SELECT user_id FROM teachers WHERE id = ?1)",
        )
        .bind(teacher_id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        Ok(rows_affected > 0)
    }

    async fn list_attendance(&self, user_id: i64) -> AppResult<Vec<AttendanceEntry>> {
        let entries = sqlx::query_as::<_, AttendanceEntry>(
            "SELECT id, student, present, user_id FROM attendance WHERE user_id = ?1 ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn add_attendance(&self, user_id: i64, student: &str, present: &str) -> AppResult<AttendanceEntry> {
        let id = sqlx::query("INSERT INTO attendance (student, present, user_id) VALUES (?1, ?2, ?3)")
            .bind(student)
            .bind(present)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(AttendanceEntry {
            id,
            student: student.to_string(),
            present: present.to_string(),
            user_id,
        })
    }

    async fn list_grades(&self, user_id: i64) -> AppResult<Vec<GradeEntry>> {
        let entries = sqlx::query_as::<_, GradeEntry>(
            "SELECT id, student, grade, user_id FROM grades WHERE user_id = ?1 ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    async fn add_grade(&self, user_id: i64, student: &str, grade: &str) -> AppResult<GradeEntry> {
        let id = sqlx::query("INSERT INTO grades (student, grade, user_id) VALUES (?1, ?2, ?3)")
            .bind(student)
            .bind(grade)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(GradeEntry {
            id,
            student: student.to_string(),
            grade: grade.to_string(),
            user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::teacher::NewProfile;

    fn teacher(username: &str) -> NewTeacher {
        NewTeacher {
            username: username.to_string(),
            password_hash: "$2b$04$hash".to_string(),
            email: Some(format!("{}@escuela.edu", username)),
            first_name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            area: Some("Taller".to_string()),
        }
    }

    #[tokio::test]
    async fn create_teacher_inserts_user_and_profile() {
        let repo = SqliteRepository::in_memory().await.unwrap();
        let user_id = repo.create_teacher(&teacher("juan")).await.unwrap();

        let user = repo.find_user_by_username("juan").await.unwrap().unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.role, Role::Teacher);

        let profile = repo.find_profile_by_user(user_id).await.unwrap().unwrap();
        assert_eq!(profile.first_name, "Juan");
        assert_eq!(profile.area.as_deref(), Some("Taller"));
    }

    fn account(username: &str, role: Role) -> SeedAccount {
        SeedAccount {
            user: NewUser {
                username: username.to_string(),
                password_hash: "$2b$04$hash".to_string(),
                email: None,
                role,
            },
            profile: (role == Role::Teacher).then(|| NewProfile {
                first_name: "Juan".to_string(),
                last_name: "Pérez".to_string(),
                area: None,
            }),
        }
    }

    #[tokio::test]
    async fn seed_failure_midway_writes_nothing() {
        let repo = SqliteRepository::in_memory().await.unwrap();

        // A terceira conta colide com a primeira depois de duas inserções feitas
        let accounts = [
            account("juan", Role::Teacher),
            account("admin", Role::Admin),
            account("juan", Role::Teacher),
        ];
        let err = repo.seed_users(&accounts).await.unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken(ref name) if name == "juan"));
        assert_eq!(repo.count_users().await.unwrap(), 0);
        assert!(repo.list_teachers().await.unwrap().is_empty());

        // Numa nova tentativa a base ainda conta como vazia
        let accounts = [account("juan", Role::Teacher), account("admin", Role::Admin)];
        assert_eq!(repo.seed_users(&accounts).await.unwrap(), 2);
        assert_eq!(repo.list_teachers().await.unwrap().len(), 1);
        assert!(repo.find_user_by_username("admin").await.unwrap().is_some());

        // Já há utilizadores: não cria nada
        assert_eq!(repo.seed_users(&[account("maria", Role::Teacher)]).await.unwrap(), 0);
        assert_eq!(repo.count_users().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_username_rolls_back() {
        let repo = SqliteRepository::in_memory().await.unwrap();
        repo.create_teacher(&teacher("juan")).await.unwrap();

        let err = repo.create_teacher(&teacher("juan")).await.unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken(ref name) if name == "juan"));
        assert_eq!(repo.count_users().await.unwrap(), 1);
        assert_eq!(repo.list_teachers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn entries_are_scoped_to_owner() {
        let repo = SqliteRepository::in_memory().await.unwrap();
        let juan = repo.create_teacher(&teacher("juan")).await.unwrap();
        let maria = repo.create_teacher(&teacher("maria")).await.unwrap();

        repo.add_attendance(juan, "Ana", "si").await.unwrap();
        repo.add_grade(maria, "Luis", "8").await.unwrap();

        assert_eq!(repo.list_attendance(juan).await.unwrap().len(), 1);
        assert!(repo.list_attendance(maria).await.unwrap().is_empty());
        assert!(repo.list_grades(juan).await.unwrap().is_empty());
        assert_eq!(repo.list_grades(maria).await.unwrap()[0].grade, "8");
    }

    #[tokio::test]
    async fn update_without_password_keeps_hash() {
        let repo = SqliteRepository::in_memory().await.unwrap();
        repo.create_teacher(&teacher("juan")).await.unwrap();
        let teacher_id = repo.list_teachers().await.unwrap()[0].id;

        let updated = repo
            .update_teacher(
                teacher_id,
                &TeacherUpdate {
                    username: "juanp".to_string(),
                    password_hash: None,
                    email: None,
                    first_name: "Juan Carlos".to_string(),
                    last_name: "Pérez".to_string(),
                    area: Some("Matemática".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(updated);

        let user = repo.find_user_by_username("juanp").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "$2b$04$hash");
        assert_eq!(user.email, None);

        let summary = repo.find_teacher(teacher_id).await.unwrap().unwrap();
        assert_eq!(summary.first_name, "Juan Carlos");
        assert_eq!(summary.area_or_empty(), "Matemática");
    }

    #[tokio::test]
    async fn update_to_existing_username_changes_nothing() {
        let repo = SqliteRepository::in_memory().await.unwrap();
        repo.create_teacher(&teacher("juan")).await.unwrap();
        repo.create_teacher(&teacher("maria")).await.unwrap();
        let juan_profile = repo.list_teachers().await.unwrap()[0].id;

        let err = repo
            .update_teacher(
                juan_profile,
                &TeacherUpdate {
                    username: "maria".to_string(),
                    password_hash: None,
                    email: None,
                    first_name: "Otro".to_string(),
                    last_name: "Nombre".to_string(),
                    area: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UsernameTaken(_)));

        let summary = repo.find_teacher(juan_profile).await.unwrap().unwrap();
        assert_eq!(summary.username, "juan");
        assert_eq!(summary.first_name, "Juan");
    }

    #[tokio::test]
    async fn delete_teacher_cascades_to_profile_and_entries() {
        let repo = SqliteRepository::in_memory().await.unwrap();
        let juan = repo.create_teacher(&teacher("juan")).await.unwrap();
        repo.add_attendance(juan, "Ana", "si").await.unwrap();
        repo.add_grade(juan, "Ana", "9").await.unwrap();
        let teacher_id = repo.list_teachers().await.unwrap()[0].id;

        assert!(repo.delete_teacher(teacher_id).await.unwrap());

        assert!(repo.find_user_by_username("juan").await.unwrap().is_none());
        assert!(repo.find_profile_by_user(juan).await.unwrap().is_none());
        assert!(repo.list_attendance(juan).await.unwrap().is_empty());
        assert!(repo.list_grades(juan).await.unwrap().is_empty());
        assert!(!repo.delete_teacher(teacher_id).await.unwrap());
    }
}
