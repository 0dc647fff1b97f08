//! services/user_service.rs
//! Gestión de usuarios (modelo genérico de usuario + contraseña Argon2).

use chrono::Utc;
use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::config::app_config::BootstrapAdmin;
use crate::error::{map_unique_violation, AppError, AppResult};
use crate::models::auth_model::AuthUser;
use crate::models::page_model::{Page, PaginationQuery};
use crate::models::user_model::{
    CreateUserRequest, ModifyUserRequest, UserDetail, UserFilter, UserRecord,
};
use crate::services::{auth_service, like_pattern};

const USER_COLUMNS: &str =
    "id, username, email, is_superuser, is_staff, is_active, date_joined, last_login";

#[derive(Clone, Debug)]
pub struct UserService {
    db_pool: Pool<Sqlite>,
}

impl UserService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        UserService { db_pool }
    }

    pub async fn list_users(
        &self,
        filter: &UserFilter,
        pagination: &PaginationQuery,
    ) -> AppResult<Page<UserRecord>> {
        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM users WHERE 1 = 1");
        push_filters(&mut count_qb, filter);
        let (total,) = count_qb
            .build_query_as::<(i64,)>()
            .fetch_one(&self.db_pool)
            .await?;

        let mut qb =
            QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM users WHERE 1 = 1", USER_COLUMNS));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY username LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let items = qb
            .build_query_as::<UserRecord>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(Page::new(total, pagination, items))
    }

    pub async fn get_user(&self, id: i64) -> AppResult<UserRecord> {
        let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AppError::not_found("Usuario", id))
    }

    /// Usuario con los nombres de sus grupos
    pub async fn get_user_detail(&self, id: i64) -> AppResult<UserDetail> {
        let user = self.get_user(id).await?;
        let groups: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT g.name
            FROM groups g
            JOIN user_groups ug ON ug.group_id = g.id
            WHERE ug.user_id = ?1
            ORDER BY g.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(UserDetail {
            user,
            groups: groups.into_iter().map(|(name,)| name).collect(),
        })
    }

    /// Usuario y hash de contraseña para autenticar; `None` si no existe.
    pub async fn find_credentials(&self, username: &str) -> AppResult<Option<(UserRecord, String)>> {
        let sql = format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS);
        let user = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(username)
            .fetch_optional(&self.db_pool)
            .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let (hash,): (String,) = sqlx::query_as("SELECT password_hash FROM users WHERE id = ?1")
            .bind(user.id)
            .fetch_one(&self.db_pool)
            .await?;
        Ok(Some((user, hash)))
    }

    pub async fn create_user(
        &self,
        actor: &AuthUser,
        req: CreateUserRequest,
    ) -> AppResult<UserDetail> {
        actor.require_superuser()?;
        self.insert_user(req).await
    }

    async fn insert_user(&self, req: CreateUserRequest) -> AppResult<UserDetail> {
        req.validate()?;
        let password_hash = auth_service::hash_password_blocking(req.password.clone()).await?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                username, email, password_hash, is_superuser, is_staff,
                is_active, date_joined, last_login
            )
            VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, NULL)
            "#,
        )
        .bind(&req.username)
        .bind(req.email.trim())
        .bind(&password_hash)
        .bind(req.is_superuser)
        .bind(req.is_staff)
        .bind(now)
        .execute(&self.db_pool)
        .await
        .map_err(|e| map_unique_violation(e, format!("el usuario '{}' ya existe", req.username)))?;

        let id = result.last_insert_rowid();
        log::info!(
            "(create_user) Usuario '{}' creado id={} superuser={}",
            req.username,
            id,
            req.is_superuser
        );
        self.get_user_detail(id).await
    }

    /// Un usuario puede cambiar su propio email/contraseña; lo demás requiere
    /// superusuario.
    pub async fn modify_user(
        &self,
        actor: &AuthUser,
        id: i64,
        patch: ModifyUserRequest,
    ) -> AppResult<UserDetail> {
        if !(actor.id == id && patch.is_self_service()) {
            actor.require_superuser()?;
        }
        patch.validate()?;
        let current = self.get_user(id).await?;

        let password_hash = match &patch.password {
            Some(password) => Some(auth_service::hash_password_blocking(password.clone()).await?),
            None => None,
        };

        sqlx::query(
            r#"
            UPDATE users
            SET email = ?2,
                password_hash = COALESCE(?3, password_hash),
                is_superuser = ?4,
                is_staff = ?5,
                is_active = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(
            patch
                .email
                .as_deref()
                .map(str::trim)
                .unwrap_or(&current.email),
        )
        .bind(password_hash)
        .bind(patch.is_superuser.unwrap_or(current.is_superuser))
        .bind(patch.is_staff.unwrap_or(current.is_staff))
        .bind(patch.is_active.unwrap_or(current.is_active))
        .execute(&self.db_pool)
        .await?;

        log::info!(
            "(modify_user) Usuario id={} actualizado por '{}'",
            id,
            actor.username
        );
        self.get_user_detail(id).await
    }

    /// Borra al usuario y, en cascada, las inscripciones que emitió.
    pub async fn delete_user(&self, actor: &AuthUser, id: i64) -> AppResult<()> {
        actor.require_superuser()?;
        if actor.id == id {
            return Err(AppError::Conflict(
                "un usuario no puede eliminarse a sí mismo".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Usuario", id));
        }
        log::info!(
            "(delete_user) Usuario id={} eliminado por '{}'",
            id,
            actor.username
        );
        Ok(())
    }

    pub async fn touch_last_login(&self, id: i64) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login = ?2 WHERE id = ?1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }

    /// Crea el superusuario de arranque si todavía no existe. Devuelve `true`
    /// si lo creó.
    pub async fn ensure_superuser(&self, admin: &BootstrapAdmin) -> AppResult<bool> {
        if self.find_credentials(&admin.username).await?.is_some() {
            log::info!(
                "(ensure_superuser) El superusuario '{}' ya existe",
                admin.username
            );
            return Ok(false);
        }

        self.insert_user(CreateUserRequest {
            username: admin.username.clone(),
            password: admin.password.clone(),
            email: admin.email.clone(),
            is_superuser: true,
            is_staff: true,
        })
        .await?;
        Ok(true)
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &UserFilter) {
    if let Some(q) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = like_pattern(q);
        qb.push(" AND (username LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR email LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    if let Some(active) = filter.is_active {
        qb.push(" AND is_active = ").push_bind(active);
    }
}
