//! services/group_service.rs

use sqlx::{Pool, Sqlite};

use crate::error::{map_unique_violation, AppError, AppResult};
use crate::models::auth_model::AuthUser;
use crate::models::group_model::{CreateGroupRequest, GroupRecord};
use crate::models::user_model::UserRecord;
use crate::services::ensure_exists;

#[derive(Clone, Debug)]
pub struct GroupService {
    db_pool: Pool<Sqlite>,
}

impl GroupService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        GroupService { db_pool }
    }

    pub async fn list_groups(&self) -> AppResult<Vec<GroupRecord>> {
        let groups = sqlx::query_as::<_, GroupRecord>("SELECT id, name FROM groups ORDER BY name")
            .fetch_all(&self.db_pool)
            .await?;
        Ok(groups)
    }

    pub async fn get_group(&self, id: i64) -> AppResult<GroupRecord> {
        sqlx::query_as::<_, GroupRecord>("SELECT id, name FROM groups WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(AppError::not_found("Grupo", id))
    }

    pub async fn create_group(
        &self,
        actor: &AuthUser,
        req: CreateGroupRequest,
    ) -> AppResult<GroupRecord> {
        actor.require_superuser()?;
        req.validate()?;
        let name = req.name.trim().to_string();

        let result = sqlx::query("INSERT INTO groups (name) VALUES (?1)")
            .bind(&name)
            .execute(&self.db_pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("el grupo '{}' ya existe", name)))?;

        let id = result.last_insert_rowid();
        log::info!("(create_group) Grupo '{}' creado id={}", name, id);
        self.get_group(id).await
    }

    pub async fn delete_group(&self, actor: &AuthUser, id: i64) -> AppResult<()> {
        actor.require_superuser()?;
        let result = sqlx::query("DELETE FROM groups WHERE id = ?1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Grupo", id));
        }
        log::info!("(delete_group) Grupo id={} eliminado", id);
        Ok(())
    }

    /// Agregar a un usuario que ya es miembro no es un error.
    pub async fn add_member(&self, actor: &AuthUser, group_id: i64, user_id: i64) -> AppResult<()> {
        actor.require_superuser()?;
        self.get_group(group_id).await?;
        ensure_exists(&self.db_pool, "users", "user_id", user_id).await?;

        sqlx::query("INSERT OR IGNORE INTO user_groups (user_id, group_id) VALUES (?1, ?2)")
            .bind(user_id)
            .bind(group_id)
            .execute(&self.db_pool)
            .await?;

        log::info!(
            "(add_member) Usuario id={} agregado al grupo id={}",
            user_id,
            group_id
        );
        Ok(())
    }

    pub async fn remove_member(
        &self,
        actor: &AuthUser,
        group_id: i64,
        user_id: i64,
    ) -> AppResult<()> {
        actor.require_superuser()?;
        let result = sqlx::query("DELETE FROM user_groups WHERE user_id = ?1 AND group_id = ?2")
            .bind(user_id)
            .bind(group_id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Membresía", user_id));
        }
        log::info!(
            "(remove_member) Usuario id={} removido del grupo id={}",
            user_id,
            group_id
        );
        Ok(())
    }

    pub async fn list_members(&self, group_id: i64) -> AppResult<Vec<UserRecord>> {
        self.get_group(group_id).await?;
        let members = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT u.id, u.username, u.email, u.is_superuser, u.is_staff,
                   u.is_active, u.date_joined, u.last_login
            FROM users u
            JOIN user_groups ug ON ug.user_id = u.id
            WHERE ug.group_id = ?1
            ORDER BY u.username
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.db_pool)
        .await?;
        Ok(members)
    }
}
