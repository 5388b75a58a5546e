use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::admin::Admin;
use crate::database::StoreError;

/// All SQL touching the `admins` table. Credential hashes enter and leave
/// only through this store; serialization elsewhere never exposes them.
#[derive(Clone)]
pub struct AdminStore {
    pool: PgPool,
}

impl AdminStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        let admin =
            sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(admin)
    }

    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<Admin, StoreError> {
        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM admins WHERE username = $1 OR LOWER(email) = LOWER($2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        if existing > 0 {
            return Err(StoreError::Duplicate(
                "Admin with this email or username already exists".to_string(),
            ));
        }

        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (id, username, email, password_hash, role, is_active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Races past the pre-check land on the unique constraints
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate(
                "Admin with this email or username already exists".to_string(),
            ),
            _ => StoreError::Sqlx(e),
        })?;

        Ok(admin)
    }

    pub async fn list(&self) -> Result<Vec<Admin>, StoreError> {
        let admins = sqlx::query_as::<_, Admin>("SELECT * FROM admins ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(admins)
    }

    pub async fn toggle(&self, id: Uuid) -> Result<Admin, StoreError> {
        sqlx::query_as::<_, Admin>(
            "UPDATE admins SET is_active = NOT is_active WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound("Admin not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Admin not found".to_string()));
        }
        Ok(())
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE admins SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Admin not found".to_string()));
        }
        Ok(())
    }

    pub async fn touch_last_login(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("UPDATE admins SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
