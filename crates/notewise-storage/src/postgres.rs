//! PostgreSQL store.
//!
//! All queries are parameterized sqlx statements keyed by tenant id where
//! the record is tenant-owned. Feature-gated behind `postgres-backend`;
//! uses the Tokio runtime for fully async operations.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::models::{Note, Role, Subscription, Tenant, User};
use crate::{Store, StoreError};

/// A record store backed by PostgreSQL.
///
/// Thread-safe via `PgPool` (connection pool).
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl std::fmt::Debug for PgStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgStore")
            .field("pool", &"[PgPool]")
            .finish_non_exhaustive()
    }
}

impl PgStore {
    /// Connect to PostgreSQL and run the initial migration.
    ///
    /// Creates the `tenants`, `users`, and `notes` tables if they do not
    /// exist. Email and slug uniqueness are enforced by the database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the connection or migration fails.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Backend {
                reason: format!("connection failed: {e}"),
            })?;

        for statement in [
            "CREATE TABLE IF NOT EXISTS tenants (\
                id           UUID PRIMARY KEY DEFAULT gen_random_uuid(), \
                name         TEXT NOT NULL, \
                slug         TEXT NOT NULL UNIQUE, \
                subscription TEXT NOT NULL DEFAULT 'free', \
                created_at   TIMESTAMPTZ NOT NULL DEFAULT now(), \
                updated_at   TIMESTAMPTZ NOT NULL DEFAULT now()\
            )",
            "CREATE TABLE IF NOT EXISTS users (\
                id            UUID PRIMARY KEY DEFAULT gen_random_uuid(), \
                email         TEXT NOT NULL UNIQUE, \
                password_hash TEXT NOT NULL, \
                role          TEXT NOT NULL, \
                tenant_id     UUID NOT NULL REFERENCES tenants(id), \
                created_at    TIMESTAMPTZ NOT NULL DEFAULT now()\
            )",
            "CREATE TABLE IF NOT EXISTS notes (\
                id         UUID PRIMARY KEY DEFAULT gen_random_uuid(), \
                tenant_id  UUID NOT NULL REFERENCES tenants(id), \
                author_id  UUID NOT NULL REFERENCES users(id), \
                title      TEXT NOT NULL, \
                content    TEXT NOT NULL, \
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(), \
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()\
            )",
            "CREATE INDEX IF NOT EXISTS idx_notes_tenant ON notes (tenant_id, created_at DESC)",
        ] {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| StoreError::Backend {
                    reason: format!("migration failed: {e}"),
                })?;
        }

        tracing::debug!("postgres schema ensured");

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl Store for PgStore {
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
        tenant_id: Uuid,
    ) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r"INSERT INTO users (email, password_hash, role, tenant_id)
              VALUES ($1, $2, $3, $4)
              RETURNING *",
        )
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create_tenant(
        &self,
        name: &str,
        slug: &str,
        subscription: Subscription,
    ) -> Result<Tenant, StoreError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r"INSERT INTO tenants (name, slug, subscription)
              VALUES ($1, $2, $3)
              RETURNING *",
        )
        .bind(name)
        .bind(slug)
        .bind(subscription)
        .fetch_one(&self.pool)
        .await?;

        Ok(tenant)
    }

    async fn find_tenant_by_id(&self, id: Uuid) -> Result<Option<Tenant>, StoreError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tenant)
    }

    async fn find_tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>, StoreError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        Ok(tenant)
    }

    async fn update_tenant_subscription(
        &self,
        id: Uuid,
        subscription: Subscription,
    ) -> Result<Tenant, StoreError> {
        sqlx::query_as::<_, Tenant>(
            r"UPDATE tenants SET subscription = $2, updated_at = now()
              WHERE id = $1
              RETURNING *",
        )
        .bind(id)
        .bind(subscription)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            what: format!("tenant {id}"),
        })
    }

    async fn create_note(
        &self,
        tenant_id: Uuid,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Note, StoreError> {
        let note = sqlx::query_as::<_, Note>(
            r"INSERT INTO notes (tenant_id, author_id, title, content)
              VALUES ($1, $2, $3, $4)
              RETURNING *",
        )
        .bind(tenant_id)
        .bind(author_id)
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(note)
    }

    async fn list_notes(&self, tenant_id: Uuid) -> Result<Vec<Note>, StoreError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE tenant_id = $1 ORDER BY created_at DESC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }

    async fn get_note(&self, id: Uuid, tenant_id: Uuid) -> Result<Option<Note>, StoreError> {
        let note =
            sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1 AND tenant_id = $2")
                .bind(id)
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(note)
    }

    async fn update_note(
        &self,
        id: Uuid,
        tenant_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Option<Note>, StoreError> {
        let note = sqlx::query_as::<_, Note>(
            r"UPDATE notes SET title = $3, content = $4, updated_at = now()
              WHERE id = $1 AND tenant_id = $2
              RETURNING *",
        )
        .bind(id)
        .bind(tenant_id)
        .bind(title)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }

    async fn delete_note(&self, id: Uuid, tenant_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_notes_for_tenant(&self, tenant_id: Uuid) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        for statement in ["DELETE FROM notes", "DELETE FROM users", "DELETE FROM tenants"] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        Ok(())
    }
}
