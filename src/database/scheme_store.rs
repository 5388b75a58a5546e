use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::scheme::{
    CategoryCount, MostViewedScheme, RecentScheme, Scheme, SchemeInput, SchemeSummary,
    SUMMARY_COLUMNS,
};
use crate::database::StoreError;
use crate::query::SchemeQuery;

/// Aggregate statistics for the public dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeStats {
    pub total_schemes: i64,
    pub category_stats: Vec<CategoryCount>,
    pub state_stats: Vec<CategoryCount>,
    pub most_viewed: Vec<MostViewedScheme>,
    pub recently_added: Vec<RecentScheme>,
}

/// All SQL touching the `schemes` table lives here. Handlers validate input
/// and shape responses; this store owns the queries.
#[derive(Clone)]
pub struct SchemeStore {
    pool: PgPool,
}

impl SchemeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Public listing: summary projection plus the total matching count,
    /// both driven by the same assembled predicate.
    pub async fn list_summaries(
        &self,
        query: &SchemeQuery,
    ) -> Result<(Vec<SchemeSummary>, i64), StoreError> {
        let sql = format!(
            "SELECT {} FROM schemes {} {} {}",
            SUMMARY_COLUMNS,
            query.where_sql(),
            query.order_sql(),
            query.limit_sql()
        );
        let mut rows = sqlx::query_as::<_, SchemeSummary>(&sql);
        for bind in query.binds() {
            rows = rows.bind(bind);
        }
        let schemes = rows.fetch_all(&self.pool).await?;

        let total = self.count(query).await?;
        Ok((schemes, total))
    }

    /// Admin listing: full rows, same predicate-sharing contract.
    pub async fn list_full(&self, query: &SchemeQuery) -> Result<(Vec<Scheme>, i64), StoreError> {
        let sql = format!(
            "SELECT * FROM schemes {} {} {}",
            query.where_sql(),
            query.order_sql(),
            query.limit_sql()
        );
        let mut rows = sqlx::query_as::<_, Scheme>(&sql);
        for bind in query.binds() {
            rows = rows.bind(bind);
        }
        let schemes = rows.fetch_all(&self.pool).await?;

        let total = self.count(query).await?;
        Ok((schemes, total))
    }

    async fn count(&self, query: &SchemeQuery) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM schemes {}", query.where_sql());
        let mut count = sqlx::query_scalar::<_, i64>(&sql);
        for bind in query.binds() {
            count = count.bind(bind);
        }
        Ok(count.fetch_one(&self.pool).await?)
    }

    /// Fetch a scheme by id, incrementing its view counter as part of the
    /// read. The increment is a single UPDATE so concurrent reads never lose
    /// counts.
    pub async fn fetch_counting_view(&self, id: Uuid) -> Result<Scheme, StoreError> {
        sqlx::query_as::<_, Scheme>(
            "UPDATE schemes SET view_count = view_count + 1 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound("Scheme not found".to_string()))
    }

    pub async fn create(&self, input: &SchemeInput) -> Result<Scheme, StoreError> {
        let scheme = sqlx::query_as::<_, Scheme>(
            r#"
            INSERT INTO schemes (
                id, name, short_description, description, official_link, category,
                ministry, eligibility, benefits, application_process, documents,
                launch_date, state, is_active, view_count, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, 0, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.name.trim())
        .bind(input.short_description.trim())
        .bind(input.description.trim())
        .bind(input.official_link.trim())
        .bind(input.category.trim())
        .bind(input.ministry.trim())
        .bind(input.eligibility.trim())
        .bind(input.benefits.trim())
        .bind(input.application_process.as_deref().map(str::trim))
        .bind(&input.documents)
        .bind(input.launch_date)
        .bind(input.state_or_default())
        .bind(input.is_active.unwrap_or(true))
        .bind(input.image_url.as_deref().map(str::trim).unwrap_or(""))
        .fetch_one(&self.pool)
        .await?;

        Ok(scheme)
    }

    /// Full-field update; `isActive` only changes when the payload carries
    /// it. Validation has already run with the same rules as create.
    pub async fn update(&self, id: Uuid, input: &SchemeInput) -> Result<Scheme, StoreError> {
        sqlx::query_as::<_, Scheme>(
            r#"
            UPDATE schemes SET
                name = $2,
                short_description = $3,
                description = $4,
                official_link = $5,
                category = $6,
                ministry = $7,
                eligibility = $8,
                benefits = $9,
                application_process = $10,
                documents = $11,
                launch_date = $12,
                state = $13,
                is_active = COALESCE($14, is_active),
                image_url = COALESCE($15, image_url),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(input.short_description.trim())
        .bind(input.description.trim())
        .bind(input.official_link.trim())
        .bind(input.category.trim())
        .bind(input.ministry.trim())
        .bind(input.eligibility.trim())
        .bind(input.benefits.trim())
        .bind(input.application_process.as_deref().map(str::trim))
        .bind(&input.documents)
        .bind(input.launch_date)
        .bind(input.state_or_default())
        .bind(input.is_active)
        .bind(input.image_url.as_deref().map(str::trim))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound("Scheme not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM schemes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Scheme not found".to_string()));
        }
        Ok(())
    }

    /// Flip the active flag rather than setting it explicitly.
    pub async fn toggle(&self, id: Uuid) -> Result<Scheme, StoreError> {
        sqlx::query_as::<_, Scheme>(
            "UPDATE schemes SET is_active = NOT is_active, updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound("Scheme not found".to_string()))
    }

    /// Active categories with their scheme counts, most populous first.
    pub async fn categories(&self) -> Result<Vec<CategoryCount>, StoreError> {
        let rows = sqlx::query_as::<_, CategoryCount>(
            "SELECT category AS name, COUNT(*) AS count FROM schemes \
             WHERE is_active = TRUE GROUP BY category ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn stats(&self) -> Result<SchemeStats, StoreError> {
        let total_schemes =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM schemes WHERE is_active = TRUE")
                .fetch_one(&self.pool)
                .await?;

        let category_stats = self.categories().await?;

        let state_stats = sqlx::query_as::<_, CategoryCount>(
            "SELECT state AS name, COUNT(*) AS count FROM schemes \
             WHERE is_active = TRUE GROUP BY state ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let most_viewed = sqlx::query_as::<_, MostViewedScheme>(
            "SELECT id, name, category, view_count FROM schemes \
             WHERE is_active = TRUE ORDER BY view_count DESC LIMIT 5",
        )
        .fetch_all(&self.pool)
        .await?;

        let recently_added = sqlx::query_as::<_, RecentScheme>(
            "SELECT id, name, category, created_at FROM schemes \
             WHERE is_active = TRUE ORDER BY created_at DESC LIMIT 5",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(SchemeStats {
            total_schemes,
            category_stats,
            state_stats,
            most_viewed,
            recently_added,
        })
    }
}
