use sqlx::PgPool;

/// Idempotent schema bootstrap, run once at startup. Two tables back the
/// whole service; the GIN expression index powers the ranked public search
/// and must match the vector expression used by the query builder.
const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS schemes (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        short_description TEXT NOT NULL,
        description TEXT NOT NULL,
        official_link TEXT NOT NULL,
        category TEXT NOT NULL,
        ministry TEXT NOT NULL,
        eligibility TEXT NOT NULL,
        benefits TEXT NOT NULL,
        application_process TEXT,
        documents TEXT[] NOT NULL DEFAULT '{}',
        launch_date DATE,
        state TEXT NOT NULL DEFAULT 'All India',
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        view_count BIGINT NOT NULL DEFAULT 0,
        image_url TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS schemes_search_idx ON schemes USING GIN (
        to_tsvector('english', name || ' ' || description || ' ' || category || ' ' || ministry)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS schemes_category_idx ON schemes (category)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS admins (
        id UUID PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'admin',
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        last_login TIMESTAMPTZ,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in DDL {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("database schema ensured");
    Ok(())
}
