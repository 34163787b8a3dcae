use musebot_db::DbPool;

/// In-memory catalogue with the schema applied and the test fixture loaded.
pub async fn seeded_pool() -> DbPool {
    let pool = musebot_db::create_memory_pool()
        .await
        .expect("in-memory pool");
    musebot_db::run_migrations(&pool)
        .await
        .expect("migrations apply");
    sqlx::raw_sql(include_str!("../../fixtures/catalogue.sql"))
        .execute(&pool)
        .await
        .expect("fixture loads");
    pool
}
