//! Seeds an admin account for first-boot provisioning.
//!
//! Reads `DATABASE_URL`, `SEED_ADMIN_EMAIL` and `SEED_ADMIN_PASSWORD` from
//! the environment (or `.env`). Idempotent: an already-registered email is
//! left untouched.

use anyhow::Context;
use auth_adapters::Argon2PasswordHasher;
use domains::PasswordHasher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let email = std::env::var("SEED_ADMIN_EMAIL").context("SEED_ADMIN_EMAIL must be set")?;
    let password =
        std::env::var("SEED_ADMIN_PASSWORD").context("SEED_ADMIN_PASSWORD must be set")?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .context("connecting to postgres")?;

    let hash = Argon2PasswordHasher
        .hash(&password)
        .context("hashing admin password")?;
    let result = sqlx::query(
        "INSERT INTO users (email, password_hash, role, created_at) \
         VALUES ($1, $2, 'ADMIN', now()) ON CONFLICT (email) DO NOTHING",
    )
    .bind(&email)
    .bind(&hash)
    .execute(&pool)
    .await
    .context("inserting admin account")?;

    if result.rows_affected() == 1 {
        println!("admin account created: {email}");
    } else {
        println!("admin account already present: {email}");
    }
    Ok(())
}
