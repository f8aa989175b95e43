//! Create or reset the admin account.
//!
//! Reads `ADMIN_EMAIL` and `ADMIN_PASSWORD`, hashes the password with
//! bcrypt and upserts the admin row. Running it again for the same email
//! replaces the password.
//!
//! ```bash
//! ADMIN_EMAIL=host@example.com ADMIN_PASSWORD=secret cargo run --bin seed-admin
//! ```

use anyhow::{Context, bail};
use party_rsvp_auth::constants::BCRYPT_COST;
use party_rsvp_auth::password::hash_password;
use party_rsvp_auth::providers::AdminRepository;
use party_rsvp_auth::stores::PostgresAdminRepository;
use party_rsvp_server::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let email = std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL is not set")?;
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD is not set")?;
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        bail!("ADMIN_EMAIL and ADMIN_PASSWORD must not be empty");
    }

    let config = Config::from_env()?;
    let pool = party_rsvp_postgres::connect(&config.postgres.pool_config()).await?;
    party_rsvp_postgres::migrate(&pool).await?;

    let password_hash = hash_password(&password, BCRYPT_COST).await?;
    let admin_id = PostgresAdminRepository::new(pool.clone())
        .upsert_admin(email, &password_hash)
        .await?;

    tracing::info!(%admin_id, email, "Admin seeded");
    pool.close().await;
    Ok(())
}
