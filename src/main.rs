use dotenvy::dotenv;
use gallon_quota::{
    bot, config,
    core::{
        clock::{Clock, SystemClock},
        employee::{self, NewEmployee},
    },
    errors::{Error, Result},
};
use std::{env, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Connect and make sure the schema exists
    let database = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&database)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;
    info!("Database initialized successfully.");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 4. Seed employees from config.toml, if present
    match config::employees::load_default_config() {
        Ok(seed_config) => {
            let seeds: Vec<NewEmployee> =
                seed_config.employees.into_iter().map(Into::into).collect();
            let created = employee::seed_employees(&database, seeds, clock.as_ref()).await?;
            info!("Seeded {created} employee(s) from config.toml");
        }
        Err(e) => warn!("Skipping employee seeding: {e}"),
    }

    // 5. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, database, clock).await
}
