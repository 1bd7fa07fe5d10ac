use billboard_booking::{
    config::{self, database},
    core::billboard,
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    // 3. Load booking settings and catalog seeds
    let app_config = config::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(
        "Booking policy: reject_past_starts={}, checkout_timeout={:?}",
        app_config.booking.reject_past_starts,
        app_config.booking.checkout_timeout()
    );

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the catalog on first run
    billboard::seed_billboards(&db, &app_config.billboards)
        .await
        .inspect_err(|e| error!("Failed to seed billboards: {}", e))?;

    let featured = billboard::get_random_billboards(&db, 5).await?;
    for item in &featured {
        let occupied = billboard::get_occupied_periods(&db, item.id).await?;
        info!(
            "Billboard {} at '{}': {} per month, {} committed bookings",
            item.id,
            item.address,
            item.monthly_rate(),
            occupied.len()
        );
    }

    Ok(())
}
