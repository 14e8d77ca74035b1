use std::net::TcpListener;
use std::time::Duration;

use anyhow::Context;

use sqlx::postgres::PgPoolOptions;

use leadbox::app;
use leadbox::client::EmailClient;
use leadbox::settings::Settings;
use leadbox::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load().expect("Failed to load settings");

    // Bounded acquire so a saturated pool cannot hang a request indefinitely
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(settings.database.with_db());

    let email_client = EmailClient::new(
        settings.email.sender(),
        settings.email.recipient(),
        settings.email.api_timeout(),
        settings.email.api_base_url(),
        settings.email.api_auth_token(),
    )?;

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(
        listener,
        pool,
        email_client,
        settings.auth.secrets(),
        settings.app.static_dir(),
    )?
    .await
    .context("Failed to run app")
}
