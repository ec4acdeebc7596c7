use std::sync::Arc;

use bot::gateway::TgGateway;
use dotenv::dotenv;
use env::Env;
use eyre::Context;
use log::info;
use reports::{Reports, Settings};
use url::Url;

fn settings(env: &Env) -> eyre::Result<Settings> {
    let chart_base_url = env
        .chart_base_url()
        .map(Url::parse)
        .transpose()
        .context("CHART_BASE_URL is invalid")?;
    Ok(Settings {
        data_source: env.data_source(),
        filter_by_source: env.filter_by_source(),
        enable_recovered: env.enable_recovered(),
        regions: env.regions().clone(),
        chart_name: env.chart_link_daily_new().to_string(),
        chart_base_url,
        vaccination_area: env.vaccination_area().to_string(),
        vaccination_target: env.vaccination_target(),
        ..Settings::default()
    })
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Err(err) = dotenv() {
        info!("Failed to load .env file: {}", err);
    }
    pretty_env_logger::init();
    color_eyre::install()?;

    let env = Env::load().context("Failed to load env")?;
    info!("connecting to mongo");
    let storage = storage::Storage::new(env.mongo_url(), env.mongo_db())
        .await
        .context("Failed to create storage")?;
    info!("creating reports");
    let reports = Reports::new(Arc::new(storage), settings(&env)?);

    let _scheduler = bg_process::start(
        reports.clone(),
        Arc::new(TgGateway::from_token(env.tg_token())),
        env.alert_cron(),
    )
    .await
    .context("Failed to start scheduler")?;

    info!("Starting bot...");
    bot::start_bot(reports, env.tg_token().to_string()).await?;

    Ok(())
}
