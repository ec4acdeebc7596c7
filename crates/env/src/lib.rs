use std::{env::var, str::FromStr, sync::Arc};

use dotenv::dotenv;
use eyre::{eyre, Context, Error};
use log::info;
use model::{region::RegionTable, source::DataSource};

#[derive(Clone)]
pub struct Env(Arc<EnvInner>);

#[derive(Clone)]
pub struct EnvInner {
    tg_token: String,
    mongo_url: String,
    mongo_db: String,
    data_source: DataSource,
    filter_by_source: bool,
    enable_recovered: bool,
    chart_link_daily_new: String,
    chart_base_url: Option<String>,
    vaccination_area: String,
    vaccination_target: u64,
    alert_cron: String,
    regions: RegionTable,
}

impl Env {
    pub fn tg_token(&self) -> &str {
        &self.0.tg_token
    }

    pub fn mongo_url(&self) -> &str {
        &self.0.mongo_url
    }

    pub fn mongo_db(&self) -> &str {
        &self.0.mongo_db
    }

    pub fn data_source(&self) -> DataSource {
        self.0.data_source
    }

    pub fn filter_by_source(&self) -> bool {
        self.0.filter_by_source
    }

    pub fn enable_recovered(&self) -> bool {
        self.0.enable_recovered
    }

    pub fn chart_link_daily_new(&self) -> &str {
        &self.0.chart_link_daily_new
    }

    pub fn chart_base_url(&self) -> Option<&str> {
        self.0.chart_base_url.as_deref()
    }

    pub fn vaccination_area(&self) -> &str {
        &self.0.vaccination_area
    }

    pub fn vaccination_target(&self) -> u64 {
        self.0.vaccination_target
    }

    pub fn alert_cron(&self) -> &str {
        &self.0.alert_cron
    }

    pub fn regions(&self) -> &RegionTable {
        &self.0.regions
    }

    pub fn load() -> Result<Env, Error> {
        if let Err(err) = dotenv() {
            info!("Failed to load .env file: {}", err);
        }

        let regions = match var("REGIONS_FILE") {
            Ok(path) => RegionTable::load(&path)?,
            Err(_) => RegionTable::default(),
        };

        Ok(Env(Arc::new(EnvInner {
            tg_token: var("TG_TOKEN").context("TG_TOKEN is not set")?,
            mongo_url: var("MONGO_URL").context("MONGO_URL is not set")?,
            mongo_db: var_or("MONGO_DB", "corona_db"),
            data_source: var_or("DATA_SOURCE", "HS").parse()?,
            filter_by_source: parse_var("FILTER_BY_SOURCE", false)?,
            enable_recovered: parse_var("ENABLE_RECOVERED", false)?,
            chart_link_daily_new: var_or("CHART_LINK_DAILY_NEW", "dailyNew"),
            chart_base_url: var("CHART_BASE_URL").ok(),
            vaccination_area: var_or("VACCINATION_AREA", "Finland"),
            vaccination_target: parse_var("VACCINATION_TARGET", 5_536_146)?,
            alert_cron: var_or("ALERT_CRON", "0 */15 * * * *"),
            regions,
        })))
    }
}

fn var_or(name: &str, default: &str) -> String {
    var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: T) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|err| eyre!("{} is invalid: {}", name, err)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default() {
        assert_eq!(parse_var("HOITSU_TEST_UNSET_VAR", 42u64).unwrap(), 42);
        assert_eq!(var_or("HOITSU_TEST_UNSET_VAR", "x"), "x");
    }
}
