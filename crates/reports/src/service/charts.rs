use eyre::Context as _;
use model::{errors::ReportError, reply::Reply};

use super::Reports;

pub const CHART_CAPTION: &str = "Uudet tartunnat Suomessa 30 päivän ajalta";

impl Reports {
    /// Serves the precomputed chart image and bumps its usage counter.
    pub async fn charts(&self) -> Result<Reply, ReportError> {
        let settings = &self.settings;
        let link = self.store.chart_link(&settings.chart_name).await?;
        let location = match &settings.chart_base_url {
            Some(base) => base
                .join(&link.url)
                .with_context(|| format!("Invalid chart key {}", link.url))?
                .to_string(),
            None => link.url.clone(),
        };
        self.store.mark_chart_used(&link).await?;
        Ok(Reply::image(location, CHART_CAPTION))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use model::{chart::ChartLink, errors::ReportError, reply::MessageKind};
    use url::Url;

    use super::*;
    use crate::{service::fake::FakeStore, Settings};

    fn store() -> FakeStore {
        FakeStore {
            charts: vec![ChartLink {
                chart_name: "dailyNew".to_string(),
                url: "daily-new-2021-01-11.png".to_string(),
                used: 3,
            }],
            ..FakeStore::default()
        }
    }

    #[tokio::test]
    async fn test_chart_with_base_url() {
        let store = Arc::new(store());
        let settings = Settings {
            chart_base_url: Some(Url::parse("https://charts.example.com/corona/").unwrap()),
            ..Settings::default()
        };
        let reports = Reports::new(store.clone(), settings);

        let reply = reports.charts().await.unwrap();
        assert_eq!(reply.kind, MessageKind::Image);
        assert_eq!(
            reply.message,
            "https://charts.example.com/corona/daily-new-2021-01-11.png"
        );
        assert_eq!(reply.caption.as_deref(), Some(CHART_CAPTION));
        assert_eq!(store.writes(), vec!["chart:dailyNew".to_string()]);
    }

    #[tokio::test]
    async fn test_chart_without_base_url() {
        let reports = Reports::new(Arc::new(store()), Settings::default());
        let reply = reports.charts().await.unwrap();
        assert_eq!(reply.message, "daily-new-2021-01-11.png");
    }

    #[tokio::test]
    async fn test_missing_chart() {
        let store = Arc::new(FakeStore::default());
        let reports = Reports::new(store.clone(), Settings::default());

        let result = reports.charts().await;
        assert!(matches!(result, Err(ReportError::ChartNotFound(name)) if name == "dailyNew"));
        assert!(store.writes().is_empty());
    }
}
