use std::sync::Arc;

use chrono::NaiveDateTime;
use eyre::eyre;
use log::{debug, info};
use model::{
    case::{CaseCategory, CaseRecord, CaseSet},
    errors::ReportError,
    reply::{Reply, NOT_A_COMMAND},
};

use crate::{command::Command, settings::Settings, store::StatsStore};

mod alert;
mod charts;
mod doubling;
mod stats;
mod subscription;
mod vaccinations;

#[cfg(test)]
pub(crate) mod fake;

/// Chat a command arrived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatInfo {
    pub id: i64,
    pub title: String,
}

/// Report orchestrator. Every report receives `now` from the caller and
/// computes its thresholds from it.
#[derive(Clone)]
pub struct Reports {
    store: Arc<dyn StatsStore>,
    settings: Arc<Settings>,
}

impl Reports {
    pub fn new(store: Arc<dyn StatsStore>, settings: Settings) -> Self {
        Reports {
            store,
            settings: Arc::new(settings),
        }
    }

    /// Runs the command in `text`. Only the new case alert runs without a chat.
    pub async fn process(
        &self,
        text: &str,
        chat: Option<ChatInfo>,
        now: NaiveDateTime,
    ) -> Result<Reply, ReportError> {
        let command = match Command::parse(text) {
            Some(command) => command,
            None => return Ok(Reply::noop(NOT_A_COMMAND)),
        };
        debug!("Processing {:?} in {:?}", command, chat);

        let chat = match chat {
            Some(chat) => chat,
            None if command.is_chatless() => return self.new_cases_alert(now).await,
            None => return Err(eyre!("No chat id for {:?}", command).into()),
        };

        match command {
            Command::Stats => self.snapshot(now).await,
            Command::Charts => self.charts().await,
            Command::DoublingTime(region) => self.doubling_time(region.as_deref(), now).await,
            Command::Vaccinations => self.vaccinations(now).await,
            Command::StartUpdates => self.set_updates(chat.id, chat.title, true).await,
            Command::StopUpdates => self.set_updates(chat.id, chat.title, false).await,
            Command::NotifyNewCases | Command::Unknown(_) => {
                info!("Ignoring {:?} in chat {}", command, chat.id);
                Ok(Reply::noop(NOT_A_COMMAND))
            }
        }
    }

    /// Fetches every enabled case category at once.
    pub(crate) async fn fetch_cases(&self) -> Result<CaseSet, ReportError> {
        let (confirmed, dead, recovered) = tokio::try_join!(
            self.fetch_category(CaseCategory::Confirmed),
            self.fetch_category(CaseCategory::Dead),
            async {
                if self.settings.enable_recovered {
                    self.fetch_category(CaseCategory::Recovered).await.map(Some)
                } else {
                    Ok::<_, ReportError>(None)
                }
            }
        )?;
        Ok(CaseSet {
            confirmed,
            dead,
            recovered,
        })
    }

    pub(crate) async fn fetch_category(
        &self,
        category: CaseCategory,
    ) -> Result<Vec<CaseRecord>, ReportError> {
        self.store
            .cases(category, self.settings.source_filter())
            .await
    }
}

pub(crate) fn category_title(category: CaseCategory) -> &'static str {
    match category {
        CaseCategory::Confirmed => "Tartunnat",
        CaseCategory::Dead => "Kuolleet",
        CaseCategory::Recovered => "Parantuneet",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fake::{at, case, FakeStore};
    use model::{reply::Status, source::DataSource};

    fn chat() -> Option<ChatInfo> {
        Some(ChatInfo {
            id: 42,
            title: "Testiryhmä".to_string(),
        })
    }

    #[tokio::test]
    async fn test_not_a_command() {
        let store = Arc::new(FakeStore::default());
        let reports = Reports::new(store.clone(), Settings::default());

        let reply = reports
            .process("hello there", chat(), at("2021-01-11 10:00:00"))
            .await
            .unwrap();
        assert_eq!(reply.status, Status::Noop);
        assert_eq!(reply.message, NOT_A_COMMAND);
        assert_eq!(store.reads(), 0);
    }

    #[tokio::test]
    async fn test_unknown_command_is_noop() {
        let store = Arc::new(FakeStore::default());
        let reports = Reports::new(store.clone(), Settings::default());

        let reply = reports
            .process("/help", chat(), at("2021-01-11 10:00:00"))
            .await
            .unwrap();
        assert_eq!(reply.status, Status::Noop);
        assert_eq!(store.reads(), 0);
    }

    #[tokio::test]
    async fn test_chat_required() {
        let store = Arc::new(FakeStore::default());
        let reports = Reports::new(store.clone(), Settings::default());

        let result = reports
            .process("/stats", None, at("2021-01-11 10:00:00"))
            .await;
        assert!(matches!(result, Err(ReportError::Eyre(_))));
        assert_eq!(store.reads(), 0);
    }

    #[tokio::test]
    async fn test_chatless_alert() {
        let store = Arc::new(FakeStore::default());
        let reports = Reports::new(store.clone(), Settings::default());

        let result = reports
            .process("/notifynewcases", None, at("2021-01-11 10:00:00"))
            .await;
        assert!(matches!(result, Err(ReportError::NoSubscribers(_))));
    }

    #[tokio::test]
    async fn test_recovered_fetched_only_when_enabled() {
        let store = Arc::new(FakeStore::default());
        let reports = Reports::new(store.clone(), Settings::default());
        let cases = reports.fetch_cases().await.unwrap();
        assert!(cases.recovered.is_none());
        assert_eq!(store.reads(), 2);

        let settings = Settings {
            enable_recovered: true,
            ..Settings::default()
        };
        let reports = Reports::new(store.clone(), settings);
        let cases = reports.fetch_cases().await.unwrap();
        assert_eq!(cases.recovered, Some(vec![]));
        assert_eq!(store.reads(), 5);
    }

    #[tokio::test]
    async fn test_cases_filtered_by_source() {
        let from = |source: &str, region: &str| CaseRecord {
            source: Some(source.to_string()),
            ..case(
                CaseCategory::Confirmed,
                region,
                "2021-01-10 10:00:00",
                "2021-01-10 12:00:00",
            )
        };
        let store = Arc::new(FakeStore {
            cases: vec![from("DB", "HUS"), from("S3", "Lappi")],
            ..FakeStore::default()
        });

        let reports = Reports::new(store.clone(), Settings::default());
        assert_eq!(reports.fetch_cases().await.unwrap().confirmed.len(), 2);

        let settings = Settings {
            data_source: DataSource::Thl,
            filter_by_source: true,
            ..Settings::default()
        };
        let reports = Reports::new(store.clone(), settings);
        let confirmed = reports.fetch_cases().await.unwrap().confirmed;
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].region.as_deref(), Some("Lappi"));
    }
}
