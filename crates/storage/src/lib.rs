pub mod cases;
pub mod chart;
pub mod db;
pub mod notificator;
pub mod operation;
pub mod vaccination;

use cases::CaseStore;
use chart::ChartStore;
use db::Db;
use eyre::Result;
use notificator::NotificatorStore;
use operation::OperationStore;
use vaccination::VaccinationStore;

#[derive(Clone)]
pub struct Storage {
    pub db: Db,
    pub operations: OperationStore,
    pub cases: CaseStore,
    pub vaccinations: VaccinationStore,
    pub charts: ChartStore,
    pub notificators: NotificatorStore,
}

impl Storage {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        let db = Db::new(uri, db_name).await?;
        let operations = OperationStore::new(&db).await?;
        let cases = CaseStore::new(&db).await?;
        let vaccinations = VaccinationStore::new(&db).await?;
        let charts = ChartStore::new(&db).await?;
        let notificators = NotificatorStore::new(&db).await?;

        Ok(Storage {
            db,
            operations,
            cases,
            vaccinations,
            charts,
            notificators,
        })
    }
}
