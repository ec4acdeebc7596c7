use std::sync::Arc;

use async_trait::async_trait;
use bot::gateway::Gateway;
use eyre::Error;
use log::{error, info};
use reports::Reports;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

pub mod alert;

use alert::NewCasesAlert;

#[async_trait]
pub trait Task: Send + 'static {
    const NAME: &'static str;

    /// Six field cron expression, seconds first.
    fn cron(&self) -> String;

    async fn process(&mut self) -> Result<(), Error>;
}

pub async fn start(
    reports: Reports,
    gateway: Arc<dyn Gateway>,
    alert_cron: &str,
) -> Result<JobScheduler, Error> {
    let scheduler = JobScheduler::new().await?;
    add_task(
        &scheduler,
        NewCasesAlert::new(reports, gateway, alert_cron.to_string()),
    )
    .await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn add_task<T: Task>(scheduler: &JobScheduler, task: T) -> Result<(), Error> {
    let cron = task.cron();
    info!("Scheduling {} at {}", T::NAME, cron);
    let task = Arc::new(Mutex::new(task));
    let job = Job::new_async(cron.as_str(), move |_, _| {
        let task = task.clone();
        Box::pin(async move {
            let mut task = task.lock().await;
            if let Err(err) = task.process().await {
                error!("Task {} failed: {:#}", T::NAME, err);
            }
        })
    })?;
    scheduler.add(job).await?;
    Ok(())
}
