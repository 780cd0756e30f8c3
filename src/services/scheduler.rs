use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};

use crate::api::types::LoanDto;
use crate::config::SchedulerConfig;
use crate::services::LoanService;
use crate::state::SharedState;

/// Runs the read-only overdue report on a cron schedule.
///
/// The report never changes loan state; it only logs and exports a gauge.
pub struct Scheduler {
    state: Arc<SharedState>,
    config: SchedulerConfig,
    running: Arc<RwLock<bool>>,
}

impl Scheduler {
    pub fn new(state: Arc<SharedState>, config: SchedulerConfig) -> Self {
        Self {
            state,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn start(&self) -> Result<()> {
        if !self.config.enabled {
            info!("Scheduler is disabled in config");
            return Ok(());
        }

        *self.running.write().await = true;
        info!("Starting background scheduler");

        let mut sched = JobScheduler::new().await?;

        let state = Arc::clone(&self.state);
        let running = Arc::clone(&self.running);
        let job = Job::new_async(self.config.overdue_report_cron.as_str(), move |_uuid, _lock| {
            let state = Arc::clone(&state);
            let running = Arc::clone(&running);
            Box::pin(async move {
                if !*running.read().await {
                    return;
                }
                let start = std::time::Instant::now();
                info!(event = "job_started", job_name = "overdue_report", "Starting overdue report");

                if let Err(e) = report_overdue(state.loan_service.as_ref()).await {
                    error!(event = "job_failed", job_name = "overdue_report", error = %e, "Overdue report failed");
                }

                info!(
                    event = "job_finished",
                    job_name = "overdue_report",
                    duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "Overdue report finished"
                );
            })
        })?;

        sched.add(job).await?;
        sched.start().await?;
        info!(
            "Overdue report scheduled: {}",
            self.config.overdue_report_cron
        );

        loop {
            if !*self.running.read().await {
                break;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        sched.shutdown().await?;
        Ok(())
    }

    pub async fn stop(&self) {
        info!("Stopping scheduler...");
        *self.running.write().await = false;
    }

    pub async fn run_once(&self) -> Result<Vec<LoanDto>> {
        report_overdue(self.state.loan_service.as_ref()).await
    }
}

/// Logs every active loan past its due date and publishes the count.
pub async fn report_overdue(loans: &dyn LoanService) -> Result<Vec<LoanDto>> {
    let overdue = loans
        .overdue()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list overdue loans: {e}"))?;

    for loan in &overdue {
        warn!(
            loan_id = loan.id,
            user = %loan.user_name,
            book = %loan.book_title,
            overdue_days = loan.overdue_days,
            "Loan is overdue"
        );
    }

    #[allow(clippy::cast_precision_loss)]
    metrics::gauge!("overdue_loans").set(overdue.len() as f64);
    info!("{} overdue loan(s)", overdue.len());

    Ok(overdue)
}
