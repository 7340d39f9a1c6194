use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use super::config::SchedulerConfig;
use crate::billing::application::use_cases::expire_subscriptions::IExpireSubscriptionsUseCase;
use crate::billing::application::use_cases::renew_subscriptions::IRenewSubscriptionsUseCase;
use crate::scraper::application::use_cases::run_scrape::IRunScrapeUseCase;

pub struct Scheduler {
    config: SchedulerConfig,
    scrape: Arc<dyn IRunScrapeUseCase + Send + Sync>,
    expire: Arc<dyn IExpireSubscriptionsUseCase + Send + Sync>,
    renew: Arc<dyn IRenewSubscriptionsUseCase + Send + Sync>,
}

/// Stops the jobs started by [`Scheduler::spawn`].
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Signals every job loop and waits for in-flight runs to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        for task in self.tasks {
            if let Err(e) = task.await {
                error!(error = %e, "Scheduler task ended abnormally");
            }
        }
        info!("Scheduler stopped");
    }
}

impl Scheduler {
    pub fn new(
        config: SchedulerConfig,
        scrape: Arc<dyn IRunScrapeUseCase + Send + Sync>,
        expire: Arc<dyn IExpireSubscriptionsUseCase + Send + Sync>,
        renew: Arc<dyn IRenewSubscriptionsUseCase + Send + Sync>,
    ) -> Self {
        Self {
            config,
            scrape,
            expire,
            renew,
        }
    }

    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown, watcher) = watch::channel(false);

        info!(
            scrape_every_secs = self.config.scrape_interval.as_secs(),
            scrape_on_startup = self.config.scrape_on_startup,
            expiry_every_secs = self.config.expiry_sweep_interval.as_secs(),
            renewal_every_secs = self.config.renewal_interval.as_secs(),
            "Starting scheduler"
        );

        let scrape = self.scrape;
        let scrape_task = tokio::spawn(run_periodic(
            "scrape",
            self.config.scrape_interval,
            self.config.scrape_on_startup,
            watcher.clone(),
            move || {
                let scrape = Arc::clone(&scrape);
                async move {
                    let report = scrape.execute().await?;
                    if !report.errors.is_empty() {
                        warn!(
                            log_id = report.log_id,
                            errors = report.errors.len(),
                            "Scrape finished with errors"
                        );
                    }
                    Ok::<(), anyhow::Error>(())
                }
            },
        ));

        let expire = self.expire;
        let expiry_task = tokio::spawn(run_periodic(
            "expiry_sweep",
            self.config.expiry_sweep_interval,
            true,
            watcher.clone(),
            move || {
                let expire = Arc::clone(&expire);
                async move {
                    expire.execute().await?;
                    Ok::<(), anyhow::Error>(())
                }
            },
        ));

        let renew = self.renew;
        let renewal_task = tokio::spawn(run_periodic(
            "renewal",
            self.config.renewal_interval,
            true,
            watcher,
            move || {
                let renew = Arc::clone(&renew);
                async move {
                    let run = renew.execute().await?;
                    if run.failed > 0 {
                        warn!(failed = run.failed, "Some renewals did not go through");
                    }
                    Ok::<(), anyhow::Error>(())
                }
            },
        ));

        SchedulerHandle {
            shutdown,
            tasks: vec![scrape_task, expiry_task, renewal_task],
        }
    }
}

/// Ticks every `period` until shutdown. Each run is spawned holding the
/// job's lock; a tick that finds the lock taken is skipped.
async fn run_periodic<F, Fut>(
    name: &'static str,
    period: Duration,
    run_immediately: bool,
    mut shutdown: watch::Receiver<bool>,
    job: F,
) where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    let lock = Arc::new(Mutex::new(()));
    let first_tick = if run_immediately {
        Instant::now()
    } else {
        Instant::now() + period
    };
    let mut ticker = interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => break,
        }

        let Ok(permit) = Arc::clone(&lock).try_lock_owned() else {
            warn!(job = name, "Previous run still in progress, skipping tick");
            continue;
        };

        let run = job();
        tokio::spawn(async move {
            let _permit = permit;
            if let Err(e) = run.await {
                error!(job = name, error = %format!("{e:#}"), "Scheduled job failed");
            }
        });
    }

    // Let an in-flight run finish before reporting the loop as stopped.
    let _ = lock.lock().await;
    info!(job = name, "Job loop stopped");
}
