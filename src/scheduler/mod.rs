//! Background jobs: the EOF scrape, the subscription-expiry sweep and
//! the annual renewal charge.

mod config;
mod runner;

pub use config::SchedulerConfig;
pub use runner::{Scheduler, SchedulerHandle};
