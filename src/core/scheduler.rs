use crate::core::etl::EtlEngine;
use crate::domain::model::RunSummary;
use crate::domain::ports::Pipeline;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Fires the ETL engine once per period on a single ticker.
///
/// The first run happens one full period after construction. Runs execute
/// inline on the loop task and the next run is due one period after the
/// previous one finishes, so runs never overlap. A hanging API call
/// therefore stalls every later run; there is no cancellation.
pub struct Scheduler<P: Pipeline> {
    engine: EtlEngine<P>,
    ticker: Interval,
    state: SchedulerState,
    runs: u64,
}

impl<P: Pipeline> Scheduler<P> {
    /// Panics if `period` is zero.
    pub fn new(engine: EtlEngine<P>, period: Duration) -> Self {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!("Tasks scheduled successfully (every {:?}).", period);
        println!("Tasks scheduled successfully.");

        Self {
            engine,
            ticker,
            state: SchedulerState::Idle,
            runs: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Waits for the next tick, then runs the pipeline once.
    pub async fn tick(&mut self) -> RunSummary {
        self.ticker.tick().await;

        self.state = SchedulerState::Running;
        self.runs += 1;
        tracing::debug!("Scheduled run #{} started", self.runs);

        let summary = self.engine.run().await;
        self.ticker.reset();

        self.state = SchedulerState::Idle;
        tracing::debug!("Scheduled run #{} finished", self.runs);
        summary
    }

    pub async fn run_forever(mut self) {
        loop {
            self.tick().await;
        }
    }
}
