//! Event pump - drives the joystick manager from the host event queue
//!
//! ```text
//! EventPump<Starting> ──start()──► EventPump<Pumping> ──run(token)──► shutdown
//!                     (init)                          (tick every poll_interval_ms)
//! ```
//!
//! Everything happens on the task that calls [`EventPump::run`]; events are
//! dispatched one at a time, in the order the host delivered them.

use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use statum::{machine, state};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::joystick::{JoystickBackend, JoystickError, JoystickManager};
use crate::state::GameState;

/// What the pump needs from the thing it drives.
pub trait InputDriver {
    fn init(&mut self) -> Result<(), JoystickError>;

    /// Dispatch every pending host event, returning how many there were.
    fn pump_events(&mut self) -> usize;

    fn shutdown(&mut self);

    fn open_count(&self) -> usize;
}

impl<B: JoystickBackend, S: GameState> InputDriver for JoystickManager<B, S> {
    fn init(&mut self) -> Result<(), JoystickError> {
        JoystickManager::init(self)
    }

    fn pump_events(&mut self) -> usize {
        JoystickManager::pump_events(self)
    }

    fn shutdown(&mut self) {
        JoystickManager::shutdown(self)
    }

    fn open_count(&self) -> usize {
        JoystickManager::open_count(self)
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PumpSettings {
    /// How often the host queue is drained
    pub poll_interval_ms: u64,
    /// Period of the stats log line, 0 disables it
    pub stats_interval_secs: u64,
}

impl Default for PumpSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 8,
            stats_interval_secs: 30,
        }
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum PumpState {
    Starting,
    Pumping,
}

#[machine]
pub struct EventPump<S: PumpState> {
    driver: Box<dyn InputDriver>,

    settings: PumpSettings,

    // Events dispatched since the last stats line
    dispatched: u64,

    last_stats: DateTime<Local>,
}

impl<S: PumpState> EventPump<S> {
    pub fn settings(&self) -> &PumpSettings {
        &self.settings
    }

    pub fn open_count(&self) -> usize {
        self.driver.open_count()
    }
}

impl EventPump<Starting> {
    pub fn create(driver: Box<dyn InputDriver>, settings: Option<PumpSettings>) -> Self {
        let settings = settings.unwrap_or_default();
        debug!("Creating event pump with settings: {:?}", settings);
        Self::new(driver, settings, 0, Local::now())
    }

    /// Initialize the joystick subsystem and start pumping.
    ///
    /// A subsystem that fails to come up is logged and otherwise ignored;
    /// the pump then simply never sees any events.
    pub fn start(mut self) -> EventPump<Pumping> {
        match self.driver.init() {
            Ok(()) => info!("Event pump started"),
            Err(e) => error!("{}, continuing without joystick input", e),
        }
        self.last_stats = Local::now();
        self.transition()
    }
}

impl EventPump<Pumping> {
    /// Drain and dispatch pending events once.
    pub fn tick(&mut self) -> usize {
        let count = self.driver.pump_events();
        self.dispatched += count as u64;
        self.log_stats(Local::now());
        count
    }

    fn log_stats(&mut self, now: DateTime<Local>) {
        let Some(log_interval) = stats_interval(self.settings.stats_interval_secs) else {
            return;
        };
        if now - self.last_stats <= log_interval {
            return;
        }

        info!(
            "Event pump stats: dispatched {} events in last {} seconds (avg {:.2}/sec), {} joysticks open",
            self.dispatched,
            log_interval.num_seconds(),
            self.dispatched as f64 / log_interval.num_seconds() as f64,
            self.driver.open_count()
        );
        self.dispatched = 0;
        self.last_stats = now;
    }

    /// Pump until `shutdown` is cancelled, then close every joystick.
    pub async fn run(mut self, shutdown: CancellationToken) {
        let period = Duration::from_millis(self.settings.poll_interval_ms.max(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("Starting event pump loop ({:?} interval)", period);
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested, stopping event pump");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick();
                }
            }
        }

        self.driver.shutdown();
    }
}

/// Stats period, or `None` when disabled (0) or too large to represent.
fn stats_interval(secs: u64) -> Option<chrono::Duration> {
    if secs == 0 {
        return None;
    }
    chrono::Duration::try_seconds(i64::try_from(secs).unwrap_or(i64::MAX))
}
