use std::pin::Pin;
use std::time::Duration;
use tokio::time::{Instant, Sleep, sleep};

use super::Scheduler;

/// Tokio-backed one-shot tick timer.
///
/// Unlike `tokio::time::Interval` it never catches up on missed ticks: each
/// arm produces exactly one firing, measured from the moment of arming.
#[derive(Debug, Default)]
pub struct TickTimer {
    sleep: Option<Pin<Box<Sleep>>>,
    delay: Duration,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves when the armed delay elapses. Pends forever while disarmed,
    /// so it can sit in a `tokio::select!` branch unconditionally.
    pub async fn fired(&mut self) {
        match self.sleep.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.sleep = None;
            }
            None => std::future::pending().await,
        }
    }

    /// Measure the armed delay again from now. The game loop calls this once
    /// the frame for a tick is drawn, so drawing never eats into the interval.
    pub fn restart(&mut self) {
        if let Some(sleep) = self.sleep.as_mut() {
            sleep.as_mut().reset(Instant::now() + self.delay);
        }
    }
}

impl Scheduler for TickTimer {
    fn arm(&mut self, delay: Duration) {
        self.delay = delay;
        self.sleep = Some(Box::pin(sleep(delay)));
    }

    fn disarm(&mut self) {
        self.sleep = None;
    }

    fn is_armed(&self) -> bool {
        self.sleep.is_some()
    }
}
