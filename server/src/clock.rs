//! Fixed-period match clock with an explicit attached/detached lifecycle

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// The one autonomous source of time-based mutation.
///
/// The attachment state is a tagged enum rather than a nullable handle so the
/// idempotency contract is a real state transition: attaching while attached
/// and detaching while detached are both no-ops. At most one interval ever
/// exists, which is what guarantees one decrement per period no matter how
/// many start commands arrive.
#[derive(Debug)]
pub enum GameClock {
    Detached,
    Attached { interval: Interval },
}

impl GameClock {
    pub fn new() -> Self {
        GameClock::Detached
    }

    /// Attaches the clock; the first fire comes one full period later.
    /// Returns false (and changes nothing) if already attached.
    pub fn attach(&mut self, period: Duration) -> bool {
        match self {
            GameClock::Attached { .. } => false,
            GameClock::Detached => {
                let mut interval = interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                *self = GameClock::Attached { interval };
                true
            }
        }
    }

    /// Cancels all future fires synchronously. Returns false if there was
    /// nothing to detach.
    pub fn detach(&mut self) -> bool {
        match self {
            GameClock::Detached => false,
            GameClock::Attached { .. } => {
                *self = GameClock::Detached;
                true
            }
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self, GameClock::Attached { .. })
    }

    /// Completes once per period while attached; never completes while
    /// detached, so a `select!` arm over this simply goes quiet after a
    /// detach.
    pub async fn tick(&mut self) {
        match self {
            GameClock::Attached { interval } => {
                interval.tick().await;
            }
            GameClock::Detached => std::future::pending().await,
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_pending;

    const PERIOD: Duration = Duration::from_millis(20);

    #[tokio::test]
    async fn attach_is_idempotent() {
        let mut clock = GameClock::new();

        assert!(clock.attach(PERIOD));
        assert!(clock.is_attached());

        // A second start command must not create a second interval.
        assert!(!clock.attach(PERIOD));
        assert!(clock.is_attached());
    }

    #[tokio::test]
    async fn detach_is_idempotent() {
        let mut clock = GameClock::new();

        assert!(!clock.detach());

        clock.attach(PERIOD);
        assert!(clock.detach());
        assert!(!clock.detach());
        assert!(!clock.is_attached());
    }

    #[tokio::test]
    async fn reattach_after_detach_works() {
        let mut clock = GameClock::new();

        clock.attach(PERIOD);
        clock.detach();

        assert!(clock.attach(PERIOD));
        assert!(clock.is_attached());
    }

    #[test]
    fn detached_clock_never_fires() {
        let mut clock = GameClock::new();

        let mut tick = tokio_test::task::spawn(clock.tick());
        assert_pending!(tick.poll());
        assert_pending!(tick.poll());
    }

    #[tokio::test]
    async fn attached_clock_fires_once_per_period() {
        let mut clock = GameClock::new();

        let start = Instant::now();
        clock.attach(PERIOD);
        clock.tick().await;
        clock.tick().await;

        // Two fires cannot arrive faster than two periods.
        assert!(start.elapsed() >= PERIOD * 2);
    }

    #[tokio::test]
    async fn first_fire_is_delayed_by_one_period() {
        let mut clock = GameClock::new();

        let start = Instant::now();
        clock.attach(PERIOD);
        clock.tick().await;

        assert!(start.elapsed() >= PERIOD);
    }
}
