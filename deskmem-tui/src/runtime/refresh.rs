use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::action_queue::{Action, ActionTx};

/// Background timer that asks for a dashboard reload every `interval`.
///
/// The first reload is due one full interval after [`start`](Self::start);
/// the initial load is the caller's job. Dropping the handle stops the timer.
pub(super) struct PeriodicRefresh {
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl PeriodicRefresh {
    pub(super) fn new(interval: Duration) -> Self {
        Self {
            interval,
            task: None,
        }
    }

    pub(super) fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub(super) fn start(&mut self, action_tx: ActionTx) {
        if self.task.is_some() {
            return;
        }
        let period = self.interval;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if action_tx.send(Action::RefreshDashboard).is_err() {
                    break;
                }
            }
        }));
    }

    pub(super) fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PeriodicRefresh {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::action_queue::channel;

    fn drain(rx: &mut super::super::action_queue::ActionRx) -> usize {
        let mut n = 0;
        while let Ok(action) = rx.try_recv() {
            assert!(matches!(action, Action::RefreshDashboard));
            n += 1;
        }
        n
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_interval() {
        let (tx, mut rx) = channel();
        let mut refresh = PeriodicRefresh::new(Duration::from_secs(60));
        refresh.start(tx);

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(drain(&mut rx), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(drain(&mut rx), 1);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(drain(&mut rx), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_pending_ticks() {
        let (tx, mut rx) = channel();
        let mut refresh = PeriodicRefresh::new(Duration::from_secs(60));
        refresh.start(tx);
        assert!(refresh.is_running());

        tokio::time::sleep(Duration::from_secs(30)).await;
        refresh.stop();
        assert!(!refresh.is_running());

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(drain(&mut rx), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_keeps_one_timer() {
        let (tx, mut rx) = channel();
        let mut refresh = PeriodicRefresh::new(Duration::from_secs(10));
        refresh.start(tx.clone());
        refresh.start(tx);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(drain(&mut rx), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_timer() {
        let (tx, mut rx) = channel();
        {
            let mut refresh = PeriodicRefresh::new(Duration::from_secs(10));
            refresh.start(tx);
        }
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(drain(&mut rx), 0);
    }
}
