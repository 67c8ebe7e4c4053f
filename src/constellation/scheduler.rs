/// Drives `Constellation::tick`. The constellation starts and stops it; ticks
/// arriving while it is stopped are dropped.
pub trait Scheduler {
    fn start(&mut self);

    /// Must be safe to call when already stopped.
    fn stop(&mut self);

    fn is_running(&self) -> bool;
}

/// A scheduler for hosts and tests that call `tick(dt)` themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    running: bool,
    starts: usize,
}

impl ManualScheduler {
    pub fn starts(&self) -> usize {
        self.starts
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut scheduler = ManualScheduler::default();
        scheduler.stop();
        assert!(!scheduler.is_running());

        scheduler.start();
        scheduler.start();
        assert!(scheduler.is_running());
        assert_eq!(scheduler.starts(), 1);

        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
    }
}
