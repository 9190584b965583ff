use super::{MAX_CATCH_UP_STEPS, MAX_FRAME_DT};

/// Permission to run the next frame's ticks, valid for one scheduler generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Continuation {
    generation: u64,
}

/// Fixed steps owed for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickBatch {
    pub count: u32,
    pub dt: f64,
}

/// Fixed-step driver. Stopping flips one flag and invalidates every outstanding continuation.
#[derive(Debug)]
pub struct TickScheduler {
    step: f64,
    live: bool,
    generation: u64,
    accumulator: f64,
}

impl TickScheduler {
    pub fn new(tick_rate: f64) -> Self {
        Self {
            step: 1.0 / tick_rate,
            live: false,
            generation: 0,
            accumulator: 0.0,
        }
    }

    pub fn start(&mut self) -> Continuation {
        self.live = true;
        self.generation += 1;
        self.accumulator = 0.0;
        Continuation {
            generation: self.generation,
        }
    }

    pub fn stop(&mut self) {
        self.live = false;
        self.generation += 1;
    }

    fn is_current(&self, continuation: Continuation) -> bool {
        self.live && continuation.generation == self.generation
    }

    pub fn resume(&mut self, continuation: Continuation, frame_dt: f64) -> Option<TickBatch> {
        if !self.is_current(continuation) {
            return None;
        }

        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        let owed = (self.accumulator / self.step).floor() as u32;
        let count = owed.min(MAX_CATCH_UP_STEPS);
        if owed > MAX_CATCH_UP_STEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = 0.0;
        } else {
            self.accumulator -= count as f64 * self.step;
        }

        Some(TickBatch {
            count,
            dt: self.step,
        })
    }

    pub fn reschedule(&self) -> Option<Continuation> {
        self.live.then_some(Continuation {
            generation: self.generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_fixed_steps() {
        let mut scheduler = TickScheduler::new(60.0);
        let cont = scheduler.start();
        let batch = scheduler.resume(cont, 1.0 / 30.0).unwrap();
        assert_eq!(batch.count, 2);
        assert!((batch.dt - 1.0 / 60.0).abs() < 1e-12);

        let cont = scheduler.reschedule().unwrap();
        let batch = scheduler.resume(cont, 1.0 / 240.0).unwrap();
        assert_eq!(batch.count, 0);
        let batch = scheduler.resume(cont, 1.0 / 60.0).unwrap();
        assert_eq!(batch.count, 1);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut scheduler = TickScheduler::new(60.0);
        let cont = scheduler.start();
        let batch = scheduler.resume(cont, 10.0).unwrap();
        assert_eq!(batch.count, MAX_CATCH_UP_STEPS);
        // Excess time was dropped
        let batch = scheduler.resume(cont, 0.0).unwrap();
        assert_eq!(batch.count, 0);
    }

    #[test]
    fn test_stop_invalidates_continuations() {
        let mut scheduler = TickScheduler::new(60.0);
        let cont = scheduler.start();
        scheduler.stop();
        assert!(scheduler.resume(cont, 0.1).is_none());
        assert!(scheduler.reschedule().is_none());

        let fresh = scheduler.start();
        assert!(scheduler.resume(cont, 0.1).is_none());
        assert!(scheduler.resume(fresh, 0.1).is_some());
    }

    #[test]
    fn test_restart_rejects_old_generation() {
        let mut scheduler = TickScheduler::new(60.0);
        let old = scheduler.start();
        let new = scheduler.start();
        assert_ne!(old, new);
        assert!(scheduler.resume(old, 0.1).is_none());
        assert_eq!(scheduler.reschedule(), Some(new));
    }
}
