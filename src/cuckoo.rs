//! The once-per-hour bird sequence.
//!
//! ```text
//! Idle -> Extending -> (Announcing[k] -> Pausing[k]) x N -> Retracting -> Idle
//! ```
//!
//! N is the 12-hour-normalized hour count. The sequence is strictly serial:
//! each step holds the single thread of control for its configured duration,
//! and there is no cancellation path. Configuration validation guarantees
//! the twelve-o'clock worst case fits the one-minute scheduler interval.

use crate::config::BirdTiming;
use crate::geometry::normalize_hour;
use crate::hardware::Beak;
use crate::hardware::Chime;
use crate::hardware::HardwareError;
use crate::hardware::Motor;

const EXTEND_THROTTLE: f32 = 1.0;
const RETRACT_THROTTLE: f32 = -1.0;
const STOPPED: f32 = 0.0;
const BEAK_OPEN: f32 = 1.0;
const BEAK_CLOSED: f32 = 0.0;

pub struct CuckooSequencer<'hw> {
    motor: &'hw mut dyn Motor,
    beak: &'hw mut dyn Beak,
    chime: &'hw mut dyn Chime,
    timing: BirdTiming,
}

impl<'hw> CuckooSequencer<'hw> {
    pub fn new(
        motor: &'hw mut dyn Motor,
        beak: &'hw mut dyn Beak,
        chime: &'hw mut dyn Chime,
        timing: BirdTiming,
    ) -> Self {
        Self {
            motor,
            beak,
            chime,
            timing,
        }
    }

    /// Runs the whole sequence for a 24-hour clock value, to completion.
    pub async fn run(&mut self, hour: u8) -> Result<(), HardwareError> {
        let count = normalize_hour(hour);
        tracing::info!(hour, count, "Running cuckoo sequence");

        self.extend().await?;

        // Once the bird is out, retracting must be attempted no matter what
        // happens in the announce loop.
        let announced = self.announce(count).await;
        let retracted = self.retract().await;
        announced.and(retracted)
    }

    async fn extend(&mut self) -> Result<(), HardwareError> {
        self.motor.set_throttle(EXTEND_THROTTLE)?;
        tokio::time::sleep(self.timing.extend_time).await;
        self.motor.set_throttle(STOPPED)
    }

    async fn retract(&mut self) -> Result<(), HardwareError> {
        self.motor.set_throttle(RETRACT_THROTTLE)?;
        tokio::time::sleep(self.timing.extend_time).await;
        self.motor.set_throttle(STOPPED)
    }

    async fn announce(&mut self, count: u8) -> Result<(), HardwareError> {
        for _ in 0..count {
            self.beak.set_fraction(BEAK_OPEN)?;
            self.chime.play()?;
            tokio::time::sleep(self.timing.open_hold).await;

            self.beak.set_fraction(BEAK_CLOSED)?;
            tokio::time::sleep(self.timing.close_hold).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::CuckooSequencer;
    use crate::config::BirdTiming;
    use crate::hardware::Beak;
    use crate::hardware::Chime;
    use crate::hardware::HardwareError;
    use crate::hardware::Motor;

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Throttle(f32),
        Beak(f32),
        Chime,
    }

    type Log = Rc<RefCell<Vec<Action>>>;

    struct MockMotor {
        log: Log,
    }

    impl Motor for MockMotor {
        fn set_throttle(&mut self, throttle: f32) -> Result<(), HardwareError> {
            self.log.borrow_mut().push(Action::Throttle(throttle));
            Ok(())
        }
    }

    struct MockBeak {
        log: Log,
    }

    impl Beak for MockBeak {
        fn set_fraction(&mut self, fraction: f32) -> Result<(), HardwareError> {
            self.log.borrow_mut().push(Action::Beak(fraction));
            Ok(())
        }
    }

    struct MockChime {
        log: Log,
        // Play call index (1-based) that fails, if any.
        fail_on: Option<usize>,
        plays: usize,
    }

    impl Chime for MockChime {
        fn play(&mut self) -> Result<(), HardwareError> {
            self.plays += 1;
            if self.fail_on == Some(self.plays) {
                return Err(HardwareError::MissingClip {
                    path: camino::Utf8PathBuf::from("gone.wav"),
                });
            }
            self.log.borrow_mut().push(Action::Chime);
            Ok(())
        }
    }

    fn harness(fail_on: Option<usize>) -> (Log, MockMotor, MockBeak, MockChime) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        (
            Rc::clone(&log),
            MockMotor {
                log: Rc::clone(&log),
            },
            MockBeak {
                log: Rc::clone(&log),
            },
            MockChime {
                log,
                fail_on,
                plays: 0,
            },
        )
    }

    // The shipped defaults; paused test time makes them free to run.
    fn stock_timing() -> BirdTiming {
        BirdTiming {
            extend_time: Duration::from_millis(350),
            open_hold: Duration::from_secs(1),
            close_hold: Duration::from_secs(1),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn three_oclock_announces_three_times() {
        let (log, mut motor, mut beak, mut chime) = harness(None);
        CuckooSequencer::new(&mut motor, &mut beak, &mut chime, stock_timing())
            .run(3)
            .await
            .unwrap();

        let mut expected = vec![Action::Throttle(1.0), Action::Throttle(0.0)];
        for _ in 0..3 {
            expected.extend([Action::Beak(1.0), Action::Chime, Action::Beak(0.0)]);
        }
        expected.extend([Action::Throttle(-1.0), Action::Throttle(0.0)]);

        assert_eq!(*log.borrow(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn afternoon_hours_fold_onto_the_twelve_hour_face() {
        let (log, mut motor, mut beak, mut chime) = harness(None);
        CuckooSequencer::new(&mut motor, &mut beak, &mut chime, stock_timing())
            .run(15)
            .await
            .unwrap();

        let chimes = log
            .borrow()
            .iter()
            .filter(|action| **action == Action::Chime)
            .count();
        assert_eq!(chimes, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn every_count_is_bracketed_by_extend_and_retract() {
        for hour in 1..=12u8 {
            let (log, mut motor, mut beak, mut chime) = harness(None);
            CuckooSequencer::new(&mut motor, &mut beak, &mut chime, stock_timing())
                .run(hour)
                .await
                .unwrap();

            let log = log.borrow();
            assert_eq!(log[..2], [Action::Throttle(1.0), Action::Throttle(0.0)]);
            assert_eq!(
                log[log.len() - 2..],
                [Action::Throttle(-1.0), Action::Throttle(0.0)],
            );

            let opens = log.iter().filter(|a| **a == Action::Beak(1.0)).count();
            let closes = log.iter().filter(|a| **a == Action::Beak(0.0)).count();
            let chimes = log.iter().filter(|a| **a == Action::Chime).count();
            assert_eq!(opens, usize::from(hour));
            assert_eq!(closes, usize::from(hour));
            assert_eq!(chimes, usize::from(hour));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn a_failed_chime_still_retracts_the_bird() {
        let (log, mut motor, mut beak, mut chime) = harness(Some(2));
        let result = CuckooSequencer::new(&mut motor, &mut beak, &mut chime, stock_timing())
            .run(5)
            .await;

        assert!(matches!(result, Err(HardwareError::MissingClip { .. })));

        let log = log.borrow();
        // The loop stopped at the second repetition...
        assert_eq!(log.iter().filter(|a| **a == Action::Chime).count(), 1);
        // ...but the bird still came back in.
        assert_eq!(
            log[log.len() - 2..],
            [Action::Throttle(-1.0), Action::Throttle(0.0)],
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sequence_duration_matches_the_worst_case_formula() {
        let timing = stock_timing();
        let (_log, mut motor, mut beak, mut chime) = harness(None);

        let started = tokio::time::Instant::now();
        CuckooSequencer::new(&mut motor, &mut beak, &mut chime, timing)
            .run(12)
            .await
            .unwrap();

        assert_eq!(started.elapsed(), timing.worst_case());
    }
}
