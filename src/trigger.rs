use std::time::{Duration, Instant};

use crate::config::TriggerMode;
use crate::error::{OspreyError, Result};

/// Decides, after each accumulated read, whether a scaffold pass fires now.
#[derive(Debug)]
pub enum TriggerPolicy {
    /// Fires when the wall-clock interval since the last firing has passed.
    Time { interval: Duration, last_fired: Instant },
    /// Fires every `every`-th accumulated read file.
    Reads { every: usize },
}

impl TriggerPolicy {
    /// Build the policy for the configured run mode.
    ///
    /// A zero read interval would fire on every event through a zero modulus;
    /// it is rejected here so evaluation never sees it.
    pub fn new(mode: &TriggerMode) -> Result<Self> {
        match *mode {
            TriggerMode::Time(interval) => Ok(TriggerPolicy::Time {
                interval,
                last_fired: Instant::now(),
            }),
            TriggerMode::Reads(0) => {
                Err(OspreyError::Config("read-count intensity must be nonzero".into()))
            }
            TriggerMode::Reads(every) => Ok(TriggerPolicy::Reads { every }),
        }
    }

    /// Evaluate against the post-increment file count: the file that just
    /// arrived is already included in `fasta_count`.
    ///
    /// In time mode, firing resets the clock unconditionally, whether or not
    /// the pass that follows succeeds.
    pub fn should_fire(&mut self, fasta_count: usize) -> bool {
        match self {
            TriggerPolicy::Time { interval, last_fired } => {
                if last_fired.elapsed() > *interval {
                    *last_fired = Instant::now();
                    true
                } else {
                    false
                }
            }
            TriggerPolicy::Reads { every } => fasta_count % *every == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_read_mode_fires_on_exact_multiples() {
        let mut policy = TriggerPolicy::new(&TriggerMode::Reads(5)).unwrap();
        let fired: Vec<usize> = (1..=12).filter(|&n| policy.should_fire(n)).collect();
        assert_eq!(fired, vec![5, 10]);
    }

    #[test]
    fn test_read_mode_rejects_zero_interval() {
        let err = TriggerPolicy::new(&TriggerMode::Reads(0)).unwrap_err();
        assert!(matches!(err, OspreyError::Config(_)));
    }

    #[test]
    fn test_time_mode_waits_out_the_interval() {
        let mut policy =
            TriggerPolicy::new(&TriggerMode::Time(Duration::from_millis(40))).unwrap();
        assert!(!policy.should_fire(1));
        sleep(Duration::from_millis(60));
        assert!(policy.should_fire(2));
        // The clock reset on firing; the next event is too soon.
        assert!(!policy.should_fire(3));
    }

    #[test]
    fn test_time_mode_reset_is_unconditional() {
        let mut policy =
            TriggerPolicy::new(&TriggerMode::Time(Duration::from_millis(40))).unwrap();
        sleep(Duration::from_millis(60));
        assert!(policy.should_fire(1));
        sleep(Duration::from_millis(60));
        // Fires again only because the full interval passed since the reset.
        assert!(policy.should_fire(2));
    }
}
