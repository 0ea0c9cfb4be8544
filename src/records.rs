//! Best results of the current process
//!
//! Nothing is written to disk; records live as long as the app.

use crate::sim::{Mode, Outcome};

/// Best results for both modes
#[derive(Debug, Clone, Default)]
pub struct Records {
    best_score: Option<u64>,
    best_survival: Option<f64>,
    runs: u32,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record(&mut self, mode: Mode, outcome: Outcome) -> bool {
        self.runs += 1;

        let is_best = match outcome {
            Outcome::Score(score) => {
                let best = self.best_score.is_none_or(|b| score > b);
                if best {
                    self.best_score = Some(score);
                }
                best
            }
            Outcome::Survived(secs) => {
                let best = self.best_survival.is_none_or(|b| secs > b);
                if best {
                    self.best_survival = Some(secs);
                }
                best
            }
        };

        if is_best {
            log::info!("New best for {}: {}", mode.as_str(), outcome);
        }
        is_best
    }

    /// Best catcher score
    pub fn best_score(&self) -> Option<u64> {
        self.best_score
    }

    /// Longest survivor run (seconds)
    pub fn best_survival(&self) -> Option<f64> {
        self.best_survival
    }

    /// Best result of a mode
    pub fn best(&self, mode: Mode) -> Option<Outcome> {
        match mode {
            Mode::Catcher => self.best_score.map(Outcome::Score),
            Mode::Survivor => self.best_survival.map(Outcome::Survived),
        }
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_result_is_best() {
        let mut records = Records::new();
        assert!(records.is_empty());
        assert!(records.record(Mode::Catcher, Outcome::Score(0)));
        assert_eq!(records.best_score(), Some(0));
        assert_eq!(records.best_survival(), None);
    }

    #[test]
    fn test_best_only_improves() {
        let mut records = Records::new();
        assert!(records.record(Mode::Catcher, Outcome::Score(300)));
        assert!(!records.record(Mode::Catcher, Outcome::Score(150)));
        assert!(!records.record(Mode::Catcher, Outcome::Score(300)));
        assert!(records.record(Mode::Catcher, Outcome::Score(450)));
        assert_eq!(records.best(Mode::Catcher), Some(Outcome::Score(450)));
        assert_eq!(records.runs(), 4);
    }

    #[test]
    fn test_modes_tracked_separately() {
        let mut records = Records::new();
        records.record(Mode::Survivor, Outcome::Survived(12.5));
        records.record(Mode::Catcher, Outcome::Score(100));
        assert!(!records.record(Mode::Survivor, Outcome::Survived(3.0)));
        assert_eq!(records.best(Mode::Survivor), Some(Outcome::Survived(12.5)));
        assert_eq!(records.best(Mode::Catcher), Some(Outcome::Score(100)));
    }
}
