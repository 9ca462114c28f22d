//! Run statistics

use std::fmt;

use serde::{Deserialize, Serialize};
use tapkit_core::{MaterialProfile, PauseTiers};

use crate::classifier::{PauseCounts, PausePlan};
use crate::tokenizer::LineTokens;

/// Commands dropped from the original input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedCommands {
    /// Rapid traverse lines
    pub rapid: usize,
    /// Dwell lines
    pub dwell: usize,
    pub total: usize,
}

/// Aggregate figures for one processed file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStatistics {
    /// Sum of segment distances (mm)
    pub total_distance: f64,
    /// Cutting time at the effective feed rate (minutes)
    pub estimated_time_minutes: f64,
    /// Positions visited: segments + 1, or 0 without moves
    pub total_commands: usize,
    pub pauses_inserted: PauseCounts,
    pub removed_commands: RemovedCommands,
    /// Wall-clock time spent in the pipeline (milliseconds)
    pub processing_time_ms: f64,
    /// Sum of inserted dwell durations (seconds)
    pub pause_seconds: f64,
    /// Cutting time plus dwells (seconds)
    pub estimated_total_time: f64,
    /// The input was already pipeline output and was returned as is
    pub is_reprocessed_file: bool,
}

impl ProcessingStatistics {
    /// Zeroed record for input returned untouched
    pub fn reprocessed() -> Self {
        Self {
            is_reprocessed_file: true,
            ..Self::default()
        }
    }

    /// Cutting time split into whole minutes and seconds
    pub fn cut_time(&self) -> CutTime {
        CutTime::from_minutes(self.estimated_time_minutes)
    }

    /// Total estimated time rounded up to whole minutes
    pub fn total_minutes_ceil(&self) -> u64 {
        (self.estimated_total_time / 60.0).ceil().max(0.0) as u64
    }
}

/// Duration shown as "N minutos e M segundos"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CutTime {
    pub minutes: u64,
    pub seconds: u64,
}

impl CutTime {
    pub fn from_minutes(minutes: f64) -> Self {
        if !minutes.is_finite() || minutes <= 0.0 {
            return Self::default();
        }

        let whole = minutes.floor();
        let seconds = ((minutes - whole) * 60.0).round() as u64;
        let whole = whole as u64;

        if seconds >= 60 {
            Self {
                minutes: whole + 1,
                seconds: seconds - 60,
            }
        } else {
            Self {
                minutes: whole,
                seconds,
            }
        }
    }
}

impl fmt::Display for CutTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutos e {} segundos", self.minutes, self.seconds)
    }
}

/// Count rapid traverse and dwell lines in unsanitized input
///
/// A leading line label is skipped; anything after a `;` is ignored.
pub fn count_removed_commands(original: &str) -> RemovedCommands {
    let mut removed = RemovedCommands::default();
    for line in original.split('\n') {
        let tokens = LineTokens::scan(line);
        if tokens.is_rapid() {
            removed.rapid += 1;
        } else if tokens.is_dwell() {
            removed.dwell += 1;
        }
    }
    removed.total = removed.rapid + removed.dwell;
    removed
}

/// Count plan dwells per tier by comparing durations at one decimal
///
/// Tiers are tried short, medium, long; when two tiers share a duration the
/// dwell counts toward the first. A dwell matching no tier is not counted.
pub fn count_pauses(plan: &PausePlan, tiers: &PauseTiers) -> PauseCounts {
    let mut counts = PauseCounts::default();
    for dwell in plan.values() {
        if dwell.matches(tiers.short.seconds) {
            counts.short += 1;
        } else if dwell.matches(tiers.medium.seconds) {
            counts.medium += 1;
        } else if dwell.matches(tiers.long.seconds) {
            counts.long += 1;
        }
    }
    counts.total = counts.short + counts.medium + counts.long;
    counts
}

/// Sum of the dwell durations in a plan
pub fn pause_seconds(plan: &PausePlan) -> f64 {
    plan.values().fold(0.0, |acc, d| acc + d.seconds())
}

/// Minutes needed to cut `distance` mm at the material's effective rate
///
/// A non-positive feed rate yields zero rather than an infinite estimate.
pub fn estimated_cut_minutes(distance: f64, material: &MaterialProfile) -> f64 {
    let rate = material.effective_feed_rate();
    if rate > 0.0 && rate.is_finite() {
        distance / rate
    } else {
        tracing::warn!(
            material = %material.id,
            feed_rate = material.feed_rate,
            "material feed rate is not positive; cut time reported as zero"
        );
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Dwell;

    #[test]
    fn test_count_removed_commands() {
        let input = "G00 X0 Y0\nG0 X1\nN5 G00 X2\nG01 X3\nG04 P0.5\ng4 p1\n; G00 in comment\nG40";
        let removed = count_removed_commands(input);
        assert_eq!(removed.rapid, 3);
        assert_eq!(removed.dwell, 2);
        assert_eq!(removed.total, 5);
    }

    #[test]
    fn test_count_pauses_by_rounded_seconds() {
        let tiers = PauseTiers::new((5.0, 0.0), (50.0, 0.3), (50.0, 0.5));
        let plan: PausePlan = [(1, Dwell::new(0.0)), (2, Dwell::new(0.3)), (3, Dwell::new(0.5))]
            .into_iter()
            .collect();
        let counts = count_pauses(&plan, &tiers);
        assert_eq!((counts.short, counts.medium, counts.long, counts.total), (1, 1, 1, 3));
        assert!((pause_seconds(&plan) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_shared_seconds_count_toward_first_tier() {
        let tiers = PauseTiers::new((5.0, 0.3), (50.0, 0.3), (50.0, 0.5));
        let plan: PausePlan = [(1, Dwell::new(0.3)), (2, Dwell::new(0.3))]
            .into_iter()
            .collect();
        let counts = count_pauses(&plan, &tiers);
        assert_eq!((counts.short, counts.medium), (2, 0));
    }

    #[test]
    fn test_cut_time() {
        assert_eq!(CutTime::from_minutes(2.5).to_string(), "2 minutos e 30 segundos");
        assert_eq!(CutTime::from_minutes(0.0).to_string(), "0 minutos e 0 segundos");
        assert_eq!(
            CutTime::from_minutes(1.9999),
            CutTime {
                minutes: 2,
                seconds: 0
            }
        );
    }

    #[test]
    fn test_estimated_cut_minutes() {
        let material = MaterialProfile::eps_t1();
        assert_eq!(estimated_cut_minutes(600.0, &material), 2.0);

        let mut broken = MaterialProfile::eps_t1();
        broken.feed_rate = 0.0;
        assert_eq!(estimated_cut_minutes(600.0, &broken), 0.0);
    }

    #[test]
    fn test_reprocessed_record() {
        let stats = ProcessingStatistics::reprocessed();
        assert!(stats.is_reprocessed_file);
        assert_eq!(stats.total_distance, 0.0);
        assert_eq!(stats.pauses_inserted.total, 0);
        assert_eq!(stats.total_minutes_ceil(), 0);
    }

    #[test]
    fn test_empty_plan_has_positive_zero_pause_time() {
        let seconds = pause_seconds(&PausePlan::new());
        assert_eq!(seconds, 0.0);
        assert!(seconds.is_sign_positive());
    }
}
