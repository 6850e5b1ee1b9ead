use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GrowthStage {
    pub threshold: u64,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const GROWTH_STAGES: [GrowthStage; 5] = [
    GrowthStage {
        threshold: 0,
        label: "Seedling",
        icon: "🌱",
    },
    GrowthStage {
        threshold: 500,
        label: "Sprout",
        icon: "🌿",
    },
    GrowthStage {
        threshold: 1000,
        label: "Young Pine",
        icon: "🌲",
    },
    GrowthStage {
        threshold: 2500,
        label: "Mature Oak",
        icon: "🌳",
    },
    GrowthStage {
        threshold: 5000,
        label: "Ancient Grove",
        icon: "🍀",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrowthModelError {
    #[error("growth ladder must contain at least one stage")]
    Empty,
    #[error("first growth stage must start at 0 xp, found {0}")]
    FirstThresholdNotZero(u64),
    #[error("growth thresholds must be strictly increasing ({previous} then {next})")]
    NotIncreasing { previous: u64, next: u64 },
}

/// Where an xp total sits on the growth ladder.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GrowthSnapshot {
    pub xp: u64,
    pub stage: GrowthStage,
    pub next_threshold: Option<u64>,
    pub progress: f64,
}

/// Maps experience totals to growth stages. Holds no state beyond the static
/// ladder, so every lookup is stable for a given xp value.
#[derive(Clone, Debug)]
pub struct GrowthModel {
    stages: Vec<GrowthStage>,
}

impl Default for GrowthModel {
    fn default() -> Self {
        Self {
            stages: GROWTH_STAGES.to_vec(),
        }
    }
}

impl GrowthModel {
    pub fn new(stages: Vec<GrowthStage>) -> Result<Self, GrowthModelError> {
        let first = stages.first().ok_or(GrowthModelError::Empty)?;
        if first.threshold != 0 {
            return Err(GrowthModelError::FirstThresholdNotZero(first.threshold));
        }
        if let Some(pair) = stages.windows(2).find(|w| w[1].threshold <= w[0].threshold) {
            return Err(GrowthModelError::NotIncreasing {
                previous: pair[0].threshold,
                next: pair[1].threshold,
            });
        }
        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[GrowthStage] {
        &self.stages
    }

    fn position_for(&self, xp: u64) -> usize {
        // First threshold is 0, so at least one stage always qualifies.
        self.stages
            .iter()
            .rposition(|s| s.threshold <= xp)
            .unwrap_or(0)
    }

    /// Highest stage whose threshold is at or below `xp`.
    pub fn stage_for(&self, xp: u64) -> &GrowthStage {
        &self.stages[self.position_for(xp)]
    }

    pub fn next_stage(&self, xp: u64) -> Option<&GrowthStage> {
        self.stages.get(self.position_for(xp) + 1)
    }

    /// Percentage (0..=100) of the way from the current stage to the next one.
    /// Always 100 once the final stage is reached.
    pub fn progress_for(&self, xp: u64) -> f64 {
        let current = self.stage_for(xp);
        match self.next_stage(xp) {
            Some(next) => {
                let span = (next.threshold - current.threshold) as f64;
                (xp - current.threshold) as f64 / span * 100.0
            }
            None => 100.0,
        }
    }

    pub fn snapshot(&self, xp: u64) -> GrowthSnapshot {
        GrowthSnapshot {
            xp,
            stage: *self.stage_for(xp),
            next_threshold: self.next_stage(xp).map(|s| s.threshold),
            progress: self.progress_for(xp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_resolve_to_greatest_threshold_at_or_below() {
        let model = GrowthModel::default();

        assert_eq!(model.stage_for(0).label, "Seedling");
        assert_eq!(model.stage_for(499).label, "Seedling");
        assert_eq!(model.stage_for(500).label, "Sprout");
        assert_eq!(model.stage_for(1250).label, "Young Pine");
        assert_ne!(model.stage_for(1250).label, "Mature Oak");
        assert_eq!(model.stage_for(2500).label, "Mature Oak");
        assert_eq!(model.stage_for(10_000).label, "Ancient Grove");
    }

    #[test]
    fn progress_starts_at_zero_and_stays_below_full_before_next_stage() {
        let model = GrowthModel::default();

        for pair in model.stages().windows(2) {
            let (current, next) = (pair[0], pair[1]);
            assert_eq!(model.progress_for(current.threshold), 0.0);
            assert!(model.progress_for(next.threshold - 1) < 100.0);
        }
    }

    #[test]
    fn terminal_stage_is_always_full() {
        let model = GrowthModel::default();

        assert_eq!(model.progress_for(5000), 100.0);
        assert_eq!(model.progress_for(123_456), 100.0);
        assert!(model.next_stage(5000).is_none());
    }

    #[test]
    fn progress_interpolates_linearly() {
        let model = GrowthModel::default();

        // 1250 sits 250 of the 1500 xp between Young Pine and Mature Oak.
        let progress = model.progress_for(1250);
        assert!((progress - 16.666).abs() < 0.01);

        let snapshot = model.snapshot(1250);
        assert_eq!(snapshot.stage.label, "Young Pine");
        assert_eq!(snapshot.next_threshold, Some(2500));
    }

    #[test]
    fn repeated_lookups_are_stable() {
        let model = GrowthModel::default();
        let first = model.snapshot(777);
        for _ in 0..5 {
            assert_eq!(model.snapshot(777), first);
        }
    }

    fn stage(threshold: u64, label: &'static str) -> GrowthStage {
        GrowthStage {
            threshold,
            label,
            icon: label,
        }
    }

    #[test]
    fn rejects_malformed_ladders() {
        assert_eq!(GrowthModel::new(vec![]).unwrap_err(), GrowthModelError::Empty);

        assert_eq!(
            GrowthModel::new(vec![stage(10, "a")]).unwrap_err(),
            GrowthModelError::FirstThresholdNotZero(10)
        );

        assert!(matches!(
            GrowthModel::new(vec![stage(0, "a"), stage(0, "b")]),
            Err(GrowthModelError::NotIncreasing { previous: 0, next: 0 })
        ));

        assert!(GrowthModel::new(GROWTH_STAGES.to_vec()).is_ok());
    }
}
