use super::{DEFAULT_CLICK_SLOP, DEFAULT_SENSITIVITY, DEFAULT_THRESHOLD};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

/// How a finished drag turns into an index change.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CommitPolicy {
    /// Moves by `round(distance / sensitivity)` steps; long drags skip items.
    #[strum(to_string = "continuous", serialize = "free")]
    Continuous,
    /// Moves by exactly one step once the drag passes `threshold`.
    #[default]
    #[strum(to_string = "threshold", serialize = "snap", serialize = "step")]
    Threshold,
}

impl CommitPolicy {
    /// Signed index delta for a drag of `distance` pixels. Dragging right
    /// (positive distance) moves towards the previous item.
    pub fn delta(&self, distance: f64, config: &GestureConfig) -> i64 {
        match self {
            Self::Continuous => -(distance / config.sensitivity).round() as i64,
            Self::Threshold if distance.abs() > config.threshold => -(distance.signum() as i64),
            Self::Threshold => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub policy: CommitPolicy,
    pub sensitivity: f64,
    pub threshold: f64,
    pub click_slop: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            policy: CommitPolicy::default(),
            sensitivity: DEFAULT_SENSITIVITY,
            threshold: DEFAULT_THRESHOLD,
            click_slop: DEFAULT_CLICK_SLOP,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        start: f64,
        current: f64,
    },
}

impl DragPhase {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn distance(&self) -> f64 {
        match self {
            Self::Idle => 0.0,
            Self::Dragging { start, current } => current - start,
        }
    }

    /// Drag distance in index units, fed to the layout while dragging.
    pub fn fraction(&self, sensitivity: f64) -> f64 {
        self.distance() / sensitivity
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Release without a drag in progress.
    Ignored,
    /// The pointer barely moved; `x` is where it was released.
    Tapped { x: f64 },
    /// The drag was too short to commit and snapped back.
    Settled,
    Moved { delta: i64 },
}

/// Decides what a release ending `phase` means under `config`.
pub fn resolve(phase: DragPhase, config: &GestureConfig) -> GestureOutcome {
    let DragPhase::Dragging { current, .. } = phase else {
        return GestureOutcome::Ignored;
    };

    let distance = phase.distance();
    if distance.abs() <= config.click_slop {
        return GestureOutcome::Tapped { x: current };
    }

    match config.policy.delta(distance, config) {
        0 => GestureOutcome::Settled,
        delta => GestureOutcome::Moved { delta },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragging(start: f64, current: f64) -> DragPhase {
        DragPhase::Dragging { start, current }
    }

    #[test]
    fn test_policy_deserialization() {
        let cases = vec![
            ("\"threshold\"", CommitPolicy::Threshold),
            ("\"Threshold\"", CommitPolicy::Threshold),
            ("\"SNAP\"", CommitPolicy::Threshold),
            ("\"step\"", CommitPolicy::Threshold),
            ("\"continuous\"", CommitPolicy::Continuous),
            ("\"Free\"", CommitPolicy::Continuous),
        ];

        for (json, expected) in cases {
            let deserialized: CommitPolicy = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }

        assert!(serde_json::from_str::<CommitPolicy>("\"sideways\"").is_err());
        assert_eq!(CommitPolicy::Continuous.to_string(), "continuous");
    }

    #[test]
    fn threshold_policy_needs_more_than_the_threshold() {
        let config = GestureConfig {
            policy: CommitPolicy::Threshold,
            sensitivity: 200.0,
            threshold: 50.0,
            ..GestureConfig::default()
        };

        assert_eq!(resolve(dragging(100.0, 140.0), &config), GestureOutcome::Settled);
        assert_eq!(resolve(dragging(100.0, 150.0), &config), GestureOutcome::Settled);
        assert_eq!(
            resolve(dragging(100.0, 160.0), &config),
            GestureOutcome::Moved { delta: -1 }
        );
        assert_eq!(
            resolve(dragging(100.0, 40.0), &config),
            GestureOutcome::Moved { delta: 1 }
        );
        // never more than one step
        assert_eq!(
            resolve(dragging(0.0, -900.0), &config),
            GestureOutcome::Moved { delta: 1 }
        );
    }

    #[test]
    fn continuous_policy_rounds_the_drag_fraction() {
        let config = GestureConfig {
            policy: CommitPolicy::Continuous,
            sensitivity: 200.0,
            ..GestureConfig::default()
        };

        let cases = vec![
            (60.0, GestureOutcome::Settled),
            (99.0, GestureOutcome::Settled),
            (101.0, GestureOutcome::Moved { delta: -1 }),
            (-250.0, GestureOutcome::Moved { delta: 1 }),
            (-301.0, GestureOutcome::Moved { delta: 2 }),
            (640.0, GestureOutcome::Moved { delta: -3 }),
        ];

        for (distance, expected) in cases {
            assert_eq!(resolve(dragging(0.0, distance), &config), expected, "{distance}");
        }
    }

    #[test]
    fn short_drags_are_taps_under_both_policies() {
        for policy in [CommitPolicy::Continuous, CommitPolicy::Threshold] {
            let config = GestureConfig {
                policy,
                ..GestureConfig::default()
            };
            assert_eq!(
                resolve(dragging(120.0, 120.0), &config),
                GestureOutcome::Tapped { x: 120.0 }
            );
            assert_eq!(
                resolve(dragging(120.0, 123.0), &config),
                GestureOutcome::Tapped { x: 123.0 }
            );
        }
    }

    #[test]
    fn release_while_idle_is_ignored() {
        assert_eq!(
            resolve(DragPhase::Idle, &GestureConfig::default()),
            GestureOutcome::Ignored
        );
    }

    #[test]
    fn fraction_follows_the_pointer() {
        assert_eq!(DragPhase::Idle.fraction(200.0), 0.0);
        assert_eq!(dragging(10.0, 110.0).fraction(200.0), 0.5);
        assert_eq!(dragging(10.0, -290.0).fraction(200.0), -1.5);
    }
}
