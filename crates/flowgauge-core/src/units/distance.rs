use super::{Unit, METRIC_MULTIPLIER};

/// Distance in metres and kilometres.
pub const DISTANCE_METRIC: Unit = Unit::new(
    "Distance",
    1,
    METRIC_MULTIPLIER,
    &["metre", "kilometre"],
    &["m", "km"],
);
