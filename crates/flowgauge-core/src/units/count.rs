use super::{Unit, METRIC_MULTIPLIER};

/// Plain item counts (`1.20k`, `3.40M`).
pub const COUNT: Unit = Unit::new(
    "Count",
    1,
    METRIC_MULTIPLIER,
    &["", "thousand", "million", "billion", "trillion"],
    &["", "k", "M", "G", "T"],
);
