//! Unit tables and human-readable formatting of counts.
//!
//! A [`Unit`] describes a family of tiers (byte, kibibyte, mebibyte, ...)
//! sharing one multiplier. Tables are `&'static` so a `Unit` is `Copy` and
//! can ride along in every snapshot for free.

mod bytes;
mod count;
mod distance;
mod duration;

use serde::Serialize;

pub use bytes::{
    BYTE, BYTES_IEC, BYTES_JEDEC, BYTES_METRIC, GIBIBYTE, GIGABYTE, JEDEC_GIGABYTE,
    JEDEC_KILOBYTE, JEDEC_MEGABYTE, KIBIBYTE, KILOBYTE, MEBIBYTE, MEGABYTE, PEBIBYTE, PETABYTE,
    TEBIBYTE, TERABYTE,
};
pub use count::COUNT;
pub use distance::DISTANCE_METRIC;
pub use duration::format_duration;

/// Metric systems step by 10^3.
pub const METRIC_MULTIPLIER: u64 = 1000;
/// IEC systems step by 2^10.
pub const IEC_MULTIPLIER: u64 = 1024;

/// A unit standard: base size, per-tier multiplier and the tier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unit {
    /// Name of the unit standard (e.g. "BytesIEC").
    pub name: &'static str,
    /// Size of one base unit.
    pub size: u64,
    /// Multiplier between consecutive tiers.
    pub multiplier: u64,
    /// Long tier names, smallest first.
    pub names: &'static [&'static str],
    /// Short tier names, smallest first.
    pub shorts: &'static [&'static str],
}

impl Unit {
    pub const fn new(
        name: &'static str,
        size: u64,
        multiplier: u64,
        names: &'static [&'static str],
        shorts: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            size,
            multiplier,
            names,
            shorts,
        }
    }

    /// Pick the tier for `value`: the largest one whose threshold does not
    /// exceed the value, clamped to the last defined tier.
    ///
    /// Returns `(divider, long_name, short_name)`.
    pub fn tier(&self, value: u64) -> (u64, &'static str, &'static str) {
        if value == 0 {
            return (1, self.long_name(0), self.short_name(0));
        }
        let mut divider = self.size.max(1);
        let mut index = 0;
        for i in 1..self.names.len() {
            match divider.checked_mul(self.multiplier) {
                Some(next) if next <= value && next > divider => {
                    divider = next;
                    index = i;
                }
                _ => break,
            }
        }
        (divider, self.long_name(index), self.short_name(index))
    }

    /// Format `value` with two decimals (none for the base tier).
    ///
    /// Short names are glued to the number (`10.00MiB`), long names are
    /// separated by a space (`10.00 mebibyte`).
    pub fn format(&self, value: u64, short: bool) -> String {
        let (divider, name, short_name) = self.tier(value);
        let scaled = value as f64 / divider as f64;
        let precision = if divider == 1 { 0 } else { 2 };
        if short {
            format!("{scaled:.precision$}{short_name}")
        } else if name.is_empty() {
            format!("{scaled:.precision$}")
        } else {
            format!("{scaled:.precision$} {name}")
        }
    }

    fn long_name(&self, index: usize) -> &'static str {
        self.names.get(index).copied().unwrap_or("")
    }

    fn short_name(&self, index: usize) -> &'static str {
        self.shorts.get(index).copied().unwrap_or("")
    }
}
