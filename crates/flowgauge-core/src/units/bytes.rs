//! Byte unit tables: metric, IEC and JEDEC.

use super::{Unit, IEC_MULTIPLIER, METRIC_MULTIPLIER};

pub const BYTE: u64 = 1;

pub const KILOBYTE: u64 = BYTE * METRIC_MULTIPLIER;
pub const MEGABYTE: u64 = KILOBYTE * METRIC_MULTIPLIER;
pub const GIGABYTE: u64 = MEGABYTE * METRIC_MULTIPLIER;
pub const TERABYTE: u64 = GIGABYTE * METRIC_MULTIPLIER;
pub const PETABYTE: u64 = TERABYTE * METRIC_MULTIPLIER;

pub const KIBIBYTE: u64 = BYTE * IEC_MULTIPLIER;
pub const MEBIBYTE: u64 = KIBIBYTE * IEC_MULTIPLIER;
pub const GIBIBYTE: u64 = MEBIBYTE * IEC_MULTIPLIER;
pub const TEBIBYTE: u64 = GIBIBYTE * IEC_MULTIPLIER;
pub const PEBIBYTE: u64 = TEBIBYTE * IEC_MULTIPLIER;

// JEDEC keeps the IEC multipliers under metric names.
pub const JEDEC_KILOBYTE: u64 = KIBIBYTE;
pub const JEDEC_MEGABYTE: u64 = MEBIBYTE;
pub const JEDEC_GIGABYTE: u64 = GIBIBYTE;

const IEC_NAMES: [&str; 6] = [
    "byte", "kibibyte", "mebibyte", "gibibyte", "tebibyte", "pebibyte",
];
const IEC_SHORTS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

const JEDEC_NAMES: [&str; 4] = ["byte", "kilobyte", "megabyte", "gigabyte"];
const JEDEC_SHORTS: [&str; 4] = ["B", "KB", "MB", "GB"];

const METRIC_NAMES: [&str; 6] = [
    "byte", "kilobyte", "megabyte", "gigabyte", "terabyte", "petabyte",
];
const METRIC_SHORTS: [&str; 6] = ["B", "kB", "MB", "GB", "TB", "PB"];

/// Bytes in the metric (SI) system.
pub const BYTES_METRIC: Unit = Unit::new(
    "BytesMetric",
    BYTE,
    METRIC_MULTIPLIER,
    &METRIC_NAMES,
    &METRIC_SHORTS,
);

/// Bytes in the IEC standard (KiB, MiB, ...).
pub const BYTES_IEC: Unit = Unit::new("BytesIEC", BYTE, IEC_MULTIPLIER, &IEC_NAMES, &IEC_SHORTS);

/// Bytes in the JEDEC standard: 1024 steps, metric names, up to GB.
pub const BYTES_JEDEC: Unit = Unit::new(
    "BytesJEDEC",
    BYTE,
    IEC_MULTIPLIER,
    &JEDEC_NAMES,
    &JEDEC_SHORTS,
);
