//! `flowgauge format` – render an amount in a unit standard.

use crate::cli::UnitArg;

pub fn format_value(value: u64, unit: UnitArg, long: bool) -> String {
    unit.unit().format(value, !long)
}

pub fn run_format(value: u64, unit: UnitArg, long: bool) {
    println!("{}", format_value(value, unit, long));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_value_short_and_long() {
        assert_eq!(format_value(10 * 1024 * 1024, UnitArg::Iec, false), "10.00MiB");
        assert_eq!(format_value(10 * 1024 * 1024, UnitArg::Iec, true), "10.00 mebibyte");
        assert_eq!(format_value(0, UnitArg::Bytes, false), "0B");
        assert_eq!(format_value(2500, UnitArg::Distance, false), "2.50km");
        assert_eq!(format_value(1_000_000, UnitArg::Count, false), "1.00M");
    }
}
