//! Tests for copy, pipe, checksum and format.

use super::parse;
use crate::cli::{Cli, CliCommand, UnitArg};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_copy() {
    match parse(&["flowgauge", "copy", "a.iso", "/tmp/b.iso"]) {
        CliCommand::Copy { src, dest, json } => {
            assert_eq!(src, Path::new("a.iso"));
            assert_eq!(dest, Path::new("/tmp/b.iso"));
            assert!(!json);
        }
        _ => panic!("expected Copy"),
    }
}

#[test]
fn cli_parse_copy_json() {
    match parse(&["flowgauge", "copy", "--json", "a", "b"]) {
        CliCommand::Copy { json, .. } => assert!(json),
        _ => panic!("expected Copy with --json"),
    }
}

#[test]
fn cli_parse_copy_requires_dest() {
    assert!(Cli::try_parse_from(["flowgauge", "copy", "a"]).is_err());
}

#[test]
fn cli_parse_pipe() {
    match parse(&["flowgauge", "pipe"]) {
        CliCommand::Pipe { size, json } => {
            assert!(size.is_none());
            assert!(!json);
        }
        _ => panic!("expected Pipe"),
    }
}

#[test]
fn cli_parse_pipe_size() {
    match parse(&["flowgauge", "pipe", "--size", "1048576"]) {
        CliCommand::Pipe { size, .. } => assert_eq!(size, Some(1_048_576)),
        _ => panic!("expected Pipe with --size"),
    }
}

#[test]
fn cli_parse_checksum() {
    match parse(&["flowgauge", "checksum", "/var/tmp/file.iso"]) {
        CliCommand::Checksum { path } => assert_eq!(path, Path::new("/var/tmp/file.iso")),
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_format_defaults() {
    match parse(&["flowgauge", "format", "1500"]) {
        CliCommand::Format { value, unit, long } => {
            assert_eq!(value, 1500);
            assert_eq!(unit, UnitArg::Bytes);
            assert!(!long);
        }
        _ => panic!("expected Format"),
    }
}

#[test]
fn cli_parse_format_unit_long() {
    match parse(&["flowgauge", "format", "2048", "--unit", "iec", "--long"]) {
        CliCommand::Format { value, unit, long } => {
            assert_eq!(value, 2048);
            assert_eq!(unit, UnitArg::Iec);
            assert!(long);
        }
        _ => panic!("expected Format with --unit iec --long"),
    }
}

#[test]
fn cli_parse_format_rejects_unknown_unit() {
    assert!(Cli::try_parse_from(["flowgauge", "format", "1", "--unit", "furlong"]).is_err());
}

#[test]
fn unit_arg_maps_to_tables() {
    assert_eq!(UnitArg::Bytes.unit().name, "BytesMetric");
    assert_eq!(UnitArg::Iec.unit().name, "BytesIEC");
    assert_eq!(UnitArg::Count.unit().format(2_000, true), "2.00k");
}
