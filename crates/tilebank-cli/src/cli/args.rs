//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so `build` and `pools` can share
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Project JSON file (positional, required).
pub fn project_path_arg() -> Arg {
    Arg::new("project_path")
        .value_name("PROJECT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Project JSON file")
}

/// Directory assets are resolved against (--project-root).
pub fn project_root_arg() -> Arg {
    Arg::new("project_root")
        .long("project-root")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Project directory (defaults to the directory of PROJECT)")
}

/// Default UI assets (--templates).
pub fn templates_arg() -> Arg {
    Arg::new("templates")
        .long("templates")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Template directory missing UI assets are copied from")
}

/// Output directory (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("DIR")
        .default_value("out")
        .value_parser(value_parser!(PathBuf))
        .help("Directory the generated sources are written to")
}

/// Bank capacity in bytes (--bank-size).
pub fn bank_size_arg() -> Arg {
    Arg::new("bank_size")
        .long("bank-size")
        .value_name("BYTES")
        .value_parser(value_parser!(usize))
        .help("Capacity of one bank in bytes [default: 16384]")
}

/// First usable bank (--bank-offset).
pub fn bank_offset_arg() -> Arg {
    Arg::new("bank_offset")
        .long("bank-offset")
        .value_name("N")
        .value_parser(value_parser!(u8))
        .help("First bank number available to data [default: 17]")
}

/// String records per bank (--strings-per-bank).
pub fn strings_per_bank_arg() -> Arg {
    Arg::new("strings_per_bank")
        .long("strings-per-bank")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Maximum string records per string bank [default: 430]")
}

/// Legacy event placement (--legacy-retry).
pub fn legacy_retry_arg() -> Arg {
    Arg::new("legacy_retry")
        .long("legacy-retry")
        .action(ArgAction::SetTrue)
        .help("Always place the full-context event blob when retrying in a new bank")
}

/// Debug logging (-v/--verbose).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("Log placement decisions (RUST_LOG overrides)")
}
