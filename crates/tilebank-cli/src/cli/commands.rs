//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("tilebank")
        .about("Compile Game Boy project data into banked C sources")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(build_command())
        .subcommand(pools_command())
}

/// Compile a project and write every artifact.
pub fn build_command() -> Command {
    Command::new("build")
        .about("Compile a project into banked data sources")
        .after_help(
            r#"EXAMPLES:
  tilebank build game.json                       # writes ./out
  tilebank build game.json -o build/src/data     # custom output directory
  tilebank build game.json --legacy-retry        # byte-compatible event placement
  tilebank build game.json --templates ui/ -v    # copy missing UI assets, log placement"#,
        )
        .arg(project_path_arg())
        .arg(output_arg())
        .arg(project_root_arg())
        .arg(templates_arg())
        .arg(bank_size_arg())
        .arg(bank_offset_arg())
        .arg(strings_per_bank_arg())
        .arg(legacy_retry_arg())
        .arg(verbose_arg())
}

/// Print the deduplicated pools without placing anything.
pub fn pools_command() -> Command {
    Command::new("pools")
        .about("Print the deduplicated asset pools of a project")
        .arg(project_path_arg())
        .arg(project_root_arg())
        .arg(templates_arg())
        .arg(verbose_arg())
}
