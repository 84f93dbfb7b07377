//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("tplgc")
        .about("Compiler for ALSA SoC topology configurations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(build_command())
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Compile a configuration into a topology binary.
pub fn build_command() -> Command {
    Command::new("build")
        .about("Compile a topology configuration")
        .override_usage("  tplgc build <INPUT> -o <OUTPUT> [-v]")
        .after_help(
            r#"EXAMPLES:
  tplgc build card.conf -o card.tplg       # compile
  tplgc build card.conf -o card.tplg -v    # trace every write"#,
        )
        .arg(input_arg())
        .arg(output_arg())
        .arg(verbose_arg())
        .arg(color_arg())
}

/// Parse and link without writing anything.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a topology configuration")
        .override_usage("  tplgc check <INPUT> [--strict]")
        .after_help(
            r#"EXAMPLES:
  tplgc check card.conf              # errors only
  tplgc check card.conf --strict     # warnings fail too"#,
        )
        .arg(input_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// List the blocks of a compiled binary.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the blocks of a compiled topology")
        .override_usage("  tplgc dump <BINARY> [--json]")
        .after_help(
            r#"EXAMPLES:
  tplgc dump card.tplg               # block listing
  tplgc dump card.tplg --json        # decoded records"#,
        )
        .arg(binary_arg())
        .arg(json_arg())
        .arg(color_arg())
}
