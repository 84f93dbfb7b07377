//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::build::BuildArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;

pub struct BuildParams {
    pub input: PathBuf,
    pub output: PathBuf,
    pub verbose: bool,
    pub color: ColorChoice,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: required_path(m, "input"),
            output: required_path(m, "output"),
            verbose: m.get_flag("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            input: p.input,
            output: p.output,
            verbose: p.verbose,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub input: PathBuf,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: required_path(m, "input"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.input,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub binary: PathBuf,
    pub json: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            binary: required_path(m, "binary"),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            binary: p.binary,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id)
        .cloned()
        .expect("clap enforces required args")
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
