//! The `kabi-parser` command line.

use std::path::PathBuf;

use clap::{ArgMatches, Command};

use super::args::*;
use crate::commands::parse::ParseArgs;

pub fn build_parser_cli() -> Command {
    Command::new("kabi-parser")
        .about("Extract exported symbols and every type they reach into a kabi graph database")
        .override_usage("kabi-parser [-f datafile] [-c] [-x] [--dump] <FILES...>\n  kabi-parser -z [-f datafile]")
        .after_help(
            "Exit status is 0 on success and 1 when no exported symbol was \
             found anywhere in the input.",
        )
        .arg(datafile_arg())
        .arg(cumulative_arg())
        .arg(remove_arg())
        .arg(compact_arg())
        .arg(dump_arg())
        .arg(files_arg())
}

pub struct ParseParams {
    pub datafile: PathBuf,
    pub cumulative: bool,
    pub remove: bool,
    pub compact: bool,
    pub dump: bool,
    pub files: Vec<PathBuf>,
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            datafile: m.get_one::<PathBuf>("datafile").cloned().expect("has default"),
            cumulative: m.get_flag("cumulative"),
            remove: m.get_flag("remove"),
            compact: m.get_flag("compact"),
            dump: m.get_flag("dump"),
            files: m
                .get_many::<PathBuf>("files")
                .map(|files| files.cloned().collect())
                .unwrap_or_default(),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        Self {
            datafile: p.datafile,
            cumulative: p.cumulative,
            remove: p.remove,
            compact: p.compact,
            dump: p.dump,
            files: p.files,
        }
    }
}
