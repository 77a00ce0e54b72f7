//! The `kabi-lookup` command line.

use std::path::PathBuf;

use clap::{ArgGroup, ArgMatches, Command};

use super::args::*;
use crate::commands::lookup::{LookupArgs, Mode};

pub fn build_lookup_cli() -> Command {
    Command::new("kabi-lookup")
        .about("Search kabi graph databases; results print hierarchically")
        .override_usage("kabi-lookup -c|-d|-e|-s <SYMBOL> [-w] [-q] [-f filelist]")
        .after_help(
            "Whole-word mode (-w) fingerprints the symbol and resolves it \
             directly; the default matches any declaration containing it. \
             Exit status is 1 when nothing matched.",
        )
        .arg(count_arg())
        .arg(decl_arg())
        .arg(exports_arg())
        .arg(struct_arg())
        .arg(whole_word_arg())
        .arg(quiet_arg())
        .arg(filelist_arg())
        .group(
            ArgGroup::new("mode")
                .args(["count", "decl", "exports", "struct"])
                .required(true)
                .multiple(false),
        )
}

pub struct LookupParams {
    pub mode: Mode,
    pub symbol: String,
    pub whole_word: bool,
    pub quiet: bool,
    pub filelist: Option<PathBuf>,
}

impl LookupParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let (mode, symbol) = [
            ("count", Mode::Count),
            ("decl", Mode::Decl),
            ("exports", Mode::Exports),
            ("struct", Mode::Struct),
        ]
        .into_iter()
        .find_map(|(id, mode)| {
            m.get_one::<String>(id).map(|symbol| (mode, symbol.clone()))
        })
        .expect("clap enforces one query mode");

        Self {
            mode,
            symbol,
            whole_word: m.get_flag("whole_word"),
            quiet: m.get_flag("quiet"),
            filelist: m.get_one::<PathBuf>("filelist").cloned(),
        }
    }
}

impl From<LookupParams> for LookupArgs {
    fn from(p: LookupParams) -> Self {
        Self {
            mode: p.mode,
            symbol: p.symbol,
            whole_word: p.whole_word,
            quiet: p.quiet,
            filelist: p.filelist,
        }
    }
}
