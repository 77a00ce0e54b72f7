//! Query one or more kabi graph databases.

use std::fs;
use std::path::PathBuf;

use kabigraph_core::db;
use kabigraph_query::{Lookup, RowMan};

/// Which structural query to run; exactly one per invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Count,
    Decl,
    Exports,
    Struct,
}

pub struct LookupArgs {
    pub mode: Mode,
    pub symbol: String,
    pub whole_word: bool,
    pub quiet: bool,
    pub filelist: Option<PathBuf>,
}

const DEFAULT_DATAFILE: &str = "../kabi-data.dat";

/// Run the query; returns the process exit code.
pub fn run(args: LookupArgs) -> i32 {
    let databases: Vec<PathBuf> = match &args.filelist {
        Some(list) => match fs::read_to_string(list) {
            Ok(text) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathBuf::from)
                .collect(),
            Err(e) => {
                eprintln!("kabi-lookup: cannot open {}: {e}", list.display());
                return 2;
            }
        },
        None => vec![PathBuf::from(DEFAULT_DATAFILE)],
    };

    let mut total_count = 0;
    let mut found = false;

    // Databases are consulted one at a time; whole-word exports/decl
    // queries stop at the first file with a match.
    for path in &databases {
        let graph = match db::load(path) {
            Ok(graph) => graph,
            Err(e) => {
                eprintln!("kabi-lookup: {e}");
                return 2;
            }
        };
        let lookup = Lookup::new(&graph)
            .whole_word(args.whole_word)
            .verbose(!args.quiet);

        let matched = match args.mode {
            Mode::Count => {
                total_count += lookup.count(&args.symbol);
                0
            }
            Mode::Exports => {
                let mut rowman = RowMan::new();
                let matched = lookup.exports(&args.symbol, &mut rowman);
                print!("{}", rowman.finish());
                matched
            }
            Mode::Decl => {
                let mut rowman = RowMan::new();
                let matched = lookup.members(&args.symbol, &mut rowman);
                print!("{}", rowman.finish());
                matched
            }
            Mode::Struct => {
                let mut rowman = RowMan::new();
                let matched = lookup.affects(&args.symbol, &mut rowman);
                print!("{}", rowman.finish());
                matched
            }
        };

        if matched > 0 {
            found = true;
            if args.whole_word && matches!(args.mode, Mode::Exports | Mode::Decl) {
                break;
            }
        }
    }

    if args.mode == Mode::Count {
        if total_count == 0 {
            println!("\"{}\" not found.", args.symbol);
            return 1;
        }
        println!("{total_count}");
        return 0;
    }

    if !found {
        println!("\"{}\" not found.", args.symbol);
        return 1;
    }
    0
}
