//! Build a kabi graph database from translation-unit dumps.

use std::fs;
use std::path::{Path, PathBuf};

use kabigraph_builder::{Builder, parse_unit};
use kabigraph_core::{TypeGraph, db};

pub struct ParseArgs {
    pub datafile: PathBuf,
    pub cumulative: bool,
    pub remove: bool,
    pub compact: bool,
    pub dump: bool,
    pub files: Vec<PathBuf>,
}

/// Run the build; returns the process exit code.
pub fn run(args: ParseArgs) -> i32 {
    if args.compact {
        return compact(&args.datafile);
    }

    let mut graph = if args.cumulative {
        match db::load_if_exists(&args.datafile) {
            Ok(graph) => graph,
            Err(e) => {
                eprintln!("kabi-parser: {e}");
                return 2;
            }
        }
    } else {
        TypeGraph::new()
    };

    let found_exports = {
        let mut builder = Builder::new(&mut graph);
        for path in &args.files {
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("kabi-parser: cannot open {}: {e}", path.display());
                    return 2;
                }
            };
            let unit = match parse_unit(&text) {
                Ok(unit) => unit,
                Err(e) => {
                    eprintln!("kabi-parser: {}: {e}", path.display());
                    return 2;
                }
            };
            builder.build_translation_unit(&unit, &path.display().to_string());
        }
        builder.found_exports()
    };

    if !found_exports {
        return 1;
    }

    if args.remove {
        let _ = fs::remove_file(&args.datafile);
    }

    // Cumulative runs already hold the old contents; rewrite consolidated
    // instead of appending a segment.
    let written = if args.cumulative {
        db::write(&args.datafile, &graph)
    } else {
        db::append(&args.datafile, &graph)
    };
    if let Err(e) = written {
        eprintln!("kabi-parser: {e}");
        return 2;
    }

    if args.dump {
        print!("{}", graph.dump());
    }
    0
}

/// Rewrite an appended database as one consolidated segment.
fn compact(datafile: &Path) -> i32 {
    let graph = match db::load(datafile) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("kabi-parser: {e}");
            return 2;
        }
    };
    if let Err(e) = db::write(datafile, &graph) {
        eprintln!("kabi-parser: {e}");
        return 2;
    }
    0
}
