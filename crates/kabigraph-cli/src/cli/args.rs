//! Shared argument builders for the two binaries.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Database path (-f, parser side).
pub fn datafile_arg() -> Arg {
    Arg::new("datafile")
        .short('f')
        .value_name("FILE")
        .default_value("../kabi-data.dat")
        .value_parser(value_parser!(PathBuf))
        .help("Database file holding the kabi graph")
}

/// Cumulative build (-c, parser side).
pub fn cumulative_arg() -> Arg {
    Arg::new("cumulative")
        .short('c')
        .action(ArgAction::SetTrue)
        .help("Load the existing database first and rewrite it consolidated")
}

/// Remove the datafile before writing (-x).
pub fn remove_arg() -> Arg {
    Arg::new("remove")
        .short('x')
        .action(ArgAction::SetTrue)
        .help("Delete the database file before writing")
}

/// Compact an existing database (-z).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .short('z')
        .action(ArgAction::SetTrue)
        .help("Merge every appended segment of the database into one and exit")
}

/// Dump the store after building (--dump).
pub fn dump_arg() -> Arg {
    Arg::new("dump")
        .long("dump")
        .action(ArgAction::SetTrue)
        .help("Print the built graph to stdout")
}

/// Input translation-unit dumps (positional, parser side).
pub fn files_arg() -> Arg {
    Arg::new("files")
        .value_name("FILES")
        .num_args(1..)
        .value_parser(value_parser!(PathBuf))
        .required_unless_present("compact")
        .help("Symbol-tree dumps of preprocessed translation units")
}

/// Count query (-c, lookup side).
pub fn count_arg() -> Arg {
    Arg::new("count")
        .short('c')
        .value_name("SYMBOL")
        .help("Count the instances of the symbol in the graph")
}

/// Data-structure query (-d).
pub fn decl_arg() -> Arg {
    Arg::new("decl")
        .short('d')
        .value_name("SYMBOL")
        .help("Seek a data structure and print its members")
}

/// Exported-function query (-e).
pub fn exports_arg() -> Arg {
    Arg::new("exports")
        .short('e')
        .value_name("SYMBOL")
        .help("Print matching exported functions and their argument lists")
}

/// Affects query (-s).
pub fn struct_arg() -> Arg {
    Arg::new("struct")
        .short('s')
        .value_name("SYMBOL")
        .help("Print every exported function affected by the symbol")
}

/// Whole-word matching (-w).
pub fn whole_word_arg() -> Arg {
    Arg::new("whole_word")
        .short('w')
        .action(ArgAction::SetTrue)
        .help("Match whole words only; the default matches any substring")
}

/// Quiet mode (-q).
pub fn quiet_arg() -> Arg {
    Arg::new("quiet")
        .short('q')
        .action(ArgAction::SetTrue)
        .help("Do not list descendants of nonscalar symbols")
}

/// Database list (-f, lookup side).
pub fn filelist_arg() -> Arg {
    Arg::new("filelist")
        .short('f')
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Text file naming one database per line")
}
