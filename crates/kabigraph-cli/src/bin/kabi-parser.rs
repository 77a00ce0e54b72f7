use kabigraph::cli::{ParseParams, build_parser_cli};
use kabigraph::commands;

fn main() {
    let matches = build_parser_cli().get_matches();
    let params = ParseParams::from_matches(&matches);
    std::process::exit(commands::parse::run(params.into()));
}
