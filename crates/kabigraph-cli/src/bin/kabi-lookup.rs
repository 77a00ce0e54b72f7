use kabigraph::cli::{LookupParams, build_lookup_cli};
use kabigraph::commands;

fn main() {
    let matches = build_lookup_cli().get_matches();
    let params = LookupParams::from_matches(&matches);
    std::process::exit(commands::lookup::run(params.into()));
}
