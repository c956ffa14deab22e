mod cli;
mod commands;

use cli::{BuildParams, PoolsParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("build", m)) => {
            let params = BuildParams::from_matches(m);
            init_logging(params.verbose);
            commands::build::run(params.into());
        }
        Some(("pools", m)) => {
            let params = PoolsParams::from_matches(m);
            init_logging(params.verbose);
            commands::pools::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
