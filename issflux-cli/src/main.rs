//! Entry point for the issflux relay.
#![forbid(unsafe_code)]

use issflux_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = issflux_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        log::error!("issflux: {err}");
        std::process::exit(1);
    }
}
