use config::Config;
use env_logger::Env;

mod args;
mod commands;
mod config;

use crate::args::get_command;

pub fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = get_command().get_matches();

    let cfg = match Config::from_args(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    log::debug!("{:?}", cfg);

    if let Err(e) = commands::run(cfg) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
