use std::process::ExitCode;

use nick_backend::config::Config;
use nick_backend::{app, logger};

fn main() -> ExitCode {
    // Optional config file path (without extension), default "config"
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());

    let cfg = match Config::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            return ExitCode::FAILURE;
        }
    };
    logger::init(&cfg);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            logger::log_error(&format!("Failed to start runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(app::run(cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
