use anyhow::Context;
use backend::app::{self, RunSummary, EXIT_FATAL, EXIT_SUCCESS};
use backend::config::AppConfig;
use backend::logging::init_logging;
use backend::system::System;

fn run(config: &AppConfig) -> anyhow::Result<RunSummary> {
    app::launch(config, System::new, System::load_gl).context("quad initialization failure")
}

fn main() {
    let config = AppConfig::default();
    init_logging(config.logging.clone());
    log::info!("IT BEGINS!");
    let config = config.with_env_overrides();

    let code = match run(&config) {
        Ok(summary) => {
            if !summary.build.is_ok() {
                log::warn!("exited after running with a broken shader program");
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            EXIT_FATAL
        }
    };
    std::process::exit(code);
}
