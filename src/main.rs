//! `plane-scene`: open the window and fly around the scene.

use std::process::ExitCode;

use plane_scene::{init_logging, run, DemoConfig};

fn main() -> ExitCode {
    let config = DemoConfig::default();
    init_logging(config.logging.clone());

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
