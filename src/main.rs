//! vizdemos - audio spectrum analyzer and spinning cube
//!
//! `vizdemos spectrum` captures what the system is playing and draws it as
//! a log-frequency bar chart; `vizdemos cube` spins a colour cube.

use std::process::ExitCode;

use clap::Parser;
use log::error;

use vizdemos::app;
use vizdemos::cli::{Args, Demo};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let result = match args.demo {
        Demo::Spectrum(spectrum) => {
            app::run_spectrum(spectrum.window_config(), spectrum.capture_config())
        }
        Demo::Cube(cube) => app::run_cube(cube.window_config(), cube.projection()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
