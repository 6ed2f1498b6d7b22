use clap::Parser;
use log::{debug, warn};
use std::process::ExitCode;

mod cancel_status;
mod launcher;
mod options;
mod plot;
mod sampler;

use cancel_status::CancelStatus;
use launcher::Launcher;
use options::{Options, RunConfig};
use sampler::SystemProbe;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = RunConfig::from(Options::parse());

    let cancel_status = CancelStatus::new();
    if let Err(error) = cancel_status.activate_termination_handler() {
        warn!("{}", error);
    }

    let launcher = match Launcher::resolve(&config.process_id_or_command) {
        Ok(launcher) => launcher,
        Err(error) => {
            eprintln!("Failed to sample {} - {}", config.process_id_or_command, error);
            return ExitCode::FAILURE;
        }
    };

    let pid = launcher.pid();
    let result = sampler::record(pid, &config, SystemProbe::new(), &cancel_status);
    drop(launcher);

    match result {
        Ok(summary) => {
            debug!("{:?}", summary);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Failed to sample pid {} - {}", pid, error);
            ExitCode::FAILURE
        }
    }
}
