use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Record CPU and memory usage for a process")]
pub struct Options {
    /// The process id or command
    pub process_id_or_command: String,
    /// Output the statistics to a file
    #[arg(long, value_name = "PATH")]
    pub log: Option<PathBuf>,
    /// Output the statistics to a plot
    #[arg(long, value_name = "PATH")]
    pub plot: Option<PathBuf>,
    /// How long to record for (in seconds). If not specified, the recording
    /// is continuous until the job exits.
    #[arg(long, value_name = "SECONDS", value_parser = parse_duration)]
    pub duration: Option<Duration>,
    /// How long to wait between each sample (in seconds). By default the
    /// process is sampled as often as possible.
    #[arg(long, value_name = "SECONDS", value_parser = parse_interval)]
    pub interval: Option<Duration>,
    /// Include sub-processes in statistics (results in a slower maximum
    /// sampling rate).
    #[arg(long)]
    pub include_children: bool,
}

/// Everything one run needs, fixed for its whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub process_id_or_command: String,
    pub log: Option<PathBuf>,
    pub plot: Option<PathBuf>,
    pub duration: Option<Duration>,
    pub interval: Option<Duration>,
    pub include_children: bool,
}

impl From<Options> for RunConfig {
    fn from(options: Options) -> Self {
        Self {
            process_id_or_command: options.process_id_or_command,
            log: options.log,
            plot: options.plot,
            duration: options.duration,
            interval: options.interval,
            include_children: options.include_children,
        }
    }
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| format!("'{}' is not a valid number of seconds", value))
}

fn parse_duration(value: &str) -> Result<Duration, String> {
    let duration = parse_seconds(value)?;
    if duration.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(duration)
}

fn parse_interval(value: &str) -> Result<Duration, String> {
    parse_seconds(value)
}
