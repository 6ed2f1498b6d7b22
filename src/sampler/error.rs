use std::path::PathBuf;

use thiserror::Error;

use super::Pid;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no such process - {0}")]
    AttachFailed(Pid),

    #[error("unable to launch command '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read counters for process {0}")]
    SampleQueryFailed(Pid),

    #[error("unable to write log file {}: {source}", .path.display())]
    LogFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not generate graph {}: {reason}", .path.display())]
    RenderFailed { path: PathBuf, reason: String },

    #[error("unable to register the termination handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),
}
