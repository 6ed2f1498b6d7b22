use std::time::{Duration, Instant};

use log::debug;

use crate::cancel_status::CancelStatus;
use crate::options::RunConfig;

mod error;
mod process_probe;
mod process_set;
mod recording;
mod sample;
mod sample_log;
mod series_buffer;

pub use error::Error;
pub use process_probe::{ProcessProbe, SystemProbe};
pub use process_set::ProcessSet;
pub use recording::Recording;
pub use sample::{ProcessUsage, Sample};
pub use sample_log::SampleLog;
pub use series_buffer::SeriesBuffer;

pub type Pid = u32;

/// Why the sampling loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    DurationElapsed,
    TargetExited,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub stop: StopReason,
    pub samples: usize,
}

pub struct Sampler<P> {
    probe: P,
    process_set: ProcessSet,
    include_children: bool,
}

impl<P: ProcessProbe> Sampler<P> {
    pub fn attach(mut probe: P, pid: Pid, include_children: bool) -> Result<Self, Error> {
        let process_set = probe.attach(pid)?;
        debug!("attached to {} ({})", pid, process_set.name);

        Ok(Self {
            probe,
            process_set,
            include_children,
        })
    }

    pub fn process_set(&self) -> &ProcessSet {
        &self.process_set
    }

    pub fn label(&self) -> String {
        self.process_set.label(self.include_children)
    }

    /// Poll until the duration runs out, the target goes away or `cancel`
    /// fires. A failed read of the target's counters counts as the target
    /// having exited, even on the first tick.
    pub fn run(
        &mut self,
        duration: Option<Duration>,
        interval: Option<Duration>,
        recording: &mut Recording,
        cancel: &CancelStatus,
    ) -> StopReason {
        let start = Instant::now();

        loop {
            if cancel.is_canceled() {
                return StopReason::Terminated;
            }

            let elapsed = start.elapsed();
            if duration.is_some_and(|duration| elapsed > duration) {
                return StopReason::DurationElapsed;
            }

            let sample = match self.take_sample(elapsed) {
                Ok(sample) => sample,
                Err(err) => {
                    debug!("{}", err);
                    return StopReason::TargetExited;
                }
            };

            // Signal arrived mid-tick; the sample is abandoned.
            if cancel.is_canceled() {
                return StopReason::Terminated;
            }

            recording.write_sample(&sample);

            if let Some(interval) = interval {
                cancel.wait_timeout(interval);
            }

            recording.buffer_sample(&sample);
        }
    }

    fn take_sample(&mut self, elapsed: Duration) -> Result<Sample, Error> {
        self.probe
            .refresh(&self.process_set.monitored(self.include_children));

        let mut usage = self.probe.usage(self.process_set.target)?;
        if self.include_children {
            for &child in &self.process_set.children {
                match self.probe.usage(child) {
                    Ok(child_usage) => usage += child_usage,
                    Err(err) => debug!("skipping child this tick: {}", err),
                }
            }
        }

        Ok(Sample::new(elapsed, usage))
    }
}

/// Record `pid` according to `config` until the run completes or is
/// terminated, then write the plot and close the log.
pub fn record<P: ProcessProbe>(
    pid: Pid,
    config: &RunConfig,
    probe: P,
    cancel: &CancelStatus,
) -> Result<RunSummary, Error> {
    let mut sampler = Sampler::attach(probe, pid, config.include_children)?;
    let monitored = sampler.process_set().monitored(config.include_children);
    debug!("recording pids {:?}", monitored);
    let mut recording = Recording::open(config)?;

    let stop = sampler.run(config.duration, config.interval, &mut recording, cancel);
    if stop == StopReason::Terminated && recording.wants_plot() {
        println!("Termination signal received. Generating graphs...");
    }

    let samples = recording.sample_count();
    recording.finish(&sampler.label());
    debug!("stopped after {} samples: {:?}", samples, stop);

    Ok(RunSummary { stop, samples })
}
