use std::path::PathBuf;

use log::{debug, error};

use super::*;
use crate::options::RunConfig;
use crate::plot;

/// Sole owner of the outputs of one run: the optional log file and the
/// optional plot series.
pub struct Recording {
    log: Option<SampleLog>,
    series: Option<SeriesBuffer>,
    plot_path: Option<PathBuf>,
    sample_count: usize,
}

impl Recording {
    pub fn open(config: &RunConfig) -> Result<Self, Error> {
        let log = config.log.as_deref().map(SampleLog::create).transpose()?;
        let series = config.plot.as_ref().map(|_| SeriesBuffer::new());

        Ok(Self {
            log,
            series,
            plot_path: config.plot.clone(),
            sample_count: 0,
        })
    }

    /// Count the sample and append it to the log, if there is one. A failed
    /// write disables the log for the rest of the run.
    pub fn write_sample(&mut self, sample: &Sample) {
        self.sample_count += 1;

        let Some(log) = self.log.as_mut() else {
            return;
        };
        if let Err(err) = log.append(sample) {
            error!("{}; logging disabled for the rest of the run", err);
            self.log = None;
        }
    }

    pub fn buffer_sample(&mut self, sample: &Sample) {
        if let Some(series) = self.series.as_mut() {
            series.push(sample);
        }
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    #[cfg(test)]
    pub fn series(&self) -> Option<&SeriesBuffer> {
        self.series.as_ref()
    }

    pub fn wants_plot(&self) -> bool {
        self.plot_path.is_some()
    }

    /// Render the plot from whatever was buffered and close the log.
    /// Failures are reported and otherwise ignored.
    pub fn finish(self, label: &str) {
        if let (Some(path), Some(series)) = (&self.plot_path, &self.series) {
            debug!("plotting {} samples", series.len());
            match plot::render(path, label, series) {
                Ok(()) => debug!("plot written to {}", path.display()),
                Err(err) => error!("{}", err),
            }
        }

        if let Some(log) = self.log {
            let path = log.path().to_path_buf();
            match log.close() {
                Ok(()) => debug!("{} samples logged to {}", self.sample_count, path.display()),
                Err(err) => error!("{}", err),
            }
        }
    }
}
