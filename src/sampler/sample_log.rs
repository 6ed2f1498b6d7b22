use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::*;

const COLUMNS: [&str; 4] = ["Elapsed time", "CPU (%)", "Real (MB)", "Virtual (MB)"];

/// Fixed-width text log, one line per sample, flushed after every write so
/// the file is usable even if the recorder is killed.
pub struct SampleLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl SampleLog {
    /// Create (or truncate) the log file and write the header line.
    pub fn create(path: &Path) -> Result<Self, Error> {
        let file = File::create(path).map_err(|source| Error::LogFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let mut log = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        };
        log.write_line(&header())?;
        Ok(log)
    }

    pub fn append(&mut self, sample: &Sample) -> Result<(), Error> {
        self.write_line(&format_sample(sample))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn close(mut self) -> Result<(), Error> {
        self.writer
            .flush()
            .and_then(|_| self.writer.get_ref().sync_all())
            .map_err(|source| Error::LogFailed {
                path: self.path.clone(),
                source,
            })
    }

    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|source| Error::LogFailed {
                path: self.path.clone(),
                source,
            })
    }
}

pub fn header() -> String {
    format!(
        "# {:^12} {:^12} {:^12} {:^12}\n",
        COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3]
    )
}

pub fn format_sample(sample: &Sample) -> String {
    format!(
        "{:12.3} {:12.3} {:12.3} {:12.3}\n",
        sample.elapsed_seconds, sample.cpu_percent, sample.mem_real_mb, sample.mem_virtual_mb
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(elapsed_seconds: f64) -> Sample {
        Sample {
            elapsed_seconds,
            cpu_percent: 99.5,
            mem_real_mb: 12.25,
            mem_virtual_mb: 1024.0,
        }
    }

    #[test]
    fn test_header_columns_centered() {
        assert_eq!(
            header(),
            "# Elapsed time   CPU (%)     Real (MB)   Virtual (MB)\n"
        );
    }

    #[test]
    fn test_sample_line_fixed_width() {
        let line = format_sample(&Sample {
            elapsed_seconds: 0.1234,
            cpu_percent: 101.0,
            mem_real_mb: 5.5,
            mem_virtual_mb: 2048.25,
        });

        assert_eq!(
            line,
            "       0.123      101.000        5.500     2048.250\n"
        );
        assert_eq!(line.len(), 4 * 12 + 3 + 1);
    }

    #[test]
    fn test_log_has_header_and_one_line_per_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage.log");

        let mut log = SampleLog::create(&path).unwrap();
        log.append(&sample(0.0)).unwrap();
        log.append(&sample(0.5)).unwrap();
        log.append(&sample(1.0)).unwrap();
        log.close().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("# "));
        assert_eq!(lines[3], "       1.000       99.500       12.250     1024.000");
    }

    #[test]
    fn test_lines_visible_before_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage.log");

        let mut log = SampleLog::create(&path).unwrap();
        log.append(&sample(0.0)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        drop(log);
    }

    #[test]
    fn test_existing_file_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usage.log");
        std::fs::write(&path, "stale content\nfrom a previous run\n").unwrap();

        SampleLog::create(&path).unwrap().close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), header());
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("usage.log");

        let result = SampleLog::create(&path);

        assert!(matches!(result, Err(Error::LogFailed { .. })));
    }
}
