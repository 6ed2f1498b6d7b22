use std::ops::AddAssign;
use std::time::Duration;

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Raw counters for one process, or the sum over several.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProcessUsage {
    pub cpu_percent: f64,
    pub resident_bytes: u64,
    pub virtual_bytes: u64,
}

impl AddAssign for ProcessUsage {
    fn add_assign(&mut self, other: Self) {
        self.cpu_percent += other.cpu_percent;
        self.resident_bytes = self.resident_bytes.saturating_add(other.resident_bytes);
        self.virtual_bytes = self.virtual_bytes.saturating_add(other.virtual_bytes);
    }
}

/// One tick's worth of aggregated usage, relative to the start of the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub elapsed_seconds: f64,
    pub cpu_percent: f64,
    pub mem_real_mb: f64,
    pub mem_virtual_mb: f64,
}

impl Sample {
    pub fn new(elapsed: Duration, usage: ProcessUsage) -> Self {
        Self {
            elapsed_seconds: elapsed.as_secs_f64(),
            cpu_percent: usage.cpu_percent.max(0.0),
            mem_real_mb: usage.resident_bytes as f64 / BYTES_PER_MB,
            mem_virtual_mb: usage.virtual_bytes as f64 / BYTES_PER_MB,
        }
    }
}
