use super::*;

/// In-memory time series kept for plotting.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeriesBuffer {
    pub times: Vec<f64>,
    pub cpu: Vec<f64>,
    pub mem_real: Vec<f64>,
    pub mem_virtual: Vec<f64>,
}

impl SeriesBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: &Sample) {
        self.times.push(sample.elapsed_seconds);
        self.cpu.push(sample.cpu_percent);
        self.mem_real.push(sample.mem_real_mb);
        self.mem_virtual.push(sample.mem_virtual_mb);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn last_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    pub fn max_cpu(&self) -> f64 {
        max_of(&self.cpu)
    }

    /// Largest value across both memory series.
    pub fn max_memory(&self) -> f64 {
        max_of(&self.mem_real).max(max_of(&self.mem_virtual))
    }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(elapsed_seconds: f64, cpu: f64, real: f64, virt: f64) -> Sample {
        Sample {
            elapsed_seconds,
            cpu_percent: cpu,
            mem_real_mb: real,
            mem_virtual_mb: virt,
        }
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = SeriesBuffer::new();

        assert!(buffer.is_empty());
        assert_eq!(buffer.last_time(), 0.0);
        assert_eq!(buffer.max_cpu(), 0.0);
        assert_eq!(buffer.max_memory(), 0.0);
    }

    #[test]
    fn test_series_stay_parallel() {
        let mut buffer = SeriesBuffer::new();
        buffer.push(&sample(0.0, 5.0, 10.0, 100.0));
        buffer.push(&sample(0.5, 150.0, 12.0, 90.0));

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.times, vec![0.0, 0.5]);
        assert_eq!(buffer.cpu, vec![5.0, 150.0]);
        assert_eq!(buffer.mem_real, vec![10.0, 12.0]);
        assert_eq!(buffer.mem_virtual, vec![100.0, 90.0]);
        assert_eq!(buffer.last_time(), 0.5);
        assert_eq!(buffer.max_cpu(), 150.0);
    }

    #[test]
    fn test_max_memory_uses_larger_series() {
        let mut buffer = SeriesBuffer::new();
        buffer.push(&sample(0.0, 0.0, 300.0, 200.0));
        buffer.push(&sample(1.0, 0.0, 250.0, 220.0));

        assert_eq!(buffer.max_memory(), 300.0);
    }
}
