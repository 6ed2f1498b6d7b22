use sysinfo::{ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System};

use super::*;

/// Source of per-process counters.
pub trait ProcessProbe {
    /// Resolve `pid` to a live process and capture its direct children.
    fn attach(&mut self, pid: Pid) -> Result<ProcessSet, Error>;

    /// Update the counters of the given processes ahead of `usage` calls.
    fn refresh(&mut self, pids: &[Pid]);

    /// Counters as of the last `refresh`. Fails once the process has exited.
    fn usage(&self, pid: Pid) -> Result<ProcessUsage, Error>;
}

/// `ProcessProbe` backed by the operating system through `sysinfo`.
pub struct SystemProbe {
    system: System,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }

    fn live_process(&self, pid: Pid) -> Option<&sysinfo::Process> {
        self.system
            .process(sysinfo::Pid::from_u32(pid))
            .filter(|process| {
                !matches!(process.status(), ProcessStatus::Zombie | ProcessStatus::Dead)
            })
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessProbe for SystemProbe {
    fn attach(&mut self, pid: Pid) -> Result<ProcessSet, Error> {
        self.system.refresh_processes(ProcessesToUpdate::All, true);

        let name = self
            .live_process(pid)
            .ok_or(Error::AttachFailed(pid))?
            .name()
            .to_string_lossy()
            .into_owned();

        // Linux reports threads as tasks whose parent is the owning process.
        let target = sysinfo::Pid::from_u32(pid);
        let children = self
            .system
            .processes()
            .iter()
            .filter(|(_, process)| {
                process.parent() == Some(target) && process.thread_kind().is_none()
            })
            .map(|(child, _)| child.as_u32())
            .collect();

        Ok(ProcessSet::new(pid, name, children))
    }

    fn refresh(&mut self, pids: &[Pid]) {
        let pids: Vec<sysinfo::Pid> = pids.iter().copied().map(sysinfo::Pid::from_u32).collect();
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&pids),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
    }

    fn usage(&self, pid: Pid) -> Result<ProcessUsage, Error> {
        let process = self.live_process(pid).ok_or(Error::SampleQueryFailed(pid))?;
        Ok(ProcessUsage {
            cpu_percent: f64::from(process.cpu_usage()),
            resident_bytes: process.memory(),
            virtual_bytes: process.virtual_memory(),
        })
    }
}
