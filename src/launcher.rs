use std::process::{Child, Command};

use log::{debug, warn};

use crate::sampler::{Error, Pid};

#[cfg(unix)]
const SHELL: (&str, &str) = ("sh", "-c");
#[cfg(windows)]
const SHELL: (&str, &str) = ("cmd", "/C");

enum Target {
    Existing(Pid),
    Spawned(Child),
}

/// The process to record: either an existing pid, or a shell command this
/// tool started and therefore kills again when dropped.
pub struct Launcher {
    target: Target,
}

impl Launcher {
    /// Treat `process_id_or_command` as a pid if it parses as one, otherwise
    /// run it through the shell.
    pub fn resolve(process_id_or_command: &str) -> Result<Self, Error> {
        if let Ok(pid) = process_id_or_command.trim().parse::<Pid>() {
            println!("Attaching to process {}", pid);
            return Ok(Self {
                target: Target::Existing(pid),
            });
        }

        println!(
            "Starting up command '{}' and attaching to process",
            process_id_or_command
        );
        Self::spawn(SHELL.0, SHELL.1, process_id_or_command)
    }

    fn spawn(shell: &str, flag: &str, command: &str) -> Result<Self, Error> {
        let mut shell = Command::new(shell);
        shell.arg(flag).arg(command);
        // Own process group, so everything the command starts is killed with it.
        #[cfg(unix)]
        std::os::unix::process::CommandExt::process_group(&mut shell, 0);

        let child = shell
            .spawn()
            .map_err(|source| Error::SpawnFailed {
                command: command.to_string(),
                source,
            })?;
        debug!("spawned '{}' as pid {}", command, child.id());

        Ok(Self {
            target: Target::Spawned(child),
        })
    }

    pub fn pid(&self) -> Pid {
        match &self.target {
            Target::Existing(pid) => *pid,
            Target::Spawned(child) => child.id(),
        }
    }

    #[cfg(test)]
    pub fn is_spawned(&self) -> bool {
        matches!(self.target, Target::Spawned(_))
    }
}

impl Drop for Launcher {
    fn drop(&mut self) {
        let Target::Spawned(child) = &mut self.target else {
            return;
        };

        debug!("stopping spawned pid {}", child.id());
        #[cfg(unix)]
        kill_process_group(child.id());

        // Fails with InvalidInput once the child has already been reaped.
        if let Err(err) = child.kill() {
            debug!("kill pid {}: {}", child.id(), err);
        }
        if let Err(err) = child.wait() {
            warn!("unable to reap pid {}: {}", child.id(), err);
        }
    }
}

/// The group id equals the child's pid, see `process_group(0)` in `spawn`.
#[cfg(unix)]
fn kill_process_group(pid: Pid) {
    use nix::sys::signal::{killpg, Signal};

    let Ok(raw) = i32::try_from(pid) else {
        return;
    };
    // ESRCH once every member of the group has exited.
    if let Err(err) = killpg(nix::unistd::Pid::from_raw(raw), Signal::SIGKILL) {
        debug!("kill process group {}: {}", pid, err);
    }
}
