use std::process::Command;
use std::thread;

use crate::lock::domain::lock_actuator::LockActuator;

/// Locks the workstation by spawning a platform lock command.
///
/// The spawn is fire-and-forget: `trigger_lock` returns as soon as the
/// child process has started. A detached supervisor thread waits on the
/// child purely to log its exit status; the exit status never feeds back
/// into monitor control flow.
pub struct CommandLockActuator {
    program: String,
    args: Vec<String>,
}

impl CommandLockActuator {
    /// Actuator for the current platform's native lock command.
    pub fn platform_default() -> Self {
        let (program, args) = platform_lock_command();
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Actuator for a user-supplied command line (program + arguments).
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?.to_string();
        Some(Self {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl LockActuator for CommandLockActuator {
    fn trigger_lock(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let mut child = Command::new(&self.program).args(&self.args).spawn()?;
        let program = self.program.clone();

        // Reap the child and log its exit status; nothing downstream
        // depends on the outcome.
        thread::spawn(move || match child.wait() {
            Ok(status) if status.success() => {
                log::debug!("lock command '{program}' exited cleanly");
            }
            Ok(status) => {
                log::warn!("lock command '{program}' exited with {status}");
            }
            Err(e) => {
                log::warn!("failed to wait on lock command '{program}': {e}");
            }
        });

        Ok(())
    }
}

fn platform_lock_command() -> (&'static str, &'static [&'static str]) {
    #[cfg(target_os = "windows")]
    {
        ("rundll32", &["user32.dll,LockWorkStation"])
    }
    #[cfg(target_os = "macos")]
    {
        ("pmset", &["displaysleepnow"])
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        ("loginctl", &["lock-session"])
    }
}
