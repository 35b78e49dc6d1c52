//! Detached process control
//!
//! Launches are fire-and-forget: the caller keeps only a [`ProcessTag`], which
//! doubles as the ROS node name (`__name:=<tag>`) so the process can later be
//! terminated with `rosnode kill /<tag>`. Nothing here reports whether the
//! external process actually started its work or exited.

use std::fmt;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{BagPlayerError, Result};

use super::commands::{CommandBuilder, Invocation};

/// The two kinds of long-running processes the panel manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessKind {
    Record,
    Play,
}

impl ProcessKind {
    fn prefix(self) -> &'static str {
        match self {
            ProcessKind::Record => "record",
            ProcessKind::Play => "play",
        }
    }
}

/// Unique name of one launched recorder or player
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessTag(String);

impl ProcessTag {
    /// Wrap an existing tag string
    pub fn from_raw(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates `record_<ns>` / `play_<ns>` tags
///
/// The stamp is the wall clock in nanoseconds, bumped so it is strictly
/// increasing within one generator even if the clock stalls or steps back.
#[derive(Debug, Default)]
pub struct TagGenerator {
    last_stamp: u64,
}

impl TagGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, kind: ProcessKind) -> ProcessTag {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let stamp = now.max(self.last_stamp + 1);
        self.last_stamp = stamp;
        ProcessTag(format!("{}_{}", kind.prefix(), stamp))
    }
}

/// Capability to start and stop external processes
///
/// Both operations are best-effort. An `Err` only means the request itself
/// could not be issued; success says nothing about the target process.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner {
    /// Launch `invocation` detached from the panel
    fn start(&self, invocation: &Invocation) -> Result<()>;

    /// Ask the process named `tag` to terminate
    fn stop(&self, tag: &ProcessTag) -> Result<()>;
}

/// [`ProcessRunner`] backed by `std::process`
///
/// Each child is handed to a short-lived reaper thread that waits for it and
/// logs the exit status, so finished tools do not linger as zombies.
#[derive(Debug, Clone)]
pub struct DetachedRunner {
    commands: CommandBuilder,
}

impl DetachedRunner {
    pub fn new(commands: CommandBuilder) -> Self {
        Self { commands }
    }
}

impl ProcessRunner for DetachedRunner {
    fn start(&self, invocation: &Invocation) -> Result<()> {
        tracing::debug!("Launching: {}", invocation);

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| BagPlayerError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let label = invocation
            .node_name()
            .map(str::to_string)
            .unwrap_or_else(|| invocation.program.clone());
        let pid = child.id();

        std::thread::Builder::new()
            .name(format!("reap-{}", pid))
            .spawn(move || match child.wait() {
                Ok(status) => tracing::debug!("{} (pid {}) exited: {}", label, pid, status),
                Err(e) => tracing::warn!("Failed to wait for {} (pid {}): {}", label, pid, e),
            })?;

        Ok(())
    }

    fn stop(&self, tag: &ProcessTag) -> Result<()> {
        self.start(&self.commands.kill(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_unique_and_prefixed() {
        let mut tags = TagGenerator::new();
        let a = tags.next(ProcessKind::Record);
        let b = tags.next(ProcessKind::Record);
        let c = tags.next(ProcessKind::Play);

        assert!(a.as_str().starts_with("record_"));
        assert!(c.as_str().starts_with("play_"));
        assert_ne!(a, b);

        let stamp = |t: &ProcessTag| -> u64 {
            t.as_str().rsplit('_').next().unwrap().parse().unwrap()
        };
        assert!(stamp(&b) > stamp(&a));
        assert!(stamp(&c) > stamp(&b));
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let runner = DetachedRunner::new(CommandBuilder::default());
        let inv = Invocation::new("/nonexistent/bagplayer-test-binary").arg("record");
        let err = runner.start(&inv).unwrap_err();
        assert!(matches!(err, BagPlayerError::Spawn { .. }));
    }

    #[cfg(unix)]
    fn runner_with_true() -> DetachedRunner {
        DetachedRunner::new(CommandBuilder::new(crate::config::ToolsConfig {
            rosbag: "true".to_string(),
            rosnode: "true".to_string(),
            rostopic: "true".to_string(),
        }))
    }

    #[cfg(unix)]
    #[test]
    fn test_start_launches_and_reaps_child() {
        let runner = runner_with_true();
        let inv = Invocation::new("true").arg("__name:=play_1");

        assert!(runner.start(&inv).is_ok());
        // Let the reaper collect the exit status
        std::thread::sleep(std::time::Duration::from_millis(100));
    }

    #[cfg(unix)]
    #[test]
    fn test_stop_issues_kill_command() {
        let runner = runner_with_true();
        assert!(runner.stop(&ProcessTag::from_raw("record_1")).is_ok());
    }
}
