//! Command lines for the external ROS tools
//!
//! Every interaction with `rosbag`, `rosnode` and `rostopic` goes through an
//! [`Invocation`] built here, so the argument grammar lives in one place:
//!
//! ```text
//! rosbag record <topic>... __name:=<tag>
//! rosbag play <path> -q [--clock] -r <rate> -s <start> [-l] --topics <topic>... __name:=<tag>
//! rosbag filter <src> <dst> "topic == '<a>' or topic == '<b>'"
//! rosnode kill /<tag>
//! rostopic list -v
//! rostopic echo -p <topic>
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{PlaybackSettings, ToolsConfig};

use super::process::ProcessTag;

/// A program together with its argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Value of the `__name:=` remapping, if present
    pub fn node_name(&self) -> Option<&str> {
        self.args.iter().find_map(|a| a.strip_prefix("__name:="))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Everything `rosbag play` needs for one launch
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub bag: PathBuf,
    pub settings: PlaybackSettings,
    /// Seconds into the bag to start from (`-s`)
    pub start_offset: f64,
    pub topics: Vec<String>,
}

/// Builds invocations against the configured tool names
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    tools: ToolsConfig,
}

impl CommandBuilder {
    pub fn new(tools: ToolsConfig) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &ToolsConfig {
        &self.tools
    }

    pub fn record(&self, topics: &[String], tag: &ProcessTag) -> Invocation {
        Invocation::new(&self.tools.rosbag)
            .arg("record")
            .args(topics.iter().cloned())
            .arg(name_remap(tag))
    }

    pub fn play(&self, request: &PlayRequest, tag: &ProcessTag) -> Invocation {
        let mut inv = Invocation::new(&self.tools.rosbag)
            .arg("play")
            .arg(path_arg(&request.bag))
            .arg("-q");

        if request.settings.publish_clock {
            inv = inv.arg("--clock");
        }

        inv = inv
            .arg("-r")
            .arg(format_number(request.settings.rate))
            .arg("-s")
            .arg(format_number(request.start_offset.max(0.0)));

        if request.settings.loop_playback {
            inv = inv.arg("-l");
        }

        inv.arg("--topics")
            .args(request.topics.iter().cloned())
            .arg(name_remap(tag))
    }

    pub fn filter(&self, source: &Path, destination: &Path, topics: &[String]) -> Invocation {
        Invocation::new(&self.tools.rosbag)
            .arg("filter")
            .arg(path_arg(source))
            .arg(path_arg(destination))
            .arg(topic_predicate(topics))
    }

    pub fn kill(&self, tag: &ProcessTag) -> Invocation {
        Invocation::new(&self.tools.rosnode)
            .arg("kill")
            .arg(format!("/{}", tag))
    }

    pub fn topic_list(&self) -> Invocation {
        Invocation::new(&self.tools.rostopic).args(["list", "-v"])
    }

    pub fn echo_csv(&self, topic: &str) -> Invocation {
        Invocation::new(&self.tools.rostopic).args(["echo", "-p", topic])
    }
}

/// Python filter expression selecting exactly `topics`
pub fn topic_predicate(topics: &[String]) -> String {
    topics
        .iter()
        .map(|t| format!("topic == '{}'", t))
        .collect::<Vec<_>>()
        .join(" or ")
}

fn name_remap(tag: &ProcessTag) -> String {
    format!("__name:={}", tag)
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Shortest decimal form, at most millisecond precision
fn format_number(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
