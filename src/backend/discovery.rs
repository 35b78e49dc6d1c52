//! Live topic discovery
//!
//! [`RostopicDiscovery`] asks `rostopic list -v` for the topics currently
//! published on the bus. [`DiscoveryWorker`] runs that query on a background
//! thread at a fixed interval and hands each successful result to the UI
//! thread over a channel; failed polls (no master, tool missing) are skipped.

use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::error::{BagPlayerError, Result, ResultExt};
use crate::types::TopicInfo;

use super::commands::{CommandBuilder, Invocation};

/// Source of the live `{name, type}` topic set
#[cfg_attr(test, mockall::automock)]
pub trait TopicDiscovery {
    fn published_topics(&self) -> Result<Vec<TopicInfo>>;
}

/// [`TopicDiscovery`] that shells out to `rostopic list -v`
#[derive(Debug, Clone)]
pub struct RostopicDiscovery {
    invocation: Invocation,
}

impl RostopicDiscovery {
    pub fn new(commands: &CommandBuilder) -> Self {
        Self {
            invocation: commands.topic_list(),
        }
    }
}

impl TopicDiscovery for RostopicDiscovery {
    fn published_topics(&self) -> Result<Vec<TopicInfo>> {
        let output = Command::new(&self.invocation.program)
            .args(&self.invocation.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| BagPlayerError::Spawn {
                program: self.invocation.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(BagPlayerError::ToolOutput {
                program: self.invocation.program.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_topic_listing(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse the "Published topics:" section of `rostopic list -v`
///
/// ```text
/// Published topics:
///  * /rosout_agg [rosgraph_msgs/Log] 1 publisher
///
/// Subscribed topics:
///  * /rosout [rosgraph_msgs/Log] 1 subscriber
/// ```
pub fn parse_topic_listing(text: &str) -> Vec<TopicInfo> {
    let mut topics = Vec::new();
    let mut in_published = false;

    for line in text.lines() {
        let line = line.trim();
        if line.ends_with("topics:") {
            in_published = line == "Published topics:";
            continue;
        }
        if !in_published {
            continue;
        }

        let Some(rest) = line.strip_prefix("* ") else {
            continue;
        };
        let mut parts = rest.split_whitespace();
        let Some(name) = parts.next() else {
            continue;
        };
        let datatype = parts
            .next()
            .and_then(|t| t.strip_prefix('['))
            .and_then(|t| t.strip_suffix(']'))
            .unwrap_or_default();

        topics.push(TopicInfo::new(name, datatype));
    }

    topics
}

/// Background poller feeding topic sets to the UI thread
pub struct DiscoveryWorker {
    results: Receiver<Vec<TopicInfo>>,
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DiscoveryWorker {
    /// Start polling `discovery` every `interval`
    pub fn spawn<D>(discovery: D, interval: Duration) -> Result<Self>
    where
        D: TopicDiscovery + Send + 'static,
    {
        let (result_tx, result_rx) = bounded(8);
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);

        let handle = std::thread::Builder::new()
            .name("topic-discovery".to_string())
            .spawn(move || {
                tracing::debug!("Topic discovery started ({:?} interval)", interval);
                loop {
                    match discovery.published_topics() {
                        Ok(topics) => match result_tx.try_send(topics) {
                            Ok(()) | Err(TrySendError::Full(_)) => {}
                            Err(TrySendError::Disconnected(_)) => break,
                        },
                        Err(e) => tracing::trace!("Topic discovery poll failed: {}", e),
                    }

                    match shutdown_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        _ => break,
                    }
                }
                tracing::debug!("Topic discovery stopped");
            })
            .map_err(BagPlayerError::from)
            .context("Failed to start topic discovery thread")?;

        Ok(Self {
            results: result_rx,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Most recent poll result since the last call, if any
    pub fn latest(&self) -> Option<Vec<TopicInfo>> {
        self.results.try_iter().last()
    }

    /// Stop the poller and wait for its thread
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for DiscoveryWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "
Published topics:
 * /rosout_agg [rosgraph_msgs/Log] 1 publisher
 * /odom [nav_msgs/Odometry] 2 publishers
 * /clock [rosgraph_msgs/Clock] 1 publisher

Subscribed topics:
 * /rosout [rosgraph_msgs/Log] 1 subscriber
 * /cmd_vel [geometry_msgs/Twist] 1 subscriber
";

    #[test]
    fn test_parse_only_published_section() {
        let topics = parse_topic_listing(LISTING);
        let names: Vec<_> = topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["/rosout_agg", "/odom", "/clock"]);
        assert_eq!(topics[1].datatype, "nav_msgs/Odometry");
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse_topic_listing("").is_empty());
        assert!(parse_topic_listing("\nPublished topics:\n\nSubscribed topics:\n").is_empty());
    }

    #[test]
    fn test_parse_missing_type() {
        let topics = parse_topic_listing("Published topics:\n * /weird\n");
        assert_eq!(topics, vec![TopicInfo::new("/weird", "")]);
    }

    #[test]
    fn test_worker_delivers_results() {
        let mut discovery = MockTopicDiscovery::new();
        discovery
            .expect_published_topics()
            .returning(|| Ok(vec![TopicInfo::new("/a", "std_msgs/Int32")]));

        let mut worker = DiscoveryWorker::spawn(discovery, Duration::from_millis(5)).unwrap();

        let mut latest = None;
        for _ in 0..200 {
            latest = worker.latest();
            if latest.is_some() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        worker.shutdown();

        assert_eq!(latest, Some(vec![TopicInfo::new("/a", "std_msgs/Int32")]));
    }

    #[test]
    fn test_worker_skips_failed_polls() {
        let mut discovery = MockTopicDiscovery::new();
        discovery.expect_published_topics().returning(|| {
            Err(BagPlayerError::ToolOutput {
                program: "rostopic".to_string(),
                message: "ERROR: Unable to communicate with master!".to_string(),
            })
        });

        let mut worker = DiscoveryWorker::spawn(discovery, Duration::from_millis(5)).unwrap();
        std::thread::sleep(Duration::from_millis(30));
        assert!(worker.latest().is_none());
        worker.shutdown();
    }
}
