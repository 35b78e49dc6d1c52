//! ROS bag index reader
//!
//! Opens a bag with the `rosbag` crate and walks only its index section:
//! connection records give each topic and its message type, chunk-info
//! records give the time span and per-connection message counts. Message
//! payloads are never decoded.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rosbag::{IndexRecord, RosBag};

use crate::error::{BagPlayerError, Result};
use crate::types::{BagTime, TopicEntry};

/// A topic stored in a bag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagTopic {
    pub name: String,
    pub datatype: String,
    pub message_count: u64,
}

/// Index summary of one bag file
#[derive(Debug, Clone, PartialEq)]
pub struct BagSummary {
    pub path: PathBuf,
    pub begin: BagTime,
    pub end: BagTime,
    pub topics: Vec<BagTopic>,
}

impl BagSummary {
    /// Length of the recording in seconds
    pub fn duration(&self) -> f64 {
        (self.end - self.begin).max(0.0)
    }

    pub fn message_count(&self) -> u64 {
        self.topics.iter().map(|t| t.message_count).sum()
    }

    /// One included selection entry per topic
    pub fn topic_entries(&self) -> Vec<TopicEntry> {
        self.topics
            .iter()
            .map(|t| TopicEntry::new(&t.name, &t.datatype).with_message_count(t.message_count))
            .collect()
    }
}

/// Read access to bag files
#[cfg_attr(test, mockall::automock)]
pub trait LogStore {
    /// Read the index of the bag at `path`
    fn open(&self, path: &Path) -> Result<BagSummary>;
}

/// [`LogStore`] reading bag indexes straight from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct BagIndexReader;

impl LogStore for BagIndexReader {
    fn open(&self, path: &Path) -> Result<BagSummary> {
        let bag = RosBag::new(path).map_err(|e| open_error(e, path))?;

        let mut index = IndexSummary::default();
        for (n, record) in bag.index_records().enumerate() {
            // A recording that was never closed has no index to start from
            let record = record.map_err(|e| {
                if n == 0 {
                    BagPlayerError::UnindexedBag(path.to_path_buf())
                } else {
                    BagPlayerError::invalid_bag(path, format!("{:?}", e))
                }
            })?;

            match record {
                IndexRecord::Connection(conn) => index.add_connection(conn.id, conn.topic, conn.tp),
                IndexRecord::ChunkInfo(info) => index.add_chunk(
                    BagTime::from_nanos(info.start_time),
                    BagTime::from_nanos(info.end_time),
                    info.entries().map(|entry| (entry.conn_id, entry.count)),
                ),
                _ => {}
            }
        }

        tracing::debug!(
            "Indexed {:?}: {} connections, {} chunks",
            path,
            index.connections.len(),
            index.chunks
        );
        Ok(index.finish(path))
    }
}

fn open_error(err: std::io::Error, path: &Path) -> BagPlayerError {
    match err.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => BagPlayerError::Io(err),
        _ => BagPlayerError::invalid_bag(path, err.to_string()),
    }
}

/// Index records folded into a summary
#[derive(Debug, Default)]
struct IndexSummary {
    /// (conn id, topic, type) in file order
    connections: Vec<(u32, String, String)>,
    counts: HashMap<u32, u64>,
    begin: Option<BagTime>,
    end: Option<BagTime>,
    chunks: usize,
}

impl IndexSummary {
    fn add_connection(&mut self, id: u32, topic: &str, datatype: &str) {
        self.connections
            .push((id, topic.to_string(), datatype.to_string()));
    }

    fn add_chunk(
        &mut self,
        start: BagTime,
        end: BagTime,
        counts: impl IntoIterator<Item = (u32, u32)>,
    ) {
        self.begin = Some(self.begin.map_or(start, |b| b.min(start)));
        self.end = Some(self.end.map_or(end, |e| e.max(end)));
        self.chunks += 1;
        for (conn, n) in counts {
            *self.counts.entry(conn).or_insert(0) += n as u64;
        }
    }

    fn finish(self, path: &Path) -> BagSummary {
        // Several connections may share a topic; merge them under the first one
        let mut topics: Vec<BagTopic> = Vec::new();
        for (conn, name, datatype) in self.connections {
            let n = self.counts.get(&conn).copied().unwrap_or(0);
            match topics.iter_mut().find(|t| t.name == name) {
                Some(existing) => existing.message_count += n,
                None => topics.push(BagTopic {
                    name,
                    datatype,
                    message_count: n,
                }),
            }
        }

        BagSummary {
            path: path.to_path_buf(),
            begin: self.begin.unwrap_or(BagTime::ZERO),
            end: self.end.unwrap_or(BagTime::ZERO),
            topics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connections_sharing_a_topic_merge() {
        let mut index = IndexSummary::default();
        index.add_connection(0, "/tf", "tf2_msgs/TFMessage");
        index.add_connection(4, "/imu", "sensor_msgs/Imu");
        index.add_connection(9, "/tf", "tf2_msgs/TFMessage");
        index.add_chunk(BagTime::new(1, 0), BagTime::new(2, 0), [(0, 3), (4, 1), (9, 4)]);

        let summary = index.finish(Path::new("a.bag"));

        let names: Vec<&str> = summary.topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["/tf", "/imu"]);
        assert_eq!(summary.topics[0].message_count, 7);
        assert_eq!(summary.topics[1].message_count, 1);
    }

    #[test]
    fn test_span_covers_chunks_out_of_order() {
        let mut index = IndexSummary::default();
        index.add_chunk(BagTime::new(20, 0), BagTime::new(30, 0), []);
        index.add_chunk(BagTime::new(10, 5), BagTime::new(15, 0), []);

        let summary = index.finish(Path::new("a.bag"));

        assert_eq!(summary.begin, BagTime::new(10, 5));
        assert_eq!(summary.end, BagTime::new(30, 0));
    }

    #[test]
    fn test_no_chunks_gives_zero_span() {
        let mut index = IndexSummary::default();
        index.add_connection(1, "/idle", "std_msgs/Empty");

        let summary = index.finish(Path::new("idle.bag"));

        assert_eq!(summary.begin, BagTime::ZERO);
        assert_eq!(summary.end, BagTime::ZERO);
        assert_eq!(summary.topics[0].message_count, 0);
    }

    #[test]
    fn test_counts_for_unknown_connections_are_ignored() {
        let mut index = IndexSummary::default();
        index.add_connection(1, "/a", "std_msgs/Int32");
        index.add_chunk(BagTime::new(1, 0), BagTime::new(1, 0), [(1, 2), (77, 50)]);

        let summary = index.finish(Path::new("a.bag"));

        assert_eq!(summary.message_count(), 2);
    }

    #[test]
    fn test_missing_file_stays_io_error() {
        let err = open_error(ErrorKind::NotFound.into(), Path::new("gone.bag"));
        assert!(matches!(err, BagPlayerError::Io(_)));

        let err = open_error(ErrorKind::InvalidData.into(), Path::new("text.bag"));
        assert!(matches!(err, BagPlayerError::InvalidBag { .. }));
    }

    #[test]
    fn test_summary_duration_never_negative() {
        let summary = BagSummary {
            path: PathBuf::from("x.bag"),
            begin: BagTime::new(10, 0),
            end: BagTime::new(5, 0),
            topics: Vec::new(),
        };
        assert_eq!(summary.duration(), 0.0);
    }
}
