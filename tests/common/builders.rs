//! Test data builders for creating test objects

use std::path::{Path, PathBuf};

use bagplayer_rs::backend::{BagSummary, BagTopic};
use bagplayer_rs::BagTime;

const MAGIC: &[u8] = b"#ROSBAG V2.0\n";
const OP_BAG_HEADER: u8 = 0x03;
const OP_CHUNK_INFO: u8 = 0x06;
const OP_CONNECTION: u8 = 0x07;
const BAG_HEADER_RECORD_LEN: usize = 4096;

/// Builder for synthetic ROS bag v2.0 files
///
/// Only the parts an index reader looks at are written: the bag header
/// record, an opaque blob standing in for the chunk section, then the
/// connection and chunk-info records of the index.
pub struct BagFileBuilder {
    connections: Vec<(u32, String, String)>,
    chunks: Vec<(BagTime, BagTime, Vec<(u32, u32)>)>,
    indexed: bool,
}

impl BagFileBuilder {
    pub fn new() -> Self {
        Self {
            connections: Vec::new(),
            chunks: Vec::new(),
            indexed: true,
        }
    }

    pub fn connection(mut self, conn: u32, topic: &str, datatype: &str) -> Self {
        self.connections
            .push((conn, topic.to_string(), datatype.to_string()));
        self
    }

    /// Add a chunk spanning `start..end` holding `counts` messages per connection
    pub fn chunk(mut self, start: BagTime, end: BagTime, counts: &[(u32, u32)]) -> Self {
        self.chunks.push((start, end, counts.to_vec()));
        self
    }

    /// Write `index_pos = 0`, as a recording that was never closed
    pub fn unindexed(mut self) -> Self {
        self.indexed = false;
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        // Stand-in for the chunk records the reader skips over
        let blob = vec![0xAAu8; 64];

        let header_len = bag_header(0, 0, 0).len();
        let index_pos = if self.indexed {
            (MAGIC.len() + header_len + blob.len()) as u64
        } else {
            0
        };

        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        out.extend(bag_header(
            index_pos,
            self.connections.len() as u32,
            self.chunks.len() as u32,
        ));
        out.extend(&blob);

        for (conn, topic, datatype) in &self.connections {
            let mut header = field("op", &[OP_CONNECTION]);
            header.extend(field("conn", &conn.to_le_bytes()));
            header.extend(field("topic", topic.as_bytes()));

            let mut data = field("topic", topic.as_bytes());
            data.extend(field("type", datatype.as_bytes()));
            data.extend(field("md5sum", b"0123456789abcdef0123456789abcdef"));
            data.extend(field("message_definition", b"string data\n"));

            out.extend(record(&header, &data));
        }

        for (start, end, counts) in &self.chunks {
            let mut header = field("op", &[OP_CHUNK_INFO]);
            header.extend(field("ver", &1u32.to_le_bytes()));
            header.extend(field("chunk_pos", &(MAGIC.len() as u64).to_le_bytes()));
            header.extend(field("start_time", &time_bytes(*start)));
            header.extend(field("end_time", &time_bytes(*end)));
            header.extend(field("count", &(counts.len() as u32).to_le_bytes()));

            let mut data = Vec::new();
            for (conn, n) in counts {
                data.extend_from_slice(&conn.to_le_bytes());
                data.extend_from_slice(&n.to_le_bytes());
            }

            out.extend(record(&header, &data));
        }

        out
    }

    /// Write the bag into `dir` and return its path
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.to_bytes()).unwrap();
        path
    }
}

impl Default for BagFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn field(name: &str, value: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&((name.len() + 1 + value.len()) as u32).to_le_bytes());
    out.extend_from_slice(name.as_bytes());
    out.push(b'=');
    out.extend_from_slice(value);
    out
}

fn record(header: &[u8], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(header.len() as u32).to_le_bytes());
    out.extend_from_slice(header);
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(data);
    out
}

fn bag_header(index_pos: u64, conn_count: u32, chunk_count: u32) -> Vec<u8> {
    let mut header = field("op", &[OP_BAG_HEADER]);
    header.extend(field("index_pos", &index_pos.to_le_bytes()));
    header.extend(field("conn_count", &conn_count.to_le_bytes()));
    header.extend(field("chunk_count", &chunk_count.to_le_bytes()));
    // Recorders pad the header record with spaces to 4096 bytes
    let padding = vec![b' '; BAG_HEADER_RECORD_LEN - 8 - header.len()];
    record(&header, &padding)
}

fn time_bytes(t: BagTime) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[..4].copy_from_slice(&t.sec.to_le_bytes());
    out[4..].copy_from_slice(&t.nsec.to_le_bytes());
    out
}

/// Index summary with the given topics, all `std_msgs/String`
pub fn bag_summary(path: &str, begin: BagTime, end: BagTime, topics: &[&str]) -> BagSummary {
    BagSummary {
        path: PathBuf::from(path),
        begin,
        end,
        topics: topics
            .iter()
            .map(|name| BagTopic {
                name: name.to_string(),
                datatype: "std_msgs/String".to_string(),
                message_count: 10,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_header_record_is_padded() {
        let bytes = BagFileBuilder::new().to_bytes();
        assert!(bytes.starts_with(MAGIC));
        assert_eq!(bytes.len(), MAGIC.len() + BAG_HEADER_RECORD_LEN + 64);
    }
}
