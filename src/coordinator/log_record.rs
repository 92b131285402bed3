use crate::api::{CommitLogEntry, LeaderEpoch};
use crate::commitlog;
use crate::commitlog::LogOffset;
use bytes::{Buf, BufMut, Bytes};
use std::convert::TryFrom;
use std::io;

/// Byte representation (integers little endian):
///
/// ```text
/// +-----+--------+-------+------------+----------+---------+---------+------------------+
/// | Vrs | LogId  | Epoch | MsgOffset  | MsgSize  | MsgCnt  | MsgNum  | Payload ...      |
/// | 1   | 8      | 8     | 8          | 4        | 8       | 4       | variable         |
/// +-----+--------+-------+------------+----------+---------+---------+------------------+
/// ```
///
/// * `Vrs` - version of the serialized record
/// * `LogId` .. `MsgNum` - the commit log entry
/// * `Payload` - the raw message replicated with the entry
///
/// Payload length isn't stored; the underlying commitlog hands back a correctly sized buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PartitionLogRecord {
    pub entry: CommitLogEntry,
    pub payload: Bytes,
}

const PARTITION_LOG_RECORD_FORMAT_VERSION: u8 = 1;
const HEADER_LEN: usize = 1 + 8 + 8 + 8 + 4 + 8 + 4;

impl commitlog::Entry for PartitionLogRecord {}

impl TryFrom<Vec<u8>> for PartitionLogRecord {
    type Error = io::Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.len() < HEADER_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Log record is {} bytes, shorter than its {} byte header", bytes.len(), HEADER_LEN),
            ));
        }

        let mut buf = &bytes[..];
        let version = buf.get_u8();
        if version != PARTITION_LOG_RECORD_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown log record version {}", version),
            ));
        }

        let entry = CommitLogEntry {
            log_id: LogOffset::new(buf.get_u64_le()),
            epoch: LeaderEpoch::new(buf.get_u64_le()),
            msg_offset: buf.get_u64_le(),
            msg_size: buf.get_u32_le(),
            msg_cnt: buf.get_u64_le(),
            msg_num: buf.get_u32_le(),
        };

        Ok(PartitionLogRecord {
            entry,
            payload: Bytes::copy_from_slice(buf),
        })
    }
}

impl From<PartitionLogRecord> for Vec<u8> {
    fn from(record: PartitionLogRecord) -> Self {
        let mut bytes = Vec::with_capacity(HEADER_LEN + record.payload.len());

        bytes.put_u8(PARTITION_LOG_RECORD_FORMAT_VERSION);
        bytes.put_u64_le(record.entry.log_id.as_u64());
        bytes.put_u64_le(record.entry.epoch.as_u64());
        bytes.put_u64_le(record.entry.msg_offset);
        bytes.put_u32_le(record.entry.msg_size);
        bytes.put_u64_le(record.entry.msg_cnt);
        bytes.put_u32_le(record.entry.msg_num);
        bytes.put_slice(&record.payload);

        bytes
    }
}
