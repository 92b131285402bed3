use crate::api::CommitLogEntry;
use crate::commitlog;
use crate::commitlog::LogOffset;
use crate::coordinator::log_record::PartitionLogRecord;
use std::io;

/// PartitionCommitLog is the partition-specific facade over a commit log. Every entry's `log_id`
/// equals the offset it is stored at.
pub(super) struct PartitionCommitLog<L>
where
    L: commitlog::Log<PartitionLogRecord>,
{
    logger: slog::Logger,
    log: L,
}

impl<L> PartitionCommitLog<L>
where
    L: commitlog::Log<PartitionLogRecord>,
{
    pub(super) fn new(logger: slog::Logger, log: L) -> Self {
        PartitionCommitLog { logger, log }
    }

    pub(super) fn first_offset(&self) -> LogOffset {
        self.log.first_offset()
    }

    pub(super) fn next_offset(&self) -> LogOffset {
        self.log.next_offset()
    }

    /// Offset of the newest retained entry. None if nothing is retained.
    pub(super) fn last_offset(&self) -> Option<LogOffset> {
        if self.log.first_offset() == self.log.next_offset() {
            return None;
        }
        self.log.next_offset().checked_minus(1)
    }

    pub(super) fn contains(&self, offset: LogOffset) -> bool {
        self.log.first_offset() <= offset && offset < self.log.next_offset()
    }

    pub(super) fn read_entry(&self, offset: LogOffset) -> Result<Option<CommitLogEntry>, io::Error> {
        Ok(self.log.read(offset)?.map(|record| record.entry))
    }

    /// Reads up to `max` consecutive records starting at `start`. Stops early at the log's tail.
    pub(super) fn read_from(&self, start: LogOffset, max: u64) -> Result<Vec<PartitionLogRecord>, io::Error> {
        let num_records = std::cmp::min(max, start.distance_to(self.log.next_offset()));
        let mut records = Vec::with_capacity(num_records as usize);

        for i in 0..num_records {
            let offset = start.plus(i);
            match self.log.read(offset)? {
                Some(record) => records.push(record),
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("No log record at retained offset {}", offset),
                    ))
                }
            }
        }

        Ok(records)
    }

    /// Appends all records or none of them. On failure, anything appended by this call is
    /// truncated away again before the error is returned.
    pub(super) fn append_all(&mut self, records: Vec<PartitionLogRecord>) -> Result<(), io::Error> {
        let revert_to = self.log.next_offset();

        for record in records {
            let expected_offset = record.entry.log_id;
            let appended = self.log.append(record).and_then(|offset| {
                if offset == expected_offset {
                    Ok(offset)
                } else {
                    Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("Log id {} stored at offset {}", expected_offset, offset),
                    ))
                }
            });

            if let Err(e) = appended {
                slog::warn!(self.logger, "Append failed ({}). Reverting log to {:?}.", e, revert_to);
                self.log.truncate(revert_to);
                return Err(e);
            }
        }

        Ok(())
    }

    /// Drops retained entries before `offset`.
    pub(super) fn trim_front(&mut self, offset: LogOffset) {
        self.log.trim_front(offset);
    }
}
