use std::convert::TryFrom;
use std::{fmt, io};

/// LogOffset is the position of an entry in a partition's commit log. The very first entry a log
/// ever holds is at offset 0; offsets are never reused.
#[derive(Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash, Default)]
pub struct LogOffset(u64);

impl LogOffset {
    pub fn new(offset: u64) -> Self {
        LogOffset(offset)
    }

    pub fn start() -> Self {
        LogOffset(0)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn plus(&self, delta: u64) -> LogOffset {
        LogOffset(self.0 + delta)
    }

    pub fn checked_minus(&self, delta: u64) -> Option<LogOffset> {
        self.0.checked_sub(delta).map(LogOffset)
    }

    /// Number of offsets in `[self, other)`. Zero if `other` is not after `self`.
    pub fn distance_to(&self, other: LogOffset) -> u64 {
        other.0.saturating_sub(self.0)
    }
}

impl fmt::Debug for LogOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LogOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Log is an append only log intended for use as a partition's replicated commit log.
///
/// The retained range of a log is `[first_offset(), next_offset())`. Appends happen at the tail,
/// retention trims the head.
pub trait Log<E: Entry> {
    /// append() appends a log entry to the log at the next offset, then returns the offset that
    /// was just used to append the entry.
    fn append(&mut self, entry: E) -> Result<LogOffset, io::Error>;

    /// Read log entry at specified offset. Returns `None` outside the retained range.
    fn read(&self, offset: LogOffset) -> Result<Option<E>, io::Error>;

    /// Deletes anything starting at `offset` and later.
    fn truncate(&mut self, offset: LogOffset);

    /// Deletes anything before `offset`. Offsets of remaining entries are unchanged.
    fn trim_front(&mut self, offset: LogOffset);

    /// first_offset returns the lowest retained offset. Equal to `next_offset()` when empty.
    fn first_offset(&self) -> LogOffset;

    /// next_offset returns the next offset that will be used to append an entry.
    fn next_offset(&self) -> LogOffset;
}

pub trait Entry: Clone + Into<Vec<u8>> + TryFrom<Vec<u8>, Error = io::Error> {}
