use crate::commitlog::{Entry, Log, LogOffset};
use std::collections::VecDeque;
use std::convert::TryFrom;
use std::io;
use std::marker::PhantomData;

// Durability is the message store's concern, not ours. This log theoretically models the
// commit log in memory.
pub struct InMemoryLog<E: Entry> {
    // We don't *need* to convert these to bytes. We could just hold the original entry in memory,
    // but we want to exercise the conversion logic.
    log: VecDeque<Vec<u8>>,
    // Offset of `log[0]`.
    first_offset: LogOffset,
    _pd: PhantomData<E>,
}

impl<E: Entry> InMemoryLog<E> {
    pub fn create() -> Result<Self, io::Error> {
        Ok(InMemoryLog {
            log: VecDeque::new(),
            first_offset: LogOffset::start(),
            _pd: PhantomData::default(),
        })
    }

    fn deque_index(&self, offset: LogOffset) -> Option<usize> {
        if offset < self.first_offset {
            return None;
        }
        Some(self.first_offset.distance_to(offset) as usize)
    }
}

impl<E: Entry> Log<E> for InMemoryLog<E> {
    fn append(&mut self, entry: E) -> Result<LogOffset, io::Error> {
        let offset = self.next_offset();
        self.log.push_back(entry.into());

        Ok(offset)
    }

    fn read(&self, offset: LogOffset) -> Result<Option<E>, io::Error> {
        let bytes = match self.deque_index(offset).and_then(|i| self.log.get(i)) {
            Some(bytes) => bytes.clone(),
            None => return Ok(None),
        };

        E::try_from(bytes).map(Some)
    }

    fn truncate(&mut self, offset: LogOffset) {
        match self.deque_index(offset) {
            Some(i) => self.log.truncate(i),
            None => self.log.clear(),
        }
    }

    fn trim_front(&mut self, offset: LogOffset) {
        let offset = std::cmp::min(offset, self.next_offset());
        if let Some(num_to_drop) = self.deque_index(offset) {
            self.log.drain(..num_to_drop);
            self.first_offset = offset;
        }
    }

    fn first_offset(&self) -> LogOffset {
        self.first_offset
    }

    fn next_offset(&self) -> LogOffset {
        self.first_offset.plus(self.log.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct TestEntry(u8);

    impl Entry for TestEntry {}

    impl From<TestEntry> for Vec<u8> {
        fn from(entry: TestEntry) -> Self {
            vec![entry.0]
        }
    }

    impl TryFrom<Vec<u8>> for TestEntry {
        type Error = io::Error;

        fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
            match bytes.as_slice() {
                [b] => Ok(TestEntry(*b)),
                _ => Err(io::Error::new(io::ErrorKind::InvalidData, "bad test entry")),
            }
        }
    }

    fn log_with(num_entries: u8) -> InMemoryLog<TestEntry> {
        let mut log = InMemoryLog::create().unwrap();
        for i in 0..num_entries {
            log.append(TestEntry(i)).unwrap();
        }
        log
    }

    #[test]
    fn append_assigns_offsets_from_zero() {
        let mut log = InMemoryLog::create().unwrap();
        assert_eq!(log.next_offset(), LogOffset::new(0));
        assert_eq!(log.append(TestEntry(7)).unwrap(), LogOffset::new(0));
        assert_eq!(log.append(TestEntry(8)).unwrap(), LogOffset::new(1));
        assert_eq!(log.read(LogOffset::new(1)).unwrap(), Some(TestEntry(8)));
        assert_eq!(log.read(LogOffset::new(2)).unwrap(), None);
    }

    #[test]
    fn truncate_drops_tail() {
        let mut log = log_with(5);
        log.truncate(LogOffset::new(3));

        assert_eq!(log.next_offset(), LogOffset::new(3));
        assert_eq!(log.read(LogOffset::new(2)).unwrap(), Some(TestEntry(2)));
        assert_eq!(log.read(LogOffset::new(3)).unwrap(), None);
    }

    #[test]
    fn trim_front_keeps_offsets_stable() {
        let mut log = log_with(5);
        log.trim_front(LogOffset::new(2));

        assert_eq!(log.first_offset(), LogOffset::new(2));
        assert_eq!(log.next_offset(), LogOffset::new(5));
        assert_eq!(log.read(LogOffset::new(1)).unwrap(), None);
        assert_eq!(log.read(LogOffset::new(2)).unwrap(), Some(TestEntry(2)));

        // Appends continue where the log left off.
        assert_eq!(log.append(TestEntry(5)).unwrap(), LogOffset::new(5));

        // Truncating below the retained range empties the log but keeps its position.
        log.truncate(LogOffset::new(0));
        assert_eq!(log.first_offset(), LogOffset::new(2));
        assert_eq!(log.next_offset(), LogOffset::new(2));
    }

    #[test]
    fn trim_front_past_tail_empties_log() {
        let mut log = log_with(3);
        log.trim_front(LogOffset::new(10));

        assert_eq!(log.first_offset(), LogOffset::new(3));
        assert_eq!(log.next_offset(), LogOffset::new(3));
    }
}
