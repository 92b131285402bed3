use crate::commitlog::{Entry, InMemoryLog, Log};
use std::io;

// -- Log factory --

/// LogFactory creates the commit log backing a newly observed partition.
pub trait LogFactory<E, L>
where
    E: Entry,
    L: Log<E>,
{
    fn try_create_log(&self, config: &LogConfig) -> Result<L, io::Error>;
}

/// Identifies the partition a log is created for.
pub struct LogConfig {
    pub topic: String,
    pub partition: u32,
}

// -- InMemoryLogFactory --

pub struct InMemoryLogFactory;

impl InMemoryLogFactory {
    pub fn new() -> Self {
        InMemoryLogFactory
    }
}

impl<E: Entry> LogFactory<E, InMemoryLog<E>> for InMemoryLogFactory {
    fn try_create_log(&self, _: &LogConfig) -> Result<InMemoryLog<E>, io::Error> {
        InMemoryLog::create()
    }
}
