mod coordinator_api;
mod fence;
mod local_coordinator;
mod log_record;
mod partition;
mod partition_log;

pub(crate) use coordinator_api::ChannelOffsetInput;
pub(crate) use coordinator_api::LeaderSessionInput;
pub(crate) use coordinator_api::PartitionKey;
pub(crate) use coordinator_api::PullCommitLogsInput;
pub(crate) use coordinator_api::PutMessagesInput;
pub(crate) use coordinator_api::TopicInfoInput;
pub(crate) use local_coordinator::LocalCoordinator;
pub(crate) use log_record::PartitionLogRecord;
