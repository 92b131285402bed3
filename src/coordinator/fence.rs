use crate::api::{CoordErrorKind, CoordinationError, Epoch, LeaderEpoch, LeaderSession};

/// EpochFence holds the highest generations a partition has accepted, and decides whether a
/// request is still current enough to act on.
///
/// Accepted epochs never decrease. `check_*` methods never mutate; callers check everything a
/// request needs first, and only then `store_*`, so a rejected request leaves no trace.
pub(super) struct EpochFence {
    // Highest coordinator epoch seen on an accepted admin call.
    epoch: Epoch,
    // Highest topic metadata epoch seen on an accepted admin call.
    topic_epoch: Epoch,
    leader_session: Option<LeaderSession>,
}

/// Whether a leader session that passed the fence changes anything.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum SessionChange {
    Unchanged,
    NewTerm,
}

impl EpochFence {
    pub(super) fn new() -> Self {
        EpochFence {
            epoch: Epoch::default(),
            topic_epoch: Epoch::default(),
            leader_session: None,
        }
    }

    pub(super) fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub(super) fn topic_epoch(&self) -> Epoch {
        self.topic_epoch
    }

    pub(super) fn leader_session(&self) -> Option<&LeaderSession> {
        self.leader_session.as_ref()
    }

    /// Leader epoch of the accepted session. 0 until one is accepted.
    pub(super) fn leader_epoch(&self) -> LeaderEpoch {
        self.leader_session
            .as_ref()
            .map(|s| s.leader_epoch)
            .unwrap_or_default()
    }

    pub(super) fn check_admin_epochs(&self, epoch: Epoch, topic_epoch: Epoch) -> Result<(), CoordinationError> {
        if epoch < self.epoch {
            return Err(CoordinationError::new(
                CoordErrorKind::StaleEpoch,
                format!("Coordinator epoch {} is older than accepted {}", epoch, self.epoch),
            ));
        }
        self.check_topic_epoch(topic_epoch)
    }

    pub(super) fn check_topic_epoch(&self, topic_epoch: Epoch) -> Result<(), CoordinationError> {
        if topic_epoch < self.topic_epoch {
            return Err(CoordinationError::new(
                CoordErrorKind::StaleEpoch,
                format!("Topic epoch {} is older than accepted {}", topic_epoch, self.topic_epoch),
            ));
        }
        Ok(())
    }

    /// Set epochs to the given values, iff larger than current ones.
    ///
    /// CAS: Return true if we successfully mutated state.
    pub(super) fn store_admin_epochs_if_increased(&mut self, epoch: Epoch, topic_epoch: Epoch) -> bool {
        let mut mutated = false;
        if epoch > self.epoch {
            self.epoch = epoch;
            mutated = true;
        }
        if topic_epoch > self.topic_epoch {
            self.topic_epoch = topic_epoch;
            mutated = true;
        }
        mutated
    }

    pub(super) fn check_leader_session(&self, session: &LeaderSession) -> Result<SessionChange, CoordinationError> {
        let accepted = match &self.leader_session {
            None => return Ok(SessionChange::NewTerm),
            Some(accepted) => accepted,
        };

        if session.leader_epoch < accepted.leader_epoch {
            return Err(CoordinationError::new(
                CoordErrorKind::StaleLeaderEpoch,
                format!(
                    "Leader epoch {} is older than accepted {}",
                    session.leader_epoch, accepted.leader_epoch
                ),
            ));
        }

        if session.leader_epoch > accepted.leader_epoch {
            return Ok(SessionChange::NewTerm);
        }

        if session.leader_node != accepted.leader_node || session.session != accepted.session {
            return Err(CoordinationError::new(
                CoordErrorKind::LeaderSessionMismatch,
                format!(
                    "Leader epoch {} already belongs to {} (session {})",
                    accepted.leader_epoch, accepted.leader_node, accepted.session
                ),
            ));
        }

        Ok(SessionChange::Unchanged)
    }

    /// Replace the accepted session, iff its leader epoch is larger than the current one.
    ///
    /// CAS: Return true if we successfully mutated state.
    pub(super) fn store_leader_session_if_newer(&mut self, session: LeaderSession) -> bool {
        if matches!(&self.leader_session, Some(accepted) if session.leader_epoch <= accepted.leader_epoch) {
            return false;
        }
        self.leader_session.replace(session);
        true
    }

    /// Data plane writes are only accepted from the exact leader term this partition knows of.
    pub(super) fn check_writer(&self, leader_epoch: LeaderEpoch) -> Result<(), CoordinationError> {
        let accepted = match &self.leader_session {
            None => {
                return Err(CoordinationError::new(
                    CoordErrorKind::LeaderEpochMismatch,
                    "No leader session has been accepted yet",
                ))
            }
            Some(accepted) => accepted.leader_epoch,
        };

        if leader_epoch < accepted {
            Err(CoordinationError::new(
                CoordErrorKind::StaleLeaderEpoch,
                format!("Writer leader epoch {} is older than accepted {}", leader_epoch, accepted),
            ))
        } else if leader_epoch > accepted {
            Err(CoordinationError::new(
                CoordErrorKind::LeaderEpochMismatch,
                format!("Writer leader epoch {} is newer than accepted {}", leader_epoch, accepted),
            ))
        } else {
            Ok(())
        }
    }
}
