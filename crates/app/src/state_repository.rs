//! Observable holder of the latest air unit snapshot, backed by a tokio
//! [`watch`] channel.

use std::sync::Arc;

use tokio::sync::watch;

use ventlink_domain::state::AirUnitState;

/// Latest-snapshot repository.
///
/// Holds exactly one snapshot. Publishing replaces it (last write wins) and
/// wakes every subscriber; nothing is kept from before. Cloning yields
/// another handle to the same value.
#[derive(Debug, Clone)]
pub struct StateRepository {
    sender: Arc<watch::Sender<AirUnitState>>,
}

impl Default for StateRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository {
    /// Create a repository holding the initial "nothing read yet" snapshot.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(AirUnitState::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    #[must_use]
    pub fn current(&self) -> AirUnitState {
        self.sender.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    ///
    /// The receiver starts at the current snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AirUnitState> {
        self.sender.subscribe()
    }

    pub fn publish(&self, state: AirUnitState) {
        tracing::debug!(mode = %state.mode, unit = ?state.unit_name, "publishing air unit state");
        // send_replace succeeds even with zero receivers.
        self.sender.send_replace(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ventlink_domain::mode::Mode;

    #[test]
    fn should_start_with_default_snapshot() {
        let repo = StateRepository::new();
        assert_eq!(repo.current(), AirUnitState::default());
    }

    #[test]
    fn should_replace_snapshot_on_publish() {
        let repo = StateRepository::new();
        repo.publish(AirUnitState::default().with_mode(Mode::Demand));
        repo.publish(AirUnitState::default().with_mode(Mode::Off));
        assert_eq!(repo.current().mode, Mode::Off);
    }

    #[test]
    fn should_publish_without_subscribers() {
        let repo = StateRepository::new();
        repo.publish(AirUnitState::default().with_mode(Mode::Manual));
        assert_eq!(repo.current().mode, Mode::Manual);
    }

    #[tokio::test]
    async fn should_notify_every_subscriber() {
        let repo = StateRepository::new();
        let mut rx1 = repo.subscribe();
        let mut rx2 = repo.clone().subscribe();

        repo.publish(AirUnitState::default().with_mode(Mode::Program));

        rx1.changed().await.unwrap();
        rx2.changed().await.unwrap();
        assert_eq!(rx1.borrow().mode, Mode::Program);
        assert_eq!(rx2.borrow().mode, Mode::Program);
    }

    #[tokio::test]
    async fn should_only_expose_latest_to_late_subscriber() {
        let repo = StateRepository::new();
        repo.publish(AirUnitState::default().with_mode(Mode::Program));
        repo.publish(AirUnitState::default().with_mode(Mode::Manual));

        let rx = repo.subscribe();
        assert_eq!(rx.borrow().mode, Mode::Manual);
    }
}
