use async_trait::async_trait;

use crate::{ConnectionString, ConsumerGroup, HubErr, HubName, HubResult, PartitionEvent};

#[derive(Debug, Clone)]
/// Everything a transport needs to open a read session. Immutable for the lifetime of one run.
pub struct SessionParams {
    connection: ConnectionString,
    hub: Option<HubName>,
    consumer_group: ConsumerGroup,
}

impl SessionParams {
    /// The hub is resolved from `hub` first, then from the connection string's `EntityPath`.
    pub fn new(connection: ConnectionString, hub: Option<HubName>) -> Self {
        let hub = hub.or_else(|| connection.entity_path().cloned());
        Self {
            connection,
            hub,
            consumer_group: ConsumerGroup::default(),
        }
    }

    pub fn connection(&self) -> &ConnectionString {
        &self.connection
    }

    pub fn hub(&self) -> Option<&HubName> {
        self.hub.as_ref()
    }

    /// Like [`SessionParams::hub`], for transports that cannot read without one.
    pub fn require_hub<E: std::error::Error>(&self) -> HubResult<&HubName, E> {
        self.hub.as_ref().ok_or(HubErr::HubNameNotSet)
    }

    pub fn consumer_group(&self) -> &ConsumerGroup {
        &self.consumer_group
    }
}

#[async_trait]
/// Common interface of transports, to be implemented by all backends.
pub trait EventSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;
    type Session: Session<Error = Self::Error>;

    /// Establish a read session using the given consumer group.
    async fn open(&self, params: &SessionParams) -> HubResult<Self::Session, Self::Error>;
}

#[async_trait]
/// A read session over all partitions of one hub.
pub trait Session: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Wait for the next event from any partition. `None` means the stream has ended.
    ///
    /// Dropping the returned future before it resolves must leave the session closable.
    async fn next(&mut self) -> HubResult<Option<PartitionEvent>, Self::Error>;

    /// Release the session. Calling it again after it succeeded is a no-op.
    async fn close(&mut self) -> HubResult<(), Self::Error>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("never")]
    struct Never;

    #[test]
    fn test_hub_resolution() {
        let conn: ConnectionString = "stdio:///implied".parse().unwrap();

        let params = SessionParams::new(conn.clone(), None);
        assert_eq!(params.hub().unwrap().name(), "implied");
        assert_eq!(params.consumer_group().name(), "$Default");

        let params = SessionParams::new(conn, Some(HubName::new("explicit").unwrap()));
        assert_eq!(params.hub().unwrap().name(), "explicit");

        let params = SessionParams::new("stdio://".parse().unwrap(), None);
        assert!(matches!(
            params.require_hub::<Never>(),
            Err(HubErr::HubNameNotSet)
        ));
    }
}
