use rdkafka::{
    consumer::Consumer, message::BorrowedMessage as RawMessage, Message as KafkaMessageTrait,
};

use hub_reader_runtime::spawn_blocking;
use hub_reader_types::{
    export::async_trait, runtime_error, HubErr, HubName, PartitionEvent, PartitionId, Session,
    Timestamp,
};

use crate::{hub_err, KafkaErr, KafkaResult, RawConsumer};

/// A read session over every partition of one hub.
///
/// Dropping it also releases the underlying client, but only [`Session::close`] waits for that.
pub struct KafkaSession {
    inner: Option<RawConsumer>,
    hub: HubName,
}

impl KafkaSession {
    pub(crate) fn new(inner: RawConsumer, hub: HubName) -> Self {
        Self {
            inner: Some(inner),
            hub,
        }
    }

    pub fn hub(&self) -> &HubName {
        &self.hub
    }

    fn get(&self) -> KafkaResult<&RawConsumer> {
        self.inner.as_ref().ok_or(HubErr::SessionClosed)
    }
}

impl std::fmt::Debug for KafkaSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaSession")
            .field("hub", &self.hub)
            .field("open", &self.inner.is_some())
            .finish()
    }
}

#[async_trait]
impl Session for KafkaSession {
    type Error = KafkaErr;

    /// A Kafka topic never ends, so this never yields `None`.
    async fn next(&mut self) -> KafkaResult<Option<PartitionEvent>> {
        let mess = self.get()?.recv().await.map_err(hub_err)?;
        Ok(Some(to_event(&mess)))
    }

    async fn close(&mut self) -> KafkaResult<()> {
        let Some(client) = self.inner.take() else {
            return Ok(());
        };
        // unassign may block on the broker
        spawn_blocking(move || client.unassign())
            .await
            .map_err(runtime_error::<KafkaErr, _>)?
            .map_err(hub_err)?;
        log::debug!("kafka session on `{}` closed", self.hub);
        Ok(())
    }
}

fn to_event(mess: &RawMessage<'_>) -> PartitionEvent {
    let mut event = PartitionEvent::new(
        PartitionId::new(mess.partition().to_string()),
        mess.payload().unwrap_or_default().to_vec(),
    );
    if let Ok(sequence) = u64::try_from(mess.offset()) {
        event = event.with_sequence(sequence);
    }
    let enqueued_time = mess
        .timestamp()
        .to_millis()
        .and_then(|ms| Timestamp::from_unix_timestamp_nanos(ms as i128 * 1_000_000).ok());
    if let Some(timestamp) = enqueued_time {
        event = event.with_enqueued_time(timestamp);
    }
    event
}
