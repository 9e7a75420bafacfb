/// Re-export of [`rdkafka::error::KafkaError`].
pub use rdkafka::error::KafkaError as KafkaErr;
use hub_reader_types::{HubErr, HubResult};

/// Alias for `HubResult<T, KafkaErr>`.
pub type KafkaResult<T> = HubResult<T, KafkaErr>;

pub(crate) fn hub_err(err: KafkaErr) -> HubErr<KafkaErr> {
    HubErr::Backend(err)
}
