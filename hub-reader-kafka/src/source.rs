use rdkafka::{consumer::Consumer, util::Timeout, Offset, TopicPartitionList};

use hub_reader_runtime::spawn_blocking;
use hub_reader_types::{export::async_trait, runtime_error, EventSource, HubErr, SessionParams};

use crate::{hub_err, KafkaConnectOptions, KafkaErr, KafkaResult, KafkaSession, RawConsumer};

#[derive(Debug, Default, Clone)]
/// Opens [`KafkaSession`]s. Nothing touches the network until [`EventSource::open`].
pub struct KafkaSource {
    options: KafkaConnectOptions,
}

impl KafkaSource {
    pub fn new(options: KafkaConnectOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl EventSource for KafkaSource {
    type Error = KafkaErr;
    type Session = KafkaSession;

    /// Looks up the partitions of the hub and assigns all of them from the beginning.
    async fn open(&self, params: &SessionParams) -> KafkaResult<KafkaSession> {
        let hub = params.require_hub::<KafkaErr>()?.to_owned();
        let client_config = self.options.make_client_config(params)?;
        let client: RawConsumer = client_config.create().map_err(hub_err)?;
        let timeout = self.options.timeout();

        // `fetch_metadata` and `assign` are blocking calls
        let topic = hub.name().to_owned();
        let client = spawn_blocking(move || -> Result<RawConsumer, KafkaErr> {
            let metadata = client.fetch_metadata(Some(&topic), Timeout::After(timeout))?;
            let mut tpl = TopicPartitionList::new();
            for meta in metadata.topics().iter().filter(|t| t.name() == topic) {
                if let Some(err) = meta.error() {
                    return Err(KafkaErr::MetadataFetch(err.into()));
                }
                for partition in meta.partitions() {
                    tpl.add_partition_offset(&topic, partition.id(), Offset::Beginning)?;
                }
            }
            if tpl.count() > 0 {
                client.assign(&tpl)?;
            }
            Ok(client)
        })
        .await
        .map_err(runtime_error::<KafkaErr, _>)?
        .map_err(hub_err)?;

        let partitions = client.assignment().map_err(hub_err)?.count();
        if partitions == 0 {
            return Err(HubErr::Connect(format!("event hub `{hub}` has no partitions")));
        }
        log::debug!(
            "kafka session opened on {} ({partitions} partitions, group {})",
            params.connection(),
            params.consumer_group()
        );

        Ok(KafkaSession::new(client, hub))
    }
}
