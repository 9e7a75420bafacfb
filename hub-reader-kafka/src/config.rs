use rdkafka::ClientConfig;
use std::{fmt::Write, time::Duration};

use hub_reader_types::{ConnectionString, HubErr, SessionParams, EVENT_HUBS_PROTOCOL};

use crate::{impl_into_string, KafkaErr, KafkaResult, EVENT_HUBS_KAFKA_PORT, KAFKA_PORT};

/// Protocol of a plain Kafka connection string, as in `kafka://localhost:9092/topic`.
pub const KAFKA_PROTOCOL: &str = "kafka";

/// SASL username the Event Hubs Kafka endpoint expects along with a connection string password.
const EVENT_HUBS_SASL_USERNAME: &str = "$ConnectionString";

#[derive(Debug, Default, Clone)]
pub struct KafkaConnectOptions {
    timeout: Option<Duration>,
    client_id: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OptionKey {
    BootstrapServers,
    ClientId,
    GroupId,
    SocketTimeout,
    EnableAutoCommit,
    EnableAutoOffsetStore,
    SecurityProtocol,
    SaslMechanism,
    SaslUsername,
    SaslPassword,
}

impl KafkaConnectOptions {
    /// Timeout for network requests, including the initial metadata lookup.
    /// Default is [`crate::DEFAULT_TIMEOUT`].
    pub fn set_timeout(&mut self, v: Duration) -> &mut Self {
        self.timeout = Some(v);
        self
    }
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(crate::DEFAULT_TIMEOUT)
    }

    /// Identifies this client in broker logs. Default is `hub-reader`.
    pub fn set_client_id<S: Into<String>>(&mut self, v: S) -> &mut Self {
        self.client_id = Some(v.into());
        self
    }
    pub fn client_id(&self) -> &str {
        self.client_id.as_deref().unwrap_or("hub-reader")
    }

    pub(crate) fn make_client_config(&self, params: &SessionParams) -> KafkaResult<ClientConfig> {
        let connection = params.connection();
        let mut client_config = ClientConfig::new();
        client_config.set(OptionKey::ClientId, self.client_id());
        client_config.set(
            OptionKey::SocketTimeout,
            format!("{}", self.timeout().as_millis()),
        );
        match connection.protocol() {
            Some(EVENT_HUBS_PROTOCOL) => {
                client_config.set(OptionKey::BootstrapServers, bootstrap_servers(connection)?);
                client_config.set(OptionKey::SecurityProtocol, "SASL_SSL");
                client_config.set(OptionKey::SaslMechanism, "PLAIN");
                client_config.set(OptionKey::SaslUsername, EVENT_HUBS_SASL_USERNAME);
                client_config.set(OptionKey::SaslPassword, connection.as_raw());
            }
            Some(KAFKA_PROTOCOL) => {
                client_config.set(OptionKey::BootstrapServers, bootstrap_servers(connection)?);
            }
            other => {
                return Err(HubErr::Unsupported(format!(
                    "protocol {other:?} is not served by the Kafka transport"
                )))
            }
        }
        // librdkafka requires a group id even though partitions are assigned manually
        client_config.set(OptionKey::GroupId, params.consumer_group().name());
        // reading never persists a checkpoint
        client_config.set(OptionKey::EnableAutoCommit, "false");
        client_config.set(OptionKey::EnableAutoOffsetStore, "false");
        Ok(client_config)
    }
}

fn bootstrap_servers(connection: &ConnectionString) -> KafkaResult<String> {
    let mut string = String::new();
    for (i, node) in connection.nodes().iter().enumerate() {
        let host = node.host_str().ok_or_else(|| {
            HubErr::<KafkaErr>::Connect(format!("endpoint {node} has no host"))
        })?;
        // whatever port an Event Hubs endpoint names, its Kafka surface is on 9093
        let port = if connection.is_event_hubs() {
            EVENT_HUBS_KAFKA_PORT
        } else {
            node.port().unwrap_or(KAFKA_PORT)
        };
        write!(
            string,
            "{comma}{host}:{port}",
            comma = if i != 0 { "," } else { "" }
        )
        .map_err(|e| HubErr::<KafkaErr>::Connect(e.to_string()))?;
    }
    Ok(string)
}

impl OptionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BootstrapServers => "bootstrap.servers",
            Self::ClientId => "client.id",
            Self::GroupId => "group.id",
            Self::SocketTimeout => "socket.timeout.ms",
            Self::EnableAutoCommit => "enable.auto.commit",
            Self::EnableAutoOffsetStore => "enable.auto.offset.store",
            Self::SecurityProtocol => "security.protocol",
            Self::SaslMechanism => "sasl.mechanism",
            Self::SaslUsername => "sasl.username",
            Self::SaslPassword => "sasl.password",
        }
    }
}

impl_into_string!(OptionKey);

#[cfg(test)]
mod test {
    use super::*;

    const EVENT_HUBS: &str = "Endpoint=sb://my-ns.servicebus.windows.net/;SharedAccessKeyName=listen;SharedAccessKey=abc=;EntityPath=telemetry";

    fn config(conn: &str) -> KafkaResult<ClientConfig> {
        let params = SessionParams::new(conn.parse().unwrap(), None);
        KafkaConnectOptions::default().make_client_config(&params)
    }

    #[test]
    fn test_event_hubs_config() {
        let config = config(EVENT_HUBS).unwrap();
        assert_eq!(
            config.get("bootstrap.servers"),
            Some("my-ns.servicebus.windows.net:9093")
        );
        assert_eq!(config.get("security.protocol"), Some("SASL_SSL"));
        assert_eq!(config.get("sasl.mechanism"), Some("PLAIN"));
        assert_eq!(config.get("sasl.username"), Some("$ConnectionString"));
        assert_eq!(config.get("sasl.password"), Some(EVENT_HUBS));
        assert_eq!(config.get("group.id"), Some("$Default"));
        assert_eq!(config.get("enable.auto.commit"), Some("false"));
        assert_eq!(config.get("socket.timeout.ms"), Some("30000"));
    }

    #[test]
    fn test_plain_kafka_config() {
        let config = config("kafka://node-a:1234,node-b/telemetry").unwrap();
        assert_eq!(
            config.get("bootstrap.servers"),
            Some("node-a:1234,node-b:9092")
        );
        assert_eq!(config.get("security.protocol"), None);
        assert_eq!(config.get("sasl.password"), None);
    }

    #[test]
    fn test_unsupported_protocol() {
        assert!(matches!(config("stdio://"), Err(HubErr::Unsupported(_))));
    }
}
