#[cfg(feature = "backend-kafka")]
use hub_reader_kafka::{KafkaErr, KafkaSession, KafkaSource, KAFKA_PROTOCOL};
#[cfg(feature = "backend-stdio")]
use hub_reader_stdio::{StdioErr, StdioSession, StdioSource};

use hub_reader_types::{
    export::async_trait, ConnectionString, EventSource, HubErr, HubResult, PartitionEvent,
    Session, SessionParams, EVENT_HUBS_PROTOCOL,
};
use thiserror::Error;

#[cfg(not(any(feature = "backend-kafka", feature = "backend-stdio")))]
compile_error!("Enable at least one of the backend-kafka or backend-stdio features");

/// Protocol of a connection string that reads events from stdin, as in `stdio://`.
pub const STDIO_PROTOCOL: &str = "stdio";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// The transport serving a connection string.
pub enum Backend {
    Kafka,
    Stdio,
}

#[derive(Debug, Default)]
/// Picks the transport from the protocol of the connection string each time a session is opened.
pub struct HubSource {
    #[cfg(feature = "backend-kafka")]
    kafka: KafkaSource,
    #[cfg(feature = "backend-stdio")]
    stdio: StdioSource,
}

#[derive(Debug)]
/// A session of whichever transport [`HubSource`] picked.
pub enum HubSession {
    #[cfg(feature = "backend-kafka")]
    Kafka(KafkaSession),
    #[cfg(feature = "backend-stdio")]
    Stdio(StdioSession),
}

#[derive(Error, Debug)]
/// The concrete backend error.
pub enum BackendErr {
    #[cfg(feature = "backend-kafka")]
    #[error("KafkaBackendErr: {0}")]
    Kafka(KafkaErr),
    #[cfg(feature = "backend-stdio")]
    #[error("StdioBackendErr: {0}")]
    Stdio(StdioErr),
}

/// The concrete error type of [`HubSource`].
pub type Error = HubErr<BackendErr>;

pub(crate) type BackendResult<T> = HubResult<T, BackendErr>;

impl Backend {
    /// `sb` connection strings and `kafka` URLs go over Kafka, `stdio` URLs read stdin.
    pub fn for_connection(connection: &ConnectionString) -> BackendResult<Self> {
        match connection.protocol() {
            Some(STDIO_PROTOCOL) => Ok(Self::Stdio),
            Some(EVENT_HUBS_PROTOCOL) => Ok(Self::Kafka),
            #[cfg(feature = "backend-kafka")]
            Some(KAFKA_PROTOCOL) => Ok(Self::Kafka),
            #[cfg(not(feature = "backend-kafka"))]
            Some("kafka") => Ok(Self::Kafka),
            other => Err(HubErr::Unsupported(format!("protocol {other:?}"))),
        }
    }
}

impl HubSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "backend-kafka")]
    pub fn with_kafka(mut self, kafka: KafkaSource) -> Self {
        self.kafka = kafka;
        self
    }

    #[cfg(feature = "backend-stdio")]
    /// Replace the stdin transport, e.g. with [`StdioSource::from_reader`].
    pub fn with_stdio(mut self, stdio: StdioSource) -> Self {
        self.stdio = stdio;
        self
    }
}

#[async_trait]
impl EventSource for HubSource {
    type Error = BackendErr;
    type Session = HubSession;

    async fn open(&self, params: &SessionParams) -> BackendResult<HubSession> {
        let backend = Backend::for_connection(params.connection())?;
        #[allow(unreachable_patterns)]
        let session = match backend {
            #[cfg(feature = "backend-kafka")]
            Backend::Kafka => HubSession::Kafka(self.kafka.open(params).await.map_err(map_err)?),
            #[cfg(feature = "backend-stdio")]
            Backend::Stdio => HubSession::Stdio(self.stdio.open(params).await.map_err(map_err)?),
            other => {
                return Err(HubErr::Unsupported(format!(
                    "the {other:?} backend is not enabled in this build"
                )))
            }
        };
        log::debug!("{:?} session open", session.backend());
        Ok(session)
    }
}

impl HubSession {
    pub fn backend(&self) -> Backend {
        match self {
            #[cfg(feature = "backend-kafka")]
            Self::Kafka(_) => Backend::Kafka,
            #[cfg(feature = "backend-stdio")]
            Self::Stdio(_) => Backend::Stdio,
        }
    }
}

#[async_trait]
impl Session for HubSession {
    type Error = BackendErr;

    async fn next(&mut self) -> BackendResult<Option<PartitionEvent>> {
        match self {
            #[cfg(feature = "backend-kafka")]
            Self::Kafka(s) => s.next().await.map_err(map_err),
            #[cfg(feature = "backend-stdio")]
            Self::Stdio(s) => s.next().await.map_err(map_err),
        }
    }

    async fn close(&mut self) -> BackendResult<()> {
        match self {
            #[cfg(feature = "backend-kafka")]
            Self::Kafka(s) => s.close().await.map_err(map_err),
            #[cfg(feature = "backend-stdio")]
            Self::Stdio(s) => s.close().await.map_err(map_err),
        }
    }
}

#[cfg(feature = "backend-kafka")]
impl From<KafkaErr> for BackendErr {
    fn from(err: KafkaErr) -> Self {
        Self::Kafka(err)
    }
}

#[cfg(feature = "backend-stdio")]
impl From<StdioErr> for BackendErr {
    fn from(err: StdioErr) -> Self {
        Self::Stdio(err)
    }
}

pub(crate) fn map_err<E: std::error::Error + Into<BackendErr>>(err: HubErr<E>) -> Error {
    match err {
        HubErr::Backend(err) => HubErr::Backend(err.into()),
        HubErr::Connect(e) => HubErr::Connect(e),
        HubErr::ConnectionStringErr(e) => HubErr::ConnectionStringErr(e),
        HubErr::HubNameErr(e) => HubErr::HubNameErr(e),
        HubErr::HubNameNotSet => HubErr::HubNameNotSet,
        HubErr::SessionClosed => HubErr::SessionClosed,
        HubErr::Io(e) => HubErr::Io(e),
        HubErr::Unsupported(e) => HubErr::Unsupported(e),
        HubErr::Runtime(e) => HubErr::Runtime(e),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn backend(conn: &str) -> BackendResult<Backend> {
        Backend::for_connection(&conn.parse().unwrap())
    }

    #[test]
    fn test_backend_for_connection() {
        assert_eq!(backend("stdio://").unwrap(), Backend::Stdio);
        assert_eq!(backend("kafka://localhost/hub").unwrap(), Backend::Kafka);
        assert_eq!(
            backend("Endpoint=sb://ns.servicebus.windows.net/;SharedAccessKeyName=a;SharedAccessKey=b")
                .unwrap(),
            Backend::Kafka
        );
        assert!(matches!(
            backend("redis://localhost/hub"),
            Err(HubErr::Unsupported(_))
        ));
    }

    #[cfg(feature = "backend-stdio")]
    #[tokio::test]
    async fn test_stdio_session() {
        let source = HubSource::new().with_stdio(StdioSource::from_reader(std::io::Cursor::new(
            "only line\n",
        )));
        let params = SessionParams::new("stdio://".parse().unwrap(), None);
        let mut session = source.open(&params).await.unwrap();
        assert_eq!(session.backend(), Backend::Stdio);

        let event = session.next().await.unwrap().unwrap();
        assert_eq!(event.text(), "only line");
        assert!(session.next().await.unwrap().is_none());
        session.close().await.unwrap();
    }

    #[cfg(not(feature = "backend-kafka"))]
    #[tokio::test]
    async fn test_backend_not_enabled() {
        let params = SessionParams::new("kafka://localhost/hub".parse().unwrap(), None);
        assert!(matches!(
            HubSource::new().open(&params).await,
            Err(HubErr::Unsupported(_))
        ));
    }
}
