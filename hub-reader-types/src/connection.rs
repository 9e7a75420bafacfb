use std::{fmt::Display, str::FromStr};

use url::Url;

use crate::{ConnectionStringErr, HubName};

/// Protocol of an Azure Event Hubs endpoint, as in `sb://<namespace>.servicebus.windows.net/`.
pub const EVENT_HUBS_PROTOCOL: &str = "sb";

#[derive(Clone, PartialEq, Eq, Hash)]
/// Where and how to connect to an event hub.
///
/// Two forms are accepted:
///
/// ```ignore
/// Endpoint=sb://my-ns.servicebus.windows.net/;SharedAccessKeyName=listen;SharedAccessKey=abc=;EntityPath=telemetry
/// stdio://
/// stdio:///telemetry
/// kafka://node-a:9092,node-b:9092/telemetry
/// ```
///
/// The credential parts are redacted from `Debug` and `Display`.
pub struct ConnectionString {
    nodes: Vec<Url>,
    shared_access_key_name: Option<String>,
    shared_access_key: Option<String>,
    shared_access_signature: Option<String>,
    entity_path: Option<HubName>,
    raw: String,
}

impl ConnectionString {
    pub fn protocol(&self) -> Option<&str> {
        self.nodes.first().map(|node| node.scheme())
    }

    /// True if this points at an Azure Event Hubs namespace.
    pub fn is_event_hubs(&self) -> bool {
        self.protocol() == Some(EVENT_HUBS_PROTOCOL)
    }

    pub fn nodes(&self) -> &[Url] {
        &self.nodes
    }

    pub fn shared_access_key_name(&self) -> Option<&str> {
        self.shared_access_key_name.as_deref()
    }

    pub fn shared_access_key(&self) -> Option<&str> {
        self.shared_access_key.as_deref()
    }

    pub fn shared_access_signature(&self) -> Option<&str> {
        self.shared_access_signature.as_deref()
    }

    /// The event hub implied by the connection string, if any.
    pub fn entity_path(&self) -> Option<&HubName> {
        self.entity_path.as_ref()
    }

    /// The connection string exactly as given. Contains secrets.
    pub fn as_raw(&self) -> &str {
        &self.raw
    }

    fn parse_key_values(s: &str) -> Result<Self, ConnectionStringErr> {
        let mut endpoint = None;
        let mut shared_access_key_name = None;
        let mut shared_access_key = None;
        let mut shared_access_signature = None;
        let mut entity_path = None;

        for segment in s.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| ConnectionStringErr::MalformedSegment(segment.to_owned()))?;
            let value = value.trim().to_owned();
            match key.trim().to_ascii_lowercase().as_str() {
                "endpoint" => endpoint = Some(value),
                "sharedaccesskeyname" => shared_access_key_name = Some(value),
                "sharedaccesskey" => shared_access_key = Some(value),
                "sharedaccesssignature" => shared_access_signature = Some(value),
                "entitypath" => {
                    if !value.is_empty() {
                        entity_path = Some(HubName::new(value)?);
                    }
                }
                _ => return Err(ConnectionStringErr::UnknownKey(key.trim().to_owned())),
            }
        }

        let endpoint = endpoint
            .filter(|e| !e.is_empty())
            .ok_or(ConnectionStringErr::EndpointRequired)?;
        let endpoint: Url = endpoint
            .parse()
            .map_err(|e: url::ParseError| ConnectionStringErr::InvalidEndpoint(e.to_string()))?;
        if endpoint.host_str().is_none() {
            return Err(ConnectionStringErr::InvalidEndpoint(endpoint.to_string()));
        }

        let has_key = shared_access_key_name.is_some() && shared_access_key.is_some();
        if !has_key && shared_access_signature.is_none() {
            return Err(ConnectionStringErr::CredentialRequired);
        }

        Ok(Self {
            nodes: vec![endpoint],
            shared_access_key_name,
            shared_access_key,
            shared_access_signature,
            entity_path,
            raw: s.to_owned(),
        })
    }

    fn parse_url(s: &str) -> Result<Self, ConnectionStringErr> {
        let (protocol, mut remaining) = s
            .split_once("://")
            .ok_or_else(|| ConnectionStringErr::InvalidEndpoint(s.to_owned()))?;
        let mut hubs = None;
        if let Some((front, back)) = remaining.split_once('/') {
            remaining = front;
            hubs = Some(back);
        }
        let nodes = if remaining.is_empty() {
            // a protocol without host, e.g. `stdio://`
            vec![parse_node(protocol, ".")?]
        } else {
            remaining
                .split(',')
                .filter(|x| !x.is_empty())
                .map(|host| parse_node(protocol, host))
                .collect::<Result<Vec<_>, _>>()?
        };
        let mut hubs = hubs
            .unwrap_or_default()
            .split(',')
            .filter(|x| !x.is_empty())
            .map(HubName::new)
            .collect::<Result<Vec<_>, _>>()?;
        if hubs.len() > 1 {
            return Err(ConnectionStringErr::NotOneHub);
        }

        Ok(Self {
            nodes,
            shared_access_key_name: None,
            shared_access_key: None,
            shared_access_signature: None,
            entity_path: hubs.pop(),
            raw: s.to_owned(),
        })
    }
}

fn parse_node(protocol: &str, host: &str) -> Result<Url, ConnectionStringErr> {
    format!("{protocol}://{host}")
        .parse()
        .map_err(|e: url::ParseError| ConnectionStringErr::InvalidEndpoint(e.to_string()))
}

impl FromStr for ConnectionString {
    type Err = ConnectionStringErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConnectionStringErr::Empty);
        }
        // `Endpoint=sb://..` also contains `://`, so look for the key first
        let first = s.split(';').next().unwrap_or_default();
        let is_key_values = first.to_ascii_lowercase().starts_with("endpoint=")
            || (first.contains('=') && !first.contains("://"));
        if is_key_values {
            Self::parse_key_values(s)
        } else {
            Self::parse_url(s)
        }
    }
}

impl Display for ConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", node)?;
        }
        write!(f, ")")?;
        if let Some(entity_path) = &self.entity_path {
            write!(f, "/{}", entity_path)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionString")
            .field("nodes", &self.nodes)
            .field("shared_access_key_name", &self.shared_access_key_name)
            .field(
                "shared_access_key",
                &self.shared_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "shared_access_signature",
                &self.shared_access_signature.as_ref().map(|_| "<redacted>"),
            )
            .field("entity_path", &self.entity_path)
            .finish()
    }
}
