use std::{fmt::Display, str::FromStr, sync::Arc};

use crate::HubNameErr;

/// Maximum string length of an event hub name.
pub const MAX_HUB_NAME_LEN: usize = 256;

/// Name of the consumer group every namespace provides.
pub const DEFAULT_CONSUMER_GROUP: &str = "$Default";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifies an event hub. Aka. topic.
pub struct HubName {
    name: Arc<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Used to identify a group of consumers.
pub struct ConsumerGroup {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifies a partition of an event hub. Event Hubs use strings like `"0"`, `"1"`.
pub struct PartitionId {
    id: Arc<String>,
}

impl HubName {
    pub fn new<S: Into<String>>(name: S) -> Result<Self, HubNameErr> {
        let name = name.into();
        if is_valid_hub_name(name.as_str()) {
            Ok(Self {
                name: Arc::new(name),
            })
        } else {
            Err(HubNameErr::InvalidHubName)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ConsumerGroup {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for ConsumerGroup {
    fn default() -> Self {
        Self::new(DEFAULT_CONSUMER_GROUP)
    }
}

impl PartitionId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: Arc::new(id.into()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Default for PartitionId {
    fn default() -> Self {
        Self::new("0")
    }
}

impl Display for HubName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for ConsumerGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for PartitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl FromStr for HubName {
    type Err = HubNameErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HubName::new(s)
    }
}

pub fn is_valid_hub_name(s: &str) -> bool {
    !s.is_empty() && s.len() <= MAX_HUB_NAME_LEN && s.chars().all(is_valid_hub_name_char)
}

/// Returns true if this character can be used in a hub name.
pub fn is_valid_hub_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hub_name() {
        assert_eq!(HubName::new("telemetry-01.raw_v2").unwrap().name(), "telemetry-01.raw_v2");
        assert_eq!(HubName::new(""), Err(HubNameErr::InvalidHubName));
        assert_eq!(HubName::new("has space"), Err(HubNameErr::InvalidHubName));
        assert_eq!(HubName::new("a/b"), Err(HubNameErr::InvalidHubName));
        assert!(HubName::new("x".repeat(MAX_HUB_NAME_LEN)).is_ok());
        assert!(HubName::new("x".repeat(MAX_HUB_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_default_consumer_group() {
        assert_eq!(ConsumerGroup::default().name(), "$Default");
    }
}
