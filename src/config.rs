use std::time::Duration;
use thiserror::Error;

use hub_reader_types::{
    ConnectionString, ConnectionStringErr, HubName, HubNameErr, SessionParams,
};

use crate::ReaderOptions;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Unvalidated settings of one run, as collected from the command line or environment.
pub struct ReaderConfig {
    pub connection_string: Option<String>,
    pub hub_name: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_events: Option<usize>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Problems with the settings themselves, found before any session is opened.
pub enum ConfigErr {
    #[error("A connection string is required")]
    MissingConnectionString,
    #[error("Invalid connection string: {0}")]
    ConnectionString(#[from] ConnectionStringErr),
    #[error("Invalid event hub name: {0}")]
    HubName(#[from] HubNameErr),
    #[error("Event hub name `{given}` does not match the EntityPath `{entity_path}` of the connection string")]
    HubNameMismatch { given: String, entity_path: String },
    #[error("The maximum event count must be at least 1")]
    ZeroMaxEvents,
}

impl ReaderConfig {
    /// Validate the settings. This never touches the network.
    pub fn resolve(&self) -> Result<(SessionParams, ReaderOptions), ConfigErr> {
        let connection: ConnectionString = non_empty(&self.connection_string)
            .ok_or(ConfigErr::MissingConnectionString)?
            .parse()?;

        let hub = non_empty(&self.hub_name).map(HubName::new).transpose()?;
        if let (Some(given), Some(entity_path)) = (&hub, connection.entity_path()) {
            // hub names are case insensitive
            if !given.name().eq_ignore_ascii_case(entity_path.name()) {
                return Err(ConfigErr::HubNameMismatch {
                    given: given.name().to_owned(),
                    entity_path: entity_path.name().to_owned(),
                });
            }
        }

        let mut options = ReaderOptions::default();
        if let Some(secs) = self.timeout_secs {
            options.set_timeout(Duration::from_secs(secs));
        }
        match self.max_events {
            Some(0) => return Err(ConfigErr::ZeroMaxEvents),
            Some(max) => {
                options.set_max_events(max);
            }
            None => (),
        }

        Ok((SessionParams::new(connection, hub), options))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
