//! ### `hub-reader-kafka`: Event Hubs over the Kafka protocol
//!
//! Every Event Hubs namespace (Standard tier and above) exposes a Kafka endpoint on port 9093.
//! This transport reads a hub through that endpoint, authenticating with SASL PLAIN where the
//! username is the literal `$ConnectionString` and the password is the connection string itself.
//! A `kafka://host:port/topic` connection string reads from a plain Kafka broker instead.
//!
//! All partitions are assigned from the beginning, and nothing is ever committed, so every run
//! starts over just like a reader on the default consumer group without checkpoints.
//!
//! This crate depends on [`rdkafka`](https://docs.rs/rdkafka), which wraps librdkafka.
//! Connecting to Event Hubs requires TLS, so enable the `ssl` or `ssl-vendored` feature.

#![deny(missing_debug_implementations)]

/// Port of the Kafka endpoint of an Event Hubs namespace
pub const EVENT_HUBS_KAFKA_PORT: u16 = 9093;

/// The default Kafka port number
pub const KAFKA_PORT: u16 = 9092;

/// The default network timeout, if unspecified
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

mod config;
mod error;
mod runtime;
mod session;
mod source;

pub use config::*;
pub use error::*;
pub use runtime::*;
pub use session::*;
pub use source::*;

/// Re-export types from `rdkafka`
pub mod export {
    pub use rdkafka;
}

macro_rules! impl_into_string {
    ($name:ident) => {
        impl From<$name> for String {
            fn from(o: $name) -> Self {
                o.as_str().to_owned()
            }
        }
    };
}

pub(crate) use impl_into_string;
