//! # hub-reader
//!
//! Read a bounded batch of events from an event hub: open a session, print each event body
//! until either `max_events` have been read or the timeout elapses, then close the session
//! and report whether the run was `Processed` or `Canceled`.
//!
//! Reading from Event Hubs needs the Kafka transport, which is not in the default features:
//!
//! ```shell
//! cargo install hub-reader --features backend-kafka,ssl
//! query-event-hub -c "Endpoint=sb://my-ns.servicebus.windows.net/;SharedAccessKeyName=listen;SharedAccessKey=...;EntityPath=telemetry" -t 10
//! ```
//!
//! The default build only has the stdin transport, for trying things out locally:
//!
//! ```shell
//! printf 'hello\nworld\n' | query-event-hub -c stdio://
//! ```
//!
//! The timeout is never shorter than 5 seconds. Reading always starts from the beginning of every
//! partition on the `$Default` consumer group, and no checkpoint is ever written.
//!
//! ## Architecture
//!
//! `hub-reader` is the facade crate on top of a number of sub-crates:
//!
//! + `hub-reader-types`: the [`EventSource`] and [`Session`] traits and the shared types
//! + `hub-reader-kafka`: reads `sb://` hubs through their Kafka endpoint (feature `backend-kafka`)
//! + `hub-reader-stdio`: reads lines of stdin, for `stdio://` connection strings (feature `backend-stdio`)
//! + `hub-reader-runtime`: the async runtime shims, `tokio` or `async-std`
//!
//! [`BoundedReader`] drives any [`EventSource`]; [`HubSource`] picks the transport by the
//! protocol of the connection string.

mod backend;
mod config;
mod reader;
mod sink;

pub use backend::*;
pub use config::*;
pub use reader::*;
pub use sink::*;

pub use hub_reader_types::*;

#[cfg(feature = "backend-kafka")]
pub use hub_reader_kafka as kafka;
#[cfg(feature = "backend-stdio")]
pub use hub_reader_stdio as stdio;
