//! # hub-reader types
//!
//! This crate defines the traits and types shared by the bounded event reader and its transports,
//! but does not provide any implementation.
//!
//! A transport implements [`EventSource`] to open a [`Session`], which yields [`PartitionEvent`]s
//! until the stream ends, and must be [`Session::close`]d afterwards.

#![deny(missing_debug_implementations)]

mod connection;
mod error;
mod event;
mod hub;
mod source;

pub use connection::*;
pub use error::*;
pub use event::*;
pub use hub::*;
pub use source::*;

/// Re-export of the async building blocks used by the traits in this crate.
pub mod export {
    pub use async_trait::async_trait;
    pub use futures;
    pub use time;
}
