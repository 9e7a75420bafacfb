//! ### `hub-reader-runtime`: Async runtime abstraction
//!
//! Aligns the few runtime primitives the reader needs (a timer and a blocking-task pool)
//! between `tokio` and `async-std`, so that every other crate stays runtime agnostic.

#[cfg(all(feature = "runtime-async-std", feature = "runtime-tokio"))]
compile_error!("'runtime-async-std' and 'runtime-tokio' cannot be enabled at the same time");

mod sleep;
mod task;

pub use sleep::*;
pub use task::*;
