//! ### `hub-reader-stdio`: Standard I/O transport
//!
//! Treats every line of stdin as one event, which is handy for trying out the reader without a hub:
//!
//! ```shell
//! printf '[0] hello\n[1 | 7] world\n' | query-event-hub -c stdio://
//! ```
//!
//! A line may be prefixed with `[timestamp | partition | sequence]`, see [`parse_line`].
//! The stream ends when stdin is closed.

#![deny(missing_debug_implementations)]

mod error;
mod parser;
mod source;

pub use error::*;
pub use parser::*;
pub use source::*;
