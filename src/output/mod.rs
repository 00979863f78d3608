//! Output module
//!
//! Singer messages and the line-oriented writer that prints them to stdout.
//!
//! # Overview
//!
//! - `Message` - SCHEMA, RECORD and STATE messages
//! - `MessageWriter` - one JSON object per line over any `std::io::Write`

mod message;
mod writer;

pub use message::Message;
pub use writer::MessageWriter;

#[cfg(test)]
mod tests;
