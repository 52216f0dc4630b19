//! Text normalization: decoded-text views over byte streams, an in-memory
//! text sink, and line iteration that treats text, encoded bytes and byte
//! streams alike.

pub mod accumulator;
pub mod codec;
pub mod config;
pub mod encoding;
pub mod line_ending;
pub mod lines;

mod error;

pub use accumulator::Accumulator;
pub use codec::TextStream;
pub use encoding::TextEncoding;
pub use error::{
  Error,
  Result,
};
pub use lines::{
  Lines,
  Source,
  read_lines,
};
