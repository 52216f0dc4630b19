use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The label is unknown, or names an encoding that can only decode.
  #[error("unsupported encoding '{0}'")]
  UnsupportedEncoding(String),

  /// `offset` counts bytes from the start of the decoded input.
  #[error("invalid {encoding} byte sequence at offset {offset}")]
  Decode {
    encoding: &'static str,
    offset:   usize,
  },

  #[error("character {ch:?} cannot be encoded as {encoding}")]
  Unmappable {
    encoding: &'static str,
    ch:       char,
  },

  #[error(transparent)]
  Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
