//! Line iteration over text, encoded bytes, or a byte stream.
//!
//! The caller states which shape the input has by picking a [`Source`]
//! variant; `&str` is taken as already decoded, `&[u8]` as encoded bytes.
//! Whatever the shape, [`Lines`] yields the same decoded lines with their
//! terminators kept.

use std::io::{
  self,
  Read,
};

use crate::{
  Result,
  codec::{
    TextLines,
    TextStream,
  },
  config::Config,
  encoding::TextEncoding,
  line_ending::{
    SplitLines,
    find_line_end,
    split_lines_inclusive,
  },
};

/// Input to [`Lines`]. Variants are tried in declaration order when
/// converting from a value that could fit more than one.
#[derive(Debug)]
pub enum Source<'a, R = io::Empty> {
  /// Already decoded; split as is.
  Text(&'a str),
  /// Encoded bytes; decoded as a whole before splitting.
  Bytes(&'a [u8]),
  /// Encoded byte stream; decoded and split lazily.
  Stream(R),
}

impl<R> Source<'_, R> {
  pub fn stream(reader: R) -> Self {
    Source::Stream(reader)
  }
}

impl<'a> From<&'a str> for Source<'a> {
  fn from(text: &'a str) -> Self {
    Source::Text(text)
  }
}

impl<'a> From<&'a String> for Source<'a> {
  fn from(text: &'a String) -> Self {
    Source::Text(text)
  }
}

impl<'a> From<&'a [u8]> for Source<'a> {
  fn from(bytes: &'a [u8]) -> Self {
    Source::Bytes(bytes)
  }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Source<'a> {
  fn from(bytes: &'a [u8; N]) -> Self {
    Source::Bytes(bytes)
  }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
  fn from(bytes: &'a Vec<u8>) -> Self {
    Source::Bytes(bytes)
  }
}

/// Decoded lines of a [`Source`], terminators included.
///
/// Text and byte sources are split up front and the source itself is left
/// untouched, so building a new `Lines` from it starts over. A stream source
/// is read as lines are requested and cannot be rewound by this type.
#[derive(Debug)]
pub struct Lines<'a, R = io::Empty> {
  inner: LinesInner<'a, R>,
}

#[derive(Debug)]
enum LinesInner<'a, R> {
  Text(SplitLines<'a>),
  Decoded { text: String, pos: usize },
  Stream(TextLines<TextStream<R>>),
}

impl<'a, R: Read> Lines<'a, R> {
  /// Fails immediately if a byte source does not decode under `encoding`.
  pub fn new(source: impl Into<Source<'a, R>>, encoding: TextEncoding) -> Result<Self> {
    let inner = match source.into() {
      Source::Text(text) => LinesInner::Text(split_lines_inclusive(text)),
      Source::Bytes(bytes) => {
        LinesInner::Decoded {
          text: encoding.decode(bytes)?,
          pos:  0,
        }
      },
      Source::Stream(reader) => {
        LinesInner::Stream(TextStream::new(reader, encoding).into_lines())
      },
    };
    Ok(Self { inner })
  }

  pub fn with_label(source: impl Into<Source<'a, R>>, label: &str) -> Result<Self> {
    Self::new(source, TextEncoding::for_label(label)?)
  }

  pub fn with_config(source: impl Into<Source<'a, R>>, config: &Config) -> Result<Self> {
    let inner = match source.into() {
      Source::Stream(reader) => {
        LinesInner::Stream(TextStream::with_config(reader, config)?.into_lines())
      },
      source => return Self::new(source, config.encoding()?),
    };
    Ok(Self { inner })
  }

  /// Whether the lines came from a source that can be read again.
  pub fn is_restartable(&self) -> bool {
    !matches!(self.inner, LinesInner::Stream(_))
  }
}

impl<R: Read> Iterator for Lines<'_, R> {
  type Item = Result<String>;

  fn next(&mut self) -> Option<Self::Item> {
    match &mut self.inner {
      LinesInner::Text(lines) => lines.next().map(|line| Ok(line.to_string())),
      LinesInner::Decoded { text, pos } => {
        let rest = &text[*pos..];
        if rest.is_empty() {
          return None;
        }
        let end = find_line_end(rest).unwrap_or(rest.len());
        *pos += end;
        Some(Ok(rest[..end].to_string()))
      },
      LinesInner::Stream(lines) => lines.next(),
    }
  }
}

/// Lines of `source` decoded as UTF-8.
pub fn read_lines<'a, R: Read>(source: impl Into<Source<'a, R>>) -> Result<Lines<'a, R>> {
  Lines::new(source, TextEncoding::default())
}
