//! A decoded-text view over a byte stream.
//!
//! [`TextStream`] wraps anything implementing [`Read`] and/or [`Write`] and
//! exchanges `str`/`String` with the caller while the wrapped stream only
//! ever sees encoded bytes.
//!
//! ```ignore
//! use textkit_core::{codec::TextStream, encoding::TextEncoding};
//!
//! let mut out = Vec::new();
//! let mut stream = TextStream::new(&mut out, TextEncoding::utf8());
//! stream.write_str("abc")?;
//! assert_eq!(out, b"abc");
//! ```

use std::{
  fmt,
  io::{
    self,
    Read,
    Write,
  },
};

use encoding_rs::{
  Decoder,
  Encoder,
};

use crate::{
  Result,
  config::Config,
  encoding::{
    TextEncoding,
    decode_chunk,
    encode_chunk,
  },
  line_ending::find_line_end,
};

pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Wraps a byte stream so reads return decoded text and writes accept text.
///
/// The wrapped stream is never closed by the adapter. Pass `&mut stream` to
/// keep ownership, or use [`TextStream::into_inner`] to get it back.
///
/// Besides the encoder/decoder state, the adapter keeps the text it decoded
/// but has not handed out yet. [`TextStream::into_inner`] drops that text.
///
/// Stateful encodings such as ISO-2022-JP only return to their initial
/// state in [`TextStream::flush`]. Dropping a writer without flushing leaves
/// the written bytes in the shifted state.
pub struct TextStream<S> {
  inner:      S,
  encoding:   TextEncoding,
  decoder:    Decoder,
  encoder:    Encoder,
  pending:    String,
  read_buf:   Vec<u8>,
  bytes_read: usize,
  chunk_size: usize,
  eof:        bool,
}

impl<S> TextStream<S> {
  pub fn new(inner: S, encoding: TextEncoding) -> Self {
    Self {
      inner,
      encoding,
      decoder: encoding.new_decoder(),
      encoder: encoding.new_encoder(),
      pending: String::new(),
      read_buf: Vec::new(),
      bytes_read: 0,
      chunk_size: DEFAULT_CHUNK_SIZE,
      eof: false,
    }
  }

  /// Resolves `label` first, failing before the stream is touched.
  pub fn with_label(inner: S, label: &str) -> Result<Self> {
    Ok(Self::new(inner, TextEncoding::for_label(label)?))
  }

  pub fn with_config(inner: S, config: &Config) -> Result<Self> {
    Ok(Self::new(inner, config.encoding()?).with_chunk_size(config.chunk_size))
  }

  /// Number of bytes requested from the stream per read. Zero is treated as
  /// one.
  pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
    self.chunk_size = chunk_size.max(1);
    self
  }

  pub fn encoding(&self) -> TextEncoding {
    self.encoding
  }

  pub fn get_ref(&self) -> &S {
    &self.inner
  }

  pub fn get_mut(&mut self) -> &mut S {
    &mut self.inner
  }

  pub fn into_inner(self) -> S {
    self.inner
  }
}

impl<S: Read> TextStream<S> {
  /// Pulls one chunk from the stream into `pending`.
  ///
  /// Returns `false` once the stream is exhausted.
  fn fill(&mut self) -> Result<bool> {
    if self.eof {
      return Ok(false);
    }

    self.read_buf.resize(self.chunk_size, 0);
    let n = loop {
      match self.inner.read(&mut self.read_buf) {
        Ok(n) => break n,
        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
        Err(err) => return Err(err.into()),
      }
    };
    tracing::trace!(bytes = n, encoding = self.encoding.name(), "read chunk");

    if n == 0 {
      self.eof = true;
      decode_chunk(
        &mut self.decoder,
        &[],
        &mut self.pending,
        self.bytes_read,
        true,
      )?;
      return Ok(false);
    }

    let decoded = decode_chunk(
      &mut self.decoder,
      &self.read_buf[..n],
      &mut self.pending,
      self.bytes_read,
      false,
    );
    // `bytes_read` covers a failed chunk too.
    self.bytes_read += n;
    decoded?;
    Ok(true)
  }

  /// Reads and decodes everything up to the end of the stream.
  pub fn read_to_string(&mut self) -> Result<String> {
    while self.fill()? {}
    Ok(std::mem::take(&mut self.pending))
  }

  /// Reads up to `max` chars. Fewer are returned only at the end of the
  /// stream.
  pub fn read_chars(&mut self, max: usize) -> Result<String> {
    // Chars before `scanned` are already counted in `seen`.
    let (mut scanned, mut seen) = (0, 0);
    loop {
      let tail = &self.pending[scanned..];
      if let Some((idx, _)) = tail.char_indices().nth(max - seen) {
        let rest = self.pending.split_off(scanned + idx);
        return Ok(std::mem::replace(&mut self.pending, rest));
      }
      seen += tail.chars().count();
      scanned = self.pending.len();
      if !self.fill()? {
        return Ok(std::mem::take(&mut self.pending));
      }
    }
  }

  /// Reads the next line, terminator included. `None` at the end of the
  /// stream.
  pub fn read_line(&mut self) -> Result<Option<String>> {
    // `pending[..scanned]` holds no terminator.
    let mut scanned = 0;
    loop {
      match find_line_end(&self.pending[scanned..]).map(|end| scanned + end) {
        Some(end) => {
          // A trailing `\r` might be the first half of `\r\n`.
          let undecided = end == self.pending.len() && self.pending.ends_with('\r');
          if !undecided || self.eof {
            let rest = self.pending.split_off(end);
            return Ok(Some(std::mem::replace(&mut self.pending, rest)));
          }
          scanned = end - 1;
        },
        None => scanned = self.pending.len(),
      }
      if !self.fill()? && find_line_end(&self.pending[scanned..]).is_none() {
        if self.pending.is_empty() {
          return Ok(None);
        }
        return Ok(Some(std::mem::take(&mut self.pending)));
      }
    }
  }

  /// Iterates over the remaining lines without consuming the adapter.
  pub fn lines(&mut self) -> TextLines<&mut Self> {
    TextLines {
      stream: self,
      done:   false,
    }
  }

  pub fn into_lines(self) -> TextLines<Self> {
    TextLines {
      stream: self,
      done:   false,
    }
  }
}

impl<S: Write> TextStream<S> {
  /// Encodes `text` and writes the bytes before returning.
  ///
  /// On an unmappable char, the bytes encoded before it are still written.
  pub fn write_str(&mut self, text: &str) -> Result<()> {
    let mut bytes = Vec::new();
    let encoded = encode_chunk(&mut self.encoder, text, &mut bytes, false);
    tracing::trace!(
      bytes = bytes.len(),
      encoding = self.encoding.name(),
      "write chunk"
    );
    self.inner.write_all(&bytes)?;
    encoded
  }

  pub fn write_lines<I>(&mut self, lines: I) -> Result<()>
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    for line in lines {
      self.write_str(line.as_ref())?;
    }
    Ok(())
  }

  /// Lets `write!` and `writeln!` target the stream.
  pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
    match args.as_str() {
      Some(text) => self.write_str(text),
      None => self.write_str(&args.to_string()),
    }
  }

  /// Ends any pending shift sequence of the encoder and flushes the stream.
  pub fn flush(&mut self) -> Result<()> {
    let mut bytes = Vec::new();
    encode_chunk(&mut self.encoder, "", &mut bytes, true)?;
    self.encoder = self.encoding.new_encoder();
    self.inner.write_all(&bytes)?;
    self.inner.flush()?;
    Ok(())
  }
}

impl<S> fmt::Debug for TextStream<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TextStream")
      .field("encoding", &self.encoding)
      .field("pending", &self.pending.len())
      .field("bytes_read", &self.bytes_read)
      .field("eof", &self.eof)
      .finish_non_exhaustive()
  }
}

/// Lines read lazily from a [`TextStream`].
///
/// Yields each error once and then stops.
#[derive(Debug)]
pub struct TextLines<T> {
  stream: T,
  done:   bool,
}

impl<T> TextLines<T> {
  pub fn into_inner(self) -> T {
    self.stream
  }

  fn advance<S: Read>(stream: &mut TextStream<S>, done: &mut bool) -> Option<Result<String>> {
    if *done {
      return None;
    }
    match stream.read_line() {
      Ok(Some(line)) => Some(Ok(line)),
      Ok(None) => {
        *done = true;
        None
      },
      Err(err) => {
        *done = true;
        Some(Err(err))
      },
    }
  }
}

impl<S: Read> Iterator for TextLines<TextStream<S>> {
  type Item = Result<String>;

  fn next(&mut self) -> Option<Self::Item> {
    Self::advance(&mut self.stream, &mut self.done)
  }
}

impl<S: Read> Iterator for TextLines<&mut TextStream<S>> {
  type Item = Result<String>;

  fn next(&mut self) -> Option<Self::Item> {
    Self::advance(&mut *self.stream, &mut self.done)
  }
}
