//! Resolution of encoding labels and one-shot / chunked conversion helpers.

use std::fmt;

use encoding_rs::{
  Decoder,
  DecoderResult,
  Encoder,
  EncoderResult,
  Encoding,
  UTF_8,
};

use crate::{
  Error,
  Result,
};

pub const DEFAULT_ENCODING_LABEL: &str = "utf8";

/// A character encoding that can both decode and encode.
///
/// Labels are resolved against the WHATWG Encoding Standard, so `"utf8"`,
/// `"UTF-8"` and `"unicode-1-1-utf-8"` all name the same encoding.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
  pub fn utf8() -> Self {
    Self(UTF_8)
  }

  pub fn for_label(label: &str) -> Result<Self> {
    match Encoding::for_label(label.trim().as_bytes()) {
      // UTF-16 and `replacement` decode fine but encode as something else.
      Some(encoding) if encoding.output_encoding() == encoding => Ok(Self(encoding)),
      Some(encoding) => {
        tracing::debug!(
          label,
          encoding = encoding.name(),
          "encoding cannot be used for writing"
        );
        Err(Error::UnsupportedEncoding(label.to_string()))
      },
      None => {
        tracing::debug!(label, "unknown encoding label");
        Err(Error::UnsupportedEncoding(label.to_string()))
      },
    }
  }

  /// Canonical name, e.g. `"UTF-8"` or `"Shift_JIS"`.
  pub fn name(&self) -> &'static str {
    self.0.name()
  }

  pub fn as_encoding(&self) -> &'static Encoding {
    self.0
  }

  /// Byte order marks are kept as text rather than sniffed and stripped.
  pub fn new_decoder(&self) -> Decoder {
    self.0.new_decoder_without_bom_handling()
  }

  pub fn new_encoder(&self) -> Encoder {
    self.0.new_encoder()
  }

  /// Decodes a complete byte blob.
  pub fn decode(&self, bytes: &[u8]) -> Result<String> {
    let mut decoder = self.new_decoder();
    let mut text = String::new();
    decode_chunk(&mut decoder, bytes, &mut text, 0, true)?;
    Ok(text)
  }

  /// Encodes a complete text, leaving stateful encodings in their initial
  /// state.
  pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
    let mut encoder = self.new_encoder();
    let mut bytes = Vec::new();
    encode_chunk(&mut encoder, text, &mut bytes, true)?;
    Ok(bytes)
  }
}

impl Default for TextEncoding {
  fn default() -> Self {
    Self::utf8()
  }
}

impl fmt::Debug for TextEncoding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("TextEncoding").field(&self.name()).finish()
  }
}

impl fmt::Display for TextEncoding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl std::str::FromStr for TextEncoding {
  type Err = Error;

  fn from_str(label: &str) -> Result<Self> {
    Self::for_label(label)
  }
}

/// Decodes `src` onto the end of `dst`.
///
/// `offset` is the position of `src` within the whole input and is only
/// used to report where a malformed sequence starts.
pub(crate) fn decode_chunk(
  decoder: &mut Decoder,
  src: &[u8],
  dst: &mut String,
  offset: usize,
  last: bool,
) -> Result<()> {
  let mut consumed = 0;
  loop {
    let remaining = &src[consumed..];
    let needed = decoder
      .max_utf8_buffer_length_without_replacement(remaining.len())
      .unwrap_or(remaining.len());
    dst.reserve(needed.max(4));

    let (result, read) = decoder.decode_to_string_without_replacement(remaining, dst, last);
    match result {
      DecoderResult::InputEmpty => return Ok(()),
      DecoderResult::OutputFull => consumed += read,
      DecoderResult::Malformed(bad, extra) => {
        // The bad bytes may have started in an earlier chunk.
        let at = (offset + consumed + read).saturating_sub(bad as usize + extra as usize);
        return Err(Error::Decode {
          encoding: decoder.encoding().name(),
          offset:   at,
        });
      },
    }
  }
}

/// Encodes `src` onto the end of `dst`.
///
/// On an unmappable char everything before it has already been appended to
/// `dst`.
pub(crate) fn encode_chunk(
  encoder: &mut Encoder,
  src: &str,
  dst: &mut Vec<u8>,
  last: bool,
) -> Result<()> {
  let mut consumed = 0;
  loop {
    let remaining = &src[consumed..];
    let needed = encoder
      .max_buffer_length_from_utf8_without_replacement(remaining.len())
      .unwrap_or(remaining.len());
    dst.reserve(needed.max(8));

    let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(remaining, dst, last);
    consumed += read;
    match result {
      EncoderResult::InputEmpty => return Ok(()),
      EncoderResult::OutputFull => {},
      EncoderResult::Unmappable(ch) => {
        return Err(Error::Unmappable {
          encoding: encoder.encoding().name(),
          ch,
        });
      },
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn default_label_is_utf8() {
    let encoding = TextEncoding::for_label(DEFAULT_ENCODING_LABEL).unwrap();
    assert_eq!(encoding, TextEncoding::utf8());
    assert_eq!(TextEncoding::default().name(), "UTF-8");
  }

  #[test]
  fn labels_are_case_insensitive() {
    assert_eq!(
      TextEncoding::for_label("Shift_JIS").unwrap(),
      TextEncoding::for_label("sjis").unwrap()
    );
    assert_eq!(TextEncoding::for_label(" UTF-8 ").unwrap().name(), "UTF-8");
  }

  #[test]
  fn unknown_label() {
    assert!(matches!(
      TextEncoding::for_label("klingon"),
      Err(Error::UnsupportedEncoding(label)) if label == "klingon"
    ));
  }

  #[test]
  fn decode_only_encodings_are_rejected() {
    assert!(matches!(
      TextEncoding::for_label("utf-16le"),
      Err(Error::UnsupportedEncoding(_))
    ));
    assert!(matches!(
      "replacement".parse::<TextEncoding>(),
      Err(Error::UnsupportedEncoding(_))
    ));
  }

  #[test]
  fn decode_reports_offset() {
    let err = TextEncoding::utf8().decode(b"ab\xffcd").unwrap_err();
    assert!(matches!(
      err,
      Error::Decode {
        encoding: "UTF-8",
        offset:   2,
      }
    ));
  }

  #[test]
  fn decode_truncated_sequence() {
    // First two bytes of a three byte sequence.
    let err = TextEncoding::utf8().decode(b"ok\xe2\x82").unwrap_err();
    assert!(matches!(err, Error::Decode { encoding: "UTF-8", .. }));
  }

  #[test]
  fn decode_keeps_bom() {
    let text = TextEncoding::utf8().decode(b"\xef\xbb\xbfhi").unwrap();
    assert_eq!(text, "\u{feff}hi");
  }

  #[test]
  fn legacy_round_trip() {
    let sjis = TextEncoding::for_label("shift_jis").unwrap();
    let bytes = sjis.encode("Hello 世界").unwrap();
    assert_eq!(bytes, [72, 101, 108, 108, 111, 32, 144, 162, 138, 69]);
    assert_eq!(sjis.decode(&bytes).unwrap(), "Hello 世界");
  }

  #[test]
  fn unmappable_char() {
    let latin1 = TextEncoding::for_label("latin1").unwrap();
    assert!(matches!(
      latin1.encode("snow ☃"),
      Err(Error::Unmappable { ch: '☃', .. })
    ));
  }

  #[test]
  fn large_input_decodes_across_buffer_growth() {
    let text = "ünïcödé ".repeat(10_000);
    let bytes = TextEncoding::utf8().encode(&text).unwrap();
    assert_eq!(TextEncoding::utf8().decode(&bytes).unwrap(), text);
  }

  quickcheck::quickcheck! {
    fn utf8_round_trip(text: String) -> bool {
      let bytes = TextEncoding::utf8().encode(&text).unwrap();
      bytes == text.as_bytes() && TextEncoding::utf8().decode(&bytes).unwrap() == text
    }
  }
}
