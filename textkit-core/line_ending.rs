#[cfg(target_os = "windows")]
pub const NATIVE_LINE_ENDING: LineEnding = LineEnding::Crlf;

#[cfg(not(target_os = "windows"))]
pub const NATIVE_LINE_ENDING: LineEnding = LineEnding::LF;

/// Every sequence that terminates a line when splitting decoded text.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum LineEnding {
  /// CarriageReturn followed by LineFeed.
  Crlf,

  /// U+000A -- LineFeed
  LF,

  /// U+000B -- VerticalTab
  VT,

  /// U+000C -- FormFeed
  FF,

  /// U+000D -- CarriageReturn
  CR,

  /// U+001C -- FileSeparator
  FS,

  /// U+001D -- GroupSeparator
  GS,

  /// U+001E -- RecordSeparator
  RS,

  /// U+0085 -- NextLine
  Nel,

  /// U+2028 -- Line Separator
  LS,

  /// U+2029 -- ParagraphSeparator
  PS,
}

impl LineEnding {
  #[inline]
  pub const fn len_chars(&self) -> usize {
    match self {
      Self::Crlf => 2,
      _ => 1,
    }
  }

  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Crlf => "\u{000D}\u{000A}",
      Self::LF => "\u{000A}",
      Self::VT => "\u{000B}",
      Self::FF => "\u{000C}",
      Self::CR => "\u{000D}",
      Self::FS => "\u{001C}",
      Self::GS => "\u{001D}",
      Self::RS => "\u{001E}",
      Self::Nel => "\u{0085}",
      Self::LS => "\u{2028}",
      Self::PS => "\u{2029}",
    }
  }

  #[inline]
  pub const fn from_char(ch: char) -> Option<LineEnding> {
    match ch {
      '\u{000A}' => Some(LineEnding::LF),
      '\u{000B}' => Some(LineEnding::VT),
      '\u{000C}' => Some(LineEnding::FF),
      '\u{000D}' => Some(LineEnding::CR),
      '\u{001C}' => Some(LineEnding::FS),
      '\u{001D}' => Some(LineEnding::GS),
      '\u{001E}' => Some(LineEnding::RS),
      '\u{0085}' => Some(LineEnding::Nel),
      '\u{2028}' => Some(LineEnding::LS),
      '\u{2029}' => Some(LineEnding::PS),
      _ => None,
    }
  }

  // Normally we'd want to implement the FromStr trait, but in this case
  // that would force us into a different return type than from_char,
  // which would be weird.
  #[allow(clippy::should_implement_trait)]
  #[inline]
  pub fn from_str(g: &str) -> Option<LineEnding> {
    if g == "\u{000D}\u{000A}" {
      return Some(LineEnding::Crlf);
    }
    let mut chars = g.chars();
    match (chars.next(), chars.next()) {
      (Some(ch), None) => LineEnding::from_char(ch),
      _ => None,
    }
  }
}

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  LineEnding::from_char(ch).is_some()
}

#[inline]
pub fn str_is_line_ending(s: &str) -> bool {
  LineEnding::from_str(s).is_some()
}

/// Returns the passed line's line ending, if any.
pub fn get_line_ending_of_str(line: &str) -> Option<LineEnding> {
  if line.ends_with("\u{000D}\u{000A}") {
    return Some(LineEnding::Crlf);
  }
  line.chars().next_back().and_then(LineEnding::from_char)
}

/// Returns the byte index just past the first line terminator in `text`.
///
/// `\r\n` counts as a single terminator. A `\r` that is the last char of
/// `text` is reported as a lone CR; callers reading incrementally must
/// check whether a `\n` follows before trusting it.
pub fn find_line_end(text: &str) -> Option<usize> {
  let (idx, ch) = text.char_indices().find(|&(_, ch)| char_is_line_ending(ch))?;
  let end = idx + ch.len_utf8();
  if ch == '\r' && text[end..].starts_with('\n') {
    Some(end + 1)
  } else {
    Some(end)
  }
}

/// Splits `text` into lines, keeping each line's terminator.
///
/// The last line carries no terminator when `text` does not end with one.
/// Empty text yields no lines.
pub fn split_lines_inclusive(text: &str) -> SplitLines<'_> {
  SplitLines { rest: text }
}

#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
  rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
  type Item = &'a str;

  fn next(&mut self) -> Option<&'a str> {
    if self.rest.is_empty() {
      return None;
    }
    let end = find_line_end(self.rest).unwrap_or(self.rest.len());
    let (line, rest) = self.rest.split_at(end);
    self.rest = rest;
    Some(line)
  }
}

impl std::iter::FusedIterator for SplitLines<'_> {}
