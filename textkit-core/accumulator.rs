use std::fmt;

/// An in-memory text sink.
///
/// Writes append to the content; [`Accumulator::set_content`] replaces it
/// wholesale, which is how callers reset the sink. Formatting the
/// accumulator with `{}` yields exactly the current content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Accumulator {
  content: String,
}

impl Accumulator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_content(content: impl Into<String>) -> Self {
    Self {
      content: content.into(),
    }
  }

  pub fn write(&mut self, text: &str) {
    self.content.push_str(text);
  }

  pub fn content(&self) -> &str {
    &self.content
  }

  /// Later writes append after `content`.
  pub fn set_content(&mut self, content: impl Into<String>) {
    self.content = content.into();
  }

  pub fn into_content(self) -> String {
    self.content
  }

  pub fn len(&self) -> usize {
    self.content.len()
  }

  pub fn is_empty(&self) -> bool {
    self.content.is_empty()
  }
}

impl fmt::Display for Accumulator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.content)
  }
}

impl fmt::Write for Accumulator {
  fn write_str(&mut self, s: &str) -> fmt::Result {
    self.write(s);
    Ok(())
  }
}

impl AsRef<str> for Accumulator {
  fn as_ref(&self) -> &str {
    &self.content
  }
}

impl From<String> for Accumulator {
  fn from(content: String) -> Self {
    Self { content }
  }
}

impl From<&str> for Accumulator {
  fn from(content: &str) -> Self {
    Self::with_content(content)
  }
}

impl From<Accumulator> for String {
  fn from(acc: Accumulator) -> Self {
    acc.content
  }
}
