use std::fmt;

use crate::chars::trim;

/// A URI followed by an optional human readable label, as found in
/// `labeledURI` attributes: `"http://example.com/ Example site"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabeledUri {
  pub uri:   String,
  pub label: String,
}

impl LabeledUri {
  /// Splits `value` with [`split_labeled_uri`].
  pub fn parse(value: &str, default_label: &str) -> Self {
    let (uri, label) = split_labeled_uri(value, default_label);
    Self { uri, label }
  }

  pub fn to_url(&self) -> Result<url::Url, url::ParseError> {
    url::Url::parse(&self.uri)
  }
}

impl fmt::Display for LabeledUri {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.label.is_empty() {
      f.write_str(&self.uri)
    } else {
      write!(f, "{} {}", self.uri, self.label)
    }
  }
}

/// Splits a labeled URI into `(uri, label)`.
///
/// The value is trimmed and split at its first space; both halves are
/// trimmed again. Without a label part, `default` is returned as given.
pub fn split_labeled_uri(value: &str, default: &str) -> (String, String) {
  let value = trim(value);
  match value.split_once(' ') {
    Some((uri, label)) => (trim(uri).to_string(), trim(label).to_string()),
    None => (value.to_string(), default.to_string()),
  }
}
