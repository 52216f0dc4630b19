//! Escaping of plain text for inclusion in LaTeX source.

use std::borrow::Cow;

use textkit_core::line_ending::{
  get_line_ending_of_str,
  split_lines_inclusive,
};

use crate::chars::trim;

/// The LaTeX replacement for `ch`, if it has special meaning.
pub const fn latex_escape(ch: char) -> Option<&'static str> {
  match ch {
    '\\' => Some(r"\textbackslash{}"),
    '{' => Some(r"\{"),
    '}' => Some(r"\}"),
    '$' => Some(r"\$"),
    '&' => Some(r"\&"),
    '#' => Some(r"\#"),
    '^' => Some(r"\textasciicircum{}"),
    '_' => Some(r"\_"),
    '~' => Some(r"\textasciitilde{}"),
    '%' => Some(r"\%"),
    '<' => Some(r"\textless{}"),
    '>' => Some(r"\textgreater{}"),
    '|' => Some(r"\textbar{}"),
    _ => None,
  }
}

/// Escapes every LaTeX special char in `text`; other chars pass through.
///
/// `text` must not contain blank lines: LaTeX reads them as paragraph
/// breaks, which no escaping can express. This is not checked.
pub fn escape_latex(text: &str) -> Cow<'_, str> {
  if has_blank_line(text) {
    tracing::debug!("escaping text that contains a blank line");
  }

  let Some(first) = text.find(|ch: char| latex_escape(ch).is_some()) else {
    return Cow::Borrowed(text);
  };

  let mut escaped = String::with_capacity(text.len() + 16);
  escaped.push_str(&text[..first]);
  for ch in text[first..].chars() {
    match latex_escape(ch) {
      Some(replacement) => escaped.push_str(replacement),
      None => escaped.push(ch),
    }
  }
  Cow::Owned(escaped)
}

fn has_blank_line(text: &str) -> bool {
  split_lines_inclusive(text).any(|line| {
    let ending = get_line_ending_of_str(line).map_or(0, |le| le.as_str().len());
    trim(&line[..line.len() - ending]).is_empty() && ending > 0
  })
}
