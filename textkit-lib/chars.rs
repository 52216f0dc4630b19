/// Whitespace as word splitting sees it.
///
/// Covers everything [`char::is_whitespace`] does plus the information
/// separators U+001C..=U+001F, which Unicode classes as segment or
/// paragraph separators.
#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  ch.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&ch)
}

/// Splits `text` at runs of [`char_is_whitespace`], skipping empty words.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
  text.split(char_is_whitespace).filter(|word| !word.is_empty())
}

/// Trims [`char_is_whitespace`] from both ends of `text`.
pub fn trim(text: &str) -> &str {
  text.trim_matches(char_is_whitespace)
}
