use crate::{
  Tendril,
  chars::split_words,
};

/// Joins the whitespace separated words of `text` into CamelCase.
///
/// Each word is cut to `max_word_len` chars when given, then its first char
/// is upper-cased and the rest lower-cased.
pub fn camelcase(text: &str, max_word_len: Option<usize>) -> Tendril {
  let mut res = Tendril::new();
  camelcase_with(text, max_word_len, &mut res);
  res
}

pub fn camelcase_with(text: &str, max_word_len: Option<usize>, buf: &mut Tendril) {
  for word in split_words(text) {
    let word = word.chars().take(max_word_len.unwrap_or(usize::MAX));
    capitalize_with(word, buf);
  }
}

fn capitalize_with(word: impl Iterator<Item = char>, buf: &mut Tendril) {
  word.fold(true, |word_start, c| {
    if word_start {
      buf.extend(c.to_uppercase());
    } else {
      buf.extend(c.to_lowercase());
    }
    false
  });
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn single_word() {
    assert_eq!(camelcase("Abc", None).as_str(), "Abc");
    assert_eq!(camelcase("abc", None).as_str(), "Abc");
    assert_eq!(camelcase("ABC", None).as_str(), "Abc");
  }

  #[test]
  fn sentence() {
    assert_eq!(camelcase("This is a text", None).as_str(), "ThisIsAText");
    assert_eq!(camelcase("  This\tis\na   text ", None).as_str(), "ThisIsAText");
  }

  #[test]
  fn information_separators_split_words() {
    assert_eq!(camelcase("a\u{1C}b", None).as_str(), "AB");
    assert_eq!(camelcase("\u{1F}one\u{1D}two\u{1E}", Some(2)).as_str(), "OnTw");
  }

  #[test]
  fn word_length_limit() {
    assert_eq!(camelcase("This is a text", Some(4)).as_str(), "ThisIsAText");
    assert_eq!(camelcase("This is a text", Some(3)).as_str(), "ThiIsATex");
    assert_eq!(camelcase("This is a text", Some(2)).as_str(), "ThIsATe");
    assert_eq!(camelcase("This is a text", Some(1)).as_str(), "TIAT");
    assert_eq!(camelcase("This is a text", Some(0)).as_str(), "");
  }

  #[test]
  fn empty_input() {
    assert_eq!(camelcase("", None).as_str(), "");
    assert_eq!(camelcase("   ", Some(3)).as_str(), "");
  }

  #[test]
  fn limit_counts_chars() {
    assert_eq!(camelcase("über äpfel", Some(2)).as_str(), "ÜbÄp");
  }

  #[test]
  fn appends_to_buffer() {
    let mut buf = Tendril::from("Prefix");
    camelcase_with("more words", None, &mut buf);
    assert_eq!(buf.as_str(), "PrefixMoreWords");
  }

  quickcheck::quickcheck! {
    fn no_whitespace_survives(text: String) -> bool {
      !camelcase(&text, None).chars().any(crate::chars::char_is_whitespace)
    }
  }
}
