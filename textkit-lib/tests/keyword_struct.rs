use textkit_lib::{
  ContractError,
  keyword_struct,
};

keyword_struct! {
  /// Options for rendering a bibliography entry.
  #[derive(Debug, Clone, PartialEq)]
  pub struct EntryOptions {
    title: String,
    /// Shown after the title when set.
    subtitle: Option<String> = None,
    weight: u32 = 1,
    draft: bool = false,
  }
}

keyword_struct! {
  struct Empty {}
}

#[test]
fn defaults_fill_unset_fields() {
  let opts = EntryOptions::builder().title("Intro").build().unwrap();
  assert_eq!(
    opts,
    EntryOptions {
      title:    "Intro".to_string(),
      subtitle: None,
      weight:   1,
      draft:    false,
    }
  );
}

#[test]
fn every_field_is_set_by_name() {
  let opts = EntryOptions::builder()
    .draft(true)
    .weight(5u32)
    .subtitle(Some("part two".to_string()))
    .title(String::from("Outro"))
    .build()
    .unwrap();
  assert_eq!(opts.title, "Outro");
  assert_eq!(opts.subtitle.as_deref(), Some("part two"));
  assert_eq!(opts.weight, 5);
  assert!(opts.draft);
}

#[test]
fn later_setters_win() {
  let opts = EntryOptions::builder()
    .title("first")
    .title("second")
    .build()
    .unwrap();
  assert_eq!(opts.title, "second");
}

#[test]
fn required_fields_must_be_set() {
  let err = EntryOptions::builder().weight(3u32).build().unwrap_err();
  assert_eq!(err, ContractError::MissingAttribute("title"));
  assert_eq!(err.to_string(), "missing attribute 'title'");
}

#[test]
fn structs_without_fields() {
  assert!(Empty::builder().build().is_ok());
}
