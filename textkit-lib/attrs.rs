//! Structs whose fields can only be set by name.
//!
//! [`keyword_struct!`](crate::keyword_struct) declares a plain struct plus a
//! builder with one setter per field. There is no positional constructor,
//! fields without a default must be set before `build()` succeeds, and field
//! names must start with a letter.
//!
//! ```ignore
//! textkit_lib::keyword_struct! {
//!   pub struct Entry {
//!     title: String,
//!     weight: u32 = 1,
//!   }
//! }
//!
//! let entry = Entry::builder().title("intro").build()?;
//! assert_eq!(entry.weight, 1);
//! ```

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
  #[error("missing attribute '{0}'")]
  MissingAttribute(&'static str),
  #[error("attribute name '{0}' must start with a letter")]
  InvalidAttributeName(String),
}

/// Whether a Rust identifier is an acceptable attribute name.
///
/// Identifiers may only start with `_` or a letter, and every non-ASCII
/// identifier start is a letter, so only the first byte is inspected.
pub const fn ident_is_attribute_name(ident: &str) -> bool {
  match ident.as_bytes() {
    [b'r', b'#', first, ..] | [first, ..] => first.is_ascii_alphabetic() || *first >= 0x80,
    [] => false,
  }
}

/// Checks an arbitrary name against the attribute naming rule.
pub fn validate_attribute_name(name: &str) -> Result<(), ContractError> {
  if name.chars().next().is_some_and(char::is_alphabetic) {
    Ok(())
  } else {
    Err(ContractError::InvalidAttributeName(name.to_string()))
  }
}

#[macro_export]
macro_rules! keyword_struct {
  (
    $(#[$meta:meta])*
    $vis:vis struct $name:ident {
      $(
        $(#[$field_meta:meta])*
        $field:ident : $ty:ty $(= $default:expr)?
      ),* $(,)?
    }
  ) => {
    $crate::paste::paste! {
      $(#[$meta])*
      $vis struct $name {
        $(
          $(#[$field_meta])*
          pub $field: $ty,
        )*
      }

      $(
        const _: () = assert!(
          $crate::attrs::ident_is_attribute_name(stringify!($field)),
          "attribute names must start with a letter"
        );
      )*

      #[derive(Default)]
      $vis struct [<$name Builder>] {
        $( $field: ::std::option::Option<$ty>, )*
      }

      impl $name {
        pub fn builder() -> [<$name Builder>] {
          ::std::default::Default::default()
        }
      }

      impl [<$name Builder>] {
        $(
          pub fn $field(mut self, value: impl ::std::convert::Into<$ty>) -> Self {
            self.$field = ::std::option::Option::Some(value.into());
            self
          }
        )*

        pub fn build(self) -> ::std::result::Result<$name, $crate::ContractError> {
          ::std::result::Result::Ok($name {
            $(
              $field: $crate::__keyword_field!(self.$field, stringify!($field) $(, $default)?),
            )*
          })
        }
      }
    }
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __keyword_field {
  ($value:expr, $name:expr) => {
    match $value {
      ::std::option::Option::Some(value) => value,
      ::std::option::Option::None => {
        return ::std::result::Result::Err($crate::ContractError::MissingAttribute($name));
      },
    }
  };
  ($value:expr, $name:expr, $default:expr) => {
    match $value {
      ::std::option::Option::Some(value) => value,
      ::std::option::Option::None => $default,
    }
  };
}
