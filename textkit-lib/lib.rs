use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod attrs;
pub mod case_convention;
pub mod chars;
pub mod escape;
pub mod order;
pub mod uri;

pub use attrs::ContractError;

pub type Tendril = SmartString<LazyCompact>;

#[doc(hidden)]
pub use paste;
