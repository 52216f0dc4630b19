//! Ordering values by when they were created.
//!
//! A [`SequenceRegistry`] hands out strictly increasing [`CreationKey`]s.
//! Values of different types that draw keys from the same registry can be
//! compared by creation order.

use std::{
  cell::Cell,
  cmp::Ordering,
  num::NonZeroU64,
  ops::Deref,
};

/// Position of a value in creation order. The first key is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CreationKey(NonZeroU64);

impl CreationKey {
  pub fn get(self) -> u64 {
    self.0.get()
  }
}

/// Source of creation keys. Not thread safe; share it by reference.
#[derive(Debug)]
pub struct SequenceRegistry {
  next: Cell<NonZeroU64>,
}

impl Default for SequenceRegistry {
  fn default() -> Self {
    Self::new()
  }
}

impl SequenceRegistry {
  pub fn new() -> Self {
    Self {
      next: Cell::new(NonZeroU64::MIN),
    }
  }

  pub fn next_key(&self) -> CreationKey {
    let key = self.next.get();
    // u64 keys do not run out in practice; saturate rather than wrap to 0.
    self.next.set(key.saturating_add(1));
    CreationKey(key)
  }

  /// Pairs `value` with the next key.
  pub fn track<T>(&self, value: T) -> Ordered<T> {
    Ordered {
      key: self.next_key(),
      value,
    }
  }

  /// The key the next call to [`SequenceRegistry::next_key`] returns.
  pub fn peek(&self) -> CreationKey {
    CreationKey(self.next.get())
  }
}

/// Anything that knows its creation key.
pub trait CreationOrdered {
  fn creation_key(&self) -> CreationKey;

  fn cmp_creation(&self, other: &dyn CreationOrdered) -> Ordering {
    self.creation_key().cmp(&other.creation_key())
  }
}

/// A value tagged with its creation key. Comparisons look at the key only.
#[derive(Debug, Clone)]
pub struct Ordered<T> {
  key:   CreationKey,
  value: T,
}

impl<T> Ordered<T> {
  pub fn key(&self) -> CreationKey {
    self.key
  }

  pub fn into_inner(self) -> T {
    self.value
  }
}

impl<T> CreationOrdered for Ordered<T> {
  fn creation_key(&self) -> CreationKey {
    self.key
  }
}

impl<T> Deref for Ordered<T> {
  type Target = T;

  fn deref(&self) -> &T {
    &self.value
  }
}

impl<T> PartialEq for Ordered<T> {
  fn eq(&self, other: &Self) -> bool {
    self.key == other.key
  }
}

impl<T> Eq for Ordered<T> {}

impl<T> PartialOrd for Ordered<T> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<T> Ord for Ordered<T> {
  fn cmp(&self, other: &Self) -> Ordering {
    self.key.cmp(&other.key)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  struct Section {
    key:   CreationKey,
    title: &'static str,
  }

  impl CreationOrdered for Section {
    fn creation_key(&self) -> CreationKey {
      self.key
    }
  }

  #[test]
  fn keys_start_at_one_and_increase() {
    let registry = SequenceRegistry::new();
    assert_eq!(registry.peek().get(), 1);
    let a = registry.next_key();
    let b = registry.next_key();
    assert_eq!(a.get(), 1);
    assert_eq!(b.get(), 2);
    assert!(a < b);
  }

  #[test]
  fn creation_order_survives_sorting() {
    let registry = SequenceRegistry::new();
    let a = registry.track("zebra");
    let b = registry.track("apple");
    let c = registry.track("mango");
    assert!(a < b && b < c);

    let mut shuffled = vec![c.clone(), a.clone(), b.clone()];
    shuffled.sort();
    let order: Vec<_> = shuffled.iter().map(|item| **item).collect();
    assert_eq!(order, ["zebra", "apple", "mango"]);
  }

  #[test]
  fn equality_ignores_the_value() {
    let registry = SequenceRegistry::new();
    let a = registry.track(1);
    assert_eq!(a, a.clone());
    assert_ne!(registry.track(1), a);
  }

  #[test]
  fn different_types_share_one_sequence() {
    let registry = SequenceRegistry::new();
    let section = Section {
      key:   registry.next_key(),
      title: "intro",
    };
    let note = registry.track(42u32);
    assert_eq!(section.cmp_creation(&note), Ordering::Less);
    assert_eq!(note.cmp_creation(&section), Ordering::Greater);
    assert_eq!(section.title, "intro");
  }

  #[test]
  fn separate_registries_are_independent() {
    let first = SequenceRegistry::new();
    let second = SequenceRegistry::new();
    first.next_key();
    assert_eq!(second.next_key().get(), 1);
  }

  quickcheck::quickcheck! {
    fn stable_sort_restores_creation_order(perm: Vec<usize>) -> bool {
      let registry = SequenceRegistry::new();
      let items: Vec<_> = (0..perm.len()).map(|i| registry.track(i)).collect();
      let mut shuffled: Vec<_> = perm
        .iter()
        .map(|&p| items[p % items.len()].clone())
        .collect();
      shuffled.sort();
      shuffled.windows(2).all(|pair| pair[0] <= pair[1])
    }
  }
}
