//! What happens when a registration targets a key that is already taken.

use std::fmt;

/// Behavior of a register call whose key already has an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DuplicatePolicy {
  /// Replace the existing entry and its lifetime.
  #[default]
  Override,
  /// Fail with [`Error::DuplicateType`](crate::Error::DuplicateType) and keep
  /// the existing entry.
  Once,
  /// Silently keep the existing entry and discard the new one.
  Ignore,
}

/// The result of a successful register call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
  /// The key was free.
  Installed,
  /// The key was taken and its entry was replaced.
  Replaced,
  /// The key was taken and the new entry was dropped.
  Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
  Install,
  Replace,
  Reject,
  Keep,
}

impl DuplicatePolicy {
  pub(crate) fn decide(self, occupied: bool) -> Decision {
    match (occupied, self) {
      (false, _) => Decision::Install,
      (true, DuplicatePolicy::Override) => Decision::Replace,
      (true, DuplicatePolicy::Once) => Decision::Reject,
      (true, DuplicatePolicy::Ignore) => Decision::Keep,
    }
  }
}

impl fmt::Display for DuplicatePolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DuplicatePolicy::Override => f.write_str("override"),
      DuplicatePolicy::Once => f.write_str("once"),
      DuplicatePolicy::Ignore => f.write_str("ignore"),
    }
  }
}
