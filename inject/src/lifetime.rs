use std::fmt;

/// How many instances of a registered type the container hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
  /// One instance, built on first shared resolution and cached until the
  /// container is dropped.
  Singleton,
  /// A new instance on every resolution.
  Transient,
}

impl fmt::Display for Lifetime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Lifetime::Singleton => f.write_str("singleton"),
      Lifetime::Transient => f.write_str("transient"),
    }
  }
}
