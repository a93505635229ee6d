//! The type-keyed registry of builder entries.

use crate::builder::Builder;
use crate::core::TypeKey;
use crate::error::{Error, Result};
use crate::instance::SharedInstance;
use crate::lifetime::Lifetime;
use crate::policy::{Decision, DuplicatePolicy, Registration};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// One registration: how to build a type and how long its instances live.
///
/// Singleton entries own their cache slot. The slot is filled at most once
/// and never cleared; replacing the entry under `Override` installs a new
/// entry with a fresh slot and leaves instances already handed out alone.
pub(crate) struct BuilderEntry {
  pub(crate) key: TypeKey,
  pub(crate) lifetime: Lifetime,
  pub(crate) builder: Box<dyn Builder>,
  pub(crate) slot: OnceCell<SharedInstance>,
}

impl BuilderEntry {
  pub(crate) fn new(lifetime: Lifetime, builder: Box<dyn Builder>) -> Self {
    Self {
      key: builder.key(),
      lifetime,
      builder,
      slot: OnceCell::new(),
    }
  }

  /// A singleton entry whose slot is already filled.
  pub(crate) fn prebuilt(builder: Box<dyn Builder>, instance: SharedInstance) -> Self {
    Self {
      key: builder.key(),
      lifetime: Lifetime::Singleton,
      builder,
      slot: OnceCell::with_value(instance),
    }
  }
}

#[derive(Default)]
pub(crate) struct Registry {
  entries: DashMap<TypeKey, Arc<BuilderEntry>>,
}

impl Registry {
  pub(crate) fn with_capacity(capacity: usize) -> Self {
    Self {
      entries: DashMap::with_capacity(capacity),
    }
  }

  /// Installs `entry` under its key, as `policy` dictates for a taken key.
  ///
  /// The occupancy check and the write happen under the same shard lock.
  /// Replaced or discarded entries are dropped only after that lock is
  /// released, since dropping them may run user `Drop` code that calls back
  /// into the container.
  pub(crate) fn register(
    &self,
    entry: BuilderEntry,
    policy: DuplicatePolicy,
  ) -> Result<Registration> {
    let key = entry.key;
    let entry = Arc::new(entry);
    let (outcome, displaced) = {
      let slot = self.entries.entry(key);
      let decision = policy.decide(matches!(slot, Entry::Occupied(_)));
      match (slot, decision) {
        (Entry::Vacant(vacant), _) => {
          vacant.insert(entry);
          (Ok(Registration::Installed), None)
        }
        (Entry::Occupied(mut occupied), Decision::Replace) => {
          let old = occupied.insert(entry);
          (Ok(Registration::Replaced), Some(old))
        }
        (Entry::Occupied(_), Decision::Keep) => (Ok(Registration::Ignored), Some(entry)),
        (Entry::Occupied(_), _) => (
          Err(Error::DuplicateType {
            type_name: key.type_name(),
          }),
          Some(entry),
        ),
      }
    };
    drop(displaced);
    outcome
  }

  /// Returns the entry for `key`. The map guard is released before
  /// returning, so callers may build without holding a shard lock.
  pub(crate) fn lookup(&self, key: &TypeKey) -> Result<Arc<BuilderEntry>> {
    self
      .entries
      .get(key)
      .map(|entry| Arc::clone(entry.value()))
      .ok_or(Error::NotFound {
        type_name: key.type_name(),
      })
  }

  pub(crate) fn contains(&self, key: &TypeKey) -> bool {
    self.entries.contains_key(key)
  }

  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }
}
