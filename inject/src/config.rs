use crate::container::Container;
use crate::policy::DuplicatePolicy;

/// A builder for configuring a [`Container`].
///
/// ```
/// use fibre_inject::{ContainerBuilder, DuplicatePolicy};
///
/// let container = ContainerBuilder::new()
///   .name("app")
///   .default_policy(DuplicatePolicy::Once)
///   .build();
///
/// assert_eq!(container.name(), "app");
/// assert_eq!(container.default_policy(), DuplicatePolicy::Once);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContainerBuilder {
  pub(crate) name: Option<String>,
  pub(crate) default_policy: DuplicatePolicy,
  pub(crate) expected_types: usize,
}

impl ContainerBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the label used for this container in log events.
  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Sets the policy applied by the `register_*` calls that do not take one.
  pub fn default_policy(mut self, policy: DuplicatePolicy) -> Self {
    self.default_policy = policy;
    self
  }

  /// Pre-sizes the registry for roughly this many registrations.
  pub fn expected_types(mut self, count: usize) -> Self {
    self.expected_types = count;
    self
  }

  pub fn build(self) -> Container {
    Container::from_builder(self)
  }
}
