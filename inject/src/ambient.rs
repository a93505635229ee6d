//! An opt-in, process-wide default container.
//!
//! Nothing in the crate consults it on its own: code that wants an ambient
//! container installs one (or lets [`get_or_init`] create it) and reads it
//! back with [`get`]. Once installed it lives until the process exits.

use crate::container::Container;
use once_cell::sync::OnceCell;

static AMBIENT: OnceCell<Container> = OnceCell::new();

/// Installs `container` as the ambient container.
///
/// Returns the installed container, or gives `container` back if one was
/// installed already.
///
/// ```
/// use fibre_inject::{ambient, ContainerBuilder};
///
/// let installed = ambient::install(ContainerBuilder::new().name("app").build()).unwrap();
/// assert_eq!(installed.name(), "app");
/// assert!(ambient::install(ContainerBuilder::new().build()).is_err());
/// ```
pub fn install(container: Container) -> Result<&'static Container, Container> {
  AMBIENT
    .try_insert(container)
    .map_err(|(_, rejected)| rejected)
}

/// The ambient container, if one has been installed.
pub fn get() -> Option<&'static Container> {
  AMBIENT.get()
}

/// The ambient container, creating it with `init` on first use.
pub fn get_or_init(init: impl FnOnce() -> Container) -> &'static Container {
  AMBIENT.get_or_init(init)
}
