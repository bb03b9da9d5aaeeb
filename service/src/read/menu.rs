//! [`MenuItem`] read model definition.

#[cfg(doc)]
use crate::domain::MenuItem;

/// Wrapper around a [`MenuItem`] indicating that it's active, so can be
/// ordered.
#[derive(Clone, Copy, Debug)]
pub struct Active<T>(pub T);
