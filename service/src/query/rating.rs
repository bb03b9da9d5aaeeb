//! [`Query`] collection related to [`Rating`]s.

use common::operations::By;

use crate::domain::order::{self, Rating};
#[cfg(doc)]
use crate::{domain::Order, Query};

use super::DatabaseQuery;

/// Queries the [`Rating`] of an [`Order`], if any.
pub type ByOrder = DatabaseQuery<By<Option<Rating>, order::Id>>;
