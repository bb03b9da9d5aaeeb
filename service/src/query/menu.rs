//! [`Query`] collection related to the menu catalog.

use common::operations::By;

use crate::{
    domain::{menu, MenuItem},
    read::menu::Active,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`MenuItem`] by its [`menu::Id`].
pub type ById = DatabaseQuery<By<Option<MenuItem>, menu::Id>>;

/// Queries all [`Active`] [`MenuItem`]s of the catalog.
pub type ActiveItems = DatabaseQuery<By<Vec<Active<MenuItem>>, ()>>;
