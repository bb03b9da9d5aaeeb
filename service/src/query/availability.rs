//! [`Query`] collection related to the availability calendar.

use common::{operations::By, Date};

use crate::domain::AvailabilityEntry;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`AvailabilityEntry`] by its [`Date`].
pub type ByDate = DatabaseQuery<By<Option<AvailabilityEntry>, Date>>;

/// Queries all [`AvailabilityEntry`]s from the provided [`Date`] onwards.
pub type From = DatabaseQuery<By<Vec<AvailabilityEntry>, Date>>;
