//! [`Query`] collection related to [`Message`]s.

use common::operations::By;

use crate::domain::order::{self, Message};
#[cfg(doc)]
use crate::{domain::Order, Query};

use super::DatabaseQuery;

/// Queries all [`Message`]s of an [`Order`], oldest first.
pub type ByOrder = DatabaseQuery<By<Vec<Message>, order::Id>>;
