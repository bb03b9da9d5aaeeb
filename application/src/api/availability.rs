//! [`AvailabilityEntry`]-related definitions.

use common::Date;
use derive_more::{AsRef, Display, From, Into};
use juniper::{GraphQLObject, GraphQLScalar};
use service::domain;

use crate::{api::scalar, Context};

/// Per-day availability of the catering service.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(context = Context)]
pub struct AvailabilityEntry {
    /// Calendar day this entry describes.
    pub date: Date,

    /// Indicator whether new orders may be scheduled on this day.
    pub is_available: bool,

    /// Optional staff note attached to this day.
    pub note: Option<Note>,
}

impl From<domain::AvailabilityEntry> for AvailabilityEntry {
    fn from(entry: domain::AvailabilityEntry) -> Self {
        Self {
            date: entry.date,
            is_available: entry.is_available,
            note: entry.note.map(Into::into),
        }
    }
}

/// Staff note attached to an `AvailabilityEntry`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "AvailabilityNote",
    with = scalar::Via::<domain::calendar::Note>,
)]
pub struct Note(domain::calendar::Note);
