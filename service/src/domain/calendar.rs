//! [`AvailabilityEntry`] definitions.

use std::str::FromStr;

use common::Date;
use derive_more::{AsRef, Display};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

#[cfg(doc)]
use crate::domain::Order;

/// Per-day availability of the catering service.
///
/// At most one entry exists per calendar [`Date`]. A day with no entry is not
/// orderable, same as a day whose entry is marked unavailable.
#[derive(Clone, Debug)]
pub struct AvailabilityEntry {
    /// Calendar day this entry describes.
    pub date: Date,

    /// Indicator whether new [`Order`]s may be scheduled on this day.
    pub is_available: bool,

    /// Optional staff [`Note`] attached to this day.
    pub note: Option<Note>,
}

/// Staff note attached to an [`AvailabilityEntry`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Note(String);

impl Note {
    /// Creates a new [`Note`] without validating it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `note` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(note: impl Into<String>) -> Self {
        Self(note.into())
    }

    /// Creates a new [`Note`] if the given `note` is valid.
    #[must_use]
    pub fn new(note: impl Into<String>) -> Option<Self> {
        let note = note.into();
        Self::check(&note).then_some(Self(note))
    }

    /// Checks whether the given `note` is a valid [`Note`].
    fn check(note: impl AsRef<str>) -> bool {
        let note = note.as_ref();
        note.trim() == note && !note.is_empty() && note.len() <= 512
    }
}

impl FromStr for Note {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Note`")
    }
}
