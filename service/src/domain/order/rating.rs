//! [`Rating`] definitions.

use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use common::DateTime;
use crate::domain::order;
#[cfg(doc)]
use crate::domain::Order;

/// Customer rating of a delivered [`Order`].
///
/// At most one [`Rating`] exists per [`Order`]. Re-rating replaces the
/// [`Stars`] and [`Comment`] while keeping any staff [`Reply`] in place.
#[derive(Clone, Debug)]
pub struct Rating {
    /// ID of this [`Rating`].
    pub id: Id,

    /// ID of the [`Order`] this [`Rating`] belongs to.
    pub order_id: order::Id,

    /// [`Stars`] value of this [`Rating`].
    pub stars: Stars,

    /// Optional customer [`Comment`] of this [`Rating`].
    pub comment: Option<Comment>,

    /// Optional staff [`Reply`] to this [`Rating`].
    pub reply: Option<Reply>,

    /// [`DateTime`] when this [`Rating`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Rating`] was last updated.
    pub updated_at: UpdateDateTime,
}

/// ID of a [`Rating`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Star value of a [`Rating`], from 1 to 5.
#[derive(
    Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Stars(i16);

impl Stars {
    /// Minimum [`Stars`] value.
    pub const MIN: Self = Self(1);

    /// Maximum [`Stars`] value.
    pub const MAX: Self = Self(5);

    /// Creates a new [`Stars`] if the given `stars` value is valid.
    #[must_use]
    pub fn new(stars: i16) -> Option<Self> {
        (stars >= Self::MIN.0 && stars <= Self::MAX.0).then_some(Self(stars))
    }
}

impl TryFrom<i16> for Stars {
    type Error = &'static str;

    fn try_from(stars: i16) -> Result<Self, Self::Error> {
        Self::new(stars).ok_or("invalid `Stars`")
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Stars {
    postgres_types::accepts!(INT2);

    fn from_sql(
        ty: &postgres_types::Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        i16::from_sql(ty, raw)?.try_into().map_err(Box::from)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Stars {
    postgres_types::accepts!(INT2);
    postgres_types::to_sql_checked!();

    fn to_sql(
        &self,
        ty: &postgres_types::Type,
        w: &mut postgres_types::private::BytesMut,
    ) -> Result<
        postgres_types::IsNull,
        Box<dyn std::error::Error + Sync + Send>,
    > {
        self.0.to_sql(ty, w)
    }
}

/// Customer comment of a [`Rating`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Comment(String);

impl Comment {
    /// Creates a new [`Comment`] without validating it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `comment` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(comment: impl Into<String>) -> Self {
        Self(comment.into())
    }

    /// Creates a new [`Comment`] if the given `comment` is valid.
    #[must_use]
    pub fn new(comment: impl Into<String>) -> Option<Self> {
        let comment = comment.into();
        Self::check(&comment).then_some(Self(comment))
    }

    /// Checks whether the given `comment` is a valid [`Comment`].
    fn check(comment: impl AsRef<str>) -> bool {
        let comment = comment.as_ref();
        comment.trim() == comment
            && !comment.is_empty()
            && comment.len() <= 1024
    }
}

impl FromStr for Comment {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Comment`")
    }
}

/// Staff reply to a [`Rating`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Reply(String);

impl Reply {
    /// Creates a new [`Reply`] without validating it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `reply` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(reply: impl Into<String>) -> Self {
        Self(reply.into())
    }

    /// Creates a new [`Reply`] if the given `reply` is valid.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Option<Self> {
        let reply = reply.into();
        Self::check(&reply).then_some(Self(reply))
    }

    /// Checks whether the given `reply` is a valid [`Reply`].
    fn check(reply: impl AsRef<str>) -> bool {
        let reply = reply.as_ref();
        reply.trim() == reply && !reply.is_empty() && reply.len() <= 1024
    }
}

impl FromStr for Reply {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Reply`")
    }
}

/// [`DateTime`] when a [`Rating`] was created.
pub type CreationDateTime = DateTimeOf<(Rating, unit::Creation)>;

/// [`DateTime`] when a [`Rating`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Rating, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::Stars;

    #[test]
    fn stars_bounds() {
        assert!(Stars::new(0).is_none());
        assert!(Stars::new(6).is_none());
        assert!(Stars::new(-1).is_none());

        for value in 1..=5 {
            assert!(Stars::new(value).is_some());
        }
    }
}
