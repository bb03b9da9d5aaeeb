//! [`Message`] definitions.

use common::{define_kind, unit, DateTimeOf};
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

/// Chat message attached to an [`Order`].
///
/// Append-only: messages are never edited or removed, and are ordered by
/// their creation time.
#[derive(Clone, Debug)]
pub struct Message {
    /// ID of this [`Message`].
    pub id: Id,

    /// ID of the [`Order`] this [`Message`] belongs to.
    pub order_id: order::Id,

    /// [`Sender`] role of this [`Message`].
    pub sender: Sender,

    /// [`Body`] of this [`Message`].
    pub body: Body,

    /// [`DateTime`] when this [`Message`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Message`].
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

define_kind! {
    #[doc = "Role of a [`Message`] sender."]
    enum Sender {
        #[doc = "The customer who placed the [`Order`]."]
        Customer = 1,

        #[doc = "Catering staff."]
        Staff = 2,
    }
}

/// Body text of a [`Message`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Body(String);

impl Body {
    /// Maximum length of a [`Body`], in bytes.
    pub const MAX_LEN: usize = 500;

    /// Creates a new [`Body`] without validating it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `body` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    /// Creates a new [`Body`] if the given `body` is valid.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Option<Self> {
        let body = body.into();
        Self::check(&body).then_some(Self(body))
    }

    /// Checks whether the given `body` is a valid [`Body`].
    fn check(body: impl AsRef<str>) -> bool {
        let body = body.as_ref();
        body.trim() == body && !body.is_empty() && body.len() <= Self::MAX_LEN
    }
}

impl FromStr for Body {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Body`")
    }
}

/// [`DateTime`] when a [`Message`] was created.
pub type CreationDateTime = DateTimeOf<(Message, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Body;

    #[test]
    fn body_bounds() {
        assert!(Body::new("").is_none());
        assert!(Body::new(" leading space").is_none());
        assert!(Body::new("a".repeat(501)).is_none());

        assert!(Body::new("a").is_some());
        assert!(Body::new("a".repeat(500)).is_some());
        assert!(Body::new("Dzien dobry, czy mozna zmienic godzine?").is_some());
    }
}
