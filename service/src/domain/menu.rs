//! [`MenuItem`] definitions.

use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use common::DateTime;
#[cfg(doc)]
use crate::domain::Order;

/// Purchasable item of the menu catalog.
///
/// Catalog rows are curated by staff out-of-band; an [`Order`] snapshots the
/// unit price at creation time and never re-reads it from here.
#[derive(Clone, Debug)]
pub struct MenuItem {
    /// ID of this [`MenuItem`].
    pub id: Id,

    /// [`Name`] of this [`MenuItem`].
    pub name: Name,

    /// [`Description`] of this [`MenuItem`].
    pub description: Description,

    /// Price of a single unit of this [`MenuItem`].
    pub price: Money,

    /// [`Category`] this [`MenuItem`] belongs to.
    pub category: Category,

    /// Indicator whether this [`MenuItem`] can be ordered.
    pub is_active: bool,

    /// [`DateTime`] when this [`MenuItem`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`MenuItem`].
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

/// Name of a [`MenuItem`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] without validating it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Description of a [`MenuItem`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`] without validating it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `description` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    /// Creates a new [`Description`] if the given `description` is valid.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Option<Self> {
        let description = description.into();
        Self::check(&description).then_some(Self(description))
    }

    /// Checks whether the given `description` is a valid [`Description`].
    fn check(description: impl AsRef<str>) -> bool {
        let description = description.as_ref();
        description.trim() == description
            && !description.is_empty()
            && description.len() <= 1024
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

define_kind! {
    #[doc = "Category of a [`MenuItem`]."]
    enum Category {
        #[doc = "Main course."]
        MainCourse = 1,

        #[doc = "Starter or soup."]
        Starter = 2,

        #[doc = "Dessert."]
        Dessert = 3,

        #[doc = "Beverage."]
        Beverage = 4,
    }
}

/// [`DateTime`] when a [`MenuItem`] was created.
pub type CreationDateTime = DateTimeOf<(MenuItem, unit::Creation)>;
