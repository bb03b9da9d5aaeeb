//! [`MenuItem`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, Context};

/// Purchasable item of the menu catalog.
#[derive(Clone, Debug, From)]
pub struct MenuItem(domain::MenuItem);

/// Purchasable item of the menu catalog.
#[graphql_object(context = Context)]
impl MenuItem {
    /// Unique identifier of this `MenuItem`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `MenuItem`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Description of this `MenuItem`.
    #[must_use]
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// Price of a single unit of this `MenuItem`.
    #[must_use]
    pub fn price(&self) -> Money {
        self.0.price
    }

    /// Category this `MenuItem` belongs to.
    #[must_use]
    pub fn category(&self) -> Category {
        self.0.category.into()
    }

    /// Indicator whether this `MenuItem` can be ordered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.is_active
    }

    /// `DateTime` when this `MenuItem` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `MenuItem`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::menu::Id)]
#[into(domain::menu::Id)]
#[graphql(name = "MenuItemId", transparent)]
pub struct Id(Uuid);

/// Name of a `MenuItem`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "MenuItemName",
    with = scalar::Via::<domain::menu::Name>,
)]
pub struct Name(domain::menu::Name);

/// Description of a `MenuItem`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "MenuItemDescription",
    with = scalar::Via::<domain::menu::Description>,
)]
pub struct Description(domain::menu::Description);

/// Category of a `MenuItem`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "MenuItemCategory")]
pub enum Category {
    /// Main course.
    MainCourse,

    /// Starter or soup.
    Starter,

    /// Dessert.
    Dessert,

    /// Beverage.
    Beverage,
}

impl From<domain::menu::Category> for Category {
    fn from(category: domain::menu::Category) -> Self {
        use domain::menu::Category as C;

        match category {
            C::MainCourse => Self::MainCourse,
            C::Starter => Self::Starter,
            C::Dessert => Self::Dessert,
            C::Beverage => Self::Beverage,
        }
    }
}
