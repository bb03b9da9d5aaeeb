//! [`Order`] definitions.

pub mod message;
pub mod rating;

use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use common::DateTime;
use crate::domain::{menu, Contact};
#[cfg(doc)]
use crate::domain::{AvailabilityEntry, MenuItem};

pub use self::{message::Message, rating::Rating};

/// Catering order placed by a customer.
#[derive(Clone, Debug)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// Current [`Status`] of this [`Order`].
    pub status: Status,

    /// Reason why this [`Order`] was rejected.
    ///
    /// Present if and only if the [`Status`] is [`Status::Rejected`].
    pub status_reason: Option<RejectionReason>,

    /// Kind of the catered event.
    pub event: EventType,

    /// [`DateTime`] the catered event is scheduled at.
    ///
    /// Its calendar day must have been an available [`AvailabilityEntry`]
    /// when this [`Order`] was created.
    pub scheduled_at: ScheduleDateTime,

    /// Delivery [`Address`] of this [`Order`].
    pub address: Address,

    /// Number of people attending the catered event.
    pub people_count: PeopleCount,

    /// [`Community`] tag of this [`Order`].
    pub community: Community,

    /// [`Parish`] tag of this [`Order`].
    pub parish: Parish,

    /// [`Contact`] info of the ordering customer.
    pub contact: Contact,

    /// [`Line`]s of this [`Order`].
    ///
    /// Never empty.
    pub lines: Vec<Line>,

    /// [`DateTime`] when this [`Order`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Order`] was last updated.
    pub updated_at: UpdateDateTime,
}

impl Order {
    /// Returns the subtotal of this [`Order`].
    ///
    /// Always equals the sum of its [`Line`] totals, derived from the unit
    /// prices snapshotted at creation time.
    #[expect(clippy::missing_panics_doc, reason = "bounded by creation")]
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .map(Line::total)
            .reduce(|acc, t| {
                acc.checked_add(t).expect("bounded at `Order` creation")
            })
            .expect("`Order` lines are never empty")
    }
}

/// ID of an [`Order`].
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
    #[doc = "Status of an [`Order`]."]
    enum Status {
        #[doc = "The [`Order`] awaits a staff decision."]
        Pending = 1,

        #[doc = "The [`Order`] was accepted by staff."]
        Accepted = 2,

        #[doc = "The [`Order`] was rejected by staff. Terminal."]
        Rejected = 3,

        #[doc = "The [`Order`] is on its way to the customer."]
        InDelivery = 4,

        #[doc = "The [`Order`] was delivered. Terminal."]
        Delivered = 5,
    }
}

impl Status {
    /// Indicates whether this [`Status`] is terminal.
    ///
    /// No transition is defined out of a terminal [`Status`].
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Delivered)
    }
}

define_kind! {
    #[doc = "Kind of the event an [`Order`] caters."]
    enum EventType {
        #[doc = "Parish agape feast."]
        Agape = 1,

        #[doc = "Private celebration."]
        Celebration = 2,
    }
}

/// Reason why an [`Order`] was rejected.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct RejectionReason(String);

impl RejectionReason {
    /// Creates a new [`RejectionReason`] without validating it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `reason` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// Creates a new [`RejectionReason`] if the given `reason` is valid.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Option<Self> {
        let reason = reason.into();
        Self::check(&reason).then_some(Self(reason))
    }

    /// Checks whether the given `reason` is a valid [`RejectionReason`].
    fn check(reason: impl AsRef<str>) -> bool {
        let reason = reason.as_ref();
        reason.trim() == reason && !reason.is_empty() && reason.len() <= 512
    }
}

impl FromStr for RejectionReason {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `RejectionReason`")
    }
}

/// Delivery address of an [`Order`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] without validating it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Address`].
    fn check(address: impl AsRef<str>) -> bool {
        let address = address.as_ref();
        address.trim() == address
            && address.len() >= 5
            && address.len() <= 512
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// Number of people attending the event of an [`Order`].
///
/// Always positive; the configured ordering bounds are enforced at [`Order`]
/// creation, not here.
#[derive(
    Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd,
)]
pub struct PeopleCount(i32);

impl PeopleCount {
    /// Creates a new [`PeopleCount`] if the given `count` is valid.
    #[must_use]
    pub fn new(count: i32) -> Option<Self> {
        (count > 0).then_some(Self(count))
    }
}

impl TryFrom<i32> for PeopleCount {
    type Error = &'static str;

    fn try_from(count: i32) -> Result<Self, Self::Error> {
        Self::new(count).ok_or("invalid `PeopleCount`")
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for PeopleCount {
    postgres_types::accepts!(INT4);

    fn from_sql(
        ty: &postgres_types::Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        i32::from_sql(ty, raw)?.try_into().map_err(Box::from)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for PeopleCount {
    postgres_types::accepts!(INT4);
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

/// Community tag of an [`Order`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Community(String);

impl Community {
    /// Creates a new [`Community`] without validating it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `community` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(community: impl Into<String>) -> Self {
        Self(community.into())
    }

    /// Creates a new [`Community`] if the given `community` is valid.
    #[must_use]
    pub fn new(community: impl Into<String>) -> Option<Self> {
        let community = community.into();
        Self::check(&community).then_some(Self(community))
    }

    /// Checks whether the given `community` is a valid [`Community`].
    fn check(community: impl AsRef<str>) -> bool {
        let community = community.as_ref();
        community.trim() == community
            && community.len() >= 2
            && community.len() <= 512
    }
}

impl FromStr for Community {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Community`")
    }
}

/// Parish tag of an [`Order`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Parish(String);

impl Parish {
    /// Creates a new [`Parish`] without validating it.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `parish` is not empty.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(parish: impl Into<String>) -> Self {
        Self(parish.into())
    }

    /// Creates a new [`Parish`] if the given `parish` is valid.
    #[must_use]
    pub fn new(parish: impl Into<String>) -> Option<Self> {
        let parish = parish.into();
        Self::check(&parish).then_some(Self(parish))
    }

    /// Checks whether the given `parish` is a valid [`Parish`].
    fn check(parish: impl AsRef<str>) -> bool {
        let parish = parish.as_ref();
        parish.trim() == parish && parish.len() >= 2 && parish.len() <= 512
    }
}

impl FromStr for Parish {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Parish`")
    }
}

/// Single line of an [`Order`].
///
/// Owned exclusively by its [`Order`] and never shared between orders.
#[derive(Clone, Copy, Debug)]
pub struct Line {
    /// ID of the ordered [`MenuItem`].
    pub menu_item_id: menu::Id,

    /// Ordered [`Quantity`] of the [`MenuItem`].
    pub quantity: Quantity,

    /// Unit price of the [`MenuItem`], snapshotted at [`Order`] creation.
    ///
    /// Never re-read from the catalog afterwards.
    pub unit_price: Money,
}

impl Line {
    /// Returns the total price of this [`Line`].
    #[expect(clippy::missing_panics_doc, reason = "bounded by creation")]
    #[must_use]
    pub fn total(&self) -> Money {
        self.unit_price
            .checked_mul(i64::from(i32::from(self.quantity)))
            .expect("bounded at `Order` creation")
    }
}

/// Quantity of a [`MenuItem`] in an [`Order`] [`Line`].
#[derive(
    Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Quantity(i32);

impl Quantity {
    /// Maximum [`Quantity`] of a single [`Line`].
    pub const MAX: Self = Self(10_000);

    /// Creates a new [`Quantity`] if the given `quantity` is valid.
    #[must_use]
    pub fn new(quantity: i32) -> Option<Self> {
        (quantity > 0 && quantity <= Self::MAX.0).then_some(Self(quantity))
    }
}

impl TryFrom<i32> for Quantity {
    type Error = &'static str;

    fn try_from(quantity: i32) -> Result<Self, Self::Error> {
        Self::new(quantity).ok_or("invalid `Quantity`")
    }
}

#[cfg(feature = "postgres")]
impl FromSql<'_> for Quantity {
    postgres_types::accepts!(INT4);

    fn from_sql(
        ty: &postgres_types::Type,
        raw: &[u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        i32::from_sql(ty, raw)?.try_into().map_err(Box::from)
    }
}

#[cfg(feature = "postgres")]
impl ToSql for Quantity {
    postgres_types::accepts!(INT4);
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

/// [`DateTime`] an [`Order`]'s event is scheduled at.
#[derive(Clone, Copy, Debug)]
pub struct Schedule;

/// [`DateTime`] when an [`Order`]'s event is scheduled.
pub type ScheduleDateTime = DateTimeOf<(Order, Schedule)>;

/// [`DateTime`] when an [`Order`] was created.
pub type CreationDateTime = DateTimeOf<(Order, unit::Creation)>;

/// [`DateTime`] when an [`Order`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Order, unit::Update)>;

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};

    use super::{menu, Line, Quantity, Status};

    #[test]
    fn terminal_statuses() {
        assert!(Status::Rejected.is_terminal());
        assert!(Status::Delivered.is_terminal());

        assert!(!Status::Pending.is_terminal());
        assert!(!Status::Accepted.is_terminal());
        assert!(!Status::InDelivery.is_terminal());
    }

    #[test]
    fn line_total() {
        let line = Line {
            menu_item_id: menu::Id::new(),
            quantity: Quantity::new(3).unwrap(),
            unit_price: Money::from_minor(1850, Currency::Pln),
        };

        assert_eq!(line.total(), Money::from_minor(5550, Currency::Pln));
    }

    #[test]
    fn quantity_bounds() {
        assert!(Quantity::new(0).is_none());
        assert!(Quantity::new(-1).is_none());
        assert!(Quantity::new(1).is_some());
        assert!(Quantity::new(10_000).is_some());
        assert!(Quantity::new(10_001).is_none());
    }
}
