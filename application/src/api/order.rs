//! [`Order`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A catering order placed by a customer.
#[derive(Debug, From)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// [`domain::Order`] representing this [`Order`].
    order: OnceCell<domain::Order>,
}

impl From<domain::Order> for Order {
    fn from(order: domain::Order) -> Self {
        Self {
            id: order.id.into(),
            order: OnceCell::new_with(Some(order)),
        }
    }
}

impl Order {
    /// Creates a new [`Order`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Order`] with the provided ID exists,
    /// otherwise accessing this [`Order`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            order: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Order`] representing this [`Order`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::Order`] doesn't exist.
    async fn order(&self, ctx: &Context) -> Result<&domain::Order, Error> {
        let id = self.id.into();
        self.order
            .get_or_try_init(|| async {
                ctx.service()
                    .execute(query::order::ById::by(id))
                    .await
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())?
                    .ok_or_else(|| api::query::OrderError::NotExists.into())
            })
            .await
    }
}

/// A catering order placed by a customer.
#[graphql_object(context = Context)]
impl Order {
    /// Unique identifier of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Current status of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status(&self, ctx: &Context) -> Result<Status, Error> {
        Ok(self.order(ctx).await?.status.into())
    }

    /// Reason why this `Order` was rejected, if it was.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.statusReason",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn status_reason(
        &self,
        ctx: &Context,
    ) -> Result<Option<RejectionReason>, Error> {
        Ok(self.order(ctx).await?.status_reason.clone().map(Into::into))
    }

    /// Kind of the catered event.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.event",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn event(&self, ctx: &Context) -> Result<EventType, Error> {
        Ok(self.order(ctx).await?.event.into())
    }

    /// `DateTime` the catered event is scheduled at.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.scheduledAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn scheduled_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.order(ctx).await?.scheduled_at.coerce())
    }

    /// Delivery address of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.address",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn address(&self, ctx: &Context) -> Result<Address, Error> {
        Ok(self.order(ctx).await?.address.clone().into())
    }

    /// Number of people attending the catered event.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.peopleCount",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn people_count(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(self.order(ctx).await?.people_count.into())
    }

    /// Community tag of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.community",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn community(&self, ctx: &Context) -> Result<Community, Error> {
        Ok(self.order(ctx).await?.community.clone().into())
    }

    /// Parish tag of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.parish",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn parish(&self, ctx: &Context) -> Result<Parish, Error> {
        Ok(self.order(ctx).await?.parish.clone().into())
    }

    /// Full name of the ordering customer.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.customerName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn customer_name(
        &self,
        ctx: &Context,
    ) -> Result<CustomerName, Error> {
        Ok(self.order(ctx).await?.contact.name.clone().into())
    }

    /// Email address of the ordering customer.
    ///
    /// [`None`] is returned unless an authenticated staff session is present.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.customerEmail",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn customer_email(
        &self,
        ctx: &Context,
    ) -> Result<Option<CustomerEmail>, Error> {
        Ok(if ctx.try_current_session().await?.is_some() {
            Some(self.order(ctx).await?.contact.email.clone().into())
        } else {
            None
        })
    }

    /// Phone number of the ordering customer.
    ///
    /// [`None`] is returned unless an authenticated staff session is present.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.customerPhone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn customer_phone(
        &self,
        ctx: &Context,
    ) -> Result<Option<CustomerPhone>, Error> {
        Ok(if ctx.try_current_session().await?.is_some() {
            Some(self.order(ctx).await?.contact.phone.clone().into())
        } else {
            None
        })
    }

    /// Lines of this `Order`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.lines",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn lines(&self, ctx: &Context) -> Result<Vec<Line>, Error> {
        Ok(self
            .order(ctx)
            .await?
            .lines
            .iter()
            .copied()
            .map(Into::into)
            .collect())
    }

    /// Subtotal of this `Order`, frozen at its creation time.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.subtotal",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn subtotal(&self, ctx: &Context) -> Result<Money, Error> {
        Ok(self.order(ctx).await?.subtotal())
    }

    /// Chat messages of this `Order`, oldest first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.messages",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn messages(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::message::Message>, Error> {
        ctx.service()
            .execute(query::message::ByOrder::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|messages| messages.into_iter().map(Into::into).collect())
    }

    /// Rating of this `Order`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.rating",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn rating(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Rating>, Error> {
        ctx.service()
            .execute(query::rating::ByOrder::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|rating| rating.map(Into::into))
    }

    /// `DateTime` when this `Order` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.order(ctx).await?.created_at.coerce())
    }

    /// `DateTime` when this `Order` was last updated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Order.updatedAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn updated_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.order(ctx).await?.updated_at.coerce())
    }
}

/// Single line of an `Order`.
#[derive(Clone, Copy, Debug, From)]
pub struct Line(domain::order::Line);

/// Single line of an `Order`.
#[graphql_object(context = Context)]
impl Line {
    /// `MenuItem` this `OrderLine` refers to.
    pub async fn menu_item(
        &self,
        ctx: &Context,
    ) -> Result<api::MenuItem, Error> {
        ctx.service()
            .execute(query::menu::ById::by(self.0.menu_item_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::query::MenuItemError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Ordered quantity of the `MenuItem`.
    #[must_use]
    pub fn quantity(&self) -> i32 {
        self.0.quantity.into()
    }

    /// Unit price of the `MenuItem`, snapshotted at the `Order` creation.
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.0.unit_price
    }

    /// Total price of this `OrderLine`.
    #[must_use]
    pub fn total(&self) -> Money {
        self.0.total()
    }
}

/// Unique identifier of an `Order`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::order::Id)]
#[into(domain::order::Id)]
#[graphql(name = "OrderId", transparent)]
pub struct Id(Uuid);

/// Status of an `Order`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "OrderStatus")]
pub enum Status {
    /// The `Order` awaits a staff decision.
    Pending,

    /// The `Order` was accepted by staff.
    Accepted,

    /// The `Order` was rejected by staff. Terminal.
    Rejected,

    /// The `Order` is on its way to the customer.
    InDelivery,

    /// The `Order` was delivered. Terminal.
    Delivered,
}

impl From<domain::order::Status> for Status {
    fn from(status: domain::order::Status) -> Self {
        use domain::order::Status as S;

        match status {
            S::Pending => Self::Pending,
            S::Accepted => Self::Accepted,
            S::Rejected => Self::Rejected,
            S::InDelivery => Self::InDelivery,
            S::Delivered => Self::Delivered,
        }
    }
}

impl From<Status> for domain::order::Status {
    fn from(status: Status) -> Self {
        use Status as S;

        match status {
            S::Pending => Self::Pending,
            S::Accepted => Self::Accepted,
            S::Rejected => Self::Rejected,
            S::InDelivery => Self::InDelivery,
            S::Delivered => Self::Delivered,
        }
    }
}

/// Kind of the event an `Order` caters.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "EventType")]
pub enum EventType {
    /// Parish agape feast.
    Agape,

    /// Private celebration.
    Celebration,
}

impl From<domain::order::EventType> for EventType {
    fn from(event: domain::order::EventType) -> Self {
        use domain::order::EventType as E;

        match event {
            E::Agape => Self::Agape,
            E::Celebration => Self::Celebration,
        }
    }
}

impl From<EventType> for domain::order::EventType {
    fn from(event: EventType) -> Self {
        use EventType as E;

        match event {
            E::Agape => Self::Agape,
            E::Celebration => Self::Celebration,
        }
    }
}

/// Delivery address of an `Order`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OrderAddress",
    with = scalar::Via::<domain::order::Address>,
)]
pub struct Address(domain::order::Address);

/// Community tag of an `Order`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OrderCommunity",
    with = scalar::Via::<domain::order::Community>,
)]
pub struct Community(domain::order::Community);

/// Parish tag of an `Order`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OrderParish",
    with = scalar::Via::<domain::order::Parish>,
)]
pub struct Parish(domain::order::Parish);

/// Reason why an `Order` was rejected.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "OrderRejectionReason",
    with = scalar::Via::<domain::order::RejectionReason>,
)]
pub struct RejectionReason(domain::order::RejectionReason);

/// Full name of the customer who placed an `Order`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CustomerName",
    with = scalar::Via::<domain::contact::Name>,
)]
pub struct CustomerName(domain::contact::Name);

/// Email address of the customer who placed an `Order`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CustomerEmail",
    with = scalar::Via::<domain::contact::Email>,
)]
pub struct CustomerEmail(domain::contact::Email);

/// Phone number of the customer who placed an `Order`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CustomerPhone",
    with = scalar::Via::<domain::contact::Phone>,
)]
pub struct CustomerPhone(domain::contact::Phone);

/// Requested `MenuItem` with its quantity.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
#[graphql(name = "OrderItemInput")]
pub struct ItemInput {
    /// ID of the requested `MenuItem`.
    pub menu_item_id: api::menu::Id,

    /// Requested quantity, at least 1.
    pub quantity: i32,
}

pub mod list {
    //! Definitions related to [`Order`] list.

    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::read;

    use crate::{api::scalar, Context};

    use super::{Id, Order};

    /// Cursor for the `Order` list.
    #[derive(AsRef, Clone, Copy, Debug, From, GraphQLScalar, Into)]
    #[from(Id, read::order::list::Cursor)]
    #[graphql(
        name = "OrderListCursor",
        with = scalar::Via::<read::order::list::Cursor>,
    )]
    pub struct Cursor(pub read::order::list::Cursor);

    /// Edge in the [`Order`] list.
    #[derive(Clone, Copy, Debug, From, Into)]
    pub struct Edge(read::order::list::Edge);

    /// Edge in the `Order` list.
    #[graphql_object(name = "OrderListEdge", context = Context)]
    impl Edge {
        /// Cursor of this `OrderListEdge`.
        #[must_use]
        pub fn cursor(&self) -> Cursor {
            self.0.cursor.into()
        }

        /// Node of this `OrderListEdge`.
        #[must_use]
        pub fn node(&self) -> Order {
            #[expect(
                unsafe_code,
                reason = "`Edge` loaded from repository guarantees `Order` \
                          existence"
            )]
            unsafe {
                Order::new_unchecked(self.0.node)
            }
        }
    }

    /// Connection of the [`Order`] list.
    #[derive(Clone, Debug, From, Into)]
    pub struct Connection(read::order::list::Connection);

    /// Connection of the `Order` list.
    #[graphql_object(name = "OrderListConnection", context = Context)]
    impl Connection {
        /// Edges in this `OrderListConnection`.
        #[must_use]
        pub fn edges(&self) -> Vec<Edge> {
            self.0.edges.iter().copied().map(Into::into).collect()
        }

        /// Information about the page.
        #[must_use]
        pub fn page_info(&self) -> PageInfo {
            PageInfo {
                info: self.0.page_info(),
                start_cursor: self.0.edges.first().map(|e| e.cursor.into()),
                end_cursor: self.0.edges.last().map(|e| e.cursor.into()),
            }
        }
    }

    /// Information about a [`Connection`] page.
    #[derive(Clone, Copy, Debug)]
    pub struct PageInfo {
        /// Underlying [`read::order::list::PageInfo`].
        info: read::order::list::PageInfo,

        /// Start cursor of the page.
        start_cursor: Option<Cursor>,

        /// End cursor of the page.
        end_cursor: Option<Cursor>,
    }

    /// Information about an `OrderListConnection` page.
    #[graphql_object(name = "OrderListPageInfo", context = Context)]
    impl PageInfo {
        /// Indicator whether there is a next page.
        #[must_use]
        pub fn has_next_page(&self) -> bool {
            self.info.has_next_page
        }

        /// Indicator whether there is a previous page.
        #[must_use]
        pub fn has_previous_page(&self) -> bool {
            self.info.has_previous_page
        }

        /// Start cursor of the page.
        #[must_use]
        pub fn start_cursor(&self) -> &Option<Cursor> {
            &self.start_cursor
        }

        /// End cursor of the page.
        #[must_use]
        pub fn end_cursor(&self) -> &Option<Cursor> {
            &self.end_cursor
        }
    }
}
