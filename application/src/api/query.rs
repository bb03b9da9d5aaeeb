//! GraphQL [`Query`]s definitions.

use common::{Date, DateTime};
use juniper::graphql_object;
use service::{query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns all orderable `MenuItem`s of the catalog.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "menu",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn menu(ctx: &Context) -> Result<Vec<api::MenuItem>, Error> {
        ctx.service()
            .execute(query::menu::ActiveItems::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|items| {
                items.into_iter().map(|active| active.0.into()).collect()
            })
    }

    /// Returns the availability calendar from the provided day onwards.
    ///
    /// Defaults to today when no `from` day is provided.
    #[tracing::instrument(
        skip_all,
        fields(
            from = ?from,
            gql.name = "availability",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn availability(
        from: Option<Date>,
        ctx: &Context,
    ) -> Result<Vec<api::availability::AvailabilityEntry>, Error> {
        let from = from.unwrap_or_else(|| DateTime::now().date());

        ctx.service()
            .execute(query::availability::From::by(from))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|entries| entries.into_iter().map(Into::into).collect())
    }

    /// Returns the `Order` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ORDER_NOT_EXISTS` - the `Order` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "order",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn order(
        id: api::order::Id,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
        ctx.service()
            .execute(query::order::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| OrderError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of `Order`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid staff
    ///                             session;
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "orders",
            last = ?last,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn orders(
        first: Option<i32>,
        after: Option<api::order::list::Cursor>,
        last: Option<i32>,
        before: Option<api::order::list::Cursor>,
        status: Option<api::order::Status>,
        ctx: &Context,
    ) -> Result<api::order::list::Connection, Error> {
        const DEFAULT_PAGE_SIZE: i32 = 10;

        ctx.current_session().await.map(drop)?;

        ctx.service()
            .execute(query::orders::List::by(read::order::list::Selector {
                arguments: read::order::list::Arguments::new(
                    first,
                    after.map(Into::into),
                    last,
                    before.map(Into::into),
                    DEFAULT_PAGE_SIZE,
                )
                .ok_or_else(|| api::PaginationError::Ambiguous.into())
                .map_err(ctx.error())?,
                filter: read::order::list::Filter {
                    status: status.map(Into::into),
                },
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Rating` of the `Order` with the specified ID, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "rating",
            order_id = %order_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn rating(
        order_id: api::order::Id,
        ctx: &Context,
    ) -> Result<Option<api::Rating>, Error> {
        ctx.service()
            .execute(query::rating::ByOrder::by(order_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|rating| rating.map(Into::into))
    }
}

define_error! {
    enum OrderError {
        #[code = "ORDER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Order` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum MenuItemError {
        #[code = "MENU_ITEM_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`MenuItem` with the specified ID does not exist"]
        NotExists,
    }
}
