//! GraphQL [`Mutation`]s definitions.

use common::{Date, DateTime};
use juniper::graphql_object;
use service::{command, domain, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Places a new `Order`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TOO_FEW_PEOPLE` - the people count is below the configured minimum;
    /// - `TOO_MANY_PEOPLE` - the people count is above the configured maximum;
    /// - `DATE_UNAVAILABLE` - the scheduled day is not open for ordering;
    /// - `ITEMS_UNAVAILABLE` - some requested `MenuItem`s are inactive,
    ///                         unknown, or duplicated;
    /// - `NO_ITEMS` - the `Order` contains no `MenuItem`s.
    #[tracing::instrument(
        skip_all,
        fields(
            event = ?event,
            gql.name = "createOrder",
            otel.name = Self::SPAN_NAME,
            people_count = %people_count,
            scheduled_at = ?scheduled_at,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn create_order(
        event: api::order::EventType,
        scheduled_at: DateTime,
        address: api::order::Address,
        people_count: i32,
        community: api::order::Community,
        parish: api::order::Parish,
        customer_name: api::order::CustomerName,
        customer_email: api::order::CustomerEmail,
        customer_phone: api::order::CustomerPhone,
        items: Vec<api::order::ItemInput>,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
        let people_count = domain::order::PeopleCount::new(people_count)
            .ok_or_else(|| CreateOrderError::InvalidPeopleCount.into())
            .map_err(ctx.error())?;
        let items = items
            .into_iter()
            .map(|item| {
                domain::order::Quantity::new(item.quantity)
                    .map(|quantity| (item.menu_item_id.into(), quantity))
                    .ok_or_else(|| CreateOrderError::InvalidQuantity.into())
                    .map_err(ctx.error())
            })
            .collect::<Result<Vec<_>, Error>>()?;

        ctx.service()
            .execute(command::CreateOrder {
                event: event.into(),
                scheduled_at: scheduled_at.coerce(),
                address: address.into(),
                people_count,
                community: community.into(),
                parish: parish.into(),
                contact: domain::Contact {
                    name: customer_name.into(),
                    email: customer_email.into(),
                    phone: customer_phone.into(),
                },
                items,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Moves the `Order` into the provided status.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid staff
    ///                             session;
    /// - `ORDER_NOT_EXISTS` - the `Order` with the specified ID does not
    ///                        exist;
    /// - `MISSING_REJECTION_REASON` - rejecting requires a reason;
    /// - `UNEXPECTED_REJECTION_REASON` - a reason was provided for a
    ///                                   non-rejection status;
    /// - `ALREADY_FINALIZED` - the `Order` is in a terminal status already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateOrderStatus",
            id = %id,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn update_order_status(
        id: api::order::Id,
        status: api::order::Status,
        reason: Option<api::order::RejectionReason>,
        ctx: &Context,
    ) -> Result<api::Order, Error> {
        ctx.current_session().await.map(drop)?;

        ctx.service()
            .execute(command::UpdateOrderStatus {
                order_id: id.into(),
                status: status.into(),
                reason: reason.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Rates a delivered `Order`.
    ///
    /// A repeated rating replaces the stars and the comment, keeping an
    /// existing staff reply in place.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ORDER_NOT_EXISTS` - the `Order` with the specified ID does not
    ///                        exist;
    /// - `INVALID_STARS` - the stars value is out of the 1..=5 range;
    /// - `ORDER_NOT_DELIVERED` - only delivered `Order`s can be rated.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "submitRating",
            order_id = %order_id,
            otel.name = Self::SPAN_NAME,
            stars = %stars,
        ),
    )]
    pub async fn submit_rating(
        order_id: api::order::Id,
        stars: i32,
        comment: Option<api::rating::Comment>,
        ctx: &Context,
    ) -> Result<api::Rating, Error> {
        let stars = i16::try_from(stars)
            .ok()
            .and_then(domain::order::rating::Stars::new)
            .ok_or_else(|| RatingError::InvalidStars.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::SubmitRating {
                order_id: order_id.into(),
                stars,
                comment: comment.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Replies to the `Rating` of an `Order` as staff.
    ///
    /// A repeated reply overwrites the previous one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid staff
    ///                             session;
    /// - `RATING_NOT_EXISTS` - no `Rating` exists for the `Order` yet.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "replyToRating",
            order_id = %order_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reply_to_rating(
        order_id: api::order::Id,
        reply: api::rating::Reply,
        ctx: &Context,
    ) -> Result<api::Rating, Error> {
        ctx.current_session().await.map(drop)?;

        ctx.service()
            .execute(command::ReplyToRating {
                order_id: order_id.into(),
                reply: reply.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Posts a `Message` to the `Order` chat.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the `STAFF` sender requires a valid
    ///                             staff session;
    /// - `ORDER_NOT_EXISTS` - the `Order` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "postMessage",
            order_id = %order_id,
            otel.name = Self::SPAN_NAME,
            sender = ?sender,
        ),
    )]
    pub async fn post_message(
        order_id: api::order::Id,
        sender: api::message::Sender,
        body: api::message::Body,
        ctx: &Context,
    ) -> Result<api::message::Message, Error> {
        if sender == api::message::Sender::Staff {
            ctx.current_session().await.map(drop)?;
        }

        ctx.service()
            .execute(command::PostMessage {
                order_id: order_id.into(),
                sender: sender.into(),
                body: body.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Sets the availability of a calendar day.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request carries no valid staff
    ///                             session.
    #[tracing::instrument(
        skip_all,
        fields(
            date = %date,
            gql.name = "setAvailability",
            is_available = %is_available,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn set_availability(
        date: Date,
        is_available: bool,
        note: Option<api::availability::Note>,
        ctx: &Context,
    ) -> Result<api::availability::AvailabilityEntry, Error> {
        ctx.current_session().await.map(drop)?;

        ctx.service()
            .execute(command::SetAvailability {
                date,
                is_available,
                note: note.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new staff `Session` with the provided password.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_PASSWORD` - the provided password does not match.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createStaffSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_staff_session(
        password: api::staff::Password,
        ctx: &Context,
    ) -> Result<api::staff::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateStaffSession {
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }
}

impl AsError for command::create_order::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::create_order::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::DateUnavailable(date) => Some(
                Error::from(CreateOrderError::DateUnavailable)
                    .with_details([date]),
            ),
            E::ItemsUnavailable(ids) => Some(
                Error::from(CreateOrderError::ItemsUnavailable)
                    .with_details(ids),
            ),
            E::NoItems => Some(CreateOrderError::NoItems.into()),
            E::TooFewPeople { min } => Some(
                Error::from(CreateOrderError::TooFewPeople)
                    .with_details([format!("minimum is {min}")]),
            ),
            E::TooManyPeople { max } => Some(
                Error::from(CreateOrderError::TooManyPeople)
                    .with_details([format!("maximum is {max}")]),
            ),
        }
    }
}

impl AsError for command::update_order_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::update_order_status::ExecutionError as E;

        match self {
            E::AlreadyFinalized { .. } => {
                Some(UpdateOrderStatusError::AlreadyFinalized.into())
            }
            E::Db(e) => e.try_as_error(),
            E::MissingReason => {
                Some(UpdateOrderStatusError::MissingReason.into())
            }
            E::OrderNotExists(_) => {
                Some(api::query::OrderError::NotExists.into())
            }
            E::UnexpectedReason(_) => {
                Some(UpdateOrderStatusError::UnexpectedReason.into())
            }
        }
    }
}

impl AsError for command::submit_rating::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::submit_rating::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::NotDelivered { .. } => Some(RatingError::NotDelivered.into()),
            E::OrderNotExists(_) => {
                Some(api::query::OrderError::NotExists.into())
            }
        }
    }
}

impl AsError for command::reply_to_rating::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::reply_to_rating::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::RatingNotExists(_) => Some(RatingError::NotExists.into()),
        }
    }
}

impl AsError for command::post_message::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::post_message::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
            E::OrderNotExists(_) => {
                Some(api::query::OrderError::NotExists.into())
            }
        }
    }
}

impl AsError for command::set_availability::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::set_availability::ExecutionError as E;

        match self {
            E::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::create_staff_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use command::create_staff_session::ExecutionError as E;

        match self {
            E::JsonWebTokenEncodeError(_) => None,
            E::WrongPassword => Some(SessionError::WrongPassword.into()),
        }
    }
}

define_error! {
    enum CreateOrderError {
        #[code = "TOO_FEW_PEOPLE"]
        #[status = BAD_REQUEST]
        #[message = "Number of people is below the configured minimum"]
        TooFewPeople,

        #[code = "TOO_MANY_PEOPLE"]
        #[status = BAD_REQUEST]
        #[message = "Number of people is above the configured maximum"]
        TooManyPeople,

        #[code = "DATE_UNAVAILABLE"]
        #[status = BAD_REQUEST]
        #[message = "The scheduled day is not available for ordering"]
        DateUnavailable,

        #[code = "ITEMS_UNAVAILABLE"]
        #[status = BAD_REQUEST]
        #[message = "Some of the requested `MenuItem`s are unavailable"]
        ItemsUnavailable,

        #[code = "NO_ITEMS"]
        #[status = BAD_REQUEST]
        #[message = "An `Order` must contain at least one `MenuItem`"]
        NoItems,

        #[code = "INVALID_PEOPLE_COUNT"]
        #[status = BAD_REQUEST]
        #[message = "Number of people must be positive"]
        InvalidPeopleCount,

        #[code = "INVALID_QUANTITY"]
        #[status = BAD_REQUEST]
        #[message = "`MenuItem` quantity must be within the 1..=10000 range"]
        InvalidQuantity,
    }
}

define_error! {
    enum UpdateOrderStatusError {
        #[code = "ALREADY_FINALIZED"]
        #[status = CONFLICT]
        #[message = "The `Order` is in a terminal status already"]
        AlreadyFinalized,

        #[code = "MISSING_REJECTION_REASON"]
        #[status = BAD_REQUEST]
        #[message = "Rejecting an `Order` requires a reason"]
        MissingReason,

        #[code = "UNEXPECTED_REJECTION_REASON"]
        #[status = BAD_REQUEST]
        #[message = "A reason is only expected when rejecting an `Order`"]
        UnexpectedReason,
    }
}

define_error! {
    enum RatingError {
        #[code = "RATING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "No `Rating` exists for the `Order` yet"]
        NotExists,

        #[code = "ORDER_NOT_DELIVERED"]
        #[status = CONFLICT]
        #[message = "Only delivered `Order`s can be rated"]
        NotDelivered,

        #[code = "INVALID_STARS"]
        #[status = BAD_REQUEST]
        #[message = "Stars value must be within the 1..=5 range"]
        InvalidStars,
    }
}

define_error! {
    enum SessionError {
        #[code = "WRONG_PASSWORD"]
        #[status = UNAUTHORIZED]
        #[message = "Wrong staff password"]
        WrongPassword,
    }
}
