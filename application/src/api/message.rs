//! [`Message`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, Context};

/// Chat message attached to an `Order`.
#[derive(Clone, Debug, From)]
pub struct Message(domain::order::Message);

/// Chat message attached to an `Order`.
#[graphql_object(context = Context)]
impl Message {
    /// Unique identifier of this `Message`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Sender role of this `Message`.
    #[must_use]
    pub fn sender(&self) -> Sender {
        self.0.sender.into()
    }

    /// Body of this `Message`.
    #[must_use]
    pub fn body(&self) -> Body {
        self.0.body.clone().into()
    }

    /// `DateTime` when this `Message` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Message`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::order::message::Id)]
#[into(domain::order::message::Id)]
#[graphql(name = "MessageId", transparent)]
pub struct Id(Uuid);

/// Role of a `Message` sender.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "MessageSender")]
pub enum Sender {
    /// The customer who placed the `Order`.
    Customer,

    /// Catering staff.
    Staff,
}

impl From<domain::order::message::Sender> for Sender {
    fn from(sender: domain::order::message::Sender) -> Self {
        use domain::order::message::Sender as S;

        match sender {
            S::Customer => Self::Customer,
            S::Staff => Self::Staff,
        }
    }
}

impl From<Sender> for domain::order::message::Sender {
    fn from(sender: Sender) -> Self {
        use Sender as S;

        match sender {
            S::Customer => Self::Customer,
            S::Staff => Self::Staff,
        }
    }
}

/// Body of a `Message`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "MessageBody",
    with = scalar::Via::<domain::order::message::Body>,
)]
pub struct Body(domain::order::message::Body);
