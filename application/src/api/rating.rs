//! [`Rating`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api::scalar, Context};

/// Customer rating of a delivered `Order`.
#[derive(Clone, Debug, From)]
pub struct Rating(domain::order::Rating);

/// Customer rating of a delivered `Order`.
#[graphql_object(context = Context)]
impl Rating {
    /// Unique identifier of this `Rating`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Star value of this `Rating`, from 1 to 5.
    #[must_use]
    pub fn stars(&self) -> i32 {
        i32::from(i16::from(self.0.stars))
    }

    /// Customer comment of this `Rating`, if any.
    #[must_use]
    pub fn comment(&self) -> Option<Comment> {
        self.0.comment.clone().map(Into::into)
    }

    /// Staff reply to this `Rating`, if any.
    #[must_use]
    pub fn reply(&self) -> Option<Reply> {
        self.0.reply.clone().map(Into::into)
    }

    /// `DateTime` when this `Rating` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Rating` was last updated.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `Rating`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::order::rating::Id)]
#[into(domain::order::rating::Id)]
#[graphql(name = "RatingId", transparent)]
pub struct Id(Uuid);

/// Customer comment of a `Rating`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "RatingComment",
    with = scalar::Via::<domain::order::rating::Comment>,
)]
pub struct Comment(domain::order::rating::Comment);

/// Staff reply to a `Rating`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "RatingReply",
    with = scalar::Via::<domain::order::rating::Reply>,
)]
pub struct Reply(domain::order::rating::Reply);
