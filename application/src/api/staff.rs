//! Staff session definitions.

use common::DateTime;
use derive_more::{AsRef, From, Into};
use juniper::{GraphQLObject, GraphQLScalar};
use service::{command, domain};

use crate::{api::scalar, Context};

/// Staff `Session` access token.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "StaffAuthToken",
    with = scalar::Via::<domain::staff::Token>,
)]
pub struct Token(domain::staff::Token);

/// Password of the staff principal.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "StaffPassword",
    with = scalar::Via::<domain::staff::Password>,
)]
pub struct Password(domain::staff::Password);

/// Result of a staff `Session` creation.
#[derive(Clone, Debug, From, GraphQLObject)]
#[graphql(context = Context, name = "CreateStaffSessionResult")]
pub struct CreateResult {
    /// Access token of the created `Session`.
    pub token: Token,

    /// `DateTime` when the created `Session` expires.
    pub expires_at: DateTime,
}

impl From<command::create_staff_session::Output> for CreateResult {
    fn from(output: command::create_staff_session::Output) -> Self {
        let command::create_staff_session::Output { token, expires_at } =
            output;
        Self {
            token: token.into(),
            expires_at: expires_at.coerce(),
        }
    }
}
