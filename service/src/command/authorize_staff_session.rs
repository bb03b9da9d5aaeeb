//! [`Command`] for authorizing a staff [`Session`].

use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

use crate::{
    domain::staff::{self, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a staff [`Session`].
#[derive(Clone, Debug, From)]
pub struct AuthorizeStaffSession {
    /// [`Session`] token to authorize.
    pub token: staff::Token,
}

impl<Db> Command<AuthorizeStaffSession> for Service<Db> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeStaffSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeStaffSession { token } = cmd;

        jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Error of [`AuthorizeStaffSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),
}
