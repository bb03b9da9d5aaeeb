//! [`Command`] for creating a staff [`Session`].

use common::DateTime;
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

use crate::{
    domain::staff::{self, Session},
    Service,
};

#[cfg(doc)]
use crate::domain::staff::{Password, Token};

use super::Command;

/// [`Command`] for creating a staff [`Session`].
#[derive(Debug)]
pub struct CreateStaffSession {
    /// [`Password`] of the staff principal.
    pub password: SecretBox<staff::Password>,
}

/// Output of [`CreateStaffSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    pub token: staff::Token,

    /// [`DateTime`] when the [`Session`] expires.
    pub expires_at: staff::ExpirationDateTime,
}

impl<Db> Command<CreateStaffSession> for Service<Db> {
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateStaffSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateStaffSession { password } = cmd;

        let provided: &str = password.expose_secret().as_ref();
        if provided != self.config().staff_password.expose_secret() {
            return Err(tracerr::new!(E::WrongPassword));
        }

        let expires_at =
            (DateTime::now() + self.config().session_ttl).coerce();
        let token = jsonwebtoken::encode::<Session>(
            &jsonwebtoken::Header::default(),
            &Session { expires_at },
            &self.config().jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        // SAFETY: `jsonwebtoken::encode` always returns a valid
        //         `staff::Token`.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let token = unsafe { staff::Token::new_unchecked(token) };

        Ok(Output { token, expires_at })
    }
}

/// Error of [`CreateStaffSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// [`CreateStaffSession`] contains a wrong password.
    #[display("Wrong staff password")]
    WrongPassword,
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use secrecy::SecretBox;

    use crate::{
        command::{tests::service, AuthorizeStaffSession},
        domain::staff,
        Command as _,
    };

    use super::{CreateStaffSession, ExecutionError as E};

    #[tokio::test]
    async fn issues_authorizable_token() {
        let svc = service();

        let output = svc
            .execute(CreateStaffSession {
                password: SecretBox::new(Box::new(staff::Password::from(
                    "zmien-mnie",
                ))),
            })
            .await
            .unwrap();
        assert!(output.expires_at > DateTime::now().coerce());

        let session = svc
            .execute(AuthorizeStaffSession {
                token: output.token,
            })
            .await
            .unwrap();
        // Claims carry the expiration with a second precision only.
        assert_eq!(
            session.expires_at.unix_timestamp(),
            output.expires_at.unix_timestamp(),
        );
    }

    #[tokio::test]
    async fn refuses_wrong_password() {
        let svc = service();

        let err = svc
            .execute(CreateStaffSession {
                password: SecretBox::new(Box::new(staff::Password::from(
                    "zgadywanka",
                ))),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::WrongPassword));
    }

    #[tokio::test]
    async fn refuses_garbage_token() {
        let svc = service();

        #[expect(unsafe_code, reason = "deliberately malformed")]
        let token =
            unsafe { staff::Token::new_unchecked("not-a-jwt".to_owned()) };

        assert!(svc
            .execute(AuthorizeStaffSession { token })
            .await
            .is_err());
    }
}
