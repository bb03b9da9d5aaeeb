//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::time::Duration;

use derive_more::Debug;
use secrecy::SecretString;

#[cfg(doc)]
use crate::domain::Order;
use crate::infra::Mailer;

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] encoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_encoding_key: jsonwebtoken::EncodingKey,

    /// [JWT] decoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// Password of the staff principal.
    #[debug(skip)]
    pub staff_password: SecretString,

    /// Time-to-live of issued staff sessions.
    pub session_ttl: Duration,

    /// Bounds applied to new [`Order`]s.
    pub order_limits: OrderLimits,

    /// [`Mailer`] configuration.
    pub mailer: infra::mailer::Config,
}

/// Bounds applied to new [`Order`]s.
#[derive(Clone, Copy, Debug)]
pub struct OrderLimits {
    /// Minimum number of people a catered event must have.
    pub min_people: i32,

    /// Maximum number of people a catered event may have.
    pub max_people: i32,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// Database of this [`Service`].
    database: Db,

    /// [`Mailer`] dispatching lifecycle notifications.
    mailer: Mailer,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, database: Db) -> Self {
        let mailer = Mailer::new(config.mailer.clone());
        Self {
            config,
            database,
            mailer,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the database of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Mailer`] of this [`Service`].
    pub(crate) fn mailer(&self) -> &Mailer {
        &self.mailer
    }
}
