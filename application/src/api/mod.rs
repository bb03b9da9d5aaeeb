//! GraphQL API definitions.

pub mod availability;
pub mod menu;
pub mod message;
mod mutation;
pub mod order;
mod query;
pub mod rating;
pub mod scalar;
pub mod staff;
mod subscription;

use crate::define_error;

pub use self::{
    menu::MenuItem, mutation::Mutation, order::Order, query::Query,
    rating::Rating, subscription::Subscription,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

define_error! {
    enum PaginationError {
        #[code = "AMBIGUOUS_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Ambiguous pagination arguments"]
        Ambiguous,
    }
}
