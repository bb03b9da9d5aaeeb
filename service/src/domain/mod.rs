//! Domain definitions.

pub mod calendar;
pub mod contact;
pub mod menu;
pub mod order;
pub mod staff;

pub use self::{
    calendar::AvailabilityEntry, contact::Contact, menu::MenuItem, order::Order,
};
