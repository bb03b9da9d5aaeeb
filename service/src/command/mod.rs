//! [`Command`] definition.

pub mod authorize_staff_session;
pub mod create_order;
pub mod create_staff_session;
pub mod post_message;
pub mod reply_to_rating;
pub mod set_availability;
pub mod submit_rating;
pub mod update_order_status;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_staff_session::AuthorizeStaffSession, create_order::CreateOrder,
    create_staff_session::CreateStaffSession, post_message::PostMessage,
    reply_to_rating::ReplyToRating, set_availability::SetAvailability,
    submit_rating::SubmitRating, update_order_status::UpdateOrderStatus,
};

#[cfg(test)]
pub(crate) mod tests {
    //! Fixtures shared by [`Command`] tests.

    use std::time::Duration;

    use common::{money::Currency, Date, DateTime, Money};
    use secrecy::SecretString;

    use crate::{
        domain::{menu, order, AvailabilityEntry, Contact, MenuItem, Order},
        infra::{database::in_mem::InMem, mailer},
        Config, OrderLimits, Service,
    };

    use super::{Command as _, CreateOrder};

    /// Creates a new [`Service`] over an empty [`InMem`] database.
    pub(crate) fn service() -> Service<InMem> {
        Service::new(config(), InMem::default())
    }

    /// [`Config`] used by [`Command`] tests.
    ///
    /// [`Command`]: super::Command
    pub(crate) fn config() -> Config {
        Config {
            jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                b"secret",
            ),
            jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                b"secret",
            ),
            staff_password: SecretString::from("zmien-mnie"),
            session_ttl: Duration::from_secs(30 * 60),
            order_limits: OrderLimits {
                min_people: 10,
                max_people: 500,
            },
            mailer: mailer::Config {
                sender: "nep-gappa@example.com".to_owned(),
                staff_inbox: "staff@example.com".to_owned(),
            },
        }
    }

    /// Creates a [`MenuItem`] with the provided price in grosze.
    pub(crate) fn menu_item(price_minor: i64, is_active: bool) -> MenuItem {
        MenuItem {
            id: menu::Id::new(),
            name: menu::Name::new("Pierogi ruskie").unwrap(),
            description: menu::Description::new(
                "Domowe pierogi z ziemniakami i serem",
            )
            .unwrap(),
            price: Money::from_minor(price_minor, Currency::Pln),
            category: menu::Category::MainCourse,
            is_active,
            created_at: DateTime::now().coerce(),
        }
    }

    /// Marks the provided day as available in the given database.
    pub(crate) fn open_date(db: &InMem, date: Date) {
        db.seed_availability(AvailabilityEntry {
            date,
            is_available: true,
            note: None,
        });
    }

    /// Scheduled date-time every test [`Order`] uses.
    pub(crate) fn scheduled_at() -> order::ScheduleDateTime {
        DateTime::from_rfc3339("2025-06-01T12:00:00Z").unwrap().coerce()
    }

    /// Builds a valid [`CreateOrder`] command for the provided items.
    pub(crate) fn create_order_cmd(
        items: Vec<(menu::Id, i32)>,
        people_count: i32,
    ) -> CreateOrder {
        CreateOrder {
            event: order::EventType::Agape,
            scheduled_at: scheduled_at(),
            address: order::Address::new("ul. Testowa 123, Warszawa")
                .unwrap(),
            people_count: order::PeopleCount::new(people_count).unwrap(),
            community: order::Community::new("Stare Miasto").unwrap(),
            parish: order::Parish::new("Parafia św. Jana").unwrap(),
            contact: Contact {
                name: crate::domain::contact::Name::new("Jan Kowalski")
                    .unwrap(),
                email: crate::domain::contact::Email::new(
                    "jan.kowalski@example.com",
                )
                .unwrap(),
                phone: crate::domain::contact::Phone::new("+48 123 456 789")
                    .unwrap(),
            },
            items: items
                .into_iter()
                .map(|(id, qty)| (id, order::Quantity::new(qty).unwrap()))
                .collect(),
        }
    }

    /// Creates a `Pending` [`Order`] of a single freshly seeded [`MenuItem`].
    pub(crate) async fn pending_order(svc: &Service<InMem>) -> Order {
        let item = menu_item(1800, true);
        svc.database().seed_menu_item(item.clone());
        open_date(svc.database(), scheduled_at().date());

        svc.execute(create_order_cmd(vec![(item.id, 2)], 10))
            .await
            .unwrap()
    }
}
