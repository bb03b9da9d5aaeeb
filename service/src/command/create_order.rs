//! [`Command`] for placing a new [`Order`].

use std::collections::{HashMap, HashSet};

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    Date, DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{menu, order, AvailabilityEntry, Contact, MenuItem, Order},
    infra::{database, mailer, Database},
    Service,
};

use super::Command;

/// [`Command`] for placing a new [`Order`].
#[derive(Clone, Debug)]
pub struct CreateOrder {
    /// Kind of the catered event.
    pub event: order::EventType,

    /// [`DateTime`] the catered event is scheduled at.
    pub scheduled_at: order::ScheduleDateTime,

    /// Delivery [`order::Address`] of the new [`Order`].
    pub address: order::Address,

    /// Number of people attending the catered event.
    pub people_count: order::PeopleCount,

    /// [`order::Community`] tag of the new [`Order`].
    pub community: order::Community,

    /// [`order::Parish`] tag of the new [`Order`].
    pub parish: order::Parish,

    /// [`Contact`] info of the ordering customer.
    pub contact: Contact,

    /// Requested [`MenuItem`]s with their quantities.
    pub items: Vec<(menu::Id, order::Quantity)>,
}

impl<Db> Command<CreateOrder> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<AvailabilityEntry>, Date>>,
            Ok = Option<AvailabilityEntry>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<menu::Id, MenuItem>, Vec<menu::Id>>>,
            Ok = HashMap<menu::Id, MenuItem>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<Insert<Order>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateOrder {
            event,
            scheduled_at,
            address,
            people_count,
            community,
            parish,
            contact,
            items,
        } = cmd;

        if items.is_empty() {
            return Err(tracerr::new!(E::NoItems));
        }

        let limits = self.config().order_limits;
        if i32::from(people_count) < limits.min_people {
            return Err(tracerr::new!(E::TooFewPeople {
                min: limits.min_people,
            }));
        }
        if i32::from(people_count) > limits.max_people {
            return Err(tracerr::new!(E::TooManyPeople {
                max: limits.max_people,
            }));
        }

        let date = scheduled_at.date();
        self.database()
            .execute(Select(By::<Option<AvailabilityEntry>, _>::new(date)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|entry| entry.is_available)
            .ok_or(E::DateUnavailable(date))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let requested_ids = items.iter().map(|(id, _)| *id).collect::<Vec<_>>();
        let catalog = self
            .database()
            .execute(Select(By::<HashMap<menu::Id, MenuItem>, _>::new(
                requested_ids.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut seen = HashSet::new();
        let unavailable = requested_ids
            .iter()
            .copied()
            .filter(|id| {
                !seen.insert(*id)
                    || !catalog.get(id).is_some_and(|item| item.is_active)
            })
            .collect::<Vec<_>>();
        if !unavailable.is_empty() {
            return Err(tracerr::new!(E::ItemsUnavailable(unavailable)));
        }

        let lines = items
            .into_iter()
            .map(|(menu_item_id, quantity)| order::Line {
                menu_item_id,
                quantity,
                // Snapshotted here, never re-read from the catalog afterwards.
                unit_price: catalog[&menu_item_id].price,
            })
            .collect();

        let order = Order {
            id: order::Id::new(),
            status: order::Status::Pending,
            status_reason: None,
            event,
            scheduled_at,
            address,
            people_count,
            community,
            parish,
            contact,
            lines,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        // Dispatch is best-effort: the order is durable already, so a failed
        // notice must not fail the command.
        if let Err(e) = self
            .mailer()
            .execute(mailer::Notification::OrderCreated(&order))
            .await
        {
            tracing::warn!("failed to dispatch `OrderCreated` notice: {e}");
        }

        Ok(order)
    }
}

/// Error of [`CreateOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Scheduled [`Date`] is not available for ordering.
    #[display("`Date({_0})` is not available for ordering")]
    DateUnavailable(#[error(not(source))] Date),

    /// Some of the requested [`MenuItem`]s are unavailable.
    #[display("`MenuItem`s are unavailable or duplicated: {_0:?}")]
    ItemsUnavailable(#[error(not(source))] Vec<menu::Id>),

    /// No [`MenuItem`]s were requested.
    #[display("An `Order` must contain at least one `MenuItem`")]
    NoItems,

    /// Number of people is below the configured minimum.
    #[display("Number of people is below the minimum of {min}")]
    TooFewPeople {
        /// Configured minimum number of people.
        #[error(not(source))]
        min: i32,
    },

    /// Number of people is above the configured maximum.
    #[display("Number of people is above the maximum of {max}")]
    TooManyPeople {
        /// Configured maximum number of people.
        #[error(not(source))]
        max: i32,
    },
}

#[cfg(test)]
mod spec {
    use common::{
        money::Currency,
        operations::{By, Select},
        Money,
    };

    use crate::{
        command::tests::{
            create_order_cmd, menu_item, open_date, scheduled_at, service,
        },
        domain::{order, Order},
        infra::Database as _,
        Command as _,
    };

    use super::ExecutionError as E;

    #[tokio::test]
    async fn creates_pending_order_with_snapshotted_subtotal() {
        let svc = service();
        let a = menu_item(1800, true);
        let b = menu_item(800, true);
        svc.database().seed_menu_item(a.clone());
        svc.database().seed_menu_item(b.clone());
        open_date(svc.database(), scheduled_at().date());

        let order = svc
            .execute(create_order_cmd(vec![(a.id, 2), (b.id, 1)], 10))
            .await
            .unwrap();

        assert_eq!(order.status, order::Status::Pending);
        assert_eq!(order.subtotal(), Money::from_minor(4400, Currency::Pln));
        assert_eq!(svc.database().orders_count(), 1);

        // Raising the catalog price afterwards must not affect the stored
        // `Order`.
        svc.database().seed_menu_item(crate::domain::MenuItem {
            price: Money::from_minor(99_900, Currency::Pln),
            ..a
        });
        let reread: Option<Order> = svc
            .database()
            .execute(Select(By::<Option<Order>, _>::new(order.id)))
            .await
            .unwrap();
        assert_eq!(
            reread.unwrap().subtotal(),
            Money::from_minor(4400, Currency::Pln),
        );
    }

    #[tokio::test]
    async fn rejects_people_count_out_of_bounds() {
        let svc = service();
        let item = menu_item(1800, true);
        svc.database().seed_menu_item(item.clone());
        open_date(svc.database(), scheduled_at().date());

        let err = svc
            .execute(create_order_cmd(vec![(item.id, 1)], 9))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            E::TooFewPeople { min: 10 },
        ));

        let err = svc
            .execute(create_order_cmd(vec![(item.id, 1)], 501))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            E::TooManyPeople { max: 500 },
        ));

        assert_eq!(svc.database().orders_count(), 0);
    }

    #[tokio::test]
    async fn rejects_unavailable_date() {
        let svc = service();
        let item = menu_item(1800, true);
        svc.database().seed_menu_item(item.clone());

        let err = svc
            .execute(create_order_cmd(vec![(item.id, 1)], 10))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::DateUnavailable(_)));
        assert_eq!(svc.database().orders_count(), 0);
    }

    #[tokio::test]
    async fn rejects_inactive_unknown_and_duplicated_items() {
        let svc = service();
        let active = menu_item(1800, true);
        let inactive = menu_item(800, false);
        svc.database().seed_menu_item(active.clone());
        svc.database().seed_menu_item(inactive.clone());
        open_date(svc.database(), scheduled_at().date());

        let err = svc
            .execute(create_order_cmd(vec![(inactive.id, 1)], 10))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            E::ItemsUnavailable(ids) if *ids == [inactive.id],
        ));

        let unknown = crate::domain::menu::Id::new();
        let err = svc
            .execute(create_order_cmd(vec![(unknown, 1)], 10))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            E::ItemsUnavailable(ids) if *ids == [unknown],
        ));

        let err = svc
            .execute(create_order_cmd(
                vec![(active.id, 1), (active.id, 2)],
                10,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), E::ItemsUnavailable(_)));

        assert_eq!(svc.database().orders_count(), 0);
    }

    #[tokio::test]
    async fn rejects_empty_items() {
        let svc = service();
        open_date(svc.database(), scheduled_at().date());

        let err = svc
            .execute(create_order_cmd(vec![], 10))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::NoItems));
        assert_eq!(svc.database().orders_count(), 0);
    }
}
