//! In-memory [`Database`] used by tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Update, Upsert},
    Date,
};
use tracerr::Traced;

use crate::{
    domain::{
        order::{self, Message, Rating},
        menu, AvailabilityEntry, MenuItem, Order,
    },
    infra::{database, Database},
};

/// In-memory [`Database`] keeping every entity behind a single [`Mutex`], so
/// writers are serialized the same way row locks serialize them in Postgres.
#[derive(Clone, Debug, Default)]
pub(crate) struct InMem(Arc<Mutex<State>>);

/// State of an [`InMem`] database.
#[derive(Debug, Default)]
struct State {
    /// Menu catalog, by ID.
    menu: HashMap<menu::Id, MenuItem>,

    /// Availability calendar, by date.
    availability: HashMap<Date, AvailabilityEntry>,

    /// Orders, by ID.
    orders: HashMap<order::Id, Order>,

    /// Chat messages, in insertion order.
    messages: Vec<Message>,

    /// Ratings, by the rated order's ID.
    ratings: HashMap<order::Id, Rating>,
}

impl InMem {
    /// Locks the [`State`] of this [`InMem`] database.
    fn state(&self) -> MutexGuard<'_, State> {
        self.0.lock().expect("`InMem` lock is never poisoned")
    }

    /// Seeds the provided [`MenuItem`] into the catalog.
    pub(crate) fn seed_menu_item(&self, item: MenuItem) {
        drop(self.state().menu.insert(item.id, item));
    }

    /// Seeds the provided [`AvailabilityEntry`] into the calendar.
    pub(crate) fn seed_availability(&self, entry: AvailabilityEntry) {
        drop(self.state().availability.insert(entry.date, entry));
    }

    /// Returns the number of stored [`Order`]s.
    pub(crate) fn orders_count(&self) -> usize {
        self.state().orders.len()
    }
}

impl Database<Transact> for InMem {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for InMem {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Lock<By<Order, order::Id>>> for InMem {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Order, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Lock<By<Rating, order::Id>>> for InMem {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Rating, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(())
    }
}

impl Database<Select<By<Option<Order>, order::Id>>> for InMem {
    type Ok = Option<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Order>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().orders.get(&by.into_inner()).cloned())
    }
}

impl Database<Insert<Order>> for InMem {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(order): Insert<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.state().orders.insert(order.id, order));
        Ok(())
    }
}

impl Database<Update<Order>> for InMem {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(order): Update<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.state().orders.insert(order.id, order));
        Ok(())
    }
}

impl Database<Select<By<Option<AvailabilityEntry>, Date>>> for InMem {
    type Ok = Option<AvailabilityEntry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<AvailabilityEntry>, Date>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().availability.get(&by.into_inner()).cloned())
    }
}

impl Database<Upsert<AvailabilityEntry>> for InMem {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Upsert(entry): Upsert<AvailabilityEntry>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.state().availability.insert(entry.date, entry));
        Ok(())
    }
}

impl Database<Select<By<HashMap<menu::Id, MenuItem>, Vec<menu::Id>>>>
    for InMem
{
    type Ok = HashMap<menu::Id, MenuItem>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<menu::Id, MenuItem>, Vec<menu::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let state = self.state();
        Ok(by
            .into_inner()
            .into_iter()
            .filter_map(|id| state.menu.get(&id).map(|i| (id, i.clone())))
            .collect())
    }
}

impl Database<Insert<Message>> for InMem {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(message): Insert<Message>,
    ) -> Result<Self::Ok, Self::Err> {
        self.state().messages.push(message);
        Ok(())
    }
}

impl Database<Select<By<Vec<Message>, order::Id>>> for InMem {
    type Ok = Vec<Message>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Message>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let order_id = by.into_inner();
        Ok(self
            .state()
            .messages
            .iter()
            .filter(|m| m.order_id == order_id)
            .cloned()
            .collect())
    }
}

impl Database<Select<By<Option<Rating>, order::Id>>> for InMem {
    type Ok = Option<Rating>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Rating>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.state().ratings.get(&by.into_inner()).cloned())
    }
}

impl Database<Upsert<Rating>> for InMem {
    type Ok = Rating;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Upsert(rating): Upsert<Rating>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        let stored = match state.ratings.remove(&rating.order_id) {
            // Same semantics as the SQL `ON CONFLICT (order_id) DO UPDATE`:
            // only stars/comment/`updated_at` are replaced.
            Some(existing) => Rating {
                stars: rating.stars,
                comment: rating.comment,
                updated_at: rating.updated_at,
                ..existing
            },
            None => rating,
        };
        drop(state.ratings.insert(stored.order_id, stored.clone()));
        Ok(stored)
    }
}

impl Database<Update<Rating>> for InMem {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(rating): Update<Rating>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.state().ratings.insert(rating.order_id, rating));
        Ok(())
    }
}
