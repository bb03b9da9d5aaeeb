//! [`MenuItem`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::{
    operations::{By, Select},
    Money,
};
use tracerr::Traced;

use crate::{
    domain::{menu, MenuItem},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::menu::Active,
};

/// Builds a [`MenuItem`] out of the provided row.
fn from_row(row: &tokio_postgres::Row) -> MenuItem {
    MenuItem {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price: Money {
            minor: row.get("price_minor"),
            currency: row.get("price_currency"),
        },
        category: row.get("category"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<HashMap<menu::Id, MenuItem>, Vec<menu::Id>>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = HashMap<menu::Id, MenuItem>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<menu::Id, MenuItem>, Vec<menu::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = i32::try_from(ids.len()).unwrap();

        const SQL: &str = "\
            SELECT id, name, description, \
                   price_minor, price_currency, \
                   category, is_active, created_at \
            FROM menu_items \
            WHERE id IN (SELECT unnest($1::UUID[]) LIMIT $2::INT4) \
            LIMIT $2::INT4";
        Ok(self
            .query(SQL, &[&ids, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let item = from_row(&row);
                (item.id, item)
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<MenuItem>, menu::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<menu::Id, MenuItem>, Vec<menu::Id>>>,
        Ok = HashMap<menu::Id, MenuItem>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<MenuItem>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<MenuItem>, menu::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new(vec![id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Select<By<Vec<Active<MenuItem>>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Active<MenuItem>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Active<MenuItem>>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, description, \
                   price_minor, price_currency, \
                   category, is_active, created_at \
            FROM menu_items \
            WHERE is_active \
            ORDER BY category ASC, name ASC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| Active(from_row(row)))
            .collect())
    }
}
