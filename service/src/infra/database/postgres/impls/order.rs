//! [`Order`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Money,
};
use itertools::Itertools as _;
use tokio_postgres::types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{menu, order, Contact, Order},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Order>, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Order>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Order>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: order::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, status, status_reason, \
                   event, scheduled_at, \
                   address, people_count, community, parish, \
                   contact_name, contact_email, contact_phone, \
                   created_at, updated_at \
            FROM orders \
            WHERE id = $1::UUID";
        let Some(row) = self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        const LINES_SQL: &str = "\
            SELECT menu_item_id, quantity, \
                   unit_price_minor, unit_price_currency \
            FROM order_lines \
            WHERE order_id = $1::UUID \
            ORDER BY position ASC";
        let lines = self
            .query(LINES_SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|line| order::Line {
                menu_item_id: line.get("menu_item_id"),
                quantity: line.get("quantity"),
                unit_price: Money {
                    minor: line.get("unit_price_minor"),
                    currency: line.get("unit_price_currency"),
                },
            })
            .collect();

        Ok(Some(Order {
            id: row.get("id"),
            status: row.get("status"),
            status_reason: row.get("status_reason"),
            event: row.get("event"),
            scheduled_at: row.get("scheduled_at"),
            address: row.get("address"),
            people_count: row.get("people_count"),
            community: row.get("community"),
            parish: row.get("parish"),
            contact: Contact {
                name: row.get("contact_name"),
                email: row.get("contact_email"),
                phone: row.get("contact_phone"),
            },
            lines,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }
}

impl<C> Database<Lock<By<Order, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Order, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: order::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM orders \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Insert<Order>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(order): Insert<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO orders (\
                id, status, status_reason, \
                event, scheduled_at, \
                address, people_count, community, parish, \
                contact_name, contact_email, contact_phone, \
                created_at, updated_at\
            ) VALUES (\
                $1::UUID, $2::INT2, $3::VARCHAR, \
                $4::INT2, $5::TIMESTAMPTZ, \
                $6::VARCHAR, $7::INT4, $8::VARCHAR, $9::VARCHAR, \
                $10::VARCHAR, $11::VARCHAR, $12::VARCHAR, \
                $13::TIMESTAMPTZ, $14::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &order.id,
                &order.status,
                &order.status_reason,
                &order.event,
                &order.scheduled_at,
                &order.address,
                &order.people_count,
                &order.community,
                &order.parish,
                &order.contact.name,
                &order.contact.email,
                &order.contact.phone,
                &order.created_at,
                &order.updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)?;

        let positions =
            (0..i32::try_from(order.lines.len()).unwrap()).collect::<Vec<_>>();
        let (menu_item_ids, quantities, unit_minors, unit_currencies): (
            Vec<menu::Id>,
            Vec<order::Quantity>,
            Vec<i64>,
            Vec<common::money::Currency>,
        ) = order
            .lines
            .iter()
            .map(|l| {
                (
                    l.menu_item_id,
                    l.quantity,
                    l.unit_price.minor,
                    l.unit_price.currency,
                )
            })
            .multiunzip();

        const LINES_SQL: &str = "\
            INSERT INTO order_lines (\
                order_id, position, menu_item_id, quantity, \
                unit_price_minor, unit_price_currency\
            ) \
            SELECT $1::UUID, \
                   unnest($2::INT4[]), \
                   unnest($3::UUID[]), \
                   unnest($4::INT4[]), \
                   unnest($5::INT8[]), \
                   unnest($6::INT2[])";
        self.exec(
            LINES_SQL,
            &[
                &order.id,
                &positions,
                &menu_item_ids,
                &quantities,
                &unit_minors,
                &unit_currencies,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Order>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(order): Update<Order>,
    ) -> Result<Self::Ok, Self::Err> {
        // `Order` lines are frozen at creation, so only the mutable header
        // columns are written.
        const SQL: &str = "\
            UPDATE orders \
            SET status = $2::INT2, \
                status_reason = $3::VARCHAR, \
                updated_at = $4::TIMESTAMPTZ \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &order.id,
                &order.status,
                &order.status_reason,
                &order.updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C>
    Database<Select<By<read::order::list::Page, read::order::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::order::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::order::list::Page, read::order::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::order::list::Selector {
            arguments,
            filter: read::order::list::Filter { status },
        } = by.into_inner();

        let limit = i32::try_from(arguments.limit()).unwrap() + 1;

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });

        let ordering = arguments.kind().order().sql();
        let sql = format!(
            "SELECT id \
             FROM orders \
             WHERE true \
                   {cursor} \
                   {status_filtering} \
             ORDER BY id {ordering} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND id {op} ${idx}::UUID"))
            }),
            status_filtering =
                status_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND status = ${idx}::INT2"))
                }),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let edges = rows
            .into_iter()
            .take(arguments.limit())
            .map(|row| {
                let id: order::Id = row.get("id");
                (id, id)
            })
            .collect::<Vec<_>>();

        Ok(read::order::list::Page::new(&arguments, edges, has_more))
    }
}
