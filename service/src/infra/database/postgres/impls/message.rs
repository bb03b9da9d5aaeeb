//! [`Message`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::order::{self, Message},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Insert<Message>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(message): Insert<Message>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO messages (id, order_id, sender, body, created_at) \
            VALUES ($1::UUID, $2::UUID, $3::INT2, $4::VARCHAR, \
                    $5::TIMESTAMPTZ)";
        self.exec(
            SQL,
            &[
                &message.id,
                &message.order_id,
                &message.sender,
                &message.body,
                &message.created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Message>, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Message>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Message>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let order_id: order::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, order_id, sender, body, created_at \
            FROM messages \
            WHERE order_id = $1::UUID \
            ORDER BY created_at ASC, id ASC";
        Ok(self
            .query(SQL, &[&order_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Message {
                id: row.get("id"),
                order_id: row.get("order_id"),
                sender: row.get("sender"),
                body: row.get("body"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
