//! [`Rating`]-related [`Database`] implementations.

use common::operations::{By, Lock, Select, Update, Upsert};
use tracerr::Traced;

use crate::{
    domain::order::{self, Rating},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds a [`Rating`] out of the provided row.
fn from_row(row: &tokio_postgres::Row) -> Rating {
    Rating {
        id: row.get("id"),
        order_id: row.get("order_id"),
        stars: row.get("stars"),
        comment: row.get("comment"),
        reply: row.get("reply"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Option<Rating>, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Rating>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Rating>, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let order_id: order::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, order_id, stars, comment, reply, \
                   created_at, updated_at \
            FROM ratings \
            WHERE order_id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&order_id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Lock<By<Rating, order::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Rating, order::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let order_id: order::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM ratings \
            WHERE order_id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&order_id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Upsert<Rating>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Rating;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Upsert(rating): Upsert<Rating>,
    ) -> Result<Self::Ok, Self::Err> {
        // A re-rating touches the stars/comment only, keeping the existing
        // staff reply (and the original `created_at`) in place.
        const SQL: &str = "\
            INSERT INTO ratings (\
                id, order_id, stars, comment, reply, created_at, updated_at\
            ) VALUES (\
                $1::UUID, $2::UUID, $3::INT2, $4::VARCHAR, $5::VARCHAR, \
                $6::TIMESTAMPTZ, $7::TIMESTAMPTZ\
            ) \
            ON CONFLICT (order_id) DO UPDATE \
            SET stars = EXCLUDED.stars, \
                comment = EXCLUDED.comment, \
                updated_at = EXCLUDED.updated_at \
            RETURNING id, order_id, stars, comment, reply, \
                      created_at, updated_at";
        self.query_opt(
            SQL,
            &[
                &rating.id,
                &rating.order_id,
                &rating.stars,
                &rating.comment,
                &rating.reply,
                &rating.created_at,
                &rating.updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| from_row(&row.expect("`RETURNING` always yields a row")))
    }
}

impl<C> Database<Update<Rating>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(rating): Update<Rating>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            UPDATE ratings \
            SET stars = $2::INT2, \
                comment = $3::VARCHAR, \
                reply = $4::VARCHAR, \
                updated_at = $5::TIMESTAMPTZ \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &rating.id,
                &rating.stars,
                &rating.comment,
                &rating.reply,
                &rating.updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
