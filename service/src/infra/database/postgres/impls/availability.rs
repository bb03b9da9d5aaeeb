//! [`AvailabilityEntry`]-related [`Database`] implementations.

use common::{
    operations::{By, Select, Upsert},
    Date,
};
use tracerr::Traced;

use crate::{
    domain::AvailabilityEntry,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds an [`AvailabilityEntry`] out of the provided row.
fn from_row(row: &tokio_postgres::Row) -> AvailabilityEntry {
    AvailabilityEntry {
        date: row.get("date"),
        is_available: row.get("is_available"),
        note: row.get("note"),
    }
}

impl<C> Database<Select<By<Option<AvailabilityEntry>, Date>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<AvailabilityEntry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<AvailabilityEntry>, Date>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let date: Date = by.into_inner();

        const SQL: &str = "\
            SELECT date, is_available, note \
            FROM availability \
            WHERE date = $1::DATE";
        Ok(self
            .query_opt(SQL, &[&date])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<AvailabilityEntry>, Date>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<AvailabilityEntry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<AvailabilityEntry>, Date>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let from: Date = by.into_inner();

        const SQL: &str = "\
            SELECT date, is_available, note \
            FROM availability \
            WHERE date >= $1::DATE \
            ORDER BY date ASC";
        Ok(self
            .query(SQL, &[&from])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Upsert<AvailabilityEntry>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Upsert(entry): Upsert<AvailabilityEntry>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO availability (date, is_available, note) \
            VALUES ($1::DATE, $2::BOOLEAN, $3::VARCHAR) \
            ON CONFLICT (date) DO UPDATE \
            SET is_available = EXCLUDED.is_available, \
                note = EXCLUDED.note";
        self.exec(SQL, &[&entry.date, &entry.is_available, &entry.note])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
