//! [`Command`] for setting the availability of a calendar day.

use common::{operations::Upsert, Date};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{calendar, AvailabilityEntry},
    infra::{database, Database},
    Service,
};

#[cfg(doc)]
use crate::domain::Order;

use super::Command;

/// [`Command`] for setting the availability of a calendar day.
///
/// Creates the day's [`AvailabilityEntry`], or replaces the existing one.
#[derive(Clone, Debug)]
pub struct SetAvailability {
    /// Calendar day to set the availability of.
    pub date: Date,

    /// Indicator whether new [`Order`]s may be scheduled on the day.
    pub is_available: bool,

    /// Optional staff [`calendar::Note`] for the day.
    pub note: Option<calendar::Note>,
}

impl<Db> Command<SetAvailability> for Service<Db>
where
    Db: Database<Upsert<AvailabilityEntry>, Err = Traced<database::Error>>,
{
    type Ok = AvailabilityEntry;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SetAvailability,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SetAvailability {
            date,
            is_available,
            note,
        } = cmd;

        let entry = AvailabilityEntry {
            date,
            is_available,
            note,
        };

        self.database()
            .execute(Upsert(entry.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(entry)
    }
}

/// Error of [`SetAvailability`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        Date,
    };

    use crate::{
        command::tests::service,
        domain::{calendar, AvailabilityEntry},
        Command as _,
    };

    use super::SetAvailability;

    #[tokio::test]
    async fn upserts_per_date_entry() {
        let svc = service();
        let date = Date::from_iso8601("2025-06-01").unwrap();

        svc.execute(SetAvailability {
            date,
            is_available: true,
            note: None,
        })
        .await
        .unwrap();

        // Closing the same day replaces the entry instead of adding one.
        svc.execute(SetAvailability {
            date,
            is_available: false,
            note: Some(calendar::Note::new("urlop").unwrap()),
        })
        .await
        .unwrap();

        let entry: Option<AvailabilityEntry> = svc
            .database()
            .execute(Select(By::new(date)))
            .await
            .unwrap();
        let entry = entry.unwrap();
        assert!(!entry.is_available);
        assert_eq!(entry.note, Some(calendar::Note::new("urlop").unwrap()));
    }
}
