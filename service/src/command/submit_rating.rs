//! [`Command`] for rating a delivered [`Order`].

use common::{
    operations::{By, Select, Upsert},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        order::{self, rating, Rating, Status},
        Order,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for rating a delivered [`Order`].
#[derive(Clone, Debug)]
pub struct SubmitRating {
    /// ID of the [`Order`] to rate.
    pub order_id: order::Id,

    /// [`rating::Stars`] value of the rating.
    pub stars: rating::Stars,

    /// Optional [`rating::Comment`] of the rating.
    pub comment: Option<rating::Comment>,
}

impl<Db> Command<SubmitRating> for Service<Db>
where
    Db: Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<Upsert<Rating>, Ok = Rating, Err = Traced<database::Error>>,
{
    type Ok = Rating;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitRating) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitRating {
            order_id,
            stars,
            comment,
        } = cmd;

        let order = self
            .database()
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?;

        if order.status != Status::Delivered {
            return Err(tracerr::new!(E::NotDelivered {
                id: order_id,
                status: order.status,
            }));
        }

        // A repeated rating replaces the stars/comment only: the `Upsert`
        // implementation keeps an existing staff reply in place.
        self.database()
            .execute(Upsert(Rating {
                id: rating::Id::new(),
                order_id,
                stars,
                comment,
                reply: None,
                created_at: DateTime::now().coerce(),
                updated_at: DateTime::now().coerce(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SubmitRating`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Order`] is not delivered yet.
    #[display("`Order(id: {id})` is `{status}`, only delivered ones are rated")]
    NotDelivered {
        /// ID of the [`Order`].
        id: order::Id,

        /// Current [`Status`] of the [`Order`].
        status: Status,
    },

    /// [`Order`] with the provided ID does not exist.
    #[display("`Order(id: {_0})` does not exist")]
    OrderNotExists(#[error(not(source))] order::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{
            tests::{pending_order, service},
            UpdateOrderStatus,
        },
        domain::order::{self, rating, Status},
        Command as _,
    };

    use super::{ExecutionError as E, SubmitRating};

    /// Shortcut for a [`SubmitRating`] command.
    fn rate(order_id: order::Id, stars: i16) -> SubmitRating {
        SubmitRating {
            order_id,
            stars: rating::Stars::new(stars).unwrap(),
            comment: None,
        }
    }

    #[tokio::test]
    async fn refuses_non_delivered_orders() {
        let svc = service();
        let order = pending_order(&svc).await;

        let err = svc.execute(rate(order.id, 5)).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            E::NotDelivered {
                status: Status::Pending,
                ..
            },
        ));
    }

    #[tokio::test]
    async fn rates_delivered_order() {
        let svc = service();
        let order = pending_order(&svc).await;
        svc.execute(UpdateOrderStatus {
            order_id: order.id,
            status: Status::Delivered,
            reason: None,
        })
        .await
        .unwrap();

        let rating = svc
            .execute(SubmitRating {
                order_id: order.id,
                stars: rating::Stars::new(5).unwrap(),
                comment: Some(rating::Comment::new("great").unwrap()),
            })
            .await
            .unwrap();

        assert_eq!(i16::from(rating.stars), 5);
        assert_eq!(rating.comment, Some(rating::Comment::new("great").unwrap()));
        assert_eq!(rating.reply, None);
    }

    #[tokio::test]
    async fn errors_on_unknown_order() {
        let svc = service();

        let err = svc
            .execute(rate(order::Id::new(), 5))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::OrderNotExists(_)));
    }
}
