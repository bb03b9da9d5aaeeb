//! [`Command`] for replying to a [`Rating`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::order::{self, rating, Rating},
    infra::{database, Database},
    Service,
};

#[cfg(doc)]
use crate::domain::Order;

use super::Command;

/// [`Command`] for replying to a [`Rating`] as staff.
///
/// A repeated reply overwrites the previous one.
#[derive(Clone, Debug)]
pub struct ReplyToRating {
    /// ID of the [`Order`] whose [`Rating`] is replied to.
    pub order_id: order::Id,

    /// [`rating::Reply`] text.
    pub reply: rating::Reply,
}

impl<Db> Command<ReplyToRating> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Rating, order::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Rating>, order::Id>>,
            Ok = Option<Rating>,
            Err = Traced<database::Error>,
        > + Database<Update<Rating>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Rating;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ReplyToRating) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReplyToRating { order_id, reply } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid racing a concurrent re-rating.
        tx.execute(Lock(By::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut rating = tx
            .execute(Select(By::<Option<Rating>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RatingNotExists(order_id))
            .map_err(tracerr::wrap!())?;

        rating.reply = Some(reply);
        rating.updated_at = DateTime::now().coerce();

        tx.execute(Update(rating.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(rating)
    }
}

/// Error of [`ReplyToRating`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// No [`Rating`] exists for the [`Order`] with the provided ID.
    #[display("No `Rating` exists for `Order(id: {_0})`")]
    RatingNotExists(#[error(not(source))] order::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{
            tests::{pending_order, service},
            SubmitRating, UpdateOrderStatus,
        },
        domain::order::{self, rating, Status},
        Command as _,
    };

    use super::{ExecutionError as E, ReplyToRating};

    #[tokio::test]
    async fn errors_without_rating() {
        let svc = service();
        let order = pending_order(&svc).await;

        let err = svc
            .execute(ReplyToRating {
                order_id: order.id,
                reply: rating::Reply::new("thanks").unwrap(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::RatingNotExists(_)));
    }

    #[tokio::test]
    async fn reply_survives_re_rating() {
        let svc = service();
        let order = pending_order(&svc).await;
        svc.execute(UpdateOrderStatus {
            order_id: order.id,
            status: Status::Delivered,
            reason: None,
        })
        .await
        .unwrap();

        svc.execute(SubmitRating {
            order_id: order.id,
            stars: rating::Stars::new(5).unwrap(),
            comment: Some(rating::Comment::new("great").unwrap()),
        })
        .await
        .unwrap();

        let rating = svc
            .execute(ReplyToRating {
                order_id: order.id,
                reply: rating::Reply::new("thanks").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(i16::from(rating.stars), 5);
        assert_eq!(
            rating.comment,
            Some(rating::Comment::new("great").unwrap()),
        );
        assert_eq!(rating.reply, Some(rating::Reply::new("thanks").unwrap()));

        // Re-rating replaces stars/comment, but keeps the reply in place.
        let rating = svc
            .execute(SubmitRating {
                order_id: order.id,
                stars: rating::Stars::new(4).unwrap(),
                comment: Some(rating::Comment::new("ok").unwrap()),
            })
            .await
            .unwrap();
        assert_eq!(i16::from(rating.stars), 4);
        assert_eq!(rating.comment, Some(rating::Comment::new("ok").unwrap()));
        assert_eq!(rating.reply, Some(rating::Reply::new("thanks").unwrap()));
    }

    #[tokio::test]
    async fn second_reply_overwrites() {
        let svc = service();
        let order = pending_order(&svc).await;
        svc.execute(UpdateOrderStatus {
            order_id: order.id,
            status: Status::Delivered,
            reason: None,
        })
        .await
        .unwrap();
        svc.execute(SubmitRating {
            order_id: order.id,
            stars: rating::Stars::new(5).unwrap(),
            comment: None,
        })
        .await
        .unwrap();

        for text in ["thanks", "thanks again"] {
            let rating = svc
                .execute(ReplyToRating {
                    order_id: order.id,
                    reply: rating::Reply::new(text).unwrap(),
                })
                .await
                .unwrap();
            assert_eq!(
                rating.reply,
                Some(rating::Reply::new(text).unwrap()),
            );
        }
    }

    #[tokio::test]
    async fn errors_on_unknown_order() {
        let svc = service();

        let err = svc
            .execute(ReplyToRating {
                order_id: order::Id::new(),
                reply: rating::Reply::new("thanks").unwrap(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::RatingNotExists(_)));
    }
}
