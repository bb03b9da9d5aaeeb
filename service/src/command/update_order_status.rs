//! [`Command`] for updating the [`Status`] of an [`Order`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        order::{self, Status},
        Order,
    },
    infra::{database, mailer, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating the [`Status`] of an [`Order`].
#[derive(Clone, Debug)]
pub struct UpdateOrderStatus {
    /// ID of the [`Order`] to update.
    pub order_id: order::Id,

    /// [`Status`] to move the [`Order`] into.
    pub status: Status,

    /// Reason of the rejection.
    ///
    /// Required if and only if the [`Status`] is [`Status::Rejected`].
    pub reason: Option<order::RejectionReason>,
}

impl<Db> Command<UpdateOrderStatus> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Lock<By<Order, order::Id>>, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<Update<Order>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateOrderStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOrderStatus {
            order_id,
            status,
            reason,
        } = cmd;

        match (status, &reason) {
            (Status::Rejected, None) => {
                return Err(tracerr::new!(E::MissingReason));
            }
            (Status::Rejected, Some(_)) => {}
            (
                Status::Pending
                | Status::Accepted
                | Status::InDelivery
                | Status::Delivered,
                Some(_),
            ) => {
                return Err(tracerr::new!(E::UnexpectedReason(status)));
            }
            (
                Status::Pending
                | Status::Accepted
                | Status::InDelivery
                | Status::Delivered,
                None,
            ) => {}
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent transitions of the same `Order`.
        tx.execute(Lock(By::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut order = tx
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?;

        if order.status.is_terminal() {
            return Err(tracerr::new!(E::AlreadyFinalized {
                id: order_id,
                status: order.status,
            }));
        }

        let is_noop = order.status == status;

        order.status = status;
        order.status_reason = reason;
        order.updated_at = DateTime::now().coerce();

        tx.execute(Update(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        // Repeating the current status only bumps `updated_at` and must not
        // notify the customer again.
        if !is_noop {
            if let Err(e) = self
                .mailer()
                .execute(mailer::Notification::StatusChanged(&order))
                .await
            {
                tracing::warn!(
                    "failed to dispatch `StatusChanged` notice: {e}",
                );
            }
        }

        Ok(order)
    }
}

/// Error of [`UpdateOrderStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Order`] is in a terminal [`Status`] already.
    #[display("`Order(id: {id})` is finalized as `{status}` already")]
    AlreadyFinalized {
        /// ID of the [`Order`].
        id: order::Id,

        /// Terminal [`Status`] of the [`Order`].
        status: Status,
    },

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Rejection requires a [`order::RejectionReason`].
    #[display("Rejecting an `Order` requires a `RejectionReason`")]
    MissingReason,

    /// [`Order`] with the provided ID does not exist.
    #[display("`Order(id: {_0})` does not exist")]
    OrderNotExists(#[error(not(source))] order::Id),

    /// [`order::RejectionReason`] provided for a non-rejection [`Status`].
    #[display("`RejectionReason` is not expected for the `{_0}` status")]
    UnexpectedReason(#[error(not(source))] Status),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        command::tests::{pending_order, service},
        domain::{order, Order},
        Command as _,
    };

    use super::{ExecutionError as E, Status, UpdateOrderStatus};

    /// Shortcut for an [`UpdateOrderStatus`] with no reason.
    fn transition(order_id: order::Id, status: Status) -> UpdateOrderStatus {
        UpdateOrderStatus {
            order_id,
            status,
            reason: None,
        }
    }

    #[tokio::test]
    async fn accepts_then_delivers() {
        let svc = service();
        let order = pending_order(&svc).await;

        let order = svc
            .execute(transition(order.id, Status::Accepted))
            .await
            .unwrap();
        assert_eq!(order.status, Status::Accepted);
        assert_eq!(order.status_reason, None);

        // `InDelivery` is not a required stop on the way.
        let order = svc
            .execute(transition(order.id, Status::Delivered))
            .await
            .unwrap();
        assert_eq!(order.status, Status::Delivered);
    }

    #[tokio::test]
    async fn stores_rejection_reason() {
        let svc = service();
        let order = pending_order(&svc).await;

        svc.execute(UpdateOrderStatus {
            order_id: order.id,
            status: Status::Rejected,
            reason: Some(
                order::RejectionReason::new("too far").unwrap(),
            ),
        })
        .await
        .unwrap();

        let reread: Option<Order> = svc
            .database()
            .execute(Select(By::<Option<Order>, _>::new(order.id)))
            .await
            .unwrap();
        let reread = reread.unwrap();
        assert_eq!(reread.status, Status::Rejected);
        assert_eq!(
            reread.status_reason,
            Some(order::RejectionReason::new("too far").unwrap()),
        );
    }

    #[tokio::test]
    async fn requires_reason_for_rejection() {
        let svc = service();
        let order = pending_order(&svc).await;

        let err = svc
            .execute(transition(order.id, Status::Rejected))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), E::MissingReason));

        // The refused transition must leave the `Order` untouched.
        let reread: Option<Order> = svc
            .database()
            .execute(Select(By::<Option<Order>, _>::new(order.id)))
            .await
            .unwrap();
        assert_eq!(reread.unwrap().status, Status::Pending);
    }

    #[tokio::test]
    async fn refuses_reason_for_non_rejection() {
        let svc = service();
        let order = pending_order(&svc).await;

        let err = svc
            .execute(UpdateOrderStatus {
                order_id: order.id,
                status: Status::Accepted,
                reason: Some(
                    order::RejectionReason::new("not a rejection").unwrap(),
                ),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            E::UnexpectedReason(Status::Accepted),
        ));
    }

    #[tokio::test]
    async fn refuses_transitions_out_of_terminal_statuses() {
        let svc = service();
        let order = pending_order(&svc).await;

        svc.execute(UpdateOrderStatus {
            order_id: order.id,
            status: Status::Rejected,
            reason: Some(order::RejectionReason::new("too far").unwrap()),
        })
        .await
        .unwrap();

        let err = svc
            .execute(transition(order.id, Status::Accepted))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            E::AlreadyFinalized {
                status: Status::Rejected,
                ..
            },
        ));
    }

    #[tokio::test]
    async fn bumps_timestamp_on_repeated_status() {
        let svc = service();
        let order = pending_order(&svc).await;

        let order = svc
            .execute(transition(order.id, Status::Accepted))
            .await
            .unwrap();
        let repeated = svc
            .execute(transition(order.id, Status::Accepted))
            .await
            .unwrap();

        assert_eq!(repeated.status, Status::Accepted);
        assert!(repeated.updated_at >= order.updated_at);
    }

    #[tokio::test]
    async fn errors_on_unknown_order() {
        let svc = service();

        let err = svc
            .execute(transition(order::Id::new(), Status::Accepted))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::OrderNotExists(_)));
    }
}
