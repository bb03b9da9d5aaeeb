//! [`Command`] for posting a [`Message`] to an [`Order`] chat.

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        order::{self, message, Message},
        Order,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for posting a [`Message`] to an [`Order`] chat.
#[derive(Clone, Debug)]
pub struct PostMessage {
    /// ID of the [`Order`] to post the [`Message`] to.
    pub order_id: order::Id,

    /// Role of the [`Message`] sender.
    pub sender: message::Sender,

    /// [`message::Body`] of the [`Message`].
    pub body: message::Body,
}

impl<Db> Command<PostMessage> for Service<Db>
where
    Db: Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<Insert<Message>, Err = Traced<database::Error>>,
{
    type Ok = Message;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: PostMessage) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let PostMessage {
            order_id,
            sender,
            body,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let message = Message {
            id: message::Id::new(),
            order_id,
            sender,
            body,
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(message.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(message)
    }
}

/// Error of [`PostMessage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Order`] with the provided ID does not exist.
    #[display("`Order(id: {_0})` does not exist")]
    OrderNotExists(#[error(not(source))] order::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        command::tests::{pending_order, service},
        domain::order::{self, message, Message},
        Command as _,
    };

    use super::{ExecutionError as E, PostMessage};

    #[tokio::test]
    async fn appends_messages_in_order() {
        let svc = service();
        let order = pending_order(&svc).await;

        for (sender, body) in [
            (message::Sender::Customer, "Czy mozna zmienic godzine?"),
            (message::Sender::Staff, "Tak, prosze podac nowa."),
        ] {
            svc.execute(PostMessage {
                order_id: order.id,
                sender,
                body: message::Body::new(body).unwrap(),
            })
            .await
            .unwrap();
        }

        let messages: Vec<Message> = svc
            .database()
            .execute(Select(By::<Vec<Message>, _>::new(order.id)))
            .await
            .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, message::Sender::Customer);
        assert_eq!(messages[1].sender, message::Sender::Staff);
    }

    #[tokio::test]
    async fn errors_on_unknown_order() {
        let svc = service();

        let err = svc
            .execute(PostMessage {
                order_id: order::Id::new(),
                sender: message::Sender::Customer,
                body: message::Body::new("halo?").unwrap(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), E::OrderNotExists(_)));
    }
}
