//! [`Mailer`] dispatching lifecycle notifications.

use common::Handler;
use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::domain::{order::Status, Order};

/// [`Mailer`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the notifications are sent from.
    pub sender: String,

    /// Address the staff notices are sent to.
    pub staff_inbox: String,
}

/// Notification of an [`Order`] lifecycle event.
#[derive(Clone, Copy, Debug)]
pub enum Notification<'o> {
    /// A new [`Order`] was placed.
    OrderCreated(&'o Order),

    /// The [`Order`]'s [`Status`] was changed.
    StatusChanged(&'o Order),
}

/// Dispatcher of [`Order`] lifecycle e-mails.
///
/// Exactly one message is rendered per lifecycle event. Delivery goes through
/// the log transport, and is best-effort: a failed dispatch is the caller's
/// to log and swallow, never to retry or roll back.
#[derive(Clone, Debug)]
pub struct Mailer {
    /// Configuration of this [`Mailer`].
    config: Config,
}

impl Mailer {
    /// Creates a new [`Mailer`] with the provided [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Handler<Notification<'_>> for Mailer {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        notification: Notification<'_>,
    ) -> Result<Self::Ok, Self::Err> {
        let (to, subject, body) = match notification {
            Notification::OrderCreated(order) => (
                self.config.staff_inbox.clone(),
                "Nowe zamówienie".to_owned(),
                format!(
                    "Złożono nowe zamówienie #{} na {} osób ({}).",
                    order.id,
                    order.people_count,
                    order.subtotal(),
                ),
            ),
            Notification::StatusChanged(order) => {
                let to = order.contact.email.to_string();
                match order.status {
                    Status::Accepted => (
                        to,
                        "Zamówienie zostało zaakceptowane".to_owned(),
                        format!(
                            "Twoje zamówienie #{} zostało zaakceptowane. \
                             Zaczniemy przygotowywać potrawy zgodnie z \
                             ustalonym terminem.",
                            order.id,
                        ),
                    ),
                    Status::Rejected => (
                        to,
                        "Zamówienie zostało odrzucone".to_owned(),
                        format!(
                            "Niestety, Twoje zamówienie #{} zostało \
                             odrzucone. Powód: {}",
                            order.id,
                            order
                                .status_reason
                                .as_ref()
                                .map_or("brak", AsRef::as_ref),
                        ),
                    ),
                    Status::InDelivery => (
                        to,
                        "Zamówienie w drodze".to_owned(),
                        format!(
                            "Twoje zamówienie #{} jest już w drodze. \
                             Spodziewaj się dostawy zgodnie z ustalonym \
                             terminem.",
                            order.id,
                        ),
                    ),
                    Status::Delivered => (
                        to,
                        "Zamówienie dostarczone".to_owned(),
                        format!(
                            "Twoje zamówienie #{} zostało dostarczone. \
                             Dziękujemy za skorzystanie z naszych usług! \
                             Możesz teraz ocenić nasze usługi.",
                            order.id,
                        ),
                    ),
                    Status::Pending => {
                        return Err(tracerr::new!(Error::NoNotice(
                            order.status,
                        )));
                    }
                }
            }
        };

        tracing::info!(
            from = %self.config.sender,
            to = %to,
            subject = %subject,
            body = %body,
            "e-mail dispatched",
        );

        Ok(())
    }
}

/// [`Mailer`] error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// No notice is defined for the [`Status`].
    #[display("no notice is defined for the `{_0}` status")]
    NoNotice(#[error(not(source))] Status),
}
