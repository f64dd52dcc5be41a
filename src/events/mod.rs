use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

// Define the various events that can occur in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Stock events
    StockIngressRecorded {
        product_id: Uuid,
        location_id: Uuid,
        quantity: i32,
    },
    StockAdjusted {
        product_id: Uuid,
        location_id: Uuid,
        old_quantity: i32,
        new_quantity: i32,
    },
    StockTransferred {
        product_id: Uuid,
        origin_location_id: Uuid,
        destination_location_id: Uuid,
        quantity: i32,
    },

    // Proposal events
    AdjustmentRequested {
        adjustment_id: Uuid,
        flagged: bool,
    },
    AdjustmentRejected(Uuid),
    TransferRequested(Uuid),
    TransferRejected(Uuid),

    // Order events
    OrderCreated(Uuid),
    OrderUpdated(Uuid),
    OrderReserved(Uuid),
    OrderDispatched {
        order_id: Uuid,
        estimated_arrival_time: Option<DateTime<Utc>>,
    },
    OrderClosed(Uuid),
    OrderDeleted(Uuid),

    // Delivery alert events
    DeliveryAlertRaised {
        order_id: Uuid,
        due_time: DateTime<Utc>,
    },
    DeliveryAlertResolved(Uuid),
}

// Consumes the event channel and logs everything that flows through it.
// Side effects beyond logging live in the services that emit the events;
// this loop exists so emission never blocks a request.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::AdjustmentRequested {
                adjustment_id,
                flagged: true,
            } => {
                warn!(
                    adjustment_id = %adjustment_id,
                    "Adjustment request flagged: discrepancy exceeds tolerance"
                );
            }
            Event::DeliveryAlertRaised { order_id, due_time } => {
                info!(order_id = %order_id, due_time = %due_time, "Delivery alert raised");
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    info!("Event processing loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_sender_delivers_to_channel() {
        let (tx, mut rx) = mpsc::channel(8);
        let sender = EventSender::new(tx);

        let order_id = Uuid::new_v4();
        sender.send(Event::OrderCreated(order_id)).await.unwrap();

        match rx.recv().await {
            Some(Event::OrderCreated(id)) => assert_eq!(id, order_id),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn event_sender_errors_when_channel_closed() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        let result = sender.send(Event::OrderClosed(Uuid::new_v4())).await;
        assert!(result.is_err());
    }
}
