//! The order store.
//!
//! An append-only log of finalized orders. The `status` field is the only
//! mutable part of an order, and this store is its only writer. Orders are
//! addressed by their [`OrderId`], never by position in the log.

use shopstand_core::{Order, OrderId, OrderStatus};

use crate::error::StoreError;

/// Append-only record of finalized purchases with mutable status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderStore {
    orders: Vec<Order>,
}

/// A completed status mutation, carried by the status-change analytics event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub order_id: OrderId,
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl OrderStore {
    /// Create an empty order log.
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Rebuild the log from persisted orders.
    #[must_use]
    pub const fn from_orders(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Append a finalized order to the end of the log.
    pub fn append(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// All orders in insertion order, oldest first.
    #[must_use]
    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    /// Look up an order by id.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    /// Number of orders in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Mutate the targeted order's status in place. Only the `status` field
    /// of the targeted order changes; every other order and field is
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownOrder`] if no order has the given id.
    pub fn set_status(
        &mut self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<StatusChange, StoreError> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| &order.id == id)
            .ok_or_else(|| StoreError::UnknownOrder(id.clone()))?;

        let from = order.status;
        order.status = status;

        Ok(StatusChange {
            order_id: order.id.clone(),
            from,
            to: status,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use shopstand_core::{CustomerRecord, Email};

    fn order(token: &str) -> Order {
        Order {
            id: OrderId::from_token(token),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            line_items: Vec::new(),
            total: Decimal::ZERO,
            customer: CustomerRecord {
                name: "Jane Doe".to_string(),
                email: Email::parse("jane@example.com").unwrap(),
                address: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                zip: "12345".to_string(),
                card_number: "4242".to_string(),
                card_name: "Jane Doe".to_string(),
                expiry: "12/29".to_string(),
                cvv: "123".to_string(),
            },
            status: OrderStatus::Processing,
        }
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut store = OrderStore::new();
        store.append(order("ORD-1"));
        store.append(order("ORD-2"));

        let listed: Vec<_> = store.list().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(listed, ["ORD-1", "ORD-2"]);
    }

    #[test]
    fn test_set_status_changes_only_target() {
        let mut store = OrderStore::new();
        store.append(order("ORD-1"));
        store.append(order("ORD-2"));
        let before_other = store.list()[0].clone();

        let change = store
            .set_status(&OrderId::from_token("ORD-2"), OrderStatus::Shipped)
            .unwrap();
        assert_eq!(change.from, OrderStatus::Processing);
        assert_eq!(change.to, OrderStatus::Shipped);

        assert_eq!(store.list()[0], before_other);
        assert_eq!(store.list()[1].status, OrderStatus::Shipped);
        assert_eq!(store.list()[1].total, Decimal::ZERO);
    }

    #[test]
    fn test_set_status_unknown_order() {
        let mut store = OrderStore::new();
        store.append(order("ORD-1"));

        let err = store
            .set_status(&OrderId::from_token("ORD-9"), OrderStatus::Delivered)
            .unwrap_err();
        assert_eq!(err, StoreError::UnknownOrder(OrderId::from_token("ORD-9")));
    }

    #[test]
    fn test_get_by_id() {
        let mut store = OrderStore::new();
        store.append(order("ORD-1"));

        assert!(store.get(&OrderId::from_token("ORD-1")).is_some());
        assert!(store.get(&OrderId::from_token("ORD-2")).is_none());
    }
}
