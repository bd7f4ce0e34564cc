//! Analytics collaborator seam.
//!
//! The engine reports user actions to a fire-and-forget sink. The sink is
//! chosen once when the shop is opened; call sites never feature-detect. No
//! return values are inspected and a misbehaving sink cannot fail an
//! operation.

use std::cell::RefCell;
use std::rc::Rc;

use rust_decimal::Decimal;
use serde_json::Value;

use shopstand_core::{Email, Order};

/// Analytics event names.
pub mod events {
    pub const PRODUCT_ADDED: &str = "product_added_to_cart";
    pub const CART_QUANTITY_INCREASED: &str = "cart_quantity_increased";
    pub const CART_QUANTITY_DECREASED: &str = "cart_quantity_decreased";
    pub const CART_ITEM_REMOVED: &str = "cart_item_removed";
    pub const CHECKOUT_COMPLETED: &str = "checkout_completed";
    pub const ORDER_STATUS_CHANGED: &str = "order_status_changed";
    pub const PAGE_VIEWED: &str = "page_viewed";
}

/// Customer profile counter names.
pub mod counters {
    pub const LIFETIME_ORDERS: &str = "lifetime_orders";
    pub const LIFETIME_REVENUE: &str = "lifetime_revenue";
}

/// A fire-and-forget analytics sink.
///
/// Implementations must not fail the caller: delivery problems are theirs to
/// log and swallow.
pub trait AnalyticsSink {
    /// Record a named event with a property bag.
    fn track(&self, event: &str, properties: Value);

    /// Associate subsequent events with a user key (the customer email).
    fn identify(&self, user_key: &str);

    /// Set profile properties on the identified user.
    fn set_profile_properties(&self, properties: Value);

    /// Increment a numeric profile counter.
    fn increment_profile_counter(&self, name: &str, amount: Decimal);

    /// Record revenue attributed to the identified user.
    fn track_revenue(&self, amount: Decimal, properties: Value);
}

/// Null-object sink used when analytics is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn track(&self, _event: &str, _properties: Value) {}
    fn identify(&self, _user_key: &str) {}
    fn set_profile_properties(&self, _properties: Value) {}
    fn increment_profile_counter(&self, _name: &str, _amount: Decimal) {}
    fn track_revenue(&self, _amount: Decimal, _properties: Value) {}
}

/// Sink that emits events as structured `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn track(&self, event: &str, properties: Value) {
        tracing::info!(target: "shopstand::analytics", event, %properties, "track");
    }

    fn identify(&self, user_key: &str) {
        tracing::info!(target: "shopstand::analytics", user_key, "identify");
    }

    fn set_profile_properties(&self, properties: Value) {
        tracing::info!(target: "shopstand::analytics", %properties, "set profile properties");
    }

    fn increment_profile_counter(&self, name: &str, amount: Decimal) {
        tracing::info!(target: "shopstand::analytics", counter = name, %amount, "increment counter");
    }

    fn track_revenue(&self, amount: Decimal, properties: Value) {
        tracing::info!(target: "shopstand::analytics", %amount, %properties, "track revenue");
    }
}

/// A call captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Track { event: String, properties: Value },
    Identify { user_key: String },
    SetProfileProperties { properties: Value },
    IncrementProfileCounter { name: String, amount: Decimal },
    TrackRevenue { amount: Decimal, properties: Value },
}

/// Test sink that records every call. Clones share the same buffer, so a
/// clone handed to the shop can be inspected through the original.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Rc<RefCell<Vec<RecordedCall>>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded call, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// The property bags of every `track` call with the given event name.
    #[must_use]
    pub fn tracked(&self, event: &str) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Track { event: name, properties } if name == event => {
                    Some(properties.clone())
                }
                _ => None,
            })
            .collect()
    }
}

impl AnalyticsSink for RecordingSink {
    fn track(&self, event: &str, properties: Value) {
        self.calls.borrow_mut().push(RecordedCall::Track {
            event: event.to_string(),
            properties,
        });
    }

    fn identify(&self, user_key: &str) {
        self.calls.borrow_mut().push(RecordedCall::Identify {
            user_key: user_key.to_string(),
        });
    }

    fn set_profile_properties(&self, properties: Value) {
        self.calls
            .borrow_mut()
            .push(RecordedCall::SetProfileProperties { properties });
    }

    fn increment_profile_counter(&self, name: &str, amount: Decimal) {
        self.calls
            .borrow_mut()
            .push(RecordedCall::IncrementProfileCounter {
                name: name.to_string(),
                amount,
            });
    }

    fn track_revenue(&self, amount: Decimal, properties: Value) {
        self.calls
            .borrow_mut()
            .push(RecordedCall::TrackRevenue { amount, properties });
    }
}

/// The customer's favorite category: the category occurring most frequently
/// across all of their historical order line items. Ties are broken by
/// whichever category's last occurrence comes latest in iteration order
/// (oldest order first, line items in cart order).
#[must_use]
pub fn favorite_category(orders: &[Order], customer: &Email) -> Option<String> {
    let mut tally: Vec<(String, u32, usize)> = Vec::new();
    let mut position = 0usize;

    for order in orders.iter().filter(|order| &order.customer.email == customer) {
        for line in &order.line_items {
            match tally.iter_mut().find(|(category, ..)| category == &line.category) {
                Some((_, count, last_seen)) => {
                    *count += 1;
                    *last_seen = position;
                }
                None => tally.push((line.category.clone(), 1, position)),
            }
            position += 1;
        }
    }

    tally
        .into_iter()
        .max_by_key(|&(_, count, last_seen)| (count, last_seen))
        .map(|(category, ..)| category)
}
