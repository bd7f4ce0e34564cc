//! The orchestrating shop service.
//!
//! [`Shop`] owns the catalog, the cart and order stores, and the three
//! collaborators (persistence, analytics, rendering), all supplied once at
//! open time. Every operation with side effects lives here: the stores stay
//! pure collection types, and this layer persists after each mutation, fires
//! the analytics events, and asks the renderer to redraw.
//!
//! Everything is strictly sequential on the caller's thread. Persistence and
//! analytics are best-effort: their failures are logged and swallowed, never
//! surfaced to the caller.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};

use shopstand_core::{
    CartLine, Email, Order, OrderId, OrderStatus, ProductId, QuantityDelta,
};

use crate::analytics::{self, AnalyticsSink, counters, events};
use crate::cart::{CartStore, QuantityChange};
use crate::catalog::Catalog;
use crate::checkout::CheckoutForm;
use crate::error::{CheckoutError, StoreError};
use crate::orders::{OrderStore, StatusChange};
use crate::storage::{KvStore, keys};
use crate::views::{CartView, NullRenderer, Renderer, View};

/// The storefront service.
pub struct Shop {
    catalog: Catalog,
    cart: CartStore,
    orders: OrderStore,
    kv: Box<dyn KvStore>,
    analytics: Box<dyn AnalyticsSink>,
    renderer: Box<dyn Renderer>,
    current_view: View,
}

impl Shop {
    /// Open a shop: rebuild the cart and order stores from persisted
    /// records and re-identify the returning customer to the analytics sink
    /// when a previous checkout left an email behind.
    ///
    /// Malformed or absent records load as empty.
    #[must_use]
    pub fn open(
        catalog: Catalog,
        kv: Box<dyn KvStore>,
        analytics: Box<dyn AnalyticsSink>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        let cart = CartStore::from_lines(load_record(kv.as_ref(), keys::CART));
        let orders = OrderStore::from_orders(load_record(kv.as_ref(), keys::ORDERS));

        if let Some(raw) = kv.get(keys::LAST_CUSTOMER_EMAIL) {
            match serde_json::from_str::<String>(&raw) {
                Ok(stored) => match Email::parse(&stored) {
                    Ok(email) => analytics.identify(email.as_str()),
                    Err(e) => tracing::warn!("ignoring malformed last customer email: {e}"),
                },
                Err(e) => tracing::warn!("ignoring unreadable last customer email record: {e}"),
            }
        }

        Self {
            catalog,
            cart,
            orders,
            kv,
            analytics,
            renderer,
            current_view: View::Products,
        }
    }

    /// Open a shop with no renderer attached.
    #[must_use]
    pub fn open_headless(
        catalog: Catalog,
        kv: Box<dyn KvStore>,
        analytics: Box<dyn AnalyticsSink>,
    ) -> Self {
        Self::open(catalog, kv, analytics, Box::new(NullRenderer))
    }

    // =========================================================================
    // Read surface
    // =========================================================================

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn orders(&self) -> &OrderStore {
        &self.orders
    }

    #[must_use]
    pub const fn current_view(&self) -> View {
        self.current_view
    }

    /// Quantity shown on the cart badge.
    #[must_use]
    pub fn cart_badge(&self) -> u32 {
        self.cart.item_count()
    }

    /// Whether the orders screen has anything to show.
    #[must_use]
    pub fn has_orders(&self) -> bool {
        !self.orders.is_empty()
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Add one unit of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownProduct`] if the id is not in the
    /// catalog. Nothing changes in that case.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<(), StoreError> {
        let product = self
            .catalog
            .get(id)
            .ok_or(StoreError::UnknownProduct(id))?
            .clone();

        let quantity = self.cart.add(&product);
        self.persist_cart();

        self.analytics.track(
            events::PRODUCT_ADDED,
            json!({
                "product_id": product.id,
                "name": product.name,
                "price": product.price.amount,
                "category": product.category,
                "quantity": quantity,
                "cart_total": self.cart.total(),
            }),
        );
        self.renderer.render(self.current_view);
        Ok(())
    }

    /// Step a cart line's quantity up or down. Decrementing to zero removes
    /// the line. A missing line is a no-op.
    pub fn change_quantity(&mut self, id: ProductId, delta: QuantityDelta) {
        let change = self.cart.change_quantity(id, delta);

        let (event, properties) = match &change {
            QuantityChange::Increased { quantity } => (
                events::CART_QUANTITY_INCREASED,
                json!({
                    "product_id": id,
                    "quantity": quantity,
                    "cart_total": self.cart.total(),
                }),
            ),
            QuantityChange::Decreased { quantity } => (
                events::CART_QUANTITY_DECREASED,
                json!({
                    "product_id": id,
                    "quantity": quantity,
                    "cart_total": self.cart.total(),
                }),
            ),
            QuantityChange::Removed { line } => (
                events::CART_ITEM_REMOVED,
                json!({
                    "product_id": id,
                    "name": line.name,
                    "removed_quantity": line.quantity,
                    "cart_total": self.cart.total(),
                }),
            ),
            QuantityChange::Missing => {
                tracing::debug!(product_id = %id, "quantity change on missing cart line ignored");
                return;
            }
        };

        self.persist_cart();
        self.analytics.track(event, properties);
        self.renderer.render(self.current_view);
    }

    /// Remove a cart line unconditionally. A missing line is a no-op.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        let Some(line) = self.cart.remove(id) else {
            tracing::debug!(product_id = %id, "removal of missing cart line ignored");
            return;
        };

        self.persist_cart();
        self.analytics.track(
            events::CART_ITEM_REMOVED,
            json!({
                "product_id": id,
                "name": line.name,
                "removed_quantity": line.quantity,
                "cart_total": self.cart.total(),
            }),
        );
        self.renderer.render(self.current_view);
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Convert the current cart into a new order.
    ///
    /// Atomic from the caller's point of view: on success the full order is
    /// recorded and the cart is cleared; on failure nothing changes. The
    /// order id derives from the current timestamp; when that token is
    /// already taken the millisecond value is bumped until it is free, so
    /// every order in the log has a distinct id.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`] when a required field is empty
    /// or the email does not parse, and [`CheckoutError::EmptyCart`] when
    /// there is nothing to purchase.
    pub fn checkout(&mut self, form: &CheckoutForm) -> Result<Order, CheckoutError> {
        let customer = form.validate()?;
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let now = Utc::now();
        let order = Order {
            id: self.next_order_id(now),
            created_at: now,
            line_items: self.cart.lines().to_vec(),
            total: self.cart.total(),
            customer,
            status: OrderStatus::Processing,
        };

        // Point of no return: from here every step is infallible or
        // best-effort.
        self.orders.append(order.clone());
        self.cart.clear();
        self.persist_cart();
        self.persist_orders();
        persist(
            self.kv.as_mut(),
            keys::LAST_CUSTOMER_EMAIL,
            &order.customer.email,
        );

        self.emit_checkout_events(&order);
        self.renderer.render(self.current_view);

        tracing::info!(order_id = %order.id, total = %order.total, "checkout completed");
        Ok(order)
    }

    /// Generate an order id unused in the log, bumping the millisecond
    /// value past any token already taken by an earlier checkout.
    fn next_order_id(&self, at: DateTime<Utc>) -> OrderId {
        let mut millis = at.timestamp_millis();
        loop {
            let id = OrderId::from_millis(millis);
            if self.orders.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }

    fn emit_checkout_events(&self, order: &Order) {
        let email = &order.customer.email;
        self.analytics.identify(email.as_str());

        let items: Vec<Value> = order
            .line_items
            .iter()
            .map(|line: &CartLine| {
                json!({
                    "product_id": line.product_id,
                    "name": line.name,
                    "category": line.category,
                    "quantity": line.quantity,
                    "price": line.price.amount,
                })
            })
            .collect();

        self.analytics.track(
            events::CHECKOUT_COMPLETED,
            json!({
                "order_id": order.id,
                "total": order.total,
                "item_count": order.item_count(),
                "items": items,
            }),
        );
        self.analytics
            .track_revenue(order.total, json!({ "order_id": order.id }));

        self.analytics
            .increment_profile_counter(counters::LIFETIME_ORDERS, Decimal::ONE);
        self.analytics
            .increment_profile_counter(counters::LIFETIME_REVENUE, order.total);

        if let Some(category) = analytics::favorite_category(self.orders.list(), email) {
            self.analytics
                .set_profile_properties(json!({ "favorite_category": category }));
        }
    }

    // =========================================================================
    // Order administration
    // =========================================================================

    /// Mutate an order's status in place. Admin-only: callers must hold an
    /// authorization from the admin gate before invoking this.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownOrder`] if the id is not in the log.
    pub fn set_order_status(
        &mut self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<StatusChange, StoreError> {
        let change = self.orders.set_status(id, status)?;
        self.persist_orders();

        self.analytics.track(
            events::ORDER_STATUS_CHANGED,
            json!({
                "order_id": change.order_id,
                "from": change.from.to_string(),
                "to": change.to.to_string(),
            }),
        );
        self.renderer.render(self.current_view);
        Ok(change)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Activate a view. Pure routing: no business rules are enforced here.
    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
        self.analytics
            .track(events::PAGE_VIEWED, self.page_view_properties(view));
        self.renderer.render(view);
    }

    fn page_view_properties(&self, view: View) -> Value {
        match view {
            View::Cart => {
                let cart = CartView::from(&self.cart);
                let items: Vec<Value> = cart
                    .items
                    .iter()
                    .map(|item| json!({ "name": item.name, "quantity": item.quantity }))
                    .collect();
                json!({
                    "view": view.name(),
                    "cart_total": cart.subtotal,
                    "item_count": cart.item_count,
                    "items": items,
                })
            }
            View::Checkout => json!({
                "view": view.name(),
                "cart_total": self.cart.total(),
            }),
            View::Orders => json!({
                "view": view.name(),
                "order_count": self.orders.len(),
            }),
            View::Products => json!({
                "view": view.name(),
                "product_count": self.catalog.len(),
            }),
            View::Success => json!({ "view": view.name() }),
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn persist_cart(&mut self) {
        let lines = self.cart.lines().to_vec();
        persist(self.kv.as_mut(), keys::CART, &lines);
    }

    fn persist_orders(&mut self) {
        let orders = self.orders.list().to_vec();
        persist(self.kv.as_mut(), keys::ORDERS, &orders);
    }
}

/// Serialize and write a record, logging and swallowing any failure.
fn persist<T: Serialize>(kv: &mut dyn KvStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(e) = kv.set(key, &raw) {
                tracing::warn!(key, "failed to persist record: {e}");
            }
        }
        Err(e) => tracing::warn!(key, "failed to serialize record: {e}"),
    }
}

/// Read and deserialize a record, treating absence or corruption as empty.
fn load_record<T: serde::de::DeserializeOwned + Default>(kv: &dyn KvStore, key: &str) -> T {
    kv.get(key).map_or_else(T::default, |raw| {
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, "malformed persisted record, starting empty: {e}");
            T::default()
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use crate::analytics::{RecordedCall, RecordingSink};
    use crate::storage::MemoryStore;

    fn shop_with(sink: &RecordingSink, kv: &MemoryStore) -> Shop {
        Shop::open_headless(Catalog::seed(), Box::new(kv.clone()), Box::new(sink.clone()))
    }

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            zip: "12345".to_string(),
            card_number: "4242424242424242".to_string(),
            card_name: "Jane Doe".to_string(),
            expiry: "12/29".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn test_add_to_cart_persists_and_tracks() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);

        shop.add_to_cart(ProductId::new(1)).unwrap();

        assert_eq!(shop.cart_badge(), 1);
        assert!(kv.get(keys::CART).unwrap().contains("Wireless Headphones"));

        let tracked = sink.tracked(events::PRODUCT_ADDED);
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0]["category"], "Electronics");
        assert_eq!(tracked[0]["cart_total"], "79.99");
    }

    #[test]
    fn test_add_to_cart_unknown_product() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);

        let err = shop.add_to_cart(ProductId::new(42)).unwrap_err();
        assert_eq!(err, StoreError::UnknownProduct(ProductId::new(42)));
        assert!(shop.cart().is_empty());
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn test_decrement_steps_down_then_empties_cart() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);
        let id = ProductId::new(1);

        shop.add_to_cart(id).unwrap();
        shop.add_to_cart(id).unwrap();
        assert_eq!(shop.cart().lines().len(), 1);
        assert_eq!(shop.cart().lines()[0].quantity, 2);
        assert_eq!(shop.cart().total(), Decimal::new(15998, 2));

        shop.change_quantity(id, QuantityDelta::Decrement);
        assert_eq!(shop.cart().lines()[0].quantity, 1);
        assert_eq!(shop.cart().total(), Decimal::new(7999, 2));

        shop.change_quantity(id, QuantityDelta::Decrement);
        assert!(shop.cart().is_empty());
        assert_eq!(shop.cart().total(), Decimal::ZERO);

        assert_eq!(sink.tracked(events::CART_QUANTITY_DECREASED).len(), 1);
        assert_eq!(sink.tracked(events::CART_ITEM_REMOVED).len(), 1);
    }

    #[test]
    fn test_checkout_success_is_atomic() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);

        shop.add_to_cart(ProductId::new(2)).unwrap();
        shop.add_to_cart(ProductId::new(4)).unwrap();
        let snapshot = shop.cart().lines().to_vec();

        let order = shop.checkout(&filled_form()).unwrap();

        assert_eq!(order.total, Decimal::new(23498, 2));
        assert_eq!(order.line_items, snapshot);
        assert_eq!(order.status, OrderStatus::Processing);
        assert!(order.id.as_str().starts_with("ORD-"));

        assert!(shop.cart().is_empty());
        assert_eq!(shop.orders().len(), 1);
        assert_eq!(kv.get(keys::CART).as_deref(), Some("[]"));
        assert_eq!(
            kv.get(keys::LAST_CUSTOMER_EMAIL).as_deref(),
            Some("\"jane@example.com\"")
        );
    }

    #[test]
    fn test_checkout_validation_failure_changes_nothing() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);

        shop.add_to_cart(ProductId::new(2)).unwrap();
        shop.add_to_cart(ProductId::new(4)).unwrap();
        let kv_before = kv.snapshot();
        let cart_before = shop.cart().clone();
        let calls_before = sink.calls().len();

        let mut form = filled_form();
        form.email = String::new();
        assert!(matches!(
            shop.checkout(&form),
            Err(CheckoutError::Validation(_))
        ));

        assert_eq!(shop.cart(), &cart_before);
        assert_eq!(shop.orders().len(), 0);
        assert_eq!(kv.snapshot(), kv_before);
        assert_eq!(sink.calls().len(), calls_before);
    }

    #[test]
    fn test_checkout_empty_cart_rejected() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);

        assert!(matches!(
            shop.checkout(&filled_form()),
            Err(CheckoutError::EmptyCart)
        ));
        assert_eq!(shop.orders().len(), 0);
    }

    #[test]
    fn test_checkout_emits_revenue_and_profile_updates() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);

        shop.add_to_cart(ProductId::new(2)).unwrap();
        shop.checkout(&filled_form()).unwrap();

        let calls = sink.calls();
        assert!(calls.iter().any(|call| matches!(
            call,
            RecordedCall::Identify { user_key } if user_key == "jane@example.com"
        )));
        assert!(calls.iter().any(|call| matches!(
            call,
            RecordedCall::TrackRevenue { amount, .. } if *amount == Decimal::new(19999, 2)
        )));
        assert!(calls.iter().any(|call| matches!(
            call,
            RecordedCall::IncrementProfileCounter { name, amount }
                if name == counters::LIFETIME_ORDERS && *amount == Decimal::ONE
        )));
        assert!(calls.iter().any(|call| matches!(
            call,
            RecordedCall::SetProfileProperties { properties }
                if properties["favorite_category"] == "Electronics"
        )));
    }

    #[test]
    fn test_back_to_back_checkouts_get_distinct_ids() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);

        shop.add_to_cart(ProductId::new(1)).unwrap();
        let first = shop.checkout(&filled_form()).unwrap();
        shop.add_to_cart(ProductId::new(5)).unwrap();
        let second = shop.checkout(&filled_form()).unwrap();

        assert_ne!(first.id, second.id);

        shop.set_order_status(&second.id, OrderStatus::Shipped)
            .unwrap();
        assert_eq!(
            shop.orders().get(&first.id).unwrap().status,
            OrderStatus::Processing
        );
        assert_eq!(
            shop.orders().get(&second.id).unwrap().status,
            OrderStatus::Shipped
        );
    }

    #[test]
    fn test_next_order_id_bumps_past_taken_tokens() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);

        shop.add_to_cart(ProductId::new(1)).unwrap();
        let first = shop.checkout(&filled_form()).unwrap();

        // Re-using the first order's timestamp must yield the next free
        // millisecond token.
        let next = shop.next_order_id(first.created_at);
        assert_ne!(next, first.id);
        assert_eq!(
            next,
            OrderId::from_millis(first.created_at.timestamp_millis() + 1)
        );
    }

    #[test]
    fn test_open_reidentifies_email_containing_json_escapes() {
        let sink = RecordingSink::new();
        let mut kv = MemoryStore::new();
        let record = serde_json::to_string("ja\"ne@example.com").unwrap();
        kv.set(keys::LAST_CUSTOMER_EMAIL, &record).unwrap();

        let _shop = shop_with(&sink, &kv);

        assert!(sink.calls().iter().any(|call| matches!(
            call,
            RecordedCall::Identify { user_key } if user_key == "ja\"ne@example.com"
        )));
    }

    #[test]
    fn test_set_order_status_tracks_old_and_new() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);

        shop.add_to_cart(ProductId::new(5)).unwrap();
        let order = shop.checkout(&filled_form()).unwrap();

        let change = shop
            .set_order_status(&order.id, OrderStatus::Shipped)
            .unwrap();
        assert_eq!(change.from, OrderStatus::Processing);
        assert_eq!(change.to, OrderStatus::Shipped);

        let tracked = sink.tracked(events::ORDER_STATUS_CHANGED);
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0]["from"], "Processing");
        assert_eq!(tracked[0]["to"], "Shipped");
        assert!(kv.get(keys::ORDERS).unwrap().contains("Shipped"));
    }

    #[test]
    fn test_navigation_emits_view_context() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();
        let mut shop = shop_with(&sink, &kv);

        shop.add_to_cart(ProductId::new(1)).unwrap();
        shop.navigate_to(View::Cart);
        assert_eq!(shop.current_view(), View::Cart);

        let tracked = sink.tracked(events::PAGE_VIEWED);
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0]["view"], "cart");
        assert_eq!(tracked[0]["cart_total"], "$79.99");
        assert_eq!(tracked[0]["item_count"], 1);

        // Checkout is reachable even with an empty cart; navigation enforces
        // no business rules.
        shop.remove_from_cart(ProductId::new(1));
        shop.navigate_to(View::Checkout);
        assert_eq!(shop.current_view(), View::Checkout);
    }

    #[test]
    fn test_open_restores_state_and_reidentifies() {
        let sink = RecordingSink::new();
        let kv = MemoryStore::new();

        {
            let mut shop = shop_with(&sink, &kv);
            shop.add_to_cart(ProductId::new(3)).unwrap();
            shop.checkout(&filled_form()).unwrap();
            shop.add_to_cart(ProductId::new(5)).unwrap();
        }

        let sink2 = RecordingSink::new();
        let shop = shop_with(&sink2, &kv);

        assert_eq!(shop.orders().len(), 1);
        assert_eq!(shop.cart_badge(), 1);
        assert!(shop.has_orders());
        assert!(sink2.calls().iter().any(|call| matches!(
            call,
            RecordedCall::Identify { user_key } if user_key == "jane@example.com"
        )));
    }

    #[test]
    fn test_open_treats_malformed_records_as_empty() {
        let sink = RecordingSink::new();
        let mut kv = MemoryStore::new();
        kv.set(keys::CART, "not json").unwrap();
        kv.set(keys::ORDERS, "{\"wrong\": true}").unwrap();

        let shop = shop_with(&sink, &kv);
        assert!(shop.cart().is_empty());
        assert!(shop.orders().is_empty());
    }
}
