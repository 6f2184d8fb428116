//! Shared in-memory store doubles and fixtures for the service tests.
//!
//! The stores record every bulk call they receive so tests can assert both
//! the final counter values and the *shape* of the traffic (two bulk
//! operations per transition, one entry per distinct category, ...), and
//! they can inject failures to exercise the partial-failure paths.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use comptoir_core::{Category, CategoryDelta, Order, OrderItem, PaymentStatus, Product, ProductDelta};
use comptoir_orders::{
    CategoryStore, OrderStatusService, OrderStore, ProductStore, StoreError,
};

// =============================================================================
// In-Memory Stores
// =============================================================================

#[derive(Default)]
pub struct MemoryOrderStore {
    orders: Mutex<HashMap<String, Order>>,
    fail_saves: AtomicBool,
}

impl MemoryOrderStore {
    pub fn put(&self, order: Order) {
        self.orders.lock().unwrap().insert(order.id.clone(), order);
    }

    pub fn get(&self, id: &str) -> Option<Order> {
        self.orders.lock().unwrap().get(id).cloned()
    }

    /// Makes every subsequent `save` fail with a backend error.
    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, StoreError> {
        Ok(self.get(id))
    }

    async fn save(&self, order: &Order) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected save failure".to_string()));
        }
        self.put(order.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryProductStore {
    products: Mutex<HashMap<String, Product>>,
    bulk_calls: Mutex<Vec<Vec<ProductDelta>>>,
    fail_bulk: AtomicBool,
}

impl MemoryProductStore {
    pub fn put(&self, product: Product) {
        self.products
            .lock()
            .unwrap()
            .insert(product.id.clone(), product);
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.products.lock().unwrap().get(id).cloned()
    }

    /// Every bulk increment the store has received, in order.
    pub fn bulk_calls(&self) -> Vec<Vec<ProductDelta>> {
        self.bulk_calls.lock().unwrap().clone()
    }

    /// Makes every subsequent `bulk_increment` fail with a backend error.
    pub fn fail_bulk_increments(&self) {
        self.fail_bulk.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_many_by_ids(&self, ids: &[String]) -> Result<Vec<Product>, StoreError> {
        let products = self.products.lock().unwrap();
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn bulk_increment(&self, deltas: &[ProductDelta]) -> Result<(), StoreError> {
        if self.fail_bulk.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(
                "injected product bulk failure".to_string(),
            ));
        }
        self.bulk_calls.lock().unwrap().push(deltas.to_vec());

        let mut products = self.products.lock().unwrap();
        for delta in deltas {
            // Unknown ids are a no-op, matching bulk-write semantics.
            if let Some(product) = products.get_mut(&delta.product_id) {
                product.stock += delta.stock_delta;
                product.sold += delta.sold_delta;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCategoryStore {
    categories: Mutex<HashMap<String, Category>>,
    bulk_calls: Mutex<Vec<Vec<CategoryDelta>>>,
    fail_bulk: AtomicBool,
}

impl MemoryCategoryStore {
    pub fn put(&self, category: Category) {
        self.categories
            .lock()
            .unwrap()
            .insert(category.id.clone(), category);
    }

    pub fn get(&self, id: &str) -> Option<Category> {
        self.categories.lock().unwrap().get(id).cloned()
    }

    pub fn bulk_calls(&self) -> Vec<Vec<CategoryDelta>> {
        self.bulk_calls.lock().unwrap().clone()
    }

    pub fn fail_bulk_increments(&self) {
        self.fail_bulk.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn bulk_increment(&self, deltas: &[CategoryDelta]) -> Result<(), StoreError> {
        if self.fail_bulk.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(
                "injected category bulk failure".to_string(),
            ));
        }
        self.bulk_calls.lock().unwrap().push(deltas.to_vec());

        let mut categories = self.categories.lock().unwrap();
        for delta in deltas {
            if let Some(category) = categories.get_mut(&delta.category_id) {
                category.sold += delta.sold_delta;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn product(id: &str, stock: i64, sold: i64, category_id: Option<&str>) -> Product {
    let now = Utc::now();
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        stock,
        sold,
        category_id: category_id.map(str::to_string),
        created_at: now,
        updated_at: now,
    }
}

pub fn category(id: &str, sold: i64) -> Category {
    let now = Utc::now();
    Category {
        id: id.to_string(),
        name: format!("Category {id}"),
        sold,
        created_at: now,
        updated_at: now,
    }
}

pub fn order_item(product_id: &str, quantity: i64) -> OrderItem {
    OrderItem {
        product_id: product_id.to_string(),
        name: format!("Product {product_id}"),
        image: None,
        category: "fixture".to_string(),
        quantity,
        unit_price_cents: 2500,
    }
}

pub fn order(id: &str, status: PaymentStatus, items: Vec<OrderItem>) -> Order {
    let now = Utc::now();
    let total_cents = items.iter().map(|i| i.unit_price_cents * i.quantity).sum();
    Order {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        items,
        total_cents,
        payment_status: status,
        paid_at: None,
        cancelled_at: None,
        cancel_reason: None,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Harness
// =============================================================================

/// Bundles the three in-memory stores with a service wired over them.
pub struct Harness {
    pub orders: Arc<MemoryOrderStore>,
    pub products: Arc<MemoryProductStore>,
    pub categories: Arc<MemoryCategoryStore>,
    pub service: OrderStatusService<MemoryOrderStore, MemoryProductStore, MemoryCategoryStore>,
}

impl Harness {
    pub fn new() -> Self {
        // Log capture for failing tests; ignores double-init across tests.
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let orders = Arc::new(MemoryOrderStore::default());
        let products = Arc::new(MemoryProductStore::default());
        let categories = Arc::new(MemoryCategoryStore::default());
        let service =
            OrderStatusService::new(orders.clone(), products.clone(), categories.clone());

        Harness {
            orders,
            products,
            categories,
            service,
        }
    }

    /// Snapshot of (stock, sold) per product and sold per category, for
    /// asserting that an operation had zero side effects.
    pub fn counters(&self) -> (Vec<(String, i64, i64)>, Vec<(String, i64)>) {
        let mut products: Vec<(String, i64, i64)> = self
            .products
            .products
            .lock()
            .unwrap()
            .values()
            .map(|p| (p.id.clone(), p.stock, p.sold))
            .collect();
        products.sort();

        let mut categories: Vec<(String, i64)> = self
            .categories
            .categories
            .lock()
            .unwrap()
            .values()
            .map(|c| (c.id.clone(), c.sold))
            .collect();
        categories.sort();

        (products, categories)
    }
}
