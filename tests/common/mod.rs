#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal_macros::dec;
use tokio::sync::{mpsc, Notify};

use atelier_admin::api::{ApiResponse, BackendApi};
use atelier_admin::config::{ApiConfig, AppConfig};
use atelier_admin::errors::AdminError;
use atelier_admin::events::{self, Event};
use atelier_admin::models::{
    Category, FeaturedRef, ImageEntry, Product, ProductPayload, SizeVariant,
};
use atelier_admin::AdminContext;

/// Scriptable in-memory backend double.
///
/// Every endpoint answers success with empty data unless a response is
/// scripted; `save_product` echoes the payload back as a saved product,
/// assigning id 101 to creations. Gates let a test hold a call in flight.
pub struct MockBackend {
    products: Mutex<Result<ApiResponse<Vec<Product>>, AdminError>>,
    featured: Mutex<Result<ApiResponse<Vec<FeaturedRef>>, AdminError>>,
    categories: Mutex<Result<ApiResponse<Vec<Category>>, AdminError>>,
    save: Mutex<Option<Result<ApiResponse<Product>, AdminError>>>,
    delete: Mutex<Result<ApiResponse<()>, AdminError>>,
    toggle: Mutex<Result<ApiResponse<()>, AdminError>>,
    save_gate: Mutex<Option<Arc<Notify>>>,
    toggle_gate: Mutex<Option<Arc<Notify>>>,
    pub save_calls: AtomicUsize,
    pub toggle_calls: AtomicUsize,
    pub last_slideshow_value: Mutex<Option<bool>>,
}

pub const CREATED_ID: i64 = 101;

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            products: Mutex::new(Ok(ApiResponse::ok(Vec::new()))),
            featured: Mutex::new(Ok(ApiResponse::ok(Vec::new()))),
            categories: Mutex::new(Ok(ApiResponse::ok(Vec::new()))),
            save: Mutex::new(None),
            delete: Mutex::new(Ok(ApiResponse::ok_empty())),
            toggle: Mutex::new(Ok(ApiResponse::ok_empty())),
            save_gate: Mutex::new(None),
            toggle_gate: Mutex::new(None),
            save_calls: AtomicUsize::new(0),
            toggle_calls: AtomicUsize::new(0),
            last_slideshow_value: Mutex::new(None),
        }
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_products(&self, response: Result<ApiResponse<Vec<Product>>, AdminError>) {
        *self.products.lock().unwrap() = response;
    }

    pub fn set_featured(&self, response: Result<ApiResponse<Vec<FeaturedRef>>, AdminError>) {
        *self.featured.lock().unwrap() = response;
    }

    pub fn set_categories(&self, response: Result<ApiResponse<Vec<Category>>, AdminError>) {
        *self.categories.lock().unwrap() = response;
    }

    pub fn script_save(&self, response: Result<ApiResponse<Product>, AdminError>) {
        *self.save.lock().unwrap() = Some(response);
    }

    pub fn set_delete(&self, response: Result<ApiResponse<()>, AdminError>) {
        *self.delete.lock().unwrap() = response;
    }

    pub fn set_toggle(&self, response: Result<ApiResponse<()>, AdminError>) {
        *self.toggle.lock().unwrap() = response;
    }

    /// Hold every subsequent `save_product` call until `gate` is notified.
    pub fn hold_save(&self, gate: Arc<Notify>) {
        *self.save_gate.lock().unwrap() = Some(gate);
    }

    /// Hold every subsequent toggle call until `gate` is notified.
    pub fn hold_toggle(&self, gate: Arc<Notify>) {
        *self.toggle_gate.lock().unwrap() = Some(gate);
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn toggle_calls(&self) -> usize {
        self.toggle_calls.load(Ordering::SeqCst)
    }

    async fn wait_gate(gate: Option<Arc<Notify>>) {
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn fetch_products(&self) -> Result<ApiResponse<Vec<Product>>, AdminError> {
        self.products.lock().unwrap().clone()
    }

    async fn fetch_featured(&self) -> Result<ApiResponse<Vec<FeaturedRef>>, AdminError> {
        self.featured.lock().unwrap().clone()
    }

    async fn fetch_categories(&self) -> Result<ApiResponse<Vec<Category>>, AdminError> {
        self.categories.lock().unwrap().clone()
    }

    async fn save_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<ApiResponse<Product>, AdminError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.save_gate.lock().unwrap().clone();
        Self::wait_gate(gate).await;
        if let Some(scripted) = self.save.lock().unwrap().clone() {
            return scripted;
        }
        let id = if payload.id == 0 { CREATED_ID } else { payload.id };
        Ok(ApiResponse::ok(product_from_payload(id, payload)))
    }

    async fn delete_product(&self, _id: i64) -> Result<ApiResponse<()>, AdminError> {
        self.delete.lock().unwrap().clone()
    }

    async fn toggle_featured(&self, _id: i64) -> Result<ApiResponse<()>, AdminError> {
        self.toggle_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.toggle_gate.lock().unwrap().clone();
        Self::wait_gate(gate).await;
        self.toggle.lock().unwrap().clone()
    }

    async fn toggle_slideshow(&self, _id: i64, value: bool) -> Result<ApiResponse<()>, AdminError> {
        self.toggle_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.toggle_gate.lock().unwrap().clone();
        Self::wait_gate(gate).await;
        *self.last_slideshow_value.lock().unwrap() = Some(value);
        self.toggle.lock().unwrap().clone()
    }
}

fn product_from_payload(id: i64, payload: &ProductPayload) -> Product {
    Product {
        id,
        category_id: payload.category_id,
        name: payload.name.clone(),
        description: payload.description.clone(),
        advantages: payload.advantages.clone(),
        how_to_wear: payload.how_to_wear.clone(),
        is_active: payload.is_active,
        is_featured: false,
        is_slideshow_visible: false,
        sizes: payload.sizes.clone(),
        images: payload.images.clone(),
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        environment: "development".to_string(),
        log_level: "debug".to_string(),
        log_json: false,
        api: ApiConfig {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 5,
        },
        max_image_bytes: 5 * 1024 * 1024,
    }
}

/// Wire an [`AdminContext`] over a mock backend, returning the event
/// receiver alongside.
pub fn test_context(mock: Arc<MockBackend>) -> (AdminContext, mpsc::Receiver<Event>) {
    let (events, rx) = events::channel(32);
    let ctx = AdminContext::with_api(test_config(), mock, events);
    (ctx, rx)
}

pub fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        category_id: 1,
        name: name.to_string(),
        description: format!("{name} description"),
        advantages: String::new(),
        how_to_wear: String::new(),
        is_active: true,
        is_featured: false,
        is_slideshow_visible: false,
        sizes: vec![SizeVariant {
            size: "M".to_string(),
            price: dec!(1000),
            dummy_price: dec!(1200),
            stock: 5,
        }],
        images: vec![ImageEntry {
            data: format!("ref:{id}/main.jpg"),
            alt_text: format!("{name} image 1"),
            is_primary: true,
            is_active: true,
        }],
    }
}
