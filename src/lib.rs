//! # Catalog Browser
//!
//! A single-page product catalog: list, free-text filter, detail view and
//! delete, persisted in a local key-value store and seeded from a static JSON
//! resource on first run.
//!
//! ## Modules
//!
//! - [`storage`]: persistence adapter over a string key-value backend
//! - [`seed`]: seed sources and startup resolution (store first, then seed)
//! - [`filter`]: query matching
//! - [`render`]: list/detail view models and escaped markup
//! - [`router`]: fragment ↔ [`Route`] mapping
//! - [`app`]: the controller tying it together behind a [`Host`]
//! - `web` (wasm32 only): DOM host, `localStorage` backend, entry point
//!
//! ## Example
//!
//! ```rust,no_run
//! use catalog_browser::{AppEvent, CatalogApp, CatalogConfig, Host, MemoryStore, Screen, StaticSeed};
//!
//! struct Stdout;
//!
//! impl Host for Stdout {
//!     fn confirm(&mut self, _message: &str) -> bool { true }
//!     fn notify(&mut self, message: &str) { eprintln!("{}", message) }
//!     fn set_fragment(&mut self, _fragment: &str) {}
//!     fn show(&mut self, screen: &Screen) { println!("{}", screen.to_html()) }
//! }
//!
//! # async fn run() {
//! let mut app = CatalogApp::new(CatalogConfig::default(), MemoryStore::new());
//! let seed = StaticSeed::body(r#"[{"id":"1","title":"A","description":"d","price":5,"image":"i"}]"#);
//! app.start(&seed, "", &mut Stdout).await;
//! app.handle(AppEvent::QueryChanged("a".into()), &mut Stdout);
//! # }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod render;
pub mod router;
pub mod seed;
pub mod storage;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{AppEvent, AppState, CatalogApp, Host};
pub use config::{CatalogConfig, Messages};
pub use error::{CatalogError, CatalogResult, ConfigError, RenderError, SeedError, StorageError};
pub use filter::filter_products;
pub use render::{escape_html, render_detail, render_list, truncate, DetailView, ListView, Screen};
pub use router::Route;
pub use seed::{
    page_seed, resolve_products, FileSeedSource, HttpSeedSource, Origin, Resolution, SeedSource,
    StaticSeed, UnresolvedSeed,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, ProductStore};
pub use types::Product;
