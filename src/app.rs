//! Catalog controller
//!
//! [`CatalogApp`] owns the [`AppState`] and the product store. Every user
//! intent arrives as an [`AppEvent`]; the controller updates state, persists
//! when the collection changes and hands the resulting [`Screen`] to the
//! [`Host`].
//!
//! ## Flow
//!
//! ```text
//! AppEvent ──► handle() ──► state change ──► render ──► Host::show()
//!                  │                              │
//!                  └─ delete ─► confirm ─► save   └─ route ─► Host::set_fragment()
//! ```

use crate::config::CatalogConfig;
use crate::error::RenderError;
use crate::filter::filter_products;
use crate::render::{render_detail, render_list, Screen};
use crate::router::Route;
use crate::seed::{resolve_products, Origin, SeedSource};
use crate::storage::{KeyValueStore, ProductStore};
use crate::types::Product;

/// Capabilities the controller needs from its environment (DOM, terminal, test).
///
/// All calls are synchronous; `confirm` blocks until the user answers.
pub trait Host {
    /// Ask the user to confirm a destructive action
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a user-visible notice
    fn notify(&mut self, message: &str);

    /// Publish a new fragment (empty string clears it)
    fn set_fragment(&mut self, fragment: &str);

    /// Display a rendered screen
    fn show(&mut self, screen: &Screen);
}

/// User intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Search input changed
    QueryChanged(String),
    /// Reset button: clear the query
    QueryReset,
    /// URL fragment changed outside the controller (hashchange, manual edit)
    FragmentChanged(String),
    /// "View" on a card
    ViewRequested(String),
    /// "Back" on the detail view
    BackRequested,
    /// "Delete" on a card or on the detail view
    DeleteRequested(String),
}

/// Everything the catalog knows at runtime
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub products: Vec<Product>,
    pub query: String,
    pub route: Route,
}

pub struct CatalogApp<S> {
    config: CatalogConfig,
    store: ProductStore<S>,
    state: AppState,
}

impl<S: KeyValueStore> CatalogApp<S> {
    pub fn new(config: CatalogConfig, backend: S) -> Self {
        let store = ProductStore::new(backend, config.storage_key.clone());
        Self {
            config,
            store,
            state: AppState::default(),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &ProductStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProductStore<S> {
        &mut self.store
    }

    /// Products visible in the list under the current query
    pub fn visible_products(&self) -> Vec<&Product> {
        filter_products(&self.state.products, &self.state.query)
    }

    // =========================================================================
    // STARTUP
    // =========================================================================

    /// Resolve the working collection, then route the initial fragment.
    pub async fn start(
        &mut self,
        seed: &dyn SeedSource,
        initial_fragment: &str,
        host: &mut dyn Host,
    ) -> Origin {
        let resolution = resolve_products(&mut self.store, seed).await;
        if resolution.origin == Origin::Unavailable {
            host.notify(&self.config.messages.seed_failed);
        }
        self.state.products = resolution.products;

        self.enter(Route::from_fragment(initial_fragment), host);
        resolution.origin
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    pub fn handle(&mut self, event: AppEvent, host: &mut dyn Host) {
        tracing::debug!(?event, route = %self.state.route, "Handling event");

        match event {
            AppEvent::QueryChanged(query) => {
                self.state.query = query;
                self.show_list(host);
            }
            AppEvent::QueryReset => {
                self.state.query.clear();
                self.show_list(host);
            }
            AppEvent::FragmentChanged(fragment) => {
                let route = Route::from_fragment(&fragment);
                // our own set_fragment calls echo back here
                if route != self.state.route {
                    self.enter(route, host);
                }
            }
            AppEvent::ViewRequested(id) => self.navigate(Route::Detail(id), host),
            AppEvent::BackRequested => self.navigate(Route::List, host),
            AppEvent::DeleteRequested(id) => {
                self.delete_product(&id, host);
            }
        }
    }

    /// Delete every product with `id` after user confirmation.
    ///
    /// Shared by the card and detail-view delete buttons. Returns whether the
    /// collection was changed; a declined confirmation leaves everything as is.
    pub fn delete_product(&mut self, id: &str, host: &mut dyn Host) -> bool {
        if !host.confirm(&self.config.messages.confirm_delete) {
            tracing::debug!(id, "Delete cancelled");
            return false;
        }

        let before = self.state.products.len();
        self.state.products.retain(|p| p.id != id);
        tracing::info!(id, removed = before - self.state.products.len(), "Deleted product");

        if let Err(e) = self.store.save(&self.state.products) {
            tracing::warn!("Failed to persist products after delete: {}", e);
        }

        if !self.state.route.is_list() {
            host.set_fragment(&Route::List.fragment());
        }
        self.enter(Route::List, host);
        true
    }

    // =========================================================================
    // ROUTING
    // =========================================================================

    /// Publish the route's fragment and enter it.
    fn navigate(&mut self, route: Route, host: &mut dyn Host) {
        host.set_fragment(&route.fragment());
        self.enter(route, host);
    }

    /// Switch to the list, clearing a detail fragment if one is showing.
    fn show_list(&mut self, host: &mut dyn Host) {
        if self.state.route.is_list() {
            self.enter(Route::List, host);
        } else {
            self.navigate(Route::List, host);
        }
    }

    /// Render `route` and make it current.
    ///
    /// An unknown detail id never becomes current: the user is notified and
    /// sent back to the list.
    fn enter(&mut self, route: Route, host: &mut dyn Host) {
        match route {
            Route::List => {
                self.state.route = Route::List;
                let visible = self.visible_products();
                let view = render_list(&visible, &self.config);
                host.show(&Screen::List(view));
            }
            Route::Detail(id) => match render_detail(&self.state.products, &id, &self.config) {
                Ok(view) => {
                    self.state.route = Route::Detail(id);
                    host.show(&Screen::Detail(view));
                }
                Err(RenderError::NotFound { id }) => {
                    tracing::warn!(id = %id, "Detail route for unknown product");
                    host.notify(&self.config.messages.not_found);
                    self.navigate(Route::List, host);
                }
            },
        }
    }
}
