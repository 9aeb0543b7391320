//! Seed resource and startup data resolution
//!
//! On startup the stored collection wins. Only when nothing usable is stored
//! is the seed resource fetched, and a successful fetch is written straight
//! back to the store so later startups never hit the network.

use std::cell::Cell;
use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;

use crate::error::SeedError;
use crate::storage::{KeyValueStore, ProductStore};
use crate::types::Product;

/// Source of the initial product collection.
///
/// Futures are not `Send`: the browser build drives them with
/// `wasm_bindgen_futures::spawn_local`.
#[async_trait(?Send)]
pub trait SeedSource {
    async fn fetch(&self) -> Result<Vec<Product>, SeedError>;

    /// Human-readable location, for logs
    fn location(&self) -> String;
}

// =============================================================================
// HTTP
// =============================================================================

/// Fetches the seed JSON over HTTP. Works natively and on wasm32.
#[derive(Clone)]
pub struct HttpSeedSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSeedSource {
    /// Absolute seed URL
    pub fn new(url: &str) -> Result<Self, SeedError> {
        let url = Url::parse(url).map_err(|source| SeedError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self::from_url(url))
    }

    /// Seed path resolved against a base, e.g. the page URL and `products.json`
    pub fn resolve(base: &str, seed: &str) -> Result<Self, SeedError> {
        let url = join_url(base, seed).map_err(|source| SeedError::InvalidUrl {
            url: seed.to_string(),
            source,
        })?;
        Ok(Self::from_url(url))
    }

    fn from_url(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait(?Send)]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<Vec<Product>, SeedError> {
        let response = self.client.get(self.url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(SeedError::Status {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn location(&self) -> String {
        self.url.to_string()
    }
}

fn join_url(base: &str, seed: &str) -> Result<Url, url::ParseError> {
    Url::parse(base)?.join(seed)
}

/// Seed source for a page: `seed` resolved against the page URL `base`.
///
/// Pages without a usable base (`about:srcdoc`, `data:` URLs) get an
/// [`UnresolvedSeed`], so startup still reads the store and only the seed
/// fallback fails.
pub fn page_seed(base: &str, seed: &str) -> Box<dyn SeedSource> {
    match join_url(base, seed) {
        Ok(url) => Box::new(HttpSeedSource::from_url(url)),
        Err(source) => {
            tracing::warn!(base, seed, "Cannot resolve seed URL: {}", source);
            Box::new(UnresolvedSeed {
                url: seed.to_string(),
                source,
            })
        }
    }
}

/// Seed whose URL could not be resolved; every fetch fails with
/// [`SeedError::InvalidUrl`].
#[derive(Debug, Clone)]
pub struct UnresolvedSeed {
    url: String,
    source: url::ParseError,
}

#[async_trait(?Send)]
impl SeedSource for UnresolvedSeed {
    async fn fetch(&self) -> Result<Vec<Product>, SeedError> {
        Err(SeedError::InvalidUrl {
            url: self.url.clone(),
            source: self.source,
        })
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Reads the seed JSON from a local file.
#[derive(Debug, Clone)]
pub struct FileSeedSource {
    path: PathBuf,
}

impl FileSeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait(?Send)]
impl SeedSource for FileSeedSource {
    async fn fetch(&self) -> Result<Vec<Product>, SeedError> {
        let body = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// STATIC
// =============================================================================

/// Fixed seed response. Counts fetches so callers can check the store was
/// preferred.
#[derive(Debug)]
pub struct StaticSeed {
    response: StaticResponse,
    fetches: Cell<usize>,
}

#[derive(Debug)]
enum StaticResponse {
    Body(String),
    Status(u16),
}

impl StaticSeed {
    pub fn products(products: &[Product]) -> Self {
        // serializing plain structs cannot fail
        let body = serde_json::to_string(products).unwrap_or_else(|_| "[]".to_string());
        Self::body(body)
    }

    /// Raw response body, parsed on fetch
    pub fn body(body: impl Into<String>) -> Self {
        Self::with(StaticResponse::Body(body.into()))
    }

    /// Non-success HTTP status
    pub fn status(status: u16) -> Self {
        Self::with(StaticResponse::Status(status))
    }

    fn with(response: StaticResponse) -> Self {
        Self {
            response,
            fetches: Cell::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

#[async_trait(?Send)]
impl SeedSource for StaticSeed {
    async fn fetch(&self) -> Result<Vec<Product>, SeedError> {
        self.fetches.set(self.fetches.get() + 1);
        match &self.response {
            StaticResponse::Body(body) => Ok(serde_json::from_str(body)?),
            StaticResponse::Status(status) => Err(SeedError::Status { status: *status }),
        }
    }

    fn location(&self) -> String {
        "static".to_string()
    }
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Where the working collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read from the persisted store
    Stored,
    /// Fetched from the seed resource and persisted
    Seeded,
    /// Seed fetch failed; working collection is empty
    Unavailable,
}

#[derive(Debug)]
pub struct Resolution {
    pub products: Vec<Product>,
    pub origin: Origin,
}

/// Pick the startup collection: stored value, else seed (then persist it),
/// else empty.
pub async fn resolve_products<S: KeyValueStore>(
    store: &mut ProductStore<S>,
    seed: &dyn SeedSource,
) -> Resolution {
    if let Some(products) = store.load() {
        tracing::info!(count = products.len(), "Loaded products from storage");
        return Resolution {
            products,
            origin: Origin::Stored,
        };
    }

    match seed.fetch().await {
        Ok(products) => {
            tracing::info!(
                count = products.len(),
                source = %seed.location(),
                "Seeded products"
            );
            if let Err(e) = store.save(&products) {
                tracing::warn!("Failed to persist seeded products: {}", e);
            }
            Resolution {
                products,
                origin: Origin::Seeded,
            }
        }
        Err(e) => {
            tracing::warn!(source = %seed.location(), "Seed fetch failed: {}", e);
            Resolution {
                products: Vec::new(),
                origin: Origin::Unavailable,
            }
        }
    }
}
