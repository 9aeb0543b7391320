//! Browser shell (wasm32)
//!
//! Wires the static page to the controller. Expected element ids:
//!
//! - `listView`, `detailView`: the two view containers (toggled with `hidden`)
//! - `searchInput`, `resetBtn`: query input and reset
//! - `backBtn`, `deleteFromDetail`: detail view actions
//! - `detailImg`, `detailTitle`, `detailDesc`, `detailPrice`: detail fields
//!
//! Card buttons are handled by delegation on `listView` using their
//! `data-id` / `data-action` attributes.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlImageElement, HtmlInputElement, Storage, Window};

use crate::app::{AppEvent, CatalogApp, Host};
use crate::config::CatalogConfig;
use crate::error::StorageError;
use crate::render::{CardAction, DetailView, Screen};
use crate::seed::page_seed;
use crate::storage::KeyValueStore;

const HIDDEN: &str = "hidden";

type SharedApp = Rc<RefCell<CatalogApp<BrowserStorage>>>;

// =============================================================================
// LOCAL STORAGE
// =============================================================================

/// `window.localStorage` backend
pub struct BrowserStorage {
    storage: Option<Storage>,
}

impl BrowserStorage {
    /// Storage can be missing (privacy modes, sandboxed frames); every
    /// operation then reports `Unavailable`.
    pub fn from_window(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::warn!("localStorage unavailable; changes will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or_else(|| StorageError::Unavailable {
            message: "localStorage is not available".to_string(),
        })
    }
}

fn js_message(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: js_message(e),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: js_message(e),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                message: js_message(e),
            })
    }
}

// =============================================================================
// DOM HOST
// =============================================================================

pub struct DomHost {
    window: Window,
    document: Document,
}

impl DomHost {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            tracing::warn!(id, "Missing element");
        }
        element
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(element) = self.element(id) {
            let classes = element.class_list();
            let result = if hidden {
                classes.add_1(HIDDEN)
            } else {
                classes.remove_1(HIDDEN)
            };
            if let Err(e) = result {
                tracing::warn!(id, "Failed to toggle visibility: {}", js_message(e));
            }
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }

    fn show_detail(&self, view: &DetailView) {
        if let Some(img) = self
            .element("detailImg")
            .and_then(|e| e.dyn_into::<HtmlImageElement>().ok())
        {
            img.set_src(&view.image);
            img.set_alt(&view.title);
        }
        // text content is never parsed as markup, so no escaping here
        self.set_text("detailTitle", &view.title);
        self.set_text("detailDesc", &view.description);
        self.set_text("detailPrice", &view.price);
        if let Some(button) = self.element("deleteFromDetail") {
            if let Err(e) = button.set_attribute("data-id", &view.id) {
                tracing::warn!("Failed to tag detail delete button: {}", js_message(e));
            }
        }
    }
}

impl Host for DomHost {
    fn confirm(&mut self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn notify(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::warn!("alert failed: {}", js_message(e));
        }
    }

    fn set_fragment(&mut self, fragment: &str) {
        if let Err(e) = self.window.location().set_hash(fragment) {
            tracing::warn!("Failed to set fragment: {}", js_message(e));
        }
    }

    fn show(&mut self, screen: &Screen) {
        match screen {
            Screen::List(view) => {
                if let Some(list) = self.element("listView") {
                    list.set_inner_html(&view.to_html());
                }
                self.set_hidden("detailView", true);
                self.set_hidden("listView", false);
            }
            Screen::Detail(view) => {
                self.show_detail(view);
                self.set_hidden("listView", true);
                self.set_hidden("detailView", false);
            }
        }
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let Some(window) = web_sys::window() else {
        web_sys::console::error_1(&"catalog: no window".into());
        return;
    };
    let Some(document) = window.document() else {
        web_sys::console::error_1(&"catalog: no document".into());
        return;
    };

    wasm_bindgen_futures::spawn_local(async move {
        let location = window.location();
        let href = location.href().unwrap_or_default();
        let fragment = location.hash().unwrap_or_default();

        let backend = BrowserStorage::from_window(&window);
        let mut app = CatalogApp::new(CatalogConfig::default(), backend);
        let mut host = DomHost::new(window.clone(), document);

        // an unresolvable seed URL only fails the fallback; the store still wins
        let seed = page_seed(&href, &app.config().seed_url);
        app.start(seed.as_ref(), &fragment, &mut host).await;

        // listeners go in only after startup so no event sees a half-built app
        let app: SharedApp = Rc::new(RefCell::new(app));
        let host = Rc::new(RefCell::new(host));
        if let Err(e) = wire_events(&window, app, host) {
            tracing::error!("Failed to wire events: {}", js_message(e));
        }
    });
}

/// Register a listener that maps a DOM event to an optional [`AppEvent`].
fn listen<F>(
    target: &web_sys::EventTarget,
    kind: &str,
    app: &SharedApp,
    host: &Rc<RefCell<DomHost>>,
    to_event: F,
) -> Result<(), JsValue>
where
    F: Fn(&Event) -> Option<AppEvent> + 'static,
{
    let app = Rc::clone(app);
    let host = Rc::clone(host);
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(app_event) = to_event(&event) else {
            return;
        };
        match (app.try_borrow_mut(), host.try_borrow_mut()) {
            (Ok(mut app), Ok(mut host)) => app.handle(app_event, &mut *host),
            _ => tracing::warn!(?app_event, "Dropped event while busy"),
        }
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_events(
    window: &Window,
    app: SharedApp,
    host: Rc<RefCell<DomHost>>,
) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let by_id = |id: &str| {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))
    };

    // card buttons, by delegation
    listen(&by_id("listView")?, "click", &app, &host, |event| {
        let button = event
            .target()?
            .dyn_into::<Element>()
            .ok()?
            .closest("button")
            .ok()??;
        let id = button.get_attribute("data-id")?;
        match CardAction::parse(&button.get_attribute("data-action")?)? {
            CardAction::View => Some(AppEvent::ViewRequested(id)),
            CardAction::Delete => Some(AppEvent::DeleteRequested(id)),
        }
    })?;

    let search = by_id("searchInput")?.dyn_into::<HtmlInputElement>()?;
    {
        let input = search.clone();
        listen(&search, "input", &app, &host, move |_| {
            Some(AppEvent::QueryChanged(input.value()))
        })?;
    }

    listen(&by_id("resetBtn")?, "click", &app, &host, move |_| {
        search.set_value("");
        Some(AppEvent::QueryReset)
    })?;

    listen(&by_id("backBtn")?, "click", &app, &host, |_| {
        Some(AppEvent::BackRequested)
    })?;

    let delete_button = by_id("deleteFromDetail")?;
    {
        let button = delete_button.clone();
        listen(&delete_button, "click", &app, &host, move |_| {
            button
                .get_attribute("data-id")
                .filter(|id| !id.is_empty())
                .map(AppEvent::DeleteRequested)
        })?;
    }

    let location = window.location();
    listen(window, "hashchange", &app, &host, move |_| {
        Some(AppEvent::FragmentChanged(location.hash().unwrap_or_default()))
    })?;

    Ok(())
}
