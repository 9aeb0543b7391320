//! Rendering
//!
//! Pure functions from products to view models. View models keep raw text;
//! markup is produced by `to_html()`, which escapes every value taken from
//! product data. Template text (labels, class names) is inserted as-is.

use crate::config::CatalogConfig;
use crate::error::RenderError;
use crate::types::{find_product, Product};

/// Appended to truncated descriptions
pub const ELLIPSIS: char = '…';

// =============================================================================
// TEXT HELPERS
// =============================================================================

/// Escape `& < " '` for insertion into markup text or attribute values.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Cut `text` to `limit` characters, the last one being [`ELLIPSIS`].
///
/// Counts Unicode scalar values, so multi-byte text is never split mid-char.
/// A zero limit yields an empty string.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    if limit == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(limit.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

// =============================================================================
// LIST
// =============================================================================

/// Action buttons on a product card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    View,
    Delete,
}

impl CardAction {
    /// Value of the `data-action` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            CardAction::View => "view",
            CardAction::Delete => "delete",
        }
    }

    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "view" => Some(CardAction::View),
            "delete" => Some(CardAction::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: String,
    pub image: String,
    pub title: String,
    /// Already truncated
    pub description: String,
    /// Already formatted, e.g. `$12.5`
    pub price: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub cards: Vec<ProductCard>,
    pub empty_message: String,
    pub view_label: String,
    pub delete_label: String,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card markup, or the single placeholder paragraph when there are no cards.
    pub fn to_html(&self) -> String {
        if self.cards.is_empty() {
            return format!("<p class=\"empty\">{}</p>", self.empty_message);
        }

        let mut html = String::new();
        for card in &self.cards {
            let id = escape_html(&card.id);
            let title = escape_html(&card.title);
            html.push_str(&format!(
                concat!(
                    "<article class=\"card\">\n",
                    "  <img src=\"{image}\" alt=\"{title}\" />\n",
                    "  <h3>{title}</h3>\n",
                    "  <p>{description}</p>\n",
                    "  <div class=\"meta\">\n",
                    "    <div class=\"price\">{price}</div>\n",
                    "  </div>\n",
                    "  <div class=\"actions\">\n",
                    "    <button class=\"btn secondary\" data-id=\"{id}\" data-action=\"{view}\">{view_label}</button>\n",
                    "    <button class=\"btn danger\" data-id=\"{id}\" data-action=\"{delete}\">{delete_label}</button>\n",
                    "  </div>\n",
                    "</article>\n",
                ),
                image = escape_html(&card.image),
                title = title,
                description = escape_html(&card.description),
                price = escape_html(&card.price),
                id = id,
                view = CardAction::View.as_str(),
                delete = CardAction::Delete.as_str(),
                view_label = self.view_label,
                delete_label = self.delete_label,
            ));
        }
        html
    }
}

/// Build the list view for an already-filtered sequence of products.
pub fn render_list(products: &[&Product], config: &CatalogConfig) -> ListView {
    let cards = products
        .iter()
        .map(|p| ProductCard {
            id: p.id.clone(),
            image: p.image.clone(),
            title: p.title.clone(),
            description: truncate(&p.description, config.description_limit),
            price: config.format_price(&p.price_text()),
        })
        .collect();

    ListView {
        cards,
        empty_message: config.messages.empty_list.clone(),
        view_label: config.messages.view_label.clone(),
        delete_label: config.messages.delete_label.clone(),
    }
}

// =============================================================================
// DETAIL
// =============================================================================

/// Detail view fields, untruncated
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: String,
    pub image: String,
    pub title: String,
    pub description: String,
    pub price: String,
}

impl DetailView {
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                "<section class=\"detail\" data-id=\"{id}\">\n",
                "  <img src=\"{image}\" alt=\"{title}\" />\n",
                "  <h2>{title}</h2>\n",
                "  <p>{description}</p>\n",
                "  <div class=\"price\">{price}</div>\n",
                "</section>\n",
            ),
            id = escape_html(&self.id),
            image = escape_html(&self.image),
            title = escape_html(&self.title),
            description = escape_html(&self.description),
            price = escape_html(&self.price),
        )
    }
}

/// Build the detail view for `id`, or report that no such product exists.
pub fn render_detail(
    products: &[Product],
    id: &str,
    config: &CatalogConfig,
) -> Result<DetailView, RenderError> {
    let product = find_product(products, id).ok_or_else(|| RenderError::NotFound {
        id: id.to_string(),
    })?;

    Ok(DetailView {
        id: product.id.clone(),
        image: product.image.clone(),
        title: product.title.clone(),
        description: product.description.clone(),
        price: config.format_price(&product.price_text()),
    })
}

/// Whatever the host should currently display
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List(ListView),
    Detail(DetailView),
}

impl Screen {
    pub fn to_html(&self) -> String {
        match self {
            Screen::List(view) => view.to_html(),
            Screen::Detail(view) => view.to_html(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CatalogConfig {
        CatalogConfig::default()
    }

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b>&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b>"
        );
    }

    #[test]
    fn test_escape_safe_text_unchanged() {
        assert_eq!(escape_html("Plain text 123"), "Plain text 123");
    }

    #[test]
    fn test_truncate_short_unchanged() {
        assert_eq!(truncate("short", 90), "short");
        let exact = "x".repeat(90);
        assert_eq!(truncate(&exact, 90), exact);
    }

    #[test]
    fn test_truncate_long() {
        let long = "y".repeat(91);
        let out = truncate(&long, 90);
        assert_eq!(out.chars().count(), 90);
        assert_eq!(out, format!("{}…", "y".repeat(89)));
    }

    #[test]
    fn test_truncate_zero_limit() {
        assert_eq!(truncate("ab", 0), "");
        assert_eq!(truncate("", 0), "");
        assert_eq!(truncate("ab", 1), "…");
    }

    #[test]
    fn test_truncate_multibyte() {
        let long = "ə".repeat(100);
        let out = truncate(&long, 90);
        assert_eq!(out.chars().count(), 90);
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_render_list_cards() {
        let products = [
            Product::new("1", "Lamp", "Desk lamp", 25.0, "lamp.png"),
            Product::new("2", "Chair", &"z".repeat(120), 120.5, "chair.png"),
        ];
        let refs: Vec<&Product> = products.iter().collect();
        let view = render_list(&refs, &config());

        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.cards[0].price, "$25");
        assert_eq!(view.cards[1].price, "$120.5");
        assert_eq!(view.cards[1].description.chars().count(), 90);

        let html = view.to_html();
        assert_eq!(html.matches("<article class=\"card\">").count(), 2);
        assert!(html.contains("data-id=\"1\" data-action=\"view\">View</button>"));
        assert!(html.contains("data-id=\"2\" data-action=\"delete\">Delete</button>"));
    }

    #[test]
    fn test_render_empty_list_placeholder() {
        let view = render_list(&[], &config());
        assert!(view.is_empty());
        assert_eq!(view.to_html(), "<p class=\"empty\">No products found.</p>");
    }

    #[test]
    fn test_list_escapes_product_fields() {
        let product = Product::new(
            "x\"y",
            "<script>alert('t')</script>",
            "Tom & Jerry",
            1.0,
            "a.png\" onerror=\"boom",
        );
        let html = render_list(&[&product], &config()).to_html();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script>alert(&#039;t&#039;)&lt;/script>"));
        assert!(html.contains("Tom &amp; Jerry"));
        assert!(html.contains("src=\"a.png&quot; onerror=&quot;boom\""));
        assert!(html.contains("data-id=\"x&quot;y\""));
    }

    #[test]
    fn test_truncate_happens_before_escape() {
        // 89 chars then '&': the ampersand is cut by truncation, so no dangling entity
        let description = format!("{}&{}", "a".repeat(89), "b".repeat(10));
        let product = Product::new("1", "T", description, 1.0, "i");
        let html = render_list(&[&product], &config()).to_html();
        assert!(html.contains(&format!("<p>{}…</p>", "a".repeat(89))));
    }

    #[test]
    fn test_render_detail_found() {
        let products = vec![Product::new("7", "Kettle", &"long ".repeat(40), 30.0, "k.png")];
        let view = render_detail(&products, "7", &config()).unwrap();
        assert_eq!(view.title, "Kettle");
        assert_eq!(view.price, "$30");
        // detail shows the full description
        assert_eq!(view.description, "long ".repeat(40));
        assert!(view.to_html().contains("<h2>Kettle</h2>"));
    }

    #[test]
    fn test_render_detail_not_found() {
        let products = vec![Product::new("7", "Kettle", "", 30.0, "k.png")];
        assert_eq!(
            render_detail(&products, "1", &config()),
            Err(RenderError::NotFound { id: "1".to_string() })
        );
    }

    #[test]
    fn test_detail_html_escapes() {
        let products = vec![Product::new("7", "A & B", "<i>", 3.0, "'x'")];
        let html = render_detail(&products, "7", &config()).unwrap().to_html();
        assert!(html.contains("<h2>A &amp; B</h2>"));
        assert!(html.contains("<p>&lt;i></p>"));
        assert!(html.contains("src=\"&#039;x&#039;\""));
    }

    #[test]
    fn test_card_action_parse() {
        assert_eq!(CardAction::parse("view"), Some(CardAction::View));
        assert_eq!(CardAction::parse("delete"), Some(CardAction::Delete));
        assert_eq!(CardAction::parse("edit"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn escape_leaves_safe_text_unchanged(s in "[^&<\"']{0,64}") {
            prop_assert_eq!(escape_html(&s), s);
        }

        #[test]
        fn escape_is_total(s in ".{0,64}") {
            let escaped = escape_html(&s);
            // no raw '<', '"' or '\'' survive, and every '&' starts an entity
            prop_assert!(!escaped.contains('<'));
            prop_assert!(!escaped.contains('"'));
            prop_assert!(!escaped.contains('\''));
            let amps = escaped.matches('&').count();
            let entities = escaped.matches("&amp;").count()
                + escaped.matches("&lt;").count()
                + escaped.matches("&quot;").count()
                + escaped.matches("&#039;").count();
            prop_assert_eq!(amps, entities);
        }

        #[test]
        fn truncate_respects_bound(s in ".{0,200}", limit in 0usize..120) {
            let out = truncate(&s, limit);
            if s.chars().count() <= limit {
                prop_assert_eq!(out, s);
            } else {
                prop_assert_eq!(out.chars().count(), limit);
                prop_assert!(limit == 0 || out.ends_with(ELLIPSIS));
            }
        }
    }
}
