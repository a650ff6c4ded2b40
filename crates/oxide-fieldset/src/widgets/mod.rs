//! HTML widgets for field markup.
//!
//! [`BaseAttrs`] carries the attributes every field element shares; the
//! functions in [`markup`] produce the element body for each field kind.

pub mod markup;

/// Attributes shared by every rendered field element.
///
/// Rendered in a fixed order: `id`, `name`, optional `class`, then caller
/// attributes in insertion order.
#[derive(Debug, Clone, Default)]
pub struct BaseAttrs {
    /// Element id.
    pub id: String,
    /// Form field name.
    pub name: String,
    /// CSS classes.
    pub class: Option<String>,
    /// Additional attributes.
    pub extra: Vec<(String, String)>,
}

impl BaseAttrs {
    /// Creates attributes for a field name, using the name as id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            class: None,
            extra: Vec::new(),
        }
    }

    /// Sets the CSS classes. Blank values are ignored.
    #[must_use]
    pub fn class(mut self, class: Option<&str>) -> Self {
        self.class = class
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self
    }

    /// Appends an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Appends several attributes, keeping their order.
    #[must_use]
    pub fn extend<K, V>(mut self, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.extra
            .extend(attrs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Returns a copy with a different id.
    #[must_use]
    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }

    /// Renders the attributes as an HTML attribute string.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"id="{}" name="{}""#,
            html_escape(&self.id),
            html_escape(&self.name)
        );
        if let Some(class) = &self.class {
            html.push_str(&format!(r#" class="{}""#, html_escape(class)));
        }
        for (k, v) in &self.extra {
            html.push_str(&format!(r#" {}="{}""#, html_escape(k), html_escape(v)));
        }
        html
    }
}

/// Escapes HTML special characters.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
