//! Element bodies for each field kind.

use super::{html_escape, BaseAttrs};

/// Renders a single `<input>` of the given type, echoing the value if set.
#[must_use]
pub fn input(input_type: &str, attrs: &BaseAttrs, value: Option<&str>) -> String {
    let value_attr = value
        .map(|v| format!(r#" value="{}""#, html_escape(v)))
        .unwrap_or_default();
    format!(
        r#"<input type="{input_type}" {}{value_attr}>"#,
        attrs.to_html()
    )
}

/// Renders a checkbox, checked when `checked` is true.
#[must_use]
pub fn checkbox(attrs: &BaseAttrs, checked: bool) -> String {
    let checked_attr = if checked { " checked" } else { "" };
    format!(
        r#"<input type="checkbox" {} value="1"{checked_attr}>"#,
        attrs.to_html()
    )
}

/// Renders a `<select>` with one option per choice.
#[must_use]
pub fn select(attrs: &BaseAttrs, choices: &[(String, String)], value: Option<&str>) -> String {
    let mut options = String::new();
    for (opt_value, label) in choices {
        let selected = value.is_some_and(|v| v == opt_value);
        let selected_attr = if selected { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{}"{selected_attr}>{}</option>"#,
            html_escape(opt_value),
            html_escape(label)
        ));
    }
    format!("<select {}>{options}</select>", attrs.to_html())
}

/// Renders one labelled radio input per choice.
#[must_use]
pub fn radio_series(attrs: &BaseAttrs, choices: &[(String, String)], value: Option<&str>) -> String {
    let mut html = String::new();
    for (i, (opt_value, label)) in choices.iter().enumerate() {
        let item = attrs.with_id(format!("{}_{i}", attrs.id));
        let checked = value.is_some_and(|v| v == opt_value);
        let checked_attr = if checked { " checked" } else { "" };
        html.push_str(&format!(
            r#"<div class="form-check"><input type="radio" {} value="{}"{checked_attr}><label for="{}">{}</label></div>"#,
            item.to_html(),
            html_escape(opt_value),
            html_escape(&item.id),
            html_escape(label)
        ));
    }
    html
}

/// Renders a `<textarea>` with the value as content.
#[must_use]
pub fn textarea(attrs: &BaseAttrs, value: Option<&str>) -> String {
    let content = value.map(html_escape).unwrap_or_default();
    format!("<textarea {}>{content}</textarea>", attrs.to_html())
}

/// Renders a file upload input. Values are never echoed.
#[must_use]
pub fn file_upload(attrs: &BaseAttrs) -> String {
    format!(r#"<input type="file" {}>"#, attrs.to_html())
}
