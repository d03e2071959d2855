//! Variable renderer
//!
//! Logic-less `{{variable}}` substitution over a JSON data mapping, backed by
//! Handlebars with Mustache sections. Missing variables render as empty
//! strings.

use std::{fmt, sync::Arc};

use handlebars::{no_escape, Handlebars};
use serde_json::{Map, Value};
use tracing::warn;

use super::entities::decode_html_entities;

mod sections;

/// Data made available to templates
pub type TemplateData = Map<String, Value>;

/// The reserved key holding the global settings bundle
pub const SETTINGS_KEY: &str = "settings";

/// Renders template strings against [`TemplateData`]
#[derive(Clone)]
pub struct Renderer {
    plain: Arc<Handlebars<'static>>,
    html: Arc<Handlebars<'static>>,
}

impl Renderer {
    /// Creates a new renderer
    pub fn new() -> Self {
        let mut plain = Handlebars::new();
        plain.register_escape_fn(no_escape);
        sections::register(&mut plain);

        let mut html = Handlebars::new();
        sections::register(&mut html);

        Self {
            plain: Arc::new(plain),
            html: Arc::new(html),
        }
    }

    /// Renders a subject or plain text body; values are inserted verbatim.
    pub fn render(&self, template: &str, data: &TemplateData) -> String {
        Self::render_with(&self.plain, template, data)
    }

    /// Renders an HTML body; values are HTML-escaped as they are inserted.
    pub fn render_html(&self, template: &str, data: &TemplateData) -> String {
        Self::render_with(&self.html, template, data)
    }

    fn render_with(registry: &Handlebars<'static>, template: &str, data: &TemplateData) -> String {
        let data = decode_settings(data);

        match registry.render_template(&sections::translate(template), &data) {
            Ok(rendered) => rendered,
            Err(err) => {
                warn!("could not render template, sending it unrendered: {}", err);
                template.to_string()
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

/// Settings are stored HTML-escaped; decode their strings (and the strings one
/// level down) so they render as configured.
fn decode_settings(data: &TemplateData) -> TemplateData {
    let mut data = data.clone();

    let decode = |value: &mut Value| {
        if let Value::String(raw) = value {
            *raw = decode_html_entities(raw).into_owned();
        }
    };

    if let Some(Value::Object(settings)) = data.get_mut(SETTINGS_KEY) {
        for item in settings.values_mut() {
            match item {
                Value::Object(nested) => nested.values_mut().for_each(decode),
                Value::Array(nested) => nested.iter_mut().for_each(decode),
                _ => decode(item),
            }
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn data(value: Value) -> TemplateData {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test data must be an object"),
        }
    }

    #[test]
    fn test_render_substitutes_variables() {
        let renderer = Renderer::new();

        assert_eq!(
            renderer.render("Hello {{name}}", &data(json!({"name": "Ada"}))),
            "Hello Ada"
        );
    }

    #[test]
    fn test_missing_variable_renders_empty() {
        let renderer = Renderer::new();

        assert_eq!(renderer.render("Hello {{name}}", &TemplateData::new()), "Hello ");
    }

    #[test]
    fn test_nested_lookup() {
        let renderer = Renderer::new();
        let data = data(json!({"client": {"first_name": "Grace", "id": 4}}));

        assert_eq!(
            renderer.render("Dear {{client.first_name}} (#{{client.id}})", &data),
            "Dear Grace (#4)"
        );
    }

    #[test]
    fn test_settings_are_entity_decoded() {
        let renderer = Renderer::new();
        let data = data(json!({"settings": {"amp": "&amp;"}}));

        assert_eq!(renderer.render("{{settings.amp}}", &data), "&");
    }

    #[test]
    fn test_nested_settings_are_entity_decoded() {
        let renderer = Renderer::new();
        let data = data(json!({
            "settings": {"general": {"sitename": "Tom &amp; Jerry&#039;s"}}
        }));

        assert_eq!(
            renderer.render("{{settings.general.sitename}}", &data),
            "Tom & Jerry's"
        );
    }

    #[test]
    fn test_values_outside_settings_are_not_decoded() {
        let renderer = Renderer::new();
        let data = data(json!({"note": "&amp;"}));

        assert_eq!(renderer.render("{{note}}", &data), "&amp;");
    }

    #[test]
    fn test_html_rendering_escapes_values() {
        let renderer = Renderer::new();
        let data = data(json!({"name": "<b>Ada</b>"}));

        assert_eq!(
            renderer.render_html("<p>{{name}}</p>", &data),
            "<p>&lt;b&gt;Ada&lt;/b&gt;</p>"
        );
        assert_eq!(renderer.render("{{name}}", &data), "<b>Ada</b>");
    }

    #[test]
    fn test_section_over_a_value_keeps_the_enclosing_scope() {
        let renderer = Renderer::new();
        let template =
            "Hi {{client.first_name}}{{#client.company}} of {{client.company}}{{/client.company}}";

        assert_eq!(
            renderer.render(
                template,
                &data(json!({"client": {"company": "Acme", "first_name": "Ada"}}))
            ),
            "Hi Ada of Acme"
        );
        assert_eq!(
            renderer.render(template, &data(json!({"client": {"first_name": "Ada"}}))),
            "Hi Ada"
        );
    }

    #[test]
    fn test_inverted_section() {
        let renderer = Renderer::new();
        let template = "{{^invoices}}Nothing due, {{name}}{{/invoices}}";

        assert_eq!(
            renderer.render(template, &data(json!({"name": "Ada", "invoices": []}))),
            "Nothing due, Ada"
        );
        assert_eq!(
            renderer.render(template, &data(json!({"name": "Ada", "invoices": [{"id": 1}]}))),
            ""
        );
    }

    #[test]
    fn test_section_over_a_list_sees_outer_names() {
        let renderer = Renderer::new();
        let data = data(json!({
            "currency": "EUR",
            "invoices": [{"id": 1, "total": "10"}, {"id": 2, "total": "25"}],
            "tags": ["new", "vip"]
        }));

        assert_eq!(
            renderer.render("{{#invoices}}#{{id}} {{total}} {{currency}}; {{/invoices}}", &data),
            "#1 10 EUR; #2 25 EUR; "
        );
        assert_eq!(renderer.render("{{#tags}}[{{.}}]{{/tags}}", &data), "[new][vip]");
    }

    #[test]
    fn test_section_over_an_object_in_html() {
        let renderer = Renderer::new();
        let data = data(json!({"staff": {"first_name": "<Grace>"}, "site": "Acme"}));

        assert_eq!(
            renderer.render_html("{{#staff}}<p>{{first_name}} at {{site}}</p>{{/staff}}", &data),
            "<p>&lt;Grace&gt; at Acme</p>"
        );
    }

    #[test]
    fn test_malformed_template_is_returned_unrendered() {
        let renderer = Renderer::new();

        assert_eq!(renderer.render("Hello {{#if}}", &TemplateData::new()), "Hello {{#if}}");
    }
}
