//! Mustache sections
//!
//! Handlebars only opens blocks on helper names and has no stand-alone
//! inverted blocks, so `{{#path}}` and `{{^path}}` are rewritten into the
//! `section` and `inverted_section` helpers before rendering. A section over
//! a list renders once per item, over an object renders with the object's
//! fields layered on the enclosing scope, and over any other truthy value
//! renders once in the enclosing scope.

use std::borrow::Cow;

use handlebars::{
    BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult, JsonTruthy, Output,
    RenderContext, Renderable, Template,
};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;

/// Helper rendering a Mustache `{{#name}}` section
pub const SECTION_HELPER: &str = "section";

/// Helper rendering a Mustache `{{^name}}` inverted section
pub const INVERTED_SECTION_HELPER: &str = "inverted_section";

lazy_static! {
    static ref SECTION_TAG: Regex = Regex::new(r"\{\{\s*([#^/])\s*([\w.\-]+)\s*\}\}").unwrap();
    static ref IMPLICIT_ITERATOR: Regex = Regex::new(r"\{\{(\{?)\s*\.\s*(\}?)\}\}").unwrap();
}

/// Rewrites Mustache section tags into helper blocks.
///
/// Only a closing tag that matches the innermost open section is rewritten;
/// anything else is left for Handlebars to report.
pub fn translate(template: &str) -> Cow<'_, str> {
    let mut open: Vec<(String, &'static str)> = Vec::new();

    let translated = SECTION_TAG.replace_all(template, |caps: &Captures<'_>| {
        let name = &caps[2];

        match &caps[1] {
            "#" => {
                open.push((name.to_string(), SECTION_HELPER));
                format!("{{{{#{} {}}}}}", SECTION_HELPER, name)
            }
            "^" => {
                open.push((name.to_string(), INVERTED_SECTION_HELPER));
                format!("{{{{#{} {}}}}}", INVERTED_SECTION_HELPER, name)
            }
            _ => match open.last() {
                Some((opened, helper)) if opened == name => {
                    let closing = format!("{{{{/{}}}}}", helper);
                    open.pop();
                    closing
                }
                _ => caps[0].to_string(),
            },
        }
    });

    match translated {
        Cow::Borrowed(_) => IMPLICIT_ITERATOR.replace_all(template, "{{${1}this${2}}}"),
        Cow::Owned(owned) => Cow::Owned(
            IMPLICIT_ITERATOR
                .replace_all(&owned, "{{${1}this${2}}}")
                .into_owned(),
        ),
    }
}

/// Registers the section helpers on `registry`
pub fn register(registry: &mut Handlebars<'static>) {
    registry.register_helper(SECTION_HELPER, Box::new(SectionHelper { inverted: false }));
    registry.register_helper(
        INVERTED_SECTION_HELPER,
        Box::new(SectionHelper { inverted: true }),
    );
}

#[derive(Clone, Copy)]
struct SectionHelper {
    inverted: bool,
}

impl HelperDef for SectionHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h
            .param(0)
            .map(|param| param.value().clone())
            .unwrap_or(Value::Null);

        let Some(template) = h.template() else {
            return Ok(());
        };

        if self.inverted {
            if !value.is_truthy(false) {
                template.render(r, ctx, rc, out)?;
            }
            return Ok(());
        }

        match value {
            Value::Array(items) => {
                for item in items {
                    render_in_scope(item, template, r, ctx, rc, out)?;
                }
                Ok(())
            }
            Value::Object(_) => render_in_scope(value, template, r, ctx, rc, out),
            other if other.is_truthy(false) => template.render(r, ctx, rc, out),
            _ => Ok(()),
        }
    }
}

fn render_in_scope<'reg: 'rc, 'rc>(
    item: Value,
    template: &'rc Template,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> HelperResult {
    let enclosing = rc.evaluate(ctx, "this")?.as_json().clone();

    let scope = match (enclosing, item) {
        (Value::Object(mut fields), Value::Object(item_fields)) => {
            fields.extend(item_fields);
            Value::Object(fields)
        }
        (_, item) => item,
    };

    let mut block = BlockContext::new();
    block.set_base_value(scope);
    rc.push_block(block);

    let result = template.render(r, ctx, rc, out);

    rc.pop_block();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_sections() {
        assert_eq!(
            translate("{{#client.company}}of {{client.company}}{{/client.company}}"),
            "{{#section client.company}}of {{client.company}}{{/section}}"
        );
        assert_eq!(
            translate("{{^items}}none{{/items}}"),
            "{{#inverted_section items}}none{{/inverted_section}}"
        );
        assert_eq!(
            translate("{{#a}}{{#b}}x{{/b}}{{/a}}"),
            "{{#section a}}{{#section b}}x{{/section}}{{/section}}"
        );
    }

    #[test]
    fn test_translate_leaves_other_tags() {
        assert_eq!(translate("Hello {{name}}"), "Hello {{name}}");
        assert_eq!(
            translate("{{#if ok}}yes{{/if}}"),
            "{{#if ok}}yes{{/if}}"
        );
        assert_eq!(translate("{{#items}}{{.}}{{/items}}"), "{{#section items}}{{this}}{{/section}}");
    }
}
