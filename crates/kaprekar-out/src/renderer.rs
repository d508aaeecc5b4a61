//! Template rendering for KAPREKAR-OUT.
//!
//! Uses Handlebars with HTML escaping turned off, since reports are plain
//! text. Custom helpers:
//! - pad: Left-align a value in a fixed-width column

use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};
use serde_json::Value;

use crate::templates::TemplatesFile;

/// Compiled renderer with registered helpers
pub struct TemplateRenderer<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateRenderer<'a> {
    /// Create a new renderer from a templates file
    pub fn new(templates: &TemplatesFile) -> Result<Self, String> {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);
        handlebars.register_helper("pad", Box::new(PadHelper));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| format!("Template {} is invalid: {}", name, e))?;
        }

        Ok(TemplateRenderer { handlebars })
    }

    /// Renderer over the built-in report templates
    pub fn builtin() -> Result<Self, String> {
        Self::new(&TemplatesFile::builtin()?)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Render a named template with data
    pub fn render(&self, template_name: &str, data: &Value) -> Result<String, String> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| format!("Render error: {}", e))
    }

    /// Render a template string directly (not from file)
    pub fn render_string(&self, template: &str, data: &Value) -> Result<String, String> {
        self.handlebars
            .render_template(template, data)
            .map_err(|e| format!("Render error: {}", e))
    }
}

// ============================================================================
// Custom Helpers
// ============================================================================

/// Widest column `pad` will produce
const MAX_PAD_WIDTH: usize = 80;

/// Left-align a value in a column of the given width ("6174" 8 -> "6174    ")
struct PadHelper;

impl HelperDef for PadHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let text = match h.param(0).map(|v| v.value()) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let width = h.param(1)
            .and_then(|v| v.value().as_u64())
            .map_or(0, |w| w.min(MAX_PAD_WIDTH as u64) as usize);

        out.write(&format!("{:<width$}", text, width = width))?;
        Ok(())
    }
}
