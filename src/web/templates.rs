//! HTML templates for QABOARD.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Handlebars escapes `{{ }}` output, so user text is safe to interpolate.

use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

use crate::{QaboardError, Result};

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/partials/header.hbs")),
    ("footer", include_str!("../../templates/partials/footer.hbs")),
    ("pagination", include_str!("../../templates/partials/pagination.hbs")),
];

const TEMPLATES: &[(&str, &str)] = &[
    ("question_list", include_str!("../../templates/question_list.hbs")),
    ("question_detail", include_str!("../../templates/question_detail.hbs")),
    ("question_form", include_str!("../../templates/question_form.hbs")),
    ("answer_form", include_str!("../../templates/answer_form.hbs")),
    ("login", include_str!("../../templates/login.hbs")),
    ("signup", include_str!("../../templates/signup.hbs")),
];

// Formats an RFC 3339 timestamp for display, passing anything else through.
handlebars_helper!(format_date: |value: str| {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| value.to_string())
});

/// Registry of compiled page templates.
#[derive(Clone)]
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    /// Compile all built-in templates.
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_helper("format_date", Box::new(format_date));

        for (name, source) in PARTIALS {
            registry
                .register_partial(name, *source)
                .map_err(|e| QaboardError::Template(format!("partial {name}: {e}")))?;
        }
        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, *source)
                .map_err(|e| QaboardError::Template(format!("template {name}: {e}")))?;
        }

        Ok(Self { registry })
    }

    /// Render a named template with the given context.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        Ok(self.registry.render(name, context)?)
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates").finish()
    }
}
