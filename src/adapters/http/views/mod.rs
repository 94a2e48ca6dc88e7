//! Server-rendered HTML.
//!
//! Pages are handlebars templates compiled into the binary and rendered in
//! two passes: the page body, then `layout` around it. Handlebars escapes
//! every `{{value}}`; links and image sources built from user data go
//! through the `safe_url` helper, which also drops unsafe schemes.
//!
//! Every form includes the `csrf_field` partial, which reads the request's
//! token from the root of the page data.

mod auth;
mod settings;
mod wines;

pub use settings::CheckoutOutcome;
pub use wines::WineFormMode;

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::account::User;
use crate::domain::cellar::safe_url;

const TEMPLATES: [(&str, &str); 8] = [
    ("layout", include_str!("templates/layout.hbs")),
    ("landing", include_str!("templates/landing.hbs")),
    ("login", include_str!("templates/login.hbs")),
    ("signup", include_str!("templates/signup.hbs")),
    ("settings", include_str!("templates/settings.hbs")),
    ("wine_list", include_str!("templates/wine_list.hbs")),
    ("wine_details", include_str!("templates/wine_details.hbs")),
    ("wine_form", include_str!("templates/wine_form.hbs")),
];

const CSRF_FIELD: &str = r#"<input type="hidden" name="csrf_token" value="{{@root.csrf_token}}">"#;

/// The compiled page templates.
#[derive(Debug)]
pub struct Views {
    handlebars: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();

        handlebars.register_helper("safe_url", Box::new(safe_url_helper));
        handlebars.register_partial("csrf_field", CSRF_FIELD)?;
        for (name, source) in TEMPLATES {
            handlebars.register_template_string(name, source)?;
        }

        Ok(Self { handlebars })
    }

    /// Renders `template` with `data` and the form token, then wraps the
    /// result in the layout.
    fn page(
        &self,
        template: &str,
        title: &str,
        nav: Nav<'_>,
        csrf_token: &str,
        mut data: Value,
    ) -> Result<String, RenderError> {
        if let Value::Object(fields) = &mut data {
            fields.insert("csrf_token".to_string(), Value::from(csrf_token));
        }
        let body = self.handlebars.render(template, &data)?;
        self.handlebars.render(
            "layout",
            &json!({ "title": title, "nav": nav, "body": body }),
        )
    }
}

/// `{{safe_url value}}`: the URL escaped for an attribute, or nothing when
/// the scheme isn't allowed.
fn safe_url_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let raw = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&handlebars::html_escape(safe_url(raw)))?;
    Ok(())
}

/// Navigation state for the page header.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Nav<'a> {
    pub email: Option<&'a str>,
    pub is_pro: bool,
}

impl<'a> Nav<'a> {
    pub fn anonymous() -> Self {
        Self {
            email: None,
            is_pro: false,
        }
    }

    pub fn signed_in(user: &'a User) -> Self {
        Self {
            email: Some(user.email.as_str()),
            is_pro: user.is_pro(),
        }
    }
}

/// `<select>` entries with the current value marked.
fn options<'a>(values: impl IntoIterator<Item = &'a str>, current: &str) -> Vec<Value> {
    values
        .into_iter()
        .map(|value| json!({ "value": value, "selected": value == current }))
        .collect()
}
