//! HTML rendering with Tera.
//!
//! Templates are compiled into the binary and parsed once on first use.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::api::extractors::Viewer;
use crate::domain::format_price_cents;
use crate::errors::{AppError, AppResult};

static TEMPLATES: Lazy<tera::Result<Tera>> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../../templates/base.html")),
        ("home.html", include_str!("../../templates/home.html")),
        ("listing_detail.html", include_str!("../../templates/listing_detail.html")),
        ("listing_form.html", include_str!("../../templates/listing_form.html")),
        (
            "listing_confirm_delete.html",
            include_str!("../../templates/listing_confirm_delete.html"),
        ),
        ("register.html", include_str!("../../templates/register.html")),
        ("login.html", include_str!("../../templates/login.html")),
        ("profile.html", include_str!("../../templates/profile.html")),
        ("profile_edit.html", include_str!("../../templates/profile_edit.html")),
        ("error.html", include_str!("../../templates/error.html")),
    ])?;
    tera.register_filter("cents", cents);
    Ok(tera)
});

fn templates() -> AppResult<&'static Tera> {
    TEMPLATES
        .as_ref()
        .map_err(|e| AppError::internal(format!("Failed to load templates: {:?}", e)))
}

/// `{{ listing.price_cents | cents }}` renders `1234.50`
fn cents(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let cents = value
        .as_i64()
        .ok_or_else(|| tera::Error::msg("cents filter expects an integer"))?;
    Ok(Value::String(format_price_cents(cents)))
}

/// A page about to be rendered.
pub struct Page {
    template: &'static str,
    status: StatusCode,
    context: Context,
}

impl Page {
    /// Page for `viewer`: the navigation and flash banner come from it.
    pub fn new(template: &'static str, viewer: &Viewer) -> Self {
        let mut context = Context::new();
        context.insert("current_user", &viewer.user);
        if let Some(flash) = viewer.flash {
            context.insert("flash", flash.message());
            context.insert("flash_is_error", &flash.is_error());
        }

        Self {
            template,
            status: StatusCode::OK,
            context,
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.context.insert(key, value);
        self
    }

    pub fn render(&self) -> AppResult<String> {
        Ok(templates()?.render(self.template, &self.context)?)
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(e) => e.into_response(),
        }
    }
}

/// Standalone error page; falls back to plain text if rendering fails.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let mut context = Context::new();
    context.insert("status", &status.as_u16());
    context.insert("reason", status.canonical_reason().unwrap_or("Error"));
    context.insert("message", message);

    let rendered = templates().and_then(|t| Ok(t.render("error.html", &context)?));
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {:?}", e);
            (status, message.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::flash::Flash;
    use crate::domain::CurrentUser;

    #[test]
    fn test_all_templates_parse() {
        assert!(templates().is_ok());
    }

    #[test]
    fn test_cents_filter() {
        let out = cents(&Value::from(123450), &HashMap::new()).unwrap();
        assert_eq!(out, Value::String("1234.50".to_string()));
        assert!(cents(&Value::from("abc"), &HashMap::new()).is_err());
    }

    #[test]
    fn test_error_page_shows_message() {
        let page = {
            let mut context = Context::new();
            context.insert("status", &404);
            context.insert("reason", "Not Found");
            context.insert("message", "Page not found");
            templates().unwrap().render("error.html", &context).unwrap()
        };
        assert!(page.contains("Page not found"));
    }

    #[test]
    fn test_page_includes_viewer_and_flash() {
        let viewer = Viewer {
            user: Some(CurrentUser {
                id: uuid::Uuid::new_v4(),
                username: "alice".to_string(),
            }),
            flash: Some(Flash::ListingDeleted),
        };

        let html = Page::new("login.html", &viewer)
            .with("form", &crate::forms::LoginForm::default())
            .render()
            .unwrap();

        assert!(html.contains("alice"));
        assert!(html.contains("Listing deleted."));
    }

    #[test]
    fn test_output_is_escaped() {
        let html = Page::new("error.html", &Viewer::default())
            .with("status", &400)
            .with("reason", "Bad Request")
            .with("message", "<script>alert(1)</script>")
            .render()
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
