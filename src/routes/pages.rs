//! Server-rendered HTML for the few pages this app owns.
//!
//! Templates live in `templates/` and are compiled into the binary. Every
//! template name ends in `.html`, so minijinja HTML-escapes each interpolated
//! value. Markup is bare: no styling, no charts.

use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::{Environment, UndefinedBehavior, context};
use serde::Serialize;

use crate::services::credentials::{Permission, SessionUser};
use crate::services::records::DashboardSummary;

const TEMPLATES: [(&str, &str); 5] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("logout.html", include_str!("../../templates/logout.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("profile.html", include_str!("../../templates/profile.html")),
];

static TEMPLATE_ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    for (name, source) in TEMPLATES {
        // A broken template surfaces again as a render error on first use.
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(error = %e, template = name, "failed to compile page template");
        }
    }
    env
});

pub type RenderResult = Result<String, minijinja::Error>;

#[derive(Serialize)]
struct MetricView<'a> {
    label: &'a str,
    value: String,
}

#[derive(Serialize)]
struct FieldView<'a> {
    label: &'static str,
    value: &'a str,
}

fn render(name: &str, ctx: minijinja::Value) -> RenderResult {
    TEMPLATE_ENV.get_template(name)?.render(ctx)
}

/// Wrap a rendered page in a response. Render failures become a bare 500.
pub fn respond(status: StatusCode, page: RenderResult) -> Response {
    match page {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "page render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Login form, optionally with an inline error and the previous username.
pub fn login_page(username: &str, message: Option<&str>) -> RenderResult {
    render("login.html", context! { username, message })
}

/// Landing page with the backend-computed metrics.
pub fn home_page(user: Option<&SessionUser>, summary: &DashboardSummary) -> RenderResult {
    let metrics: Vec<MetricView<'_>> = summary
        .metrics
        .iter()
        .map(|m| MetricView { label: &m.label, value: format!("{:.2}", m.value) })
        .collect();
    render(
        "home.html",
        context! {
            full_name => user.map(SessionUser::full_name),
            metrics,
        },
    )
}

/// Read-only view of the stored profile.
pub fn profile_page(user: Option<&SessionUser>) -> RenderResult {
    let full_name = user.map(SessionUser::full_name).unwrap_or_default();
    let fields: Vec<FieldView<'_>> = match user {
        Some(user) => vec![
            FieldView { label: "Name", value: &full_name },
            FieldView { label: "Username", value: &user.username },
            FieldView { label: "Email", value: &user.email },
            FieldView { label: "ID", value: &user.dni },
            FieldView { label: "Role", value: &user.role },
        ],
        None => Vec::new(),
    };
    let permissions: &[Permission] = user.and_then(|u| u.permissions.as_deref()).unwrap_or_default();
    render("profile.html", context! { fields, permissions })
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
