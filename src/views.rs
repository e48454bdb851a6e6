use axum::response::{Html, IntoResponse, Response};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::Value;

use crate::error::CalcError;
use crate::store::User;

/// Pages, compiled into the binary
const PAGES: &[(&str, &str)] = &[
    ("index", include_str!("./templates/index.hbs")),
    ("login", include_str!("./templates/login.hbs")),
    ("register", include_str!("./templates/register.hbs")),
    ("trigo", include_str!("./templates/trigo.hbs")),
    ("logln", include_str!("./templates/logln.hbs")),
    ("hcflcm", include_str!("./templates/hcflcm.hbs")),
    ("qe", include_str!("./templates/qe.hbs")),
    ("stats", include_str!("./templates/stats.hbs")),
];

const PARTIALS: &[(&str, &str)] = &[
    ("header", include_str!("./templates/header.hbs")),
    ("footer", include_str!("./templates/footer.hbs")),
];

/// View model handed to every template: the current user plus page fields
#[derive(Serialize)]
struct Page<'a> {
    user: Option<&'a User>,
    #[serde(flatten)]
    body: Value,
}

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, CalcError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in PAGES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Views { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, CalcError> {
        Ok(Html(self.registry.render(name, data)?))
    }

    /// Render `name` with `user` merged into `body`
    ///
    /// `body` should be a JSON object; its keys become template variables.
    pub fn page(&self, name: &str, user: Option<&User>, body: Value) -> Response {
        match self.render(name, &Page { user, body }) {
            Ok(html) => html.into_response(),
            Err(e) => e.into_response(),
        }
    }
}
