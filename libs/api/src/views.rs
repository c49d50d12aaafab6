use std::sync::Arc;

use anyhow::Context as _;
use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::response::{ApiResponse, IntoApiResponse};

/// HTML templates compiled into the binary and parsed once at startup.
#[derive(Clone, Debug)]
pub struct Views {
    tera: Arc<Tera>,
}

impl Views {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("index.html", include_str!("../templates/index.html")),
            ("new.html", include_str!("../templates/new.html")),
            ("show.html", include_str!("../templates/show.html")),
            ("edit.html", include_str!("../templates/edit.html")),
        ])
        .context("failed to parse templates")?;

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render(
        &self,
        name: &str,
        context: &impl Serialize,
    ) -> ApiResponse<Html<String>> {
        let context = Context::from_serialize(context)
            .into_response("build view context")?;

        self.render_context(name, &context)
    }

    /// Renders a template that takes no data.
    pub fn render_page(&self, name: &str) -> ApiResponse<Html<String>> {
        self.render_context(name, &Context::new())
    }

    fn render_context(
        &self,
        name: &str,
        context: &Context,
    ) -> ApiResponse<Html<String>> {
        self.tera
            .render(name, context)
            .map(Html)
            .into_response("render view")
    }
}
