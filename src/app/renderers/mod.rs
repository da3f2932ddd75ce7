pub mod console_renderer;
pub mod html_renderer;
pub mod json_renderer;

use crate::core::{StatusRenderer, StatusSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;

pub use console_renderer::ConsoleRenderer;
pub use html_renderer::HtmlBadgeRenderer;
pub use json_renderer::JsonRenderer;

/// Fans each snapshot out to every renderer, in insertion order.
///
/// All renderers run even if an earlier one fails; the first error is returned.
#[derive(Default)]
pub struct RendererSet {
    renderers: Vec<Box<dyn StatusRenderer>>,
}

impl RendererSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, renderer: impl StatusRenderer + 'static) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.renderers.iter().map(|r| r.name()).collect()
    }
}

#[async_trait]
impl StatusRenderer for RendererSet {
    async fn render(&self, snapshot: &StatusSnapshot) -> Result<()> {
        let mut first_error = None;
        for renderer in &self.renderers {
            if let Err(e) = renderer.render(snapshot).await {
                tracing::warn!("Renderer {} failed: {}", renderer.name(), e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "renderer-set"
    }
}
