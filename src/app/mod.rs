// Application layer: concrete rendering adapters for store status snapshots.

pub mod renderers;

use crate::config::cli::LocalStorage;
use renderers::{ConsoleRenderer, HtmlBadgeRenderer, JsonRenderer, RendererSet};

/// Assembles the renderers requested by the configuration.
pub fn build_renderers(
    output_path: &str,
    console: bool,
    page: Option<&str>,
    status_json: Option<&str>,
) -> RendererSet {
    let mut set = RendererSet::new();

    if console {
        set = set.with(ConsoleRenderer);
    }
    if let Some(page) = page {
        let storage = LocalStorage::new(output_path.to_string());
        set = set.with(HtmlBadgeRenderer::new(storage, page.to_string()));
    }
    if let Some(json) = status_json {
        let storage = LocalStorage::new(output_path.to_string());
        set = set.with(JsonRenderer::new(storage, json.to_string()));
    }

    set
}
