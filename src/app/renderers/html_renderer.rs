use crate::core::{StatusRenderer, StatusSnapshot, Storage};
use crate::utils::error::{Result, StatusError};
use async_trait::async_trait;
use regex::Regex;

pub const STATUS_TEXT_ID: &str = "store-status-text";
pub const STATUS_DOT_ID: &str = "store-status-dot";
pub const CURRENT_YEAR_ID: &str = "current-year";

/// Patches the status badge and footer year of a static HTML page in place.
///
/// Elements are located by `id`. Missing elements are skipped: the page is
/// still rewritten with whatever targets were found.
pub struct HtmlBadgeRenderer<S: Storage> {
    storage: S,
    page: String,
}

impl<S: Storage> HtmlBadgeRenderer<S> {
    pub fn new(storage: S, page: String) -> Self {
        Self { storage, page }
    }

    pub fn patch(&self, html: &str, snapshot: &StatusSnapshot) -> Result<String> {
        let mut html = html.to_string();

        let year = snapshot.copyright_year.to_string();
        let patches: [(&str, Patch<'_>); 3] = [
            (STATUS_TEXT_ID, Patch::Text(&snapshot.status.display_text)),
            (STATUS_DOT_ID, Patch::Color(&snapshot.status.indicator_color)),
            (CURRENT_YEAR_ID, Patch::Text(&year)),
        ];

        for (id, patch) in patches {
            let updated = match patch {
                Patch::Text(text) => set_inner_text(&html, id, text)?,
                Patch::Color(color) => set_style_color(&html, id, color)?,
            };
            match updated {
                Some(next) => html = next,
                None => tracing::debug!("Element #{} not found in {}, skipping", id, self.page),
            }
        }

        Ok(html)
    }
}

enum Patch<'a> {
    Text(&'a str),
    Color(&'a str),
}

#[async_trait]
impl<S: Storage> StatusRenderer for HtmlBadgeRenderer<S> {
    async fn render(&self, snapshot: &StatusSnapshot) -> Result<()> {
        let bytes = self.storage.read_file(&self.page).await?;
        let html = String::from_utf8(bytes).map_err(|e| StatusError::RenderError {
            target: self.page.clone(),
            message: format!("page is not valid UTF-8: {}", e),
        })?;

        let patched = self.patch(&html, snapshot)?;
        if patched != html {
            self.storage.write_file(&self.page, patched.as_bytes()).await?;
            tracing::debug!("Updated status badge in {}", self.page);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "html"
    }
}

fn open_tag_pattern(id: &str) -> String {
    format!(
        r#"<([A-Za-z][A-Za-z0-9-]*)[^>]*\sid\s*=\s*["']{}["'][^>]*>"#,
        regex::escape(id)
    )
}

/// Replaces the whole content of the element with the given id by `text`,
/// nested markup included.
///
/// Returns `None` when no such element exists, and an error when the element
/// exists but has no content to replace (self-closing or never closed).
pub fn set_inner_text(html: &str, id: &str, text: &str) -> Result<Option<String>> {
    let open_re = Regex::new(&open_tag_pattern(id))?;
    let Some(caps) = open_re.captures(html) else {
        return Ok(None);
    };
    let (Some(open), Some(name)) = (caps.get(0), caps.get(1)) else {
        return Ok(None);
    };

    if open.as_str().ends_with("/>") {
        return Err(StatusError::RenderError {
            target: format!("#{}", id),
            message: "element is self-closing and cannot hold text".to_string(),
        });
    }

    let content_start = open.end();
    let content_end = matching_close(html, name.as_str(), content_start)?.ok_or_else(|| {
        StatusError::RenderError {
            target: format!("#{}", id),
            message: format!("<{}> is never closed", name.as_str()),
        }
    })?;

    let mut out = String::with_capacity(html.len() + text.len());
    out.push_str(&html[..content_start]);
    out.push_str(&escape_text(text));
    out.push_str(&html[content_end..]);
    Ok(Some(out))
}

// 回傳對應結束標籤的起始位置，同名標籤巢狀時依深度配對
fn matching_close(html: &str, name: &str, from: usize) -> Result<Option<usize>> {
    let tag_re = Regex::new(&format!(r"(?i)</?{}(?:\s[^>]*)?>", regex::escape(name)))?;

    let mut depth = 1usize;
    for tag in tag_re.find_iter(&html[from..]) {
        let tag_text = tag.as_str();
        if tag_text.starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return Ok(Some(from + tag.start()));
            }
        } else if !tag_text.ends_with("/>") {
            depth += 1;
        }
    }
    Ok(None)
}

/// Sets the inline `color` of the element with the given id, keeping any
/// other inline declarations.
pub fn set_style_color(html: &str, id: &str, color: &str) -> Result<Option<String>> {
    let tag_re = Regex::new(&open_tag_pattern(id))?;
    let Some(tag) = tag_re.find(html) else {
        return Ok(None);
    };

    let style_re = Regex::new(r#"\sstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#)?;
    let tag_text = tag.as_str();
    let patched_tag = match style_re
        .captures(tag_text)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
    {
        Some(style) => {
            let mut declarations: Vec<String> = style
                .as_str()
                .split(';')
                .map(str::trim)
                .filter(|decl| !decl.is_empty())
                .filter(|decl| {
                    let property = decl.split(':').next().unwrap_or_default();
                    !property.trim().eq_ignore_ascii_case("color")
                })
                .map(str::to_string)
                .collect();
            declarations.push(format!("color: {}", color));

            format!(
                "{}{}{}",
                &tag_text[..style.start()],
                declarations.join("; "),
                &tag_text[style.end()..]
            )
        }
        None => {
            let cut = if tag_text.ends_with("/>") {
                tag_text.len() - 2
            } else {
                tag_text.len() - 1
            };
            format!(
                "{} style=\"color: {}\"{}",
                tag_text[..cut].trim_end(),
                color,
                &tag_text[cut..]
            )
        }
    };

    let mut out = String::with_capacity(html.len() + color.len() + 16);
    out.push_str(&html[..tag.start()]);
    out.push_str(&patched_tag);
    out.push_str(&html[tag.end()..]);
    Ok(Some(out))
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
