use crate::core::{Classification, StatusRenderer, StatusSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Prints one line per evaluation to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    pub fn format_line(snapshot: &StatusSnapshot) -> String {
        let marker = match snapshot.status.classification {
            Classification::Open => "🟢",
            Classification::ClosingSoon => "🟠",
            Classification::Closed => "🔴",
        };
        format!(
            "[{}] {} {}",
            snapshot.evaluated_at.format("%Y-%m-%d %H:%M"),
            marker,
            snapshot.status.display_text
        )
    }
}

#[async_trait]
impl StatusRenderer for ConsoleRenderer {
    async fn render(&self, snapshot: &StatusSnapshot) -> Result<()> {
        println!("{}", Self::format_line(snapshot));
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
