use serde::{Deserialize, Serialize};
use crate::enums::impact::Impact;
use crate::structs::slither_report::DetectorEntry;

/// One issue reported by the analyzer, flattened out of the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub check: String,
    pub description: String,
    pub impact: Impact,
    /// Source lines the finding points at; `None` when the analyzer gave no
    /// source mapping.
    pub lines: Option<Vec<u64>>,
}

impl Finding {
    pub fn from_detector(entry: DetectorEntry) -> Self {
        Self {
            check: entry.check.unwrap_or_else(|| "Unknown Check".to_string()),
            description: entry
                .description
                .unwrap_or_else(|| "No description provided".to_string()),
            impact: entry.impact.unwrap_or_default(),
            lines: entry.source_mapping.and_then(|mapping| mapping.lines),
        }
    }

    /// Line references formatted for reports and prompts.
    pub fn lines_label(&self) -> String {
        match &self.lines {
            Some(lines) if !lines.is_empty() => lines
                .iter()
                .map(|line| line.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            _ => "Unknown".to_string(),
        }
    }
}
