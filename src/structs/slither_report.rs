use serde::Deserialize;
use crate::enums::impact::Impact;
use crate::structs::finding::Finding;

/// JSON report written by `slither --json`. Only the detector tree is read;
/// everything else in the report is ignored.
#[derive(Debug, Deserialize)]
pub struct SlitherReport {
    #[serde(default)]
    pub results: Option<SlitherResults>,
}

#[derive(Debug, Deserialize)]
pub struct SlitherResults {
    #[serde(default)]
    pub detectors: Option<Vec<DetectorEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct DetectorEntry {
    #[serde(default)]
    pub check: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub impact: Option<Impact>,
    #[serde(default)]
    pub source_mapping: Option<SourceMapping>,
}

#[derive(Debug, Deserialize)]
pub struct SourceMapping {
    #[serde(default)]
    pub lines: Option<Vec<u64>>,
}

impl SlitherReport {
    /// Flatten `results.detectors` into findings. A report without that path
    /// yields an empty list.
    pub fn into_findings(self) -> Vec<Finding> {
        self.results
            .and_then(|results| results.detectors)
            .map(|detectors| detectors.into_iter().map(Finding::from_detector).collect())
            .unwrap_or_default()
    }
}
