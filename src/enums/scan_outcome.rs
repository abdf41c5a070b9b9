use serde::{Deserialize, Serialize};
use crate::structs::finding::Finding;

/// Result of one analyzer run. A report with zero detector entries is a
/// success, not an error, and is carried as the explicit `Clean` state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanOutcome {
    Findings(Vec<Finding>),
    Clean,
}

impl ScanOutcome {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        if findings.is_empty() {
            Self::Clean
        } else {
            Self::Findings(findings)
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    pub fn findings(&self) -> &[Finding] {
        match self {
            Self::Findings(findings) => findings,
            Self::Clean => &[],
        }
    }
}
