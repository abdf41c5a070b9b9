use crate::enums::scan_outcome::ScanOutcome;

/// Outcome of one full audit: the analyzer findings plus the generated
/// explanation text.
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub outcome: ScanOutcome,
    pub explanation: String,
}
