use std::fmt;
use serde::{Deserialize, Serialize};

/// Severity assigned by the analyzer to a single finding. Values outside the
/// known set (e.g. "Optimization") fold into `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Impact {
    #[default]
    Unknown,
    Low,
    Medium,
    High,
    Informational,
}

impl From<String> for Impact {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            "Informational" => Self::Informational,
            _ => Self::Unknown,
        }
    }
}

impl Impact {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::High => "🔴",
            Self::Medium => "🟠",
            Self::Low => "🟡",
            Self::Informational => "🔵",
            Self::Unknown => "⚪",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Informational => "Informational",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
