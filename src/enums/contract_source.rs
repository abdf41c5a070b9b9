/// Contract input carried by one HTTP analysis request.
#[derive(Debug, Clone)]
pub enum ContractSource {
    /// Uploaded file: original filename plus raw bytes.
    File { filename: String, contents: Vec<u8> },
    /// Source text pasted into the `code` form field.
    Inline { code: String },
}

impl ContractSource {
    /// File extension used for the temp copy. Anything suspicious in an
    /// uploaded filename is discarded in favor of the default.
    pub fn extension(&self) -> String {
        match self {
            Self::Inline { .. } => "sol".to_string(),
            Self::File { filename, .. } => {
                let ext: String = filename
                    .rsplit_once('.')
                    .map(|(_, ext)| ext)
                    .unwrap_or("sol")
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .take(8)
                    .collect();
                if ext.is_empty() {
                    "sol".to_string()
                } else {
                    ext
                }
            }
        }
    }

    pub fn contents(&self) -> &[u8] {
        match self {
            Self::File { contents, .. } => contents,
            Self::Inline { code } => code.as_bytes(),
        }
    }
}
