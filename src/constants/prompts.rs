pub const SYSTEM_PROMPT: &str = "You are an expert Solidity security auditor.";

pub const PROMPT_HEADER: &str =
    "Explain the following Solidity vulnerabilities and suggest fixes:\n\n";

pub const NO_FINDINGS_MESSAGE: &str = "✅ No vulnerabilities found!";
