use crate::constants::prompts::PROMPT_HEADER;
use crate::structs::finding::Finding;

/// Render the findings into the prompt submitted to the completion API.
pub fn generate_prompt(findings: &[Finding]) -> String {
    let mut prompt = String::from(PROMPT_HEADER);
    for finding in findings {
        prompt.push_str(&format!(
            "🔹 **Vulnerability:** {}\n\
             📌 **Description:** {}\n\
             ⚠️ **Impact:** {}\n\
             📍 **Line(s):** {}\n\n\
             💡 **Suggested Fix:**\n\n",
            finding.check,
            finding.description,
            finding.impact,
            finding.lines_label(),
        ));
    }

    prompt
}
