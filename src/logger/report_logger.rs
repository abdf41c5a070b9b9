use crate::constants::prompts::NO_FINDINGS_MESSAGE;
use crate::enums::scan_outcome::ScanOutcome;

pub struct ReportLogger {}

impl ReportLogger {
    pub fn print_security_report(outcome: &ScanOutcome) {
        println!("\n===== SECURITY REPORT =====");
        println!("🕒 Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

        match outcome {
            ScanOutcome::Clean => {
                println!("{}", NO_FINDINGS_MESSAGE);
            }
            ScanOutcome::Findings(findings) => {
                println!("🔧 {} issue(s) detected:\n", findings.len());
                for (i, finding) in findings.iter().enumerate() {
                    println!(
                        "{}. {} {} [{}]",
                        i + 1,
                        finding.impact.emoji(),
                        finding.check,
                        finding.impact
                    );
                    println!("   📍 Line(s): {}", finding.lines_label());
                    println!("   {}", finding.description.trim());
                }
            }
        }
    }

    pub fn print_explanation(explanation: &str) {
        println!("\n===== AI-Powered Explanations =====");
        println!("{}", explanation);
    }
}
