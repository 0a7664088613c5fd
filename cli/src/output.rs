//! Console output formatting for consultation results

use aida_application::ConsultationOutcome;
use colored::Colorize;

/// Formats consultation outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome with every contribution
    pub fn format(outcome: &ConsultationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Consultation Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Patient:".cyan().bold(),
            outcome.consultation.patient
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Query:".cyan().bold(),
            outcome.consultation.query
        ));

        output.push_str(&Self::section_header("Specialist Opinions"));
        for contribution in &outcome.contributions {
            let name = contribution.agent.profile().display_name;
            let title = if contribution.is_fallback() {
                format!("── {} (unavailable) ──", name).red().bold()
            } else {
                format!("── {} ({}) ──", name, contribution.confidence)
                    .yellow()
                    .bold()
            };
            output.push_str(&format!("\n{}\n{}\n", title, contribution.opinion));
            if !contribution.reasoning.is_empty() {
                output.push_str(&format!(
                    "{} {}\n",
                    "Reasoning:".dimmed(),
                    contribution.reasoning
                ));
            }
            for source in &contribution.sources {
                match &source.url {
                    Some(url) => {
                        output.push_str(&format!("  {} {} <{}>\n", "*".dimmed(), source.title, url))
                    }
                    None => output.push_str(&format!("  {} {}\n", "*".dimmed(), source.title)),
                }
            }
        }
        output.push('\n');

        output.push_str(&Self::format_summary(outcome));
        output
    }

    /// Format consensus and recommendation only (concise output)
    pub fn format_summary(outcome: &ConsultationOutcome) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Consensus"));
        output.push_str(&format!(
            "\n{} {}%\n",
            "Consensus level:".cyan().bold(),
            outcome.consensus.level
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Status:".cyan().bold(),
            outcome.consultation.status
        ));
        output.push_str(&format!(
            "\n{}\n{}\n",
            "Recommendation:".green().bold(),
            outcome.consensus.recommendation
        ));
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &ConsultationOutcome) -> String {
        let value = serde_json::json!({
            "consultation": outcome.consultation,
            "contributions": outcome.contributions,
            "consensus": {
                "level": outcome.consensus.level,
                "recommendation": outcome.consensus.recommendation,
            },
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        format!("{}\n{}\n", title.bold(), "=".repeat(title.len()))
    }

    fn section_header(title: &str) -> String {
        format!("{}\n{}\n", title.bold(), "-".repeat(title.len()))
    }
}
