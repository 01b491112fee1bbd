use super::types::CallReport;
use std::fmt::Write as _;

const RULE_WIDTH: usize = 70;

impl CallReport {
    /// Human-readable coaching report.
    pub fn render_text(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, " CALL COACHING REPORT");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(out, "\n{}", self.totals.headline());

        push_section(&mut out, "✓ KEY WINS:", &self.key_wins);
        push_section(&mut out, "⚠️  AREAS FOR IMPROVEMENT:", &self.improvement_areas);
        push_section(
            &mut out,
            "💡 TECHNIQUE RECOMMENDATIONS:",
            &self.technique_recommendations,
        );

        if !self.missed_opportunities.is_empty() {
            let _ = writeln!(out, "\n🎯 MISSED OPPORTUNITIES:");
            for opportunity in &self.missed_opportunities {
                let _ = writeln!(
                    out,
                    "\n  [{}] {}",
                    opportunity.timestamp_label(),
                    opportunity.context
                );
                let _ = writeln!(out, "    → Suggested: {}", opportunity.suggestion);
                let _ = writeln!(out, "    → Example: {}", opportunity.example);
            }
        }

        let _ = write!(out, "\n{rule}\n");
        out
    }
}

fn push_section(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}");
    for item in items {
        let _ = writeln!(out, "  • {item}");
    }
}
