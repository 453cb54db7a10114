//! Human-readable rendering of a pipeline run.

use crate::core::types::SolutionRecord;

/// Render per-agent sections followed by the final solution.
///
/// Sections of agents that stopped without a final answer carry the stop
/// reason in their header; nothing else about failures is surfaced here.
pub fn format_report(records: &[SolutionRecord], final_answer: &str) -> String {
    let mut buf = String::from("=== Agent Solutions ===\n\n");
    for record in records {
        if record.stop.is_done() {
            buf.push_str(&format!("--- {} ---\n", record.agent_name));
        } else {
            buf.push_str(&format!(
                "--- {} (stopped: {} after {} step{}) ---\n",
                record.agent_name,
                record.stop,
                record.steps,
                if record.steps == 1 { "" } else { "s" }
            ));
        }
        buf.push_str(&record.compiled_text);
        buf.push_str("\n\n");
    }
    buf.push_str("=== Final Synthesized Solution ===\n\n");
    buf.push_str(final_answer);
    buf.push_str("\n\n");
    buf
}

/// Primary console output: the final answer, then the detailed report.
pub fn render_output(records: &[SolutionRecord], final_answer: &str) -> String {
    format!(
        "Final Answer:\n{final_answer}\n\nDetailed Reasoning and Steps:\n{}",
        format_report(records, final_answer)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AgentStop;

    fn record(name: &str, text: &str, stop: AgentStop, steps: u32) -> SolutionRecord {
        SolutionRecord {
            agent_name: name.to_string(),
            compiled_text: text.to_string(),
            stop,
            steps,
        }
    }

    #[test]
    fn report_lists_sections_in_order() {
        let records = vec![
            record("a", "### Step 1: A\n1\n\n", AgentStop::FinalAnswer, 1),
            record("b", "### Step 1: B\n2\n\n", AgentStop::FinalAnswer, 1),
        ];
        let report = format_report(&records, "### Step 1: B\n2\n\n");
        assert_eq!(
            report,
            "=== Agent Solutions ===\n\n\
             --- a ---\n### Step 1: A\n1\n\n\n\n\
             --- b ---\n### Step 1: B\n2\n\n\n\n\
             === Final Synthesized Solution ===\n\n### Step 1: B\n2\n\n\n\n"
        );
    }

    #[test]
    fn failed_agents_are_flagged_but_still_listed() {
        let records = vec![
            record("solver", "### Step 1: A\n1\n\n", AgentStop::FinalAnswer, 1),
            record("reviewer", "", AgentStop::ParseFailed, 0),
            record("expert", "### Step 1: X\n\n", AgentStop::StepLimitExceeded { limit: 1 }, 1),
        ];
        let report = format_report(&records, "");
        assert!(report.contains("--- solver ---\n"));
        assert!(report.contains("--- reviewer (stopped: parse failure after 0 steps) ---\n"));
        assert!(report.contains("--- expert (stopped: step limit of 1 exceeded after 1 step) ---\n"));
        assert_eq!(report.lines().filter(|l| l.starts_with("--- ")).count(), 3);
    }

    #[test]
    fn output_leads_with_final_answer() {
        let records = vec![record("a", "x", AgentStop::FinalAnswer, 1)];
        let output = render_output(&records, "x");
        assert!(output.starts_with("Final Answer:\nx\n\nDetailed Reasoning and Steps:\n=== Agent Solutions ==="));
    }
}
