//! Ledger summary display

use crate::models::CalorieSummary;

use super::format::{format_bar, format_percentage, separator};

const BAR_WIDTH: usize = 30;

/// Format the calorie dashboard
pub fn format_summary(summary: &CalorieSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Daily limit:     {:>8}\n", summary.calorie_limit));
    output.push_str(&format!("Gain/loss:       {:>8}\n", summary.total_calories));
    output.push_str(&format!("Consumed:        {:>8}\n", summary.consumed));
    output.push_str(&format!("Burned:          {:>8}\n", summary.burned));

    let remaining_note = if summary.over_limit { "  OVER LIMIT" } else { "" };
    output.push_str(&format!(
        "Remaining:       {:>8}{}\n",
        summary.remaining, remaining_note
    ));

    output.push_str(&separator(BAR_WIDTH + 8));
    output.push('\n');
    output.push_str(&format!(
        "[{}] {}",
        format_bar(summary.progress_percent, 100.0, BAR_WIDTH),
        format_percentage(summary.progress_percent)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LedgerState;

    #[test]
    fn test_summary_under_limit() {
        let mut state = LedgerState::default();
        state.total_calories = 500;
        let output = format_summary(&state.summary());

        assert!(output.contains("Remaining:           1500"));
        assert!(output.contains("25%"));
        assert!(!output.contains("OVER LIMIT"));
    }

    #[test]
    fn test_summary_over_limit() {
        let mut state = LedgerState::with_limit(100);
        state.total_calories = 250;
        let output = format_summary(&state.summary());

        assert!(output.contains("OVER LIMIT"));
        assert!(output.contains("100%"));
    }
}
