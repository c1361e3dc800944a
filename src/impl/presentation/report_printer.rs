use iso_currency::Currency;

use crate::entities::{Metrics, ReportConfig, ReportPage, ReportRow, ViewMode};

use super::utils::format_amount;

const LABEL_WIDTH: usize = 44;
const AMOUNT_WIDTH: usize = 18;

/// Renders a report page as a fixed-width text table.
pub struct ReportPrinter {
    currency: Option<Currency>,
}

impl ReportPrinter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            currency: config.currency,
        }
    }

    pub fn print_page<M: Metrics>(&self, page: &ReportPage<M>) -> String {
        let mut output = String::new();

        output.push_str(&format!("{:LABEL_WIDTH$}", "Account"));
        for field in M::FIELDS {
            output.push_str(&format!(" {:>AMOUNT_WIDTH$}", field.label()));
        }
        output.push('\n');
        let rule = "-".repeat(LABEL_WIDTH + (AMOUNT_WIDTH + 1) * M::FIELDS.len());
        output.push_str(&rule);
        output.push('\n');

        for row in &page.rows {
            output.push_str(&self.print_row(page.mode, row));
        }

        output.push_str(&rule);
        output.push('\n');
        output.push_str(&format!("{:LABEL_WIDTH$}", "Total"));
        output.push_str(&self.print_amounts(&page.totals.displayed));
        output.push('\n');
        output.push_str(&format!(
            "Page {} of {} ({} rows)\n",
            page.page,
            page.page_count.max(1),
            page.total_rows
        ));
        output
    }

    fn print_row<M: Metrics>(&self, mode: ViewMode, row: &ReportRow<M>) -> String {
        // Search results are flat; indentation would suggest a hierarchy.
        let indent = match mode {
            ViewMode::Hierarchy => "  ".repeat(row.level),
            ViewMode::Search => String::new(),
        };
        let marker = match (row.has_children, row.expanded) {
            (true, true) => "- ",
            (true, false) => "+ ",
            (false, _) => "  ",
        };
        let label = format!(
            "{}{}{} {}{}",
            indent,
            marker,
            row.code,
            row.name,
            if row.is_control { " (control)" } else { "" }
        );
        format!(
            "{:LABEL_WIDTH$}{}\n",
            truncate(&label, LABEL_WIDTH),
            self.print_amounts(&row.display_metrics)
        )
    }

    fn print_amounts<M: Metrics>(&self, metrics: &M) -> String {
        M::FIELDS
            .iter()
            .map(|field| {
                let amount = metrics.get(*field).unwrap_or(0.0);
                format!(" {:>AMOUNT_WIDTH$}", format_amount(amount, self.currency))
            })
            .collect()
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(width.saturating_sub(1)).collect();
        t.push('~');
        t
    }
}
