//! Plain-text rendering of aggregated report data.

use std::fmt;

use crate::domain::consolidation::{AggregatedReportInput, ReportContent, UserSection};

/// Turns aggregated data into the report body.
///
/// Rendering walks the input in order and performs no I/O, so the same input
/// always produces byte-identical output.
///
/// # Layout
///
/// ```text
/// Consolidated report for company 1
///
/// User: ana@acme.test
/// Orders:
///   order #1 user=1 amount=100.00 asset=BTC
/// Transactions:
///   transaction #1 user=1 amount=100.00 kind=deposit
///
/// User: bob@acme.test
/// Unavailable: failed to fetch ledger data for user 2: ...
///
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, input: &AggregatedReportInput) -> ReportContent {
        ReportContent::new(ReportView(input).to_string())
    }
}

struct ReportView<'a>(&'a AggregatedReportInput);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Consolidated report for company {}", self.0.company_id())?;
        writeln!(f)?;

        for section in self.0.sections() {
            writeln!(f, "User: {}", section.user().email)?;

            match section {
                UserSection::Consolidated(data) => {
                    writeln!(f, "Orders:")?;
                    for order in data.orders() {
                        writeln!(f, "  {order}")?;
                    }
                    writeln!(f, "Transactions:")?;
                    for transaction in data.transactions() {
                        writeln!(f, "  {transaction}")?;
                    }
                }
                UserSection::Unavailable { reason, .. } => {
                    writeln!(f, "Unavailable: {reason}")?;
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
