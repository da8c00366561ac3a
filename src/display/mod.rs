//! Display formatting for terminal output
//!
//! Tables for listings are built with `tabled`; detail views are plain
//! aligned text.

pub mod audit;
pub mod category;
pub mod family;
pub mod plan;
pub mod transaction;

pub use audit::format_audit_entries;
pub use category::format_category_list;
pub use family::format_family_list;
pub use plan::{format_plan, format_plan_list};
pub use transaction::{format_transaction_details, format_transaction_groups, format_transaction_table};

use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Render rows with the shared table style
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Shorten `s` to at most `max` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("groceries", 20), "groceries");
        assert_eq!(truncate("weekly groceries and fruit", 10), "weekly ...");
    }
}
