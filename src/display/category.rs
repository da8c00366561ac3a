//! Category display formatting

use tabled::Tabled;

use super::{render_table, truncate};
use crate::models::CategoryInfo;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "")]
    icon: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Custom")]
    custom: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format one registry as a table
pub fn format_category_list(categories: &[CategoryInfo]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let rows = categories
        .iter()
        .map(|c| CategoryRow {
            icon: c.icon.clone(),
            name: c.name.clone(),
            limit: c
                .suggested_limit
                .map(|l| format!("{:.0}%", l * 100.0))
                .unwrap_or_default(),
            custom: if c.custom { "yes".into() } else { String::new() },
            description: truncate(&c.description, 40),
        })
        .collect();
    format!("{}\n", render_table(rows))
}
