//! Family roster display

use tabled::Tabled;

use super::render_table;
use crate::models::FamilyMember;

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "")]
    icon: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Color")]
    color: String,
}

pub fn format_family_list(members: &[FamilyMember]) -> String {
    if members.is_empty() {
        return "No family members.\n\nAdd one with 'famledger family add <name> --role <role>'.\n"
            .to_string();
    }

    let rows = members
        .iter()
        .map(|m| MemberRow {
            icon: m.icon.clone(),
            name: m.name.clone(),
            role: m.role.clone(),
            color: m.color.clone(),
        })
        .collect();
    format!("{}\n", render_table(rows))
}
