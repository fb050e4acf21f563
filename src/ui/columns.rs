use chrono::NaiveDate;

use crate::domain::entities::customer::Customer;
use crate::domain::entities::project::{Project, ProjectStatus};
use crate::domain::entities::team_member::TeamMember;
use crate::table::{CellValue, ColumnDef, StickySide};
use crate::ui::i18n::Labels;
use crate::ui::table::ColumnSet;

/// Formats integer cents as "12,345.67", keeping the sign.
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}.{:02}", cents % 100)
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn status_label(labels: &Labels, status: ProjectStatus) -> String {
    labels.get(&format!("project.status.{}", status.key()))
}

fn yes_no(labels: &Labels, value: bool) -> String {
    labels.get(if value { "common.yes" } else { "common.no" })
}

pub fn customer_columns(labels: &Labels) -> ColumnSet<Customer> {
    let active_labels = labels.clone();
    vec![
        ColumnDef::new("name", labels.get("customer.name"))
            .accessor(|customer: &Customer| customer.name.clone())
            .sortable()
            .always_visible()
            .sticky(StickySide::Left)
            .title(),
        ColumnDef::new("contact", labels.get("customer.contact"))
            .accessor(|customer: &Customer| customer.contact_name.clone())
            .sortable()
            .subtitle(),
        ColumnDef::new("city", labels.get("customer.city"))
            .accessor(|customer: &Customer| customer.city.clone())
            .sortable()
            .priority(1),
        ColumnDef::new("phone", labels.get("customer.phone"))
            .accessor(|customer: &Customer| customer.phone.clone())
            .priority(2),
        ColumnDef::new("email", labels.get("customer.email"))
            .accessor(|customer: &Customer| customer.email.clone())
            .priority(3),
        ColumnDef::new("customer_since", labels.get("customer.since"))
            .accessor(|customer: &Customer| customer.customer_since)
            .cell(|customer: &Customer| format_date(customer.customer_since))
            .sortable()
            .hidden(),
        ColumnDef::new("active", labels.get("customer.active"))
            .accessor(|customer: &Customer| customer.active)
            .cell(move |customer: &Customer| yes_no(&active_labels, customer.active))
            .sortable()
            .mobile_hidden(),
    ]
    .into()
}

/// Ids of sortable columns must stay in the SQLite sort allow-list.
pub fn project_columns(labels: &Labels) -> ColumnSet<Project> {
    let status_labels = labels.clone();
    let status_formatter_labels = labels.clone();
    vec![
        ColumnDef::new("code", labels.get("project.code"))
            .accessor(|project: &Project| project.code.clone())
            .sortable()
            .always_visible()
            .sticky(StickySide::Left)
            .subtitle(),
        ColumnDef::new("name", labels.get("project.name"))
            .accessor(|project: &Project| project.name.clone())
            .sortable()
            .title(),
        ColumnDef::new("customer", labels.get("project.customer"))
            .accessor(|project: &Project| project.customer_name.clone())
            .sortable()
            .priority(1),
        ColumnDef::new("status", labels.get("project.status"))
            .accessor(|project: &Project| project.status.key())
            .cell(move |project: &Project| status_label(&status_labels, project.status))
            .sortable()
            .priority(0)
            .formatter(move |_, project: &Project| {
                status_label(&status_formatter_labels, project.status)
            }),
        ColumnDef::new("manager", labels.get("project.manager"))
            .accessor(|project: &Project| project.manager.clone())
            .sortable()
            .priority(2),
        ColumnDef::new("budget", labels.get("project.budget"))
            .accessor(|project: &Project| project.budget_cents)
            .cell(|project: &Project| format_money(project.budget_cents))
            .sortable()
            .priority(3),
        ColumnDef::new("start_date", labels.get("project.start_date"))
            .accessor(|project: &Project| project.start_date)
            .cell(|project: &Project| format_date(project.start_date))
            .sortable()
            .priority(4),
        ColumnDef::new("site", labels.get("project.site"))
            .accessor(|project: &Project| project.site_address.clone())
            .hidden()
            .mobile_hidden(),
    ]
    .into()
}

pub fn team_columns(labels: &Labels) -> ColumnSet<TeamMember> {
    let active_labels = labels.clone();
    vec![
        ColumnDef::new("name", labels.get("team.name"))
            .accessor(|member: &TeamMember| member.full_name.clone())
            .sortable()
            .always_visible()
            .sticky(StickySide::Left)
            .title(),
        ColumnDef::new("role", labels.get("team.role"))
            .accessor(|member: &TeamMember| member.role.clone())
            .sortable()
            .subtitle(),
        ColumnDef::new("trade", labels.get("team.trade"))
            .accessor(|member: &TeamMember| member.trade.clone())
            .sortable()
            .priority(1),
        ColumnDef::new("phone", labels.get("team.phone"))
            .accessor(|member: &TeamMember| member.phone.clone())
            .priority(2),
        ColumnDef::new("email", labels.get("team.email"))
            .accessor(|member: &TeamMember| member.email.clone())
            .priority(3),
        ColumnDef::new("rate", labels.get("team.rate"))
            .accessor(|member: &TeamMember| member.hourly_rate_cents)
            .formatter(|value: &CellValue, _: &TeamMember| match value {
                CellValue::Integer(cents) => format!("{}/h", format_money(*cents)),
                other => other.display(),
            })
            .cell(|member: &TeamMember| format_money(member.hourly_rate_cents))
            .sortable()
            .priority(4),
        ColumnDef::new("active", labels.get("team.active"))
            .accessor(|member: &TeamMember| member.active)
            .cell(move |member: &TeamMember| yes_no(&active_labels, member.active))
            .sortable()
            .hidden(),
    ]
    .into()
}
