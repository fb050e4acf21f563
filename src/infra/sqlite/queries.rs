use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, types::Value};
use tracing::debug;

use crate::domain::entities::customer::Customer;
use crate::domain::entities::project::{Project, ProjectStatus};
use crate::domain::entities::query::{PageQuery, PageResult, SortDirection};
use crate::domain::entities::team_member::TeamMember;
use crate::infra::sqlite::schema::open_connection;

const DATE_FORMAT: &str = "%Y-%m-%d";

const PROJECT_COLUMNS: &str =
    "id, code, name, customer_name, site_address, manager, status, budget_cents, start_date";

fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|text| NaiveDate::parse_from_str(&text, DATE_FORMAT).ok())
}

fn format_date(value: Option<NaiveDate>) -> Option<String> {
    value.map(|date| date.format(DATE_FORMAT).to_string())
}

/// Maps a table column id to its SQL column. Only these ids can be sorted on.
pub fn project_sort_column(column_id: &str) -> Option<&'static str> {
    match column_id {
        "code" => Some("code"),
        "name" => Some("name"),
        "customer" => Some("customer_name"),
        "manager" => Some("manager"),
        "status" => Some("status"),
        "budget" => Some("budget_cents"),
        "start_date" => Some("start_date"),
        _ => None,
    }
}

fn project_filter_column(key: &str) -> Option<&'static str> {
    match key {
        "status" => Some("status"),
        "customer" => Some("customer_name"),
        "manager" => Some("manager"),
        _ => None,
    }
}

pub fn list_customers(db_path: &Path) -> Result<Vec<Customer>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT id, name, contact_name, email, phone, city, customer_since, active
             FROM customer
             ORDER BY id ASC",
        )
        .context("failed to prepare customers query")?;

    let customers = stmt
        .query_map([], |row| {
            Ok(Customer {
                id: row.get(0)?,
                name: row.get(1)?,
                contact_name: row.get(2)?,
                email: row.get(3)?,
                phone: row.get(4)?,
                city: row.get(5)?,
                customer_since: parse_date(row.get(6)?),
                active: row.get::<_, i64>(7)? != 0,
            })
        })
        .context("failed to query customers")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect customers")?;

    Ok(customers)
}

pub fn list_team_members(db_path: &Path) -> Result<Vec<TeamMember>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT id, full_name, role, trade, email, phone, hourly_rate_cents, active
             FROM team_member
             ORDER BY id ASC",
        )
        .context("failed to prepare team members query")?;

    let members = stmt
        .query_map([], |row| {
            Ok(TeamMember {
                id: row.get(0)?,
                full_name: row.get(1)?,
                role: row.get(2)?,
                trade: row.get(3)?,
                email: row.get(4)?,
                phone: row.get(5)?,
                hourly_rate_cents: row.get(6)?,
                active: row.get::<_, i64>(7)? != 0,
            })
        })
        .context("failed to query team members")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect team members")?;

    Ok(members)
}

pub fn insert_customers(db_path: &Path, customers: &[Customer]) -> Result<usize> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start customer insert transaction")?;

    let mut insert_stmt = tx
        .prepare(
            "INSERT INTO customer(name, contact_name, email, phone, city, customer_since, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .context("failed to prepare customer insert")?;
    for customer in customers {
        insert_stmt
            .execute(params![
                customer.name,
                customer.contact_name,
                customer.email,
                customer.phone,
                customer.city,
                format_date(customer.customer_since),
                customer.active as i64,
            ])
            .with_context(|| format!("failed to insert customer {}", customer.name))?;
    }
    drop(insert_stmt);

    tx.commit().context("failed to commit customer insert")?;
    Ok(customers.len())
}

pub fn insert_projects(db_path: &Path, projects: &[Project]) -> Result<usize> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start project insert transaction")?;

    let mut insert_stmt = tx
        .prepare(
            "INSERT INTO project(code, name, customer_name, site_address, manager, status, budget_cents, start_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .context("failed to prepare project insert")?;
    for project in projects {
        insert_stmt
            .execute(params![
                project.code,
                project.name,
                project.customer_name,
                project.site_address,
                project.manager,
                project.status.key(),
                project.budget_cents,
                format_date(project.start_date),
            ])
            .with_context(|| format!("failed to insert project {}", project.code))?;
    }
    drop(insert_stmt);

    tx.commit().context("failed to commit project insert")?;
    Ok(projects.len())
}

pub fn insert_team_members(db_path: &Path, members: &[TeamMember]) -> Result<usize> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start team member insert transaction")?;

    let mut insert_stmt = tx
        .prepare(
            "INSERT INTO team_member(full_name, role, trade, email, phone, hourly_rate_cents, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .context("failed to prepare team member insert")?;
    for member in members {
        insert_stmt
            .execute(params![
                member.full_name,
                member.role,
                member.trade,
                member.email,
                member.phone,
                member.hourly_rate_cents,
                member.active as i64,
            ])
            .with_context(|| format!("failed to insert team member {}", member.full_name))?;
    }
    drop(insert_stmt);

    tx.commit().context("failed to commit team member insert")?;
    Ok(members.len())
}

/// Server-side listing: filters, search, multi-column sort and one page of
/// projects, plus the filtered total.
pub fn query_projects(db_path: &Path, query: &PageQuery) -> Result<PageResult<Project>> {
    let conn = open_connection(db_path)?;

    let mut filter_clauses = vec!["1 = 1".to_string()];
    let mut filter_params = Vec::<Value>::new();

    let search = query.search.trim();
    if !search.is_empty() {
        filter_clauses.push(
            "(code LIKE ? OR name LIKE ? OR customer_name LIKE ? OR site_address LIKE ? OR manager LIKE ?)"
                .to_string(),
        );
        let pattern = format!("%{search}%");
        filter_params.extend(std::iter::repeat_n(Value::Text(pattern), 5));
    }

    for (key, value) in &query.filters {
        match project_filter_column(key) {
            Some(column) => {
                filter_clauses.push(format!("{column} = ?"));
                filter_params.push(Value::Text(value.clone()));
            }
            None => debug!(key = %key, "ignoring unknown project filter"),
        }
    }

    let where_sql = filter_clauses.join(" AND ");

    let total_rows: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM project WHERE {where_sql}"),
            rusqlite::params_from_iter(filter_params.iter().cloned()),
            |row| row.get(0),
        )
        .context("failed to query filtered project count")?;

    let mut order_terms: Vec<String> = query
        .sort
        .iter()
        .filter_map(|spec| {
            let direction = match spec.direction {
                SortDirection::Asc => "ASC",
                SortDirection::Desc => "DESC",
            };
            project_sort_column(&spec.column).map(|column| format!("{column} {direction}"))
        })
        .collect();
    order_terms.push("id ASC".to_string());

    let page_size = query.page_size.max(1);
    let offset = query.page_index.max(0).saturating_mul(page_size);

    let row_sql = format!(
        "SELECT {PROJECT_COLUMNS}
         FROM project
         WHERE {where_sql}
         ORDER BY {}
         LIMIT ? OFFSET ?",
        order_terms.join(", ")
    );
    let mut row_params = filter_params;
    row_params.push(Value::Integer(page_size));
    row_params.push(Value::Integer(offset));

    let mut stmt = conn
        .prepare(&row_sql)
        .context("failed to prepare project page query")?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(row_params), |row| {
            let status: String = row.get(6)?;
            Ok(Project {
                id: row.get(0)?,
                code: row.get(1)?,
                name: row.get(2)?,
                customer_name: row.get(3)?,
                site_address: row.get(4)?,
                manager: row.get(5)?,
                status: ProjectStatus::from_key(&status).unwrap_or_default(),
                budget_cents: row.get(7)?,
                start_date: parse_date(row.get(8)?),
            })
        })
        .context("failed to query project page")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect project page")?;

    Ok(PageResult { rows, total_rows })
}

pub fn project_status_counts(db_path: &Path) -> Result<BTreeMap<ProjectStatus, i64>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare("SELECT status, COUNT(*) FROM project GROUP BY status")
        .context("failed to prepare project status count query")?;

    let mut counts = BTreeMap::new();
    let rows = stmt
        .query_map([], |row| {
            let status: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((status, count))
        })
        .context("failed to query project status counts")?;

    for row in rows {
        let (status, count) = row.context("failed to read project status count row")?;
        if let Some(status) = ProjectStatus::from_key(&status) {
            *counts.entry(status).or_insert(0) += count;
        }
    }

    Ok(counts)
}
