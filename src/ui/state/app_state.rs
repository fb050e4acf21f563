use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::customer::Customer;
use crate::domain::entities::query::{PageQuery, SortDirection, SortSpec};
use crate::domain::entities::team_member::TeamMember;
use crate::domain::entities::EntityKind;
use crate::table::{ColumnVisibility, Density, Filters, Sorting};

/// Table state the app owns for the server-backed project listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTableState {
    pub sorting: Sorting,
    pub page_index: usize,
    pub page_size: usize,
    pub search: String,
    pub filters: Filters,
}

impl ProjectTableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sorting: Sorting::new(),
            page_index: 0,
            page_size: page_size.max(1),
            search: String::new(),
            filters: Filters::new(),
        }
    }

    pub fn to_query(&self) -> PageQuery {
        PageQuery {
            page_index: i64::try_from(self.page_index).unwrap_or(i64::MAX),
            page_size: i64::try_from(self.page_size).unwrap_or(i64::MAX),
            search: self.search.trim().to_string(),
            sort: self
                .sorting
                .iter()
                .map(|entry| SortSpec {
                    column: entry.column_id.clone(),
                    direction: if entry.descending {
                        SortDirection::Desc
                    } else {
                        SortDirection::Asc
                    },
                })
                .collect(),
            filters: self
                .filters
                .iter()
                .map(|(key, value)| (key.clone(), value.display()))
                .collect(),
        }
    }
}

pub struct AppState {
    pub active_tab: Signal<EntityKind>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub data_version: Signal<u64>,
    pub customers: Signal<Vec<Customer>>,
    pub team_members: Signal<Vec<TeamMember>>,
    pub projects: Signal<ProjectTableState>,
    pub team_density: Signal<Density>,
    pub team_visibility: Signal<ColumnVisibility>,
}

impl AppState {
    pub fn new(page_size: usize, ready_status: String, team_visibility: ColumnVisibility) -> Self {
        Self {
            active_tab: use_signal(|| EntityKind::Customers),
            busy: use_signal(|| false),
            status: use_signal(|| ready_status),
            data_version: use_signal(|| 0_u64),
            customers: use_signal(Vec::<Customer>::new),
            team_members: use_signal(Vec::<TeamMember>::new),
            projects: use_signal(|| ProjectTableState::new(page_size)),
            team_density: use_signal(Density::default),
            team_visibility: use_signal(|| team_visibility),
        }
    }
}
