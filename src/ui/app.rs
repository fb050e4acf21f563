use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::{error, warn};

use crate::config::AppConfig;
use crate::domain::entities::customer::Customer;
use crate::domain::entities::project::{Project, ProjectStatus};
use crate::domain::entities::team_member::TeamMember;
use crate::domain::entities::EntityKind;
use crate::infra::sqlite::repo::SqliteRepo;
use crate::table::{ColumnVisibility, Density, FilterValue, Filters, Sorting, TableOptions};
use crate::ui::columns::{customer_columns, project_columns, status_label, team_columns};
use crate::ui::i18n::Labels;
use crate::ui::state::app_state::{AppState, ProjectTableState};
use crate::ui::table::{DataTable, RowKey, RowRenderer, TableHandle, ToolbarSlot};
use crate::usecase::ports::repo::DirectoryRepository;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::query_service::QueryService;

const STATUS_FILTER_KEY: &str = "status";

/// Lets the webview paint the loading state before an import blocks the UI
/// thread.
const IMPORT_PAINT_DELAY: Duration = Duration::from_millis(16);

/// Status chips for the project toolbar. "All" clears the filters; the
/// others filter on one status. Both go back to the first page.
fn status_chips(
    labels: &Labels,
    handle: TableHandle<Project>,
    counts: &BTreeMap<ProjectStatus, i64>,
) -> Element {
    let active_status = handle.with(|model| {
        model
            .filters()
            .get(STATUS_FILTER_KEY)
            .and_then(|value| ProjectStatus::from_key(&value.display()))
    });
    let chip_items = std::iter::once(None)
        .chain(ProjectStatus::ALL.into_iter().map(Some))
        .map(|chip| {
            let text = status_chip_label(labels, chip, counts);
            let pressed = if chip == active_status { "true" } else { "false" };
            let weight = if chip == active_status { "600" } else { "400" };
            let key = chip.map(ProjectStatus::key).unwrap_or("all");
            rsx! {
                button {
                    key: "{key}",
                    "aria-pressed": pressed,
                    style: "font-weight: {weight};",
                    onclick: move |_| {
                        handle.update(|model| match chip {
                            Some(status) => {
                                model.set_filter(STATUS_FILTER_KEY, Some(FilterValue::from(status.key())))
                            }
                            None => model.reset_filters(),
                        });
                    },
                    "{text}"
                }
            }
        });
    rsx! {
        div { style: "display: flex; gap: 4px;", {chip_items} }
    }
}

pub fn tab_label(labels: &Labels, kind: EntityKind) -> String {
    labels.get(&format!("app.tab.{}", kind.key()))
}

/// "In progress (3)"; the "All" chip sums every status.
pub fn status_chip_label(
    labels: &Labels,
    status: Option<ProjectStatus>,
    counts: &BTreeMap<ProjectStatus, i64>,
) -> String {
    match status {
        Some(status) => {
            let count = counts.get(&status).copied().unwrap_or(0);
            format!("{} ({count})", status_label(labels, status))
        }
        None => {
            let count: i64 = counts.values().sum();
            format!("{} ({count})", labels.get("app.all_statuses"))
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(AppConfig::load);
    let labels = use_hook(Labels::default);
    let customer_cols = use_hook(|| customer_columns(&labels));
    let project_cols = use_hook(|| project_columns(&labels));
    let team_cols = use_hook(|| team_columns(&labels));

    let AppState {
        mut active_tab,
        mut busy,
        mut status,
        mut data_version,
        mut customers,
        mut team_members,
        mut projects,
        mut team_density,
        mut team_visibility,
    } = AppState::new(
        config.page_size,
        labels.get("app.ready"),
        team_cols.declared_visibility(),
    );

    let services = use_hook(|| {
        config.db_path().map(|db_path| {
            let repo: Rc<dyn DirectoryRepository> = Rc::new(SqliteRepo::new(db_path));
            let init_error = repo.init().err().map(|err| err.to_string());
            (QueryService::new(repo.clone()), Rc::new(ImportService::new(repo)), init_error)
        })
        .map_err(|err| format!("{err:#}"))
    });
    let (query_service, import_service, init_error) = match services {
        Ok(services) => services,
        Err(err) => {
            let text = labels.format("app.db_path_failed", &[("error", err)]);
            return rsx! {
                div {
                    p { "{text}" }
                }
            };
        }
    };

    let list_service = query_service.clone();
    let list_labels = labels.clone();
    use_effect(move || {
        let _version = data_version();
        if let Some(err) = &init_error {
            error!("database init failed: {err}");
            status.set(list_labels.format("app.init_failed", &[("error", err.clone())]));
            return;
        }
        match list_service.customers() {
            Ok(rows) => customers.set(rows),
            Err(err) => {
                warn!("failed to load customers: {err}");
                status.set(list_labels.format("app.load_failed", &[("error", err.to_string())]));
            }
        }
        match list_service.team_members() {
            Ok(rows) => team_members.set(rows),
            Err(err) => {
                warn!("failed to load team members: {err}");
                status.set(list_labels.format("app.load_failed", &[("error", err.to_string())]));
            }
        }
    });

    let page_service = query_service.clone();
    let project_page = use_memo(move || {
        let _version = data_version();
        let query = projects.read().to_query();
        page_service
            .projects_page(&query)
            .inspect_err(|err| warn!("failed to query projects: {err}"))
    });

    let count_service = query_service.clone();
    let status_counts = use_memo(move || {
        let _version = data_version();
        match count_service.project_status_counts() {
            Ok(counts) => counts,
            Err(err) => {
                warn!("failed to count projects by status: {err}");
                BTreeMap::new()
            }
        }
    });

    let chip_labels = labels.clone();
    let project_toolbar = use_hook(move || {
        ToolbarSlot::new(move |handle: TableHandle<Project>| {
            status_chips(&chip_labels, handle, &status_counts())
        })
    });

    let customer_key = use_hook(|| {
        RowKey::new(|customer: &Customer| {
            (customer.id > 0).then(|| format!("customer-{}", customer.id))
        })
    });
    let project_key = use_hook(|| {
        RowKey::new(|project: &Project| (project.id > 0).then(|| format!("project-{}", project.id)))
    });
    let team_key = use_hook(|| {
        RowKey::new(|member: &TeamMember| (member.id > 0).then(|| format!("member-{}", member.id)))
    });
    let action_labels = labels.clone();
    let project_actions = use_hook(move || {
        RowRenderer::new(move |project: &Project| {
            let open_label = action_labels.get("app.open");
            let message = format!("{} · {}", project.code, project.name);
            let mut status = status;
            rsx! {
                button { onclick: move |_| status.set(message.clone()), "{open_label}" }
            }
        })
    });

    let client_options = config.table_options();
    let server_options = TableOptions {
        enable_client_sort: false,
        enable_client_paging: false,
        enable_client_search: false,
        ..config.table_options()
    };
    let page_size = config.page_size;

    let (project_rows, project_total, project_error) = match project_page() {
        Ok(page) => (page.rows, usize::try_from(page.total_rows).unwrap_or(0), None),
        Err(err) => {
            let text = labels.format("app.load_failed", &[("error", err.to_string())]);
            (Vec::new(), 0, Some(text))
        }
    };
    let project_error = project_error.map(|text| {
        rsx! {
            p { style: "color: #b00020;", "{text}" }
        }
    });

    let current = projects();

    let tabs = EntityKind::ALL.into_iter().map(|kind| {
        let text = tab_label(&labels, kind);
        let selected = active_tab() == kind;
        let weight = if selected { "600" } else { "400" };
        let aria_selected = if selected { "true" } else { "false" };
        let key = kind.key();
        rsx! {
            button {
                key: "{key}",
                role: "tab",
                "aria-selected": aria_selected,
                style: "font-weight: {weight};",
                onclick: move |_| active_tab.set(kind),
                "{text}"
            }
        }
    });

    let import_labels = labels.clone();
    let import_label = labels.get("app.import_csv");
    let title = labels.get("app.title");
    let empty_label = labels.get("table.empty");

    let customers_key = "customers";
    let team_key_name = "team";

    let body = match active_tab() {
        EntityKind::Customers => rsx! {
            DataTable {
                key: "{customers_key}",
                data: customers(),
                columns: customer_cols.clone(),
                options: client_options.clone(),
                row_key: customer_key.clone(),
                labels: labels.clone(),
                loading: busy(),
                empty_content: rsx! { "{empty_label}" },
                on_row_click: move |customer: Customer| {
                    status.set(format!("{} · {}", customer.name, customer.city));
                },
            }
        },
        EntityKind::Projects => rsx! {
            {project_error}
            DataTable {
                key: "projects",
                data: project_rows,
                columns: project_cols.clone(),
                options: server_options,
                row_key: project_key.clone(),
                labels: labels.clone(),
                loading: busy(),
                total: project_total,
                sorting: current.sorting.clone(),
                on_sort_change: move |sorting: Sorting| projects.write().sorting = sorting,
                page_index: current.page_index,
                on_page_change: move |page_index: usize| projects.write().page_index = page_index,
                page_size: current.page_size,
                on_page_size_change: move |size: usize| projects.write().page_size = size,
                search: current.search.clone(),
                on_search_change: move |search: String| projects.write().search = search,
                filters: current.filters.clone(),
                on_filters_change: move |filters: Filters| projects.write().filters = filters,
                on_reset: move |_: ()| projects.set(ProjectTableState::new(page_size)),
                row_actions: project_actions.clone(),
                toolbar_extra: project_toolbar.clone(),
            }
        },
        EntityKind::TeamMembers => rsx! {
            DataTable {
                key: "{team_key_name}",
                data: team_members(),
                columns: team_cols.clone(),
                options: client_options.clone(),
                row_key: team_key.clone(),
                labels: labels.clone(),
                loading: busy(),
                density: team_density(),
                on_density_change: move |density: Density| team_density.set(density),
                visibility: team_visibility(),
                on_visibility_change: move |visibility: ColumnVisibility| team_visibility.set(visibility),
            }
        },
    };

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 8px; padding: 12px; height: 100vh; box-sizing: border-box;",
            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                strong { "{title}" }
                div { role: "tablist", style: "display: flex; gap: 4px;", {tabs} }
                button {
                    disabled: busy(),
                    onclick: move |_| {
                        if busy() {
                            return;
                        }
                        let Some(file_path) = FileDialog::new()
                            .add_filter("CSV", &["csv"])
                            .pick_file() else {
                            return;
                        };
                        *busy.write() = true;
                        status.set(import_labels.get("app.loading"));
                        let kind = active_tab();
                        let import_service = import_service.clone();
                        let import_labels = import_labels.clone();
                        spawn(async move {
                            tokio::time::sleep(IMPORT_PAINT_DELAY).await;
                            match import_service.import_csv(kind, &file_path) {
                                Ok(count) => {
                                    status.set(import_labels.format(
                                        "app.imported",
                                        &[("count", count.to_string())],
                                    ));
                                    data_version += 1;
                                }
                                Err(err) => {
                                    error!("csv import failed: {err:#}");
                                    status.set(import_labels.format(
                                        "app.import_failed",
                                        &[("error", format!("{err:#}"))],
                                    ));
                                }
                            }
                            *busy.write() = false;
                        });
                    },
                    "{import_label}"
                }
                span { " {status}" }
            }
            {body}
        }
    }
}
