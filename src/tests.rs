use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use dioxus::prelude::Key;
use proptest::prelude::*;
use rusqlite::Connection;
use tempfile::TempDir;

use crate::config::AppConfig;
use crate::domain::entities::customer::Customer;
use crate::domain::entities::project::{Project, ProjectStatus};
use crate::domain::entities::query::{PageQuery, SortDirection, SortSpec};
use crate::domain::entities::EntityKind;
use crate::infra::sqlite::queries::{
    insert_projects, list_customers, project_status_counts, query_projects,
};
use crate::infra::sqlite::repo::SqliteRepo;
use crate::infra::sqlite::schema::init_db;
use crate::table::state::{clamp_page_index, clamp_page_size, with_filter};
use crate::table::{
    build_card, card_cells, CardCell, ColumnDef, Density, FilterValue, Filters, SortEntry,
    SortIndicator, Sorting, StickySide, TableCallbacks, TableInputs, TableModel, TableOptions,
    Update, ACTIONS_COLUMN_ID,
};
use crate::ui::app::status_chip_label;
use crate::ui::columns::{customer_columns, format_money, project_columns};
use crate::ui::i18n::Labels;
use crate::ui::state::app_state::ProjectTableState;
use crate::ui::table::cards::{fallback_actions, prune_expanded, toggle_label};
use crate::ui::table::grid::{is_activation_key, sort_badge};
use crate::ui::table::pager::parse_page_jump;
use crate::ui::table::styles::{header_class, table_cell_style, TABLE_CSS};
use crate::ui::table::toolbar::page_indicator;
use crate::usecase::services::import_service::ImportService;

fn temp_db(dir: &TempDir) -> std::path::PathBuf {
    let db_path = dir.path().join("app.sqlite");
    init_db(&db_path).expect("init_db should succeed");
    db_path
}

fn project(code: &str, name: &str, status: ProjectStatus, budget_cents: i64) -> Project {
    Project {
        id: 0,
        code: code.to_string(),
        name: name.to_string(),
        customer_name: "Harbor Homes".to_string(),
        site_address: "12 Dock Rd".to_string(),
        manager: "Dana".to_string(),
        status,
        budget_cents,
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
    }
}

fn seed_projects(db_path: &Path) {
    insert_projects(
        db_path,
        &[
            project("P-001", "Bridge deck repair", ProjectStatus::InProgress, 500_000),
            project("P-002", "Warehouse roof", ProjectStatus::Planned, 120_000),
            project("P-003", "School extension", ProjectStatus::InProgress, 900_000),
            project("P-004", "Footbridge", ProjectStatus::Completed, 80_000),
            project("P-005", "Clinic fit-out", ProjectStatus::OnHold, 300_000),
        ],
    )
    .expect("projects should be inserted");
}

fn codes(rows: &[Project]) -> Vec<&str> {
    rows.iter().map(|project| project.code.as_str()).collect()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("should write fixture");
    path
}

#[test]
fn init_db_creates_required_tables() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp_db(&temp_dir);

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('customer','project','team_member')",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");

    assert_eq!(table_count, 3, "required tables should exist");
}

#[test]
fn init_db_is_idempotent() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp_db(&temp_dir);

    let result = init_db(&db_path);

    assert!(result.is_ok(), "second init should succeed: {result:?}");
}

#[test]
fn query_projects_sorts_and_pages_with_total() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp_db(&temp_dir);
    seed_projects(&db_path);

    let query = PageQuery {
        page_index: 1,
        page_size: 2,
        sort: vec![SortSpec {
            column: "budget".to_string(),
            direction: SortDirection::Desc,
        }],
        ..PageQuery::default()
    };
    let page = query_projects(&db_path, &query).expect("page query should succeed");

    assert_eq!(page.total_rows, 5);
    assert_eq!(codes(&page.rows), vec!["P-005", "P-002"]);
}

#[test]
fn query_projects_applies_search_and_status_filter() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp_db(&temp_dir);
    seed_projects(&db_path);

    let searched = query_projects(
        &db_path,
        &PageQuery {
            search: "bridge".to_string(),
            ..PageQuery::default()
        },
    )
    .expect("search query should succeed");
    assert_eq!(codes(&searched.rows), vec!["P-001", "P-004"]);
    assert_eq!(searched.total_rows, 2);

    let mut filters = BTreeMap::new();
    filters.insert("status".to_string(), "in_progress".to_string());
    let filtered = query_projects(
        &db_path,
        &PageQuery {
            filters,
            ..PageQuery::default()
        },
    )
    .expect("filter query should succeed");
    assert_eq!(codes(&filtered.rows), vec!["P-001", "P-003"]);
    assert_eq!(filtered.rows[0].status, ProjectStatus::InProgress);
    assert_eq!(filtered.rows[0].start_date, NaiveDate::from_ymd_opt(2024, 3, 1));
}

#[test]
fn query_projects_ignores_unknown_sort_ids_and_clamps_page_size() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp_db(&temp_dir);
    seed_projects(&db_path);

    let query = PageQuery {
        page_index: -3,
        page_size: 0,
        sort: vec![SortSpec {
            column: "budget_cents; DROP TABLE project".to_string(),
            direction: SortDirection::Desc,
        }],
        ..PageQuery::default()
    };
    let page = query_projects(&db_path, &query).expect("page query should succeed");

    assert_eq!(codes(&page.rows), vec!["P-001"]);
    assert_eq!(page.total_rows, 5);
}

#[test]
fn project_status_counts_groups_by_status() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp_db(&temp_dir);
    seed_projects(&db_path);

    let counts = project_status_counts(&db_path).expect("counts should load");

    assert_eq!(counts.get(&ProjectStatus::InProgress), Some(&2));
    assert_eq!(counts.get(&ProjectStatus::Planned), Some(&1));
    assert_eq!(counts.values().sum::<i64>(), 5);
}

#[test]
fn csv_import_inserts_customers_with_defaults() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp_db(&temp_dir);
    let csv_path = write_file(
        &temp_dir,
        "customers.csv",
        "name,contact_name,city,customer_since\n\
         Harbor Homes , Ana ,Porto,2021-05-04\n\
         Summit Build,,Lisbon,\n",
    );
    let service = ImportService::new(Rc::new(SqliteRepo::new(db_path.clone())));

    let inserted = service
        .import_csv(EntityKind::Customers, &csv_path)
        .expect("import should succeed");
    let customers: Vec<Customer> = list_customers(&db_path).expect("customers should load");

    assert_eq!(inserted, 2);
    assert_eq!(customers[0].name, "Harbor Homes");
    assert_eq!(customers[0].contact_name, "Ana");
    assert_eq!(customers[0].customer_since, NaiveDate::from_ymd_opt(2021, 5, 4));
    assert_eq!(customers[1].customer_since, None);
    assert!(customers[1].active, "missing active should default to true");
}

#[test]
fn csv_import_reports_malformed_record_and_inserts_nothing() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp_db(&temp_dir);
    let csv_path = write_file(
        &temp_dir,
        "projects.csv",
        "code,name,status,budget_cents\n\
         P-1,Roof,planned,1000\n\
         P-2,Deck,demolished,2000\n",
    );
    let service = ImportService::new(Rc::new(SqliteRepo::new(db_path.clone())));

    let err = service
        .import_csv(EntityKind::Projects, &csv_path)
        .expect_err("unknown status should fail");
    let page = query_projects(&db_path, &PageQuery::default()).expect("page query should succeed");

    assert!(
        format!("{err:#}").contains("record #2"),
        "error should name the record: {err:#}"
    );
    assert_eq!(page.total_rows, 0);
}

#[test]
fn config_parse_keeps_defaults_for_missing_fields() {
    let config = AppConfig::parse("page_size = 25\nsearch_debounce_ms = 400\n")
        .expect("config should parse");

    assert_eq!(config.page_size, 25);
    assert_eq!(config.page_size_options, vec![10, 25, 50, 100]);
    assert_eq!(
        config.table_options().search_debounce,
        Duration::from_millis(400)
    );
    assert_eq!(config.database_path, None);
}

#[test]
fn config_rejects_malformed_toml() {
    let result = AppConfig::parse("page_size = \"many\"");

    assert!(result.is_err(), "string page size should be rejected");
}

#[test]
fn config_load_from_missing_file_uses_defaults() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");

    let config = AppConfig::load_from(&temp_dir.path().join("config.toml"))
        .expect("missing file should not fail");

    assert_eq!(config, AppConfig::default());
}

#[test]
fn config_table_options_drop_zero_sizes() {
    let config = AppConfig {
        page_size: 0,
        page_size_options: vec![0],
        ..AppConfig::default()
    };

    let options = config.table_options();

    assert_eq!(options.initial_page_size, 1);
    assert_eq!(options.page_size_options, vec![10, 25, 50, 100]);
}

#[test]
fn project_table_state_maps_to_page_query() {
    let mut state = ProjectTableState::new(25);
    state.page_index = 2;
    state.search = "  deck ".to_string();
    state.sorting = vec![SortEntry::desc("budget"), SortEntry::asc("code")];
    state.filters = with_filter(&state.filters, "status", Some(FilterValue::from("on_hold")));

    let query = state.to_query();

    assert_eq!(query.page_index, 2);
    assert_eq!(query.page_size, 25);
    assert_eq!(query.search, "deck");
    assert_eq!(query.sort[0].direction, SortDirection::Desc);
    assert_eq!(query.sort[1].column, "code");
    assert_eq!(query.filters.get("status").map(String::as_str), Some("on_hold"));
}

#[derive(Debug, Clone, PartialEq)]
struct Crew {
    name: String,
    size: i64,
}

fn crew_columns() -> Vec<ColumnDef<Crew>> {
    vec![
        ColumnDef::new("name", "Name")
            .accessor(|crew: &Crew| crew.name.clone())
            .sortable(),
        ColumnDef::new("size", "Size")
            .accessor(|crew: &Crew| crew.size)
            .sortable(),
    ]
}

fn crews(count: i64) -> Vec<Crew> {
    (0..count)
        .map(|idx| Crew {
            name: format!("crew-{idx}"),
            size: idx,
        })
        .collect()
}

type Recorded<V> = Rc<RefCell<Vec<V>>>;

fn recorder<V: Clone + 'static>() -> (Recorded<V>, Rc<dyn Fn(&V)>) {
    let seen: Recorded<V> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let handler: Rc<dyn Fn(&V)> = Rc::new(move |value: &V| sink.borrow_mut().push(value.clone()));
    (seen, handler)
}

#[test]
fn page_size_change_resets_page_for_controlled_callers() {
    let (sizes, on_page_size_change) = recorder::<usize>();
    let (pages, on_page_change) = recorder::<usize>();
    let mut model = TableModel::new(crew_columns(), TableOptions::default()).with_data(crews(60));
    model.sync(
        TableInputs {
            page_index: Some(3),
            page_size: Some(10),
            ..TableInputs::default()
        },
        TableCallbacks {
            on_page_size_change: Some(on_page_size_change),
            on_page_change: Some(on_page_change),
            ..TableCallbacks::default()
        },
    );

    model.set_page_size(25);

    assert_eq!(*sizes.borrow(), vec![25]);
    assert_eq!(*pages.borrow(), vec![0]);
    assert_eq!(model.page(), 4, "controlled page only moves when the caller says so");
}

#[test]
fn controlled_value_wins_over_internal_state() {
    let mut model = TableModel::new(crew_columns(), TableOptions::default());
    model.set_density(Density::Compact);
    assert_eq!(model.density(), Density::Compact);

    model.sync(
        TableInputs {
            density: Some(Density::Comfortable),
            ..TableInputs::default()
        },
        TableCallbacks::default(),
    );
    model.set_density(Density::Compact);

    assert_eq!(model.density(), Density::Comfortable);
}

#[test]
fn sorting_updater_reads_the_controlled_value() {
    let (sorts, on_sort_change) = recorder::<Sorting>();
    let mut model = TableModel::new(crew_columns(), TableOptions::default());
    model.sync(
        TableInputs {
            sorting: Some(vec![SortEntry::asc("name")]),
            ..TableInputs::default()
        },
        TableCallbacks {
            on_sort_change: Some(on_sort_change),
            ..TableCallbacks::default()
        },
    );

    let next = model.set_sorting(Update::with(|previous: &Sorting| {
        let mut next = previous.clone();
        next.push(SortEntry::desc("size"));
        next
    }));

    assert_eq!(next, vec![SortEntry::asc("name"), SortEntry::desc("size")]);
    assert_eq!(*sorts.borrow(), vec![next]);
    assert_eq!(model.sorting(), &vec![SortEntry::asc("name")]);
}

#[test]
fn burst_of_keystrokes_forwards_search_once() {
    let (searches, on_search_change) = recorder::<String>();
    let mut model = TableModel::new(
        crew_columns(),
        TableOptions {
            search_debounce: Duration::from_millis(250),
            ..TableOptions::default()
        },
    )
    .with_data(crews(30));
    model.sync(
        TableInputs::default(),
        TableCallbacks {
            on_search_change: Some(on_search_change),
            ..TableCallbacks::default()
        },
    );
    model.goto_page(2);
    let start = Instant::now();

    for (step, text) in ["c", "cr", "cre", "crew", "crew-2"].into_iter().enumerate() {
        let now = start + Duration::from_millis(50 * step as u64);
        model.type_search(text.to_string(), now);
        assert!(!model.poll_search(now), "nothing settles mid-burst");
    }

    assert_eq!(model.search_input(), "crew-2");
    assert!(!model.poll_search(start + Duration::from_millis(449)));
    assert!(model.poll_search(start + Duration::from_millis(450)));
    assert!(!model.poll_search(start + Duration::from_millis(900)));

    assert_eq!(*searches.borrow(), vec!["crew-2".to_string()]);
    assert_eq!(model.page(), 1, "settled search should reset the page");
    let names: Vec<&str> = model.rows().iter().map(|crew| crew.name.as_str()).collect();
    assert_eq!(model.total(), 11);
    assert_eq!(names.first(), Some(&"crew-2"));
    assert_eq!(names.last(), Some(&"crew-28"));
}

#[test]
fn reset_all_restores_defaults_and_notifies_once() {
    let (resets, on_reset_record) = recorder::<()>();
    let mut model = TableModel::new(crew_columns(), TableOptions::default()).with_data(crews(30));
    model.sync(
        TableInputs::default(),
        TableCallbacks {
            on_reset: Some(Rc::new(move || on_reset_record(&()))),
            ..TableCallbacks::default()
        },
    );
    model.toggle_sort("size", false);
    model.set_page_size(5);
    model.goto_page(3);
    model.set_filter("name", Some(FilterValue::from("crew-1")));
    model.type_search("crew".to_string(), Instant::now());

    model.reset_all();

    assert!(model.sorting().is_empty());
    assert_eq!(model.page_size(), 10);
    assert_eq!(model.page(), 1);
    assert!(model.filters().is_empty());
    assert_eq!(model.search_input(), "");
    assert_eq!(model.search_deadline(), None);
    assert_eq!(resets.borrow().len(), 1);
}

#[test]
fn filter_on_column_id_matches_display_text() {
    let mut model = TableModel::new(crew_columns(), TableOptions::default()).with_data(crews(12));

    model.set_filter("name", Some(FilterValue::from("CREW-11")));

    let names: Vec<&str> = model.rows().iter().map(|crew| crew.name.as_str()).collect();
    assert_eq!(names, vec!["crew-11"]);

    model.set_filter("name", Some(FilterValue::from("")));
    assert!(model.filters().is_empty());
    assert_eq!(model.total(), 12);
}

#[test]
fn reset_filters_clears_owned_filters_and_returns_to_first_page() {
    let mut model = TableModel::new(crew_columns(), TableOptions::default()).with_data(crews(40));
    model.set_filter("name", Some(FilterValue::from("crew-1")));
    model.set_filter("size", Some(FilterValue::from("1")));
    model.set_page_size(1);
    model.goto_page(1);
    assert_eq!(model.total(), 1);

    model.reset_filters();

    assert!(model.filters().is_empty());
    assert_eq!(model.total(), 40);
    assert_eq!(model.page(), 1);
}

#[test]
fn reset_filters_in_controlled_mode_only_reports() {
    let (filter_changes, on_filters_change) = recorder::<Filters>();
    let (pages, on_page_change) = recorder::<usize>();
    let mut controlled = Filters::new();
    controlled.insert("name".to_string(), FilterValue::from("crew-3"));
    let mut model = TableModel::new(crew_columns(), TableOptions::default()).with_data(crews(12));
    model.sync(
        TableInputs {
            filters: Some(controlled.clone()),
            page_index: Some(2),
            ..TableInputs::default()
        },
        TableCallbacks {
            on_filters_change: Some(on_filters_change),
            on_page_change: Some(on_page_change),
            ..TableCallbacks::default()
        },
    );

    model.reset_filters();

    assert_eq!(*filter_changes.borrow(), vec![Filters::new()]);
    assert_eq!(*pages.borrow(), vec![0]);
    assert_eq!(model.filters(), &controlled);
}

#[test]
fn reset_filters_without_filters_is_silent() {
    let (filter_changes, on_filters_change) = recorder::<Filters>();
    let mut model = TableModel::new(crew_columns(), TableOptions::default());
    model.sync(
        TableInputs::default(),
        TableCallbacks {
            on_filters_change: Some(on_filters_change),
            ..TableCallbacks::default()
        },
    );

    model.reset_filters();

    assert!(filter_changes.borrow().is_empty());
}

#[test]
fn status_filter_on_controlled_table_reports_filter_and_first_page() {
    let (filter_changes, on_filters_change) = recorder::<Filters>();
    let (pages, on_page_change) = recorder::<usize>();
    let mut model = TableModel::new(crew_columns(), TableOptions::server());
    model.sync(
        TableInputs {
            filters: Some(Filters::new()),
            page_index: Some(4),
            total: Some(100),
            ..TableInputs::default()
        },
        TableCallbacks {
            on_filters_change: Some(on_filters_change),
            on_page_change: Some(on_page_change),
            ..TableCallbacks::default()
        },
    );

    model.set_filter("status", Some(FilterValue::from("on_hold")));

    let reported = filter_changes.borrow();
    assert_eq!(reported.len(), 1);
    assert_eq!(
        reported[0].get("status").map(FilterValue::display),
        Some("on_hold".to_string())
    );
    assert_eq!(*pages.borrow(), vec![0]);
}

#[test]
fn cell_only_sortable_column_sorts_by_rendered_text() {
    let columns = vec![ColumnDef::new("name", "Name")
        .cell(|crew: &Crew| crew.name.clone())
        .sortable()];
    let data = ["Charlie", "Alice", "Bob"]
        .iter()
        .map(|name| Crew {
            name: name.to_string(),
            size: 1,
        })
        .collect();
    let mut model = TableModel::new(columns, TableOptions::default()).with_data(data);

    model.toggle_sort("name", false);

    let names: Vec<&str> = model.rows().iter().map(|crew| crew.name.as_str()).collect();
    assert_eq!(model.sort_indicator("name"), SortIndicator::Ascending);
    assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);
}

#[test]
fn multi_sort_reports_rank_and_indicator() {
    let mut model = TableModel::new(crew_columns(), TableOptions::default());

    model.toggle_sort("name", false);
    model.toggle_sort("size", true);
    model.toggle_sort("size", true);

    assert_eq!(model.sort_rank("name"), Some(1));
    assert_eq!(model.sort_rank("size"), Some(2));
    assert_eq!(model.sort_indicator("size"), SortIndicator::Descending);
    assert_eq!(sort_badge(SortIndicator::Descending, Some(2)), "↓2");
    assert_eq!(sort_badge(SortIndicator::None, None), "↕");
}

fn card_with_title_and_six_fields() -> Vec<CardCell> {
    ["a", "b", "c", "d", "e", "f", "g"]
        .iter()
        .enumerate()
        .map(|(idx, id)| CardCell {
            column_id: id.to_string(),
            label: id.to_uppercase(),
            display: format!("{id}-value"),
            priority: 10,
            is_title: idx == 0,
            is_subtitle: false,
            mobile_hidden: false,
        })
        .collect()
}

#[test]
fn card_with_six_fields_collapses_to_four() {
    let labels = Labels::default();
    let card = build_card(card_with_title_and_six_fields());

    assert_eq!(card.title.as_ref().map(|cell| cell.column_id.as_str()), Some("a"));
    assert_eq!(card.visible_fields(false).len(), 4);
    assert_eq!(card.visible_fields(true).len(), 6);
    assert_eq!(toggle_label(&labels, &card, false), "Show 2 more");
    assert_eq!(toggle_label(&labels, &card, true), "Show less");
}

#[test]
fn actions_column_fills_card_header_without_renderer() {
    let columns = vec![
        ColumnDef::new("name", "Name")
            .accessor(|crew: &Crew| crew.name.clone())
            .title(),
        ColumnDef::new(ACTIONS_COLUMN_ID, "Actions").cell(|crew: &Crew| format!("call {}", crew.name)),
        ColumnDef::new("size", "Size").accessor(|crew: &Crew| crew.size),
    ];
    let refs: Vec<&ColumnDef<Crew>> = columns.iter().collect();
    let row = Crew {
        name: "east".to_string(),
        size: 2,
    };

    let card = build_card(card_cells(&refs, &row));

    assert_eq!(
        fallback_actions(&card, false).map(|cell| cell.display.as_str()),
        Some("call east")
    );
    assert_eq!(fallback_actions(&card, true), None);
    assert!(card.fields.iter().all(|cell| cell.column_id != ACTIONS_COLUMN_ID));
}

#[test]
fn expanded_cards_are_pruned_to_rows_on_the_page() {
    let mut expanded: BTreeSet<String> = ["crew-1", "crew-7", "crew-9"]
        .iter()
        .map(|key| key.to_string())
        .collect();

    prune_expanded(&mut expanded, ["crew-7", "crew-8"]);

    assert_eq!(expanded.into_iter().collect::<Vec<_>>(), vec!["crew-7".to_string()]);
}

#[test]
fn page_jump_ignores_non_numeric_input() {
    assert_eq!(parse_page_jump(" 3 "), Some(3));
    assert_eq!(parse_page_jump("-2"), Some(-2));
    assert_eq!(parse_page_jump(""), None);
    assert_eq!(parse_page_jump("two"), None);
}

#[test]
fn card_title_falls_back_to_lowest_priority_then_column_order() {
    let columns = vec![
        ColumnDef::new("size", "Size")
            .accessor(|crew: &Crew| crew.size)
            .priority(3),
        ColumnDef::new("name", "Name")
            .accessor(|crew: &Crew| crew.name.clone())
            .priority(1),
        ColumnDef::new("alias", "Alias")
            .accessor(|crew: &Crew| crew.name.to_uppercase())
            .priority(1),
    ];
    let refs: Vec<&ColumnDef<Crew>> = columns.iter().collect();
    let row = Crew {
        name: "north".to_string(),
        size: 4,
    };

    let first = build_card(card_cells(&refs, &row));
    let second = build_card(card_cells(&refs, &row));

    assert_eq!(first, second);
    assert_eq!(first.title.map(|cell| cell.display), Some("north".to_string()));
}

#[test]
fn project_columns_title_and_sort_ids_match_sql() {
    let columns = project_columns(&Labels::default()).to_vec();
    let sortable: Vec<&str> = columns
        .iter()
        .filter(|column| column.sortable)
        .map(|column| column.id.as_str())
        .collect();

    for id in &sortable {
        assert!(
            crate::infra::sqlite::queries::project_sort_column(id).is_some(),
            "{id} should be sortable in sql"
        );
    }
    assert!(columns.iter().any(|column| column.mobile_meta().is_title));
}

#[test]
fn customer_name_column_is_pinned_and_always_visible() {
    let columns = customer_columns(&Labels::default()).to_vec();
    let name = columns
        .iter()
        .find(|column| column.id == "name")
        .expect("name column should exist");

    assert_eq!(name.sticky, Some(StickySide::Left));
    assert!(!name.hideable);
    assert_eq!(name.header, "Customer");
}

#[test]
fn money_is_grouped_with_two_decimals() {
    assert_eq!(format_money(0), "0.00");
    assert_eq!(format_money(123_456_789), "1,234,567.89");
    assert_eq!(format_money(-5_05), "-5.05");
}

#[test]
fn labels_fall_back_to_key_and_fill_placeholders() {
    let labels = Labels::default();

    assert_eq!(labels.get("no.such.key"), "no.such.key");
    assert_eq!(page_indicator(&labels, 2, 5, 42), "Page 2 of 5 · 42 rows");
}

#[test]
fn status_chips_show_counts() {
    let labels = Labels::default();
    let mut counts = BTreeMap::new();
    counts.insert(ProjectStatus::InProgress, 3);
    counts.insert(ProjectStatus::Completed, 2);

    assert_eq!(
        status_chip_label(&labels, Some(ProjectStatus::InProgress), &counts),
        "In progress (3)"
    );
    assert_eq!(status_chip_label(&labels, Some(ProjectStatus::OnHold), &counts), "On hold (0)");
    assert_eq!(status_chip_label(&labels, None, &counts), "All (5)");
}

#[test]
fn activation_keys_are_enter_and_space() {
    assert!(is_activation_key(&Key::Enter));
    assert!(is_activation_key(&Key::Character(" ".to_string())));
    assert!(!is_activation_key(&Key::Character("a".to_string())));
    assert!(!is_activation_key(&Key::Tab));
}

#[test]
fn stylesheet_switches_between_cards_and_grid() {
    assert!(TABLE_CSS.contains("@media (max-width: 767px)"));
    assert!(TABLE_CSS.contains("@media (min-width: 1280px)"));
    assert_eq!(
        header_class(true, Some(StickySide::Left)),
        "dt-header-sortable dt-sticky-left"
    );
    assert_eq!(header_class(false, None), "");
    assert!(table_cell_style(Density::Compact).contains("padding"));
}

proptest! {
    #[test]
    fn clamped_page_values_stay_in_range(size in any::<i64>(), index in any::<i64>()) {
        prop_assert!(clamp_page_size(size) >= 1);
        prop_assert_eq!(clamp_page_index(index) as i128, i128::from(index.max(0)));
    }

    #[test]
    fn rendered_page_is_always_within_page_count(
        rows in 0_i64..80,
        size in -5_i64..30,
        page in -10_i64..20,
    ) {
        let mut model = TableModel::new(crew_columns(), TableOptions::default()).with_data(crews(rows));
        model.set_page_size(size);
        model.set_page(page);

        prop_assert!(model.page_index() < model.page_count());
        prop_assert!(model.rows().len() <= model.page_size());
    }

    #[test]
    fn filter_writes_are_idempotent_and_pruned(
        key in "[a-z]{1,6}",
        value in proptest::option::of("[a-z]{0,4}"),
    ) {
        let start = Filters::new();
        let value = value.map(FilterValue::from);

        let once = with_filter(&start, &key, value.clone());
        let twice = with_filter(&once, &key, value);

        prop_assert_eq!(&once, &twice);
        prop_assert!(once.values().all(|value| !value.is_empty()));
    }
}
