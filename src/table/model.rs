//! Table state orchestration: one [`Controllable`] per concern, plus the
//! derived row window, page math and row keys.
//!
//! The model is rendering-agnostic. The Dioxus layer owns one instance per
//! mounted table, feeds controlled values through [`TableModel::sync`] on
//! every render, and reads the window back out.

use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::table::column::ColumnDef;
use crate::table::controllable::{ChangeHandler, Controllable, Update};
use crate::table::debounce::{Debouncer, DEFAULT_SEARCH_DEBOUNCE};
use crate::table::state::{
    clamp_page_index, clamp_page_size, is_column_visible, page_count, toggle_sorting, with_filter,
    ColumnVisibility, Density, FilterValue, Filters, SortIndicator, Sorting,
};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

pub type RowKeyFn<T> = Rc<dyn Fn(&T) -> Option<String>>;

#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    pub initial_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub initial_density: Density,
    pub initial_sorting: Sorting,
    pub search_debounce: Duration,
    pub enable_client_sort: bool,
    pub enable_client_paging: bool,
    pub enable_client_search: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            initial_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            initial_density: Density::default(),
            initial_sorting: Sorting::new(),
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            enable_client_sort: true,
            enable_client_paging: true,
            enable_client_search: true,
        }
    }
}

impl TableOptions {
    /// Options for data that arrives already sorted, filtered and paginated.
    pub fn server() -> Self {
        Self {
            enable_client_sort: false,
            enable_client_paging: false,
            enable_client_search: false,
            ..Self::default()
        }
    }
}

/// Caller-owned values. `None` leaves that concern uncontrolled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableInputs {
    pub sorting: Option<Sorting>,
    pub page_index: Option<usize>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
    pub visibility: Option<ColumnVisibility>,
    pub density: Option<Density>,
    pub filters: Option<Filters>,
    pub total: Option<usize>,
}

#[derive(Clone, Default)]
pub struct TableCallbacks {
    pub on_sort_change: Option<ChangeHandler<Sorting>>,
    pub on_page_change: Option<ChangeHandler<usize>>,
    pub on_page_size_change: Option<ChangeHandler<usize>>,
    pub on_search_change: Option<ChangeHandler<String>>,
    pub on_visibility_change: Option<ChangeHandler<ColumnVisibility>>,
    pub on_density_change: Option<ChangeHandler<Density>>,
    pub on_filters_change: Option<ChangeHandler<Filters>>,
    pub on_reset: Option<Rc<dyn Fn()>>,
}

pub struct TableModel<T> {
    data: Vec<T>,
    columns: Vec<ColumnDef<T>>,
    row_key: Option<RowKeyFn<T>>,
    options: TableOptions,
    total: Option<usize>,
    sorting: Controllable<Sorting>,
    page_index: Controllable<usize>,
    page_size: Controllable<usize>,
    search: Controllable<String>,
    visibility: Controllable<ColumnVisibility>,
    density: Controllable<Density>,
    filters: Controllable<Filters>,
    search_echo: String,
    search_debounce: Debouncer<String>,
    on_reset: Option<Rc<dyn Fn()>>,
}

/// One render's worth of derived state, computed with a single pass over the
/// data.
#[derive(Debug)]
pub struct TableWindow<'a, T> {
    pub total: usize,
    pub page_count: usize,
    pub page_index: usize,
    pub rows: Vec<(String, &'a T)>,
}

impl<T> TableWindow<'_, T> {
    /// 1-based current page.
    pub fn page(&self) -> usize {
        self.page_index + 1
    }

    pub fn can_prev_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

pub fn declared_visibility<T>(columns: &[ColumnDef<T>]) -> ColumnVisibility {
    columns
        .iter()
        .map(|column| (column.id.clone(), column.visible))
        .collect()
}

impl<T: 'static> TableModel<T> {
    pub fn new(columns: Vec<ColumnDef<T>>, options: TableOptions) -> Self {
        let visibility = declared_visibility(&columns);
        Self {
            data: Vec::new(),
            row_key: None,
            total: None,
            sorting: Controllable::new(options.initial_sorting.clone()),
            page_index: Controllable::new(0),
            page_size: Controllable::new(options.initial_page_size.max(1)),
            search: Controllable::new(String::new()),
            visibility: Controllable::new(visibility),
            density: Controllable::new(options.initial_density),
            filters: Controllable::new(Filters::new()),
            search_echo: String::new(),
            search_debounce: Debouncer::new(options.search_debounce),
            on_reset: None,
            columns,
            options,
        }
    }

    pub fn with_data(mut self, data: Vec<T>) -> Self {
        self.data = data;
        self
    }

    pub fn with_row_key(mut self, row_key: RowKeyFn<T>) -> Self {
        self.row_key = Some(row_key);
        self
    }

    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
    }

    /// Replaces the column set. Visibility entries for new columns start from
    /// their declared default; choices for surviving columns are kept.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef<T>>) {
        let declared = declared_visibility(&columns);
        let mut kept = declared.clone();
        for (id, visible) in self.visibility.get() {
            if let Some(slot) = kept.get_mut(id) {
                *slot = *visible;
            }
        }
        self.columns = columns;
        self.visibility.rebase(declared, kept);
    }

    pub fn set_row_key(&mut self, row_key: Option<RowKeyFn<T>>) {
        self.row_key = row_key;
    }

    /// Applies the caller's controlled values and change observers for this
    /// render.
    pub fn sync(&mut self, inputs: TableInputs, callbacks: TableCallbacks) {
        if let Some(search) = &inputs.search {
            if !self.search_debounce.is_pending() {
                self.search_echo = search.clone();
            }
        }
        self.total = inputs.total;
        self.sorting.sync(inputs.sorting, callbacks.on_sort_change);
        self.page_index.sync(inputs.page_index, callbacks.on_page_change);
        self.page_size.sync(inputs.page_size, callbacks.on_page_size_change);
        self.search.sync(inputs.search, callbacks.on_search_change);
        self.visibility
            .sync(inputs.visibility, callbacks.on_visibility_change);
        self.density.sync(inputs.density, callbacks.on_density_change);
        self.filters.sync(inputs.filters, callbacks.on_filters_change);
        self.on_reset = callbacks.on_reset;
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&ColumnDef<T>> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDef<T>> {
        let visibility = self.visibility.get();
        self.columns
            .iter()
            .filter(|column| is_column_visible(visibility, &column.id))
            .collect()
    }

    pub fn hideable_columns(&self) -> Vec<&ColumnDef<T>> {
        self.columns.iter().filter(|column| column.hideable).collect()
    }

    // sorting

    pub fn sorting(&self) -> &Sorting {
        self.sorting.get()
    }

    pub fn sort_indicator(&self, column_id: &str) -> SortIndicator {
        SortIndicator::of(self.sorting.get(), column_id)
    }

    /// 1-based rank of `column_id` in a multi-column sort.
    pub fn sort_rank(&self, column_id: &str) -> Option<usize> {
        let sorting = self.sorting.get();
        if sorting.len() < 2 {
            return None;
        }
        sorting
            .iter()
            .position(|entry| entry.column_id == column_id)
            .map(|idx| idx + 1)
    }

    pub fn set_sorting(&mut self, update: impl Into<Update<Sorting>>) -> Sorting {
        self.sorting.set(update)
    }

    /// Header activation. Unknown or unsortable columns are ignored.
    pub fn toggle_sort(&mut self, column_id: &str, extend: bool) {
        let sortable = self.column(column_id).is_some_and(|column| column.sortable);
        if !sortable {
            debug!(column_id, "ignoring sort toggle on unsortable column");
            return;
        }
        let next = toggle_sorting(self.sorting.get(), column_id, extend);
        debug!(column_id, extend, ?next, "sort toggled");
        self.sorting.set(next);
    }

    // pagination

    pub fn total(&self) -> usize {
        if self.options.enable_client_paging {
            self.filtered_indices().len()
        } else {
            self.reported_total()
        }
    }

    fn reported_total(&self) -> usize {
        self.total.unwrap_or(self.data.len())
    }

    pub fn page_size(&self) -> usize {
        (*self.page_size.get()).max(1)
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total(), self.page_size())
    }

    /// Stored page index; may point past the last page after the data shrank.
    pub fn raw_page_index(&self) -> usize {
        *self.page_index.get()
    }

    pub fn page_index(&self) -> usize {
        self.raw_page_index().min(self.page_count() - 1)
    }

    /// 1-based current page.
    pub fn page(&self) -> usize {
        self.page_index() + 1
    }

    pub fn can_prev_page(&self) -> bool {
        self.page_index() > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index() + 1 < self.page_count()
    }

    pub fn set_page(&mut self, page_index: i64) {
        let next = clamp_page_index(page_index);
        self.page_index.set(next);
    }

    pub fn set_page_size(&mut self, page_size: i64) {
        let next = clamp_page_size(page_size);
        debug!(page_size = next, "page size changed");
        self.page_size.set(next);
        self.page_index.set(0);
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            let next = self.page_index() + 1;
            self.page_index.set(next);
        }
    }

    pub fn prev_page(&mut self) {
        if self.can_prev_page() {
            let prev = self.page_index() - 1;
            self.page_index.set(prev);
        }
    }

    /// Jumps to a 1-based page, clamped into `[1, page_count]`.
    pub fn goto_page(&mut self, page: i64) {
        let last = i64::try_from(self.page_count()).unwrap_or(i64::MAX);
        let page = page.clamp(1, last);
        self.set_page(page - 1);
    }

    // search

    /// Text currently shown in the search box.
    pub fn search_input(&self) -> &str {
        &self.search_echo
    }

    /// Settled search value.
    pub fn search(&self) -> &str {
        self.search.get()
    }

    pub fn type_search(&mut self, text: String, now: Instant) {
        self.search_echo = text.clone();
        self.search_debounce.push(text, now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search_debounce.deadline()
    }

    /// Forwards the typed text once the debounce window has elapsed.
    /// Returns whether a value settled.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search_debounce.poll(now) {
            Some(settled) => {
                self.commit_search(settled);
                true
            }
            None => false,
        }
    }

    pub fn commit_search(&mut self, text: String) {
        if text == *self.search.get() {
            return;
        }
        debug!(search = %text, "search settled");
        self.search.set(text);
        self.page_index.set(0);
    }

    // visibility

    pub fn visibility(&self) -> &ColumnVisibility {
        self.visibility.get()
    }

    pub fn is_column_visible(&self, column_id: &str) -> bool {
        is_column_visible(self.visibility.get(), column_id)
    }

    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) {
        let hideable = self.column(column_id).is_some_and(|column| column.hideable);
        if !hideable {
            return;
        }
        let column_id = column_id.to_string();
        self.visibility.set(Update::with(move |current: &ColumnVisibility| {
            let mut next = current.clone();
            next.insert(column_id, visible);
            next
        }));
    }

    // density

    pub fn density(&self) -> Density {
        *self.density.get()
    }

    pub fn set_density(&mut self, density: Density) {
        self.density.set(density);
    }

    // filters

    pub fn filters(&self) -> &Filters {
        self.filters.get()
    }

    pub fn set_filter(&mut self, key: &str, value: Option<FilterValue>) {
        let next = with_filter(self.filters.get(), key, value);
        if next == *self.filters.get() {
            return;
        }
        self.filters.set(next);
        self.page_index.set(0);
    }

    /// Clears every filter and returns to the first page.
    pub fn reset_filters(&mut self) {
        if self.filters.get().is_empty() {
            return;
        }
        debug!("filters reset");
        self.filters.reset();
        self.page_index.set(0);
    }

    /// Returns every concern to its default in one pass and notifies
    /// `on_reset`.
    pub fn reset_all(&mut self) {
        debug!("table state reset");
        self.sorting.reset();
        self.visibility.reset();
        self.page_index.reset();
        self.page_size.reset();
        self.density.reset();
        self.search_debounce.cancel();
        self.search_echo = self.search.reset();
        self.filters.reset();
        if let Some(on_reset) = &self.on_reset {
            on_reset();
        }
    }

    // rows

    fn row_matches(&self, row: &T, needle: &str, searchable: &[&ColumnDef<T>]) -> bool {
        for (key, value) in self.filters.get() {
            if let Some(column) = self.column(key) {
                if column.display(row).to_lowercase() != value.display().to_lowercase() {
                    return false;
                }
            }
        }
        needle.is_empty()
            || searchable
                .iter()
                .any(|column| column.display(row).to_lowercase().contains(needle))
    }

    fn filtered_indices(&self) -> Vec<usize> {
        if !self.options.enable_client_search {
            return (0..self.data.len()).collect();
        }
        let needle = self.search.get().trim().to_lowercase();
        let searchable = if needle.is_empty() {
            Vec::new()
        } else {
            self.visible_columns()
        };
        self.data
            .iter()
            .enumerate()
            .filter(|(_, row)| self.row_matches(row, &needle, &searchable))
            .map(|(idx, _)| idx)
            .collect()
    }

    fn sort_indices(&self, indices: &mut [usize]) {
        let keys: Vec<(&ColumnDef<T>, bool)> = self
            .sorting
            .get()
            .iter()
            .filter_map(|entry| {
                self.column(&entry.column_id)
                    .map(|column| (column, entry.descending))
            })
            .collect();
        if keys.is_empty() {
            return;
        }
        indices.sort_by(|a, b| {
            let (row_a, row_b) = (&self.data[*a], &self.data[*b]);
            keys.iter()
                .map(|(column, descending)| {
                    let ordering = column.value(row_a).compare(&column.value(row_b));
                    if *descending {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Filters, sorts and slices the data once and reports the page math
    /// alongside the keyed rows.
    pub fn window(&self) -> TableWindow<'_, T> {
        let mut indices = self.filtered_indices();
        let total = if self.options.enable_client_paging {
            indices.len()
        } else {
            self.reported_total()
        };
        let page_size = self.page_size();
        let page_count = page_count(total, page_size);
        let page_index = self.raw_page_index().min(page_count - 1);
        if self.options.enable_client_sort {
            self.sort_indices(&mut indices);
        }
        let offset = if self.options.enable_client_paging {
            page_index * page_size
        } else {
            0
        };
        let limit = if self.options.enable_client_paging {
            page_size
        } else {
            indices.len()
        };
        let rows = indices
            .into_iter()
            .skip(offset)
            .take(limit)
            .enumerate()
            .map(|(position, idx)| {
                let row = &self.data[idx];
                (self.row_key(row, offset + position), row)
            })
            .collect();
        TableWindow {
            total,
            page_count,
            page_index,
            rows,
        }
    }

    /// Rows to render for the current state.
    pub fn rows(&self) -> Vec<&T> {
        self.window().rows.into_iter().map(|(_, row)| row).collect()
    }

    /// Rows to render paired with their keys.
    pub fn keyed_rows(&self) -> Vec<(String, &T)> {
        self.window().rows
    }

    pub fn row_key(&self, row: &T, index: usize) -> String {
        self.row_key
            .as_ref()
            .and_then(|key| key(row))
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| format!("row-{index}"))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::table::state::SortEntry;

    #[derive(Debug, Clone, PartialEq)]
    struct Site {
        id: i64,
        name: String,
    }

    fn site(id: i64, name: &str) -> Site {
        Site {
            id,
            name: name.to_string(),
        }
    }

    fn columns() -> Vec<ColumnDef<Site>> {
        vec![
            ColumnDef::new("name", "Name")
                .accessor(|site: &Site| site.name.clone())
                .sortable(),
            ColumnDef::new("id", "Id").accessor(|site: &Site| site.id),
        ]
    }

    fn names(model: &TableModel<Site>) -> Vec<String> {
        model.rows().iter().map(|site| site.name.clone()).collect()
    }

    #[test]
    fn header_cycle_matches_indicator() {
        let mut model = TableModel::new(columns(), TableOptions::default()).with_data(vec![
            site(1, "Charlie"),
            site(2, "Alice"),
            site(3, "Bob"),
        ]);

        model.toggle_sort("name", false);
        assert_eq!(names(&model), vec!["Alice", "Bob", "Charlie"]);
        assert_eq!(model.sort_indicator("name"), SortIndicator::Ascending);

        model.toggle_sort("name", false);
        assert_eq!(names(&model), vec!["Charlie", "Bob", "Alice"]);
        assert_eq!(model.sort_indicator("name"), SortIndicator::Descending);

        model.toggle_sort("name", false);
        assert_eq!(names(&model), vec!["Charlie", "Alice", "Bob"]);
        assert_eq!(model.sort_indicator("name"), SortIndicator::None);
    }

    #[test]
    fn unsortable_and_unknown_columns_are_ignored() {
        let mut model = TableModel::new(columns(), TableOptions::default());

        model.toggle_sort("id", false);
        model.toggle_sort("missing", true);

        assert!(model.sorting().is_empty());
    }

    #[test]
    fn controlled_sorting_reports_but_does_not_apply() {
        let seen = Rc::new(RefCell::new(Vec::<Sorting>::new()));
        let sink = seen.clone();
        let mut model = TableModel::new(columns(), TableOptions::default());
        model.sync(
            TableInputs {
                sorting: Some(Vec::new()),
                ..TableInputs::default()
            },
            TableCallbacks {
                on_sort_change: Some(Rc::new(move |sorting: &Sorting| {
                    sink.borrow_mut().push(sorting.clone())
                })),
                ..TableCallbacks::default()
            },
        );

        model.toggle_sort("name", false);

        assert!(model.sorting().is_empty());
        assert_eq!(*seen.borrow(), vec![vec![SortEntry::asc("name")]]);
    }

    #[test]
    fn server_mode_renders_rows_verbatim_and_uses_reported_total() {
        let mut model = TableModel::new(columns(), TableOptions::server())
            .with_data(vec![site(9, "Zed"), site(4, "Amy")]);
        model.sync(
            TableInputs {
                sorting: Some(vec![SortEntry::asc("name")]),
                page_index: Some(3),
                page_size: Some(2),
                total: Some(41),
                ..TableInputs::default()
            },
            TableCallbacks::default(),
        );

        assert_eq!(names(&model), vec!["Zed", "Amy"]);
        assert_eq!(model.total(), 41);
        assert_eq!(model.page_count(), 21);
        assert_eq!(model.page(), 4);
        assert!(model.can_next_page());
    }

    #[test]
    fn client_paging_slices_contiguously() {
        let data = (0..7).map(|idx| site(idx, &format!("s{idx}"))).collect();
        let mut model = TableModel::new(columns(), TableOptions::default()).with_data(data);

        model.set_page_size(3);
        model.goto_page(3);

        assert_eq!(model.page_count(), 3);
        assert_eq!(names(&model), vec!["s6"]);
        assert!(!model.can_next_page());

        model.goto_page(99);
        assert_eq!(model.page(), 3);
        model.goto_page(-5);
        assert_eq!(model.page(), 1);
    }

    #[test]
    fn stale_page_index_is_clamped_for_rendering() {
        let data = (0..25).map(|idx| site(idx, &format!("s{idx}"))).collect();
        let mut model = TableModel::new(columns(), TableOptions::default()).with_data(data);
        model.goto_page(3);

        model.set_data(vec![site(1, "only")]);

        assert_eq!(model.raw_page_index(), 2);
        assert_eq!(model.page(), 1);
        assert_eq!(names(&model), vec!["only"]);
    }

    #[test]
    fn cell_only_sortable_column_reorders_rows() {
        let columns = vec![ColumnDef::new("name", "Name")
            .cell(|site: &Site| site.name.clone())
            .sortable()];
        let mut model = TableModel::new(columns, TableOptions::default()).with_data(vec![
            site(1, "Charlie"),
            site(2, "Alice"),
            site(3, "Bob"),
        ]);

        model.toggle_sort("name", false);
        assert_eq!(names(&model), vec!["Alice", "Bob", "Charlie"]);

        model.toggle_sort("name", false);
        assert_eq!(names(&model), vec!["Charlie", "Bob", "Alice"]);
    }

    #[test]
    fn window_matches_individual_accessors() {
        let data = (0..23).map(|idx| site(idx, &format!("s{idx}"))).collect();
        let mut model = TableModel::new(columns(), TableOptions::default()).with_data(data);
        model.set_page_size(5);
        model.goto_page(5);

        let window = model.window();

        assert_eq!(window.total, model.total());
        assert_eq!(window.page_count, model.page_count());
        assert_eq!(window.page(), model.page());
        assert!(window.can_prev_page());
        assert!(!window.can_next_page());
        let keys: Vec<&str> = window.rows.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["row-20", "row-21", "row-22"]);
    }

    #[test]
    fn row_key_falls_back_to_index() {
        let model = TableModel::new(columns(), TableOptions::default())
            .with_data(vec![site(0, "a"), site(5, "b")])
            .with_row_key(Rc::new(|site: &Site| {
                (site.id != 0).then(|| format!("site-{}", site.id))
            }));

        let keys: Vec<String> = model.keyed_rows().into_iter().map(|(key, _)| key).collect();

        assert_eq!(keys, vec!["row-0".to_string(), "site-5".to_string()]);
    }
}
