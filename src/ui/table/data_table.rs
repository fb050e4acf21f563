use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::table::model::declared_visibility;
use crate::table::model::TableWindow;
use crate::table::{
    ChangeHandler, ColumnDef, ColumnVisibility, Density, Filters, RowKeyFn, Sorting,
    TableCallbacks, TableInputs, TableModel, TableOptions,
};
use crate::ui::i18n::Labels;
use crate::ui::table::cards::cards;
use crate::ui::table::grid::grid;
use crate::ui::table::handle::{use_table_handle, TableHandle};
use crate::ui::table::pager::pager;
use crate::ui::table::styles::TABLE_CSS;
use crate::ui::table::toolbar::toolbar;

/// Column definitions shared by reference. Two sets are equal only when they
/// are the same allocation, so a parent should build its columns once.
pub struct ColumnSet<T>(Rc<Vec<ColumnDef<T>>>);

impl<T> ColumnSet<T> {
    pub fn new(columns: Vec<ColumnDef<T>>) -> Self {
        Self(Rc::new(columns))
    }

    pub fn to_vec(&self) -> Vec<ColumnDef<T>> {
        self.0.iter().cloned().collect()
    }

    /// Visibility as declared by the columns, for seeding a controlled map.
    pub fn declared_visibility(&self) -> ColumnVisibility {
        declared_visibility(&self.0)
    }
}

impl<T> Clone for ColumnSet<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> PartialEq for ColumnSet<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> From<Vec<ColumnDef<T>>> for ColumnSet<T> {
    fn from(columns: Vec<ColumnDef<T>>) -> Self {
        Self::new(columns)
    }
}

impl<T> fmt::Debug for ColumnSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

pub struct RowKey<T>(RowKeyFn<T>);

impl<T> RowKey<T> {
    pub fn new(key: impl Fn(&T) -> Option<String> + 'static) -> Self {
        Self(Rc::new(key))
    }
}

impl<T> Clone for RowKey<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> PartialEq for RowKey<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Renders per-row content such as the actions slot.
pub struct RowRenderer<T>(Rc<dyn Fn(&T) -> Element>);

impl<T> RowRenderer<T> {
    pub fn new(render: impl Fn(&T) -> Element + 'static) -> Self {
        Self(Rc::new(render))
    }

    pub fn render(&self, row: &T) -> Element {
        (self.0)(row)
    }
}

impl<T> Clone for RowRenderer<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> PartialEq for RowRenderer<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Extra toolbar content that drives the table through its handle, e.g. quick
/// filter chips calling `set_filter`.
pub struct ToolbarSlot<T: 'static>(Rc<dyn Fn(TableHandle<T>) -> Element>);

impl<T: 'static> ToolbarSlot<T> {
    pub fn new(render: impl Fn(TableHandle<T>) -> Element + 'static) -> Self {
        Self(Rc::new(render))
    }

    pub fn render(&self, handle: TableHandle<T>) -> Element {
        (self.0)(handle)
    }
}

impl<T: 'static> Clone for ToolbarSlot<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: 'static> PartialEq for ToolbarSlot<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Owned copy of the current page, shared by the toolbar, grid, cards and
/// pager of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub rows: Vec<(String, T)>,
    pub total: usize,
    pub page_count: usize,
    pub page_index: usize,
}

impl<T> PageView<T> {
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

impl<T: Clone> From<TableWindow<'_, T>> for PageView<T> {
    fn from(window: TableWindow<'_, T>) -> Self {
        Self {
            rows: window
                .rows
                .into_iter()
                .map(|(key, row)| (key, row.clone()))
                .collect(),
            total: window.total,
            page_count: window.page_count,
            page_index: window.page_index,
        }
    }
}

/// Every state concern comes as a value/handler pair. Passing the value makes
/// that concern controlled; leaving it out lets the table own it. `options`
/// and the initial column visibility are read when the table mounts.
#[derive(Props, Clone, PartialEq)]
pub struct DataTableProps<T: Clone + PartialEq + 'static> {
    pub data: Vec<T>,
    pub columns: ColumnSet<T>,
    #[props(default)]
    pub options: TableOptions,
    pub row_key: Option<RowKey<T>>,

    pub sorting: Option<Sorting>,
    pub on_sort_change: Option<EventHandler<Sorting>>,
    pub page_index: Option<usize>,
    pub on_page_change: Option<EventHandler<usize>>,
    pub page_size: Option<usize>,
    pub on_page_size_change: Option<EventHandler<usize>>,
    pub search: Option<String>,
    pub on_search_change: Option<EventHandler<String>>,
    pub visibility: Option<ColumnVisibility>,
    pub on_visibility_change: Option<EventHandler<ColumnVisibility>>,
    pub density: Option<Density>,
    pub on_density_change: Option<EventHandler<Density>>,
    pub filters: Option<Filters>,
    pub on_filters_change: Option<EventHandler<Filters>>,
    pub on_reset: Option<EventHandler<()>>,

    /// Row count reported by the server. Ignored while client paging is on.
    pub total: Option<usize>,
    #[props(default)]
    pub loading: bool,
    pub empty_content: Option<Element>,
    pub row_actions: Option<RowRenderer<T>>,
    pub on_row_click: Option<EventHandler<T>>,
    #[props(default)]
    pub labels: Labels,
    pub toolbar_extra: Option<ToolbarSlot<T>>,
}

fn forward<V: Clone + 'static>(handler: Option<EventHandler<V>>) -> Option<ChangeHandler<V>> {
    handler.map(|handler| {
        let forward: ChangeHandler<V> = Rc::new(move |value: &V| handler.call(value.clone()));
        forward
    })
}

impl<T: Clone + PartialEq + 'static> DataTableProps<T> {
    fn inputs(&self) -> TableInputs {
        TableInputs {
            sorting: self.sorting.clone(),
            page_index: self.page_index,
            page_size: self.page_size,
            search: self.search.clone(),
            visibility: self.visibility.clone(),
            density: self.density,
            filters: self.filters.clone(),
            total: self.total,
        }
    }

    fn callbacks(&self) -> TableCallbacks {
        TableCallbacks {
            on_sort_change: forward(self.on_sort_change),
            on_page_change: forward(self.on_page_change),
            on_page_size_change: forward(self.on_page_size_change),
            on_search_change: forward(self.on_search_change),
            on_visibility_change: forward(self.on_visibility_change),
            on_density_change: forward(self.on_density_change),
            on_filters_change: forward(self.on_filters_change),
            on_reset: self.on_reset.map(|handler| {
                let on_reset: Rc<dyn Fn()> = Rc::new(move || handler.call(()));
                on_reset
            }),
        }
    }
}

#[allow(non_snake_case)]
pub fn DataTable<T: Clone + PartialEq + 'static>(props: DataTableProps<T>) -> Element {
    let handle = use_table_handle(|| TableModel::new(props.columns.to_vec(), props.options.clone()));
    let mut mounted_columns = use_hook(|| CopyValue::new(props.columns.clone()));
    let expanded = use_hook(|| CopyValue::new(BTreeSet::<String>::new()));

    handle.track();
    let columns_changed = mounted_columns.read().clone() != props.columns;
    handle.with_mut_silent(|model| {
        if columns_changed {
            model.set_columns(props.columns.to_vec());
        }
        model.set_data(props.data.clone());
        model.set_row_key(props.row_key.as_ref().map(|key| key.0.clone()));
        model.sync(props.inputs(), props.callbacks());
    });
    if columns_changed {
        mounted_columns.set(props.columns.clone());
    }
    let page = handle.with(|model| PageView::from(model.window()));

    rsx! {
        style { "{TABLE_CSS}" }
        div { class: "dt-root",
            {toolbar(handle, &props, &page)}
            {grid(handle, &props, &page)}
            {cards(handle, &props, &page, expanded)}
            {pager(handle, &page, &props.labels)}
        }
    }
}
