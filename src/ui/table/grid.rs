use dioxus::prelude::*;

use crate::table::{SortIndicator, StickySide};
use crate::ui::table::data_table::{DataTableProps, PageView};
use crate::ui::table::handle::TableHandle;
use crate::ui::table::styles::{
    header_class, sticky_class, table_cell_style, table_header_cell_style, table_style,
};

pub const SKELETON_ROW_COUNT: usize = 3;

/// Enter and Space activate a focused sortable header.
pub fn is_activation_key(key: &Key) -> bool {
    match key {
        Key::Enter => true,
        Key::Character(text) => text == " ",
        _ => false,
    }
}

/// Arrow plus the position inside a multi-column sort, e.g. "↑2".
pub fn sort_badge(indicator: SortIndicator, rank: Option<usize>) -> String {
    match (indicator, rank) {
        (SortIndicator::None, _) | (_, None) => indicator.symbol().to_string(),
        (_, Some(rank)) => format!("{}{rank}", indicator.symbol()),
    }
}

struct HeaderView {
    id: String,
    header: String,
    sortable: bool,
    sticky: Option<StickySide>,
    indicator: SortIndicator,
    badge: String,
}

struct RowView<T> {
    key: String,
    row: T,
    cells: Vec<(String, Option<StickySide>)>,
}

pub fn grid<T: Clone + PartialEq + 'static>(
    handle: TableHandle<T>,
    props: &DataTableProps<T>,
    page: &PageView<T>,
) -> Element {
    let (headers, rows, density) = handle.with(|model| {
        let columns = model.visible_columns();
        let headers: Vec<HeaderView> = columns
            .iter()
            .map(|column| {
                let indicator = model.sort_indicator(&column.id);
                HeaderView {
                    id: column.id.clone(),
                    header: column.header.clone(),
                    sortable: column.sortable,
                    sticky: column.sticky,
                    indicator,
                    badge: if column.sortable {
                        sort_badge(indicator, model.sort_rank(&column.id))
                    } else {
                        String::new()
                    },
                }
            })
            .collect();
        let rows: Vec<RowView<T>> = page
            .rows
            .iter()
            .map(|(key, row)| RowView {
                key: key.clone(),
                row: row.clone(),
                cells: columns
                    .iter()
                    .map(|column| (column.display(row), column.sticky))
                    .collect(),
            })
            .collect();
        (headers, rows, model.density())
    });

    let has_actions = props.row_actions.is_some();
    let column_count = headers.len() + usize::from(has_actions);
    let header_style = table_header_cell_style(density);
    let cell_style = table_cell_style(density);
    let actions_label = props.labels.get("table.actions");

    let header_cells = headers.into_iter().map(|header| {
        let sortable = header.sortable;
        let click_id = header.id.clone();
        let key_id = header.id.clone();
        let aria_sort = header.indicator.aria_sort();
        let tab_index = if sortable { "0" } else { "-1" };
        rsx! {
            th {
                key: "{header.id}",
                class: header_class(sortable, header.sticky),
                style: "{header_style}",
                tabindex: tab_index,
                "aria-sort": aria_sort,
                onclick: move |event: MouseEvent| {
                    if sortable {
                        let extend = event.modifiers().contains(Modifiers::SHIFT);
                        handle.update(|model| model.toggle_sort(&click_id, extend));
                    }
                },
                onkeydown: move |event: KeyboardEvent| {
                    if sortable && is_activation_key(&event.key()) {
                        event.prevent_default();
                        let extend = event.modifiers().contains(Modifiers::SHIFT);
                        handle.update(|model| model.toggle_sort(&key_id, extend));
                    }
                },
                "{header.header}"
                if !header.badge.is_empty() {
                    span { style: "margin-left: 4px;", "{header.badge}" }
                }
            }
        }
    });

    let body = if props.loading {
        let skeleton = (0..SKELETON_ROW_COUNT).map(|idx| {
            let bars = (0..column_count.max(1)).map(|col| {
                rsx! {
                    td { key: "{col}", style: "{cell_style}", div { class: "dt-skeleton-bar" } }
                }
            });
            rsx! {
                tr { key: "skeleton-{idx}", "aria-hidden": "true", {bars} }
            }
        });
        rsx! {
            {skeleton}
        }
    } else if rows.is_empty() {
        let empty_label = props.labels.get("table.empty");
        let empty = props
            .empty_content
            .clone()
            .unwrap_or_else(|| rsx! { "{empty_label}" });
        rsx! {
            tr {
                td { style: "{cell_style}", colspan: column_count.max(1), {empty} }
            }
        }
    } else {
        let on_row_click = props.on_row_click;
        let row_actions = props.row_actions.clone();
        let items = rows.into_iter().map(|view| {
            let cells = view.cells.into_iter().enumerate().map(|(idx, (text, sticky))| {
                rsx! {
                    td { key: "{idx}", class: sticky_class(sticky), style: "{cell_style}", "{text}" }
                }
            });
            let actions_cell = row_actions.as_ref().map(|render| {
                let actions = render.render(&view.row);
                rsx! {
                    td {
                        class: "dt-sticky-right",
                        style: "{cell_style}",
                        onclick: move |event: MouseEvent| event.stop_propagation(),
                        {actions}
                    }
                }
            });
            let clicked = view.row.clone();
            let cursor = if on_row_click.is_some() { "pointer" } else { "default" };
            rsx! {
                tr {
                    key: "{view.key}",
                    style: "cursor: {cursor};",
                    onclick: move |_| {
                        if let Some(handler) = on_row_click {
                            handler.call(clicked.clone());
                        }
                    },
                    {cells}
                    {actions_cell}
                }
            }
        });
        rsx! {
            {items}
        }
    };

    rsx! {
        div { class: "dt-grid-scroll",
            table { style: table_style(),
                thead {
                    tr {
                        {header_cells}
                        if has_actions {
                            th { class: "dt-sticky-right", style: "{header_style}", "{actions_label}" }
                        }
                    }
                }
                tbody { {body} }
            }
        }
    }
}
