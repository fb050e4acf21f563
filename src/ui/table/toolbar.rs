use dioxus::prelude::*;

use crate::table::{Density, Sorting};
use crate::ui::i18n::Labels;
use crate::ui::table::data_table::{DataTableProps, PageView};
use crate::ui::table::handle::TableHandle;
use crate::ui::table::styles::{menu_style, toolbar_style};

/// "Page 2 of 5 · 42 rows", announced politely by screen readers.
pub fn page_indicator(labels: &Labels, page: usize, page_count: usize, total: usize) -> String {
    let position = labels.format(
        "table.page_of",
        &[("page", page.to_string()), ("count", page_count.to_string())],
    );
    let rows = labels.format("table.total", &[("total", total.to_string())]);
    format!("{position} · {rows}")
}

pub fn density_label(labels: &Labels, density: Density) -> String {
    labels.get(&format!("table.density.{}", density.key()))
}

struct ToolbarView {
    search: String,
    page_size: usize,
    page_size_options: Vec<usize>,
    density: Density,
    indicator: String,
    sorted: bool,
    hideable: Vec<(String, String, bool)>,
}

pub fn toolbar<T: Clone + PartialEq + 'static>(
    handle: TableHandle<T>,
    props: &DataTableProps<T>,
    page: &PageView<T>,
) -> Element {
    let labels = props.labels.clone();
    let view = handle.with(|model| {
        let mut page_size_options = model.options().page_size_options.clone();
        if !page_size_options.contains(&model.page_size()) {
            page_size_options.push(model.page_size());
            page_size_options.sort_unstable();
        }
        ToolbarView {
            search: model.search_input().to_string(),
            page_size: model.page_size(),
            page_size_options,
            density: model.density(),
            indicator: page_indicator(&labels, page.page(), page.page_count, page.total),
            sorted: !model.sorting().is_empty(),
            hideable: model
                .hideable_columns()
                .into_iter()
                .map(|column| {
                    (
                        column.id.clone(),
                        column.header.clone(),
                        model.is_column_visible(&column.id),
                    )
                })
                .collect(),
        }
    });

    let visibility_items = view.hideable.into_iter().map(|(id, header, visible)| {
        let column_id = id.clone();
        rsx! {
            label {
                key: "{id}",
                style: "display: flex; gap: 6px; align-items: center; padding: 4px 6px;",
                input {
                    r#type: "checkbox",
                    checked: visible,
                    onchange: move |event| {
                        let checked = event.checked();
                        handle.update(|model| model.set_column_visible(&column_id, checked));
                    },
                }
                "{header}"
            }
        }
    });

    let page_size_items = view.page_size_options.into_iter().map(|size| {
        rsx! {
            option { key: "{size}", value: "{size}", selected: size == view.page_size, "{size}" }
        }
    });

    let density_items = Density::ALL.into_iter().map(|density| {
        let text = density_label(&labels, density);
        let value = density.key();
        rsx! {
            option { key: "{value}", value: "{value}", selected: density == view.density, "{text}" }
        }
    });

    let rows_per_page = labels.get("table.rows_per_page");
    let columns_label = labels.get("table.columns");
    let density_caption = labels.get("table.density");
    let reset_label = labels.get("table.reset");
    let clear_sort_label = labels.get("table.clear_sort");
    let extra = props.toolbar_extra.as_ref().map(|slot| slot.render(handle));
    let density_value = view.density.key();

    rsx! {
        div { style: toolbar_style(),
            input {
                r#type: "search",
                "aria-label": labels.get("table.search"),
                placeholder: labels.get("table.search_placeholder"),
                value: "{view.search}",
                oninput: move |event| handle.type_search(event.value()),
            }
            label {
                "{rows_per_page} "
                select {
                    value: "{view.page_size}",
                    onchange: move |event| {
                        if let Ok(size) = event.value().parse::<i64>() {
                            handle.update(|model| model.set_page_size(size));
                        }
                    },
                    {page_size_items}
                }
            }
            details { style: "position: relative;",
                summary { "{columns_label}" }
                div { style: menu_style(), {visibility_items} }
            }
            label {
                "{density_caption} "
                select {
                    value: "{density_value}",
                    onchange: move |event| {
                        if let Some(density) = Density::from_key(&event.value()) {
                            handle.update(|model| model.set_density(density));
                        }
                    },
                    {density_items}
                }
            }
            if view.sorted {
                button {
                    onclick: move |_| {
                        handle.update(|model| model.set_sorting(Sorting::new()));
                    },
                    "{clear_sort_label}"
                }
            }
            button { onclick: move |_| handle.reset_all(), "{reset_label}" }
            {extra}
            span { "aria-live": "polite", style: "margin-left: auto;", "{view.indicator}" }
        }
    }
}
