use std::collections::BTreeSet;

use dioxus::prelude::*;

use crate::table::{build_card, card_cells, CardCell, RowCard};
use crate::ui::i18n::Labels;
use crate::ui::table::data_table::{DataTableProps, PageView};
use crate::ui::table::grid::SKELETON_ROW_COUNT;
use crate::ui::table::handle::TableHandle;
use crate::ui::table::styles::{card_field_style, card_header_style, card_style};

/// Label of the expand/collapse button under a card.
pub fn toggle_label(labels: &Labels, card: &RowCard, expanded: bool) -> String {
    if expanded {
        labels.get("table.show_less")
    } else {
        labels.format(
            "table.show_more",
            &[("count", card.overflow_count().to_string())],
        )
    }
}

/// A data column with the actions id fills the header slot when the caller
/// gives no actions renderer.
pub fn fallback_actions(card: &RowCard, has_renderer: bool) -> Option<&CardCell> {
    if has_renderer {
        None
    } else {
        card.actions.as_ref()
    }
}

/// Forgets expanded cards whose rows left the page.
pub fn prune_expanded<'a>(
    expanded: &mut BTreeSet<String>,
    current: impl IntoIterator<Item = &'a str>,
) {
    let current: BTreeSet<&str> = current.into_iter().collect();
    expanded.retain(|key| current.contains(key.as_str()));
}

pub fn cards<T: Clone + PartialEq + 'static>(
    handle: TableHandle<T>,
    props: &DataTableProps<T>,
    page: &PageView<T>,
    mut expanded_keys: CopyValue<BTreeSet<String>>,
) -> Element {
    if props.loading {
        let placeholders = (0..SKELETON_ROW_COUNT).map(|idx| {
            rsx! {
                div { key: "skeleton-{idx}", style: card_style(false), "aria-hidden": "true",
                    div { class: "dt-skeleton-bar", style: "width: 60%; margin-bottom: 8px;" }
                    div { class: "dt-skeleton-bar" }
                }
            }
        });
        return rsx! {
            div { class: "dt-cards", {placeholders} }
        };
    }

    let rows: Vec<(String, T, RowCard)> = handle.with(|model| {
        let columns = model.visible_columns();
        page.rows
            .iter()
            .map(|(key, row)| (key.clone(), row.clone(), build_card(card_cells(&columns, row))))
            .collect()
    });
    prune_expanded(
        &mut expanded_keys.write(),
        rows.iter().map(|(key, _, _)| key.as_str()),
    );

    if rows.is_empty() {
        let empty_label = props.labels.get("table.empty");
        let empty = props
            .empty_content
            .clone()
            .unwrap_or_else(|| rsx! { "{empty_label}" });
        return rsx! {
            div { class: "dt-cards",
                div { style: card_style(false), {empty} }
            }
        };
    }

    let labels = props.labels.clone();
    let on_row_click = props.on_row_click;
    let row_actions = props.row_actions.clone();
    let expanded_now = expanded_keys.read().clone();

    let items = rows.into_iter().map(|(key, row, card)| {
        let expanded = expanded_now.contains(&key);
        let title = card.title.as_ref().map(|cell| cell.display.clone()).unwrap_or_default();
        let subtitle = card.subtitle.as_ref().map(|cell| {
            rsx! {
                div { style: "color: #666; font-size: 13px;", "{cell.display}" }
            }
        });
        let fallback =
            fallback_actions(&card, row_actions.is_some()).map(|cell| cell.display.clone());
        let rendered = row_actions
            .as_ref()
            .map(|render| render.render(&row))
            .or_else(|| fallback.map(|text| rsx! { "{text}" }));
        let actions = rendered.map(|rendered| {
            rsx! {
                div { onclick: move |event: MouseEvent| event.stop_propagation(), {rendered} }
            }
        });
        let fields = card.visible_fields(expanded).iter().map(|field| {
            rsx! {
                div { key: "{field.column_id}", style: card_field_style(),
                    span { style: "color: #666;", "{field.label}" }
                    span { "{field.display}" }
                }
            }
        });
        let toggle = card.has_toggle().then(|| {
            let text = toggle_label(&labels, &card, expanded);
            let toggle_key = key.clone();
            let aria_expanded = if expanded { "true" } else { "false" };
            let mut expanded_keys = expanded_keys;
            rsx! {
                button {
                    "aria-expanded": aria_expanded,
                    onclick: move |event: MouseEvent| {
                        event.stop_propagation();
                        {
                            let mut keys = expanded_keys.write();
                            if !keys.remove(&toggle_key) {
                                keys.insert(toggle_key.clone());
                            }
                        }
                        handle.refresh();
                    },
                    "{text}"
                }
            }
        });
        let clicked = row.clone();
        rsx! {
            div {
                key: "{key}",
                style: card_style(on_row_click.is_some()),
                onclick: move |_| {
                    if let Some(handler) = on_row_click {
                        handler.call(clicked.clone());
                    }
                },
                div { style: card_header_style(),
                    div {
                        strong { "{title}" }
                        {subtitle}
                    }
                    {actions}
                }
                {fields}
                {toggle}
            }
        }
    });

    rsx! {
        div { class: "dt-cards", {items} }
    }
}
