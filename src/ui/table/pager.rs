use dioxus::prelude::*;

use crate::ui::i18n::Labels;
use crate::ui::table::data_table::PageView;
use crate::ui::table::handle::TableHandle;
use crate::ui::table::styles::pager_style;

/// Parses the jump-to-page box. Blank or non-numeric input is ignored;
/// out-of-range numbers are clamped by the model.
pub fn parse_page_jump(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

pub fn pager<T: 'static>(handle: TableHandle<T>, page: &PageView<T>, labels: &Labels) -> Element {
    if page.page_count <= 1 {
        return rsx! {};
    }

    let prev_label = labels.get("table.prev");
    let next_label = labels.get("table.next");
    let jump_label = labels.get("table.go_to_page");
    let of_label = labels.format("table.of_pages", &[("count", page.page_count.to_string())]);
    let current = page.page();
    let page_count = page.page_count;

    rsx! {
        nav { style: pager_style(), "aria-label": "pagination",
            button {
                disabled: !page.can_prev_page(),
                onclick: move |_| handle.update(|model| model.prev_page()),
                "{prev_label}"
            }
            label {
                input {
                    r#type: "number",
                    "aria-label": "{jump_label}",
                    min: "1",
                    max: "{page_count}",
                    value: "{current}",
                    style: "width: 4em;",
                    onchange: move |event| {
                        if let Some(target) = parse_page_jump(&event.value()) {
                            handle.update(|model| model.goto_page(target));
                        }
                    },
                }
                " {of_label}"
            }
            button {
                disabled: !page.can_next_page(),
                onclick: move |_| handle.update(|model| model.next_page()),
                "{next_label}"
            }
        }
    }
}
