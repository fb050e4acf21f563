use crate::table::{Density, StickySide};

pub const BORDER: &str = "1px solid #bbb";

/// Viewport switching and sticky edges. Cards below 768px; grid with pinned
/// edge columns up to 1279px; static edges from 1280px.
pub const TABLE_CSS: &str = "
.dt-root { display: flex; flex-direction: column; gap: 8px; min-height: 0; }
.dt-cards { display: none; flex-direction: column; gap: 8px; }
.dt-grid-scroll { display: block; overflow: auto; flex: 1; min-height: 0; }
.dt-sticky-left, .dt-sticky-right { position: sticky; background: #fff; z-index: 2; }
.dt-sticky-left { left: 0; box-shadow: 2px 0 0 #e4e4e4; }
.dt-sticky-right { right: 0; box-shadow: -2px 0 0 #e4e4e4; }
.dt-header-sortable { cursor: pointer; user-select: none; }
.dt-header-sortable:focus { outline: 2px solid #4a7bd0; outline-offset: -2px; }
.dt-skeleton-bar { height: 12px; border-radius: 4px; background: #e8e8e8; }
@media (max-width: 767px) {
  .dt-grid-scroll { display: none; }
  .dt-cards { display: flex; }
}
@media (min-width: 1280px) {
  .dt-sticky-left, .dt-sticky-right { position: static; box-shadow: none; }
}
";

pub fn sticky_class(sticky: Option<StickySide>) -> &'static str {
    match sticky {
        Some(StickySide::Left) => "dt-sticky-left",
        Some(StickySide::Right) => "dt-sticky-right",
        None => "",
    }
}

pub fn header_class(sortable: bool, sticky: Option<StickySide>) -> String {
    let mut classes = Vec::new();
    if sortable {
        classes.push("dt-header-sortable");
    }
    let sticky = sticky_class(sticky);
    if !sticky.is_empty() {
        classes.push(sticky);
    }
    classes.join(" ")
}

pub fn table_header_cell_style(density: Density) -> String {
    format!(
        "border: {BORDER}; padding: {}; background: #f2f2f2; text-align: left; white-space: nowrap; position: sticky; top: 0; z-index: 3;",
        density.cell_padding()
    )
}

pub fn table_cell_style(density: Density) -> String {
    format!("border: {BORDER}; padding: {};", density.cell_padding())
}

pub fn table_style() -> &'static str {
    "border-collapse: collapse; width: 100%; border: 1px solid #bbb;"
}

pub fn toolbar_style() -> &'static str {
    "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;"
}

pub fn card_style(clickable: bool) -> String {
    let cursor = if clickable { "pointer" } else { "default" };
    format!(
        "border: {BORDER}; border-radius: 8px; padding: 10px 12px; background: #fff; cursor: {cursor};"
    )
}

pub fn card_header_style() -> &'static str {
    "display: flex; justify-content: space-between; align-items: flex-start; gap: 8px;"
}

pub fn card_field_style() -> &'static str {
    "display: flex; justify-content: space-between; gap: 12px; padding: 2px 0; font-size: 14px;"
}

pub fn pager_style() -> &'static str {
    "display: flex; gap: 8px; align-items: center; justify-content: flex-end;"
}

pub fn menu_style() -> &'static str {
    "position: absolute; min-width: 200px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;"
}
