use crate::table::column::{ColumnDef, ACTIONS_COLUMN_ID};

pub const COLLAPSED_FIELD_COUNT: usize = 4;

/// One column's contribution to a row card, with its mobile hints resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CardCell {
    pub column_id: String,
    pub label: String,
    pub display: String,
    pub priority: u32,
    pub is_title: bool,
    pub is_subtitle: bool,
    pub mobile_hidden: bool,
}

impl CardCell {
    fn is_actions(&self) -> bool {
        self.column_id == ACTIONS_COLUMN_ID
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowCard {
    pub title: Option<CardCell>,
    pub subtitle: Option<CardCell>,
    pub actions: Option<CardCell>,
    pub fields: Vec<CardCell>,
}

impl RowCard {
    pub fn visible_fields(&self, expanded: bool) -> &[CardCell] {
        if expanded {
            &self.fields
        } else {
            &self.fields[..self.fields.len().min(COLLAPSED_FIELD_COUNT)]
        }
    }

    /// Fields hidden while the card is collapsed.
    pub fn overflow_count(&self) -> usize {
        self.fields.len().saturating_sub(COLLAPSED_FIELD_COUNT)
    }

    pub fn has_toggle(&self) -> bool {
        self.overflow_count() > 0
    }
}

/// Renders `row` through `columns`, preferring each column's formatter.
pub fn card_cells<T: 'static>(columns: &[&ColumnDef<T>], row: &T) -> Vec<CardCell> {
    columns
        .iter()
        .map(|column| {
            let meta = column.mobile_meta();
            let display = match &meta.formatter {
                Some(formatter) => formatter.format(&column.value(row), row),
                None => column.display(row),
            };
            CardCell {
                column_id: column.id.clone(),
                label: column.header.clone(),
                display,
                priority: meta.priority,
                is_title: meta.is_title,
                is_subtitle: meta.is_subtitle,
                mobile_hidden: meta.mobile_hidden,
            }
        })
        .collect()
}

fn lowest_priority<'a>(cells: impl Iterator<Item = (usize, &'a CardCell)>) -> Option<usize> {
    cells
        .min_by_key(|(idx, cell)| (cell.priority, *idx))
        .map(|(idx, _)| idx)
}

fn is_shown(cell: &CardCell) -> bool {
    !cell.mobile_hidden
}

/// Splits a row's cells into card slots.
pub fn build_card(cells: Vec<CardCell>) -> RowCard {
    let actions = cells.iter().position(|cell| cell.is_actions());
    let title = cells
        .iter()
        .position(|cell| is_shown(cell) && !cell.is_actions() && cell.is_title)
        .or_else(|| {
            lowest_priority(cells.iter().enumerate().filter(|(_, cell)| {
                is_shown(cell) && !cell.is_actions() && !cell.is_subtitle
            }))
        });
    let subtitle = cells.iter().enumerate().position(|(idx, cell)| {
        is_shown(cell) && !cell.is_actions() && cell.is_subtitle && Some(idx) != title
    });

    let mut card = RowCard::default();
    let mut rest: Vec<(usize, CardCell)> = Vec::new();
    for (idx, cell) in cells.into_iter().enumerate() {
        if Some(idx) == actions {
            card.actions = Some(cell);
        } else if Some(idx) == title {
            card.title = Some(cell);
        } else if Some(idx) == subtitle {
            card.subtitle = Some(cell);
        } else if is_shown(&cell) && !cell.is_actions() {
            rest.push((idx, cell));
        }
    }
    rest.sort_by_key(|(idx, cell)| (cell.priority, *idx));
    card.fields = rest.into_iter().map(|(_, cell)| cell).collect();
    card
}
