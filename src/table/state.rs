use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEntry {
    pub column_id: String,
    pub descending: bool,
}

impl SortEntry {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: false,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            descending: true,
        }
    }
}

pub type Sorting = Vec<SortEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    None,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn of(sorting: &[SortEntry], column_id: &str) -> Self {
        match sorting.iter().find(|entry| entry.column_id == column_id) {
            None => SortIndicator::None,
            Some(entry) if entry.descending => SortIndicator::Descending,
            Some(_) => SortIndicator::Ascending,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            SortIndicator::None => "↕",
            SortIndicator::Ascending => "↑",
            SortIndicator::Descending => "↓",
        }
    }

    pub fn aria_sort(self) -> &'static str {
        match self {
            SortIndicator::None => "none",
            SortIndicator::Ascending => "ascending",
            SortIndicator::Descending => "descending",
        }
    }
}

/// Next sorting after a header activation on `column_id`.
///
/// Cycles none -> ascending -> descending -> none for that column. With
/// `extend` the rest of the list is kept; otherwise the result holds at most
/// the toggled column.
pub fn toggle_sorting(sorting: &[SortEntry], column_id: &str, extend: bool) -> Sorting {
    let current = sorting.iter().position(|entry| entry.column_id == column_id);
    let next_entry = match current.map(|idx| sorting[idx].descending) {
        None => Some(SortEntry::asc(column_id)),
        Some(false) => Some(SortEntry::desc(column_id)),
        Some(true) => None,
    };

    if !extend {
        return next_entry.into_iter().collect();
    }

    let mut next = sorting.to_vec();
    match (current, next_entry) {
        (Some(idx), Some(entry)) => next[idx] = entry,
        (Some(idx), None) => {
            next.remove(idx);
        }
        (None, Some(entry)) => next.push(entry),
        (None, None) => {}
    }
    next
}

pub fn clamp_page_size(size: i64) -> usize {
    usize::try_from(size.max(1)).unwrap_or(1)
}

pub fn clamp_page_index(index: i64) -> usize {
    usize::try_from(index.max(0)).unwrap_or(0)
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Density {
    Compact,
    #[default]
    Cozy,
    Comfortable,
}

impl Density {
    pub const ALL: [Density; 3] = [Density::Compact, Density::Cozy, Density::Comfortable];

    pub fn key(self) -> &'static str {
        match self {
            Density::Compact => "compact",
            Density::Cozy => "cozy",
            Density::Comfortable => "comfortable",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Density::ALL.into_iter().find(|density| density.key() == key)
    }

    pub fn cell_padding(self) -> &'static str {
        match self {
            Density::Compact => "2px 6px",
            Density::Cozy => "6px 8px",
            Density::Comfortable => "10px 12px",
        }
    }
}

pub type ColumnVisibility = BTreeMap<String, bool>;

pub fn is_column_visible(visibility: &ColumnVisibility, column_id: &str) -> bool {
    visibility.get(column_id).copied().unwrap_or(true)
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterValue::Text(text) if text.is_empty())
    }

    pub fn display(&self) -> String {
        match self {
            FilterValue::Text(text) => text.clone(),
            FilterValue::Integer(value) => value.to_string(),
            FilterValue::Bool(value) => value.to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

pub type Filters = BTreeMap<String, FilterValue>;

/// Merges one filter into `filters`. `None` and empty text remove the key.
pub fn with_filter(filters: &Filters, key: &str, value: Option<FilterValue>) -> Filters {
    let mut next = filters.clone();
    match value {
        Some(value) if !value.is_empty() => {
            next.insert(key.to_string(), value);
        }
        _ => {
            next.remove(key);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_toggle_cycles_and_replaces() {
        let first = toggle_sorting(&[], "name", false);
        assert_eq!(first, vec![SortEntry::asc("name")]);

        let second = toggle_sorting(&first, "name", false);
        assert_eq!(second, vec![SortEntry::desc("name")]);

        let third = toggle_sorting(&second, "name", false);
        assert!(third.is_empty());
    }

    #[test]
    fn plain_toggle_on_other_column_drops_previous_entries() {
        let sorting = vec![SortEntry::asc("name"), SortEntry::desc("city")];

        let next = toggle_sorting(&sorting, "budget", false);

        assert_eq!(next, vec![SortEntry::asc("budget")]);
    }

    #[test]
    fn extend_toggle_keeps_other_entries_in_place() {
        let sorting = vec![SortEntry::asc("name"), SortEntry::asc("city")];

        let appended = toggle_sorting(&sorting, "budget", true);
        assert_eq!(
            appended,
            vec![
                SortEntry::asc("name"),
                SortEntry::asc("city"),
                SortEntry::asc("budget")
            ]
        );

        let flipped = toggle_sorting(&appended, "name", true);
        assert_eq!(flipped[0], SortEntry::desc("name"));

        let removed = toggle_sorting(&flipped, "name", true);
        assert_eq!(removed, vec![SortEntry::asc("city"), SortEntry::asc("budget")]);
    }

    #[test]
    fn page_count_is_at_least_one() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 5);
    }

    #[test]
    fn clamps_page_size_and_index() {
        assert_eq!(clamp_page_size(0), 1);
        assert_eq!(clamp_page_size(-4), 1);
        assert_eq!(clamp_page_size(25), 25);
        assert_eq!(clamp_page_index(-1), 0);
        assert_eq!(clamp_page_index(3), 3);
    }

    #[test]
    fn density_keys_round_trip() {
        for density in Density::ALL {
            assert_eq!(Density::from_key(density.key()), Some(density));
        }
        assert_eq!(Density::from_key("roomy"), None);
    }
}
