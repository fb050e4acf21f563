use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

/// One page request against a server-side listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page_index: i64,
    pub page_size: i64,
    pub search: String,
    pub sort: Vec<SortSpec>,
    pub filters: BTreeMap<String, String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: 10,
            search: String::new(),
            sort: Vec::new(),
            filters: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    pub rows: Vec<T>,
    pub total_rows: i64,
}
