use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::table::mobile_meta::{normalize, Formatter, MobileMeta, MobileMetaHints};

pub const ACTIONS_COLUMN_ID: &str = "actions";

/// Typed scalar read from a row; used for sorting, filtering and formatters.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Number(value) => format!("{value}"),
            CellValue::Bool(value) => if *value { "Yes" } else { "No" }.to_string(),
            CellValue::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Total order for client-side sorting: empty values first, then values
    /// of the same kind compared naturally, mixed kinds by display text.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Empty, _) => Ordering::Less,
            (_, CellValue::Empty) => Ordering::Greater,
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Integer(a), CellValue::Number(b)) => (*a as f64).total_cmp(b),
            (CellValue::Number(a), CellValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => compare_text(a, b),
            (a, b) => compare_text(&a.display(), &b.display()),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickySide {
    Left,
    Right,
}

/// Where a cell's display text comes from.
pub enum CellSource<T> {
    Cell(Rc<dyn Fn(&T) -> String>),
    Accessor(Rc<dyn Fn(&T) -> CellValue>),
    Empty,
}

pub struct ColumnDef<T> {
    pub id: String,
    pub header: String,
    pub sortable: bool,
    pub visible: bool,
    pub hideable: bool,
    pub sticky: Option<StickySide>,
    accessor: Option<Rc<dyn Fn(&T) -> CellValue>>,
    cell: Option<Rc<dyn Fn(&T) -> String>>,
    mobile: MobileMetaHints<T>,
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            visible: self.visible,
            hideable: self.hideable,
            sticky: self.sticky,
            accessor: self.accessor.clone(),
            cell: self.cell.clone(),
            mobile: self.mobile.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("visible", &self.visible)
            .field("hideable", &self.hideable)
            .field("sticky", &self.sticky)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> ColumnDef<T> {
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            sortable: false,
            visible: true,
            hideable: true,
            sticky: None,
            accessor: None,
            cell: None,
            mobile: MobileMetaHints::default(),
        }
    }

    pub fn accessor<V: Into<CellValue> + 'static>(mut self, f: impl Fn(&T) -> V + 'static) -> Self {
        self.accessor = Some(Rc::new(move |row: &T| f(row).into()));
        self
    }

    pub fn cell(mut self, f: impl Fn(&T) -> String + 'static) -> Self {
        self.cell = Some(Rc::new(f));
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn always_visible(mut self) -> Self {
        self.hideable = false;
        self
    }

    pub fn sticky(mut self, side: StickySide) -> Self {
        self.sticky = Some(side);
        self
    }

    pub fn title(mut self) -> Self {
        self.mobile.is_title = Some(true);
        self
    }

    pub fn subtitle(mut self) -> Self {
        self.mobile.is_subtitle = Some(true);
        self
    }

    pub fn priority(mut self, priority: u32) -> Self {
        self.mobile.priority = Some(priority);
        self
    }

    pub fn mobile_hidden(mut self) -> Self {
        self.mobile.mobile_hidden = Some(true);
        self
    }

    pub fn formatter(mut self, f: impl Fn(&CellValue, &T) -> String + 'static) -> Self {
        self.mobile.formatter = Some(Formatter::new(f));
        self
    }

    pub fn mobile_meta(&self) -> MobileMeta<T> {
        normalize(&self.mobile)
    }

    pub fn source(&self) -> CellSource<T> {
        match (&self.cell, &self.accessor) {
            (Some(cell), _) => CellSource::Cell(cell.clone()),
            (None, Some(accessor)) => CellSource::Accessor(accessor.clone()),
            (None, None) => CellSource::Empty,
        }
    }

    /// Typed value for sorting and formatters. Columns with only a `cell`
    /// renderer compare by their rendered text.
    pub fn value(&self, row: &T) -> CellValue {
        match (&self.accessor, &self.cell) {
            (Some(accessor), _) => accessor(row),
            (None, Some(cell)) => CellValue::Text(cell(row)),
            (None, None) => CellValue::Empty,
        }
    }

    pub fn display(&self, row: &T) -> String {
        match self.source() {
            CellSource::Cell(cell) => cell(row),
            CellSource::Accessor(accessor) => accessor(row).display(),
            CellSource::Empty => String::new(),
        }
    }
}
