pub mod cards;
pub mod data_table;
pub mod grid;
pub mod handle;
pub mod pager;
pub mod styles;
pub mod toolbar;

pub use data_table::{
    ColumnSet, DataTable, DataTableProps, PageView, RowKey, RowRenderer, ToolbarSlot,
};
pub use handle::TableHandle;
