pub mod card;
pub mod column;
pub mod controllable;
pub mod debounce;
pub mod mobile_meta;
pub mod model;
pub mod state;

pub use card::{build_card, card_cells, CardCell, RowCard, COLLAPSED_FIELD_COUNT};
pub use column::{CellValue, ColumnDef, StickySide, ACTIONS_COLUMN_ID};
pub use controllable::{ChangeHandler, Controllable, Update};
pub use model::{RowKeyFn, TableCallbacks, TableInputs, TableModel, TableOptions};
pub use state::{
    ColumnVisibility, Density, FilterValue, Filters, SortEntry, SortIndicator, Sorting,
};
