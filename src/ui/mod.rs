pub mod app;
pub mod columns;
pub mod i18n;
pub mod state;
pub mod table;
