//! Widgets shared by the console pages.
//!
//! Components do not own application data. They read from the store or a
//! descriptor at render time and report what a key asked for, leaving the
//! page to dispatch it.

mod pagination_control;
mod record_table;
mod search_bar;
mod side_menu;

pub use pagination_control::{PaginationControl, PaginationStyle};
pub use record_table::{RecordTable, TableView};
pub use search_bar::{SearchBar, SearchEvent};
pub use side_menu::{MenuEntry, SideMenu};
