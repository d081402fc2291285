//! Routing and per-section navigation memory

mod memory;
mod router;

pub use memory::NavigationMemory;
pub use router::{Route, Router};
