mod list;
mod root;
mod schema;

pub use root::Cli;
