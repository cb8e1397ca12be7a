//! Command implementations, one module per subcommand.

mod analyze;
mod deps;
mod importers;
mod layout;
mod read;
mod schema;
pub mod utils;

pub use analyze::execute as analyze_execute;
pub use deps::execute as deps_execute;
pub use importers::execute as importers_execute;
pub use layout::execute as layout_execute;
pub use read::execute as read_execute;
pub use schema::execute as schema_execute;
