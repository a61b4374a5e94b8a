// Infrastructure layer module
// Contains the SQLite adapters behind the domain repository interfaces

pub mod repositories;
pub mod schema;
