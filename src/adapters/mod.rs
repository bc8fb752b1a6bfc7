// Concrete implementations of the domain ports: HTTP source, in-memory
// database stand-in, local file system storage.

pub mod database;
pub mod http;
pub mod storage;

pub use database::StaticExtractor;
pub use http::ApiExtractor;
pub use storage::LocalStorage;
