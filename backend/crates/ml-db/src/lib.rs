pub mod connection;
pub mod error;
pub mod repositories;
pub mod store;


pub use connection::pool::{PoolOptions, open_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::account_repository::AccountRepository;
pub use repositories::listen_repository::ListenRepository;
pub use repositories::user_repository::UserRepository;
pub use store::ListenStore;
pub use store::instrumented_store::InstrumentedStore;
pub use store::sqlite_listen_store::SqliteListenStore;
