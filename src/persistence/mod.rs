pub mod error;
pub mod files;
pub mod history;
pub mod metadata;
pub mod migration;
pub mod slots;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use files::get_data_dir;
pub use store::Store;
