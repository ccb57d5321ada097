pub mod json_backend;

use std::path::Path;

use crate::bills::BillBook;

pub use crate::errors::Result;

/// Abstraction over persistence backends capable of storing the bill
/// collection and snapshots of it.
pub trait StorageBackend: Send + Sync {
    fn save(&self, book: &BillBook) -> Result<()>;
    fn load(&self) -> Result<BillBook>;
    fn list_backups(&self) -> Result<Vec<String>>;
    fn backup(&self, book: &BillBook, note: Option<&str>) -> Result<()>;
    fn restore(&self, backup_name: &str) -> Result<BillBook>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// forward to the JSON codec when not overridden.
    fn save_to_path(&self, book: &BillBook, path: &Path) -> Result<()> {
        json_backend::save_book_to_path(book, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<BillBook> {
        json_backend::load_book_from_path(path)
    }
}

pub use json_backend::JsonStorage;
