mod list;

pub use list::ListCatalog;
