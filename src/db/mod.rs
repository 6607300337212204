pub mod index;
pub mod loader;

pub use index::{IndexStats, InvertedIndex, RecordIndex};
pub use loader::{RecordStore, load_file, load_records};
