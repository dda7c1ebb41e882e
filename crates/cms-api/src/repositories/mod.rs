pub mod content;
pub mod memory;
pub mod traits;

pub use content::SqliteContentRepository;
pub use memory::InMemoryContentRepository;
pub use traits::{ContentPage, ContentRepository, StoreError};
