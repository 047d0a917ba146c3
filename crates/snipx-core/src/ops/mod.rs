pub mod memory;
pub mod repository;
pub mod snippet_ops;

pub use memory::MemoryRepo;
pub use repository::SnippetRepository;
pub use snippet_ops::NewSnippet;
