pub mod document_storage;
pub mod memory_storage;
