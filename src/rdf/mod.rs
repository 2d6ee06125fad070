pub mod format;
pub mod jsonld;
pub mod reader;
pub mod writer;
