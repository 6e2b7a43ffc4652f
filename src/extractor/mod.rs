pub mod block_extractor;
pub mod result_writer;
pub mod summary;

pub use block_extractor::{extract_block, extract_from_file, BlockContext, Extraction};
pub use result_writer::{edited_path, ResultWriter};
pub use summary::RunSummary;
