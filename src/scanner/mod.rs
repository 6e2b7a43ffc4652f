pub mod index_reader;
pub mod line_scanner;

pub use index_reader::IndexReader;
pub use line_scanner::LineScanner;
