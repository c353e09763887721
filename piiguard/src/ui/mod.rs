pub mod output_format;
pub mod summary;
pub mod theme;
