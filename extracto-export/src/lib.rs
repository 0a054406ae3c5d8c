//! extracto-export: turn parsed transactions into a sorted table and write it out

pub mod table;
pub mod writer;

pub use table::{Column, ExportOptions, SortOrder, Table, TableExporter};
pub use writer::{write_csv, write_csv_file};
