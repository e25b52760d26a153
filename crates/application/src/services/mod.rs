mod scheme_table;

pub use scheme_table::SchemeTable;
