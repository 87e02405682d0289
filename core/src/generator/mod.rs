pub mod escape;
pub mod insert;

pub use escape::{escape_value, quote_identifier};
pub use insert::{generate_insert_header, generate_insert_lines, InsertStatementOptions};
