//! SQL side: identifiers, catalog types and DDL output.

pub mod ddl;
pub mod ident;
pub mod types;

pub use ddl::generate as generate_ddl;
pub use ident::{Casing, display_identifier, format_identifier};
pub use types::{DataTypeError, TypeDescriptor};
