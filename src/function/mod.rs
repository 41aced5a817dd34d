mod definition;
mod statement;

pub use definition::*;
pub use statement::*;
