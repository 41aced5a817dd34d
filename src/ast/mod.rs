pub mod expression;
pub mod source;
pub mod value;

pub use expression::*;
pub use source::*;
pub use value::*;
