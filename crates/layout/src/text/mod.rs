pub mod lexer;
pub mod wrapper;

pub use lexer::{InlineLexer, StyledRun};
pub use wrapper::{LineItem, LineLayout, break_lines};
