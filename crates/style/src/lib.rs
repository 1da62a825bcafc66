pub mod dimension;
pub mod error;
pub mod font;
pub mod markup;
pub mod parsers;
pub mod rule;

pub use dimension::{Length, Margins, Orientation, PageSize, Unit};
pub use error::StyleError;
pub use font::FontId;
pub use markup::MarkupSyntax;
pub use rule::{StyleRule, StyleRuleTable};
