pub mod geometry;
pub mod table;

pub use geometry::{LayoutCursor, PageGeometry};
pub use table::TableModel;
