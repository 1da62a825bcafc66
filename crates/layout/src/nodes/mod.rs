pub mod paragraph;
pub mod table;
pub mod table_solver;

pub use paragraph::ParagraphNode;
pub use table::TableNode;
pub use table_solver::TableSolver;
