pub mod node;

pub use node::ParagraphNode;
