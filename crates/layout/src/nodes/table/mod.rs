pub mod node;

pub use node::TableNode;
