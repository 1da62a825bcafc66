pub mod store;
pub mod surface;

pub use store::{DocumentStore, InMemoryDocumentStore, StoreError};
pub use surface::{DrawingSurface, SurfaceError, TextMeasurer};
