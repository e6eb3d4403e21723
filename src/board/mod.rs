pub mod draft;
pub mod export;
pub mod stats;
pub mod storage;
pub mod store;
pub mod types;

pub use draft::*;
pub use export::*;
pub use stats::*;
pub use store::*;
pub use types::*;
