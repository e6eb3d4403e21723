pub mod client;
pub mod guard;
pub mod types;

pub use client::*;
pub use guard::*;
pub use types::*;
