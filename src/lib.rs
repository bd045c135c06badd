pub mod config;
pub mod error;
pub mod loader;
pub mod graph;
pub mod views;
pub mod output;
pub mod sync;
pub mod pipeline;

pub use config::{Config, TypeClassStyle};
pub use error::{CartographError, Result};
pub use graph::{Edge, Entity, EntityKind};
