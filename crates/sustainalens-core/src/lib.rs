pub mod composite;
pub mod config;
pub mod emissions;
pub mod engine;
pub mod error;
pub mod interp;
pub mod rating;
pub mod record;
pub mod risk;
pub mod subscores;

pub use composite::*;
pub use config::*;
pub use emissions::*;
pub use engine::*;
pub use error::*;
pub use interp::*;
pub use rating::*;
pub use record::*;
pub use risk::*;
pub use subscores::*;
