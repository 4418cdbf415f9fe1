pub mod config;
pub mod types;
pub mod webhook;

pub mod prelude {
    pub use super::config::*;
    pub use super::types::*;
    pub use super::webhook::*;
}
