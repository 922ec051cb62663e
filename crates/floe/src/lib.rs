mod config;
mod error;
mod generator;
mod layout;
mod status;
mod time;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::layout::*;
pub use crate::status::*;
pub use crate::time::*;
