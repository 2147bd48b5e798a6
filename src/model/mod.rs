pub mod config;
pub mod draft;
pub mod pattern;
pub mod reminder;
pub mod task;

pub use config::*;
pub use draft::*;
pub use pattern::*;
pub use reminder::*;
pub use task::*;
