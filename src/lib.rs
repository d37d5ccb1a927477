pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod model;
pub mod motion;
pub mod render;
pub mod route;

// Scalar helpers shared by layout, projection and the scheduler
pub mod fast_math;

pub use error::{CloudError, Result};
