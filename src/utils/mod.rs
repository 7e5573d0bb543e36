pub mod version;

pub use version::{simplify, Version};
