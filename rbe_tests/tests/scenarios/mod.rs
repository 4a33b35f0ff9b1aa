pub mod concurrent;
pub mod files;
pub mod project;
pub mod rejection;
