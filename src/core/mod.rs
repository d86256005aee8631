pub mod email;
pub mod merge;
pub mod merger;
