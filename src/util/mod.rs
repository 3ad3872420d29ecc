pub mod common;

pub use common::UniformContext;
