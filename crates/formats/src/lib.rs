pub mod regions;

pub use regions::*;
