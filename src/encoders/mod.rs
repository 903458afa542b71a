pub mod algorithms;
pub mod pipeline;
