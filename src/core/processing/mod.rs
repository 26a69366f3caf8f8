pub mod crop;
pub mod ops;
pub mod pipeline;
pub mod resize;
