mod tracing_layer;
mod catch_panic;

pub use tracing_layer::*;
pub use catch_panic::*;
