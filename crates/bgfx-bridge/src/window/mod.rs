//! Native window handles and the optional winit render loop.

mod handle;
mod runtime;

pub use handle::NativeWindow;
pub use runtime::{Runtime, RuntimeConfig};
