//! Render boundary
//!
//! The simulation never draws. Each frame a host asks for an ordered list of
//! screen-space draw commands and uploads them as GPU instances.

pub mod draw;
pub mod instance;

pub use draw::{DrawCommand, DrawKind, DrawLayer, build_draw_list, to_instances};
pub use instance::{DrawInstance, as_bytes, colors};
