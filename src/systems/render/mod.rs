mod render_bridge;

pub use render_bridge::{BoundsProbe, RenderBridge, RenderSnapshot};
