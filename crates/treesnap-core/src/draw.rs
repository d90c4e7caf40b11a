//! Drawing vocabulary shared between the layout engine and exporters.
//!
//! - [`Direction`], [`LinkShape`], [`LinkStyle`] and [`LinkTile`] describe
//!   connector tiles: which sides a tile joins and whether it is solid or dashed.
//! - [`DrawIntent`] and [`Graphic`] describe a single "place this at (x, y)"
//!   instruction for a rasterizer.
//! - [`RenderLayer`] and [`DrawList`] keep intents grouped in z-order.

mod direction;
mod intent;
mod layer;

pub use direction::{Direction, LinkShape, LinkStyle, LinkTile};
pub use intent::{DrawIntent, Graphic, SpriteFrame, TextBlock};
pub use layer::{DrawList, RenderLayer};
