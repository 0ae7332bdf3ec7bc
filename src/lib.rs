//! # floem-triad
//!
//! A hue ring / saturation-value triangle / RGB slider color picker for
//! [Floem](https://github.com/lapce/floem).
//!
//! The widget is split in two. [`PickerController`] is the geometry and
//! color engine: it lays out the ring, triangle and sliders, rasterizes the
//! ring and triangle textures, hit-tests touches and keeps one current
//! color (with the previous one) consistent across all three controls. It
//! draws nothing and can be driven from any host. [`triangle_picker`] is the
//! Floem view that feeds it pointer events and paints its [`RenderState`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_triad::triangle_picker;
//!
//! let color = RwSignal::new(0xFF3B_82F6_u32);
//! // Use `triangle_picker(color)` in your Floem view tree.
//! ```
//!
//! Driving the controller directly:
//!
//! ```rust
//! use floem_triad::{PickerController, Region};
//!
//! let mut picker = PickerController::default().with_color(0xFFFF_0000);
//! picker.on_layout(250.0, 350.0).unwrap();
//! let center = picker.layout().unwrap().center;
//! assert!(picker.on_touch_down(center.x, center.y).unwrap());
//! assert_eq!(picker.active_region(), Some(Region::Triangle));
//! picker.on_touch_up(center.x, center.y).unwrap();
//! ```

mod color;
mod config;
mod constants;
mod controller;
mod error;
mod geometry;
mod history;
mod layout;
mod math;
mod picker_view;
mod slider;
mod texture;
mod triangle;

pub use color::{Channel, HsvColor};
pub use config::PickerConfig;
pub use controller::{HandlePositions, PickerController, Region, RenderState};
pub use error::{PickerError, PickerResult};
pub use geometry::{distance, distance_to_line, ensure_finite, mirror};
pub use history::ColorHistory;
pub use layout::{PickerLayout, RadiusSet, Swatch};
pub use math::blend_argb;
pub use slider::ChannelSlider;
pub use texture::{generate_hue_ring, generate_sat_val_mask, PixelGrid};
pub use triangle::{ShadeWeights, Triangle};

use floem::prelude::*;
use floem::reactive::RwSignal;

/// Creates the picker view with the default sizing.
///
/// The picker reads from and writes to `color` (packed `0xAARRGGBB`). Any
/// external changes to the signal are reflected in the UI, and user edits
/// update the signal.
pub fn triangle_picker(color: RwSignal<u32>) -> impl IntoView {
    triangle_picker_with_config(color, PickerConfig::default())
}

/// Like [`triangle_picker`], with custom sizing.
pub fn triangle_picker_with_config(color: RwSignal<u32>, config: PickerConfig) -> impl IntoView {
    picker_view::triangle_picker_view(color, PickerController::new(config))
}
