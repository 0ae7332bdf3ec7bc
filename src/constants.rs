//! Sizing, color, and styling constants for the picker.

/// Ring thickness as a fraction of the outer radius is `1 / RING_THICKNESS_RATIO`
pub const RING_THICKNESS_RATIO: f64 = 5.0;

/// Padding around the picker frame
pub const PADDING: f64 = 5.0;

/// Thumb radius on the RGB sliders (capped by panel height)
pub const SLIDER_THUMB_RADIUS: f64 = 10.0;

/// Thumb radius on the saturation/value triangle
pub const SAT_VAL_THUMB_RADIUS: f64 = 10.0;

/// Radius of the small marker opposite the hue handle
pub const MIRROR_THUMB_RADIUS: f64 = 4.0;

/// Bounds on the frame's height/width ratio
pub const MIN_ASPECT: f64 = 1.25;
pub const MAX_ASPECT: f64 = 1.45;

/// Largest side of a rasterized texture, in pixels
pub const MAX_RASTER_SIDE: u32 = 8192;

/// Initial colors before anything is picked
pub const DEFAULT_CURRENT_COLOR: u32 = 0xFF22_AA22;
pub const DEFAULT_PREVIOUS_COLOR: u32 = 0xFF22_22AA;

/// Widget background behind the ring and panel
pub const BACKGROUND: u32 = 0xFF33_3333;

/// Contour stroke around the ring, triangle and swatch
pub const CONTOUR: u32 = 0xAA55_5555;

/// Fill of slider and hue handles
pub const THUMB_COLOR: u32 = 0xFFDD_DDDD;

/// Start color of every RGB slider track
pub const SLIDER_TRACK_START: u32 = 0x8800_0000;

/// Channel letters left of the sliders
pub const LABEL_COLOR: u32 = 0xDCDD_DDDD;

/// Drop shadow under the ring and triangle
pub const SHADOW_COLOR: u32 = 0x5500_0000;
pub const SHADOW_OFFSET: (f64, f64) = (7.0, 5.0);
pub const SHADOW_BLUR: f64 = 5.0;
