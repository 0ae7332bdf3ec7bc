//! Picker controller: owns the geometry and the color, routes touches.
//!
//! A touch-down picks the region under the finger once. Moves and the
//! final touch-up keep editing that region even when the finger leaves it,
//! so a drag that starts on the triangle keeps steering saturation/value
//! while it wanders over the ring.
//!
//! The previous color is the one shown before the gesture: its first change
//! commits to the history, later ones only revise the current color.

use std::sync::Arc;

use floem::kurbo::Point;

use crate::color::{Channel, HsvColor};
use crate::config::PickerConfig;
use crate::error::{PickerError, PickerResult};
use crate::geometry::{distance, ensure_finite, mirror};
use crate::history::ColorHistory;
use crate::layout::PickerLayout;
use crate::math;
use crate::texture::{self, PixelGrid};

const BLACK: u32 = 0xFF00_0000;
const WHITE: u32 = 0xFFFF_FFFF;

/// Where a touch-down landed, in hit-test priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The saturation/value handle, grabbable even where it overhangs the triangle.
    Handle,
    Triangle,
    Ring,
    Slider(Channel),
    Outside,
}

/// Centers of every handle, in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandlePositions {
    /// On the ring's center-line at the current hue.
    pub hue: Point,
    /// Opposite the hue handle, through the ring center.
    pub hue_mirror: Point,
    pub sat_val: Point,
    /// Indexed by [`Channel::index`].
    pub sliders: [Point; 3],
}

impl HandlePositions {
    fn compute(layout: &PickerLayout, color: &HsvColor) -> Self {
        let hue = layout.center + color.ring_position(layout.radii.mid);
        let (r, g, b) = color.to_rgb();
        Self {
            hue,
            hue_mirror: mirror(hue, layout.center),
            sat_val: layout.triangle.position_for_rgb(r, g, b),
            sliders: layout
                .sliders
                .map(|slider| slider.handle_position(color.channel(slider.channel))),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub hue_ring: Arc<PixelGrid>,
    /// Top-left corner where `hue_ring` is drawn.
    pub hue_ring_origin: Point,
    pub sat_val_mask: Arc<PixelGrid>,
    /// Top-left corner where `sat_val_mask` is drawn, over a triangle filled with `chroma`.
    pub sat_val_mask_origin: Point,
    pub layout: PickerLayout,
    pub handles: HandlePositions,
    pub current_color: u32,
    pub previous_color: u32,
    pub chroma: u32,
}

struct Textures {
    hue_ring: Arc<PixelGrid>,
    sat_val_mask: Arc<PixelGrid>,
    /// Radii the textures were rasterized for.
    outer: f64,
    inner: f64,
}

type ColorChanged = Box<dyn FnMut(u32, u32)>;

pub struct PickerController {
    config: PickerConfig,
    history: ColorHistory,
    layout: Option<PickerLayout>,
    textures: Option<Textures>,
    handles: HandlePositions,
    active_region: Option<Region>,
    /// The touch in progress has already committed a change.
    gesture_committed: bool,
    on_color_changed: Option<ColorChanged>,
}

impl Default for PickerController {
    fn default() -> Self {
        Self::new(PickerConfig::default())
    }
}

impl PickerController {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            config,
            history: ColorHistory::default(),
            layout: None,
            textures: None,
            handles: HandlePositions::default(),
            active_region: None,
            gesture_committed: false,
            on_color_changed: None,
        }
    }

    /// Start from `argb` without firing the change callback.
    pub fn with_color(mut self, argb: u32) -> Self {
        let color = HsvColor::from_argb(argb);
        self.history = ColorHistory::new(color, color);
        self.refresh_handles();
        self
    }

    /// Called with `(previous, current)` after every accepted color change.
    /// During a drag `previous` stays the color from before the touch.
    pub fn set_on_color_changed(&mut self, callback: impl FnMut(u32, u32) + 'static) {
        self.on_color_changed = Some(Box::new(callback));
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn color(&self) -> u32 {
        self.history.current().to_argb()
    }

    pub fn previous_color(&self) -> u32 {
        self.history.previous().to_argb()
    }

    pub fn current(&self) -> &HsvColor {
        self.history.current()
    }

    pub fn previous(&self) -> &HsvColor {
        self.history.previous()
    }

    /// Replace the current color. Setting the color it already shows is a
    /// no-op, so the held hue of a gray survives a host echoing it back.
    pub fn set_color(&mut self, argb: u32) -> bool {
        if self.color() == argb || !self.history.commit(HsvColor::from_argb(argb)) {
            return false;
        }
        self.color_changed();
        true
    }

    pub fn layout(&self) -> Option<&PickerLayout> {
        self.layout.as_ref()
    }

    pub fn handles(&self) -> &HandlePositions {
        &self.handles
    }

    /// Region fixed by the touch in progress, if any.
    pub fn active_region(&self) -> Option<Region> {
        self.active_region
    }

    /// Recompute the geometry for a new widget size.
    ///
    /// Textures are rasterized again only when the ring radii change.
    pub fn on_layout(&mut self, width: f64, height: f64) -> PickerResult<()> {
        let layout = PickerLayout::compute(width, height, &self.config).map_err(|err| {
            tracing::warn!(%err, width, height, "rejected picker layout");
            err
        })?;

        let outer = layout.radii.outer;
        let inner = layout.radii.inner;
        let stale = match &self.textures {
            Some(t) => t.outer != outer || t.inner != inner,
            None => true,
        };
        if stale {
            let hue_ring = texture::generate_hue_ring(outer, inner)?;
            let sat_val_mask = texture::generate_sat_val_mask(inner)?;
            self.textures = Some(Textures {
                hue_ring: Arc::new(hue_ring),
                sat_val_mask: Arc::new(sat_val_mask),
                outer,
                inner,
            });
        }

        tracing::debug!(
            width,
            height,
            outer,
            inner,
            regenerated = stale,
            "picker layout"
        );
        self.layout = Some(layout);
        self.refresh_handles();
        Ok(())
    }

    /// Hit-test a point. Before the first layout everything is outside.
    pub fn classify(&self, p: Point) -> Region {
        let Some(layout) = &self.layout else {
            return Region::Outside;
        };
        if distance(p, self.handles.sat_val) < layout.sat_val_hit_radius {
            return Region::Handle;
        }
        if layout.triangle.contains(p) {
            return Region::Triangle;
        }
        if layout.radii.annulus_contains(distance(p, layout.center)) {
            return Region::Ring;
        }
        layout
            .sliders
            .iter()
            .find(|slider| slider.contains(p, layout.slider_handle_radius))
            .map_or(Region::Outside, |slider| Region::Slider(slider.channel))
    }

    /// Start a touch. Returns whether it landed on anything interactive.
    pub fn on_touch_down(&mut self, x: f64, y: f64) -> PickerResult<bool> {
        let p = checked_point(x, y)?;
        let region = self.classify(p);
        tracing::trace!(?region, x, y, "touch down");
        self.active_region = Some(region);
        self.gesture_committed = false;
        Ok(self.apply(region, p))
    }

    /// Continue a touch in the region chosen at touch-down.
    pub fn on_touch_move(&mut self, x: f64, y: f64) -> PickerResult<bool> {
        let p = checked_point(x, y)?;
        match self.active_region {
            Some(region) => Ok(self.apply(region, p)),
            None => Ok(false),
        }
    }

    /// Finish a touch: apply the last position, then release the region.
    pub fn on_touch_up(&mut self, x: f64, y: f64) -> PickerResult<bool> {
        let region = self.active_region.take();
        let applied =
            checked_point(x, y).map(|p| region.is_some_and(|region| self.apply(region, p)));
        self.gesture_committed = false;
        applied
    }

    /// Drop the touch in progress without applying anything.
    pub fn cancel_touch(&mut self) {
        self.active_region = None;
        self.gesture_committed = false;
    }

    /// Snapshot for drawing; `None` until the first successful layout.
    pub fn render_state(&self) -> Option<RenderState> {
        let layout = self.layout?;
        let textures = self.textures.as_ref()?;
        Some(RenderState {
            hue_ring: Arc::clone(&textures.hue_ring),
            hue_ring_origin: layout.ring_origin(),
            sat_val_mask: Arc::clone(&textures.sat_val_mask),
            sat_val_mask_origin: layout.mask_origin(),
            layout,
            handles: self.handles,
            current_color: self.color(),
            previous_color: self.previous_color(),
            chroma: self.history.current().chroma(),
        })
    }

    fn apply(&mut self, region: Region, p: Point) -> bool {
        let Some(layout) = self.layout else {
            return false;
        };
        let mut next = *self.history.current();
        match region {
            Region::Handle | Region::Triangle => {
                let weights = layout.triangle.shade_weights(layout.triangle.project(p));
                let alpha = next.alpha();
                let darkened = math::blend_argb(
                    math::with_alpha(next.chroma(), alpha),
                    math::with_alpha(BLACK, alpha),
                    weights.black,
                );
                next.set_preserving_hue(darkened);
                let lightened = math::blend_argb(
                    next.to_argb(),
                    math::with_alpha(WHITE, alpha),
                    weights.white,
                );
                next.set_preserving_hue(lightened);
            }
            Region::Ring => {
                next.set_hue_from_point(p.x - layout.center.x, p.y - layout.center.y);
            }
            Region::Slider(channel) => {
                let value = layout.slider(channel).channel_from_x(p.x);
                next.set_channel(channel, value);
            }
            Region::Outside => return false,
        }
        let changed = if self.gesture_committed {
            self.history.revise(next)
        } else {
            self.history.commit(next)
        };
        if changed {
            self.gesture_committed = true;
            self.color_changed();
        }
        true
    }

    fn color_changed(&mut self) {
        self.refresh_handles();
        let previous = self.previous_color();
        let current = self.color();
        tracing::trace!("color committed {previous:08X} -> {current:08X}");
        if let Some(callback) = self.on_color_changed.as_mut() {
            callback(previous, current);
        }
    }

    fn refresh_handles(&mut self) {
        if let Some(layout) = &self.layout {
            self.handles = HandlePositions::compute(layout, self.history.current());
        }
    }
}

fn checked_point(x: f64, y: f64) -> PickerResult<Point> {
    ensure_finite(x, y).map_err(|err: PickerError| {
        tracing::warn!(%err, "ignoring touch");
        err
    })
}
