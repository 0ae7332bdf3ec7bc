//! Floem view around [`PickerController`].
//!
//! Pointer events go straight to the controller; painting draws the
//! controller's [`RenderState`]. The two textures are wrapped in
//! `peniko::Image`s once per layout and only scaled by the renderer.

use std::sync::Arc;

use floem::kurbo::{Affine, Circle, Line, Point, Rect, Shape, Stroke};
use floem::peniko::{self, Blob, Color, Gradient};

use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::text::{Attrs, AttrsList, TextLayout};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::Channel;
use crate::constants;
use crate::controller::{PickerController, RenderState};
use crate::error::PickerResult;
use crate::layout::PickerLayout;
use crate::texture::PixelGrid;

/// Stripe marking the hue on the ring, as a fraction of ring thickness.
const HUE_STRIPE_LENGTH: f64 = 0.5;

enum PickerUpdate {
    Color(u32),
}

/// Image built from a [`PixelGrid`], keyed for the renderer's cache.
struct CachedImage {
    source: Arc<PixelGrid>,
    img: peniko::Image,
    hash: Vec<u8>,
    size: (f64, f64),
}

impl CachedImage {
    fn new(grid: &Arc<PixelGrid>) -> Self {
        let blob = Blob::new(Arc::new(grid.pixels().to_vec()));
        let img = peniko::Image::new(
            blob.clone(),
            peniko::Format::Rgba8,
            grid.width(),
            grid.height(),
        );
        Self {
            source: Arc::clone(grid),
            img,
            hash: blob.id().to_le_bytes().to_vec(),
            size: (grid.width() as f64, grid.height() as f64),
        }
    }

    fn draw(&self, cx: &mut PaintCx, origin: Point) {
        let rect = Rect::new(
            origin.x,
            origin.y,
            origin.x + self.size.0,
            origin.y + self.size.1,
        );
        cx.draw_img(
            floem_renderer::Img {
                img: self.img.clone(),
                hash: &self.hash,
            },
            rect,
        );
    }
}

pub(crate) struct TrianglePicker {
    id: ViewId,
    controller: PickerController,
    size: floem::taffy::prelude::Size<f32>,
    ring_img: Option<CachedImage>,
    mask_img: Option<CachedImage>,
    /// Channel letters with the top-left corner each is drawn at.
    labels: Vec<(TextLayout, Point)>,
}

/// Creates the hue ring / triangle / RGB slider picker bound to `color`
/// (packed `0xAARRGGBB`).
pub(crate) fn triangle_picker_view(
    color: RwSignal<u32>,
    controller: PickerController,
) -> TrianglePicker {
    let id = ViewId::new();

    create_effect(move |_| {
        let argb = color.get();
        id.update_state(PickerUpdate::Color(argb));
    });

    let mut controller = controller.with_color(color.get_untracked());
    controller.set_on_color_changed(move |_, current| {
        if color.get_untracked() != current {
            color.set(current);
        }
    });

    TrianglePicker {
        id,
        controller,
        size: Default::default(),
        ring_img: None,
        mask_img: None,
        labels: Vec::new(),
    }
    .style(|s| {
        s.flex_grow(1.0)
            .min_width(160.0)
            .min_height(220.0)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl TrianglePicker {
    fn relayout(&mut self) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        if self.controller.on_layout(w, h).is_err() {
            // Too small to hold the picker; paint nothing until it grows.
            self.ring_img = None;
            self.mask_img = None;
            self.labels.clear();
            return;
        }
        if let Some(state) = self.controller.render_state() {
            let stale = |cached: &Option<CachedImage>, grid: &Arc<PixelGrid>| {
                cached
                    .as_ref()
                    .map_or(true, |img| !Arc::ptr_eq(&img.source, grid))
            };
            if stale(&self.ring_img, &state.hue_ring) {
                self.ring_img = Some(CachedImage::new(&state.hue_ring));
            }
            if stale(&self.mask_img, &state.sat_val_mask) {
                self.mask_img = Some(CachedImage::new(&state.sat_val_mask));
            }
            self.labels = channel_labels(&state.layout);
        }
    }

    fn forward(&self, result: PickerResult<bool>) -> EventPropagation {
        match result {
            Ok(true) => {
                self.id.request_layout();
                EventPropagation::Stop
            }
            _ => EventPropagation::Continue,
        }
    }
}

impl View for TrianglePicker {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<PickerUpdate>() {
            match *update {
                PickerUpdate::Color(argb) => {
                    if self.controller.set_color(argb) {
                        self.id.request_layout();
                    }
                }
            }
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                let result = self.controller.on_touch_down(e.pos.x, e.pos.y);
                if matches!(result, Ok(true)) {
                    cx.update_active(self.id());
                }
                self.forward(result)
            }
            Event::PointerMove(e) => {
                if self.controller.active_region().is_some() {
                    let result = self.controller.on_touch_move(e.pos.x, e.pos.y);
                    self.forward(result)
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(e) => {
                let result = self.controller.on_touch_up(e.pos.x, e.pos.y);
                self.forward(result)
            }
            Event::FocusLost => {
                self.controller.cancel_touch();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        if layout.size != self.size {
            self.size = layout.size;
            self.relayout();
        }
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let Some(state) = self.controller.render_state() else {
            return;
        };
        let w = self.size.width as f64;
        let h = self.size.height as f64;

        cx.fill(
            &Rect::new(0.0, 0.0, w, h).to_rounded_rect(constants::PADDING),
            argb_color(constants::BACKGROUND),
            0.0,
        );

        let layout = &state.layout;
        let contour = argb_color(constants::CONTOUR);
        let center = layout.center;

        let shadow = Affine::translate(constants::SHADOW_OFFSET) * layout.silhouette();
        cx.fill(
            &shadow,
            argb_color(constants::SHADOW_COLOR),
            constants::SHADOW_BLUR,
        );

        if let Some(ring) = &self.ring_img {
            ring.draw(cx, state.hue_ring_origin);
        }
        let triangle = layout.triangle.path();
        cx.fill(&triangle, argb_color(state.chroma), 0.0);
        if let Some(mask) = &self.mask_img {
            mask.draw(cx, state.sat_val_mask_origin);
        }
        cx.stroke(&Circle::new(center, layout.radii.outer), contour, &Stroke::new(2.0));
        cx.stroke(&Circle::new(center, layout.radii.inner), contour, &Stroke::new(2.0));
        cx.stroke(&triangle, contour, &Stroke::new(2.0));

        paint_swatch(cx, &state, contour);
        paint_sliders(cx, &state);
        for (text, origin) in &self.labels {
            cx.draw_text(text, *origin);
        }
        paint_handles(cx, &state);
    }
}

/// Lay out "R", "G" and "B" centered on their anchors.
fn channel_labels(layout: &PickerLayout) -> Vec<(TextLayout, Point)> {
    let attrs = Attrs::new()
        .color(argb_color(constants::LABEL_COLOR))
        .font_size(layout.label_size as f32);
    Channel::ALL
        .iter()
        .map(|&channel| {
            let mut text = TextLayout::new();
            text.set_text(channel.label(), AttrsList::new(attrs));
            let size = text.size();
            let anchor = layout.label_anchor(channel);
            let origin = Point::new(anchor.x - size.width / 2.0, anchor.y - size.height / 2.0);
            (text, origin)
        })
        .collect()
}

/// Previous color on the left half of the swatch, current on the right.
fn paint_swatch(cx: &mut PaintCx, state: &RenderState, contour: Color) {
    let swatch = state.layout.swatch;
    let circle = Circle::new(swatch.center, swatch.radius);
    cx.fill(&circle, argb_color(state.previous_color), 0.0);
    cx.save();
    cx.clip(&Rect::new(
        swatch.center.x,
        swatch.center.y - swatch.radius,
        swatch.center.x + swatch.radius,
        swatch.center.y + swatch.radius,
    ));
    cx.fill(&circle, argb_color(state.current_color), 0.0);
    cx.restore();
    cx.stroke(&circle, contour, &Stroke::new(2.0));
}

fn paint_sliders(cx: &mut PaintCx, state: &RenderState) {
    let layout = &state.layout;
    let track_h = layout.slider_handle_radius / 2.0;
    for slider in &layout.sliders {
        let rect = Rect::new(
            slider.left_x,
            slider.y - track_h / 2.0,
            slider.right_x,
            slider.y + track_h / 2.0,
        );
        let gradient = Gradient::new_linear((slider.left_x, slider.y), (slider.right_x, slider.y))
            .with_stops([
                argb_color(constants::SLIDER_TRACK_START),
                argb_color(slider.channel.pure_color()),
            ]);
        // Gradient fills must go through a BezPath under vello.
        let path = rect.to_rounded_rect(track_h / 2.0).to_path(0.1);
        cx.fill(&path, &gradient, 0.0);
    }

    let thumb = argb_color(constants::THUMB_COLOR);
    for pos in state.handles.sliders {
        let circle = Circle::new(pos, layout.slider_handle_radius);
        cx.fill(&circle, thumb, 0.0);
        cx.stroke(&circle, Color::rgba8(0, 0, 0, 80), &Stroke::new(1.0));
    }
}

fn paint_handles(cx: &mut PaintCx, state: &RenderState) {
    let layout = &state.layout;
    let handles = &state.handles;

    // Hue: a short radial stripe across the ring's center-line.
    let radial = handles.hue - layout.center;
    let unit = radial / radial.hypot().max(f64::EPSILON);
    let half = (layout.radii.outer - layout.radii.inner) * HUE_STRIPE_LENGTH / 2.0;
    let stripe = Line::new(handles.hue - unit * half, handles.hue + unit * half);
    cx.stroke(&stripe, Color::rgba8(0, 0, 0, 85), &Stroke::new(6.0));
    cx.stroke(&stripe, argb_color(constants::THUMB_COLOR), &Stroke::new(4.0));

    let mirror = Circle::new(handles.hue_mirror, layout.mirror_handle_radius);
    cx.stroke(&mirror, Color::rgba8(255, 255, 255, 136), &Stroke::new(1.0));

    // Sat/val: ring filled with the current color.
    let sat_val = Circle::new(handles.sat_val, layout.sat_val_handle_radius);
    cx.fill(&sat_val, argb_color(state.current_color), 0.0);
    cx.stroke(
        &Circle::new(handles.sat_val, layout.sat_val_handle_radius + 1.0),
        Color::rgba8(0, 0, 0, 80),
        &Stroke::new(1.0),
    );
    cx.stroke(
        &sat_val,
        Color::WHITE,
        &Stroke::new(layout.sat_val_handle_radius / 8.0),
    );
}

fn argb_color(argb: u32) -> Color {
    let [a, r, g, b] = argb.to_be_bytes();
    Color::rgba8(r, g, b, a)
}
