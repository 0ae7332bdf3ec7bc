//! Picker geometry derived from the widget size.
//!
//! The widget is a frame with a height/width ratio in
//! `[min_aspect, max_aspect]`, centered in the available space. The top
//! square of the frame holds the hue ring and triangle; the strip below it
//! is the panel with the three RGB sliders.

use std::f64::consts::SQRT_2;

use floem::kurbo::{BezPath, Circle, Point, Rect, Shape};

use crate::color::Channel;
use crate::config::PickerConfig;
use crate::error::{PickerError, PickerResult};
use crate::slider::ChannelSlider;
use crate::triangle::Triangle;

/// Radii of the hue ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusSet {
    pub outer: f64,
    pub inner: f64,
    /// Center-line of the ring, where the hue handle sits.
    pub mid: f64,
}

impl RadiusSet {
    pub fn new(outer: f64, inner: f64) -> Self {
        Self {
            outer,
            inner,
            mid: (outer + inner) / 2.0,
        }
    }

    /// Strictly between the inner and outer circles.
    pub fn annulus_contains(&self, distance: f64) -> bool {
        distance > self.inner && distance < self.outer
    }
}

/// Circle in the lower-left corner of the ring's square showing the
/// previous color (left half) next to the current one (right half).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub center: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerLayout {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radii: RadiusSet,
    pub triangle: Triangle,
    /// Area holding the RGB sliders.
    pub panel: Rect,
    pub sliders: [ChannelSlider; 3],
    /// Font size of the channel letters left of the sliders.
    pub label_size: f64,
    pub slider_handle_radius: f64,
    pub sat_val_handle_radius: f64,
    /// Grab distance around the sat/val handle, which includes its stroke.
    pub sat_val_hit_radius: f64,
    pub mirror_handle_radius: f64,
    pub swatch: Swatch,
}

impl PickerLayout {
    pub fn compute(width: f64, height: f64, config: &PickerConfig) -> PickerResult<Self> {
        config.validate()?;
        let invalid = || PickerError::InvalidLayout { width, height };
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(invalid());
        }

        let padding = config.padding;
        let aspect = (height / width).clamp(config.min_aspect, config.max_aspect);
        let frame_h = (height - 2.0 * padding).min(width * aspect - 2.0 * padding);
        if frame_h <= 0.0 {
            return Err(invalid());
        }
        let frame_w = frame_h / aspect;
        let frame_left = (width - frame_w) / 2.0;
        let frame_top = (height - frame_h) / 2.0;
        let panel_h = frame_h - frame_w;

        let outer = frame_w / 2.0;
        let inner = (config.thickness_ratio - 1.0) * outer / config.thickness_ratio;
        let radii = RadiusSet::new(outer, inner);
        let center = Point::new(frame_left + outer, frame_top + outer);
        let panel = Rect::new(
            frame_left,
            frame_top + frame_h - panel_h,
            frame_left + frame_w,
            frame_top + frame_h,
        );

        let slider_handle_radius = config.slider_thumb_radius.min(panel_h / 6.0);
        let step = panel_h / 4.0;
        let label_size = step / 2.0;
        let left_x = panel.x0 + 2.0 * slider_handle_radius + label_size;
        let right_x = panel.x1 - 2.0 * slider_handle_radius;
        let sliders = Channel::ALL.map(|channel| {
            let row = (channel.index() + 1) as f64;
            ChannelSlider::new(channel, left_x, right_x, panel.y0 + step * row)
        });

        let swatch_radius = ((SQRT_2 - 1.0) * outer) / (SQRT_2 + 1.0) / 1.08;
        let swatch = Swatch {
            center: Point::new(
                center.x - outer + swatch_radius,
                center.y + outer - swatch_radius,
            ),
            radius: swatch_radius,
        };

        Ok(Self {
            width,
            height,
            center,
            radii,
            triangle: Triangle::inscribed(center, inner),
            panel,
            sliders,
            label_size,
            slider_handle_radius,
            sat_val_handle_radius: config.sat_val_thumb_radius,
            sat_val_hit_radius: config.sat_val_thumb_radius * 9.0 / 8.0,
            mirror_handle_radius: config.mirror_thumb_radius,
            swatch,
        })
    }

    pub fn slider(&self, channel: Channel) -> &ChannelSlider {
        &self.sliders[channel.index()]
    }

    /// Center of the channel letter drawn in the column left of `channel`'s slider.
    pub fn label_anchor(&self, channel: Channel) -> Point {
        let slider = self.slider(channel);
        Point::new((self.panel.x0 + slider.left_x) / 2.0, slider.y)
    }

    /// Outline covering the ring and the triangle, with the gap between
    /// them left open. The drop shadow is this outline, offset.
    pub fn silhouette(&self) -> BezPath {
        let mut path = Circle::new(self.center, self.radii.outer).to_path(0.1);
        let inner = Circle::new(self.center, self.radii.inner)
            .to_path(0.1)
            .reverse_subpaths();
        path.extend(inner.elements().iter().copied());
        path.extend(self.triangle.path().elements().iter().copied());
        path
    }

    /// Top-left corner at which the hue ring raster is drawn.
    pub fn ring_origin(&self) -> Point {
        let half = self.radii.outer.floor();
        Point::new(self.center.x - half, self.center.y - half)
    }

    /// Top-left corner at which the saturation/value mask is drawn.
    pub fn mask_origin(&self) -> Point {
        let half = self.radii.inner.floor();
        Point::new(self.center.x - half, self.center.y - half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn portrait_layout() {
        // 1.4 lies inside the aspect bounds, so the frame fills the height.
        let layout = PickerLayout::compute(250.0, 350.0, &PickerConfig::default()).unwrap();
        let frame_h = 340.0;
        let frame_w = frame_h / 1.4;
        assert!(close(layout.radii.outer, frame_w / 2.0));
        assert!(close(layout.radii.inner, layout.radii.outer * 0.8));
        assert!(close(layout.center.x, 125.0));
        assert!(close(layout.center.y, 5.0 + frame_w / 2.0));
        assert!(close(layout.panel.height(), frame_h - frame_w));
        assert!(close(layout.panel.y1, 345.0));
        assert_eq!(layout.triangle.radius(), layout.radii.inner);
    }

    #[test]
    fn sliders_are_evenly_spaced_in_the_panel() {
        let layout = PickerLayout::compute(250.0, 350.0, &PickerConfig::default()).unwrap();
        let step = layout.panel.height() / 4.0;
        for channel in Channel::ALL {
            let slider = layout.slider(channel);
            assert_eq!(slider.channel, channel);
            let row = (channel.index() + 1) as f64;
            assert!(close(slider.y, layout.panel.y0 + step * row));
            assert!(slider.left_x < slider.right_x);
            assert!(close(slider.right_x, layout.panel.x1 - 2.0 * layout.slider_handle_radius));
        }
        assert!(layout.slider_handle_radius <= layout.panel.height() / 6.0);
    }

    #[test]
    fn wide_layout_is_centered_horizontally() {
        let layout = PickerLayout::compute(1000.0, 350.0, &PickerConfig::default()).unwrap();
        assert!(close(layout.center.x, 500.0));
        // Height/width is clamped to 1.25; the frame is limited by the height.
        assert!(close(layout.radii.outer, 340.0 / 1.25 / 2.0));
    }

    #[test]
    fn swatch_sits_in_the_lower_left_corner() {
        let layout = PickerLayout::compute(250.0, 350.0, &PickerConfig::default()).unwrap();
        let s = layout.swatch;
        assert!(close(s.center.x - s.radius, layout.center.x - layout.radii.outer));
        assert!(close(s.center.y + s.radius, layout.center.y + layout.radii.outer));
        assert!(s.center.distance(layout.center) > layout.radii.outer);
    }

    #[test]
    fn labels_sit_in_the_reserved_column() {
        let layout = PickerLayout::compute(250.0, 350.0, &PickerConfig::default()).unwrap();
        assert!(close(layout.label_size, layout.panel.height() / 8.0));
        for channel in Channel::ALL {
            let slider = layout.slider(channel);
            let anchor = layout.label_anchor(channel);
            assert!(close(
                slider.left_x - layout.panel.x0,
                2.0 * layout.slider_handle_radius + layout.label_size
            ));
            assert!(anchor.x > layout.panel.x0 && anchor.x < slider.left_x);
            assert_eq!(anchor.y, slider.y);
        }
    }

    #[test]
    fn silhouette_covers_ring_and_triangle_only() {
        let layout = PickerLayout::compute(250.0, 350.0, &PickerConfig::default()).unwrap();
        let path = layout.silhouette();
        let c = layout.center;
        let mid = Point::new(c.x, c.y - layout.radii.mid);
        assert_ne!(path.winding(mid), 0);
        assert_ne!(path.winding(c), 0);
        // Left of the triangle's left edge, still inside the inner circle.
        let gap = Point::new(c.x - 0.75 * layout.radii.inner, c.y);
        assert_eq!(path.winding(gap), 0);
        let beyond = Point::new(c.x + layout.radii.outer + 1.0, c.y);
        assert_eq!(path.winding(beyond), 0);
    }

    #[test]
    fn degenerate_sizes_are_rejected() {
        let config = PickerConfig::default();
        for (w, h) in [(0.0, 100.0), (100.0, -1.0), (f64::NAN, 100.0), (4.0, 5.0)] {
            assert!(matches!(
                PickerLayout::compute(w, h, &config),
                Err(PickerError::InvalidLayout { .. })
            ));
        }
    }
}
