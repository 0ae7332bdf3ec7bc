//! Horizontal RGB channel slider: maps 0–255 onto `left_x..=right_x`.

use floem::kurbo::{Point, Rect};

use crate::color::Channel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSlider {
    pub channel: Channel,
    pub left_x: f64,
    pub right_x: f64,
    pub y: f64,
}

impl ChannelSlider {
    pub fn new(channel: Channel, left_x: f64, right_x: f64, y: f64) -> Self {
        Self {
            channel,
            left_x,
            right_x,
            y,
        }
    }

    /// x of the handle for a channel intensity.
    pub fn x_from_channel(&self, value: u8) -> f64 {
        self.left_x + (self.right_x - self.left_x) * value as f64 / 255.0
    }

    /// Channel intensity under `x`, clamped to the track.
    ///
    /// A track with no width maps everything to 0.
    pub fn channel_from_x(&self, x: f64) -> u8 {
        let span = self.right_x - self.left_x;
        if span <= 0.0 {
            return 0;
        }
        let x = x.max(self.left_x).min(self.right_x);
        (255.0 * (x - self.left_x) / span).round() as u8
    }

    /// Handle center for a channel intensity.
    pub fn handle_position(&self, value: u8) -> Point {
        Point::new(self.x_from_channel(value), self.y)
    }

    /// Touch target: the track widened by `handle_radius` on every side.
    pub fn hit_rect(&self, handle_radius: f64) -> Rect {
        Rect::new(
            self.left_x - handle_radius,
            self.y - handle_radius,
            self.right_x + handle_radius,
            self.y + handle_radius,
        )
    }

    pub fn contains(&self, p: Point, handle_radius: f64) -> bool {
        let r = self.hit_rect(handle_radius);
        p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
    }
}
