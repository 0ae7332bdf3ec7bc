//! The color held by the picker.
//!
//! Stores hue, saturation and value separately from the packed RGB form so
//! that hue survives colors where it is undefined (grays, black). RGB
//! channels are derived from HSV on every read.

use std::f64::consts::{PI, TAU};

use floem::kurbo::Vec2;

use crate::error::{PickerError, PickerResult};
use crate::math;

/// One of the three RGB channels edited by the sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    pub fn from_index(index: usize) -> PickerResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(PickerError::InvalidChannel(index))
    }

    /// Letter shown next to the channel's slider.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        }
    }

    /// The channel at full intensity, opaque.
    pub fn pure_color(self) -> u32 {
        match self {
            Channel::Red => 0xFFFF_0000,
            Channel::Green => 0xFF00_FF00,
            Channel::Blue => 0xFF00_00FF,
        }
    }
}

/// Color as hue (degrees, 0–360), saturation and value (0.0–1.0) plus alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvColor {
    hue: f64,
    saturation: f64,
    value: f64,
    alpha: u8,
}

impl HsvColor {
    /// Hue in degrees, `0.0..360.0`.
    pub fn hue(&self) -> f64 {
        self.hue
    }
    /// Saturation (0.0–1.0).
    pub fn saturation(&self) -> f64 {
        self.saturation
    }
    /// Value (0.0–1.0).
    pub fn value(&self) -> f64 {
        self.value
    }
    pub fn alpha(&self) -> u8 {
        self.alpha
    }
}

impl Default for HsvColor {
    fn default() -> Self {
        Self::from_argb(crate::constants::DEFAULT_CURRENT_COLOR)
    }
}

impl HsvColor {
    /// Decompose a packed `0xAARRGGBB` color. Hue is 0 for achromatic input.
    pub fn from_argb(argb: u32) -> Self {
        let (a, r, g, b) = math::unpack_argb(argb);
        let (h, s, v) = math::rgb_to_hsb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
        Self {
            hue: normalize_degrees(h * 360.0),
            saturation: s,
            value: v,
            alpha: a,
        }
    }

    /// Build from HSV components, rejecting anything outside the model's ranges.
    ///
    /// Hue may be any finite angle and is wrapped into `0.0..360.0`.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64, alpha: u8) -> PickerResult<Self> {
        if !hue.is_finite() {
            return Err(PickerError::ComponentOutOfRange {
                name: "hue",
                value: hue,
                min: 0.0,
                max: 360.0,
            });
        }
        for (name, component) in [("saturation", saturation), ("value", value)] {
            if !(0.0..=1.0).contains(&component) {
                return Err(PickerError::ComponentOutOfRange {
                    name,
                    value: component,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        Ok(Self {
            hue: normalize_degrees(hue),
            saturation,
            value,
            alpha,
        })
    }

    /// Pack as `0xAARRGGBB`.
    pub fn to_argb(&self) -> u32 {
        let (r, g, b) = self.to_rgb();
        math::pack_argb(self.alpha, r, g, b)
    }

    /// Convert to 0–255 RGB tuple.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let (r, g, b) = math::hsb_to_rgb(self.hue / 360.0, self.saturation, self.value);
        (
            math::unit_to_byte(r),
            math::unit_to_byte(g),
            math::unit_to_byte(b),
        )
    }

    pub fn red(&self) -> u8 {
        self.to_rgb().0
    }

    pub fn green(&self) -> u8 {
        self.to_rgb().1
    }

    pub fn blue(&self) -> u8 {
        self.to_rgb().2
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        let (r, g, b) = self.to_rgb();
        [r, g, b][channel.index()]
    }

    /// The pure hue at full saturation and value, opaque. This is the color
    /// of the triangle's right-hand corner.
    pub fn chroma(&self) -> u32 {
        let (r, g, b) = math::hsb_to_rgb(self.hue / 360.0, 1.0, 1.0);
        math::pack_argb(
            0xFF,
            math::unit_to_byte(r),
            math::unit_to_byte(g),
            math::unit_to_byte(b),
        )
    }

    /// Overwrite hue, saturation, value and alpha from a packed color.
    pub fn set_argb(&mut self, argb: u32) {
        *self = Self::from_argb(argb);
    }

    /// Replace one RGB channel and re-derive HSV from the result.
    ///
    /// This can move the hue. If the new color is achromatic its hue is
    /// undefined and the held hue is kept instead of snapping to 0.
    pub fn set_channel(&mut self, channel: Channel, value: u8) {
        let (r, g, b) = self.to_rgb();
        let mut rgb = [r, g, b];
        rgb[channel.index()] = value;
        let next = Self::from_argb(math::pack_argb(self.alpha, rgb[0], rgb[1], rgb[2]));
        if next.saturation == 0.0 || next.value == 0.0 {
            self.set_preserving_hue(next.to_argb());
        } else {
            *self = next;
        }
    }

    /// Take saturation, value and alpha from `argb` but keep the current hue.
    ///
    /// Used by the triangle, where the colors near white and black corners
    /// decompose to an ambiguous hue.
    pub fn set_preserving_hue(&mut self, argb: u32) {
        let hue = self.hue;
        self.set_argb(argb);
        self.hue = hue;
    }

    /// Point at the current hue on a circle of `radius` around the origin.
    pub fn ring_position(&self, radius: f64) -> Vec2 {
        let radians = self.hue * PI / 180.0;
        Vec2::new(radians.cos() * radius, radians.sin() * radius)
    }

    /// Set the hue from a point relative to the ring center.
    pub fn set_hue_from_point(&mut self, x: f64, y: f64) {
        let mut radians = y.atan2(x);
        if radians < 0.0 {
            radians += TAU;
        }
        self.hue = normalize_degrees(180.0 * radians / PI);
    }

    /// Parse a hex string (with or without `#`, 3, 6, or 8 chars).
    ///
    /// 8-char hex is interpreted as RRGGBBAA. 3 and 6-char hex default to full opacity.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let stripped = hex.trim_start_matches('#');
        if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&stripped[i..i + 2], 16).ok();
        let argb = match stripped.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&stripped[i..i + 1], 16).ok();
                math::pack_argb(0xFF, nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)
            }
            6 => math::pack_argb(0xFF, byte(0)?, byte(2)?, byte(4)?),
            8 => math::pack_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?),
            _ => return None,
        };
        Some(Self::from_argb(argb))
    }

    /// Format as uppercase hex (no `#` prefix).
    ///
    /// Returns 6 chars (RRGGBB) when opaque, 8 chars (RRGGBBAA) otherwise.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        if self.alpha == 0xFF {
            format!("{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", r, g, b, self.alpha)
        }
    }
}

fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative input
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} vs {b}");
    }

    #[test]
    fn argb_round_trip_stays_within_one_step() {
        let levels: Vec<u8> = (0..=255u8).step_by(15).chain([1, 127, 128, 254]).collect();
        for &r0 in &levels {
            for &g0 in &levels {
                for &b0 in &levels {
                    let argb = math::pack_argb(0xFF, r0, g0, b0);
                    let back = HsvColor::from_argb(argb).to_argb();
                    let (a1, r1, g1, b1) = math::unpack_argb(back);
                    assert_eq!(a1, 0xFF);
                    for (x, y) in [(r0, r1), (g0, g1), (b0, b1)] {
                        assert!(x.abs_diff(y) <= 1, "{argb:08X} -> {back:08X}");
                    }
                }
            }
        }
    }

    #[test]
    fn alpha_is_carried_through() {
        let color = HsvColor::from_argb(0x80FF_0000);
        assert_eq!(color.alpha(), 0x80);
        assert_eq!(color.to_argb(), 0x80FF_0000);
    }

    #[test]
    fn set_argb_overwrites_every_component() {
        let mut color = HsvColor::from_argb(0xFF00_FF00);
        color.set_argb(0xFF80_8080);
        assert_eq!(color.hue(), 0.0);
        assert_eq!(color.saturation(), 0.0);
        assert_close(color.value(), 128.0 / 255.0, 1e-12);
    }

    #[test]
    fn hue_survives_zero_saturation_and_value() {
        let mut color = HsvColor::from_hsv(200.0, 1.0, 1.0, 0xFF).unwrap();
        color.set_preserving_hue(0xFFFF_FFFF);
        assert_eq!(color.hue(), 200.0);
        assert_eq!(color.saturation(), 0.0);
        color.set_preserving_hue(0xFF00_0000);
        assert_eq!(color.hue(), 200.0);
        assert_eq!(color.value(), 0.0);

        let gray = HsvColor::from_hsv(123.0, 0.0, 0.5, 0xFF).unwrap();
        let back = HsvColor::from_argb(gray.to_argb());
        assert_eq!(back.saturation(), 0.0);
        let mut held = gray;
        held.set_preserving_hue(gray.to_argb());
        assert_eq!(held.hue(), 123.0);
    }

    #[test]
    fn set_channel_rederives_hue() {
        let mut color = HsvColor::from_argb(0xFFFF_0000);
        color.set_channel(Channel::Blue, 255);
        assert_eq!(color.to_argb(), 0xFFFF_00FF);
        assert_close(color.hue(), 300.0, 1e-9);
        assert_eq!(color.channel(Channel::Blue), 255);
    }

    #[test]
    fn set_channel_to_gray_keeps_hue() {
        let mut color = HsvColor::from_argb(0xFF80_8000);
        let hue = color.hue();
        color.set_channel(Channel::Blue, 0x80);
        assert_eq!(color.to_argb(), 0xFF80_8080);
        assert_eq!(color.hue(), hue);
    }

    #[test]
    fn chroma_is_full_saturation_and_value() {
        let color = HsvColor::from_hsv(120.0, 0.2, 0.3, 0x40).unwrap();
        assert_eq!(color.chroma(), 0xFF00_FF00);
    }

    #[test]
    fn ring_position_inverts_set_hue_from_point() {
        for step in 0..36 {
            let hue = step as f64 * 10.0 + 0.5;
            let color = HsvColor::from_hsv(hue, 1.0, 1.0, 0xFF).unwrap();
            for radius in [0.5, 1.0, 87.0, 1000.0] {
                let p = color.ring_position(radius);
                let mut sample = HsvColor::default();
                sample.set_hue_from_point(p.x, p.y);
                assert_close(sample.hue(), hue, 1e-9);
            }
        }
    }

    #[test]
    fn hue_from_point_uses_screen_axes() {
        let mut color = HsvColor::default();
        color.set_hue_from_point(0.0, 10.0);
        assert_close(color.hue(), 90.0, 1e-9);
        color.set_hue_from_point(0.0, -10.0);
        assert_close(color.hue(), 270.0, 1e-9);
        color.set_hue_from_point(-10.0, 0.0);
        assert_close(color.hue(), 180.0, 1e-9);
    }

    #[test]
    fn from_hsv_rejects_out_of_range_components() {
        assert!(HsvColor::from_hsv(f64::NAN, 0.5, 0.5, 0xFF).is_err());
        assert!(matches!(
            HsvColor::from_hsv(0.0, 1.5, 0.5, 0xFF),
            Err(PickerError::ComponentOutOfRange { name: "saturation", .. })
        ));
        assert!(HsvColor::from_hsv(0.0, 0.5, -0.1, 0xFF).is_err());
        assert_eq!(HsvColor::from_hsv(-90.0, 1.0, 1.0, 0xFF).unwrap().hue(), 270.0);
    }

    #[test]
    fn hex_parsing_and_formatting() {
        assert_eq!(HsvColor::from_hex("#3B82F6").unwrap().to_hex(), "3B82F6");
        assert_eq!(HsvColor::from_hex("fff").unwrap().to_argb(), 0xFFFF_FFFF);
        let translucent = HsvColor::from_hex("FF000080").unwrap();
        assert_eq!(translucent.to_argb(), 0x80FF_0000);
        assert_eq!(translucent.to_hex(), "FF000080");
        assert!(HsvColor::from_hex("12345").is_none());
        assert!(HsvColor::from_hex("GG0000").is_none());
    }

    #[test]
    fn channel_indices() {
        assert_eq!(Channel::from_index(1).unwrap(), Channel::Green);
        assert_eq!(Channel::from_index(3), Err(PickerError::InvalidChannel(3)));
        let labels: Vec<_> = Channel::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["R", "G", "B"]);
    }
}
