//! Color math: direct conversions without external dependencies.
//! HSV functions use normalized f64 in 0.0–1.0; packed colors are `0xAARRGGBB`.

/// HSB/HSV → RGB. All values 0.0–1.0.
pub(crate) fn hsb_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as u32;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// RGB → HSB/HSV. All values 0.0–1.0. Hue is 0 for achromatic input.
pub(crate) fn rgb_to_hsb(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    (h, s, v)
}

/// Quantize a 0.0–1.0 intensity to a byte.
pub(crate) fn unit_to_byte(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split `0xAARRGGBB` into `(a, r, g, b)`.
pub(crate) const fn unpack_argb(argb: u32) -> (u8, u8, u8, u8) {
    (
        (argb >> 24) as u8,
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
    )
}

/// Replace the alpha byte of a packed color.
pub(crate) const fn with_alpha(argb: u32, alpha: u8) -> u32 {
    (argb & 0x00FF_FFFF) | ((alpha as u32) << 24)
}

/// Blend two packed colors channel by channel, alpha included.
///
/// `ratio` 0.0 returns `from`, 1.0 returns `to`.
pub fn blend_argb(from: u32, to: u32, ratio: f64) -> u32 {
    let ratio = ratio.clamp(0.0, 1.0);
    let inverse = 1.0 - ratio;
    let (fa, fr, fg, fb) = unpack_argb(from);
    let (ta, tr, tg, tb) = unpack_argb(to);
    let mix = |x: u8, y: u8| (x as f64 * inverse + y as f64 * ratio).round() as u8;
    pack_argb(mix(fa, ta), mix(fr, tr), mix(fg, tg), mix(fb, tb))
}
