use crate::color::Rgb;

/// Largest per-channel absolute difference between two colors
#[inline]
pub fn channel_distance(a: Rgb, b: Rgb) -> u8 {
    a.r.abs_diff(b.r)
        .max(a.g.abs_diff(b.g))
        .max(a.b.abs_diff(b.b))
}

/// Check that every channel of `a` is within `threshold` of `b`
#[inline]
pub fn within_threshold(a: Rgb, b: Rgb, threshold: u8) -> bool {
    channel_distance(a, b) <= threshold
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Parse a color written as `r,g,b` or `#rrggbb`
pub fn parse_rgb(s: &str) -> Result<Rgb, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return Err(format!("expected #rrggbb, got `{s}`"));
        }
        let value = u32::from_str_radix(hex, 16).map_err(|e| format!("`{s}`: {e}"))?;
        return Ok(rgb_from_u32(value));
    }

    let mut channels = [0u8; 3];
    let mut parts = s.split(',');
    for channel in &mut channels {
        let part = parts
            .next()
            .ok_or_else(|| format!("expected r,g,b, got `{s}`"))?;
        *channel = part
            .trim()
            .parse()
            .map_err(|e| format!("`{}`: {e}", part.trim()))?;
    }
    if parts.next().is_some() {
        return Err(format!("expected r,g,b, got `{s}`"));
    }

    Ok(Rgb {
        r: channels[0],
        g: channels[1],
        b: channels[2],
    })
}
