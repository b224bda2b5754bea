use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.65);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous scales
// ---------------------------------------------------------------------------

/// Sequential yellow → orange → dark red scale for `t` in `[0, 1]`.
pub fn heat(t: f64) -> Color32 {
    ramp(&[(255, 255, 204), (253, 141, 60), (128, 0, 38)], t)
}

/// Diverging blue → grey → red scale for `r` in `[-1, 1]`.
pub fn diverging(r: f64) -> Color32 {
    ramp(&[(59, 76, 192), (221, 221, 221), (180, 4, 38)], (r + 1.0) / 2.0)
}

/// Text colour readable on top of `background`.
pub fn contrasting_text(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

/// Piecewise-linear interpolation in linear RGB between evenly spaced stops.
fn ramp(stops: &[(u8, u8, u8)], t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) as f32 } else { 0.0 };
    let segments = (stops.len() - 1) as f32;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(stops.len() - 2);
    let frac = pos - idx as f32;

    let lin = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = lin(stops[idx]).mix(lin(stops[idx + 1]), frac);
    to_color32(Srgb::from_linear(mixed))
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_scale_endpoints() {
        assert_eq!(heat(0.0), Color32::from_rgb(255, 255, 204));
        assert_eq!(heat(1.0), Color32::from_rgb(128, 0, 38));
        assert_eq!(heat(f64::NAN), heat(0.0));
    }

    #[test]
    fn diverging_midpoint_is_neutral() {
        assert_eq!(diverging(0.0), Color32::from_rgb(221, 221, 221));
        assert_eq!(diverging(-1.0), Color32::from_rgb(59, 76, 192));
    }

    #[test]
    fn palette_is_distinct() {
        let p = generate_palette(10);
        assert_eq!(p.len(), 10);
        for (i, a) in p.iter().enumerate() {
            assert!(p[i + 1..].iter().all(|b| b != a));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn text_contrast() {
        assert_eq!(contrasting_text(Color32::from_rgb(255, 255, 204)), Color32::BLACK);
        assert_eq!(contrasting_text(Color32::from_rgb(128, 0, 38)), Color32::WHITE);
    }
}
