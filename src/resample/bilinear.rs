use crate::image::{LinearColor, TileBuffer};

/// Bilinear colour at continuous tile coordinates `(x, y)`, where pixel `i`
/// spans `[i, i + 1)` and its centre sits at `i + 0.5`.
///
/// Each of the four taps is clamped to the tile independently; the returned
/// flag is `true` if any tap had to be clamped, in which case callers drop
/// the sample. Alpha is forced to 1 unless `include_alpha` is set.
pub fn sample_bilinear(
    tile: &TileBuffer,
    x: f32,
    y: f32,
    include_alpha: bool,
) -> (LinearColor, bool) {
    if !x.is_finite() || !y.is_finite() {
        return (LinearColor::TRANSPARENT, true);
    }
    let px = x - 0.5;
    let py = y - 0.5;
    let xf = px.floor();
    let yf = py.floor();
    let tx = px - xf;
    let ty = py - yf;
    let x0 = xf as i64;
    let y0 = yf as i64;

    let w = tile.width() as i64;
    let h = tile.height() as i64;
    let mut clipped = false;
    let mut clamp = |v: i64, len: i64| -> usize {
        if v < 0 || v > len - 1 {
            clipped = true;
        }
        v.clamp(0, len - 1) as usize
    };
    let (xa, xb) = (clamp(x0, w), clamp(x0 + 1, w));
    let (ya, yb) = (clamp(y0, h), clamp(y0 + 1, h));

    let top = tile.texel(xa, ya).lerp(tile.texel(xb, ya), tx);
    let bottom = tile.texel(xa, yb).lerp(tile.texel(xb, yb), tx);
    let mut color = top.lerp(bottom, ty);
    if !include_alpha {
        color.a = 1.0;
    }
    (color, clipped)
}
