/// Linear interpolation between `(x0, y0)` and `(x1, y1)`, rounding
/// toward `y0`. `x` must lie within `[x0, x1]` and `x1 > x0`.
pub fn interpolate(x0: u32, x1: u32, y0: u32, y1: u32, x: u32) -> u32 {
    if y0 > y1 {
        y0 - (x - x0) * (y0 - y1) / (x1 - x0)
    } else {
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}
