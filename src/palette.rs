use plotters::style::RGBColor;

/// Linear interpolation between two colors, sampled at evenly spaced steps.
/// Used for the rank gradient on the city chart and the donut wedges.
#[derive(Debug, Clone, Copy)]
pub struct Gradient {
    start: RGBColor,
    end: RGBColor,
}

impl Gradient {
    pub const fn new(start: RGBColor, end: RGBColor) -> Self {
        Self { start, end }
    }

    pub fn sample(&self, t: f64) -> RGBColor {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(
            lerp(self.start.0, self.end.0),
            lerp(self.start.1, self.end.1),
            lerp(self.start.2, self.end.2),
        )
    }

    /// `n` evenly spaced colors from start to end; a single step is the
    /// start color.
    pub fn steps(&self, n: usize) -> Vec<RGBColor> {
        (0..n)
            .map(|i| {
                let t = if n <= 1 {
                    0.0
                } else {
                    i as f64 / (n - 1) as f64
                };
                self.sample(t)
            })
            .collect()
    }
}

/// Dark-to-light blues; the tallest bar gets the darkest shade. The gradient
/// is purely a rank cue, it carries no meaning of its own.
pub const BLUES: Gradient = Gradient::new(RGBColor(33, 102, 172), RGBColor(189, 215, 231));

/// Three-step greens for the donut wedges.
pub const GREENS: Gradient = Gradient::new(RGBColor(35, 139, 69), RGBColor(161, 217, 155));

/// Category chart: dark red accent on the max bar(s), light coral elsewhere.
pub const CATEGORY_ACCENT: RGBColor = RGBColor(139, 0, 0);
pub const CATEGORY_BASE: RGBColor = RGBColor(240, 128, 128);

/// Payment chart: deep pink accent on the max bar(s), light pink elsewhere.
pub const PAYMENT_ACCENT: RGBColor = RGBColor(255, 20, 147);
pub const PAYMENT_BASE: RGBColor = RGBColor(255, 182, 193);

/// True wherever the value equals the maximum. The comparison is direct value
/// equality, so every bar tied for the max is accented, not just the first.
pub fn accent_mask(values: &[f64]) -> Vec<bool> {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    values.iter().map(|&v| v == max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let g = Gradient::new(RGBColor(0, 0, 0), RGBColor(100, 200, 50));
        assert_eq!(g.sample(0.0), RGBColor(0, 0, 0));
        assert_eq!(g.sample(1.0), RGBColor(100, 200, 50));
        assert_eq!(g.sample(0.5), RGBColor(50, 100, 25));
    }

    #[test]
    fn test_gradient_steps() {
        let g = Gradient::new(RGBColor(0, 0, 0), RGBColor(255, 255, 255));
        let colors = g.steps(3);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], RGBColor(0, 0, 0));
        assert_eq!(colors[1], RGBColor(128, 128, 128));
        assert_eq!(colors[2], RGBColor(255, 255, 255));

        assert_eq!(g.steps(1), vec![RGBColor(0, 0, 0)]);
        assert!(g.steps(0).is_empty());
    }

    #[test]
    fn test_accent_mask_highlights_all_tied_maxima() {
        // Categories {A:5, B:9, C:9}: both B and C are accented.
        assert_eq!(accent_mask(&[5.0, 9.0, 9.0]), vec![false, true, true]);
    }

    #[test]
    fn test_accent_mask_degenerate_inputs() {
        assert!(accent_mask(&[]).is_empty());
        assert_eq!(accent_mask(&[3.0]), vec![true]);
    }
}
