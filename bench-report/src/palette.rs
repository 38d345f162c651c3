//! Per-source line colors
//!
//! The color table is built once from the source list and handed to the
//! renderer, so every panel draws a given source in the same color.

use plotters::style::RGBColor;
use std::collections::HashMap;

/// The ten-color qualitative "tab10" palette
pub const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Fallback for a source that was not part of the table
const UNKNOWN: RGBColor = RGBColor(0, 0, 0);

/// Source label -> line color
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    colors: HashMap<String, RGBColor>,
}

impl ColorMap {
    /// Spread `sources` evenly over the palette
    ///
    /// Up to ten sources always get distinct colors; beyond that colors repeat.
    pub fn for_sources(sources: &[String]) -> Self {
        let n = sources.len();
        let colors = sources
            .iter()
            .enumerate()
            .map(|(i, source)| (source.clone(), TAB10[palette_index(i, n)]))
            .collect();
        Self { colors }
    }

    /// Color assigned to `source`
    pub fn color(&self, source: &str) -> RGBColor {
        self.colors.get(source).copied().unwrap_or(UNKNOWN)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Index of the `i`-th of `n` evenly spaced samples in `[0, 1]`
fn palette_index(i: usize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let position = i as f64 / (n - 1) as f64;
    ((position * TAB10.len() as f64) as usize).min(TAB10.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("run{i}")).collect()
    }

    #[test]
    fn test_single_source_gets_first_color() {
        let map = ColorMap::for_sources(&labels(1));
        assert_eq!(map.color("run0"), TAB10[0]);
    }

    #[test]
    fn test_two_sources_use_both_ends() {
        let map = ColorMap::for_sources(&labels(2));
        assert_eq!(map.color("run0"), TAB10[0]);
        assert_eq!(map.color("run1"), TAB10[9]);
    }

    #[test]
    fn test_up_to_ten_sources_are_distinct() {
        for n in 1..=10 {
            let sources = labels(n);
            let map = ColorMap::for_sources(&sources);
            let distinct: HashSet<(u8, u8, u8)> = sources
                .iter()
                .map(|s| {
                    let c = map.color(s);
                    (c.0, c.1, c.2)
                })
                .collect();
            assert_eq!(distinct.len(), n, "collision with {n} sources");
        }
    }

    #[test]
    fn test_unknown_source() {
        let map = ColorMap::for_sources(&labels(3));
        assert_eq!(map.len(), 3);
        assert_eq!(map.color("missing"), UNKNOWN);
    }
}
