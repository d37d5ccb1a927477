//! Label colours.
//!
//! The heaviest labels take one swatch each in rank order; everything past
//! the palette size falls back to a swatch picked by [`label_hash`], so a
//! given label keeps its colour across frames and reloads.

use serde::{Deserialize, Serialize};

/// A named hue. Renders as a CSS utility class or as RGBA for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Swatch {
    Blue,
    Emerald,
    Amber,
    Rose,
    Purple,
    Orange,
    Indigo,
    Pink,
    Teal,
    Red,
}

impl Swatch {
    /// CSS classes for a chip in this hue (light + dark theme).
    pub fn css_class(self) -> &'static str {
        match self {
            Swatch::Blue => "bg-blue-50 text-blue-700 hover:bg-blue-600 dark:bg-blue-900/40 dark:text-blue-300 dark:hover:bg-blue-700",
            Swatch::Emerald => "bg-emerald-50 text-emerald-700 hover:bg-emerald-600 dark:bg-emerald-900/40 dark:text-emerald-300 dark:hover:bg-emerald-700",
            Swatch::Amber => "bg-amber-50 text-amber-700 hover:bg-amber-600 dark:bg-amber-900/40 dark:text-amber-300 dark:hover:bg-amber-700",
            Swatch::Rose => "bg-rose-50 text-rose-700 hover:bg-rose-600 dark:bg-rose-900/40 dark:text-rose-300 dark:hover:bg-rose-700",
            Swatch::Purple => "bg-purple-50 text-purple-700 hover:bg-purple-600 dark:bg-purple-900/40 dark:text-purple-300 dark:hover:bg-purple-700",
            Swatch::Orange => "bg-orange-50 text-orange-700 hover:bg-orange-600 dark:bg-orange-900/40 dark:text-orange-300 dark:hover:bg-orange-700",
            Swatch::Indigo => "bg-indigo-50 text-indigo-700 hover:bg-indigo-600 dark:bg-indigo-900/40 dark:text-indigo-300 dark:hover:bg-indigo-700",
            Swatch::Pink => "bg-pink-50 text-pink-700 hover:bg-pink-600 dark:bg-pink-900/40 dark:text-pink-300 dark:hover:bg-pink-700",
            Swatch::Teal => "bg-teal-50 text-teal-700 hover:bg-teal-600 dark:bg-teal-900/40 dark:text-teal-300 dark:hover:bg-teal-700",
            Swatch::Red => "bg-red-50 text-red-700 hover:bg-red-600 dark:bg-red-900/40 dark:text-red-300 dark:hover:bg-red-700",
        }
    }

    /// Text colour (the `-700` shade), normalized RGBA.
    pub fn text_rgba(self) -> [f32; 4] {
        match self {
            Swatch::Blue => [0.11, 0.31, 0.85, 1.0],
            Swatch::Emerald => [0.02, 0.47, 0.34, 1.0],
            Swatch::Amber => [0.71, 0.33, 0.04, 1.0],
            Swatch::Rose => [0.75, 0.07, 0.24, 1.0],
            Swatch::Purple => [0.43, 0.16, 0.85, 1.0],
            Swatch::Orange => [0.76, 0.25, 0.05, 1.0],
            Swatch::Indigo => [0.26, 0.22, 0.79, 1.0],
            Swatch::Pink => [0.75, 0.09, 0.36, 1.0],
            Swatch::Teal => [0.06, 0.46, 0.43, 1.0],
            Swatch::Red => [0.73, 0.11, 0.11, 1.0],
        }
    }

    /// Chip background (the `-50` shade), normalized RGBA.
    pub fn fill_rgba(self) -> [f32; 4] {
        match self {
            Swatch::Blue => [0.94, 0.96, 1.0, 1.0],
            Swatch::Emerald => [0.93, 0.99, 0.96, 1.0],
            Swatch::Amber => [1.0, 0.98, 0.92, 1.0],
            Swatch::Rose => [1.0, 0.95, 0.95, 1.0],
            Swatch::Purple => [0.98, 0.96, 1.0, 1.0],
            Swatch::Orange => [1.0, 0.97, 0.93, 1.0],
            Swatch::Indigo => [0.93, 0.95, 1.0, 1.0],
            Swatch::Pink => [0.99, 0.95, 0.97, 1.0],
            Swatch::Teal => [0.94, 0.99, 0.98, 1.0],
            Swatch::Red => [1.0, 0.95, 0.95, 1.0],
        }
    }
}

/// Ordered list of swatches. Never empty once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    pub fn new(swatches: Vec<Swatch>) -> Self {
        Self { swatches }
    }

    /// Keyword globe palette: purples and blues first.
    pub fn keyword() -> Self {
        Self::new(vec![
            Swatch::Purple,
            Swatch::Blue,
            Swatch::Indigo,
            Swatch::Pink,
            Swatch::Teal,
            Swatch::Orange,
            Swatch::Emerald,
            Swatch::Red,
        ])
    }

    /// Tag galaxy palette.
    pub fn tag() -> Self {
        Self::new(vec![
            Swatch::Blue,
            Swatch::Emerald,
            Swatch::Amber,
            Swatch::Rose,
            Swatch::Purple,
            Swatch::Orange,
        ])
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Colour for the label at `rank`.
    ///
    /// Ranks below the palette size cycle through it; the rest use
    /// [`label_hash`]. Returns `None` only for an empty palette.
    pub fn color_for(&self, rank: usize, label: &str) -> Option<Swatch> {
        let n = self.swatches.len();
        if n == 0 {
            return None;
        }
        let slot = if rank < n { rank % n } else { label_hash(label) % n };
        Some(self.swatches[slot])
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::keyword()
    }
}

/// Stable label hash for fallback colours: the number of Unicode scalar
/// values in the label.
pub fn label_hash(label: &str) -> usize {
    label.chars().count()
}
