//! Sheet sizing and resting offsets
//!
//! Offsets are vertical translations in px measured from the collapsed
//! resting position: 0 is collapsed, negative is further up (expanded),
//! positive is further down (towards off-screen).

/// Share of the viewport used by [`SheetHeight::Auto`]
pub const AUTO_HEIGHT_RATIO: f64 = 0.6;

/// Default space kept free above the expanded sheet (status bar, header)
pub const DEFAULT_TOP_INSET: f64 = 50.0;

/// Default space kept free below the sheet (home indicator)
pub const DEFAULT_BOTTOM_INSET: f64 = 0.0;

/// Requested collapsed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetHeight {
    Fixed(f64),
    /// 60% of the viewport
    Auto,
    /// Same as the expanded height
    Full,
}

impl Default for SheetHeight {
    fn default() -> Self {
        SheetHeight::Auto
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    pub viewport_height: f64,
    pub collapsed_height: f64,
    pub expanded_height: f64,
    pub bottom_inset: f64,
}

impl SheetGeometry {
    pub fn new(viewport_height: f64, height: SheetHeight, top_inset: f64, bottom_inset: f64) -> Self {
        let viewport_height = viewport_height.max(0.0);
        let expanded_height = (viewport_height - top_inset - bottom_inset).max(0.0);
        let collapsed_height = match height {
            SheetHeight::Fixed(px) => px,
            SheetHeight::Auto => viewport_height * AUTO_HEIGHT_RATIO,
            SheetHeight::Full => expanded_height,
        }
        .clamp(0.0, expanded_height);

        Self {
            viewport_height,
            collapsed_height,
            expanded_height,
            bottom_inset: bottom_inset.max(0.0),
        }
    }

    pub fn collapsed_offset(&self) -> f64 {
        0.0
    }

    /// `-(expanded - collapsed)`: the highest the sheet may ever sit
    pub fn expanded_offset(&self) -> f64 {
        -(self.expanded_height - self.collapsed_height)
    }

    /// Entirely below the viewport
    pub fn hidden_offset(&self) -> f64 {
        self.collapsed_height + self.bottom_inset
    }

    /// False when the collapsed sheet already uses all available height
    pub fn can_expand(&self) -> bool {
        self.expanded_height - self.collapsed_height > f64::EPSILON
    }
}
