//! Category + line count → block color.
//!
//! Each category has a start and end color; a block's color is interpolated
//! linearly between them by `lines / MAX_COLOR_LINES`, clamped to `[0, 1]`.
//! Files and structs fade towards black as they grow, packages keep a flat
//! red.

use bevy::prelude::*;

use crate::config::MAX_COLOR_LINES;
use crate::metric_tree::Category;

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_color(self) -> Color {
        Color::srgb_u8(self.r, self.g, self.b)
    }

    /// Same hue with every channel scaled by `factor` (sRGB space).
    pub fn scaled(self, factor: f32) -> Color {
        Color::srgb(
            self.r as f32 / 255.0 * factor,
            self.g as f32 / 255.0 * factor,
            self.b as f32 / 255.0 * factor,
        )
    }
}

/// Start/end colors of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPalette {
    pub start: Rgb,
    pub end: Rgb,
}

const PACKAGE_PALETTE: CategoryPalette = CategoryPalette {
    start: Rgb::new(255, 100, 100),
    end: Rgb::new(255, 100, 100),
};

const FILE_PALETTE: CategoryPalette = CategoryPalette {
    start: Rgb::new(255, 255, 255),
    end: Rgb::new(0, 0, 0),
};

const STRUCT_PALETTE: CategoryPalette = CategoryPalette {
    start: Rgb::new(32, 156, 238),
    end: Rgb::new(0, 0, 0),
};

pub fn palette(category: Category) -> CategoryPalette {
    match category {
        Category::Package => PACKAGE_PALETTE,
        Category::File => FILE_PALETTE,
        Category::Struct => STRUCT_PALETTE,
    }
}

/// Interpolation ratio for a line count, clamped to `[0, 1]`.
pub fn line_ratio(lines: u64) -> f32 {
    (lines as f32 / MAX_COLOR_LINES).clamp(0.0, 1.0)
}

/// Linear interpolation between two colors, rounding each channel.
pub fn proportional_color(start: Rgb, end: Rgb, ratio: f32) -> Rgb {
    let ratio = ratio.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| -> u8 {
        let value = a as f32 + (b as f32 - a as f32) * ratio;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgb {
        r: mix(start.r, end.r),
        g: mix(start.g, end.g),
        b: mix(start.b, end.b),
    }
}

/// Color of a block of the given category and size.
pub fn block_color(category: Category, lines: u64) -> Rgb {
    let CategoryPalette { start, end } = palette(category);
    proportional_color(start, end, line_ratio(lines))
}
