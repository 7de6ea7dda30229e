// SPDX-License-Identifier: MPL-2.0
//! Design tokens for the events UI.
//!
//! Centralized constants (colors, spacing, sizing, typography, radii,
//! shadows) so components stay visually consistent. Keep ratios intact when
//! adjusting: the compile-time checks at the bottom guard the scale.

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.08, 0.08, 0.09);
    pub const GRAY_700: Color = Color::from_rgb(0.22, 0.22, 0.24);
    pub const GRAY_400: Color = Color::from_rgb(0.45, 0.45, 0.48);
    pub const GRAY_200: Color = Color::from_rgb(0.78, 0.78, 0.80);
    pub const GRAY_100: Color = Color::from_rgb(0.90, 0.90, 0.91);

    // Brand accent (ticketing yellow)
    pub const ACCENT_300: Color = Color::from_rgb(1.0, 0.92, 0.55);
    pub const ACCENT_500: Color = Color::from_rgb(1.0, 0.84, 0.0);
    pub const ACCENT_700: Color = Color::from_rgb(0.85, 0.68, 0.0);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_PRESSED: f32 = 0.9;
    pub const OPAQUE: f32 = 1.0;

    /// Surface background for panels floating above content.
    pub const SURFACE: f32 = 0.97;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
    pub const XL: f32 = 32.0; // 4 units
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    // Icon sizes
    pub const ICON_SM: f32 = 16.0;
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_XL: f32 = 48.0;

    // Interactive element heights
    pub const BUTTON_HEIGHT: f32 = 36.0;

    // Event grid
    pub const CARD_WIDTH: f32 = 320.0;
    pub const CARD_IMAGE_HEIGHT: f32 = 320.0;

    // Detail drawer panel
    pub const DRAWER_WIDTH: f32 = 420.0;

    // Search input
    pub const SEARCH_WIDTH: f32 = 260.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Medium title - app name, drawer heading
    pub const TITLE_MD: f32 = 20.0;

    /// Small title - card titles, section headers
    pub const TITLE_SM: f32 = 18.0;

    /// Standard body - most UI text
    pub const BODY: f32 = 14.0;

    /// Caption - badges, bylines, ticket rows
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::SURFACE > 0.0 && opacity::SURFACE < 1.0);

    assert!(sizing::ICON_XL > sizing::ICON_MD);
    assert!(sizing::ICON_MD > sizing::ICON_SM);

    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);

    assert!(palette::ACCENT_500.r >= 0.0 && palette::ACCENT_500.r <= 1.0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }
}
