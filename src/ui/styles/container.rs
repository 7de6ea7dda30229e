// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Event card surface.
pub fn card(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.weak.color;

    container::Style {
        background: Some(Background::Color(base)),
        border: Border {
            radius: radius::MD.into(),
            width: 1.0,
            color: theme.extended_palette().background.strong.color,
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Drawer panel surface, slightly translucent above the backdrop.
///
/// The color is derived from the active Iced `Theme` background so the panel
/// stays readable in both light and dark modes without hard-coding colors.
pub fn panel(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Dimmed backdrop behind the drawer.
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// Header bar across the top of the events page.
pub fn header(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme.extended_palette().background.weak.color)),
        border: Border {
            width: 1.0,
            color: theme.extended_palette().background.strong.color,
            ..Default::default()
        },
        ..Default::default()
    }
}
