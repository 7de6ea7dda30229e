// SPDX-License-Identifier: MPL-2.0
//! Small status badges layered over event artwork.

use crate::ui::design_tokens::{palette, radius, spacing, typography};
use iced::widget::{container, text};
use iced::{Background, Border, Element, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Black pill with white text ("Featured").
    Black,
    /// Accent pill with black text ("On Sale Now").
    Yellow,
}

pub fn view<'a, Message: 'a>(label: String, variant: Variant) -> Element<'a, Message> {
    let styled = move |_theme: &Theme| {
        let (background, text_color) = match variant {
            Variant::Black => (palette::BLACK, palette::WHITE),
            Variant::Yellow => (palette::ACCENT_500, palette::BLACK),
        };
        container::Style {
            background: Some(Background::Color(background)),
            text_color: Some(text_color),
            border: Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    };

    container(text(label).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styled)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_views_build() {
        let _black: Element<'_, ()> = view("Featured".to_string(), Variant::Black);
        let _yellow: Element<'_, ()> = view("On Sale Now".to_string(), Variant::Yellow);
    }
}
