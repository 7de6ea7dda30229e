// SPDX-License-Identifier: MPL-2.0
//! "No events found" placeholder shown in place of the grid.

use crate::i18n::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::{container, text, Column};
use iced::{Element, Length};

pub fn view<'a, Message: 'a>(venue: &str, i18n: &I18n) -> Element<'a, Message> {
    let detail = if venue.is_empty() {
        i18n.tr("no-results-hint")
    } else {
        i18n.tr_args("no-results-venue", &[("venue", venue.to_string())])
    };

    let column = Column::new()
        .spacing(spacing::SM)
        .align_x(iced::alignment::Horizontal::Center)
        .push(text(i18n.tr("no-results-title")).size(typography::TITLE_MD))
        .push(text(detail).size(typography::BODY).color(palette::GRAY_400));

    container(column)
        .width(Length::Fill)
        .padding(spacing::XL)
        .center_x(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_and_without_a_venue() {
        let i18n = I18n::default();
        let _unfiltered: Element<'_, ()> = view("", &i18n);
        let _filtered: Element<'_, ()> = view("O2 Arena", &i18n);
    }
}
