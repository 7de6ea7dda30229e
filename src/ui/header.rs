// SPDX-License-Identifier: MPL-2.0
//! Top bar: app title on the left, venue search on the right.

use crate::i18n::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::{styles, venue_search};
use iced::widget::{container, text, Row};
use iced::{Element, Length};

pub fn view<'a>(search: &venue_search::State, i18n: &I18n) -> Element<'a, venue_search::Message> {
    let title = text(i18n.tr("window-title")).size(typography::TITLE_MD);

    let row = Row::new()
        .align_y(iced::alignment::Vertical::Center)
        .push(container(title).width(Length::Fill))
        .push(venue_search::view(search, i18n));

    container(row)
        .width(Length::Fill)
        .padding([spacing::SM, spacing::MD])
        .style(styles::container::header)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_renders() {
        let i18n = I18n::default();
        let search = venue_search::State::default();
        let _element = view(&search, &i18n);
    }
}
