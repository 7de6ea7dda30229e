// SPDX-License-Identifier: MPL-2.0
//! Detail drawer content for the selected event: artwork, full info, and the
//! description / lineup / ticket sections the cards have no room for.

use crate::currency::format_price;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::event_card::{self, ViewContext};
use iced::widget::{container, text, Column, Row};
use iced::{Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Card(event_card::Message),
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let event = ctx.event;

    let mut column = Column::new()
        .spacing(spacing::MD)
        .push(event_card::artwork(&ctx).map(Message::Card));

    let mut heading = Column::new().spacing(spacing::XXS);
    if let Some(date_line) = event.date_line() {
        heading = heading.push(
            text(date_line)
                .size(typography::CAPTION)
                .color(palette::ACCENT_700),
        );
    }
    heading = heading
        .push(text(event.name.clone()).size(typography::TITLE_MD))
        .push(text(event.venue_name().to_string()).size(typography::BODY))
        .push(
            text(event.venue_location())
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        )
        .push(
            text(format_price(event.cheapest_price(), event.currency.as_deref()))
                .size(typography::TITLE_SM),
        );
    column = column.push(heading);

    let config = event_card::actions_config(&ctx);
    column = column.push(
        crate::ui::event_actions::view(config, false, ctx.i18n)
            .map(|m| Message::Card(event_card::Message::Action(m))),
    );

    if let Some(description) = event.description.clone().filter(|d| !d.is_empty()) {
        column = column.push(section(
            ctx.i18n.tr("drawer-section-about"),
            text(description).size(typography::BODY).into(),
        ));
    }

    if !event.lineup.is_empty() {
        let mut lineup = Column::new().spacing(spacing::XXS);
        for slot in &event.lineup {
            let details = slot.details.clone().unwrap_or_default();
            let line = match &slot.time {
                Some(time) => format!("{} - {}", details, time),
                None => details,
            };
            lineup = lineup.push(text(line).size(typography::BODY));
        }
        column = column.push(section(ctx.i18n.tr("drawer-section-lineup"), lineup.into()));
    }

    if !event.ticket_types.is_empty() {
        let mut tickets = Column::new().spacing(spacing::XXS);
        for tier in &event.ticket_types {
            let name = tier.name.clone().unwrap_or_else(|| "General".to_string());
            let price = format_price(
                tier.price.as_ref().and_then(|p| p.total),
                event.currency.as_deref(),
            );
            tickets = tickets.push(
                Row::new()
                    .push(container(text(name).size(typography::BODY)).width(Length::Fill))
                    .push(text(price).size(typography::BODY)),
            );
        }
        column = column.push(section(ctx.i18n.tr("drawer-section-tickets"), tickets.into()));
    }

    container(column).padding(spacing::SM).into()
}

fn section<'a>(title: String, body: Element<'a, Message>) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XS)
        .push(text(title).size(typography::TITLE_SM))
        .push(body)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Event;
    use crate::i18n::I18n;
    use chrono::Utc;

    #[test]
    fn drawer_content_renders_all_sections() {
        let event: Event = serde_json::from_str(
            r#"{
                "id": "ev-1",
                "name": "Warehouse Party",
                "venue": "Printworks",
                "description": "All night long.",
                "currency": "GBP",
                "lineup": [
                    {"details": "Doors", "time": "7pm"},
                    {"details": "Headliner"}
                ],
                "ticket_types": [
                    {"name": "Early Bird", "price": {"total": 1500}},
                    {"name": "GA", "price": {"total": 2500}}
                ],
                "spotify_tracks": [{"preview_url": "https://p.scdn.co/x"}]
            }"#,
        )
        .unwrap();
        let i18n = I18n::default();

        let _element = view(ViewContext {
            event: &event,
            i18n: &i18n,
            artwork: None,
            is_reminded: false,
            is_playing: false,
            now: Utc::now(),
        });
    }
}
