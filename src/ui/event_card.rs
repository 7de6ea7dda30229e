// SPDX-License-Identifier: MPL-2.0
//! Event card: artwork with badges and play overlay, info block, price, and
//! the action row.

use crate::currency::format_price;
use crate::domain::Event;
use crate::i18n::I18n;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::{badge, event_actions, icons, styles};
use chrono::{DateTime, Utc};
use iced::widget::{button, container, image, text, Column, Row, Stack};
use iced::{Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Play/pause overlay on the artwork.
    PlayPressed,
    Action(event_actions::Message),
}

/// Contextual data needed to render one card.
pub struct ViewContext<'a> {
    pub event: &'a Event,
    pub i18n: &'a I18n,
    /// Prefetched artwork; `None` renders the placeholder.
    pub artwork: Option<&'a image::Handle>,
    pub is_reminded: bool,
    pub is_playing: bool,
    pub now: DateTime<Utc>,
}

/// Appends the square-crop thumbnail parameters to an imgix URL, reusing `&`
/// when the URL already carries a query.
pub fn imgix_thumbnail(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}ar=1:1&fit=crop&crop=entropy&w=400&auto=format&q=80")
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let content = Column::new()
        .push(artwork(&ctx))
        .push(
            Column::new()
                .spacing(spacing::SM)
                .padding(spacing::SM)
                .push(info(&ctx))
                .push(bottom_row(&ctx)),
        );

    container(content)
        .width(Length::Fixed(sizing::CARD_WIDTH))
        .style(styles::container::card)
        .into()
}

/// Artwork block with badges and the play overlay. Shared with the detail
/// drawer, which wraps these messages in its own.
pub fn artwork<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let base: Element<'a, Message> = match ctx.artwork {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
            .content_fit(iced::ContentFit::Cover)
            .into(),
        None => container(text(ctx.i18n.tr("no-image")).size(typography::BODY))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
            .style(|theme: &iced::Theme| iced::widget::container::Style {
                background: Some(theme.extended_palette().background.strong.color.into()),
                ..Default::default()
            })
            .into(),
    };

    let mut layers = Stack::new().width(Length::Fill).push(base);

    let badges = badge_row(ctx);
    if let Some(badges) = badges {
        layers = layers.push(
            container(badges)
                .padding(spacing::XS)
                .width(Length::Fill)
                .align_x(iced::alignment::Horizontal::Left),
        );
    }

    if ctx.event.has_audio_preview() {
        let icon = if ctx.is_playing {
            icons::pause()
        } else {
            icons::play()
        };
        let play_button = button(icons::sized(icon, sizing::ICON_MD))
            .on_press(Message::PlayPressed)
            .style(styles::button::overlay(
                palette::WHITE,
                opacity::OVERLAY_MEDIUM,
                opacity::OVERLAY_STRONG,
            ))
            .padding(spacing::SM);

        layers = layers.push(
            container(play_button)
                .width(Length::Fill)
                .height(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
                .center_x(Length::Fill)
                .center_y(Length::Fixed(sizing::CARD_IMAGE_HEIGHT)),
        );
    }

    layers.into()
}

fn badge_row<'a>(ctx: &ViewContext<'a>) -> Option<Element<'a, Message>> {
    let mut row = Row::new().spacing(spacing::XS);
    let mut any = false;

    if ctx.event.featured {
        row = row.push(badge::view(ctx.i18n.tr("badge-featured"), badge::Variant::Black));
        any = true;
    }
    if ctx.event.on_sale_badge(ctx.now) {
        row = row.push(badge::view(ctx.i18n.tr("badge-on-sale"), badge::Variant::Yellow));
        any = true;
    }

    any.then(|| row.into())
}

fn info<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut column = Column::new().spacing(spacing::XXS);

    if let Some(date_line) = ctx.event.date_line() {
        column = column.push(
            text(date_line)
                .size(typography::CAPTION)
                .color(palette::ACCENT_700),
        );
    }

    column
        .push(text(ctx.event.name.clone()).size(typography::TITLE_SM))
        .push(text(ctx.event.venue_name().to_string()).size(typography::BODY))
        .push(
            text(ctx.event.venue_location())
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        )
        .into()
}

/// Action-button decision for this context (also used by the drawer).
pub fn actions_config(ctx: &ViewContext<'_>) -> event_actions::ButtonConfig {
    event_actions::button_config(ctx.event, ctx.is_reminded, ctx.now)
}

fn bottom_row<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let price = text(format_price(
        ctx.event.cheapest_price(),
        ctx.event.currency.as_deref(),
    ))
    .size(typography::TITLE_SM);

    let actions = event_actions::view(actions_config(ctx), true, ctx.i18n).map(Message::Action);

    Row::new()
        .spacing(spacing::SM)
        .align_y(iced::alignment::Vertical::Center)
        .push(container(price).width(Length::Fill))
        .push(actions)
        .into()
}
