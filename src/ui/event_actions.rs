// SPDX-License-Identifier: MPL-2.0
//! Primary action button logic for an event.
//!
//! What the main button does depends on the event's sale state:
//! sold out ⇒ disabled, tickets on sale ⇒ book, sale in the future ⇒
//! reminder (toggling off also runs through the reminder confirmation).
//! The decision table lives in [`button_config`] so it can be tested without
//! building widgets.

use crate::domain::Event;
use crate::i18n::I18n;
use crate::ui::design_tokens::spacing;
use crate::ui::styles;
use chrono::{DateTime, Utc};
use iced::widget::{button, text, Row};
use iced::Element;

/// Messages emitted by the action row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The main button (book / set reminder). Ignored while disabled.
    PrimaryPressed,
    /// The secondary "+ More Info" button.
    MoreInfoPressed,
}

/// What pressing the primary button means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    SoldOut,
    Book,
    Remind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub label_key: &'static str,
    pub enabled: bool,
    pub kind: ActionKind,
    pub variant: Variant,
}

/// Decision table for the primary button.
pub fn button_config(event: &Event, is_reminded: bool, now: DateTime<Utc>) -> ButtonConfig {
    if event.sold_out {
        return ButtonConfig {
            label_key: "action-sold-out",
            enabled: false,
            kind: ActionKind::SoldOut,
            variant: Variant::Primary,
        };
    }

    if event.sale_has_started(now) {
        return ButtonConfig {
            label_key: "action-book-now",
            enabled: true,
            kind: ActionKind::Book,
            variant: Variant::Primary,
        };
    }

    if is_reminded {
        return ButtonConfig {
            label_key: "action-reminded",
            enabled: true,
            kind: ActionKind::Remind,
            variant: Variant::Secondary,
        };
    }

    ButtonConfig {
        label_key: "action-set-reminder",
        enabled: true,
        kind: ActionKind::Remind,
        variant: Variant::Primary,
    }
}

/// Renders the action row: the primary button and, on cards, "+ More Info".
pub fn view<'a>(config: ButtonConfig, show_more_info: bool, i18n: &I18n) -> Element<'a, Message> {
    let style = match config.variant {
        Variant::Primary => styles::button::primary,
        Variant::Secondary => styles::button::secondary,
    };

    let primary = button(text(i18n.tr(config.label_key)))
        .on_press_maybe(config.enabled.then_some(Message::PrimaryPressed))
        .style(style)
        .padding([spacing::XS, spacing::MD]);

    let mut row = Row::new().spacing(spacing::XS).push(primary);

    if show_more_info {
        row = row.push(
            button(text(i18n.tr("action-more-info")))
                .on_press(Message::MoreInfoPressed)
                .style(styles::button::secondary)
                .padding([spacing::XS, spacing::MD]),
        );
    }

    row.into()
}
