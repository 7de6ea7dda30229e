// SPDX-License-Identifier: MPL-2.0
//! Expandable, debounced venue search input.
//!
//! The component owns the debounce: edits only set a deadline, and the
//! application's periodic tick calls [`State::poll`], which fires the search
//! 500 ms after the last edit. The page controller therefore only ever sees
//! already-debounced queries. Overwriting the deadline on every edit is what
//! makes stale firings impossible: there is never more than one pending
//! deadline.
//!
//! Focus contract: expanding the collapsed button emits
//! [`Event::FocusInput`]; the parent is expected to focus [`input_id`] so the
//! user can type immediately.

use crate::i18n::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::{icons, styles};
use iced::widget::{button, text, text_input, Row};
use iced::{Element, Length};
use std::time::{Duration, Instant};

/// Quiet period after the last keystroke before the search fires.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
pub struct State {
    query: String,
    expanded: bool,
    deadline: Option<Instant>,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// The collapsed "VENUE" button was pressed.
    ExpandPressed,
    InputChanged(String),
    ClearPressed,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The input just appeared; parent should move keyboard focus to it.
    FocusInput,
}

/// Id of the search text input, for focus management.
pub fn input_id() -> text_input::Id {
    text_input::Id::new("venue-search-input")
}

impl State {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether a debounce deadline is waiting to fire (keeps the app's tick
    /// subscription alive).
    pub fn debounce_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Event {
        match message {
            Message::ExpandPressed => {
                self.expanded = true;
                Event::FocusInput
            }
            Message::InputChanged(query) => {
                self.query = query;
                self.deadline = Some(now + DEBOUNCE);
                Event::None
            }
            Message::ClearPressed => {
                self.query.clear();
                self.expanded = false;
                // Clearing is a search for "everything", debounced like typing.
                self.deadline = Some(now + DEBOUNCE);
                Event::None
            }
        }
    }

    /// Returns the query to search once the debounce deadline has elapsed.
    /// The deadline is consumed: each burst of edits fires at most once.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.query.clone())
            }
            _ => None,
        }
    }
}

pub fn view<'a>(state: &State, i18n: &I18n) -> Element<'a, Message> {
    if !state.expanded {
        let label = Row::new()
            .spacing(spacing::XS)
            .push(icons::sized(icons::pin(), sizing::ICON_SM))
            .push(text(i18n.tr("search-open")).size(typography::BODY));

        return button(label)
            .on_press(Message::ExpandPressed)
            .style(styles::button::bare)
            .padding([spacing::XS, spacing::SM])
            .into();
    }

    let input = text_input(&i18n.tr("search-placeholder"), state.query())
        .id(input_id())
        .on_input(Message::InputChanged)
        .size(typography::BODY)
        .width(Length::Fixed(sizing::SEARCH_WIDTH))
        .padding(spacing::XS);

    let mut row = Row::new()
        .spacing(spacing::XS)
        .push(icons::sized(icons::search(), sizing::ICON_SM))
        .push(input);

    if !state.query().is_empty() {
        row = row.push(
            button(icons::sized(icons::close(), sizing::ICON_SM))
                .on_press(Message::ClearPressed)
                .style(styles::button::bare)
                .padding(spacing::XXS),
        );
    }

    row.into()
}
