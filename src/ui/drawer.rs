// SPDX-License-Identifier: MPL-2.0
//! Modal drawer with an explicit open/close state machine.
//!
//! States: `Closed → Open → Closing → Closed`. `Closing` exists so the exit
//! transition can play out before the content is dropped: the app keeps the
//! selected event alive until [`State::poll_closed`] reports the 300 ms
//! animation window has elapsed. While `Closing`, the drawer renders but
//! accepts no interaction, and open requests are ignored.
//!
//! Focus contract: while the drawer is visible the app routes Escape to
//! [`State::request_close`]; once fully closed, keyboard focus falls back to
//! the page underneath (Iced's default focus model — nothing inside the
//! drawer retains focus).

use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::{icons, styles};
use iced::widget::{button, container, mouse_area, scrollable, Column, Space, Stack};
use iced::{Element, Length};
use std::time::{Duration, Instant};

/// How long the exit transition is given before content is dropped.
pub const CLOSE_ANIMATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Closed,
    Open,
    Closing {
        since: Instant,
    },
}

impl State {
    /// Opens the drawer. Ignored unless fully closed, so a click racing the
    /// close animation cannot resurrect stale content.
    pub fn open(&mut self) {
        if matches!(self, State::Closed) {
            *self = State::Open;
        }
    }

    /// Starts the close transition. Idempotent; ignored when not open.
    pub fn request_close(&mut self, now: Instant) {
        if matches!(self, State::Open) {
            *self = State::Closing { since: now };
        }
    }

    /// Advances `Closing → Closed` once the animation window has elapsed.
    /// Returns true on that transition — the caller drops the content then.
    pub fn poll_closed(&mut self, now: Instant) -> bool {
        if let State::Closing { since } = *self {
            if now.duration_since(since) >= CLOSE_ANIMATION {
                *self = State::Closed;
                return true;
            }
        }
        false
    }

    pub fn is_open(&self) -> bool {
        matches!(self, State::Open)
    }

    pub fn is_closing(&self) -> bool {
        matches!(self, State::Closing { .. })
    }

    /// Whether the drawer occupies the screen (open or animating out).
    pub fn is_visible(&self) -> bool {
        !matches!(self, State::Closed)
    }
}

/// Renders the drawer chrome (backdrop, right-hand panel, close button)
/// around `content`. `on_close` is `None` while the drawer is closing, which
/// disables the backdrop and the close button in one place.
pub fn view<'a, Message: Clone + 'a>(
    content: Element<'a, Message>,
    on_close: Option<Message>,
) -> Element<'a, Message> {
    let mut backdrop = mouse_area(
        container(Space::new(Length::Fill, Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::container::backdrop),
    );
    if let Some(message) = on_close.clone() {
        backdrop = backdrop.on_press(message);
    }

    let close_button = button(icons::sized(icons::close(), sizing::ICON_MD))
        .on_press_maybe(on_close)
        .style(styles::button::bare)
        .padding(spacing::XXS);

    let panel = Column::new()
        .push(
            container(close_button)
                .width(Length::Fill)
                .align_x(iced::alignment::Horizontal::Right)
                .padding(spacing::XS),
        )
        .push(scrollable(content).height(Length::Fill));

    let panel = container(panel)
        .width(Length::Fixed(sizing::DRAWER_WIDTH))
        .height(Length::Fill)
        .padding(spacing::SM)
        .style(styles::container::panel);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(backdrop)
        .push(
            container(panel)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(iced::alignment::Horizontal::Right),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close_walks_the_full_cycle() {
        let mut state = State::default();
        assert!(!state.is_visible());

        state.open();
        assert!(state.is_open());

        let start = Instant::now();
        state.request_close(start);
        assert!(state.is_closing());
        assert!(state.is_visible());

        assert!(!state.poll_closed(start + Duration::from_millis(299)));
        assert!(state.is_closing());

        assert!(state.poll_closed(start + CLOSE_ANIMATION));
        assert!(!state.is_visible());
    }

    #[test]
    fn request_close_is_idempotent() {
        let mut state = State::Open;
        let start = Instant::now();
        state.request_close(start);
        let first = state;

        // A second press during the animation must not restart the clock.
        state.request_close(start + Duration::from_millis(100));
        assert_eq!(state, first);
    }

    #[test]
    fn reopening_while_closing_is_ignored() {
        let mut state = State::Open;
        let start = Instant::now();
        state.request_close(start);

        state.open();
        assert!(state.is_closing());

        assert!(state.poll_closed(start + CLOSE_ANIMATION));
        state.open();
        assert!(state.is_open());
    }

    #[test]
    fn poll_on_open_or_closed_is_a_no_op() {
        let now = Instant::now();
        let mut closed = State::Closed;
        assert!(!closed.poll_closed(now));

        let mut open = State::Open;
        assert!(!open.poll_closed(now));
        assert!(open.is_open());
    }

    #[test]
    fn chrome_renders_interactive_and_inert() {
        let content: Element<'_, u8> = iced::widget::text("body").into();
        let _interactive = view(content, Some(1u8));

        let content: Element<'_, u8> = iced::widget::text("body").into();
        let _inert = view(content, None);
    }
}
