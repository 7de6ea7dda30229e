// SPDX-License-Identifier: MPL-2.0
//! Native confirmation and error dialogs.
//!
//! Booking and reminders are mocked behind an explicit user confirmation:
//! the dialog summarizes the event and the user accepts or declines.
//! Declining is a normal outcome, not an error. Fetch failures use a plain
//! blocking error dialog.
//!
//! Summary text is assembled separately from the dialog calls so tests can
//! check the wording without a display server.

use crate::currency::format_price;
use crate::domain::Event;
use crate::i18n::I18n;
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};

/// Title and body for the booking confirmation, including the cheapest
/// ticket price ("TBA" when no tier carries a usable price).
pub fn booking_summary(event: &Event, i18n: &I18n) -> (String, String) {
    let price = match event.cheapest_price() {
        Some(total) => format_price(Some(total), event.currency.as_deref()),
        None => i18n.tr("price-tba"),
    };

    let body = i18n.tr_args(
        "dialog-booking-body",
        &[
            ("name", event.name.clone()),
            ("date", dialog_date(event)),
            ("venue", event.venue_name().to_string()),
            ("price", price),
        ],
    );

    (i18n.tr("dialog-booking-title"), body)
}

/// Title and body for the reminder confirmation.
pub fn reminder_summary(event: &Event, i18n: &I18n) -> (String, String) {
    let body = i18n.tr_args(
        "dialog-reminder-body",
        &[
            ("name", event.name.clone()),
            ("date", dialog_date(event)),
            ("venue", event.venue_name().to_string()),
        ],
    );

    (i18n.tr("dialog-reminder-title"), body)
}

/// Presents an OK/Cancel dialog and resolves to the user's choice.
pub async fn confirm(title: String, body: String) -> bool {
    let result = AsyncMessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(&title)
        .set_description(&body)
        .set_buttons(MessageButtons::OkCancel)
        .show()
        .await;
    matches!(result, MessageDialogResult::Ok)
}

/// Blocking error notification with a single OK button.
pub async fn show_error(title: String, message: String) {
    AsyncMessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(&title)
        .set_description(&message)
        .set_buttons(MessageButtons::Ok)
        .show()
        .await;
}

fn dialog_date(event: &Event) -> String {
    event
        .date
        .map(|date| date.format("%-d %B %Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn event(json: &str) -> Event {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn booking_summary_includes_name_venue_and_price() {
        let mut ev = event(
            r#"{
                "id": "ev-1",
                "name": "Night Tapes",
                "venue": "O2 Academy",
                "currency": "GBP",
                "ticket_types": [
                    {"name": "GA", "price": {"total": 2500}},
                    {"name": "VIP", "price": {"total": 9900}}
                ]
            }"#,
        );
        ev.date = Some(Utc.with_ymd_and_hms(2024, 2, 15, 20, 0, 0).unwrap());

        let i18n = I18n::default();
        let (title, body) = booking_summary(&ev, &i18n);

        assert_eq!(title, "Confirm booking");
        assert!(body.contains("Night Tapes"));
        assert!(body.contains("O2 Academy"));
        assert!(body.contains("15 February 2024"));
        assert!(body.contains("£25.00"));
    }

    #[test]
    fn booking_summary_shows_tba_without_usable_price() {
        let ev = event(r#"{"id": "ev-2", "name": "Secret Show", "venue": "TBA Warehouse"}"#);
        let i18n = I18n::default();
        let (_, body) = booking_summary(&ev, &i18n);
        assert!(body.contains("TBA"));
    }

    #[test]
    fn reminder_summary_mentions_sale_notification() {
        let ev = event(r#"{"id": "ev-3", "name": "Holiday Ghosts", "venue": "The Lexington"}"#);
        let i18n = I18n::default();
        let (title, body) = reminder_summary(&ev, &i18n);
        assert_eq!(title, "Confirm reminder");
        assert!(body.contains("Holiday Ghosts"));
        assert!(body.contains("tickets go on sale"));
    }
}
