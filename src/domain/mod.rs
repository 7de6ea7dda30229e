// SPDX-License-Identifier: MPL-2.0
//! Event domain model.
//!
//! These types mirror the DICE `/events` payload. The API is tolerant by
//! design: almost every field can be absent, so everything optional carries
//! `#[serde(default)]` and accessors encode the fallback chain in one place
//! instead of at every call site. Events are immutable once deserialized;
//! a refetch replaces them wholesale.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sale_start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sold_out: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub venues: Vec<VenueRef>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub ticket_types: Vec<TicketTier>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub spotify_tracks: Vec<PreviewTrack>,
    #[serde(default)]
    pub apple_music_tracks: Vec<PreviewTrack>,
    #[serde(default)]
    pub event_images: Option<EventImages>,
    #[serde(default)]
    pub images: Vec<LegacyImage>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lineup: Vec<LineupSlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketTier {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<TicketPrice>,
    #[serde(default)]
    pub sold_out: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketPrice {
    #[serde(default)]
    pub face_value: Option<i64>,
    #[serde(default)]
    pub fees: Option<i64>,
    /// Total in minor currency units (pence, cents).
    #[serde(default)]
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewTrack {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub open_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<CityRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country_alpha3: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventImages {
    #[serde(default)]
    pub square: Option<String>,
    #[serde(default)]
    pub landscape: Option<String>,
    #[serde(default)]
    pub portrait: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineupSlot {
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl Event {
    /// Venue display name, never empty.
    pub fn venue_name(&self) -> &str {
        self.venue.as_deref().unwrap_or("Unknown Venue")
    }

    /// "City, GBR"-style location line: structured venue city first, then the
    /// flat location block, then placeholders.
    pub fn venue_location(&self) -> String {
        if let Some(city) = self.venues.first().and_then(|v| v.city.as_ref()) {
            if let (Some(name), Some(country)) = (&city.name, &city.country_alpha3) {
                return format!("{}, {}", name, country);
            }
        }

        let city = self
            .location
            .as_ref()
            .and_then(|l| l.city.as_deref())
            .unwrap_or("Unknown City");
        let country = self
            .location
            .as_ref()
            .and_then(|l| l.country.as_deref())
            .unwrap_or("Unknown Country");
        format!("{}, {}", city, country)
    }

    /// "Friday · Feb 15 · 8:00 pm" card byline, or `None` without a date.
    pub fn date_line(&self) -> Option<String> {
        self.date
            .map(|date| date.format("%A · %b %-d · %-I:%M %P").to_string())
    }

    /// Whether the "On Sale Now" badge applies: a known sale start that has
    /// already passed. No sale-start date means no badge.
    pub fn on_sale_badge(&self, now: DateTime<Utc>) -> bool {
        self.sale_start_date.map(|start| start <= now).unwrap_or(false)
    }

    /// Whether tickets can be booked right now. Unlike the badge, a missing
    /// sale-start date counts as on sale.
    pub fn sale_has_started(&self, now: DateTime<Utc>) -> bool {
        self.sale_start_date.map(|start| start <= now).unwrap_or(true)
    }

    /// Whether any platform advertises a preview for this event. Drives the
    /// play-button overlay; actual playback is stricter (see [`preview_url`]).
    ///
    /// [`preview_url`]: Event::preview_url
    pub fn has_audio_preview(&self) -> bool {
        !self.spotify_tracks.is_empty() || !self.apple_music_tracks.is_empty()
    }

    /// The preview URL playback will actually use: the first Spotify track.
    /// Apple Music previews are never selected — their endpoint rejects
    /// anonymous fetches, so a track would fail after the UI marked it
    /// playing.
    pub fn preview_url(&self) -> Option<&str> {
        self.spotify_tracks
            .first()
            .and_then(|track| track.preview_url.as_deref())
    }

    /// Card artwork URL: square crop first, then landscape, then the legacy
    /// flat image list.
    pub fn image_url(&self) -> Option<&str> {
        if let Some(images) = &self.event_images {
            if let Some(square) = images.square.as_deref() {
                return Some(square);
            }
            if let Some(landscape) = images.landscape.as_deref() {
                return Some(landscape);
            }
        }
        self.images.first().and_then(|image| image.url.as_deref())
    }

    /// Cheapest qualifying ticket total in minor units.
    pub fn cheapest_price(&self) -> Option<i64> {
        crate::currency::cheapest_price(&self.ticket_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_event() -> Event {
        serde_json::from_str(r#"{"id": "ev-1", "name": "Test Event"}"#)
            .expect("minimal event should deserialize")
    }

    #[test]
    fn minimal_payload_deserializes_with_defaults() {
        let event = base_event();
        assert_eq!(event.id, "ev-1");
        assert!(!event.sold_out);
        assert!(!event.featured);
        assert!(event.ticket_types.is_empty());
        assert_eq!(event.venue_name(), "Unknown Venue");
        assert_eq!(event.venue_location(), "Unknown City, Unknown Country");
    }

    #[test]
    fn structured_city_wins_over_flat_location() {
        let event: Event = serde_json::from_str(
            r#"{
                "id": "ev-2",
                "name": "Test",
                "venues": [{"name": "Test Venue", "city": {"name": "London", "country_alpha3": "GBR"}}],
                "location": {"city": "Paris", "country": "France"}
            }"#,
        )
        .unwrap();
        assert_eq!(event.venue_location(), "London, GBR");
    }

    #[test]
    fn flat_location_used_when_city_is_incomplete() {
        let event: Event = serde_json::from_str(
            r#"{
                "id": "ev-3",
                "name": "Test",
                "venues": [{"city": {"name": "London"}}],
                "location": {"city": "Paris", "country": "France"}
            }"#,
        )
        .unwrap();
        assert_eq!(event.venue_location(), "Paris, France");
    }

    #[test]
    fn date_line_formats_weekday_month_and_time() {
        let mut event = base_event();
        event.date = Some(Utc.with_ymd_and_hms(2024, 2, 16, 20, 0, 0).unwrap());
        assert_eq!(event.date_line().unwrap(), "Friday · Feb 16 · 8:00 pm");
    }

    #[test]
    fn sale_badge_requires_a_past_sale_start() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let mut event = base_event();

        assert!(!event.on_sale_badge(now));
        assert!(event.sale_has_started(now));

        event.sale_start_date = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(event.on_sale_badge(now));
        assert!(event.sale_has_started(now));

        event.sale_start_date = Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert!(!event.on_sale_badge(now));
        assert!(!event.sale_has_started(now));
    }

    #[test]
    fn preview_url_is_spotify_only() {
        let event: Event = serde_json::from_str(
            r#"{
                "id": "ev-4",
                "name": "Test",
                "apple_music_tracks": [{"preview_url": "https://apple.example/p.m4a"}],
                "spotify_tracks": [{"preview_url": "https://spotify.example/p.mp3"}]
            }"#,
        )
        .unwrap();
        assert_eq!(event.preview_url(), Some("https://spotify.example/p.mp3"));

        let apple_only: Event = serde_json::from_str(
            r#"{
                "id": "ev-5",
                "name": "Test",
                "apple_music_tracks": [{"preview_url": "https://apple.example/p.m4a"}]
            }"#,
        )
        .unwrap();
        assert!(apple_only.has_audio_preview());
        assert_eq!(apple_only.preview_url(), None);
    }

    #[test]
    fn image_url_prefers_square_then_landscape_then_legacy() {
        let event: Event = serde_json::from_str(
            r#"{
                "id": "ev-6",
                "name": "Test",
                "event_images": {"landscape": "https://img.example/wide.jpg"},
                "images": [{"url": "https://img.example/legacy.jpg"}]
            }"#,
        )
        .unwrap();
        assert_eq!(event.image_url(), Some("https://img.example/wide.jpg"));

        let legacy_only: Event = serde_json::from_str(
            r#"{"id": "ev-7", "name": "Test", "images": [{"url": "https://img.example/legacy.jpg"}]}"#,
        )
        .unwrap();
        assert_eq!(legacy_only.image_url(), Some("https://img.example/legacy.jpg"));
    }
}
