// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration for the events page.
//!
//! The `App` struct is the event-list controller: it owns the paged event
//! sequence, the search filter, the reminder set, the preview-playback
//! marker, and the drawer selection, and translates messages into side
//! effects (API fetches, artwork downloads, dialogs, preview playback). The
//! policy decisions that shape user-facing behavior — replace vs. append,
//! stale-response discarding, the load-more guard — all live in this file so
//! they are easy to audit.
//!
//! Fetch ordering: every replace-style fetch (startup, search) carries a
//! monotonically increasing sequence number and only the latest one may
//! touch the event list, so a slow early search can never overwrite a faster
//! later one. Append fetches are serialized by the `loading_more` flag and
//! are discarded if a replace supersedes them mid-flight.

use crate::api::{self, EventQuery, EventsClient, EventsPage};
use crate::config;
use crate::dialogs;
use crate::domain::Event;
use crate::error::Error;
use crate::i18n::I18n;
use crate::preview_player::{self, DecodedPreview, PreviewPlayer};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::theming::ThemeMode;
use crate::ui::widgets::AnimatedSpinner;
use crate::ui::{self, drawer, event_card, event_drawer, venue_search};
use chrono::Utc;
use iced::widget::{button, container, image, scrollable, text, text_input, Column, Row, Stack};
use iced::{keyboard, time, window, Element, Length, Subscription, Task, Theme};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cards per grid row.
const GRID_COLUMNS: usize = 3;

/// Spinner advance per tick (180°/s at the 100 ms tick rate).
const SPINNER_STEP: f32 = std::f32::consts::PI / 10.0;

/// Tick period while any deadline is pending.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Root Iced application state bridging the API client, the preview player,
/// and the UI components.
pub struct App {
    pub i18n: I18n,
    theme_mode: ThemeMode,

    http: reqwest::Client,
    /// Absent when no API key is configured; every fetch then fails with the
    /// configuration message without touching the network.
    client: Option<EventsClient>,
    page_size: u32,

    events: Vec<Event>,
    loading: bool,
    loading_more: bool,
    current_page: u32,
    has_more: bool,
    venue_query: String,
    /// Sequence number of the latest replace-style fetch.
    fetch_seq: u64,

    reminded: HashSet<String>,

    player: PreviewPlayer,
    /// Event id currently marked as playing (at most one).
    playing: Option<String>,

    search: venue_search::State,
    drawer: drawer::State,
    /// Kept alive through the drawer's close animation.
    selected: Option<Event>,

    artwork: HashMap<String, image::Handle>,
    spinner_rotation: f32,
}

/// Top-level messages consumed by [`App::update`].
#[derive(Debug, Clone)]
pub enum Message {
    EventsFetched {
        seq: u64,
        page: u32,
        append: bool,
        result: Result<EventsPage, Error>,
    },
    LoadMorePressed,
    Search(venue_search::Message),
    Card {
        event_id: String,
        message: event_card::Message,
    },
    Drawer(event_drawer::Message),
    /// Close button, backdrop click, or Escape while the drawer is open.
    DrawerDismissed,
    BookingConfirmed {
        event_id: String,
        accepted: bool,
    },
    ReminderConfirmed {
        event_id: String,
        accepted: bool,
    },
    PreviewFetched {
        event_id: String,
        url: String,
        result: Result<Arc<DecodedPreview>, Error>,
    },
    ArtworkFetched {
        event_id: String,
        result: Result<image::Handle, Error>,
    },
    ErrorDialogClosed,
    EscapePressed,
    Tick(Instant),
}

/// Runtime flags passed in from the CLI launcher.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional directory of Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 1160;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 780;
pub const MIN_WINDOW_WIDTH: u32 = 720;
pub const MIN_WINDOW_HEIGHT: u32 = 560;

fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    iced::application(|state: &App| state.title(), App::update, App::view)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run_with(move || App::new(flags))
}

impl App {
    /// Initializes application state and kicks off the one startup fetch for
    /// page 1 with no filter.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();
        let i18n = I18n::new(flags.lang, flags.i18n_dir, &config);

        let http = reqwest::Client::builder()
            .user_agent(concat!("GigScope/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                eprintln!("Failed to configure HTTP client: {e}");
                reqwest::Client::new()
            });

        let client = match EventsClient::from_config(http.clone(), &config) {
            Ok(client) => Some(client),
            Err(e) => {
                eprintln!("Events client unavailable: {e}");
                None
            }
        };

        let mut app = App {
            i18n,
            theme_mode: config.theme_mode,
            http,
            client,
            page_size: config.page_size.unwrap_or(api::DEFAULT_PAGE_SIZE),
            events: Vec::new(),
            loading: false,
            loading_more: false,
            current_page: 1,
            has_more: false,
            venue_query: String::new(),
            fetch_seq: 0,
            reminded: HashSet::new(),
            player: PreviewPlayer::new(),
            playing: None,
            search: venue_search::State::default(),
            drawer: drawer::State::default(),
            selected: None,
            artwork: HashMap::new(),
            spinner_rotation: 0.0,
        };

        let startup = app.begin_replace(String::new());
        (app, startup)
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keyboard_subscription = keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::EscapePressed),
            _ => None,
        });

        let tick_subscription = if self.needs_tick() {
            time::every(TICK_INTERVAL).map(Message::Tick)
        } else {
            Subscription::none()
        };

        Subscription::batch([keyboard_subscription, tick_subscription])
    }

    /// The tick drives every pending deadline: spinner frames, the search
    /// debounce, the drawer close animation, and end-of-preview detection.
    fn needs_tick(&self) -> bool {
        self.loading
            || self.loading_more
            || self.search.debounce_pending()
            || self.drawer.is_closing()
            || self.playing.is_some()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EventsFetched {
                seq,
                page,
                append,
                result,
            } => self.handle_events_fetched(seq, page, append, result),
            Message::LoadMorePressed => self.begin_load_more(),
            Message::Search(search_message) => {
                match self.search.update(search_message, Instant::now()) {
                    venue_search::Event::FocusInput => text_input::focus(venue_search::input_id()),
                    venue_search::Event::None => Task::none(),
                }
            }
            Message::Card { event_id, message } => {
                let Some(event) = self.find_event(&event_id) else {
                    return Task::none();
                };
                self.handle_card_message(event, message)
            }
            Message::Drawer(drawer_message) => {
                // The closing drawer is inert; late clicks fall through.
                if !self.drawer.is_open() {
                    return Task::none();
                }
                let Some(event) = self.selected.clone() else {
                    return Task::none();
                };
                match drawer_message {
                    event_drawer::Message::Card(card_message) => {
                        self.handle_card_message(event, card_message)
                    }
                }
            }
            Message::DrawerDismissed => {
                self.drawer.request_close(Instant::now());
                Task::none()
            }
            Message::EscapePressed => {
                if self.drawer.is_open() {
                    self.drawer.request_close(Instant::now());
                }
                Task::none()
            }
            Message::BookingConfirmed { .. } => {
                // Mocked flow: accepting performs no transaction, declining
                // aborts. Either way there is nothing to update.
                Task::none()
            }
            Message::ReminderConfirmed { event_id, accepted } => {
                if accepted {
                    self.toggle_reminder(&event_id);
                }
                Task::none()
            }
            Message::PreviewFetched {
                event_id,
                url,
                result,
            } => self.handle_preview_fetched(event_id, url, result),
            Message::ArtworkFetched { event_id, result } => {
                match result {
                    Ok(handle) => {
                        self.artwork.insert(event_id, handle);
                    }
                    Err(err) => eprintln!("Failed to load artwork for {event_id}: {err}"),
                }
                Task::none()
            }
            Message::ErrorDialogClosed => Task::none(),
            Message::Tick(now) => self.handle_tick(now),
        }
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    /// Starts a replace-style fetch for page 1: the startup load and every
    /// (already debounced) search. Bumps the fetch sequence so slower
    /// in-flight replaces become stale.
    fn begin_replace(&mut self, venue: String) -> Task<Message> {
        self.venue_query = venue.clone();
        self.loading = true;
        self.fetch_seq += 1;
        let query = EventQuery {
            venue,
            page: 1,
            page_size: self.page_size,
        };
        self.spawn_fetch(query, self.fetch_seq, false)
    }

    /// Fetches the next page with the active filter. A second request while
    /// one is in flight is dropped.
    fn begin_load_more(&mut self) -> Task<Message> {
        if self.loading_more {
            return Task::none();
        }
        self.loading_more = true;
        let query = EventQuery {
            venue: self.venue_query.clone(),
            page: self.current_page + 1,
            page_size: self.page_size,
        };
        self.spawn_fetch(query, self.fetch_seq, true)
    }

    fn spawn_fetch(&self, query: EventQuery, seq: u64, append: bool) -> Task<Message> {
        let page = query.page;
        match &self.client {
            Some(client) => {
                let client = client.clone();
                Task::perform(
                    async move { client.fetch_events(&query).await },
                    move |result| Message::EventsFetched {
                        seq,
                        page,
                        append,
                        result,
                    },
                )
            }
            // No credential: fail through the same path a fetch error takes,
            // without any network I/O.
            None => Task::done(Message::EventsFetched {
                seq,
                page,
                append,
                result: Err(Error::Config(
                    "API key not found. Set DICE_API_KEY or add api_key to settings.toml."
                        .to_string(),
                )),
            }),
        }
    }

    fn handle_events_fetched(
        &mut self,
        seq: u64,
        page: u32,
        append: bool,
        result: Result<EventsPage, Error>,
    ) -> Task<Message> {
        if append {
            self.loading_more = false;
            return match result {
                // An append that raced a newer search would splice old-filter
                // events into the new list; drop it.
                Ok(_) if seq != self.fetch_seq => Task::none(),
                Ok(events_page) => {
                    let prefetch = self.prefetch_artwork(&events_page.events);
                    self.events.extend(events_page.events);
                    self.current_page = page;
                    self.has_more = events_page.has_more;
                    prefetch
                }
                Err(err) => self.show_fetch_error(err),
            };
        }

        if seq != self.fetch_seq {
            // Stale replace response; a newer fetch is still in flight and
            // owns the loading flag.
            return Task::none();
        }

        self.loading = false;
        match result {
            Ok(events_page) => {
                let prefetch = self.prefetch_artwork(&events_page.events);
                self.events = events_page.events;
                self.current_page = page;
                self.has_more = events_page.has_more;
                prefetch
            }
            Err(err) => self.show_fetch_error(err),
        }
    }

    /// Fetch failures never escape as raw errors: log, classify, and surface
    /// a blocking dialog. Previously displayed events stay untouched.
    fn show_fetch_error(&self, err: Error) -> Task<Message> {
        eprintln!("Error loading events: {err}");
        let title = self.i18n.tr("dialog-load-failed-title");
        let message = self.i18n.tr(err.message_key());
        Task::perform(dialogs::show_error(title, message), |_| {
            Message::ErrorDialogClosed
        })
    }

    /// Downloads square-crop artwork for events that don't have a cached
    /// handle yet.
    fn prefetch_artwork(&self, events: &[Event]) -> Task<Message> {
        let tasks: Vec<Task<Message>> = events
            .iter()
            .filter(|event| !self.artwork.contains_key(&event.id))
            .filter_map(|event| {
                let url = event_card::imgix_thumbnail(event.image_url()?);
                let http = self.http.clone();
                let event_id = event.id.clone();
                Some(Task::perform(
                    fetch_artwork(http, url),
                    move |result| Message::ArtworkFetched {
                        event_id: event_id.clone(),
                        result,
                    },
                ))
            })
            .collect();
        Task::batch(tasks)
    }

    // ------------------------------------------------------------------
    // Card actions
    // ------------------------------------------------------------------

    fn find_event(&self, event_id: &str) -> Option<Event> {
        self.events.iter().find(|event| event.id == event_id).cloned()
    }

    fn handle_card_message(&mut self, event: Event, message: event_card::Message) -> Task<Message> {
        match message {
            event_card::Message::PlayPressed => self.toggle_preview(&event),
            event_card::Message::Action(ui::event_actions::Message::MoreInfoPressed) => {
                self.selected = Some(event);
                self.drawer.open();
                Task::none()
            }
            event_card::Message::Action(ui::event_actions::Message::PrimaryPressed) => {
                self.primary_action(&event)
            }
        }
    }

    /// Book or remind, depending on the event's sale state, both behind a
    /// confirmation dialog.
    fn primary_action(&mut self, event: &Event) -> Task<Message> {
        let config = ui::event_actions::button_config(
            event,
            self.reminded.contains(&event.id),
            Utc::now(),
        );

        match config.kind {
            ui::event_actions::ActionKind::SoldOut => Task::none(),
            ui::event_actions::ActionKind::Book => {
                let (title, body) = dialogs::booking_summary(event, &self.i18n);
                let event_id = event.id.clone();
                Task::perform(dialogs::confirm(title, body), move |accepted| {
                    Message::BookingConfirmed {
                        event_id: event_id.clone(),
                        accepted,
                    }
                })
            }
            ui::event_actions::ActionKind::Remind => {
                let (title, body) = dialogs::reminder_summary(event, &self.i18n);
                let event_id = event.id.clone();
                Task::perform(dialogs::confirm(title, body), move |accepted| {
                    Message::ReminderConfirmed {
                        event_id: event_id.clone(),
                        accepted,
                    }
                })
            }
        }
    }

    /// Pure reminder toggle; confirmation happens before this is reached.
    fn toggle_reminder(&mut self, event_id: &str) {
        if !self.reminded.remove(event_id) {
            self.reminded.insert(event_id.to_string());
        }
    }

    // ------------------------------------------------------------------
    // Preview playback
    // ------------------------------------------------------------------

    /// Play/pause mediation: at most one event id is marked playing, and the
    /// player's single stream mirrors it.
    fn toggle_preview(&mut self, event: &Event) -> Task<Message> {
        if self.playing.as_deref() == Some(event.id.as_str()) {
            self.player.stop();
            self.playing = None;
            return Task::none();
        }

        if self.player.is_playing() {
            self.player.stop();
        }
        self.playing = None;

        let Some(url) = event.preview_url().map(str::to_string) else {
            // No eligible preview: nothing starts, nothing is marked.
            return Task::none();
        };
        if !self.player.has_output() {
            eprintln!("Ignoring preview request, no audio output: {url}");
            return Task::none();
        }

        if let Some(decoded) = self.player.cached(&url) {
            self.player.play(&url, decoded);
            self.playing = Some(event.id.clone());
            return Task::none();
        }

        self.playing = Some(event.id.clone());
        let http = self.http.clone();
        let output_config = self.player.output_config();
        let task_url = url.clone();
        let event_id = event.id.clone();
        Task::perform(
            async move {
                let path = preview_player::fetch_preview(http, task_url.clone()).await?;
                preview_player::decode::decode_preview(&path, output_config).map(Arc::new)
            },
            move |result| Message::PreviewFetched {
                event_id: event_id.clone(),
                url: url.clone(),
                result,
            },
        )
    }

    fn handle_preview_fetched(
        &mut self,
        event_id: String,
        url: String,
        result: Result<Arc<DecodedPreview>, Error>,
    ) -> Task<Message> {
        if self.playing.as_deref() != Some(event_id.as_str()) {
            // The user stopped or switched tracks while this was loading.
            // Cache the work anyway so a replay is instant.
            if let Ok(decoded) = result {
                self.player.insert(url, decoded);
            }
            return Task::none();
        }

        match result {
            Ok(decoded) => {
                self.player.insert(url.clone(), decoded.clone());
                self.player.play(&url, decoded);
            }
            Err(err) => {
                eprintln!("Error playing audio: {err}");
                self.playing = None;
            }
        }
        Task::none()
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    fn handle_tick(&mut self, now: Instant) -> Task<Message> {
        self.spinner_rotation = (self.spinner_rotation + SPINNER_STEP) % (2.0 * std::f32::consts::PI);

        if self.drawer.poll_closed(now) {
            self.selected = None;
        }

        if self.playing.is_some() && self.player.is_finished() {
            self.player.stop();
            self.playing = None;
        }

        match self.search.poll(now) {
            Some(query) => self.begin_replace(query),
            None => Task::none(),
        }
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    fn view(&self) -> Element<'_, Message> {
        let header = ui::header::view(&self.search, &self.i18n).map(Message::Search);

        let content: Element<'_, Message> = if self.loading {
            self.loading_view()
        } else if self.events.is_empty() {
            ui::empty_state::view(&self.venue_query, &self.i18n)
        } else {
            self.grid_view()
        };

        let page: Element<'_, Message> = Column::new()
            .push(header)
            .push(container(content).width(Length::Fill).height(Length::Fill))
            .into();

        match &self.selected {
            Some(event) if self.drawer.is_visible() => {
                let ctx = self.card_context(event);
                let body = event_drawer::view(ctx).map(Message::Drawer);
                let on_close = self.drawer.is_open().then_some(Message::DrawerDismissed);
                Stack::new()
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .push(page)
                    .push(drawer::view(body, on_close))
                    .into()
            }
            _ => page,
        }
    }

    fn card_context<'a>(&'a self, event: &'a Event) -> event_card::ViewContext<'a> {
        event_card::ViewContext {
            event,
            i18n: &self.i18n,
            artwork: self.artwork.get(&event.id),
            is_reminded: self.reminded.contains(&event.id),
            is_playing: self.playing.as_deref() == Some(event.id.as_str()),
            now: Utc::now(),
        }
    }

    fn loading_view(&self) -> Element<'_, Message> {
        let column = Column::new()
            .spacing(spacing::MD)
            .align_x(iced::alignment::Horizontal::Center)
            .push(AnimatedSpinner::new(palette::ACCENT_500, self.spinner_rotation).into_element())
            .push(text(self.i18n.tr("loading-events")).size(typography::BODY));

        container(column)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn grid_view(&self) -> Element<'_, Message> {
        let mut grid = Column::new().spacing(spacing::LG).padding(spacing::LG);

        for chunk in self.events.chunks(GRID_COLUMNS) {
            let mut row = Row::new().spacing(spacing::LG);
            for event in chunk {
                let event_id = event.id.clone();
                row = row.push(event_card::view(self.card_context(event)).map(move |message| {
                    Message::Card {
                        event_id: event_id.clone(),
                        message,
                    }
                }));
            }
            grid = grid.push(row);
        }

        if self.has_more {
            let label: Element<'_, Message> = if self.loading_more {
                AnimatedSpinner::new(palette::BLACK, self.spinner_rotation)
                    .size(typography::TITLE_SM)
                    .into_element()
            } else {
                text(self.i18n.tr("load-more")).size(typography::BODY).into()
            };

            let load_more = button(label)
                .on_press_maybe((!self.loading_more).then_some(Message::LoadMorePressed))
                .style(crate::ui::styles::button::primary)
                .padding([spacing::XS, spacing::XL]);

            grid = grid.push(
                container(load_more)
                    .width(Length::Fill)
                    .center_x(Length::Fill)
                    .padding(spacing::MD),
            );
        }

        scrollable(grid).height(Length::Fill).into()
    }
}

/// Downloads one artwork image and hands the bytes to Iced.
async fn fetch_artwork(http: reqwest::Client, url: String) -> Result<image::Handle, Error> {
    let response = http.get(&url).send().await.map_err(Error::from)?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        });
    }
    let bytes = response.bytes().await.map_err(Error::from)?;
    Ok(image::Handle::from_bytes(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str) -> Event {
        serde_json::from_str(&format!(r#"{{"id": "{id}", "name": "Event {id}"}}"#)).unwrap()
    }

    fn page(ids: &[&str], has_more: bool) -> EventsPage {
        EventsPage {
            events: ids.iter().map(|id| event(id)).collect(),
            has_more,
        }
    }

    fn test_app() -> App {
        App {
            i18n: I18n::default(),
            theme_mode: ThemeMode::Dark,
            http: reqwest::Client::new(),
            client: None,
            page_size: api::DEFAULT_PAGE_SIZE,
            events: Vec::new(),
            loading: false,
            loading_more: false,
            current_page: 1,
            has_more: false,
            venue_query: String::new(),
            fetch_seq: 0,
            reminded: HashSet::new(),
            player: PreviewPlayer::new(),
            playing: None,
            search: venue_search::State::default(),
            drawer: drawer::State::default(),
            selected: None,
            artwork: HashMap::new(),
            spinner_rotation: 0.0,
        }
    }

    fn ids(app: &App) -> Vec<&str> {
        app.events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn replace_fetch_resets_to_page_one_and_replaces_events() {
        let mut app = test_app();
        app.events = vec![event("old-1"), event("old-2")];
        app.current_page = 4;

        let _ = app.begin_replace("O2 Arena".to_string());
        assert!(app.loading);
        assert_eq!(app.venue_query, "O2 Arena");

        let _ = app.update(Message::EventsFetched {
            seq: app.fetch_seq,
            page: 1,
            append: false,
            result: Ok(page(&["new-1"], true)),
        });

        assert!(!app.loading);
        assert_eq!(ids(&app), vec!["new-1"]);
        assert_eq!(app.current_page, 1);
        assert!(app.has_more);
    }

    #[test]
    fn stale_replace_response_is_discarded() {
        let mut app = test_app();

        let _ = app.begin_replace("Roundhouse".to_string());
        let first_seq = app.fetch_seq;
        let _ = app.begin_replace("Printworks".to_string());

        // The slower first search resolves after the second was issued.
        let _ = app.update(Message::EventsFetched {
            seq: first_seq,
            page: 1,
            append: false,
            result: Ok(page(&["stale"], false)),
        });
        assert!(app.events.is_empty());
        assert!(app.loading, "the newer fetch still owns the loading flag");

        let _ = app.update(Message::EventsFetched {
            seq: app.fetch_seq,
            page: 1,
            append: false,
            result: Ok(page(&["fresh"], false)),
        });
        assert_eq!(ids(&app), vec!["fresh"]);
        assert!(!app.loading);
    }

    #[test]
    fn load_more_appends_in_order_and_advances_the_page() {
        let mut app = test_app();
        app.events = vec![event("a"), event("b")];
        app.has_more = true;

        let _ = app.begin_load_more();
        assert!(app.loading_more);

        let _ = app.update(Message::EventsFetched {
            seq: app.fetch_seq,
            page: 2,
            append: true,
            result: Ok(page(&["c", "d"], false)),
        });

        assert_eq!(ids(&app), vec!["a", "b", "c", "d"]);
        assert_eq!(app.current_page, 2);
        assert!(!app.has_more);
        assert!(!app.loading_more);
    }

    #[test]
    fn concurrent_load_more_is_dropped() {
        let mut app = test_app();
        app.events = vec![event("a")];
        app.has_more = true;

        let _ = app.begin_load_more();
        let seq_before = app.fetch_seq;
        let page_before = app.current_page;

        // Second click while the first append is in flight.
        let _ = app.update(Message::LoadMorePressed);
        assert!(app.loading_more);
        assert_eq!(app.fetch_seq, seq_before);
        assert_eq!(app.current_page, page_before);
        assert_eq!(ids(&app), vec!["a"]);
    }

    #[test]
    fn append_superseded_by_a_search_is_discarded() {
        let mut app = test_app();
        app.events = vec![event("a")];
        app.has_more = true;

        let _ = app.begin_load_more();
        let append_seq = app.fetch_seq;
        let _ = app.begin_replace("KOKO".to_string());

        let _ = app.update(Message::EventsFetched {
            seq: append_seq,
            page: 2,
            append: true,
            result: Ok(page(&["b"], true)),
        });

        // The old-filter page must not splice into the new search's list.
        assert_eq!(ids(&app), vec!["a"]);
        assert_eq!(app.current_page, 1);
    }

    #[test]
    fn fetch_failure_keeps_previous_events_and_clears_loading() {
        let mut app = test_app();
        app.events = vec![event("keep-me")];

        let _ = app.begin_replace("Nowhere".to_string());
        let _ = app.update(Message::EventsFetched {
            seq: app.fetch_seq,
            page: 1,
            append: false,
            result: Err(Error::Api {
                status: 503,
                status_text: "Service Unavailable".to_string(),
            }),
        });

        assert_eq!(ids(&app), vec!["keep-me"]);
        assert!(!app.loading);
        assert!(!app.loading_more);
    }

    #[test]
    fn missing_api_key_fails_without_touching_state() {
        let mut app = test_app();
        assert!(app.client.is_none());

        let _ = app.begin_replace(String::new());
        let err = Error::Config("API key not found.".to_string());
        assert_eq!(err.message_key(), "error-config");

        let _ = app.update(Message::EventsFetched {
            seq: app.fetch_seq,
            page: 1,
            append: false,
            result: Err(err),
        });
        assert!(app.events.is_empty());
        assert!(!app.loading);
    }

    #[test]
    fn double_reminder_toggle_restores_membership() {
        let mut app = test_app();
        assert!(!app.reminded.contains("ev-1"));

        let _ = app.update(Message::ReminderConfirmed {
            event_id: "ev-1".to_string(),
            accepted: true,
        });
        assert!(app.reminded.contains("ev-1"));

        let _ = app.update(Message::ReminderConfirmed {
            event_id: "ev-1".to_string(),
            accepted: true,
        });
        assert!(!app.reminded.contains("ev-1"));
    }

    #[test]
    fn declined_reminder_leaves_the_set_alone() {
        let mut app = test_app();
        let _ = app.update(Message::ReminderConfirmed {
            event_id: "ev-1".to_string(),
            accepted: false,
        });
        assert!(app.reminded.is_empty());
    }

    #[test]
    fn drawer_selection_survives_until_the_close_animation_ends() {
        let mut app = test_app();
        app.events = vec![event("ev-1")];
        let _ = app.update(Message::Card {
            event_id: "ev-1".to_string(),
            message: event_card::Message::Action(
                ui::event_actions::Message::MoreInfoPressed,
            ),
        });
        assert!(app.drawer.is_open());
        assert!(app.selected.is_some());

        let _ = app.update(Message::DrawerDismissed);
        assert!(app.drawer.is_closing());

        // Mid-animation tick: content must still be there.
        let _ = app.update(Message::Tick(Instant::now()));
        assert!(app.selected.is_some());

        let _ = app.update(Message::Tick(
            Instant::now() + drawer::CLOSE_ANIMATION + Duration::from_millis(10),
        ));
        assert!(app.selected.is_none());
        assert!(!app.drawer.is_visible());
    }

    #[test]
    fn escape_closes_an_open_drawer() {
        let mut app = test_app();
        app.events = vec![event("ev-1")];
        app.selected = Some(event("ev-1"));
        app.drawer.open();

        let _ = app.update(Message::EscapePressed);
        assert!(app.drawer.is_closing());

        // A second Escape during the animation is a no-op.
        let _ = app.update(Message::EscapePressed);
        assert!(app.drawer.is_closing());
    }

    #[test]
    fn play_without_eligible_preview_marks_nothing() {
        let mut app = test_app();
        app.events = vec![event("silent")];

        let _ = app.update(Message::Card {
            event_id: "silent".to_string(),
            message: event_card::Message::PlayPressed,
        });
        assert!(app.playing.is_none());
    }

    #[test]
    fn switching_tracks_always_unmarks_the_previous_one() {
        let mut app = test_app();
        app.events = vec![event("first"), event("second")];
        app.playing = Some("first".to_string());

        // "second" has no eligible preview, so nothing new starts, but the
        // previous track is stopped and unmarked before eligibility is known.
        let _ = app.update(Message::Card {
            event_id: "second".to_string(),
            message: event_card::Message::PlayPressed,
        });
        assert!(app.playing.is_none());
        assert!(!app.player.is_playing());
    }

    #[test]
    fn toggling_the_playing_event_stops_it() {
        let mut app = test_app();
        app.events = vec![event("first")];
        app.playing = Some("first".to_string());

        let _ = app.update(Message::Card {
            event_id: "first".to_string(),
            message: event_card::Message::PlayPressed,
        });
        assert!(app.playing.is_none());
        assert!(!app.player.is_playing());
    }

    #[test]
    fn preview_failure_clears_the_playing_marker() {
        let mut app = test_app();
        app.playing = Some("ev-1".to_string());

        let _ = app.update(Message::PreviewFetched {
            event_id: "ev-1".to_string(),
            url: "https://p.scdn.co/x".to_string(),
            result: Err(Error::Network("dns error".to_string())),
        });
        assert!(app.playing.is_none());
    }

    #[test]
    fn late_preview_for_a_stopped_track_does_not_replay() {
        let mut app = test_app();
        app.playing = None; // user already stopped

        let decoded = Arc::new(DecodedPreview {
            samples: Arc::new(vec![0.0; 16]),
            sample_rate: 44_100,
            channels: 2,
        });
        let _ = app.update(Message::PreviewFetched {
            event_id: "ev-1".to_string(),
            url: "https://p.scdn.co/x".to_string(),
            result: Ok(decoded),
        });
        assert!(app.playing.is_none());
        assert!(!app.player.is_playing());
    }

    #[test]
    fn views_render_in_all_page_states() {
        let mut app = test_app();

        app.loading = true;
        let _ = app.view();

        app.loading = false;
        let _ = app.view(); // empty state

        app.events = vec![event("a"), event("b"), event("c"), event("d")];
        app.has_more = true;
        let _ = app.view(); // grid with load-more

        app.selected = Some(event("a"));
        app.drawer.open();
        let _ = app.view(); // drawer overlay
    }
}
