// SPDX-License-Identifier: MPL-2.0
use gigscope::config::{self, Config};
use gigscope::currency::{cheapest_price, format_price};
use gigscope::domain::Event;
use gigscope::error::classify_message;
use gigscope::i18n::I18n;
use gigscope::ui::theming::ThemeMode;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let initial_config = Config {
        api_key: None,
        language: Some("en-US".to_string()),
        page_size: None,
        theme_mode: ThemeMode::System,
    };
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    // 2. Change config to fr
    let french_config = Config {
        api_key: None,
        language: Some("fr".to_string()),
        page_size: None,
        theme_mode: ThemeMode::System,
    };
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");

    let loaded_french_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, None, &loaded_french_config);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_error_messages_resolve_for_every_category() {
    let i18n = I18n::new(Some("en-US".to_string()), None, &Config::default());

    for raw in [
        "Config Error: API key not found",
        "Network error: error trying to connect",
        "API error: 401 Unauthorized",
        "API error: 403 Forbidden",
        "API error: 404 Not Found",
        "API error: 500 Internal Server Error",
        "Network error: operation timed out",
        "completely novel failure",
    ] {
        let key = classify_message(raw);
        let message = i18n.tr(key);
        assert!(
            !message.starts_with("MISSING:"),
            "no translation for {key} (from {raw:?})"
        );
        assert!(!message.is_empty());
    }
}

#[test]
fn test_price_formatting_matches_card_display() {
    assert_eq!(format_price(Some(2500), Some("GBP")), "£25.00");
    assert_eq!(format_price(None, None), "£0.00");
    assert_eq!(format_price(Some(2500), Some("XYZ")), "XYZ25.00");
}

#[test]
fn test_cheapest_price_over_api_shaped_payload() {
    let event: Event = serde_json::from_str(
        r#"{
            "id": "ev-1",
            "name": "Test Event",
            "currency": "GBP",
            "ticket_types": [
                {"id": 1, "name": "GA", "price": {"face_value": 2000, "fees": 500, "total": 2500}, "sold_out": false},
                {"id": 2, "name": "Early Bird", "price": {"total": 1800}, "sold_out": true},
                {"id": 3, "name": "Unpriced"}
            ]
        }"#,
    )
    .expect("event payload should deserialize");

    assert_eq!(cheapest_price(&event.ticket_types), Some(1800));
    assert_eq!(event.cheapest_price(), Some(1800));
}
