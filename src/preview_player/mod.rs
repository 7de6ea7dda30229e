// SPDX-License-Identifier: MPL-2.0
//! Single-resource audio preview playback.
//!
//! The player owns at most one live output stream at a time: starting a
//! preview always stops the previous one first, so two previews can never
//! overlap. Callers never touch the stream itself — they go through
//! [`PreviewPlayer::play`], [`PreviewPlayer::stop`] and
//! [`PreviewPlayer::is_playing`].
//!
//! The fetch/decode pipeline is separate from playback: previews are
//! downloaded once into an on-disk cache keyed by the URL's hash, decoded to
//! raw samples, and memoized in a small in-memory LRU so replays are instant.

pub mod decode;
mod output;

pub use output::OutputConfig;

use crate::config;
use crate::error::{Error, Result};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

/// Decoded previews kept in memory. Previews are ~30 s of f32 stereo
/// (~10 MB each), so keep this small.
const DECODED_CACHE_SIZE: usize = 8;

/// Interleaved f32 samples ready for the output device.
#[derive(Debug)]
pub struct DecodedPreview {
    pub samples: Arc<Vec<f32>>,
    pub sample_rate: u32,
    pub channels: u16,
}

pub struct PreviewPlayer {
    output: Option<output::OutputHandle>,
    decoded: LruCache<String, Arc<DecodedPreview>>,
    current_url: Option<String>,
}

impl PreviewPlayer {
    /// Creates the player, spawning the audio output thread. A machine
    /// without an output device still yields a working (silent) player:
    /// playback attempts are logged and dropped.
    pub fn new() -> Self {
        let output = match output::spawn() {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("Audio output unavailable: {e}");
                None
            }
        };

        Self {
            output,
            decoded: LruCache::new(NonZeroUsize::new(DECODED_CACHE_SIZE).unwrap()),
            current_url: None,
        }
    }

    #[cfg(test)]
    fn disconnected() -> Self {
        Self {
            output: None,
            decoded: LruCache::new(NonZeroUsize::new(DECODED_CACHE_SIZE).unwrap()),
            current_url: None,
        }
    }

    /// Whether an output device was available at startup. Without one there
    /// is no point marking anything as playing.
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Sample layout decode tasks must produce.
    pub fn output_config(&self) -> OutputConfig {
        self.output
            .as_ref()
            .map(|handle| handle.config())
            .unwrap_or(OutputConfig {
                sample_rate: 44_100,
                channels: 2,
            })
    }

    pub fn cached(&mut self, url: &str) -> Option<Arc<DecodedPreview>> {
        self.decoded.get(url).cloned()
    }

    pub fn insert(&mut self, url: String, preview: Arc<DecodedPreview>) {
        self.decoded.put(url, preview);
    }

    /// Stops whatever is playing, then starts `preview`. Failures inside the
    /// audio thread are logged there; they never propagate and never leave
    /// two streams alive.
    pub fn play(&mut self, url: &str, preview: Arc<DecodedPreview>) {
        self.stop();
        if let Some(output) = &self.output {
            output.send(output::OutputCommand::Play(preview));
            self.current_url = Some(url.to_string());
        } else {
            eprintln!("Dropping preview playback, no audio output: {url}");
        }
    }

    /// Halts playback and releases the stream. Safe to call when nothing is
    /// playing.
    pub fn stop(&mut self) {
        self.current_url = None;
        if let Some(output) = &self.output {
            output.send(output::OutputCommand::Stop);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.output
            .as_ref()
            .map(|handle| handle.is_playing())
            .unwrap_or(false)
    }

    /// Whether the last started preview ran to its end. Polled by the app's
    /// tick so the "playing" marker can be cleared.
    pub fn is_finished(&self) -> bool {
        self.output
            .as_ref()
            .map(|handle| handle.is_finished())
            .unwrap_or(false)
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }
}

impl Default for PreviewPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Downloads `url` into the preview cache if not already present and returns
/// the local path.
pub async fn fetch_preview(http: reqwest::Client, url: String) -> Result<PathBuf> {
    let dir = config::cache_dir()
        .ok_or_else(|| Error::Io("no cache directory available".to_string()))?
        .join("previews");
    let path = dir.join(cache_file_name(&url));

    if path.exists() {
        return Ok(path);
    }

    let response = http.get(&url).send().await.map_err(Error::from)?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
        });
    }
    let bytes = response.bytes().await.map_err(Error::from)?;

    std::fs::create_dir_all(&dir)?;
    std::fs::write(&path, &bytes)?;
    Ok(path)
}

fn cache_file_name(url: &str) -> String {
    format!("{}.mp3", blake3::hash(url.as_bytes()).to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview() -> Arc<DecodedPreview> {
        Arc::new(DecodedPreview {
            samples: Arc::new(vec![0.0; 64]),
            sample_rate: 44_100,
            channels: 2,
        })
    }

    #[test]
    fn cache_file_name_is_stable_and_url_specific() {
        let a = cache_file_name("https://p.scdn.co/mp3-preview/abc");
        let b = cache_file_name("https://p.scdn.co/mp3-preview/abc");
        let c = cache_file_name("https://p.scdn.co/mp3-preview/xyz");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.ends_with(".mp3"));
        // blake3 hex digest is 64 chars
        assert_eq!(a.len(), 64 + 4);
    }

    #[test]
    fn decoded_cache_round_trips() {
        let mut player = PreviewPlayer::disconnected();
        assert!(player.cached("url-1").is_none());

        player.insert("url-1".to_string(), preview());
        assert!(player.cached("url-1").is_some());
    }

    #[test]
    fn stop_is_idempotent_without_output() {
        let mut player = PreviewPlayer::disconnected();
        player.stop();
        player.stop();
        assert!(!player.is_playing());
        assert!(player.current_url().is_none());
    }

    #[test]
    fn play_without_output_marks_nothing() {
        let mut player = PreviewPlayer::disconnected();
        player.play("url-1", preview());
        assert!(!player.is_playing());
        assert!(player.current_url().is_none());
        assert!(!player.has_output());
    }
}
