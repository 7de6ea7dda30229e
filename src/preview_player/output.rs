// SPDX-License-Identifier: MPL-2.0
//! Audio output thread.
//!
//! `cpal::Stream` is not `Send`, so the stream lives on a dedicated thread
//! that owns it for its whole life. The application side holds an
//! [`OutputHandle`]: a command channel plus shared atomics describing
//! playback state. One stream exists at a time; a `Play` command drops the
//! previous stream before building the next one.

use super::DecodedPreview;
use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

/// Sample layout the decoder must produce: interleaved f32 at the output
/// device's native rate and channel count.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub sample_rate: u32,
    pub channels: u16,
}

pub(crate) enum OutputCommand {
    Play(Arc<DecodedPreview>),
    Stop,
    Shutdown,
}

/// Shared state between the audio thread and the application.
#[derive(Debug, Default)]
struct SharedState {
    /// A stream exists and has not run out of samples.
    playing: AtomicBool,
    /// The last stream ran to the end of its samples.
    finished: AtomicBool,
}

impl SharedState {
    fn reset(&self) {
        self.playing.store(false, Ordering::Release);
        self.finished.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
pub struct OutputHandle {
    tx: Sender<OutputCommand>,
    shared: Arc<SharedState>,
    config: OutputConfig,
}

impl OutputHandle {
    pub fn config(&self) -> OutputConfig {
        self.config
    }

    pub fn is_playing(&self) -> bool {
        self.shared.playing.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.shared.finished.load(Ordering::Acquire)
    }

    pub(crate) fn send(&self, command: OutputCommand) {
        // A closed channel means the audio thread died; playback errors are
        // logged there, nothing to surface here.
        let _ = self.tx.send(command);
    }
}

impl Drop for OutputHandle {
    fn drop(&mut self) {
        let _ = self.tx.send(OutputCommand::Shutdown);
    }
}

/// Spawns the audio thread and returns its handle, or an error when no
/// output device is available at all.
pub fn spawn() -> Result<OutputHandle> {
    let device = cpal::default_host()
        .default_output_device()
        .ok_or_else(|| Error::Playback("no audio output device available".to_string()))?;

    let default_config = device
        .default_output_config()
        .map_err(|e| Error::Playback(format!("no usable output config: {e}")))?;
    let config = OutputConfig {
        sample_rate: default_config.sample_rate().0,
        channels: default_config.channels(),
    };

    let (tx, rx) = std::sync::mpsc::channel();
    let shared = Arc::new(SharedState::default());
    let thread_shared = Arc::clone(&shared);

    std::thread::Builder::new()
        .name("preview-audio".to_string())
        .spawn(move || run(rx, thread_shared, config))
        .map_err(|e| Error::Playback(format!("failed to spawn audio thread: {e}")))?;

    Ok(OutputHandle { tx, shared, config })
}

fn run(rx: Receiver<OutputCommand>, shared: Arc<SharedState>, config: OutputConfig) {
    // Held here so the stream stays alive between commands; dropping it is
    // how playback stops.
    let mut active: Option<cpal::Stream> = None;

    loop {
        match rx.recv() {
            Ok(OutputCommand::Play(preview)) => {
                drop(active.take());
                shared.reset();
                match build_stream(&preview, &shared, config) {
                    Ok(stream) => {
                        if let Err(e) = stream.play() {
                            eprintln!("Failed to start preview playback: {e}");
                        } else {
                            shared.playing.store(true, Ordering::Release);
                            active = Some(stream);
                        }
                    }
                    Err(e) => eprintln!("Failed to build preview stream: {e}"),
                }
            }
            Ok(OutputCommand::Stop) => {
                drop(active.take());
                shared.reset();
            }
            Ok(OutputCommand::Shutdown) | Err(_) => break,
        }
    }
}

fn build_stream(
    preview: &Arc<DecodedPreview>,
    shared: &Arc<SharedState>,
    config: OutputConfig,
) -> Result<cpal::Stream> {
    // The device is re-queried per play so a replugged headset is picked up.
    let device = cpal::default_host()
        .default_output_device()
        .ok_or_else(|| Error::Playback("no audio output device available".to_string()))?;

    let stream_config = cpal::StreamConfig {
        channels: config.channels,
        sample_rate: cpal::SampleRate(config.sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let samples = Arc::clone(&preview.samples);
    let callback_shared = Arc::clone(shared);
    let mut cursor = 0usize;

    let stream = device
        .build_output_stream(
            &stream_config,
            move |data: &mut [f32], _info| {
                let remaining = samples.len().saturating_sub(cursor);
                let to_copy = remaining.min(data.len());
                data[..to_copy].copy_from_slice(&samples[cursor..cursor + to_copy]);
                data[to_copy..].fill(0.0);
                cursor += to_copy;

                if to_copy < data.len() {
                    callback_shared.finished.store(true, Ordering::Release);
                    callback_shared.playing.store(false, Ordering::Release);
                }
            },
            |err| eprintln!("Audio stream error: {err}"),
            None,
        )
        .map_err(|e| Error::Playback(format!("failed to build output stream: {e}")))?;

    Ok(stream)
}
