// SPDX-License-Identifier: MPL-2.0
//! Preview decoding via FFmpeg.
//!
//! Previews arrive as compressed files (Spotify serves MP3). FFmpeg decodes
//! them and a software resampler converts straight to interleaved f32 at the
//! output device's native rate, so the playback callback is a plain copy.

use super::output::OutputConfig;
use super::DecodedPreview;
use crate::error::{Error, Result};
use std::path::Path;
use std::sync::{Arc, Once};

static FFMPEG_INIT: Once = Once::new();

fn init_ffmpeg() {
    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            eprintln!("FFmpeg initialization failed: {e}");
        }
    });
}

/// Decodes the whole file at `path` into a [`DecodedPreview`] matching
/// `output`. Previews are ~30 s clips, so decoding eagerly is cheap and keeps
/// replays instant.
pub fn decode_preview(path: &Path, output: OutputConfig) -> Result<DecodedPreview> {
    init_ffmpeg();

    let mut ictx = ffmpeg_next::format::input(&path)
        .map_err(|e| Error::Playback(format!("failed to open preview: {e}")))?;

    let input = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Audio)
        .ok_or_else(|| Error::Playback("no audio stream found in preview".to_string()))?;
    let audio_stream_index = input.index();

    let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| Error::Playback(format!("failed to create codec context: {e}")))?;
    let mut decoder = context_decoder
        .decoder()
        .audio()
        .map_err(|e| Error::Playback(format!("failed to create audio decoder: {e}")))?;

    // Some MP3s come without a channel layout; derive one from the count so
    // the resampler has something to work with.
    let mut input_layout = decoder.channel_layout();
    if input_layout.is_empty() {
        input_layout = ffmpeg_next::ChannelLayout::default(i32::from(decoder.channels()));
    }

    let output_layout = match output.channels {
        1 => ffmpeg_next::ChannelLayout::MONO,
        _ => ffmpeg_next::ChannelLayout::STEREO,
    };

    let mut resampler = ffmpeg_next::software::resampling::Context::get(
        decoder.format(),
        input_layout,
        decoder.rate(),
        ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
        output_layout,
        output.sample_rate,
    )
    .map_err(|e| Error::Playback(format!("failed to create resampler: {e}")))?;

    let output_channels = output_layout.channels() as u16;
    let mut samples: Vec<f32> = Vec::new();

    for (stream, packet) in ictx.packets() {
        if stream.index() != audio_stream_index {
            continue;
        }
        if let Err(e) = decoder.send_packet(&packet) {
            eprintln!("Preview packet rejected: {e}");
            continue;
        }
        drain_frames(&mut decoder, &mut resampler, output_channels, &mut samples);
    }

    // Flush the decoder so trailing frames are not lost.
    if decoder.send_eof().is_ok() {
        drain_frames(&mut decoder, &mut resampler, output_channels, &mut samples);
    }

    if samples.is_empty() {
        return Err(Error::Playback("no audio samples decoded".to_string()));
    }

    Ok(DecodedPreview {
        samples: Arc::new(samples),
        sample_rate: output.sample_rate,
        channels: output_channels,
    })
}

fn drain_frames(
    decoder: &mut ffmpeg_next::decoder::Audio,
    resampler: &mut ffmpeg_next::software::resampling::Context,
    channels: u16,
    samples: &mut Vec<f32>,
) {
    let mut decoded_frame = ffmpeg_next::frame::Audio::empty();
    while decoder.receive_frame(&mut decoded_frame).is_ok() {
        let mut resampled = ffmpeg_next::frame::Audio::empty();
        match resampler.run(&decoded_frame, &mut resampled) {
            Ok(_) => samples.extend(extract_samples(&resampled, channels)),
            Err(e) => eprintln!("Preview resampling failed: {e}"),
        }
    }
}

/// Extracts f32 samples from a resampled (packed) audio frame.
fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: u16) -> Vec<f32> {
    let data = frame.data(0);
    let sample_count = frame.samples() * channels as usize;

    let mut samples = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        let offset = i * 4;
        if offset + 4 <= data.len() {
            let bytes = [
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ];
            samples.push(f32::from_le_bytes(bytes));
        }
    }

    samples
}
