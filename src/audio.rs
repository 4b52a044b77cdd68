use color_eyre::{Result, eyre::WrapErr};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};
use std::io::Cursor;
use std::sync::Arc;

use crate::assets::{SoundBank, SoundClip, SoundCue};

const SILENT_SAMPLE_RATE: u32 = 44_100;
const SILENT_SAMPLES: usize = 100;

/// Audio manager for playing sound effects
pub struct AudioManager {
    /// Output device; `None` when no device could be opened
    output: Option<(OutputStream, OutputStreamHandle)>,
    sounds: SoundBank,
    volume: f32,
}

impl AudioManager {
    /// Opens the default output device
    pub fn new(sounds: SoundBank) -> Result<Self> {
        let (stream, stream_handle) =
            OutputStream::try_default().wrap_err("failed to open audio output")?;

        Ok(Self {
            output: Some((stream, stream_handle)),
            sounds,
            volume: 0.3,
        })
    }

    /// An audio manager that plays nothing
    pub fn muted(sounds: SoundBank) -> Self {
        Self {
            output: None,
            sounds,
            volume: 0.0,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.output.is_none()
    }

    /// Starts `cue` and returns immediately. Overlapping plays are fine.
    pub fn play(&self, cue: SoundCue) {
        let Some((_, stream_handle)) = &self.output else {
            return;
        };

        // Ignore errors for sound playback - don't want to crash the game
        let sink = match Sink::try_new(stream_handle) {
            Ok(sink) => sink,
            Err(err) => {
                log::debug!("Could not create sink for {:?}: {}", cue, err);
                return;
            }
        };
        sink.set_volume(self.volume);

        match self.sounds.clip(cue) {
            SoundClip::Encoded(bytes) => match Decoder::new(Cursor::new(Arc::clone(bytes))) {
                Ok(source) => sink.append(source),
                Err(err) => {
                    log::debug!("Could not decode {:?}: {}", cue, err);
                    return;
                }
            },
            SoundClip::Silent => sink.append(SamplesBuffer::new(
                1,
                SILENT_SAMPLE_RATE,
                vec![0i16; SILENT_SAMPLES],
            )),
        }
        sink.detach();
    }

    pub fn play_all(&self, cues: &[SoundCue]) {
        for &cue in cues {
            self.play(cue);
        }
    }
}
