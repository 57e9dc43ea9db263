use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("couldn't open sound file: {0}")]
    Io(#[from] io::Error),
    #[error("couldn't decode sound file: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("couldn't play sound: {0}")]
    Play(#[from] rodio::PlayError),
}

/// plays the alarm sound, falling back to the terminal bell when there is no
/// usable audio output or the sound file is missing/broken
///
/// the playback backend is picked once at startup: if no output stream can be
/// opened every ring is a beep
pub struct Notifier {
    // the stream has to stay alive as long as the handle does
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        match OutputStream::try_default() {
            Ok(output) => Self {
                output: Some(output),
            },
            Err(e) => {
                log::warn!("no audio output available, using the terminal bell instead: {e}");
                Self::disabled()
            }
        }
    }

    /// a notifier that only ever beeps, also used when audio setup fails
    #[must_use]
    pub const fn disabled() -> Self {
        Self { output: None }
    }

    /// play the sound once, blocking until it finishes
    /// missing file or playback failure turns into a beep, never an error
    pub fn play_sound(&self, sound: &Path) {
        if !sound.exists() {
            log::warn!("sound file {} not found, beeping instead", sound.display());
            Self::beep();
            return;
        }
        if let Some((_stream, handle)) = &self.output {
            match Self::play_file(handle, sound) {
                Ok(()) => return,
                Err(e) => log::warn!("couldn't play {}: {e}", sound.display()),
            }
        }
        Self::beep();
    }

    /// ring until cancelled (repeat mode) or once (one-shot mode)
    pub fn ring(&self, sound: &Path, repeat: bool, interval: Duration, stop: &AtomicBool) {
        loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            self.play_sound(sound);
            if !repeat || stop.load(Ordering::Relaxed) {
                break;
            }
            thread::sleep(interval);
        }
    }

    fn play_file(handle: &OutputStreamHandle, sound: &Path) -> Result<(), NotifyError> {
        let sink = Sink::try_new(handle)?;
        let source = Decoder::new(BufReader::new(File::open(sound)?))?;
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }

    fn beep() {
        print!("\x07");
        let _ = io::stdout().flush();
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
