// Audio cues via rodio. Clips are read and validated at startup and decoded
// again from memory each time they play; one sink per cue so a cue can be
// queried and stopped independently.

use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use super::assets::{self, AssetError};
use crate::game::Cue;

pub struct AudioBank {
    // The stream must outlive every sink created from its handle.
    output: Option<(OutputStream, OutputStreamHandle)>,
    clips: HashMap<Cue, Arc<[u8]>>,
    sinks: HashMap<Cue, Sink>,
    // Cues that already warned about a playback failure.
    failed: HashSet<Cue>,
}

impl AudioBank {
    /// No device, no clips. Every play is a no-op.
    pub fn silent() -> Self {
        Self {
            output: None,
            clips: HashMap::new(),
            sinks: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Load every cue from `dir`. Missing or undecodable files are errors;
    /// a missing output device only downgrades to silence.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        let mut clips = HashMap::new();
        for cue in Cue::ALL {
            let path = dir.join(cue.file_name());
            let bytes: Arc<[u8]> = assets::read_bytes(&path)?.into();
            Decoder::new(Cursor::new(bytes.clone())).map_err(|source| AssetError::Audio {
                path: path.clone(),
                source,
            })?;
            clips.insert(cue, bytes);
        }

        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(e) => {
                log::warn!("no audio output device, running silent: {e}");
                None
            }
        };

        Ok(Self {
            output,
            clips,
            sinks: HashMap::new(),
            failed: HashSet::new(),
        })
    }

    /// Start `cue` from the beginning, cutting off any earlier instance.
    pub fn play(&mut self, cue: Cue) {
        let Some(clip) = self.clips.get(&cue).cloned() else {
            return;
        };
        let Some((_, handle)) = &self.output else {
            return;
        };
        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(e) => {
                self.playback_failed(cue, &format!("could not open sink: {e}"));
                return;
            }
        };
        match Decoder::new(Cursor::new(clip)) {
            Ok(source) => sink.append(source),
            Err(e) => {
                self.playback_failed(cue, &format!("could not decode: {e}"));
                return;
            }
        }
        if let Some(previous) = self.sinks.insert(cue, sink) {
            previous.stop();
        }
    }

    /// Footsteps retry every frame, so only the first failure per cue is a
    /// warning. Returns true when it warned.
    fn playback_failed(&mut self, cue: Cue, reason: &str) -> bool {
        if self.failed.insert(cue) {
            log::warn!("{cue:?}: {reason}");
            true
        } else {
            log::debug!("{cue:?}: {reason}");
            false
        }
    }

    pub fn stop(&mut self, cue: Cue) {
        if let Some(sink) = self.sinks.remove(&cue) {
            sink.stop();
        }
    }

    pub fn is_playing(&self, cue: Cue) -> bool {
        self.sinks.get(&cue).is_some_and(|sink| !sink.empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_bank_never_plays() {
        let mut audio = AudioBank::silent();
        audio.play(Cue::Footstep);
        assert!(!audio.is_playing(Cue::Footstep));
        audio.stop(Cue::Footstep);
    }

    #[test]
    fn playback_failure_warns_once_per_cue() {
        let mut audio = AudioBank::silent();
        assert!(audio.playback_failed(Cue::Footstep, "no sink"));
        assert!(!audio.playback_failed(Cue::Footstep, "no sink"));
        assert!(audio.playback_failed(Cue::Jumpscare, "no sink"));
    }

    #[test]
    fn missing_clip_fails_load() {
        let err = AudioBank::load(Path::new("no/such/assets")).err().unwrap();
        assert!(matches!(err, AssetError::Missing { .. }));
        assert!(err.to_string().contains("scare_sound.mp3"));
    }
}
