// Copyright (c) 2026 rezky_nightky

//! Optional sound. Cues are handed to a dedicated audio thread and never
//! waited on; every failure is logged and otherwise ignored.

use std::sync::mpsc::{SyncSender, TrySendError};

use crate::config::AudioConfig;
use crate::error::AudioError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Thunder,
    Rain,
}

impl Cue {
    #[cfg_attr(not(feature = "audio"), allow(dead_code))]
    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Thunder => "thunder.wav",
            Cue::Rain => "rain.wav",
        }
    }
}

#[cfg_attr(not(feature = "audio"), allow(dead_code))]
const SILENCE_DB: f32 = -60.0;

/// Maps a 0..=100 volume to a gain in decibels.
#[cfg_attr(not(feature = "audio"), allow(dead_code))]
pub fn volume_to_db(volume: u8) -> f32 {
    if volume == 0 {
        return SILENCE_DB;
    }
    (20.0 * (volume.min(100) as f32 / 100.0).log10()).max(SILENCE_DB)
}

pub struct Audio {
    tx: Option<SyncSender<Cue>>,
}

impl Audio {
    pub fn new(cfg: &AudioConfig) -> Self {
        if cfg.muted {
            tracing::debug!("audio muted");
            return Self::disabled();
        }
        match backend::start(cfg) {
            Ok(tx) => {
                tracing::info!(dir = %cfg.sound_dir.display(), volume = cfg.volume, "audio enabled");
                Self { tx: Some(tx) }
            }
            Err(AudioError::Unsupported) => {
                tracing::debug!("built without audio support");
                Self::disabled()
            }
            Err(e) => {
                tracing::warn!(error = %e, "audio disabled");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Fire and forget. A busy audio thread just loses the cue.
    pub fn play(&self, cue: Cue) {
        let Some(tx) = &self.tx else {
            return;
        };
        match tx.try_send(cue) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => tracing::trace!(?cue, "audio busy, cue dropped"),
            Err(TrySendError::Disconnected(_)) => tracing::trace!(?cue, "audio thread gone"),
        }
    }
}

#[cfg(feature = "audio")]
mod backend {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
    use std::thread;

    use kira::sound::static_sound::StaticSoundData;
    use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend};

    use super::{volume_to_db, Cue};
    use crate::config::AudioConfig;
    use crate::error::AudioError;

    pub fn start(cfg: &AudioConfig) -> Result<SyncSender<Cue>, AudioError> {
        let (tx, rx) = sync_channel(8);
        let dir = cfg.sound_dir.clone();
        let gain = volume_to_db(cfg.volume);
        thread::Builder::new()
            .name("skyfall-audio".into())
            .spawn(move || run(rx, dir, gain))?;
        Ok(tx)
    }

    fn run(rx: Receiver<Cue>, dir: PathBuf, gain: f32) {
        let mut manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
        {
            Ok(m) => m,
            Err(e) => {
                let err = AudioError::Device(e.to_string());
                tracing::warn!(error = %err, "audio disabled");
                return;
            }
        };

        // a failed load is remembered so a missing file is reported once
        let mut sounds: HashMap<Cue, Option<StaticSoundData>> = HashMap::new();
        for cue in rx {
            let data = sounds
                .entry(cue)
                .or_insert_with(|| match load(&dir, cue, gain) {
                    Ok(d) => Some(d),
                    Err(e) => {
                        tracing::warn!(error = %e, "sound unavailable");
                        None
                    }
                })
                .clone();
            let Some(data) = data else {
                continue;
            };
            if let Err(e) = manager.play(data) {
                tracing::warn!(?cue, error = ?e, "playback failed");
            }
        }
    }

    fn load(dir: &Path, cue: Cue, gain: f32) -> Result<StaticSoundData, AudioError> {
        let path = dir.join(cue.file_name());
        match StaticSoundData::from_file(&path) {
            Ok(data) => Ok(data.volume(Decibels(gain))),
            Err(e) => Err(AudioError::Asset {
                path,
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(not(feature = "audio"))]
mod backend {
    use std::sync::mpsc::SyncSender;

    use super::Cue;
    use crate::config::AudioConfig;
    use crate::error::AudioError;

    pub fn start(_cfg: &AudioConfig) -> Result<SyncSender<Cue>, AudioError> {
        Err(AudioError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_maps_to_decibels() {
        assert_eq!(volume_to_db(100), 0.0);
        assert_eq!(volume_to_db(0), SILENCE_DB);
        assert!((volume_to_db(50) + 6.02).abs() < 0.01);
        assert_eq!(volume_to_db(250), 0.0);
    }

    #[test]
    fn muted_audio_is_disabled_and_silent() {
        let cfg = AudioConfig {
            muted: true,
            ..AudioConfig::default()
        };
        let audio = Audio::new(&cfg);
        assert!(!audio.is_enabled());
        audio.play(Cue::Thunder);
    }

    #[cfg(not(feature = "audio"))]
    #[test]
    fn without_backend_audio_degrades_to_silence() {
        let audio = Audio::new(&AudioConfig::default());
        assert!(!audio.is_enabled());
    }

    #[test]
    fn play_survives_a_full_queue() {
        let (tx, rx) = std::sync::mpsc::sync_channel(1);
        let audio = Audio { tx: Some(tx) };
        audio.play(Cue::Rain);
        audio.play(Cue::Thunder);
        assert_eq!(rx.try_recv(), Ok(Cue::Rain));
        assert!(rx.try_recv().is_err());
    }
}
