//! Sound effects and music. Without the `audio` feature, or without a
//! working output device, everything here is silent.

use std::path::Path;

use crate::assets::AssetError;

pub struct Sfx {
    player: Option<backend::Player>,
}

impl Sfx {
    pub fn muted() -> Self {
        Self { player: None }
    }

    /// Opens the default output and loads the collision effect from `dir`.
    /// Music is started too when `music` is set.
    pub fn load(dir: &Path, music: bool) -> Result<Self, AssetError> {
        let player = backend::Player::open(dir, music)?;
        Ok(Self {
            player: Some(player),
        })
    }

    pub fn load_or_mute(dir: &Path, music: bool) -> Self {
        match Self::load(dir, music) {
            Ok(sfx) => sfx,
            Err(err) => {
                tracing::warn!(error = %err, "sound disabled");
                Self::muted()
            }
        }
    }

    pub fn is_muted(&self) -> bool {
        self.player.is_none()
    }

    pub fn play_collision(&self) {
        if let Some(player) = &self.player {
            player.play_collision();
        }
    }
}

#[cfg(feature = "audio")]
mod backend {
    use std::io::Cursor;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use crate::assets::AssetError;

    const COLLISION_SOUND_FILE: &str = "collision.mp3";
    const MUSIC_FILE: &str = "bg.mp3";
    const MUSIC_VOLUME: f32 = 0.5;

    /// Encoded sound kept in memory so every play decodes a fresh copy.
    struct Clip {
        path: PathBuf,
        bytes: Arc<[u8]>,
    }

    impl Clip {
        fn read(path: PathBuf) -> Result<Self, AssetError> {
            let bytes = std::fs::read(&path).map_err(|source| AssetError::SoundIo {
                path: path.clone(),
                source,
            })?;
            let clip = Self {
                path,
                bytes: bytes.into(),
            };
            clip.decoder()?;
            Ok(clip)
        }

        fn decoder(&self) -> Result<Decoder<Cursor<Arc<[u8]>>>, AssetError> {
            Decoder::new(Cursor::new(Arc::clone(&self.bytes))).map_err(|source| {
                AssetError::SoundDecode {
                    path: self.path.clone(),
                    source,
                }
            })
        }
    }

    pub struct Player {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        collision: Option<Clip>,
        _music: Option<Sink>,
    }

    impl Player {
        pub fn open(dir: &Path, music: bool) -> Result<Self, AssetError> {
            let collision = Clip::read(dir.join(COLLISION_SOUND_FILE));
            let (stream, handle) = OutputStream::try_default()?;
            let music = if music {
                start_music(&handle, dir.join(MUSIC_FILE))
            } else {
                None
            };
            let collision = keep_collision(collision, music.is_some())?;
            Ok(Self {
                _stream: stream,
                handle,
                collision,
                _music: music,
            })
        }

        pub fn play_collision(&self) {
            let Some(Ok(source)) = self.collision.as_ref().map(Clip::decoder) else {
                return;
            };
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.append(source);
                sink.detach();
            }
        }
    }

    /// A broken collision clip only silences the hits while the music plays.
    /// With nothing audible at all the player is not worth keeping.
    fn keep_collision(
        clip: Result<Clip, AssetError>,
        music_playing: bool,
    ) -> Result<Option<Clip>, AssetError> {
        match clip {
            Ok(clip) => Ok(Some(clip)),
            Err(err) if music_playing => {
                tracing::warn!(error = %err, "collision sound disabled");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn start_music(handle: &OutputStreamHandle, path: PathBuf) -> Option<Sink> {
        let source = match Clip::read(path).and_then(|clip| clip.decoder()) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(error = %err, "music disabled");
                return None;
            }
        };
        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(err) => {
                tracing::warn!(error = %err, "music disabled");
                return None;
            }
        };
        sink.set_volume(MUSIC_VOLUME);
        sink.append(source.repeat_infinite());
        Some(sink)
    }

}

#[cfg(not(feature = "audio"))]
mod backend {
    use std::path::Path;

    use crate::assets::AssetError;

    /// Never constructed: opening always fails.
    pub enum Player {}

    impl Player {
        pub fn open(_dir: &Path, _music: bool) -> Result<Self, AssetError> {
            Err(AssetError::AudioDisabled)
        }

        pub fn play_collision(&self) {
            match *self {}
        }
    }
}
