//! The process-wide asset bundle: loaded once at startup and shared
//! read-only by every session.

use color_eyre::{Result, eyre::WrapErr};
use image::Rgb;
use rodio::Decoder;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use crate::animation::{Animation, load_animation, placeholder_animation};

const SOUND_DIR: &str = "sounds";
const MISSILE_SOUND: &str = "missile.mp3";
const EXPLOSION_SOUND: &str = "explosion.wav";

/// Where an entity kind's frames live and what to draw when they don't
#[derive(Debug, Clone, Copy)]
pub struct AnimationSpec {
    pub dir: &'static str,
    pub placeholder_size: (u32, u32),
    pub base_color: Rgb<u8>,
    pub scale: f32,
    pub frame_count: usize,
}

pub const PLAYER_SPEC: AnimationSpec = AnimationSpec {
    dir: "player",
    placeholder_size: (50, 30),
    base_color: Rgb([0, 0, 255]),
    scale: 0.7,
    frame_count: 3,
};

pub const ENEMY_SPEC: AnimationSpec = AnimationSpec {
    dir: "enemies",
    placeholder_size: (50, 30),
    base_color: Rgb([255, 0, 0]),
    scale: 0.7,
    frame_count: 3,
};

pub const MISSILE_SPEC: AnimationSpec = AnimationSpec {
    dir: "missiles",
    placeholder_size: (20, 10),
    base_color: Rgb([255, 255, 0]),
    scale: 0.5,
    frame_count: 3,
};

pub const EXPLOSION_SPEC: AnimationSpec = AnimationSpec {
    dir: "explosions",
    placeholder_size: (60, 60),
    base_color: Rgb([255, 165, 0]),
    scale: 1.0,
    frame_count: 8,
};

pub const BACKGROUND_SPEC: AnimationSpec = AnimationSpec {
    dir: "background",
    placeholder_size: (800, 600),
    base_color: Rgb([135, 206, 235]),
    scale: 1.0,
    frame_count: 1,
};

impl AnimationSpec {
    fn load(&self, root: &Path) -> Animation {
        load_animation(
            &root.join(self.dir),
            self.placeholder_size,
            self.base_color,
            self.scale,
            self.frame_count,
        )
    }

    fn placeholder(&self) -> Animation {
        placeholder_animation(self.placeholder_size, self.base_color, self.frame_count)
    }
}

/// Sound effects the game raises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Fire,
    Explosion,
}

/// A playable clip: the encoded file contents, or silence when the file
/// could not be loaded
#[derive(Debug, Clone)]
pub enum SoundClip {
    Encoded(Arc<[u8]>),
    Silent,
}

impl SoundClip {
    /// Reads and test-decodes `path`, substituting silence on any failure
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(clip) => clip,
            Err(err) => {
                log::warn!("Failed to load {}, using silent sound: {:#}", path.display(), err);
                SoundClip::Silent
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        let bytes: Arc<[u8]> = fs::read(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?
            .into();
        Decoder::new(Cursor::new(Arc::clone(&bytes)))
            .wrap_err_with(|| format!("failed to decode {}", path.display()))?;
        Ok(SoundClip::Encoded(bytes))
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, SoundClip::Silent)
    }
}

#[derive(Debug, Clone)]
pub struct SoundBank {
    pub fire: SoundClip,
    pub explosion: SoundClip,
}

impl SoundBank {
    pub fn load(root: &Path) -> Self {
        let dir = root.join(SOUND_DIR);
        if !dir.exists() {
            if let Err(err) = fs::create_dir_all(&dir) {
                log::warn!("Failed to create {}: {}", dir.display(), err);
            }
        }

        Self {
            fire: SoundClip::load(&dir.join(MISSILE_SOUND)),
            explosion: SoundClip::load(&dir.join(EXPLOSION_SOUND)),
        }
    }

    pub fn silent() -> Self {
        Self {
            fire: SoundClip::Silent,
            explosion: SoundClip::Silent,
        }
    }

    pub fn clip(&self, cue: SoundCue) -> &SoundClip {
        match cue {
            SoundCue::Fire => &self.fire,
            SoundCue::Explosion => &self.explosion,
        }
    }
}

/// All art and sound, immutable after loading
#[derive(Debug, Clone)]
pub struct Assets {
    pub player: Rc<Animation>,
    pub enemy: Rc<Animation>,
    pub missile: Rc<Animation>,
    pub explosion: Rc<Animation>,
    pub background: Rc<Animation>,
    pub sounds: SoundBank,
}

impl Assets {
    /// Loads every animation and sound below `root`. Never fails: anything
    /// missing is replaced by a placeholder.
    pub fn load(root: &Path) -> Self {
        Self {
            player: Rc::new(PLAYER_SPEC.load(root)),
            enemy: Rc::new(ENEMY_SPEC.load(root)),
            missile: Rc::new(MISSILE_SPEC.load(root)),
            explosion: Rc::new(EXPLOSION_SPEC.load(root)),
            background: Rc::new(BACKGROUND_SPEC.load(root)),
            sounds: SoundBank::load(root),
        }
    }

    /// Placeholder art and silent sounds without touching the filesystem
    pub fn placeholder() -> Self {
        Self {
            player: Rc::new(PLAYER_SPEC.placeholder()),
            enemy: Rc::new(ENEMY_SPEC.placeholder()),
            missile: Rc::new(MISSILE_SPEC.placeholder()),
            explosion: Rc::new(EXPLOSION_SPEC.placeholder()),
            background: Rc::new(BACKGROUND_SPEC.placeholder()),
            sounds: SoundBank::silent(),
        }
    }
}
