use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use image::{
    Rgb, Rgba, RgbaImage,
    imageops::{self, FilterType},
};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Slack for float drift when accumulating fractional frame rates
const FRAME_EPSILON: f32 = 1e-4;

/// Per-channel increments applied to each successive placeholder frame
const PLACEHOLDER_STEP: [usize; 3] = [20, 10, 30];

/// An ordered, non-empty sequence of equally sized frames
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<RgbaImage>,
}

impl Animation {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`, wrapping around the sequence
    pub fn frame(&self, index: usize) -> &RgbaImage {
        &self.frames[index % self.frames.len()]
    }

    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    /// Size of every frame in pixels
    pub fn size(&self) -> (u32, u32) {
        self.frames[0].dimensions()
    }

    /// Copy of this animation with every frame resized to `width` x `height`
    pub fn stretched(&self, width: u32, height: u32) -> Self {
        let frames = self
            .frames
            .iter()
            .map(|frame| {
                if frame.dimensions() == (width, height) {
                    frame.clone()
                } else {
                    imageops::resize(frame, width.max(1), height.max(1), FilterType::Triangle)
                }
            })
            .collect();
        Self { frames }
    }
}

/// Loads up to `frame_count` images from `dir`, falling back to generated
/// placeholder frames when the directory is missing, empty, or unreadable.
///
/// The result always holds exactly `frame_count` frames (at least one), all
/// the same size. Loaded frames are scaled by `scale`; placeholders are not.
pub fn load_animation(
    dir: &Path,
    placeholder_size: (u32, u32),
    base_color: Rgb<u8>,
    scale: f32,
    frame_count: usize,
) -> Animation {
    let frame_count = frame_count.max(1);

    match load_frames(dir, scale, frame_count) {
        Ok(frames) => {
            log::info!("Loaded {} frames from {}", frames.len(), dir.display());
            Animation { frames }
        }
        Err(err) => {
            log::warn!(
                "Using placeholder frames for {}: {:#}",
                dir.display(),
                err
            );
            placeholder_animation(placeholder_size, base_color, frame_count)
        }
    }
}

/// Solid-color frames, each one a step lighter than the last
pub fn placeholder_animation(size: (u32, u32), base_color: Rgb<u8>, frame_count: usize) -> Animation {
    let (width, height) = (size.0.max(1), size.1.max(1));
    let frames = (0..frame_count.max(1))
        .map(|index| RgbaImage::from_pixel(width, height, placeholder_color(base_color, index)))
        .collect();

    Animation { frames }
}

/// Color of placeholder frame `index`: each channel brightened by its step
/// times the index, saturating at 255
pub fn placeholder_color(base_color: Rgb<u8>, index: usize) -> Rgba<u8> {
    let channel = |c: usize| {
        let lifted = (base_color[c] as usize).saturating_add(index.saturating_mul(PLACEHOLDER_STEP[c]));
        lifted.min(u8::MAX as usize) as u8
    };
    Rgba([channel(0), channel(1), channel(2), u8::MAX])
}

fn load_frames(dir: &Path, scale: f32, frame_count: usize) -> Result<Vec<RgbaImage>> {
    if !dir.is_dir() {
        return Err(eyre!("directory does not exist"));
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .wrap_err_with(|| format!("failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.is_file() && is_image_file(path))
        .collect();
    paths.sort();
    paths.truncate(frame_count);

    if paths.is_empty() {
        return Err(eyre!("no image files found"));
    }

    let mut frames = Vec::with_capacity(frame_count);
    for path in &paths {
        let frame = image::open(path)
            .wrap_err_with(|| format!("failed to decode {}", path.display()))?
            .to_rgba8();
        frames.push(scale_frame(frame, scale));
    }

    // Normalize to the first frame's size
    let (width, height) = frames[0].dimensions();
    for frame in frames.iter_mut().skip(1) {
        if frame.dimensions() != (width, height) {
            *frame = imageops::resize(frame, width, height, FilterType::Triangle);
        }
    }

    // Repeat what we have until the sequence is full
    let loaded = frames.len();
    for index in loaded..frame_count {
        let repeat = frames[index % loaded].clone();
        frames.push(repeat);
    }

    Ok(frames)
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn scale_frame(frame: RgbaImage, scale: f32) -> RgbaImage {
    if (scale - 1.0).abs() <= f32::EPSILON {
        return frame;
    }
    let (width, height) = frame.dimensions();
    let scaled_width = ((width as f32 * scale) as u32).max(1);
    let scaled_height = ((height as f32 * scale) as u32).max(1);
    imageops::resize(&frame, scaled_width, scaled_height, FilterType::Triangle)
}

/// Steps through a shared animation at a fixed number of frames per tick
#[derive(Debug, Clone)]
pub struct Animator {
    animation: Rc<Animation>,
    current: usize,
    /// Fractional frames accumulated since the last advance
    progress: f32,
    rate: f32,
}

impl Animator {
    pub fn new(animation: Rc<Animation>, rate: f32) -> Self {
        Self {
            animation,
            current: 0,
            progress: 0.0,
            rate,
        }
    }

    /// Accumulates one tick of progress, advancing (and wrapping) the
    /// current frame for every whole frame accumulated
    pub fn advance(&mut self) {
        self.progress += self.rate;
        while self.progress >= 1.0 - FRAME_EPSILON {
            self.progress -= 1.0;
            self.current = (self.current + 1) % self.animation.len();
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn frame(&self) -> &RgbaImage {
        self.animation.frame(self.current)
    }

    pub fn frame_count(&self) -> usize {
        self.animation.len()
    }

    /// Frame size as world units
    pub fn size(&self) -> (f32, f32) {
        let (width, height) = self.animation.size();
        (width as f32, height as f32)
    }
}
