use std::collections::HashMap;
use std::path::Path;

use glam::IVec2;
use serde::Deserialize;

use crate::error::{GameError, Result};
use crate::geometry::{Direction, Rect};

// ── Sprite ───────────────────────────────────────────────────────────────────

/// Frame metadata for one named sprite strip.
///
/// Frames sit side by side in the source image with a 1-pixel gutter
/// between them. Pixel data itself lives with the renderer; the simulation
/// only needs sizes, timing and attachment points.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub frame_width: i32,
    pub frame_height: i32,
    /// Number of frames in the strip.
    pub frame_len: i32,
    /// How many simulation frames each sprite frame is shown for.
    pub frame_dur: i32,
    /// Attachment points ("handles"), one per frame, relative to the frame's
    /// top-left corner. Weapons hang off these.
    pub handles: Vec<IVec2>,
}

impl Sprite {
    /// Single-frame sprite with no handles.
    pub fn new(name: impl Into<String>, frame_width: i32, frame_height: i32) -> Self {
        Self {
            name: name.into(),
            frame_width,
            frame_height,
            frame_len: 1,
            frame_dur: 1,
            handles: Vec::new(),
        }
    }

    pub fn with_frames(mut self, frame_len: i32, frame_dur: i32) -> Self {
        self.frame_len = frame_len;
        self.frame_dur = frame_dur;
        self
    }

    pub fn with_handles(mut self, handles: Vec<IVec2>) -> Self {
        self.handles = handles;
        self
    }

    /// True if the sprite has more than one frame and should be stepped.
    pub fn is_animated(&self) -> bool {
        self.frame_len > 1
    }

    /// Sub-rectangle of the source strip holding frame `frame`.
    pub fn source_rect(&self, frame: i32) -> Rect {
        let x = self.frame_width * frame + frame;
        Rect::from_size(x, 0, self.frame_width, self.frame_height)
    }

    /// Attachment point for `frame`, if the sprite defines one.
    pub fn handle(&self, frame: i32) -> Option<IVec2> {
        usize::try_from(frame).ok().and_then(|i| self.handles.get(i)).copied()
    }
}

// ── Manifest format ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct HandleJson {
    #[serde(rename = "X")]
    x: i32,
    #[serde(rename = "Y")]
    y: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpriteJson {
    #[serde(rename = "frameDuration")]
    frame_dur: i32,
    frame_len: i32,
    frame_height: i32,
    frame_width: i32,
    #[serde(default)]
    handles: Vec<HandleJson>,
    image: String,
}

/// Convert a snake_case file stem into the camelCase key sprites are looked
/// up by: `link_walk_east` → `linkWalkEast`.
pub fn camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Key for one member of a directional sprite family, e.g.
/// `sprite_key("link", "walk", Direction::East)` → `linkWalkEast`.
pub fn sprite_key(prefix: &str, action: &str, dir: Direction) -> String {
    let mut key = String::with_capacity(prefix.len() + action.len() + 5);
    key.push_str(prefix);
    let mut chars = action.chars();
    if let Some(first) = chars.next() {
        key.extend(first.to_uppercase());
        key.push_str(chars.as_str());
    }
    key.push_str(dir.name());
    key
}

// ── SpriteSheet ──────────────────────────────────────────────────────────────

/// Name → sprite metadata lookup.
#[derive(Clone, Debug, Default)]
pub struct SpriteSheet {
    sprites: HashMap<String, Sprite>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sprite under its own name. An existing entry with the same
    /// name wins; returns false when the sprite was dropped as a duplicate.
    pub fn insert(&mut self, sprite: Sprite) -> bool {
        if self.sprites.contains_key(&sprite.name) {
            return false;
        }
        self.sprites.insert(sprite.name.clone(), sprite);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Sprite> {
        self.sprites.get(name)
    }

    /// Like [`get`](Self::get), but a miss is logged. Used mid-frame, where
    /// a missing sprite leaves the entity as it was instead of failing.
    pub fn lookup(&self, name: &str) -> Option<&Sprite> {
        let sprite = self.sprites.get(name);
        if sprite.is_none() {
            tracing::warn!(sprite = name, "sprite missing at runtime; keeping current");
        }
        sprite
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Look up a sprite that must exist.
    pub fn require(&self, name: &str) -> Result<&Sprite> {
        self.get(name).ok_or_else(|| GameError::MissingSprite(name.to_string()))
    }

    /// Fail on the first key from `names` that is not in the sheet.
    pub fn require_all<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for name in names {
            self.require(name)?;
        }
        Ok(())
    }

    /// Parse a sprite manifest (a JSON array of frame descriptions).
    /// `origin` is only used for error messages.
    pub fn from_json(json: &str, origin: impl AsRef<Path>) -> Result<Self> {
        let mut sheet = Self::new();
        sheet.merge_json(json, origin)?;
        Ok(sheet)
    }

    fn merge_json(&mut self, json: &str, origin: impl AsRef<Path>) -> Result<()> {
        let origin = origin.as_ref();
        let entries: Vec<SpriteJson> =
            serde_json::from_str(json).map_err(|e| GameError::parse(origin, e))?;

        for entry in entries {
            let stem = Path::new(&entry.image)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(entry.image.as_str());
            let name = camel_case(stem);
            if entry.frame_len < 1 || entry.frame_dur < 1 {
                return Err(GameError::InvalidConfig(format!(
                    "sprite '{name}' in {origin:?} needs frameLen and frameDuration >= 1"
                )));
            }
            let sprite = Sprite {
                name: name.clone(),
                frame_width: entry.frame_width,
                frame_height: entry.frame_height,
                frame_len: entry.frame_len,
                frame_dur: entry.frame_dur,
                handles: entry.handles.iter().map(|h| IVec2::new(h.x, h.y)).collect(),
            };
            if !self.insert(sprite) {
                tracing::warn!(sprite = %name, ?origin, "duplicate sprite name; skipping");
            }
        }
        Ok(())
    }

    /// Walk `path` recursively and merge every `.json` manifest found.
    /// Files are visited in sorted order so duplicate resolution is stable.
    pub fn load_folder(path: impl AsRef<Path>) -> Result<Self> {
        let mut sheet = Self::new();
        for entry in walkdir::WalkDir::new(path.as_ref())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let file_path = entry.path();
            if file_path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let text = std::fs::read_to_string(file_path).map_err(|e| GameError::io(file_path, e))?;
            sheet.merge_json(&text, file_path)?;
        }
        tracing::debug!(count = sheet.len(), path = ?path.as_ref(), "loaded sprite manifests");
        Ok(sheet)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
