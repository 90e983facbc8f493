use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gloss_protocol::{Clip, Frame, LandmarkGroup, Lexicon, Point, DEFAULT_FRAME_RATE};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ClipError;
use crate::traits::ClipStore;

pub const CLIP_SUFFIX: &str = "_canonical_median.json";

/// Clips stored as `<root>/<clip name>_canonical_median.json`.
pub struct FsClipStore {
    root: PathBuf,
    clip_names: HashMap<String, String>,
}

impl FsClipStore {
    pub fn new(root: impl Into<PathBuf>, lexicon: &Lexicon) -> Self {
        Self {
            root: root.into(),
            clip_names: lexicon
                .glosses
                .iter()
                .map(|g| (g.text.to_lowercase(), g.clip_name.clone()))
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Dataset file for a gloss. Unknown glosses use their own text as the name.
    pub fn clip_path(&self, gloss: &str) -> PathBuf {
        let name = self
            .clip_names
            .get(&gloss.to_lowercase())
            .map(String::as_str)
            .unwrap_or(gloss);
        self.root.join(format!("{name}{CLIP_SUFFIX}"))
    }
}

#[async_trait]
impl ClipStore for FsClipStore {
    async fn fetch_clip(&self, gloss: &str) -> Result<Clip, ClipError> {
        let path = self.clip_path(gloss);
        debug!("Loading clip {}", path.display());
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => ClipError::NotFound(gloss.to_string()),
            _ => ClipError::Io(e),
        })?;
        let json: Value = serde_json::from_slice(&bytes)?;
        Ok(parse_clip(gloss, &json))
    }
}

/// Normalizes the dataset's clip layouts into a `Clip`.
///
/// Accepts a bare frame array or an object with `frames` / `sequence`
/// (`sequence` wins) and an optional `fps` / `frame_rate` (`frame_rate` wins).
/// A document without a frame list yields an empty clip.
pub fn parse_clip(gloss: &str, json: &Value) -> Clip {
    let (frames, rate) = match json {
        Value::Array(items) => (Some(items), None),
        Value::Object(map) => {
            let frames = map
                .get("sequence")
                .and_then(Value::as_array)
                .or_else(|| map.get("frames").and_then(Value::as_array));
            let rate = map
                .get("frame_rate")
                .and_then(Value::as_f64)
                .or_else(|| map.get("fps").and_then(Value::as_f64));
            (frames, rate)
        }
        _ => (None, None),
    };

    let frames: Vec<Frame> = frames
        .map(|items| items.iter().map(parse_frame).collect())
        .unwrap_or_default();
    Clip::new(
        gloss.to_string(),
        frames,
        rate.map(|r| r as f32).unwrap_or(DEFAULT_FRAME_RATE),
    )
}

pub fn parse_frame(value: &Value) -> Frame {
    let mut groups = Vec::new();
    collect_groups(value, None, &mut groups);
    Frame { groups }
}

fn collect_groups(value: &Value, name: Option<&str>, groups: &mut Vec<LandmarkGroup>) {
    if let Some(point) = as_point(value) {
        push_group(groups, name, vec![point]);
        return;
    }
    match value {
        Value::Array(items) => {
            let points: Option<Vec<Point>> = items.iter().map(as_point).collect();
            match points {
                Some(points) if !points.is_empty() => push_group(groups, name, points),
                _ => {
                    for item in items {
                        collect_groups(item, None, groups);
                    }
                }
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                collect_groups(item, Some(key.as_str()), groups);
            }
        }
        _ => {}
    }
}

fn push_group(groups: &mut Vec<LandmarkGroup>, name: Option<&str>, points: Vec<Point>) {
    let name = match name {
        Some(name) => name.to_string(),
        None => format!("group{}", groups.len()),
    };
    groups.push(LandmarkGroup { name, points });
}

/// `[x, y]`, `[x, y, z]` or `{"x", "y", "z"?}`.
fn as_point(value: &Value) -> Option<Point> {
    match value {
        Value::Array(items) if (2..=3).contains(&items.len()) => {
            let coords: Option<Vec<f64>> = items.iter().map(Value::as_f64).collect();
            let coords = coords?;
            Some(Point::new(
                coords[0] as f32,
                coords[1] as f32,
                coords.get(2).copied().unwrap_or(0.0) as f32,
            ))
        }
        Value::Object(map) => object_point(map),
        _ => None,
    }
}

fn object_point(map: &Map<String, Value>) -> Option<Point> {
    let x = map.get("x")?.as_f64()?;
    let y = map.get("y")?.as_f64()?;
    let z = map.get("z").and_then(Value::as_f64).unwrap_or(0.0);
    Some(Point::new(x as f32, y as f32, z as f32))
}
