use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::core::{Canvas, Fps},
    foundation::error::{ReeltimeError, ReeltimeResult},
    reveal::stagger::DEFAULT_SETTLE_FRAMES,
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One commit shown in a composition.
pub struct Commit {
    /// Commit hash, full or abbreviated.
    pub hash: String,
    /// Subject line.
    pub message: String,
    /// Conventional-commit type (`feat`, `fix`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Repository label, when commits from several repositories are mixed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

impl Commit {
    /// Hash cut to at most seven characters.
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((i, _)) => &self.hash[..i],
            None => &self.hash,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Commits grouped under a heading.
pub struct CommitCategory {
    /// Heading, typically a repository name.
    pub name: String,
    /// Commits in display order.
    #[serde(default)]
    pub commits: Vec<Commit>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Slide-based update announcement: intro, per-category headers and commit cards, outro.
pub struct AnnouncementDef {
    /// Output frame rate.
    pub fps: Fps,
    /// Output size.
    pub canvas: Canvas,
    /// Intro slide length.
    pub intro_frames: u64,
    /// Category header length.
    pub category_frames: u64,
    /// Commit card length.
    pub commit_frames: u64,
    /// Outro slide length.
    pub outro_frames: u64,
    /// Overlap of every transition.
    pub transition_frames: u64,
    /// Intro headline.
    pub title: String,
    /// Intro tagline.
    pub subtitle: String,
    /// Outro call-to-action label.
    pub cta_label: String,
    /// Commits grouped by category, in display order.
    pub categories: Vec<CommitCategory>,
}

impl Default for AnnouncementDef {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            canvas: Canvas {
                width: 1080,
                height: 1080,
            },
            intro_frames: 60,
            category_frames: 45,
            commit_frames: 75,
            outro_frames: 90,
            transition_frames: 15,
            title: "Product Updates".to_string(),
            subtitle: "What we shipped today".to_string(),
            cta_label: "See what's new".to_string(),
            categories: Vec::new(),
        }
    }
}

impl AnnouncementDef {
    /// Number of commits across all categories.
    pub fn total_commits(&self) -> usize {
        self.categories.iter().map(|c| c.commits.len()).sum()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Single-page feed where commits type in one after another, followed by a call to action.
pub struct ShowcaseDef {
    /// Output frame rate.
    pub fps: Fps,
    /// Output size.
    pub canvas: Canvas,
    /// Frames before the first commit appears.
    pub intro_delay: u64,
    /// Frames between commits.
    pub interval: u64,
    /// Row height in pixels.
    pub item_height: f64,
    /// Rows visible before the feed scrolls.
    pub visible_count: usize,
    /// Frames the scroll keeps moving after the last commit.
    pub settle_frames: u64,
    /// Frames after the last interval.
    pub outro_frames: u64,
    /// Whether the soundtrack cues are placed.
    pub audio: bool,
    /// Commits in display order.
    pub commits: Vec<Commit>,
}

impl Default for ShowcaseDef {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            canvas: Canvas {
                width: 1280,
                height: 1000,
            },
            intro_delay: 60,
            interval: 50,
            item_height: 90.0,
            visible_count: 5,
            settle_frames: DEFAULT_SETTLE_FRAMES,
            outro_frames: 90,
            audio: true,
            commits: Vec::new(),
        }
    }
}

impl ShowcaseDef {
    /// `intro_delay + commits * interval + outro_frames`.
    pub fn duration_frames(&self) -> ReeltimeResult<u64> {
        (self.commits.len() as u64)
            .checked_mul(self.interval)
            .and_then(|feed| feed.checked_add(self.intro_delay))
            .and_then(|d| d.checked_add(self.outro_frames))
            .ok_or_else(|| {
                ReeltimeError::invalid_timeline("showcase duration overflows u64 frames")
            })
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// JSON-facing composition declaration.
pub enum CompositionDef {
    /// See [`AnnouncementDef`].
    UpdatesAnnouncement(AnnouncementDef),
    /// See [`ShowcaseDef`].
    CommitShowcase(ShowcaseDef),
}

impl CompositionDef {
    /// Parse a composition from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReeltimeResult<Self> {
        let def: Self = serde_json::from_reader(r)
            .map_err(|e| ReeltimeError::serde(format!("parse composition JSON: {e}")))?;
        def.validate()?;
        Ok(def)
    }

    /// Parse a composition from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReeltimeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReeltimeError::validation(format!("open composition JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        match self {
            Self::UpdatesAnnouncement(d) => d.fps,
            Self::CommitShowcase(d) => d.fps,
        }
    }

    /// Output size.
    pub fn canvas(&self) -> Canvas {
        match self {
            Self::UpdatesAnnouncement(d) => d.canvas,
            Self::CommitShowcase(d) => d.canvas,
        }
    }

    /// Check values that do not depend on scheduling.
    ///
    /// Timing problems (zero durations, impossible overlaps) surface when the composition is
    /// built.
    pub fn validate(&self) -> ReeltimeResult<()> {
        self.fps().validate()?;
        let canvas = self.canvas();
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ReeltimeError::validation(format!(
                "canvas must be non-empty, got {}x{}",
                canvas.width, canvas.height
            )));
        }
        match self {
            Self::UpdatesAnnouncement(d) => {
                if let Some(c) = d.categories.iter().find(|c| c.name.trim().is_empty()) {
                    return Err(ReeltimeError::validation(format!(
                        "category with {} commits has an empty name",
                        c.commits.len()
                    )));
                }
            }
            Self::CommitShowcase(d) => {
                if !(d.item_height.is_finite() && d.item_height >= 0.0) {
                    return Err(ReeltimeError::validation(format!(
                        "item_height must be finite and >= 0, got {}",
                        d.item_height
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
