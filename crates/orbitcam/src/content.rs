use crate::geometry::{Point, Rect, clamp};
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MAX_SUBTOPICS: usize = 6;
/// Manual offsets are percentages of the parent size.
pub const MAX_OFFSET: f64 = 200.0;
pub const DEFAULT_SUBTOPIC_TITLE: &str = "New subtopic";

const GENERATED_COLORS: &[&str] = &[
    "#e63946", "#f4a261", "#2a9d8f", "#457b9d", "#8e6cc9", "#e9c46a", "#43aa8b", "#d1495b",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("topic {0} not found")]
    UnknownTopic(TopicId),
    #[error("topic {0} already has the maximum number of subtopics")]
    TooManySubtopics(TopicId),
    #[error("topic {topic} has no subtopic at index {index}")]
    SubtopicOutOfRange { topic: TopicId, index: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color {0:?}")]
pub struct ColorError(String);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct TopicId(u32);

impl TopicId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for TopicId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct TopicTitle(String);

crate::impl_string_newtype!(TopicTitle);

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr, SerializeDisplay)]
pub struct TopicColor(Srgb<u8>);

impl TopicColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    pub fn to_srgba(&self, alpha: f64) -> Srgba<f64> {
        let (r, g, b) = self.0.into_format::<f64>().into_components();
        Srgba::new(r, g, b, alpha)
    }
}

impl Default for TopicColor {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl FromStr for TopicColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(Self)
            .map_err(|_| ColorError(s.to_string()))
    }
}

impl fmt::Display for TopicColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

/// Content files may list a subtopic as a bare title or as a table.
#[derive(Deserialize)]
#[serde(untagged)]
enum SubtopicEntry {
    Title(String),
    Full {
        #[serde(default)]
        title: String,
        #[serde(default)]
        position: Option<Point>,
    },
}

impl From<SubtopicEntry> for Subtopic {
    fn from(entry: SubtopicEntry) -> Self {
        match entry {
            SubtopicEntry::Title(title) => Subtopic::new(title),
            SubtopicEntry::Full { title, position } => Subtopic {
                title: TopicTitle::new(title),
                position: valid_offset(position),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SubtopicEntry")]
pub struct Subtopic {
    pub title: TopicTitle,
    /// Manual placement relative to the parent center, in percent.
    pub position: Option<Point>,
}

impl Subtopic {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: TopicTitle::new(title),
            position: None,
        }
    }

    /// Non-finite positions leave the subtopic without an override.
    pub fn with_position(title: impl Into<String>, position: Point) -> Self {
        Self {
            title: TopicTitle::new(title),
            position: valid_offset(Some(position)),
        }
    }

    /// Converts an absolute point into an override relative to `parent`.
    /// `None` for a zero-sized parent or a non-finite point.
    pub fn offset_from_point(parent: &Rect, point: Point) -> Option<Point> {
        if !(parent.width > 0.0 && parent.height > 0.0) {
            return None;
        }
        let c = parent.center();
        valid_offset(Some(Point::new(
            (point.x - c.x) / parent.width * 100.0,
            (point.y - c.y) / parent.height * 100.0,
        )))
    }
}

// f64::max/min turn NaN into the bound, so filter before clamping
fn valid_offset(p: Option<Point>) -> Option<Point> {
    p.filter(Point::is_finite).map(|p| {
        Point::new(
            clamp(p.x, -MAX_OFFSET, MAX_OFFSET),
            clamp(p.y, -MAX_OFFSET, MAX_OFFSET),
        )
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    #[serde(default)]
    pub title: TopicTitle,
    #[serde(default)]
    pub color: TopicColor,
    #[serde(default)]
    pub subtopics: Vec<Subtopic>,
}

impl Topic {
    pub fn new(id: TopicId, title: impl Into<String>, color: TopicColor) -> Self {
        Self {
            id,
            title: TopicTitle::new(title),
            color,
            subtopics: Vec::new(),
        }
    }

    /// Only the first [`MAX_SUBTOPICS`] are ever shown, whatever the file holds.
    pub fn visible_subtopics(&self) -> &[Subtopic] {
        &self.subtopics[..self.subtopics.len().min(MAX_SUBTOPICS)]
    }

    pub fn add_subtopic(&mut self, subtopic: Subtopic) -> Result<usize, ContentError> {
        if self.subtopics.len() >= MAX_SUBTOPICS {
            return Err(ContentError::TooManySubtopics(self.id));
        }
        self.subtopics.push(subtopic);
        Ok(self.subtopics.len() - 1)
    }

    pub fn remove_subtopic(&mut self, index: usize) -> Result<Subtopic, ContentError> {
        self.check_index(index)?;
        Ok(self.subtopics.remove(index))
    }

    pub fn move_subtopic(&mut self, from: usize, to: usize) -> Result<(), ContentError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let moved = self.subtopics.remove(from);
            self.subtopics.insert(to, moved);
        }
        Ok(())
    }

    pub fn set_subtopic_position(
        &mut self,
        index: usize,
        position: Option<Point>,
    ) -> Result<(), ContentError> {
        self.check_index(index)?;
        self.subtopics[index].position = valid_offset(position);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), ContentError> {
        if index < self.subtopics.len() {
            Ok(())
        } else {
            Err(ContentError::SubtopicOutOfRange {
                topic: self.id,
                index,
            })
        }
    }
}

/// The topic set shown on the ring. Replaced wholesale on regeneration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Deck {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// Placeholder deck with `count` topics, ids starting at 1.
    pub fn generate(count: usize) -> Self {
        let topics = (0..count)
            .map(|i| {
                let color = GENERATED_COLORS[i % GENERATED_COLORS.len()]
                    .parse()
                    .unwrap_or_default();
                Topic::new(TopicId(i as u32 + 1), format!("Topic {}", i + 1), color)
            })
            .collect();
        Self { topics }
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn index_of(&self, id: TopicId) -> Option<usize> {
        self.topics.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    fn topic_mut(&mut self, id: TopicId) -> Result<&mut Topic, ContentError> {
        self.topics
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ContentError::UnknownTopic(id))
    }

    pub fn rename(&mut self, id: TopicId, title: impl Into<String>) -> Result<(), ContentError> {
        self.topic_mut(id)?.title = TopicTitle::new(title);
        Ok(())
    }

    pub fn add_subtopic(
        &mut self,
        id: TopicId,
        title: Option<String>,
    ) -> Result<usize, ContentError> {
        let title = title.unwrap_or_else(|| DEFAULT_SUBTOPIC_TITLE.to_string());
        self.topic_mut(id)?.add_subtopic(Subtopic::new(title))
    }

    pub fn remove_subtopic(&mut self, id: TopicId, index: usize) -> Result<Subtopic, ContentError> {
        self.topic_mut(id)?.remove_subtopic(index)
    }

    pub fn move_subtopic(
        &mut self,
        id: TopicId,
        from: usize,
        to: usize,
    ) -> Result<(), ContentError> {
        self.topic_mut(id)?.move_subtopic(from, to)
    }

    pub fn set_subtopic_position(
        &mut self,
        id: TopicId,
        index: usize,
        position: Option<Point>,
    ) -> Result<(), ContentError> {
        self.topic_mut(id)?.set_subtopic_position(index, position)
    }
}
