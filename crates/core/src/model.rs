//! Movie record data model.
//!
//! Field names serialize in camelCase to keep the dataset file compatible
//! with existing consumers of `movies.json`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the sites a title is looked up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    Imdb,
    RottenTomato,
    MetaCritic,
}

impl SourceKind {
    /// Key used under `scores` in the dataset.
    pub fn key(&self) -> &'static str {
        match self {
            SourceKind::Imdb => "imdb",
            SourceKind::RottenTomato => "rottenTomato",
            SourceKind::MetaCritic => "metaCritic",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single source's score. `rating` is kept as the site printed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub rating: String,
    pub reviews: String,
    pub link: String,
}

/// Per-source scores. Secondary sources are omitted, not `null`, when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub imdb: ScoreEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotten_tomato: Option<ScoreEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_critic: Option<ScoreEntry>,
}

/// Cast member with the character they play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStar {
    pub actor_name: String,
    pub character_name: String,
}

/// The unified per-title record written to the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: Option<String>,
    pub title: String,
    pub scores: Scores,
    pub content_rating: String,
    pub release_date: String,
    pub release_year: String,
    pub duration: String,
    pub categories: Vec<String>,
    pub summary: String,
    pub director: String,
    pub writers: Vec<String>,
    pub stars: Vec<String>,
    pub top_stars: Vec<TopStar>,
    pub photos: Vec<String>,
}

impl MovieRecord {
    /// Attach a secondary source's score, replacing any previous entry for that source.
    ///
    /// IMDb is the primary score and is set at construction; passing
    /// `SourceKind::Imdb` overwrites it.
    pub fn attach_score(&mut self, source: SourceKind, entry: ScoreEntry) {
        match source {
            SourceKind::Imdb => self.scores.imdb = entry,
            SourceKind::RottenTomato => self.scores.rotten_tomato = Some(entry),
            SourceKind::MetaCritic => self.scores.meta_critic = Some(entry),
        }
    }

    /// Score for the given source, if present.
    pub fn score(&self, source: SourceKind) -> Option<&ScoreEntry> {
        match source {
            SourceKind::Imdb => Some(&self.scores.imdb),
            SourceKind::RottenTomato => self.scores.rotten_tomato.as_ref(),
            SourceKind::MetaCritic => self.scores.meta_critic.as_ref(),
        }
    }
}
