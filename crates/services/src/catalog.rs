use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use play_core::Clock;
use play_core::model::{GameId, GameRef, Topic, TopicSlug};
use serde::Deserialize;
use tokio::fs;

use crate::error::CatalogError;

/// Metadata resource expected inside every authored topic directory.
pub const METADATA_FILE: &str = "metadata.json";

//
// ─── METADATA ──────────────────────────────────────────────────────────────────
//

/// On-disk metadata schema: `{topic, description, games, createdAt}`.
///
/// Every field is optional; authored files routinely carry only a subset
/// and the catalog fills the gaps from the directory name and clock.
#[derive(Debug, Deserialize)]
struct TopicMetadata {
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    games: Vec<GameRef>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<DateTime<Utc>>,
}

enum MetadataFailure {
    Read(std::io::Error),
    Parse(serde_json::Error),
    Invalid(play_core::model::TopicError),
}

impl fmt::Display for MetadataFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataFailure::Read(e) => write!(f, "read failed: {e}"),
            MetadataFailure::Parse(e) => write!(f, "parse failed: {e}"),
            MetadataFailure::Invalid(e) => write!(f, "invalid fields: {e}"),
        }
    }
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// A listed topic, tagged with where its fields came from.
///
/// Listing degrades per entry: a directory with broken metadata still
/// lists, but as `Fallback` so callers can tell synthesized fields from
/// authored ones without heuristics.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicRecord {
    /// Metadata was read and parsed from the topic directory.
    Authored(Topic),
    /// Metadata was absent or unreadable; fields are synthesized.
    Fallback(Topic),
}

impl TopicRecord {
    #[must_use]
    pub fn topic(&self) -> &Topic {
        match self {
            TopicRecord::Authored(t) | TopicRecord::Fallback(t) => t,
        }
    }

    #[must_use]
    pub fn into_topic(self) -> Topic {
        match self {
            TopicRecord::Authored(t) | TopicRecord::Fallback(t) => t,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, TopicRecord::Fallback(_))
    }
}

/// Opaque handle to a playable game resource on disk.
///
/// The serving layer streams the bytes back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResource {
    path: PathBuf,
    len: u64,
}

impl GameResource {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the full resource contents.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file vanished or became unreadable after
    /// resolution.
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        fs::read(&self.path).await
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Discovers topics and games under a content root.
///
/// One directory per topic; each may carry a `metadata.json` and any number
/// of `game-<id>.html` resources.
#[derive(Debug, Clone)]
pub struct CatalogService {
    root: PathBuf,
    clock: Clock,
}

impl CatalogService {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, clock: Clock) -> Self {
        Self {
            root: root.into(),
            clock,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists every topic directory under the root.
    ///
    /// Availability over correctness: entries with broken metadata degrade
    /// to fallback topics instead of failing the listing, and a missing
    /// root lists as empty. Order is filesystem enumeration order; callers
    /// must not rely on it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Root` only when the root itself cannot be
    /// enumerated.
    pub async fn list_topics(&self) -> Result<Vec<TopicRecord>, CatalogError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CatalogError::Root(e)),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(CatalogError::Root)? {
            let is_dir = entry
                .file_type()
                .await
                .map(|ty| ty.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }

            let name = entry.file_name();
            let Ok(slug) = name.to_string_lossy().parse::<TopicSlug>() else {
                // not addressable as a topic slug, so never listed
                tracing::debug!(name = %name.to_string_lossy(), "skipping unaddressable directory");
                continue;
            };

            records.push(self.read_topic(slug).await);
        }

        Ok(records)
    }

    /// Loads a single topic by slug.
    ///
    /// Correctness over availability: the caller asked for one identity, so
    /// absent or unreadable metadata reports `TopicNotFound` instead of a
    /// synthesized stand-in.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::TopicNotFound` if the directory or its
    /// metadata cannot be read and parsed.
    pub async fn get_topic(&self, slug: &TopicSlug) -> Result<Topic, CatalogError> {
        self.load_metadata(slug)
            .await
            .map_err(|failure| {
                tracing::debug!(topic = %slug, %failure, "topic lookup failed");
                CatalogError::TopicNotFound { slug: slug.clone() }
            })
    }

    /// Resolves a game resource, verifying it exists on disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::GameNotFound` if the addressed resource is
    /// absent.
    pub async fn resolve_game(
        &self,
        topic: &TopicSlug,
        game: &GameId,
    ) -> Result<GameResource, CatalogError> {
        let path = self.game_path(topic, game);
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(GameResource {
                path,
                len: meta.len(),
            }),
            _ => Err(CatalogError::GameNotFound {
                topic: topic.clone(),
                game: game.clone(),
            }),
        }
    }

    fn game_path(&self, topic: &TopicSlug, game: &GameId) -> PathBuf {
        self.root
            .join(topic.as_str())
            .join(format!("game-{game}.html"))
    }

    async fn read_topic(&self, slug: TopicSlug) -> TopicRecord {
        match self.load_metadata(&slug).await {
            Ok(topic) => TopicRecord::Authored(topic),
            Err(failure) => {
                tracing::debug!(topic = %slug, %failure, "listing topic via fallback");
                TopicRecord::Fallback(Topic::fallback(slug, self.clock.now()))
            }
        }
    }

    async fn load_metadata(&self, slug: &TopicSlug) -> Result<Topic, MetadataFailure> {
        let path = self.root.join(slug.as_str()).join(METADATA_FILE);
        let raw = fs::read_to_string(&path)
            .await
            .map_err(MetadataFailure::Read)?;
        let metadata: TopicMetadata =
            serde_json::from_str(&raw).map_err(MetadataFailure::Parse)?;

        let display_name = metadata
            .topic
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| slug.display_name());
        let description = metadata
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format!("Learning games for {display_name}"));
        let created_at = metadata.created_at.unwrap_or_else(|| self.clock.now());

        Topic::new(
            slug.clone(),
            display_name,
            description,
            metadata.games,
            created_at,
        )
        .map_err(MetadataFailure::Invalid)
    }
}
