//! Discovery feed: profile cards, feed modes and feed loading

use crate::engine::CardId;
use crate::error::{Result, SwipeDeckError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Profiles farther than this are excluded from the nearby feed
pub const NEARBY_RADIUS_KM: f32 = 25.0;

/// Display payload of a card. The engine only ever sees `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: CardId,
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub distance_km: Option<f32>,
}

/// Search mode of the discovery feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedMode {
    /// Every profile, in feed order
    #[default]
    Discover,
    /// Profiles within the nearby radius, closest first
    Nearby,
}

impl FeedMode {
    pub fn toggled(self) -> Self {
        match self {
            FeedMode::Discover => FeedMode::Nearby,
            FeedMode::Nearby => FeedMode::Discover,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeedMode::Discover => "Discover",
            FeedMode::Nearby => "Nearby",
        }
    }
}

/// Profiles backing the card stack for one mode
#[derive(Debug, Clone)]
pub struct Feed {
    pub mode: FeedMode,
    pub profiles: Vec<Profile>,
}

impl Feed {
    /// Builds the feed for `mode` out of the full profile pool
    pub fn for_mode(pool: &[Profile], mode: FeedMode) -> Self {
        let profiles = match mode {
            FeedMode::Discover => pool.to_vec(),
            FeedMode::Nearby => {
                let mut nearby: Vec<Profile> = pool
                    .iter()
                    .filter(|p| p.distance_km.is_some_and(|d| d <= NEARBY_RADIUS_KM))
                    .cloned()
                    .collect();
                nearby.sort_by(|a, b| {
                    let da = a.distance_km.unwrap_or(f32::MAX);
                    let db = b.distance_km.unwrap_or(f32::MAX);
                    da.total_cmp(&db)
                });
                nearby
            }
        };

        Self { mode, profiles }
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.profiles.iter().map(|p| p.id.clone()).collect()
    }

    pub fn get(&self, id: &CardId) -> Option<&Profile> {
        self.profiles.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Loads a profile pool from a JSON array.
///
/// Rejects empty pools and duplicate ids, since the stack keys sessions by id.
pub fn load_profiles(path: &Path) -> Result<Vec<Profile>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        SwipeDeckError::FeedError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let profiles: Vec<Profile> = serde_json::from_str(&contents).map_err(|e| {
        SwipeDeckError::FeedError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    validate_profiles(&profiles)?;
    Ok(profiles)
}

fn validate_profiles(profiles: &[Profile]) -> Result<()> {
    if profiles.is_empty() {
        return Err(SwipeDeckError::FeedError("Feed contains no profiles".to_string()));
    }

    let mut seen = HashSet::new();
    for profile in profiles {
        if !seen.insert(&profile.id) {
            return Err(SwipeDeckError::FeedError(format!(
                "Duplicate profile id: {}",
                profile.id
            )));
        }
    }
    Ok(())
}

/// Built-in profile pool used when no feed file is given
pub fn demo_profiles() -> Vec<Profile> {
    let profile = |id: &str, name: &str, age: u8, bio: &str, tags: &[&str], km: f32| Profile {
        id: CardId::from(id),
        name: name.to_string(),
        age,
        bio: bio.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        distance_km: Some(km),
    };

    vec![
        profile("p01", "Ava", 27, "Climber, amateur baker, will debate tabs vs spaces.", &["climbing", "baking"], 3.2),
        profile("p02", "Noah", 31, "Runs a tiny bookshop. Ask me for a recommendation.", &["books", "coffee"], 41.0),
        profile("p03", "Mia", 25, "Synth nerd. Looking for someone to go to gigs with.", &["music", "synths"], 7.5),
        profile("p04", "Leo", 29, "Weekend sailor, weekday backend engineer.", &["sailing", "rust"], 12.0),
        profile("p05", "Zoe", 33, "Ceramics, long walks, too many houseplants.", &["ceramics", "plants"], 88.0),
        profile("p06", "Kai", 28, "Trail runner who cooks a mean curry.", &["running", "cooking"], 1.1),
        profile("p07", "Ivy", 30, "Board games and bad puns, in that order.", &["games", "puns"], 19.9),
        profile("p08", "Eli", 26, "Film photographer. Darkroom on Sundays.", &["film", "photo"], 64.3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    mod feed_tests {
        use super::*;

        #[test]
        fn test_discover_keeps_pool_order() {
            let pool = demo_profiles();
            let feed = Feed::for_mode(&pool, FeedMode::Discover);

            assert_eq!(feed.len(), pool.len());
            assert_eq!(feed.ids()[0], CardId::from("p01"));
        }

        #[test]
        fn test_nearby_filters_and_sorts_by_distance() {
            let pool = demo_profiles();
            let feed = Feed::for_mode(&pool, FeedMode::Nearby);

            let ids: Vec<_> = feed.ids().iter().map(|id| id.to_string()).collect();
            assert_eq!(ids, vec!["p06", "p01", "p03", "p04", "p07"]);
            assert!(feed
                .profiles
                .iter()
                .all(|p| p.distance_km.unwrap() <= NEARBY_RADIUS_KM));
        }

        #[test]
        fn test_nearby_skips_profiles_without_distance() {
            let mut pool = demo_profiles();
            pool[0].distance_km = None;
            let feed = Feed::for_mode(&pool, FeedMode::Nearby);

            assert!(feed.get(&CardId::from("p01")).is_none());
        }

        #[test]
        fn test_get_profile_by_id() {
            let feed = Feed::for_mode(&demo_profiles(), FeedMode::Discover);
            assert_eq!(feed.get(&CardId::from("p03")).unwrap().name, "Mia");
            assert!(feed.get(&CardId::from("missing")).is_none());
        }

        #[test]
        fn test_mode_toggle() {
            assert_eq!(FeedMode::Discover.toggled(), FeedMode::Nearby);
            assert_eq!(FeedMode::Nearby.toggled(), FeedMode::Discover);
            assert_eq!(FeedMode::default(), FeedMode::Discover);
        }
    }

    mod load_tests {
        use super::*;

        fn write_feed(json: &str) -> NamedTempFile {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(json.as_bytes()).unwrap();
            file
        }

        #[test]
        fn test_load_profiles_with_defaults() {
            let file = write_feed(r#"[{"id": "x1", "name": "Sam", "age": 40}]"#);
            let profiles = load_profiles(file.path()).unwrap();

            assert_eq!(profiles.len(), 1);
            assert_eq!(profiles[0].id, CardId::from("x1"));
            assert!(profiles[0].tags.is_empty());
            assert!(profiles[0].distance_km.is_none());
        }

        #[test]
        fn test_load_profiles_rejects_duplicates() {
            let file = write_feed(
                r#"[{"id": "x1", "name": "Sam", "age": 40}, {"id": "x1", "name": "Al", "age": 22}]"#,
            );
            let err = load_profiles(file.path()).unwrap_err();
            assert!(err.to_string().contains("Duplicate profile id: x1"));
        }

        #[test]
        fn test_load_profiles_rejects_empty() {
            let file = write_feed("[]");
            assert!(load_profiles(file.path()).is_err());
        }

        #[test]
        fn test_load_profiles_invalid_json() {
            let file = write_feed("{ not json");
            let err = load_profiles(file.path()).unwrap_err();
            assert!(matches!(err, SwipeDeckError::FeedError(_)));
        }

        #[test]
        fn test_load_profiles_missing_file() {
            assert!(load_profiles(Path::new("/nonexistent/feed.json")).is_err());
        }
    }
}
