//! Health profile storage.
//!
//! The engine only reads a profile's condition names; storing profiles is the job of a
//! [`ProfileStore`]. Two stores are provided:
//!
//! - [`InMemoryProfileStore`] for tests and short-lived processes
//! - [`JsonProfileStore`], one pretty-printed JSON file per profile:
//!
//! ```text
//! <profile_data_dir>/
//!   550e8400e29b41d4a716446655440000.json
//!   ...
//! ```
//!
//! Files are written to a temporary sibling and renamed into place, so a reader never sees a
//! half-written profile.

use crate::constants::{MAX_PROFILE_AGE, PROFILE_FILE_EXTENSION};
use crate::error::{LabelError, LabelResult};
use chrono::{DateTime, Utc};
use cleanlabel_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use uuid::Uuid;

/// Identifier of a stored health profile.
///
/// Rendered in the 32-character lowercase hex form; parsing also accepts the hyphenated form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(Uuid);

impl ProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    ///
    /// Returns `LabelError::InvalidInput` if `input` is not a UUID.
    pub fn parse(input: &str) -> LabelResult<Self> {
        Uuid::parse_str(input.trim())
            .map(Self)
            .map_err(|e| LabelError::InvalidInput(format!("invalid profile id '{input}': {e}")))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl std::str::FromStr for ProfileId {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A person's health profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub id: ProfileId,
    pub name: NonEmptyText,
    pub age: u32,
    /// Condition names as listed in the condition catalog.
    pub conditions: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl HealthProfile {
    /// Create a profile with a fresh identifier.
    ///
    /// Blank condition names are dropped and the rest are trimmed.
    ///
    /// # Errors
    ///
    /// Returns a `LabelError` if the name is blank or the age is out of range.
    pub fn new(name: &str, age: u32, conditions: Vec<String>) -> LabelResult<Self> {
        validate_age(age)?;
        Ok(Self {
            id: ProfileId::new(),
            name: NonEmptyText::new(name)?,
            age,
            conditions: clean_conditions(conditions),
            updated_at: Utc::now(),
        })
    }

    /// Apply a partial update, keeping the identifier. `None` leaves a field unchanged.
    pub fn updated(
        &self,
        name: Option<&str>,
        age: Option<u32>,
        conditions: Option<Vec<String>>,
    ) -> LabelResult<Self> {
        let name = match name {
            Some(name) => NonEmptyText::new(name)?,
            None => self.name.clone(),
        };
        let age = match age {
            Some(age) => {
                validate_age(age)?;
                age
            }
            None => self.age,
        };
        Ok(Self {
            id: self.id,
            name,
            age,
            conditions: conditions
                .map(clean_conditions)
                .unwrap_or_else(|| self.conditions.clone()),
            updated_at: Utc::now(),
        })
    }
}

fn clean_conditions(conditions: Vec<String>) -> Vec<String> {
    conditions
        .into_iter()
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty())
        .collect()
}

fn validate_age(age: u32) -> LabelResult<()> {
    if age > MAX_PROFILE_AGE {
        return Err(LabelError::InvalidInput(format!(
            "age must be between 0 and {MAX_PROFILE_AGE}"
        )));
    }
    Ok(())
}

/// Parse an age typed by a user.
///
/// # Errors
///
/// Returns `LabelError::InvalidInput` if `input` is not a whole number between 0 and
/// [`MAX_PROFILE_AGE`].
pub fn parse_age(input: &str) -> LabelResult<u32> {
    let age = input
        .trim()
        .parse::<u32>()
        .map_err(|_| LabelError::InvalidInput(format!("age '{}' is not a whole number", input.trim())))?;
    validate_age(age)?;
    Ok(age)
}

/// Key/value store for health profiles.
pub trait ProfileStore: Send + Sync {
    /// All stored profiles, ordered by name and then id.
    fn list_profiles(&self) -> LabelResult<Vec<HealthProfile>>;

    fn get(&self, id: &ProfileId) -> LabelResult<Option<HealthProfile>>;

    /// Insert a profile, replacing any profile with the same id.
    fn upsert(&self, profile: &HealthProfile) -> LabelResult<()>;

    /// Remove a profile. Returns `false` if it did not exist.
    fn delete(&self, id: &ProfileId) -> LabelResult<bool>;

    /// The profile used when none is selected explicitly: the first in list order.
    fn default_profile(&self) -> LabelResult<Option<HealthProfile>> {
        Ok(self.list_profiles()?.into_iter().next())
    }

    /// Like [`ProfileStore::get`], but a missing profile is an error.
    fn require(&self, id: &ProfileId) -> LabelResult<HealthProfile> {
        self.get(id)?
            .ok_or_else(|| LabelError::ProfileNotFound(id.to_string()))
    }
}

fn sort_profiles(profiles: &mut [HealthProfile]) {
    profiles.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
}

/// Profile store held in memory.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<ProfileId, HealthProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn list_profiles(&self) -> LabelResult<Vec<HealthProfile>> {
        let guard = self.profiles.read().map_err(|_| LabelError::StorePoisoned)?;
        let mut profiles: Vec<HealthProfile> = guard.values().cloned().collect();
        sort_profiles(&mut profiles);
        Ok(profiles)
    }

    fn get(&self, id: &ProfileId) -> LabelResult<Option<HealthProfile>> {
        let guard = self.profiles.read().map_err(|_| LabelError::StorePoisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn upsert(&self, profile: &HealthProfile) -> LabelResult<()> {
        let mut guard = self.profiles.write().map_err(|_| LabelError::StorePoisoned)?;
        guard.insert(profile.id, profile.clone());
        Ok(())
    }

    fn delete(&self, id: &ProfileId) -> LabelResult<bool> {
        let mut guard = self.profiles.write().map_err(|_| LabelError::StorePoisoned)?;
        Ok(guard.remove(id).is_some())
    }
}

/// Profile store backed by one JSON file per profile.
#[derive(Clone, Debug)]
pub struct JsonProfileStore {
    dir: PathBuf,
}

impl JsonProfileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::ProfileDirCreation` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> LabelResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(LabelError::ProfileDirCreation)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn profile_path(&self, id: &ProfileId) -> PathBuf {
        self.dir.join(format!("{id}.{PROFILE_FILE_EXTENSION}"))
    }

    fn read_profile(path: &Path) -> LabelResult<Option<HealthProfile>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LabelError::FileRead(e)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(LabelError::Deserialization)
    }
}

impl ProfileStore for JsonProfileStore {
    fn list_profiles(&self) -> LabelResult<Vec<HealthProfile>> {
        let mut profiles = Vec::new();

        for entry in fs::read_dir(&self.dir).map_err(LabelError::FileRead)? {
            let path = entry.map_err(LabelError::FileRead)?.path();
            let is_profile_file = path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(PROFILE_FILE_EXTENSION);
            if !is_profile_file {
                continue;
            }

            match Self::read_profile(&path) {
                Ok(Some(profile)) => profiles.push(profile),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("skipping unreadable profile {}: {}", path.display(), e);
                }
            }
        }

        sort_profiles(&mut profiles);
        Ok(profiles)
    }

    fn get(&self, id: &ProfileId) -> LabelResult<Option<HealthProfile>> {
        Self::read_profile(&self.profile_path(id))
    }

    fn upsert(&self, profile: &HealthProfile) -> LabelResult<()> {
        let json = serde_json::to_string_pretty(profile).map_err(LabelError::Serialization)?;
        let path = self.profile_path(&profile.id);
        let tmp = path.with_extension(format!("{PROFILE_FILE_EXTENSION}.tmp"));

        fs::write(&tmp, json).map_err(LabelError::FileWrite)?;
        fs::rename(&tmp, &path).map_err(LabelError::FileWrite)?;
        tracing::debug!(profile = %profile.id, "profile saved");
        Ok(())
    }

    fn delete(&self, id: &ProfileId) -> LabelResult<bool> {
        match fs::remove_file(self.profile_path(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(LabelError::FileRemove(e)),
        }
    }
}
