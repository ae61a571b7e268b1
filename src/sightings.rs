// SPDX-License-Identifier: GPL-3.0-only

//! Sighting log
//!
//! In-memory record of spotted pets. Captured photos are referenced by path;
//! persistent storage and the hosted backend remain external collaborators.

use crate::constants::rating;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// Kind of pet spotted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetKind {
    #[default]
    Cat,
    Dog,
    Other,
}

impl PetKind {
    /// Get all kinds for UI iteration
    pub const ALL: [PetKind; 3] = [PetKind::Cat, PetKind::Dog, PetKind::Other];

    /// Get display name for the kind
    pub fn display_name(&self) -> &'static str {
        match self {
            PetKind::Cat => "Cat",
            PetKind::Dog => "Dog",
            PetKind::Other => "Other",
        }
    }
}

impl std::fmt::Display for PetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for PetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cat" => Ok(PetKind::Cat),
            "dog" => Ok(PetKind::Dog),
            "other" => Ok(PetKind::Other),
            other => Err(format!("unknown pet kind: {}", other)),
        }
    }
}

/// Geographic location of a sighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable address when reverse geocoding is available
    pub address: Option<String>,
}

/// A recorded pet sighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub id: Uuid,
    /// Path to the captured photo on disk
    pub photo_path: PathBuf,
    pub kind: PetKind,
    pub name: Option<String>,
    /// 1..=5 stars
    pub rating: u8,
    pub description: Option<String>,
    pub location: GeoPoint,
    pub spotted_at: DateTime<Local>,
}

/// Details supplied by the user when recording a sighting
///
/// Id and timestamp are assigned by the board.
#[derive(Debug, Clone)]
pub struct NewSighting {
    pub photo_path: PathBuf,
    pub kind: PetKind,
    pub name: Option<String>,
    pub rating: u8,
    pub description: Option<String>,
    pub location: GeoPoint,
}

/// Map filter over the sighting list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SightingFilter {
    #[default]
    All,
    Cats,
    Dogs,
    Other,
}

impl SightingFilter {
    /// Whether a sighting passes this filter
    pub fn matches(&self, sighting: &Sighting) -> bool {
        match self {
            SightingFilter::All => true,
            SightingFilter::Cats => sighting.kind == PetKind::Cat,
            SightingFilter::Dogs => sighting.kind == PetKind::Dog,
            SightingFilter::Other => sighting.kind == PetKind::Other,
        }
    }
}

/// In-memory sighting log, newest first
#[derive(Debug, Default)]
pub struct SightingBoard {
    sightings: Vec<Sighting>,
}

impl SightingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new sighting, assigning id and timestamp
    ///
    /// The rating is clamped to the valid star range.
    pub fn add(&mut self, new: NewSighting) -> &Sighting {
        let sighting = Sighting {
            id: Uuid::new_v4(),
            photo_path: new.photo_path,
            kind: new.kind,
            name: new.name,
            rating: new.rating.clamp(rating::MIN, rating::MAX),
            description: new.description,
            location: new.location,
            spotted_at: Local::now(),
        };

        info!(id = %sighting.id, kind = %sighting.kind, "Sighting recorded");

        self.sightings.insert(0, sighting);
        &self.sightings[0]
    }

    /// Sightings passing the given filter, newest first
    pub fn filtered(&self, filter: SightingFilter) -> Vec<&Sighting> {
        self.sightings
            .iter()
            .filter(|s| filter.matches(s))
            .collect()
    }

    /// All sightings, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Sighting> {
        self.sightings.iter()
    }

    pub fn len(&self) -> usize {
        self.sightings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sightings.is_empty()
    }
}
