//! Performers and their genres

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CoreError, PerformerId};

/// Musical genre of a performer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Pop,
    HipHop,
    RhythmAndBlues,
    Acappella,
    Metal,
    Rock,
}

impl Genre {
    /// All genres in declaration order
    pub const ALL: [Genre; 6] = [
        Genre::Pop,
        Genre::HipHop,
        Genre::RhythmAndBlues,
        Genre::Acappella,
        Genre::Metal,
        Genre::Rock,
    ];

    /// Returns the canonical name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::HipHop => "HipHop",
            Genre::RhythmAndBlues => "RhythmAndBlues",
            Genre::Acappella => "Acappella",
            Genre::Metal => "Metal",
            Genre::Rock => "Rock",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::validation(format!("unknown genre '{s}'")))
    }
}

/// An act that appears in one or more concerts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performer {
    /// Unique identifier
    pub id: PerformerId,
    /// Stage name
    pub name: String,
    /// Promotional image file name
    pub image_name: Option<String>,
    /// Genre
    pub genre: Genre,
    /// Short biography
    pub blurb: Option<String>,
}

impl Performer {
    /// Creates a performer without image or blurb
    pub fn new(id: PerformerId, name: impl Into<String>, genre: Genre) -> Self {
        Self {
            id,
            name: name.into(),
            image_name: None,
            genre,
            blurb: None,
        }
    }

    /// Sets the image file name
    pub fn with_image(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = Some(image_name.into());
        self
    }

    /// Sets the blurb
    pub fn with_blurb(mut self, blurb: impl Into<String>) -> Self {
        self.blurb = Some(blurb.into());
        self
    }
}
