//! Concert definition

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use core_kernel::ConcertId;

use crate::performer::Performer;

/// A concert with its schedule and line-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concert {
    /// Unique identifier
    pub id: ConcertId,
    /// Concert name
    pub name: String,
    /// Promotional image file name
    pub image_name: Option<String>,
    /// Description
    pub blurb: Option<String>,
    /// Scheduled dates, ascending
    pub dates: Vec<NaiveDateTime>,
    /// Performers appearing at every date
    pub performers: Vec<Performer>,
}

impl Concert {
    /// Creates a concert with no dates or performers
    pub fn new(id: ConcertId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_name: None,
            blurb: None,
            dates: Vec::new(),
            performers: Vec::new(),
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

    /// Adds a scheduled date, keeping the schedule sorted and free of duplicates
    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        if let Err(pos) = self.dates.binary_search(&date) {
            self.dates.insert(pos, date);
        }
        self
    }

    /// Adds a performer to the line-up
    pub fn with_performer(mut self, performer: Performer) -> Self {
        self.performers.push(performer);
        self
    }

    /// Checks whether the concert runs on the given date
    pub fn is_scheduled_on(&self, date: NaiveDateTime) -> bool {
        self.dates.binary_search(&date).is_ok()
    }
}
