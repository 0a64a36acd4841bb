//! Candidate sets for season changes.
//!
//! Every change to a scope's seasons is checked against the set the scope
//! would hold afterwards, never against the change alone.

use crate::{CoverageError, CoverageValidator, MonthDay, Season};

/// A requested change to one scope's seasons.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<Id> {
    /// Add a season with a new id.
    Create(Season<Id>),
    /// Replace the season carrying the same id.
    Update(Season<Id>),
    /// Remove the season with this id.
    Delete(Id),
    /// Swap the whole set at once, e.g. to split one season into two.
    ReplaceAll(Vec<Season<Id>>),
}

impl<Id> Mutation<Id> {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::ReplaceAll(_) => "replace_all",
        }
    }
}

/// Why a change was refused before anything was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookError {
    #[error("Season not found")]
    NotFound,

    #[error("A season with this id already exists")]
    DuplicateId,

    #[error(transparent)]
    Coverage(#[from] CoverageError),
}

/// The seasons of one scope, as last read from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonBook<Id> {
    seasons: Vec<Season<Id>>,
}

impl<Id> Default for SeasonBook<Id> {
    fn default() -> Self {
        Self { seasons: Vec::new() }
    }
}

impl<Id: PartialEq + Clone> SeasonBook<Id> {
    pub const fn new(seasons: Vec<Season<Id>>) -> Self {
        Self { seasons }
    }

    pub fn seasons(&self) -> &[Season<Id>] {
        &self.seasons
    }

    pub fn into_seasons(self) -> Vec<Season<Id>> {
        self.seasons
    }

    pub fn get(&self, id: &Id) -> Option<&Season<Id>> {
        self.seasons.iter().find(|s| s.id() == id)
    }

    /// The season a given day falls in, if any.
    pub fn season_on(&self, date: &MonthDay) -> Option<&Season<Id>> {
        self.seasons.iter().find(|s| s.range().contains(date))
    }

    /// Assembles the set this scope would hold after `mutation`.
    ///
    /// Create appends the new season, update drops the old version and appends
    /// the edited one, delete drops the season.
    ///
    /// # Errors
    /// Returns `BookError::NotFound` for an update or delete of an unknown id
    /// and `BookError::DuplicateId` when an id would appear twice.
    pub fn candidate(&self, mutation: &Mutation<Id>) -> Result<Vec<Season<Id>>, BookError> {
        match mutation {
            Mutation::Create(season) => {
                if self.get(season.id()).is_some() {
                    return Err(BookError::DuplicateId);
                }
                let mut candidate = self.seasons.clone();
                candidate.push(season.clone());
                Ok(candidate)
            },
            Mutation::Update(season) => {
                let mut candidate = self.without(season.id())?;
                candidate.push(season.clone());
                Ok(candidate)
            },
            Mutation::Delete(id) => self.without(id),
            Mutation::ReplaceAll(seasons) => {
                for (i, season) in seasons.iter().enumerate() {
                    if seasons[..i].iter().any(|other| other.id() == season.id()) {
                        return Err(BookError::DuplicateId);
                    }
                }
                Ok(seasons.clone())
            },
        }
    }

    /// Assembles and validates the set after `mutation`.
    /// An empty result is accepted: coverage is only owed once a season exists.
    ///
    /// # Errors
    /// Returns the assembly errors of [`SeasonBook::candidate`] and
    /// `BookError::Coverage` when the resulting set does not partition the year.
    pub fn check(&self, mutation: &Mutation<Id>, validator: &CoverageValidator) -> Result<Vec<Season<Id>>, BookError> {
        let candidate = self.candidate(mutation)?;
        if !candidate.is_empty() {
            validator.check(&candidate)?;
        }
        Ok(candidate)
    }

    /// Validates `mutation` and, if it passes, makes the result this book's contents.
    ///
    /// # Errors
    /// See [`SeasonBook::check`]; on error the book is left unchanged.
    pub fn apply(&mut self, mutation: &Mutation<Id>, validator: &CoverageValidator) -> Result<(), BookError> {
        self.seasons = self.check(mutation, validator)?;
        Ok(())
    }

    fn without(&self, id: &Id) -> Result<Vec<Season<Id>>, BookError> {
        if self.get(id).is_none() {
            return Err(BookError::NotFound);
        }
        Ok(self.seasons.iter().filter(|s| s.id() != id).cloned().collect())
    }
}
