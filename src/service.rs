//! Season changes against persistent storage.
//!
//! Reading a scope's seasons, validating the candidate set and writing the
//! change must not interleave with another change to the same scope, or two
//! changes that each pass against the same snapshot can together break the
//! partition. [`SeasonService`] holds one lock per scope for the whole
//! read-validate-write sequence. Stores shared between processes must also run
//! their writes in a serializable transaction.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::{BookError, ConfigError, CoverageConfig, CoverageReport, CoverageValidator, Mutation, Season, SeasonBook};

/// Storage for seasons, keyed by scope (e.g. a company).
pub trait SeasonStore {
    type Scope: Eq + Hash + Clone + Debug;
    type Id: PartialEq + Clone + Debug;
    type Error: std::error::Error + 'static;

    /// All seasons currently stored for `scope`, in storage order.
    fn load(&self, scope: &Self::Scope) -> Result<Vec<Season<Self::Id>>, Self::Error>;

    fn insert(&self, scope: &Self::Scope, season: &Season<Self::Id>) -> Result<(), Self::Error>;

    /// Overwrites the stored season with the same id.
    fn replace(&self, scope: &Self::Scope, season: &Season<Self::Id>) -> Result<(), Self::Error>;

    fn remove(&self, scope: &Self::Scope, id: &Self::Id) -> Result<(), Self::Error>;

    fn replace_all(&self, scope: &Self::Scope, seasons: &[Season<Self::Id>]) -> Result<(), Self::Error>;
}

/// Error type for season changes made through a [`SeasonService`].
#[derive(Debug, thiserror::Error)]
pub enum SeasonError<E: std::error::Error + 'static> {
    /// The change was refused; nothing was written.
    #[error(transparent)]
    Rejected(#[from] BookError),

    /// The store failed.
    #[error("Season storage failed: {0}")]
    Store(#[source] E),
}

/// Validated create / update / delete of seasons over a [`SeasonStore`].
pub struct SeasonService<S: SeasonStore> {
    store: S,
    validator: CoverageValidator,
    locks: Mutex<HashMap<S::Scope, Arc<Mutex<()>>>>,
}

impl<S: SeasonStore> SeasonService<S> {
    /// # Errors
    /// Returns `ConfigError` if `config` is out of range.
    pub fn new(store: S, config: CoverageConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            store,
            validator: CoverageValidator::new(config)?,
            locks: Mutex::new(HashMap::new()),
        })
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn validator(&self) -> &CoverageValidator {
        &self.validator
    }

    /// # Errors
    /// Returns `SeasonError::Store` if loading fails.
    pub fn seasons(&self, scope: &S::Scope) -> Result<Vec<Season<S::Id>>, SeasonError<S::Error>> {
        self.store.load(scope).map_err(SeasonError::Store)
    }

    /// # Errors
    /// See [`SeasonService::apply`].
    pub fn create(&self, scope: &S::Scope, season: Season<S::Id>) -> Result<(), SeasonError<S::Error>> {
        self.apply(scope, Mutation::Create(season))
    }

    /// # Errors
    /// See [`SeasonService::apply`].
    pub fn update(&self, scope: &S::Scope, season: Season<S::Id>) -> Result<(), SeasonError<S::Error>> {
        self.apply(scope, Mutation::Update(season))
    }

    /// # Errors
    /// See [`SeasonService::apply`].
    pub fn delete(&self, scope: &S::Scope, id: S::Id) -> Result<(), SeasonError<S::Error>> {
        self.apply(scope, Mutation::Delete(id))
    }

    /// # Errors
    /// See [`SeasonService::apply`].
    pub fn replace_all(&self, scope: &S::Scope, seasons: Vec<Season<S::Id>>) -> Result<(), SeasonError<S::Error>> {
        self.apply(scope, Mutation::ReplaceAll(seasons))
    }

    /// Checks `mutation` against the stored seasons without writing, for
    /// showing a verdict before the user submits.
    ///
    /// # Errors
    /// Returns `SeasonError::Store` if loading fails or
    /// `SeasonError::Rejected` for an unknown or duplicate id.
    pub fn preview(&self, scope: &S::Scope, mutation: &Mutation<S::Id>) -> Result<CoverageReport, SeasonError<S::Error>> {
        let book = SeasonBook::new(self.seasons(scope)?);
        match book.check(mutation, &self.validator) {
            Ok(_) => Ok(CoverageReport::ok()),
            Err(BookError::Coverage(err)) => Ok(err.into()),
            Err(err) => Err(err.into()),
        }
    }

    /// Loads the scope, validates the set it would hold after `mutation` and
    /// writes the change, all under the scope's lock.
    ///
    /// # Errors
    /// Returns `SeasonError::Rejected` when the change is refused (nothing is
    /// written) and `SeasonError::Store` when the store fails.
    #[tracing::instrument(level = "debug", skip(self, mutation), fields(kind = mutation.kind()))]
    pub fn apply(&self, scope: &S::Scope, mutation: Mutation<S::Id>) -> Result<(), SeasonError<S::Error>> {
        let scope_lock = self.scope_lock(scope);
        let result = {
            let _guard = scope_lock.lock();
            self.apply_locked(scope, &mutation)
        };
        self.release_scope_lock(scope, &scope_lock);
        result
    }

    fn apply_locked(&self, scope: &S::Scope, mutation: &Mutation<S::Id>) -> Result<(), SeasonError<S::Error>> {
        let book = SeasonBook::new(self.seasons(scope)?);
        let candidate = match book.check(mutation, &self.validator) {
            Ok(candidate) => candidate,
            Err(err) => {
                debug!(%err, "season change rejected");
                return Err(err.into());
            },
        };

        match mutation {
            Mutation::Create(season) => self.store.insert(scope, season),
            Mutation::Update(season) => self.store.replace(scope, season),
            Mutation::Delete(id) => self.store.remove(scope, id),
            Mutation::ReplaceAll(seasons) => self.store.replace_all(scope, seasons),
        }
        .map_err(SeasonError::Store)?;

        debug!(seasons = candidate.len(), "season change committed");
        Ok(())
    }

    fn scope_lock(&self, scope: &S::Scope) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        Arc::clone(locks.entry(scope.clone()).or_default())
    }

    /// Drops the scope's entry once no other caller holds or waits on it.
    /// Handles are only cloned under `locks`, so the count cannot grow here.
    fn release_scope_lock(&self, scope: &S::Scope, scope_lock: &Arc<Mutex<()>>) {
        let mut locks = self.locks.lock();
        // One reference in the map, one held here
        if Arc::strong_count(scope_lock) == 2 {
            locks.remove(scope);
        }
    }
}

/// Error type for [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("No stored season with id {0}")]
    MissingSeason(String),
}

/// In-memory [`SeasonStore`].
#[derive(Debug)]
pub struct MemoryStore<Scope, Id> {
    scopes: RwLock<HashMap<Scope, Vec<Season<Id>>>>,
}

impl<Scope, Id> Default for MemoryStore<Scope, Id> {
    fn default() -> Self {
        Self {
            scopes: RwLock::new(HashMap::new()),
        }
    }
}

impl<Scope, Id> MemoryStore<Scope, Id> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<Scope, Id> SeasonStore for MemoryStore<Scope, Id>
where
    Scope: Eq + Hash + Clone + Debug,
    Id: PartialEq + Clone + Debug,
{
    type Error = MemoryStoreError;
    type Id = Id;
    type Scope = Scope;

    fn load(&self, scope: &Scope) -> Result<Vec<Season<Id>>, Self::Error> {
        Ok(self.scopes.read().get(scope).cloned().unwrap_or_default())
    }

    fn insert(&self, scope: &Scope, season: &Season<Id>) -> Result<(), Self::Error> {
        self.scopes.write().entry(scope.clone()).or_default().push(season.clone());
        Ok(())
    }

    fn replace(&self, scope: &Scope, season: &Season<Id>) -> Result<(), Self::Error> {
        let mut scopes = self.scopes.write();
        let stored = scopes
            .get_mut(scope)
            .and_then(|seasons| seasons.iter_mut().find(|s| s.id() == season.id()))
            .ok_or_else(|| MemoryStoreError::MissingSeason(format!("{:?}", season.id())))?;
        *stored = season.clone();
        Ok(())
    }

    fn remove(&self, scope: &Scope, id: &Id) -> Result<(), Self::Error> {
        let mut scopes = self.scopes.write();
        let seasons = scopes
            .get_mut(scope)
            .ok_or_else(|| MemoryStoreError::MissingSeason(format!("{id:?}")))?;
        let before = seasons.len();
        seasons.retain(|s| s.id() != id);
        if seasons.len() == before {
            return Err(MemoryStoreError::MissingSeason(format!("{id:?}")));
        }
        Ok(())
    }

    fn replace_all(&self, scope: &Scope, seasons: &[Season<Id>]) -> Result<(), Self::Error> {
        self.scopes.write().insert(scope.clone(), seasons.to_vec());
        Ok(())
    }
}
