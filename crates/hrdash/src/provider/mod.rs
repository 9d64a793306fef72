//! Employee record providers.
//!
//! A [`RecordProvider`] never fails outright. Transport and format problems
//! come back as [`Fetched::Unavailable`] so callers can show an empty state,
//! or tell "no employees" apart from "could not fetch" when that matters.

pub mod enrich;
mod http;
mod local;

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tracing::warn;

pub use enrich::{Enricher, RawUser, DEPARTMENTS};
pub use http::HttpProvider;
pub use local::{FileProvider, StaticProvider};

use crate::error::{Error, Result};
use crate::model::{Employee, EmployeeId};

/// Outcome of a provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The provider answered.
    Data(T),
    /// The provider could not be reached or answered with garbage.
    Unavailable {
        /// Human-readable cause.
        reason: String,
    },
}

impl<T> Fetched<T> {
    /// Whether the provider answered.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Borrow the data, if any.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Unavailable { .. } => None,
        }
    }

    /// Transform the data, keeping an unavailable outcome as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Data(data) => Fetched::Data(f(data)),
            Self::Unavailable { reason } => Fetched::Unavailable { reason },
        }
    }

    /// Log and convert a provider error, `what` names the request.
    pub fn from_result(result: Result<T>, what: &str) -> Self {
        match result {
            Ok(data) => Self::Data(data),
            Err(e) => {
                warn!(error = %e, "Failed to fetch {what}");
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl<T: Default> Fetched<T> {
    /// The data, or an empty value when unavailable.
    pub fn into_data(self) -> T {
        match self {
            Self::Data(data) => data,
            Self::Unavailable { .. } => T::default(),
        }
    }
}

/// Source of employee records.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// All employees the provider serves.
    async fn fetch_employees(&self) -> Fetched<Vec<Employee>>;

    /// One employee. `Data(None)` means the provider has no such record.
    async fn fetch_employee_by_id(&self, id: EmployeeId) -> Fetched<Option<Employee>>;
}

/// An [`Enricher`] paired with the random source it draws from.
#[derive(Debug)]
pub(crate) struct SeededEnricher {
    enricher: Enricher,
    rng: Mutex<StdRng>,
}

impl SeededEnricher {
    /// Seeded when `seed` is set, from OS entropy otherwise.
    pub(crate) fn new(enricher: Enricher, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            enricher,
            rng: Mutex::new(rng),
        }
    }

    pub(crate) fn enrich(&self, user: RawUser) -> Employee {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        self.enricher.enrich(user, &mut *rng)
    }

    pub(crate) fn enrich_all(&self, users: Vec<RawUser>) -> Vec<Employee> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        users
            .into_iter()
            .map(|user| self.enricher.enrich(user, &mut *rng))
            .collect()
    }
}

/// Extract raw users from a `{"users": [...]}` payload.
///
/// Entries that do not decode are skipped with a warning.
pub(crate) fn decode_user_list(source: &str, payload: Value) -> Result<Vec<RawUser>> {
    let Value::Object(mut body) = payload else {
        return Err(Error::invalid_response(source, "expected a JSON object"));
    };
    let Some(Value::Array(entries)) = body.remove("users") else {
        return Err(Error::invalid_response(source, "missing 'users' array"));
    };

    let mut users = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawUser>(entry) {
            Ok(user) => users.push(user),
            Err(e) => warn!(source, index, error = %e, "Skipping undecodable user record"),
        }
    }
    Ok(users)
}
