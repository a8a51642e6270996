//! Panel entities

use crate::core::error::DomainError;
use crate::core::model::Model;
use crate::core::slug::slugify;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable identifier of a worker within a panel (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an identifier from a display name.
    pub fn from_name(name: &str) -> Self {
        Self(slugify(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of discussion rounds in a session (Value Object)
///
/// Always within [`RoundCount::MIN`]..=[`RoundCount::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundCount(u8);

impl RoundCount {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 4;

    /// Validate an explicit round override.
    pub fn new(rounds: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&rounds) {
            Ok(Self(rounds))
        } else {
            Err(DomainError::InvalidRounds {
                got: rounds,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    /// Clamp a suggested round count into the valid range.
    pub fn clamped(suggested: i64) -> Self {
        Self(suggested.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for RoundCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl std::fmt::Display for RoundCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One worker of the panel (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerDescriptor {
    /// Stable identifier derived from the display name
    pub id: WorkerId,
    /// Display name, never empty
    pub name: String,
    /// Persona / style hint for the worker's voice
    pub persona: String,
    /// Ordered responsibilities
    pub focus: Vec<String>,
    /// Preferred backing model, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_hint: Option<Model>,
}

impl WorkerDescriptor {
    /// Create a worker whose identifier is derived from `name`.
    pub fn new(name: impl Into<String>, persona: impl Into<String>, focus: Vec<String>) -> Self {
        let name = name.into();
        Self {
            id: WorkerId::from_name(&name),
            name,
            persona: persona.into(),
            focus,
            model_hint: None,
        }
    }

    pub fn with_model_hint(mut self, model: Model) -> Self {
        self.model_hint = Some(model);
        self
    }

    pub fn with_id(mut self, id: WorkerId) -> Self {
        self.id = id;
        self
    }
}

/// How a panel came to be
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelOrigin {
    /// Proposed by the panel designer and normalised
    Designed,
    /// Canonical fallback panel substituted because design degraded
    Fallback { reason: String },
}

impl PanelOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, PanelOrigin::Fallback { .. })
    }
}

/// Panel specification for one session (Entity, immutable once built)
///
/// Invariants: at least one worker; worker identifiers are unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSpec {
    rounds: RoundCount,
    shared_objective: String,
    workers: Vec<WorkerDescriptor>,
    origin: PanelOrigin,
}

impl PanelSpec {
    /// Build a panel, disambiguating colliding worker identifiers.
    ///
    /// When two workers slugify to the same identifier, later ones receive
    /// `-2`, `-3`, ... suffixes in panel order.
    pub fn new(
        rounds: RoundCount,
        shared_objective: impl Into<String>,
        workers: Vec<WorkerDescriptor>,
        origin: PanelOrigin,
    ) -> Result<Self, DomainError> {
        if workers.is_empty() {
            return Err(DomainError::EmptyPanel);
        }

        Ok(Self {
            rounds,
            shared_objective: shared_objective.into(),
            workers: disambiguate_ids(workers),
            origin,
        })
    }

    /// Build a panel from workers known to be non-empty.
    pub(super) fn from_trusted(
        rounds: RoundCount,
        shared_objective: &str,
        workers: Vec<WorkerDescriptor>,
        origin: PanelOrigin,
    ) -> Self {
        debug_assert!(!workers.is_empty());
        Self {
            rounds,
            shared_objective: shared_objective.to_string(),
            workers: disambiguate_ids(workers),
            origin,
        }
    }

    pub fn rounds(&self) -> RoundCount {
        self.rounds
    }

    pub fn shared_objective(&self) -> &str {
        &self.shared_objective
    }

    /// Workers in panel-declaration order.
    pub fn workers(&self) -> &[WorkerDescriptor] {
        &self.workers
    }

    pub fn origin(&self) -> &PanelOrigin {
        &self.origin
    }

    pub fn worker(&self, id: &WorkerId) -> Option<&WorkerDescriptor> {
        self.workers.iter().find(|w| &w.id == id)
    }
}

fn disambiguate_ids(workers: Vec<WorkerDescriptor>) -> Vec<WorkerDescriptor> {
    let mut seen: HashMap<WorkerId, usize> = HashMap::new();
    let mut taken: Vec<WorkerId> = Vec::with_capacity(workers.len());

    workers
        .into_iter()
        .map(|worker| {
            let base = worker.id.clone();
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            if *count == 1 && !taken.contains(&base) {
                taken.push(base);
                return worker;
            }

            let mut suffix = *count;
            let mut candidate = WorkerId::new(format!("{}-{}", base, suffix));
            while taken.contains(&candidate) {
                suffix += 1;
                candidate = WorkerId::new(format!("{}-{}", base, suffix));
            }
            taken.push(candidate.clone());
            worker.with_id(candidate)
        })
        .collect()
}
