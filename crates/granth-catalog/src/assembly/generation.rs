//! Per-scope request generations.
//!
//! A view takes a ticket when it starts loading a scope. Abandoning the view
//! bumps the generation, so a result that lands afterwards is recognisably
//! stale and gets dropped instead of applied.

use dashmap::DashMap;

use granth_core::models::Scope;

/// Identifies one view's interest in a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTicket {
    scope: Scope,
    generation: u64,
}

impl ViewTicket {
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct ViewTracker {
    generations: DashMap<Scope, u64>,
}

impl ViewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new view of `scope`. Any older ticket for it goes stale.
    pub fn open(&self, scope: &Scope) -> ViewTicket {
        let mut entry = self.generations.entry(scope.clone()).or_insert(0);
        *entry += 1;
        ViewTicket {
            scope: scope.clone(),
            generation: *entry,
        }
    }

    /// The view went away. No-op if the ticket is already stale.
    pub fn abandon(&self, ticket: &ViewTicket) {
        if let Some(mut current) = self.generations.get_mut(&ticket.scope) {
            if *current == ticket.generation {
                *current += 1;
            }
        }
    }

    pub fn is_current(&self, ticket: &ViewTicket) -> bool {
        self.generations
            .get(&ticket.scope)
            .is_some_and(|current| *current == ticket.generation)
    }
}
