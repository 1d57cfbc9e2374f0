//! High-level assembly protocols built on top of a [`Mix`](crate::mix::Mix).
//!
//! Each protocol is a thin orchestration layer: it builds one or more mixes, drives their
//! cycle streams or shortest-path searches, and collects the result into an
//! [`AssemblySimulation`]: errors and warnings alongside whatever constructs were produced,
//! rather than unwinding past this boundary.

pub mod basic;
pub mod combinatorial;

use crate::{error::AssemblyError, error::Warning, mix::Mix, record::SeqRecord};

/// The outcome of running an orchestrator: produced constructs, the mix(es) used to produce
/// them, and any errors/warnings accumulated along the way.
pub struct AssemblySimulation {
    pub construct_records: Vec<SeqRecord>,
    pub mixes: Vec<Mix>,
    pub errors: Vec<AssemblyError>,
    pub warnings: Vec<Warning>,
}

impl AssemblySimulation {
    pub fn empty() -> Self {
        Self {
            construct_records: Vec::new(),
            mixes: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn with_error(error: AssemblyError) -> Self {
        Self {
            construct_records: Vec::new(),
            mixes: Vec::new(),
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
