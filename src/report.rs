//! JSON summary of a reconstruction run.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::graph::InteractionNetwork;
use crate::pathway::{HaltReason, Phase, Reconstruction};
use crate::{Error, Result, Weight};

/// One absorbed path, with node identifiers
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub iteration: usize,
    pub phase: Phase,
    pub from: String,
    pub to: String,
    pub cost: f64,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub halt: HaltReason,
    pub iterations: usize,
    pub nodes: usize,
    pub edges: usize,
    pub steps: Vec<StepReport>,
    /// Sources and targets left unconnected
    pub unreached: Vec<String>,
}

impl RunReport {
    pub fn new(reconstruction: &Reconstruction<Weight>, network: &InteractionNetwork<Weight>) -> Result<Self> {
        let label = |v: usize| {
            network
                .label(v)
                .map(str::to_string)
                .ok_or(Error::InvalidVertex(v))
        };

        let steps = reconstruction
            .steps
            .iter()
            .enumerate()
            .map(|(iteration, step)| -> Result<StepReport> {
                Ok(StepReport {
                    iteration,
                    phase: step.phase,
                    from: label(step.from)?,
                    to: label(step.to)?,
                    cost: step.cost.into_inner(),
                    path: network.labels_of(&step.path)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RunReport {
            halt: reconstruction.halt,
            iterations: reconstruction.iterations(),
            nodes: reconstruction.pathway.node_count(),
            edges: reconstruction.pathway.edge_count(),
            steps,
            unreached: network.labels_of(&reconstruction.unreached)?,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as pretty-printed JSON, creating parent directories
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, json).map_err(io_error)
    }
}
