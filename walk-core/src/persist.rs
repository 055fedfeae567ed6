//! Saving and loading the essential state of a [`WalkingSystem`].
//!
//! Only what is needed to resume a run is stored: walkers (start and
//! current positions), the relation graph, the iteration count, the
//! colormap and the update policy. Curves and rings are regenerated with
//! [`WalkingSystem::compute_vectrices`] after loading.

use crate::{
    colormap::ColorMap,
    config::UpdatePolicy,
    error::{Result, WalkError},
    relations::RelationGraph,
    system::WalkingSystem,
    walker::Walker,
};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};
use tracing::info;

/// Serializable essential state of a [`WalkingSystem`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemRecord {
    pub walkers: Vec<Walker>,
    pub relations: RelationGraph,
    pub iterations: usize,
    pub cmap: ColorMap,
    #[serde(default)]
    pub policy: UpdatePolicy,
}

impl From<&WalkingSystem> for SystemRecord {
    fn from(system: &WalkingSystem) -> Self {
        Self {
            walkers: system.walkers().to_vec(),
            relations: system.relations().clone(),
            iterations: system.iterations(),
            cmap: system.cmap(),
            policy: system.policy(),
        }
    }
}

impl TryFrom<SystemRecord> for WalkingSystem {
    type Error = WalkError;

    fn try_from(record: SystemRecord) -> Result<Self> {
        WalkingSystem::from_parts(
            record.walkers,
            record.relations,
            record.iterations,
            record.cmap,
            record.policy,
        )
    }
}

impl WalkingSystem {
    /// Writes the essential state as JSON.
    ///
    /// ### Errors
    /// [`WalkError::NonFinite`] or [`WalkError::NonFiniteRelation`] when a
    /// position or coefficient is infinite or NaN (JSON cannot hold them),
    /// in which case nothing is written.
    pub fn write_to(&self, writer: impl Write) -> Result<()> {
        self.ensure_finite()?;
        serde_json::to_writer_pretty(writer, &SystemRecord::from(self))?;
        Ok(())
    }

    /// Reads a system written by [`WalkingSystem::write_to`].
    ///
    /// The relation graph is validated as in [`WalkingSystem::new`].
    pub fn read_from(reader: impl Read) -> Result<Self> {
        let record: SystemRecord = serde_json::from_reader(reader)?;
        record.try_into()
    }

    /// Saves the system to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.ensure_finite()?;
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), walkers = self.walkers().len(), "saved walking system");
        Ok(())
    }

    /// Diverging systems end up with infinite positions; those would be
    /// written as `null` and could not be read back.
    fn ensure_finite(&self) -> Result<()> {
        for (walker, w) in self.walkers().iter().enumerate() {
            if !(w.start_position().is_finite() && w.position.is_finite()) {
                return Err(WalkError::NonFinite { walker });
            }
        }
        let relations = self.relations();
        for from in 0..relations.len() {
            if let Some((to, _)) = relations.relations_of(from).find(|(_, c)| !c.is_finite()) {
                return Err(WalkError::NonFiniteRelation { from, to });
            }
        }
        Ok(())
    }

    /// Loads a system saved with [`WalkingSystem::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let system = Self::read_from(BufReader::new(File::open(path)?))?;
        info!(path = %path.display(), walkers = system.walkers().len(), "loaded walking system");
        Ok(system)
    }
}
