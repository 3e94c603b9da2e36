//! Row filter, row mapper and the run driver.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::{CoordinatePolicy, RunConfig};
use crate::coordinates;
use crate::csv_loader::{LocodeReader, LocodeRow};
use crate::error::{ConvertError, Result};
use crate::tables::{
    Actor, ActorName, DataSource, Publisher, Territory, ACTOR_TYPE_CITY, UNDETERMINED_LANGUAGE,
};
use crate::writer::{validate_contract, write_table, TableWriter};

/// Function classifier digit for "road terminal" at position 3.
const ROAD_TERMINAL_FUNCTION: char = '3';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoLocationCode,
    NotRoadTerminal,
}

/// Rows to append for one qualifying input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRows {
    pub actor: Actor,
    pub names: Vec<ActorName>,
    pub territory: Option<Territory>,
}

/// Decide whether a row is converted at all.
///
/// The function check only looks at the third classifier character, which
/// also admits locations that are road terminals among other things.
pub fn check_row(row: &LocodeRow) -> std::result::Result<(), SkipReason> {
    if row.location.is_empty() {
        return Err(SkipReason::NoLocationCode);
    }
    if row.function.chars().nth(2) != Some(ROAD_TERMINAL_FUNCTION) {
        return Err(SkipReason::NotRoadTerminal);
    }
    Ok(())
}

pub fn actor_id(row: &LocodeRow) -> String {
    format!("{}-{}", row.country, row.location)
}

pub fn parent_id(row: &LocodeRow) -> String {
    if row.subdivision.is_empty() {
        row.country.clone()
    } else {
        format!("{}-{}", row.country, row.subdivision)
    }
}

/// Map a row to its output rows, or `None` if the filter rejects it.
pub fn map_row(
    row: &LocodeRow,
    datasource_id: &str,
    policy: CoordinatePolicy,
) -> Result<Option<MappedRows>> {
    if check_row(row).is_err() {
        return Ok(None);
    }

    let actor_id = actor_id(row);

    let actor = Actor {
        actor_id: actor_id.clone(),
        kind: ACTOR_TYPE_CITY.to_string(),
        name: row.name.clone(),
        is_part_of: parent_id(row),
        datasource_id: datasource_id.to_string(),
    };

    let name_row = |name: &str| ActorName {
        actor_id: actor_id.clone(),
        name: name.to_string(),
        language: UNDETERMINED_LANGUAGE.to_string(),
        preferred: 0,
        datasource_id: datasource_id.to_string(),
    };
    let mut names = vec![name_row(&row.name)];
    if row.name_wo_diacritics != row.name {
        names.push(name_row(&row.name_wo_diacritics));
    }

    let territory = if row.coordinates.is_empty() {
        None
    } else {
        match coordinates::decode(&row.coordinates) {
            Ok(c) => Some(Territory {
                actor_id: actor_id.clone(),
                lat: c.lat,
                lng: c.lng,
                datasource_id: datasource_id.to_string(),
            }),
            Err(e) if policy == CoordinatePolicy::Lenient => {
                warn!(actor_id = %actor_id, error = %e, "omitting territory");
                None
            }
            Err(e) => return Err(e),
        }
    };

    Ok(Some(MappedRows {
        actor,
        names,
        territory,
    }))
}

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_read: u64,
    pub skipped_no_location: u64,
    pub skipped_function: u64,
    pub actors: u64,
    pub actor_names: u64,
    pub territories: u64,
}

impl RunSummary {
    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NoLocationCode => self.skipped_no_location += 1,
            SkipReason::NotRoadTerminal => self.skipped_function += 1,
        }
    }
}

/// The three incrementally written tables.
struct Outputs {
    actors: TableWriter<Actor>,
    actor_names: TableWriter<ActorName>,
    territories: TableWriter<Territory>,
}

impl Outputs {
    fn create(dir: &Path) -> Result<Self> {
        Ok(Self {
            actors: TableWriter::create(dir)?,
            actor_names: TableWriter::create(dir)?,
            territories: TableWriter::create(dir)?,
        })
    }

    fn append(&mut self, mapped: &MappedRows) -> Result<()> {
        self.actors.append(&mapped.actor)?;
        for name in &mapped.names {
            self.actor_names.append(name)?;
        }
        if let Some(territory) = &mapped.territory {
            self.territories.append(territory)?;
        }
        Ok(())
    }

    fn finish(self, summary: &mut RunSummary) -> Result<()> {
        summary.actors = self.actors.finish()?;
        summary.actor_names = self.actor_names.finish()?;
        summary.territories = self.territories.finish()?;
        Ok(())
    }
}

/// Run the whole conversion described by `config`.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    // 1. Validate before touching any file
    config.validate()?;
    validate_contract::<Publisher>()?;
    validate_contract::<DataSource>()?;
    validate_contract::<Actor>()?;
    validate_contract::<ActorName>()?;
    validate_contract::<Territory>()?;

    let inputs = config.input_paths();
    if let Some(path) = inputs.iter().find(|p| !p.is_file()) {
        return Err(ConvertError::MissingInputFile { path: path.clone() });
    }

    info!(
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        datasource = %config.datasource.datasource_id,
        "starting conversion"
    );

    // 2. Static tables
    fs::create_dir_all(&config.output_dir).map_err(|e| ConvertError::Write {
        path: config.output_dir.clone(),
        source: e.into(),
    })?;
    write_table(&config.output_dir, std::slice::from_ref(&config.publisher))?;
    write_table(&config.output_dir, std::slice::from_ref(&config.datasource))?;

    // 3. Scan the code list parts in order
    let mut outputs = Outputs::create(&config.output_dir)?;
    let mut summary = RunSummary::default();
    let datasource_id = config.datasource.datasource_id.as_str();

    for path in &inputs {
        let mut reader = LocodeReader::open(path, config.encoding)?;
        info!(path = %reader.path().display(), "reading code list part");

        let rows_before = summary.rows_read;
        let actors_before = outputs.actors.rows();
        while let Some(row) = reader.next_row()? {
            summary.rows_read += 1;
            if let Err(reason) = check_row(&row) {
                debug!(country = %row.country, location = %row.location, ?reason, "skipping row");
                summary.record_skip(reason);
                continue;
            }
            if let Some(mapped) = map_row(&row, datasource_id, config.coordinates)? {
                outputs.append(&mapped)?;
            }
        }

        info!(
            path = %path.display(),
            rows = summary.rows_read - rows_before,
            converted = outputs.actors.rows() - actors_before,
            "finished code list part"
        );
    }

    // 4. Close all outputs
    outputs.finish(&mut summary)?;

    info!(
        rows = summary.rows_read,
        actors = summary.actors,
        actor_names = summary.actor_names,
        territories = summary.territories,
        "conversion complete"
    );
    Ok(summary)
}
