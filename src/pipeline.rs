//! End-to-end run: configuration in, two workbooks out.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::assembler::{Assembler, Assembly};
use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::loaders::{orderfile, registrants, IdentifierMap, PlenaryTable};
use crate::metadata::MetadataStore;
use crate::models::Attendee;
use crate::reconciler::reconcile;
use crate::writer;

/// Everything a run produces before it is written out
#[derive(Debug)]
pub struct Output {
    pub assembly: Assembly,
    pub attendees: Vec<Attendee>,
}

/// Load every input named by the configuration and build the output
/// records. Nothing is written.
pub fn run(config: &Config, diag: &mut Diagnostics) -> Result<Output> {
    info!("Parsing mapping files ...");
    let mut mappings = HashMap::new();
    for (event, path) in &config.mapping_files {
        mappings.insert(event.clone(), IdentifierMap::from_file(path)?);
    }

    info!("Parsing metadata files ...");
    let store = MetadataStore::from_files(
        &config.xml_files,
        config
            .extra_metadata_files
            .iter()
            .map(|(event, path)| (event.as_str(), path.as_path())),
        diag,
    )?;

    let plenary = match &config.plenary_info_file {
        Some(path) => {
            info!("Parsing plenary info file ...");
            PlenaryTable::from_file(path)?
        }
        None => PlenaryTable::default(),
    };

    info!("Parsing order files ...");
    let mut schedules = Vec::with_capacity(config.order_files.len());
    for (event, path) in &config.order_files {
        schedules.push(orderfile::load_file(event, path, diag)?);
    }

    info!("Assembling agenda rows ...");
    let mut assembly = Assembler::new(config, &store, &mappings, &plenary).assemble(&schedules, diag)?;

    let attendees = match &config.attendees_file {
        Some(path) => {
            info!("Classifying registrants into speakers and attendees ...");
            let registrants = registrants::load_file(path, diag)?;
            reconcile(&registrants, &mut assembly.speakers, diag)
        }
        None => Vec::new(),
    };

    info!(
        "Built {} agenda rows, {} speakers, {} attendees",
        assembly.rows.len(),
        assembly.speakers.len(),
        attendees.len()
    );
    Ok(Output {
        assembly,
        attendees,
    })
}

/// Run the whole pipeline and write both workbooks. On any error no output
/// file is left behind: if the attendees workbook cannot be written, the
/// agenda workbook written just before it is removed again.
pub fn generate(
    config_path: &Path,
    agenda_path: &Path,
    attendees_path: &Path,
    diag: &mut Diagnostics,
) -> Result<Output> {
    let config = Config::from_file(config_path)?;
    let output = run(&config, diag)?;

    let agenda = writer::render_agenda(
        agenda_path,
        &output.assembly.rows,
        &output.assembly.speakers,
    )?;
    let attendees = writer::render_attendees(attendees_path, &output.attendees)?;

    info!("Writing {} ...", agenda_path.display());
    writer::write_output(agenda_path, &agenda)?;
    info!("Writing {} ...", attendees_path.display());
    if let Err(e) = writer::write_output(attendees_path, &attendees) {
        // never leave one workbook without the other
        if let Err(remove_err) = std::fs::remove_file(agenda_path) {
            warn!("Failed to remove {}: {}", agenda_path.display(), remove_err);
        }
        return Err(e);
    }

    Ok(output)
}
