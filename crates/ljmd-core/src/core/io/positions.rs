use crate::core::models::ensemble::Ensemble;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PositionsError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Non-finite coordinate on row {row}")]
    NonFinite { row: usize },
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
struct PositionRecord {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Serialize)]
struct ForceRecord {
    index: usize,
    x: f32,
    y: f32,
    z: f32,
    fx: f32,
    fy: f32,
    fz: f32,
}

fn csv_error(path: &str, source: csv::Error) -> PositionsError {
    PositionsError::Csv {
        path: path.to_string(),
        source,
    }
}

/// Reads an `x,y,z` CSV table into an ensemble.
pub fn read_from(reader: impl Read, source_name: &str) -> Result<Ensemble, PositionsError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut positions = Vec::new();
    for (row, result) in reader.deserialize::<PositionRecord>().enumerate() {
        let record = result.map_err(|e| csv_error(source_name, e))?;
        if !(record.x.is_finite() && record.y.is_finite() && record.z.is_finite()) {
            return Err(PositionsError::NonFinite { row: row + 1 });
        }
        positions.push(Point3::new(record.x, record.y, record.z));
    }
    Ok(Ensemble::from_positions(&positions))
}

pub fn read_from_path(path: &Path) -> Result<Ensemble, PositionsError> {
    let name = path.to_string_lossy().to_string();
    let file = std::fs::File::open(path).map_err(|e| PositionsError::Io {
        path: name.clone(),
        source: e,
    })?;
    read_from(std::io::BufReader::new(file), &name)
}

pub fn write_positions_to(
    positions: &[Point3<f32>],
    writer: impl Write,
    target_name: &str,
) -> Result<(), PositionsError> {
    let mut writer = csv::Writer::from_writer(writer);
    for p in positions {
        writer
            .serialize(PositionRecord {
                x: p.x,
                y: p.y,
                z: p.z,
            })
            .map_err(|e| csv_error(target_name, e))?;
    }
    writer.flush().map_err(|e| PositionsError::Io {
        path: target_name.to_string(),
        source: e,
    })
}

/// Writes one `index,x,y,z,fx,fy,fz` row per atom.
pub fn write_forces_to(
    ensemble: &Ensemble,
    writer: impl Write,
    target_name: &str,
) -> Result<(), PositionsError> {
    let mut writer = csv::Writer::from_writer(writer);
    for (index, (p, f)) in ensemble.positions().zip(ensemble.forces()).enumerate() {
        writer
            .serialize(ForceRecord {
                index,
                x: p.x,
                y: p.y,
                z: p.z,
                fx: f.x,
                fy: f.y,
                fz: f.z,
            })
            .map_err(|e| csv_error(target_name, e))?;
    }
    writer.flush().map_err(|e| PositionsError::Io {
        path: target_name.to_string(),
        source: e,
    })
}

fn create_file(path: &Path) -> Result<std::fs::File, PositionsError> {
    std::fs::File::create(path).map_err(|e| PositionsError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

pub fn write_positions_to_path(
    positions: &[Point3<f32>],
    path: &Path,
) -> Result<(), PositionsError> {
    let file = create_file(path)?;
    write_positions_to(positions, file, &path.to_string_lossy())
}

pub fn write_forces_to_path(ensemble: &Ensemble, path: &Path) -> Result<(), PositionsError> {
    let file = create_file(path)?;
    write_forces_to(ensemble, file, &path.to_string_lossy())
}
