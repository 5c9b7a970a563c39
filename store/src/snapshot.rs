use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::error::StoreError;

/// On-disk shape of the store: a flat `name -> vector` map.
///
/// `BTreeMap` keeps the serialized layout deterministic (keys sorted).
/// The JSON produced is compatible with a plain `{"alice": [0.1, ...]}`
/// object, with no version field or checksum.
pub type ProfileMap = BTreeMap<String, Vec<f32>>;

/// Serializes the profile map to a writer as a whole-file JSON snapshot.
pub fn encode(profiles: &ProfileMap, w: &mut dyn Write) -> Result<(), StoreError> {
    let mut bw = BufWriter::new(w);
    serde_json::to_writer_pretty(&mut bw, profiles)
        .map_err(|e| StoreError::Io(e.to_string()))?;
    bw.flush().map_err(|e| StoreError::Io(e.to_string()))?;
    Ok(())
}

/// Deserializes a profile map from a reader and validates it.
///
/// Every stored vector must be non-empty and share one dimensionality;
/// no key may be empty. Anything else is `InvalidFormat`.
pub fn decode(r: &mut dyn Read) -> Result<ProfileMap, StoreError> {
    let br = BufReader::new(r);
    let profiles: ProfileMap =
        serde_json::from_reader(br).map_err(|e| StoreError::InvalidFormat(e.to_string()))?;
    validate(&profiles)?;
    Ok(profiles)
}

fn validate(profiles: &ProfileMap) -> Result<(), StoreError> {
    let mut dim: Option<usize> = None;
    for (name, vector) in profiles {
        if name.is_empty() {
            return Err(StoreError::InvalidFormat("empty profile name".into()));
        }
        if vector.is_empty() {
            return Err(StoreError::InvalidFormat(format!(
                "empty vector for profile {name:?}"
            )));
        }
        match dim {
            None => dim = Some(vector.len()),
            Some(d) if vector.len() != d => {
                return Err(StoreError::InvalidFormat(format!(
                    "mixed dimensions: profile {name:?} has {}, want {d}",
                    vector.len()
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Loads a snapshot from a path. A missing file is an empty store, not an
/// error; any other read or parse failure surfaces.
pub fn load_path(path: &Path) -> Result<ProfileMap, StoreError> {
    let mut f = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ProfileMap::new()),
        Err(e) => return Err(StoreError::Io(e.to_string())),
    };
    decode(&mut f)
}

/// Writes a whole-file snapshot to a path, replacing any previous contents.
pub fn save_path(path: &Path, profiles: &ProfileMap) -> Result<(), StoreError> {
    let mut f = File::create(path).map_err(|e| StoreError::Io(e.to_string()))?;
    encode(profiles, &mut f)
}
