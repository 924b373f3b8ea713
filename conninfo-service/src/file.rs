//! Synchronous service file lookup.

use crate::paths;
use crate::reader::{ReadStatus, ServiceFileReader};
use conninfo_core::{ConnInfoError, ConnInfoResult, EnvSource, OptionRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Size of each read from a service file.
pub const READ_BUFFER_SIZE: usize = 4096;

/// Run `reader` over everything `source` yields, in fixed-size chunks.
///
/// `path` only labels I/O errors.
pub fn read_service<R: Read>(
    reader: &mut ServiceFileReader,
    mut source: R,
    path: &Path,
) -> ConnInfoResult<ReadStatus> {
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        let n = match source.read(&mut buf) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ConnInfoError::io(path, e)),
        };

        let status = reader.feed(&buf[..n])?;
        if status != ReadStatus::Pending {
            return Ok(status);
        }
    }
}

/// Find the group for `service` in the first candidate file that defines it.
///
/// Missing files are skipped. Any other I/O error stops the search, as does
/// a malformed line inside the group being read.
pub fn lookup_service<I>(service: &str, candidates: I) -> ConnInfoResult<OptionRecord>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    // validate the name even when there is nothing to search
    ServiceFileReader::new(service)?;

    for candidate in candidates {
        let path = candidate.as_ref();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "service file not present");
                continue;
            }
            Err(e) => return Err(ConnInfoError::io(path, e)),
        };

        let mut reader = ServiceFileReader::new(service)?;
        match read_service(&mut reader, file, path)? {
            ReadStatus::Complete => {
                debug!(
                    path = %path.display(),
                    service,
                    options = reader.values().len_set(),
                    "service definition found"
                );
                return Ok(reader.into_values());
            }
            _ => debug!(path = %path.display(), service, "service not defined in file"),
        }
    }

    Err(ConnInfoError::ServiceNotFound(service.to_string()))
}

/// Fill unset options from the service named by the record or `PGSERVICE`,
/// searching the standard service file locations.
///
/// Does nothing when no service is named.
pub fn add_service_defaults<S: EnvSource + ?Sized>(
    record: &mut OptionRecord,
    env: &S,
) -> ConnInfoResult<()> {
    add_service_defaults_from(record, env, paths::default_candidates(env))
}

/// [`add_service_defaults`] with an explicit list of candidate files.
pub fn add_service_defaults_from<S, I>(
    record: &mut OptionRecord,
    env: &S,
    candidates: I,
) -> ConnInfoResult<()>
where
    S: EnvSource + ?Sized,
    I: IntoIterator<Item = PathBuf>,
{
    let Some(service) = paths::service_name(record, env) else {
        return Ok(());
    };

    let values = lookup_service(&service, candidates)?;
    let filled = record.fill_unset_from(&values);
    debug!(service = %service, filled, "service defaults applied");
    Ok(())
}
