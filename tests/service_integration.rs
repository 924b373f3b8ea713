//! Integration tests for service file lookup.
//!
//! Service files are written to temporary directories and located through
//! `PGSERVICEFILE` and `PGSYSCONFDIR` on a map-backed environment.

use conninfo::service::{ReadStatus, ServiceFileReader, lookup_service};
use conninfo::{ConnInfoError, MapEnvSource, OptionRecord, add_service_defaults};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::TempDir;

const SERVICES: &str = "\
# Shared service definitions
[reporting]
host=reports.internal
port=5433
dbname=reports
application_name=reporting

[orders]
# primary first, then the standby
host=orders-a,orders-b
target_session_attrs=read-write
sslmode=verify-full
";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write service file");
    path
}

/// Test looking up a group through the system configuration directory
#[test]
fn test_sysconfdir_lookup() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "pg_service.conf", SERVICES);

    let env = MapEnvSource::new()
        .set("PGSERVICE", "orders")
        .set("PGSERVICEFILE", dir.path().join("missing.conf").to_string_lossy())
        .set("PGSYSCONFDIR", dir.path().to_string_lossy());

    let mut record = OptionRecord::new();
    add_service_defaults(&mut record, &env).unwrap();

    assert_eq!(
        record.iter_set().collect::<Vec<_>>(),
        vec![
            ("host", "orders-a,orders-b"),
            ("sslmode", "verify-full"),
            ("target_session_attrs", "read-write"),
        ]
    );
}

/// Test that the user file shadows the system file
#[test]
fn test_user_file_first() {
    let dir = TempDir::new().unwrap();
    let user = write_file(&dir, "user.conf", "[reporting]\nhost=mine\n");
    write_file(&dir, "pg_service.conf", SERVICES);

    let env = MapEnvSource::new()
        .set("PGSERVICEFILE", user.to_string_lossy())
        .set("PGSYSCONFDIR", dir.path().to_string_lossy());

    let mut record = conninfo::parse("service=reporting").unwrap();
    add_service_defaults(&mut record, &env).unwrap();

    // the whole group comes from one file; nothing is merged across files
    assert_eq!(record.get("host"), Some("mine"));
    assert_eq!(record.get("port"), None);
}

/// Test falling through to the system file when the user file lacks the group
#[test]
fn test_fall_through_to_system_file() {
    let dir = TempDir::new().unwrap();
    let user = write_file(&dir, "user.conf", "[other]\nhost=other\n");
    write_file(&dir, "pg_service.conf", SERVICES);

    let values = lookup_service("reporting", [user, dir.path().join("pg_service.conf")]).unwrap();
    assert_eq!(values.get("dbname"), Some("reports"));
}

/// Test the error for an undefined service
#[test]
fn test_service_not_found() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "pg_service.conf", SERVICES);

    let env = MapEnvSource::new()
        .set("PGSERVICEFILE", dir.path().join("pg_service.conf").to_string_lossy())
        .set("PGSYSCONFDIR", dir.path().join("etc").to_string_lossy());

    let mut record = conninfo::parse("service=inventory").unwrap();
    let err = add_service_defaults(&mut record, &env).unwrap_err();
    assert!(matches!(err, ConnInfoError::ServiceNotFound(ref name) if name == "inventory"));
}

/// Test that a bad line in the requested group fails the lookup
#[test]
fn test_malformed_group() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "pg_service.conf", "[broken]\nhost=a\nport\n");

    let err = lookup_service("broken", [path.clone()]).unwrap_err();
    assert!(matches!(err, ConnInfoError::MalformedServiceFile(_)));

    // other groups are unaffected
    let path = write_file(&dir, "mixed.conf", "[broken]\nport\n[ok]\nhost=a\n");
    let values = lookup_service("ok", [path]).unwrap();
    assert_eq!(values.get("host"), Some("a"));
}

/// Test feeding a service file one byte at a time
#[test]
fn test_byte_at_a_time() {
    let mut reader = ServiceFileReader::new("orders").unwrap();
    let mut status = ReadStatus::Pending;

    for byte in SERVICES.as_bytes().chunks(1) {
        status = reader.feed(byte).unwrap();
        if status != ReadStatus::Pending {
            break;
        }
    }
    if status == ReadStatus::Pending {
        status = reader.feed(&[]).unwrap();
    }

    assert_eq!(status, ReadStatus::Complete);
    assert_eq!(reader.values().get("sslmode"), Some("verify-full"));
}
