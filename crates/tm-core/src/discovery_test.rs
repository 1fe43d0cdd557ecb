use super::*;
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_parse_filename() {
    let (name, number) = parse_changeset_filename(Path::new("m/create_users.12.sql")).unwrap();
    assert_eq!(name, "create_users");
    assert_eq!(number, 12);
}

#[test]
fn test_parse_filename_dotted_name() {
    let (name, number) = parse_changeset_filename(Path::new("add.index.v2.3.sql")).unwrap();
    assert_eq!(name, "add.index.v2");
    assert_eq!(number, 3);
}

#[test]
fn test_parse_filename_rejects_malformed() {
    for bad in [
        "create_users.sql",
        "create_users.x1.sql",
        "create_users.-1.sql",
        "create_users.0.sql",
        ".4.sql",
        "create_users.99999999999.sql",
        "create_users.3.txt",
    ] {
        let err = parse_changeset_filename(Path::new(bad)).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidFilename { .. }),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn test_parse_body_sections() {
    let body = "\
-- Adds the users table
-- tm:up
CREATE TABLE users (name TEXT);
-- tm:down
DROP TABLE users;
";
    let (up, down) = parse_changeset_body(Path::new("x.1.sql"), body).unwrap();
    assert_eq!(up.trim(), "CREATE TABLE users (name TEXT);");
    assert_eq!(down.trim(), "DROP TABLE users;");
}

#[test]
fn test_parse_body_markers_case_insensitive_and_down_first() {
    let body = "--TM:DOWN\nDROP TABLE t;\n  --  Tm:Up  \nCREATE TABLE t (x INT);\n";
    let (up, down) = parse_changeset_body(Path::new("x.1.sql"), body).unwrap();
    assert_eq!(up.trim(), "CREATE TABLE t (x INT);");
    assert_eq!(down.trim(), "DROP TABLE t;");
}

#[test]
fn test_parse_body_missing_down() {
    let (up, down) =
        parse_changeset_body(Path::new("x.1.sql"), "-- tm:up\nCREATE TABLE t (x INT);").unwrap();
    assert!(up.contains("CREATE TABLE"));
    assert!(down.is_empty());
}

#[test]
fn test_parse_body_duplicate_marker() {
    let body = "-- tm:up\nSELECT 1;\n-- tm:up\nSELECT 2;\n";
    let err = parse_changeset_body(Path::new("x.1.sql"), body).unwrap_err();
    assert!(matches!(err, CoreError::ChangesetParseError { .. }));
}

#[test]
fn test_discover_versions_recursive_sorted() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "migrations/002_orders/orders.2.sql",
        "-- tm:up\nCREATE TABLE orders (id INT);\n-- tm:down\nDROP TABLE orders;\n",
    );
    write(
        dir.path(),
        "migrations/users.1.sql",
        "-- tm:up\nCREATE TABLE users (id INT);\n-- tm:down\nDROP TABLE users;\n",
    );
    write(
        dir.path(),
        "migrations/demo_rows.10.sql",
        "-- tm:up\nINSERT INTO users VALUES (1);\n-- tm:down\nDELETE FROM users;\n",
    );
    write(
        dir.path(),
        "migrations/demo_rows.10.yml",
        "tags: [dev]\ndescription: Demo rows for local runs\n",
    );
    write(dir.path(), "migrations/README.md", "notes");

    let versions = discover_versions(&[dir.path().join("migrations")]).unwrap();
    let numbers: Vec<u32> = versions.iter().map(|v| v.number()).collect();
    assert_eq!(numbers, vec![1, 2, 10]);
    assert_eq!(versions[1].name(), "orders");
    assert!(versions[0].tags().is_empty());
    assert!(versions[2].tags().contains("dev"));
    assert_eq!(versions[2].description(), Some("Demo rows for local runs"));
    let splitter = tm_sql::StatementSplitter::generic();
    assert_eq!(versions[2].up_statements(&splitter).unwrap().len(), 1);
}

#[test]
fn test_discover_missing_dir_is_empty() {
    let dir = TempDir::new().unwrap();
    let versions = discover_versions(&[dir.path().join("nope")]).unwrap();
    assert!(versions.is_empty());
}

#[test]
fn test_discover_bad_filename_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "m/users.first.sql", "-- tm:up\nSELECT 1;");
    let err = discover_versions(&[dir.path().join("m")]).unwrap_err();
    assert!(matches!(err, CoreError::InvalidFilename { .. }));
}

#[test]
fn test_sidecar_unknown_field_rejected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "m/users.1.sql", "-- tm:up\nSELECT 1;");
    write(dir.path(), "m/users.1.yaml", "tag: dev\n");
    let err = discover_versions(&[dir.path().join("m")]).unwrap_err();
    assert!(matches!(err, CoreError::YamlParse(_)));
}

#[test]
fn test_load_version_set_duplicate_numbers() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "migrations/a.3.sql", "-- tm:up\nSELECT 1;");
    write(dir.path(), "migrations/b.3.sql", "-- tm:up\nSELECT 2;");
    let config: Config = serde_yaml::from_str("name: dup").unwrap();
    let err = load_version_set(&config, dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateVersion { number: 3, .. }));
}

#[test]
fn test_load_version_set_includes_base() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "migrations/a.1.sql", "-- tm:up\nSELECT 1;");
    let config: Config = serde_yaml::from_str("name: one").unwrap();
    let set = load_version_set(&config, dir.path()).unwrap();
    assert_eq!(set.all().len(), 2);
    assert!(set.all()[0].is_base());
}

#[test]
fn test_unreadable_entry_is_reported() {
    let dir = Path::new("/srv/app/migrations");
    let entries = vec![
        Ok(dir.join("users.1.sql")),
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "entry vanished",
        )),
    ];
    let err = sorted_entry_paths(dir, entries).unwrap_err();
    match err {
        CoreError::IoWithPath { path, source } => {
            assert_eq!(path, "/srv/app/migrations");
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_entry_paths_sorted() {
    let dir = Path::new("m");
    let paths = sorted_entry_paths(
        dir,
        vec![Ok(dir.join("b.2.sql")), Ok(dir.join("a.1.sql"))],
    )
    .unwrap();
    assert_eq!(paths, vec![dir.join("a.1.sql"), dir.join("b.2.sql")]);
}
