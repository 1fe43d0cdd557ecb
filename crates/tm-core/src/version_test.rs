use super::*;

fn generic() -> StatementSplitter {
    StatementSplitter::generic()
}

fn users() -> Version {
    Version::new(
        "create_users",
        1,
        "CREATE TABLE users (name TEXT);\nCREATE UNIQUE INDEX users_name ON users (name);",
        "DROP INDEX users_name;\nDROP TABLE users;",
    )
}

#[test]
fn test_new_version_is_untagged() {
    let v = users();
    assert_eq!(v.name(), "create_users");
    assert_eq!(v.number(), 1);
    assert!(v.tags().is_empty());
    assert!(v.hooks().is_none());
    assert!(!v.is_base());
}

#[test]
fn test_base_version() {
    let base = Version::base();
    assert!(base.is_base());
    assert!(base.up_statements(&generic()).unwrap().is_empty());
    assert!(base.down_statements(&generic()).unwrap().is_empty());
}

#[test]
fn test_statements_are_split() {
    let v = users();
    assert_eq!(
        v.up_statements(&generic()).unwrap(),
        [
            "CREATE TABLE users (name TEXT)",
            "CREATE UNIQUE INDEX users_name ON users (name)"
        ]
    );
    assert_eq!(
        v.statements(Direction::Down, &generic()).unwrap(),
        ["DROP INDEX users_name", "DROP TABLE users"]
    );
}

#[test]
fn test_statements_follow_splitter_dialect() {
    let v = Version::new(
        "odd_names",
        2,
        "CREATE TABLE [a;b] (x INT); INSERT INTO [a;b] VALUES (1)",
        "DROP TABLE [a;b]",
    );
    assert_eq!(
        v.up_statements(&StatementSplitter::sqlite()).unwrap(),
        ["CREATE TABLE [a;b] (x INT)", "INSERT INTO [a;b] VALUES (1)"]
    );
    assert_eq!(
        v.down_statements(&StatementSplitter::sqlite()).unwrap(),
        ["DROP TABLE [a;b]"]
    );
}

#[test]
fn test_split_error_names_version() {
    let v = Version::new("broken", 4, "INSERT INTO t VALUES ('oops", "");
    let err = v.up_statements(&generic()).unwrap_err();
    assert!(matches!(err, CoreError::StatementSplit { number: 4, .. }));
    assert!(err.to_string().contains("broken"));
}

#[test]
fn test_visibility_untagged() {
    let v = users();
    assert!(v.is_visible(None));
    assert!(v.is_visible(Some("prod")));
}

#[test]
fn test_visibility_tagged() {
    let v = users().with_tags(["dev", "test"]);
    assert!(!v.is_visible(None));
    assert!(!v.is_visible(Some("prod")));
    assert!(v.is_visible(Some("dev")));
    assert!(v.is_visible(Some("test")));
}

#[test]
fn test_base_always_visible() {
    let base = Version::base().with_tags(["dev"]);
    assert!(base.is_visible(None));
    assert!(base.is_visible(Some("prod")));
}

#[test]
fn test_display_and_debug() {
    let v = users().with_description("users table");
    assert_eq!(v.to_string(), "1 (create_users)");
    assert_eq!(v.description(), Some("users table"));
    let debug = format!("{v:?}");
    assert!(debug.contains("create_users"));
    assert!(debug.contains("has_hooks: false"));
}

#[test]
fn test_hooks_default_to_noop() {
    struct Silent;
    impl VersionHooks for Silent {}

    let v = users().with_hooks(Arc::new(Silent));
    let db = tm_db::SqliteBackend::in_memory().unwrap();
    let hooks = v.hooks().unwrap();
    hooks.after_up(&db).unwrap();
    hooks.after_down(&db).unwrap();
}

#[test]
fn test_direction_display() {
    assert_eq!(Direction::Up.to_string(), "up");
    assert_eq!(Direction::Down.to_string(), "down");
}
