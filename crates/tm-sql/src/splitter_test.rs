use super::*;

fn split_statements(sql: &str) -> SqlResult<Vec<String>> {
    StatementSplitter::generic().split(sql)
}

#[test]
fn test_split_single_statement_without_terminator() {
    let stmts = split_statements("CREATE TABLE t(x)").unwrap();
    assert_eq!(stmts, vec!["CREATE TABLE t(x)"]);
}

#[test]
fn test_split_multiple_statements() {
    let sql = "CREATE UNIQUE INDEX username_idx ON users (username);\n\
               CREATE UNIQUE INDEX email_idx ON users (email);";
    let stmts = split_statements(sql).unwrap();
    assert_eq!(
        stmts,
        vec![
            "CREATE UNIQUE INDEX username_idx ON users (username)",
            "CREATE UNIQUE INDEX email_idx ON users (email)",
        ]
    );
}

#[test]
fn test_split_preserves_inner_whitespace() {
    let sql = "\n  CREATE TABLE users (\n    username TEXT NOT NULL,\n    email TEXT\n  );\n";
    let stmts = split_statements(sql).unwrap();
    assert_eq!(
        stmts,
        vec!["CREATE TABLE users (\n    username TEXT NOT NULL,\n    email TEXT\n  )"]
    );
}

#[test]
fn test_split_empty_and_whitespace() {
    assert!(split_statements("").unwrap().is_empty());
    assert!(split_statements("   \n\t ").unwrap().is_empty());
}

#[test]
fn test_split_discards_empty_statements() {
    let stmts = split_statements(";;SELECT 1;;  ;SELECT 2;").unwrap();
    assert_eq!(stmts, vec!["SELECT 1", "SELECT 2"]);
}

#[test]
fn test_split_ignores_semicolon_in_string_literal() {
    let sql = "INSERT INTO notes VALUES ('a;b'); INSERT INTO notes VALUES ('it''s;ok');";
    let stmts = split_statements(sql).unwrap();
    assert_eq!(
        stmts,
        vec![
            "INSERT INTO notes VALUES ('a;b')",
            "INSERT INTO notes VALUES ('it''s;ok')",
        ]
    );
}

#[test]
fn test_split_ignores_semicolon_in_quoted_identifier() {
    let stmts = split_statements(r#"CREATE TABLE "odd;name" (x INT); SELECT 1"#).unwrap();
    assert_eq!(stmts, vec![r#"CREATE TABLE "odd;name" (x INT)"#, "SELECT 1"]);
}

#[test]
fn test_split_ignores_semicolon_in_comments() {
    let sql = "-- first; still a comment\nCREATE TABLE a (x INT); /* block; comment */ CREATE TABLE b (y INT);";
    let stmts = split_statements(sql).unwrap();
    assert_eq!(stmts.len(), 2);
    assert_eq!(stmts[0], "-- first; still a comment\nCREATE TABLE a (x INT)");
    assert_eq!(stmts[1], "/* block; comment */ CREATE TABLE b (y INT)");
}

#[test]
fn test_split_drops_comment_only_fragments() {
    let sql = "CREATE TABLE a (x INT);\n-- trailing note\n/* and another */\n";
    let stmts = split_statements(sql).unwrap();
    assert_eq!(stmts, vec!["CREATE TABLE a (x INT)"]);

    assert!(split_statements("-- nothing to run\n").unwrap().is_empty());
}

#[test]
fn test_split_dollar_quoted_body() {
    let sql = "SELECT $$a; b$$; SELECT 2";
    let stmts = split_statements(sql).unwrap();
    assert_eq!(stmts, vec!["SELECT $$a; b$$", "SELECT 2"]);
}

#[test]
fn test_split_keeps_trigger_body_together() {
    let sql = "CREATE TABLE log (msg TEXT);\n\
               CREATE TRIGGER users_ins AFTER INSERT ON users BEGIN\n\
                 INSERT INTO log VALUES (CASE WHEN NEW.name IS NULL THEN 'x' ELSE 'y' END);\n\
                 INSERT INTO log VALUES ('done');\n\
               END;\n\
               DROP TABLE scratch;";
    let stmts = StatementSplitter::sqlite().split(sql).unwrap();
    assert_eq!(stmts.len(), 3);
    assert!(stmts[1].starts_with("CREATE TRIGGER users_ins"));
    assert!(stmts[1].ends_with("END"));
    assert_eq!(stmts[2], "DROP TABLE scratch");
}

#[test]
fn test_split_begin_transaction_is_not_a_block() {
    let stmts = split_statements("BEGIN; SELECT 1; COMMIT;").unwrap();
    assert_eq!(stmts, vec!["BEGIN", "SELECT 1", "COMMIT"]);
}

#[test]
fn test_split_multibyte_text() {
    let sql = "INSERT INTO t VALUES ('héllo wörld'); INSERT INTO t VALUES ('✓');";
    let stmts = split_statements(sql).unwrap();
    assert_eq!(
        stmts,
        vec![
            "INSERT INTO t VALUES ('héllo wörld')",
            "INSERT INTO t VALUES ('✓')",
        ]
    );
}

#[test]
fn test_split_unterminated_string_is_error() {
    let result = split_statements("SELECT 'oops");
    assert!(matches!(result, Err(SqlError::TokenizeError { .. })));
}

#[test]
fn test_from_dialect_name() {
    let splitter = StatementSplitter::from_dialect_name("duckdb").unwrap();
    assert_eq!(splitter.dialect_name(), "duckdb");
    assert!(StatementSplitter::from_dialect_name("unknown").is_err());
}

#[test]
fn test_sqlite_bracket_identifier_keeps_terminator() {
    let sql = "CREATE TABLE [a;b] (x INT); INSERT INTO [a;b] VALUES (1)";
    let stmts = StatementSplitter::sqlite().split(sql).unwrap();
    assert_eq!(
        stmts,
        vec!["CREATE TABLE [a;b] (x INT)", "INSERT INTO [a;b] VALUES (1)"]
    );
}
