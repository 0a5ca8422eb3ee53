//! Plain SQL queries and updates with flattened arguments.

mod common;

use common::*;
use oxide_bind::prelude::*;
use oxide_bind::BindError;

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn test_query_flattens_and_maps() {
    let executor = RecordingExecutor::new().with_rows(vec![
        user_row(1, "ann", 30),
        user_row(3, "cy", 25),
    ]);
    let db = postgres(executor);

    let found = db
        .query(
            "SELECT id, name, age FROM users WHERE id IN (?) AND age > ?",
            args![list([1, 2, 3]), 18],
            map_user,
        )
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[1].name, "cy");
    assert_eq!(
        db.executor().calls(),
        vec![Call::Query(
            String::from("SELECT id, name, age FROM users WHERE id IN (?, ?, ?) AND age > ?"),
            ints(&[1, 2, 3, 18])
        )]
    );
}

#[tokio::test]
async fn test_query_argument_mismatch_is_not_executed() {
    let db = postgres(RecordingExecutor::new());

    let err = db
        .query("SELECT * FROM users WHERE id = ?", args![1, 2], map_user)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Bind(BindError::ArgumentOverflow {
            placeholders: 1,
            arguments: 2
        })
    ));
    assert!(db.executor().calls().is_empty());
}

#[tokio::test]
async fn test_query_one() {
    let db = postgres(RecordingExecutor::new().with_rows(vec![user_row(1, "ann", 30)]));
    let user = db
        .query_one("SELECT * FROM users WHERE id = ?", args![1], map_user)
        .await
        .unwrap();
    assert_eq!(user.map(|u| u.id), Some(1));

    let db = postgres(RecordingExecutor::new());
    let user = db
        .query_one("SELECT * FROM users WHERE id = ?", args![1], map_user)
        .await
        .unwrap();
    assert_eq!(user, None);
}

#[tokio::test]
async fn test_query_one_rejects_many_rows() {
    let executor = RecordingExecutor::new().with_rows(vec![
        user_row(1, "ann", 30),
        user_row(2, "bob", 41),
    ]);
    let db = postgres(executor);

    let err = db
        .query_one("SELECT * FROM users", args![], map_user)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TooManyRows(2)));
}

#[tokio::test]
async fn test_mapper_errors_surface_as_bind_errors() {
    let row = Row::new(vec![String::from("id")], vec![text("not a number")]);
    let db = postgres(RecordingExecutor::new().with_rows(vec![row]));

    let err = db
        .query("SELECT id FROM users", args![], |row| row.get::<i64>(0))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Bind(BindError::Decode { .. })));
}

// =============================================================================
// Scalars
// =============================================================================

#[tokio::test]
async fn test_query_scalars() {
    let db = mysql(RecordingExecutor::new().with_rows(id_rows(&[4, 5, 6])));

    let ids: Vec<i64> = db
        .query_scalars("SELECT id FROM users WHERE team IN (?)", args![list(["red", "blue"])])
        .await
        .unwrap();

    assert_eq!(ids, vec![4, 5, 6]);
    assert_eq!(
        db.executor().calls(),
        vec![Call::Query(
            String::from("SELECT id FROM users WHERE team IN (?, ?)"),
            vec![text("red"), text("blue")]
        )]
    );
}

#[tokio::test]
async fn test_query_scalar() {
    let db = mysql(RecordingExecutor::new().with_rows(id_rows(&[9])));
    let count: Option<i64> = db.query_scalar("SELECT COUNT(*) FROM users", args![]).await.unwrap();
    assert_eq!(count, Some(9));

    let db = mysql(RecordingExecutor::new().with_rows(id_rows(&[1, 2])));
    let err = db
        .query_scalar::<i64, _>("SELECT id FROM users", args![])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::TooManyRows(2)));
}

// =============================================================================
// Named parameters
// =============================================================================

#[tokio::test]
async fn test_named_query_binds_repeated_names() {
    let db = postgres(RecordingExecutor::new().with_rows(id_rows(&[2])));
    let params = NamedArgs::new().bind("team", "red").bind_list("ids", [1, 2]);

    let ids: Vec<i64> = db
        .query_scalars_named(
            "SELECT id FROM users WHERE id IN (:ids) AND (team = :team OR coach = :team) AND created::date > '12:00'",
            &params,
        )
        .await
        .unwrap();

    assert_eq!(ids, vec![2]);
    assert_eq!(
        db.executor().calls(),
        vec![Call::Query(
            String::from(
                "SELECT id FROM users WHERE id IN (?, ?) AND (team = ? OR coach = ?) AND created::date > '12:00'"
            ),
            vec![
                SqlValue::Int(1),
                SqlValue::Int(2),
                text("red"),
                text("red"),
            ]
        )]
    );
}

#[tokio::test]
async fn test_named_query_missing_name() {
    let db = postgres(RecordingExecutor::new());

    let err = db
        .query_named("SELECT * FROM users WHERE id = :id", &NamedArgs::new(), map_user)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Bind(BindError::MissingNamedParameter(ref name)) if name == "id"
    ));
}

#[tokio::test]
async fn test_named_query_rejects_positional_placeholders() {
    let db = postgres(RecordingExecutor::new());
    let params = NamedArgs::new().bind("id", 1);

    let err = db
        .update_named("UPDATE users SET age = ? WHERE id = :id", &params)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Bind(BindError::MixedPlaceholders { position: 23 })
    ));
    assert!(db.executor().calls().is_empty());
}

#[tokio::test]
async fn test_named_update_and_single_row() {
    let db = mysql(
        RecordingExecutor::new()
            .with_affected(2)
            .with_rows(vec![user_row(8, "di", 50)]),
    );
    let params = NamedArgs::new().bind("age", 50);

    let affected = db
        .update_named("UPDATE users SET age = :age WHERE age < :age", &params)
        .await
        .unwrap();
    let user = db
        .query_one_named("SELECT * FROM users WHERE age = :age", &params, map_user)
        .await
        .unwrap();
    let scalar: Option<i64> = db
        .query_scalar_named("SELECT id FROM users WHERE age = :age", &params)
        .await
        .unwrap();

    assert_eq!(affected, 2);
    assert_eq!(user.map(|u| u.name), Some(String::from("di")));
    assert_eq!(scalar, None);
}

// =============================================================================
// Typed queries
// =============================================================================

#[tokio::test]
async fn test_typed_query_reuses_mapper() {
    let executor = RecordingExecutor::new()
        .with_rows(vec![user_row(1, "ann", 30), user_row(2, "bob", 41)])
        .with_rows(vec![user_row(2, "bob", 41)]);
    let db = sqlserver(executor);
    let users = db.typed(map_user);

    let all = users
        .query("SELECT * FROM users WHERE id IN (?)", args![list([1, 2])])
        .await
        .unwrap();
    let params = NamedArgs::new().bind("id", 2);
    let one = users
        .query_one_named("SELECT * FROM users WHERE id = :id", &params)
        .await
        .unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(one.map(|u| u.age), Some(41));
    assert_eq!(db.executor().calls().len(), 2);
}

// =============================================================================
// Updates and statements
// =============================================================================

#[tokio::test]
async fn test_update_flattens_lists() {
    let db = mysql(RecordingExecutor::new().with_affected(2));

    let affected = db
        .update(
            "UPDATE users SET active = ? WHERE id IN (?)",
            args![false, list([1_i64, 2])],
        )
        .await
        .unwrap();

    assert_eq!(affected, 2);
    assert_eq!(
        db.executor().calls(),
        vec![Call::Update(
            String::from("UPDATE users SET active = ? WHERE id IN (?, ?)"),
            vec![SqlValue::Bool(false), SqlValue::Int(1), SqlValue::Int(2)]
        )]
    );
}

#[tokio::test]
async fn test_empty_list_leaves_no_placeholder() {
    let db = mysql(RecordingExecutor::new());
    let none: Vec<i64> = Vec::new();

    db.update("DELETE FROM users WHERE id IN (?)", args![list(none)])
        .await
        .unwrap();

    assert_eq!(
        db.executor().calls(),
        vec![Call::Update(String::from("DELETE FROM users WHERE id IN ()"), Vec::new())]
    );
}

#[tokio::test]
async fn test_execute_statement() {
    let db = mysql(RecordingExecutor::new());

    db.execute("CREATE TABLE t (id INTEGER)").await.unwrap();

    assert_eq!(
        db.executor().calls(),
        vec![Call::Execute(String::from("CREATE TABLE t (id INTEGER)"))]
    );
}

#[tokio::test]
async fn test_execution_errors_keep_their_source() {
    let db = mysql(RecordingExecutor::failing());

    let err = db.execute("SELECT 1").await.unwrap_err();

    assert_eq!(err.to_string(), "Execution failed: connection reset");
    let source = std::error::Error::source(&err).unwrap();
    assert!(source.downcast_ref::<ConnectionReset>().is_some());
}
