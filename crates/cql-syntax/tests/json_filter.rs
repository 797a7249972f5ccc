//! Tests for the JSON filter translator: both front ends must terminate in
//! identical AST shapes.

use cql_syntax::ast::{CompareOp, Expr, Identifier, Literal, LogicalOp, SpatialOp};
use cql_syntax::{parse_json_str, parse_json_value, parse_text};
use serde_json::json;

#[test]
fn test_comparison_matches_text_parser() {
    let from_json = parse_json_value(&json!({
        "op": "=",
        "args": [{"property": "license"}, "CC-BY-4.0"]
    }))
    .unwrap();
    let from_text = parse_text("license = 'CC-BY-4.0'").unwrap();
    assert_eq!(from_json, from_text);
}

#[test]
fn test_op_names_case_insensitive() {
    let expr = parse_json_value(&json!({
        "op": "LIKE",
        "args": [{"property": "title"}, "%Sentinel%"]
    }))
    .unwrap();
    assert!(matches!(expr, Expr::Compare { op: CompareOp::Like, .. }));
}

#[test]
fn test_and_folds_pairwise_in_argument_order() {
    let expr = parse_json_value(&json!({
        "op": "and",
        "args": [
            {"op": "=", "args": [{"property": "license"}, "a"]},
            {"op": "=", "args": [{"property": "license"}, "b"]},
            {"op": "=", "args": [{"property": "license"}, "c"]}
        ]
    }))
    .unwrap();

    // AND(a, b, c) folds to Logical(a, Logical(b, c)); a DFS walk visits the
    // literals in argument order.
    match expr {
        Expr::Logical {
            op: LogicalOp::And,
            left,
            right,
        } => {
            assert_eq!(
                *left,
                Expr::Compare {
                    op: CompareOp::Eq,
                    left: Identifier::new("license"),
                    right: Literal::text("a"),
                }
            );
            assert!(matches!(
                *right,
                Expr::Logical { op: LogicalOp::And, .. }
            ));
        }
        other => panic!("expected AND at the root, got {:?}", other),
    }
}

#[test]
fn test_logical_requires_two_args() {
    let err = parse_json_value(&json!({
        "op": "or",
        "args": [{"op": "=", "args": [{"property": "license"}, "a"]}]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("at least 2"));
}

#[test]
fn test_not() {
    let expr = parse_json_value(&json!({
        "op": "not",
        "args": [{"op": "=", "args": [{"property": "license"}, "x"]}]
    }))
    .unwrap();
    assert!(matches!(expr, Expr::Not(_)));
}

#[test]
fn test_between() {
    let from_json = parse_json_value(&json!({
        "op": "between",
        "args": [{"property": "created"}, "2020-01-01", "2021-01-01"]
    }))
    .unwrap();
    let from_text = parse_text("created BETWEEN '2020-01-01' AND '2021-01-01'").unwrap();
    assert_eq!(from_json, from_text);
}

#[test]
fn test_in_with_array_argument() {
    let from_json = parse_json_value(&json!({
        "op": "in",
        "args": [{"property": "keywords"}, ["eo", "sar"]]
    }))
    .unwrap();
    let from_text = parse_text("keywords IN ('eo', 'sar')").unwrap();
    assert_eq!(from_json, from_text);
}

#[test]
fn test_in_with_spread_arguments() {
    let expr = parse_json_value(&json!({
        "op": "in",
        "args": [{"property": "keywords"}, "eo", "sar"]
    }))
    .unwrap();
    assert_eq!(
        expr,
        Expr::In {
            left: Identifier::new("keywords"),
            values: vec![Literal::text("eo"), Literal::text("sar")],
        }
    );
}

#[test]
fn test_spatial_with_bbox_literal() {
    let expr = parse_json_value(&json!({
        "op": "s_within",
        "args": [
            {"property": "spatial_extent"},
            {"type": "BBox", "value": [5.8, 47.2, 15.0, 55.1]}
        ]
    }))
    .unwrap();
    match expr {
        Expr::Spatial { op, left, right } => {
            assert_eq!(op, SpatialOp::Within);
            assert_eq!(left, Identifier::new("spatial_extent"));
            assert_eq!(right.coords, [5.8, 47.2, 15.0, 55.1]);
        }
        other => panic!("expected spatial predicate, got {:?}", other),
    }
}

#[test]
fn test_spatial_requires_bbox_literal() {
    let err = parse_json_value(&json!({
        "op": "s_intersects",
        "args": [{"property": "spatial_extent"}, "not-a-bbox"]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("BBox"));
}

#[test]
fn test_unknown_op_is_rejected() {
    let err = parse_json_value(&json!({
        "op": "touches",
        "args": [{"property": "spatial_extent"}, {"type": "BBox", "value": [0, 0, 1, 1]}]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("touches"));
}

#[test]
fn test_wrong_arity_is_rejected() {
    let err = parse_json_value(&json!({
        "op": "between",
        "args": [{"property": "created"}, "2020-01-01"]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("arguments"));
}

#[test]
fn test_malformed_json_string() {
    let err = parse_json_str("{\"op\": ").unwrap_err();
    assert!(err.to_string().contains("not valid JSON"));
}
