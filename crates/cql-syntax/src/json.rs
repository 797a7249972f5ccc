//! Translator for the CQL2 JSON syntax.
//!
//! Produces exactly the AST shapes the text parser produces, so the SQL
//! compiler stays syntax-agnostic. `AND`/`OR` accept two or more arguments
//! and fold pairwise from the first argument, which keeps parameter order in
//! the generated SQL equal to left-to-right argument order.

use crate::{
    ast::{BBox, CompareOp, Expr, Identifier, Literal, LogicalOp, SpatialOp},
    error::TranslateError,
};
use serde_json::Value;

/// Decode a JSON string and translate it.
pub fn translate_str(input: &str) -> Result<Expr, TranslateError> {
    let value: Value = serde_json::from_str(input)?;
    translate(&value)
}

/// Translate a decoded JSON filter node into the shared AST.
pub fn translate(value: &Value) -> Result<Expr, TranslateError> {
    let obj = match value {
        Value::Object(map) => map,
        other => return Err(TranslateError::ExpectedProperty(kind_of(other).to_string())),
    };

    let op = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| TranslateError::UnknownOp("<missing>".to_string()))?;
    let args = match obj.get("args") {
        Some(Value::Array(args)) => args.as_slice(),
        _ => &[],
    };

    match op.to_ascii_lowercase().as_str() {
        "not" => {
            let [arg] = expect_args::<1>(op, args)?;
            Ok(Expr::Not(Box::new(translate(arg)?)))
        }
        "and" => fold_logical(LogicalOp::And, op, args),
        "or" => fold_logical(LogicalOp::Or, op, args),
        "between" => {
            let [prop, low, high] = expect_args::<3>(op, args)?;
            Ok(Expr::Between {
                left: property(prop)?,
                low: literal(low)?,
                high: literal(high)?,
            })
        }
        "in" => {
            if args.len() < 2 {
                return Err(TranslateError::WrongArity {
                    op: op.to_string(),
                    expected: "at least 2",
                    got: args.len(),
                });
            }
            let left = property(&args[0])?;
            // The value list is either a single array argument or the
            // remaining arguments themselves.
            let values = match (&args[1..], &args[1]) {
                ([_], Value::Array(list)) => list
                    .iter()
                    .map(literal)
                    .collect::<Result<Vec<_>, _>>()?,
                (rest, _) => rest.iter().map(literal).collect::<Result<Vec<_>, _>>()?,
            };
            Ok(Expr::In { left, values })
        }
        "=" | "!=" | "<" | ">" | "like" => {
            let compare_op = match op.to_ascii_lowercase().as_str() {
                "=" => CompareOp::Eq,
                "!=" => CompareOp::NotEq,
                "<" => CompareOp::Lt,
                ">" => CompareOp::Gt,
                _ => CompareOp::Like,
            };
            let [prop, value] = expect_args::<2>(op, args)?;
            Ok(Expr::Compare {
                op: compare_op,
                left: property(prop)?,
                right: literal(value)?,
            })
        }
        name => {
            if let Some(spatial_op) = SpatialOp::from_name(name) {
                let [prop, value] = expect_args::<2>(op, args)?;
                let bbox = match literal(value)? {
                    Literal::BBox(bbox) => bbox,
                    Literal::Scalar(_) => {
                        return Err(TranslateError::InvalidBBox(
                            "spatial operators require a BBox literal".to_string(),
                        ));
                    }
                };
                Ok(Expr::Spatial {
                    op: spatial_op,
                    left: property(prop)?,
                    right: bbox,
                })
            } else {
                Err(TranslateError::UnknownOp(op.to_string()))
            }
        }
    }
}

fn fold_logical(op: LogicalOp, name: &str, args: &[Value]) -> Result<Expr, TranslateError> {
    if args.len() < 2 {
        return Err(TranslateError::WrongArity {
            op: name.to_string(),
            expected: "at least 2",
            got: args.len(),
        });
    }

    fn fold(op: LogicalOp, args: &[Value]) -> Result<Expr, TranslateError> {
        let first = translate(&args[0])?;
        let rest = &args[1..];
        let right = if rest.len() == 1 {
            translate(&rest[0])?
        } else {
            fold(op, rest)?
        };
        Ok(Expr::Logical {
            op,
            left: Box::new(first),
            right: Box::new(right),
        })
    }

    fold(op, args)
}

fn expect_args<'a, const N: usize>(
    op: &str,
    args: &'a [Value],
) -> Result<&'a [Value; N], TranslateError> {
    args.try_into().map_err(|_| TranslateError::WrongArity {
        op: op.to_string(),
        expected: match N {
            1 => "exactly 1",
            2 => "exactly 2",
            _ => "exactly 3",
        },
        got: args.len(),
    })
}

fn property(value: &Value) -> Result<Identifier, TranslateError> {
    match value {
        Value::Object(map) => match map.get("property").and_then(Value::as_str) {
            Some(name) => Ok(Identifier::new(name)),
            None => Err(TranslateError::ExpectedProperty("object".to_string())),
        },
        other => Err(TranslateError::ExpectedProperty(kind_of(other).to_string())),
    }
}

fn literal(value: &Value) -> Result<Literal, TranslateError> {
    match value {
        Value::String(s) => Ok(Literal::text(s.clone())),
        Value::Number(n) => n
            .as_f64()
            .map(Literal::number)
            .ok_or_else(|| TranslateError::ExpectedLiteral("non-finite number".to_string())),
        Value::Object(map) if map.get("type").and_then(Value::as_str) == Some("BBox") => {
            bbox(map.get("value")).map(Literal::BBox)
        }
        other => Err(TranslateError::ExpectedLiteral(kind_of(other).to_string())),
    }
}

fn bbox(value: Option<&Value>) -> Result<BBox, TranslateError> {
    let list = value
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::InvalidBBox("missing coordinate array".to_string()))?;
    if list.len() != 4 {
        return Err(TranslateError::InvalidBBox(format!(
            "expected 4 coordinates, got {}",
            list.len()
        )));
    }

    let mut coords = [0.0; 4];
    for (slot, v) in coords.iter_mut().zip(list) {
        *slot = v
            .as_f64()
            .ok_or_else(|| TranslateError::InvalidBBox("coordinates must be numbers".to_string()))?;
    }
    Ok(BBox { coords })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_literals() {
        assert_eq!(literal(&json!("x")).unwrap(), Literal::text("x"));
        assert_eq!(literal(&json!(4.5)).unwrap(), Literal::number(4.5));
    }

    #[test]
    fn test_bbox_literal() {
        let lit = literal(&json!({"type": "BBox", "value": [5.8, 47.2, 15.0, 55.1]})).unwrap();
        assert_eq!(
            lit,
            Literal::BBox(BBox::new(5.8, 47.2, 15.0, 55.1))
        );
    }

    #[test]
    fn test_bbox_wrong_length() {
        let err = literal(&json!({"type": "BBox", "value": [1.0, 2.0]})).unwrap_err();
        assert!(err.to_string().contains("expected 4 coordinates"));
    }

    #[test]
    fn test_property_reference() {
        assert_eq!(
            property(&json!({"property": "license"})).unwrap(),
            Identifier::new("license")
        );
        assert!(property(&json!("license")).is_err());
    }

    #[test]
    fn test_scalar_where_property_expected() {
        let err = translate(&json!("just a string")).unwrap_err();
        assert!(matches!(err, TranslateError::ExpectedProperty(_)));
    }
}
