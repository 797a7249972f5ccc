//! The shared AST both filter front ends produce.
//!
//! The variant set is closed: adding an operator means touching the parsers
//! and the compiler in the same change, checked by exhaustive matching.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An unresolved property reference; resolution against the queryable
/// schema happens in the compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier { name: name.into() }
    }
}

/// A scalar literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Text(String),
    Number(f64),
}

/// A `[minx, miny, maxx, maxy]` geometry literal in EPSG:4326.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub coords: [f64; 4],
}

impl BBox {
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Self {
        BBox {
            coords: [minx, miny, maxx, maxy],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Scalar(Scalar),
    BBox(BBox),
}

impl Literal {
    pub fn text(s: impl Into<String>) -> Self {
        Literal::Scalar(Scalar::Text(s.into()))
    }

    pub fn number(n: f64) -> Self {
        Literal::Scalar(Scalar::Number(n))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    Gt,
    Like,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Like => "LIKE",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpatialOp {
    Intersects,
    Contains,
    Overlaps,
    Within,
}

impl SpatialOp {
    /// The operator name as it appears in a CQL2 filter.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "S_INTERSECTS" => Some(SpatialOp::Intersects),
            "S_CONTAINS" => Some(SpatialOp::Contains),
            "S_OVERLAPS" => Some(SpatialOp::Overlaps),
            "S_WITHIN" => Some(SpatialOp::Within),
            _ => None,
        }
    }

    /// The PostGIS function this operator compiles to.
    pub fn sql_function(&self) -> &'static str {
        match self {
            SpatialOp::Intersects => "ST_Intersects",
            SpatialOp::Contains => "ST_Contains",
            SpatialOp::Overlaps => "ST_Overlaps",
            SpatialOp::Within => "ST_Within",
        }
    }
}

impl fmt::Display for SpatialOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpatialOp::Intersects => "S_INTERSECTS",
            SpatialOp::Contains => "S_CONTAINS",
            SpatialOp::Overlaps => "S_OVERLAPS",
            SpatialOp::Within => "S_WITHIN",
        };
        write!(f, "{}", s)
    }
}

/// Filter expression tree. Built once per request by either front end,
/// consumed once by the compiler, then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Compare {
        op: CompareOp,
        left: Identifier,
        right: Literal,
    },
    In {
        left: Identifier,
        values: Vec<Literal>,
    },
    Between {
        left: Identifier,
        low: Literal,
        high: Literal,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
    Spatial {
        op: SpatialOp,
        left: Identifier,
        right: BBox,
    },
}
