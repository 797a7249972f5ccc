use crate::{error::FilterError, params::SqlParams};
use model::{search::BboxParam, value::SqlValue};

const SPATIAL_COLUMN: &str = "spatial_extent";

/// Builds the bounding-box clause. Accepts a comma-separated string or a
/// numeric array of 4 or 6 values (the 6-value form carries Z components,
/// which are dropped). A box whose west edge lies east of its east edge
/// crosses the antimeridian and is split into two envelopes.
pub fn bbox_filter(
    input: &BboxParam,
    params: &mut SqlParams,
) -> Result<Option<String>, FilterError> {
    let values = match input {
        BboxParam::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.split(',')
                .map(|part| {
                    part.trim()
                        .parse::<f64>()
                        .map_err(|_| FilterError::InvalidBbox(format!("'{}' is not a number", part.trim())))
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        BboxParam::Values(values) => values.clone(),
    };

    let [minx, miny, maxx, maxy] = match values.len() {
        4 => [values[0], values[1], values[2], values[3]],
        6 => [values[0], values[1], values[3], values[4]],
        n => {
            return Err(FilterError::InvalidBbox(format!(
                "expected 4 or 6 values, got {}",
                n
            )));
        }
    };

    if [minx, miny, maxx, maxy].iter().any(|v| !v.is_finite()) {
        return Err(FilterError::InvalidBbox(
            "coordinates must be finite numbers".to_string(),
        ));
    }
    if miny > maxy {
        return Err(FilterError::InvalidBbox(
            "minimum latitude exceeds maximum latitude".to_string(),
        ));
    }
    if minx < -180.0 || minx > 180.0 || maxx < -180.0 || maxx > 180.0 {
        return Err(FilterError::InvalidBbox(
            "longitude out of range [-180, 180]".to_string(),
        ));
    }
    if miny < -90.0 || miny > 90.0 || maxy < -90.0 || maxy > 90.0 {
        return Err(FilterError::InvalidBbox(
            "latitude out of range [-90, 90]".to_string(),
        ));
    }

    if minx <= maxx {
        let clause = envelope([minx, miny, maxx, maxy], params);
        Ok(Some(format!("({})", clause)))
    } else {
        // Antimeridian crossing: western half first, then eastern half.
        let west = envelope([-180.0, miny, maxx, maxy], params);
        let east = envelope([minx, miny, 180.0, maxy], params);
        Ok(Some(format!("({} OR {})", west, east)))
    }
}

fn envelope(coords: [f64; 4], params: &mut SqlParams) -> String {
    let [minx, miny, maxx, maxy] = coords;
    let p1 = params.push(SqlValue::Number(minx));
    let p2 = params.push(SqlValue::Number(miny));
    let p3 = params.push(SqlValue::Number(maxx));
    let p4 = params.push(SqlValue::Number(maxy));
    format!(
        "ST_Intersects({}, ST_MakeEnvelope({}, {}, {}, {}, 4326))",
        SPATIAL_COLUMN, p1, p2, p3, p4
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(input: &str) -> Result<(Option<String>, Vec<SqlValue>), FilterError> {
        let mut params = SqlParams::new();
        let clause = bbox_filter(&BboxParam::from(input), &mut params)?;
        Ok((clause, params.into_values()))
    }

    fn numbers(values: &[SqlValue]) -> Vec<f64> {
        values.iter().map(|v| v.as_number().unwrap()).collect()
    }

    #[test]
    fn test_simple_bbox() {
        let (clause, params) = build("5.8,47.2,15.0,55.1").unwrap();
        let clause = clause.unwrap();
        assert_eq!(
            clause,
            "(ST_Intersects(spatial_extent, ST_MakeEnvelope($1, $2, $3, $4, 4326)))"
        );
        assert_eq!(numbers(&params), vec![5.8, 47.2, 15.0, 55.1]);
        assert!(!clause.contains(" OR "));
    }

    #[test]
    fn test_six_value_bbox_drops_z() {
        let mut params = SqlParams::new();
        let input = BboxParam::Values(vec![5.8, 47.2, 0.0, 15.0, 55.1, 100.0]);
        bbox_filter(&input, &mut params).unwrap().unwrap();
        assert_eq!(numbers(params.values()), vec![5.8, 47.2, 15.0, 55.1]);
    }

    #[test]
    fn test_antimeridian_crossing_splits_into_two_envelopes() {
        let (clause, params) = build("170,-10,-170,10").unwrap();
        let clause = clause.unwrap();
        assert!(clause.contains(" OR "));
        assert_eq!(params.len(), 8);
        assert_eq!(
            numbers(&params),
            vec![-180.0, -10.0, -170.0, 10.0, 170.0, -10.0, 180.0, 10.0]
        );
    }

    #[test]
    fn test_empty_string_builds_nothing() {
        let (clause, params) = build("  ").unwrap();
        assert_eq!(clause, None);
        assert!(params.is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(build("1,2,3"), Err(FilterError::InvalidBbox(_))));
        assert!(matches!(
            build("a,2,3,4"),
            Err(FilterError::InvalidBbox(_))
        ));
        assert!(matches!(
            build("0,10,10,-10"),
            Err(FilterError::InvalidBbox(_))
        ));
        assert!(matches!(
            build("-181,0,10,10"),
            Err(FilterError::InvalidBbox(_))
        ));
        assert!(matches!(
            build("0,-91,10,10"),
            Err(FilterError::InvalidBbox(_))
        ));
    }

    #[test]
    fn test_latitude_order_message() {
        let err = build("0,10,10,-10").unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }
}
