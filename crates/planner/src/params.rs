use model::value::SqlValue;

/// The ordered parameter list shared by every filter builder within one
/// compilation. `push` hands out the `$n` placeholder for the value it just
/// appended; builders never assume they start at `$1`.
#[derive(Debug, Clone, Default)]
pub struct SqlParams {
    values: Vec<SqlValue>,
}

impl SqlParams {
    pub fn new() -> Self {
        SqlParams { values: Vec::new() }
    }

    /// Appends a value and returns its 1-based placeholder.
    pub fn push(&mut self, value: SqlValue) -> String {
        self.values.push(value);
        format!("${}", self.values.len())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_contiguous_from_one() {
        let mut params = SqlParams::new();
        assert_eq!(params.push(SqlValue::from("a")), "$1");
        assert_eq!(params.push(SqlValue::from(2.0)), "$2");
        assert_eq!(params.push(SqlValue::TextArray(vec!["x".into()])), "$3");
        assert_eq!(params.len(), 3);
    }
}
