use model::value::SqlValue;
use tokio_postgres::types::ToSql;

/// One bound query parameter, boxed so heterogeneous values can share a
/// single slice when a statement executes.
pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    pub fn from_value(value: &SqlValue) -> Self {
        match value {
            SqlValue::Text(s) => PgParam(Box::new(s.clone())),
            SqlValue::Number(n) => PgParam(Box::new(*n)),
            SqlValue::TextArray(items) => PgParam(Box::new(items.clone())),
        }
    }
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    params: Vec<PgParam>,
}

impl PgParamStore {
    pub fn from_values(values: &[SqlValue]) -> Self {
        Self {
            params: values.iter().map(PgParam::from_value).collect(),
        }
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|param| param.as_ref()).collect()
    }
}
