//! Conjunctive `WHERE` clause builder for search queries.

use rusqlite::types::Value;

/// Accumulates optional filters onto a base `SELECT`.
///
/// Absent and empty filter values add no constraint.
pub(crate) struct SearchFilter {
    sql: String,
    bind_values: Vec<Value>,
}

impl SearchFilter {
    pub(crate) fn new(select_sql: &str) -> Self {
        Self {
            sql: format!("{select_sql} WHERE 1 = 1"),
            bind_values: Vec::new(),
        }
    }

    /// Adds `column = ?`.
    pub(crate) fn exact(&mut self, column: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = non_empty(value) {
            self.sql.push_str(&format!(" AND {column} = ?"));
            self.bind_values.push(Value::Text(value.to_string()));
        }
        self
    }

    /// Adds a case-sensitive substring match; `%` and `_` are literal.
    pub(crate) fn contains(&mut self, column: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = non_empty(value) {
            self.sql.push_str(&format!(" AND instr({column}, ?) > 0"));
            self.bind_values.push(Value::Text(value.to_string()));
        }
        self
    }

    pub(crate) fn finish(self, order_column: &str) -> (String, Vec<Value>) {
        let sql = format!("{} ORDER BY {order_column} ASC;", self.sql);
        (sql, self.bind_values)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
