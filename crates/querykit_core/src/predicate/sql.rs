//! Predicate translation to SQLite `WHERE` fragments.
//!
//! # Invariants
//! - Values are always bound as `?` parameters, never inlined.
//! - Column names come from `'static` field descriptors only.
//! - Case-sensitive partial matching uses `GLOB` because SQLite's `LIKE`
//!   folds ASCII case.

use crate::model::field::Value;
use crate::predicate::Predicate;

/// SQL boolean expression plus positional bind values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFragment {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Translates `predicate` into a parenthesised SQL expression.
pub fn to_sql(predicate: &Predicate, case_sensitive: bool) -> SqlFragment {
    let mut fragment = SqlFragment {
        sql: String::new(),
        params: Vec::new(),
    };
    write_predicate(predicate, case_sensitive, &mut fragment);
    fragment
}

fn write_predicate(predicate: &Predicate, case_sensitive: bool, out: &mut SqlFragment) {
    match predicate {
        Predicate::True => out.sql.push_str("1 = 1"),
        Predicate::Equals { field, value } => {
            out.sql
                .push_str(&format!("{}.{} = ?", field.entity, field.name));
            if !case_sensitive && value.as_text().is_some() {
                out.sql.push_str(" COLLATE NOCASE");
            }
            out.params.push(value.clone());
        }
        Predicate::Like { field, pattern } => {
            if case_sensitive {
                out.sql
                    .push_str(&format!("{}.{} GLOB ?", field.entity, field.name));
                out.params.push(Value::Text(like_to_glob(pattern)));
            } else {
                out.sql
                    .push_str(&format!("{}.{} LIKE ?", field.entity, field.name));
                out.params.push(Value::Text(pattern.clone()));
            }
        }
        Predicate::And(parts) => write_group(parts, " AND ", case_sensitive, out),
        Predicate::Or(parts) => write_group(parts, " OR ", case_sensitive, out),
    }
}

fn write_group(parts: &[Predicate], joiner: &str, case_sensitive: bool, out: &mut SqlFragment) {
    if parts.is_empty() {
        out.sql.push_str("1 = 1");
        return;
    }

    out.sql.push('(');
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            out.sql.push_str(joiner);
        }
        write_predicate(part, case_sensitive, out);
    }
    out.sql.push(')');
}

/// Rewrites `LIKE` wildcards to `GLOB` syntax, escaping GLOB metacharacters.
fn like_to_glob(pattern: &str) -> String {
    let mut glob = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '%' => glob.push('*'),
            '_' => glob.push('?'),
            '*' => glob.push_str("[*]"),
            '?' => glob.push_str("[?]"),
            '[' => glob.push_str("[[]"),
            other => glob.push(other),
        }
    }
    glob
}
