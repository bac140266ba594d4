//! SQL-flavoured rendering of the compiled model
//!
//! Used for diagnostics and snapshot tests. Literal strings are
//! single-quoted with embedded quotes doubled; no further escaping is
//! attempted.

use crate::{CompiledQuery, JunctionKind, Predicate, Projection, Value};
use std::fmt;
use std::fmt::Write as _;

fn escape(value: &str) -> String {
    value.replace('\'', "''")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "'{}'", escape(s)),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Junction { kind, members } => {
                if members.is_empty() {
                    // Hibernate convention: empty conjunction is vacuously
                    // true, empty disjunction vacuously false
                    return match kind {
                        JunctionKind::And => f.write_str("1=1"),
                        JunctionKind::Or => f.write_str("0=1"),
                    };
                }
                let sep = match kind {
                    JunctionKind::And => " and ",
                    JunctionKind::Or => " or ",
                };
                f.write_str("(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(sep)?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str(")")
            }
            Self::Not(inner) => write!(f, "not ({inner})"),
            Self::Comparison {
                property,
                op,
                value,
                ignore_case,
            } => {
                if *ignore_case {
                    write!(f, "lower({property}) {} lower({value})", op.symbol())
                } else {
                    write!(f, "{property} {} {value}", op.symbol())
                }
            }
            Self::PropertyComparison { op, lhs, rhs } => {
                write!(f, "{lhs} {} {rhs}", op.symbol())
            }
            Self::SizeComparison { property, op, size } => {
                write!(f, "size({property}) {} {size}", op.symbol())
            }
            Self::PatternMatch {
                property,
                value,
                mode,
                case_insensitive,
            } => {
                let keyword = if *case_insensitive { "ilike" } else { "like" };
                write!(f, "{property} {keyword} '{}'", escape(&mode.apply(value)))
            }
            Self::IsNull(property) => write!(f, "{property} is null"),
            Self::IsNotNull(property) => write!(f, "{property} is not null"),
            Self::IsEmpty(property) => write!(f, "{property} is empty"),
            Self::IsNotEmpty(property) => write!(f, "{property} is not empty"),
            Self::In { property, values } => {
                write!(f, "{property} in (")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(")")
            }
            Self::InSubquery { property, subquery } => {
                write!(f, "{property} in ({})", subquery.render())
            }
            Self::Between {
                property,
                low,
                high,
            } => write!(f, "{property} between {low} and {high}"),
            Self::Raw(fragment) => f.write_str(fragment),
        }
    }
}

impl Projection {
    /// Column list for the select clause.
    ///
    /// Composite group-by/having projections alias each enumerated column
    /// positionally (`y0_`, `y1_`, …) so a correlated context can resolve
    /// column references; single-column projections stay bare.
    pub fn select_list(&self) -> String {
        match self {
            Self::Property(property) => property.clone(),
            Self::List(items) => items
                .iter()
                .map(Self::select_list)
                .collect::<Vec<_>>()
                .join(", "),
            Self::GroupHaving {
                group_properties, ..
            } => {
                if group_properties.len() > 1 {
                    group_properties
                        .iter()
                        .enumerate()
                        .map(|(i, column)| format!("{column} as y{i}_"))
                        .collect::<Vec<_>>()
                        .join(", ")
                } else {
                    group_properties.join(", ")
                }
            }
        }
    }

    /// Group-by and having clauses, when this projection carries them.
    /// The group-by list omits the positional aliases.
    pub fn group_having(&self) -> Option<(String, String)> {
        match self {
            Self::GroupHaving {
                group_properties,
                distinct,
                aggregate_property,
                op,
                value,
            } => {
                let group_by = group_properties.join(", ");
                let aggregate = if *distinct {
                    format!("count(distinct {aggregate_property})")
                } else {
                    format!("count({aggregate_property})")
                };
                Some((group_by, format!("{aggregate} {} {value}", op.symbol())))
            }
            _ => None,
        }
    }
}

impl CompiledQuery {
    /// Render the whole query as a SQL-flavoured string
    pub fn render(&self) -> String {
        let mut sql = String::from("select ");
        if self.distinct {
            sql.push_str("distinct ");
        }
        match &self.projection {
            Some(projection) => sql.push_str(&projection.select_list()),
            None => sql.push('*'),
        }
        sql.push_str(" from ");
        sql.push_str(&self.root_object);
        for alias in &self.aliases {
            let keyword = if alias.eager_fetch { "join fetch" } else { "join" };
            let _ = write!(sql, " {keyword} {} {}", alias.join_path, alias.alias);
        }
        if let Some(predicate) = &self.predicate {
            let _ = write!(sql, " where {predicate}");
        }
        if let Some((group_by, having)) = self.projection.as_ref().and_then(Projection::group_having)
        {
            let _ = write!(sql, " group by {group_by} having {having}");
        }
        if !self.sorts.is_empty() {
            sql.push_str(" order by ");
            for (i, sort) in self.sorts.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                let direction = if sort.direction.is_descending() {
                    "desc"
                } else {
                    "asc"
                };
                let _ = write!(sql, "{} {direction}", sort.property);
            }
        }
        if let Some(max) = self.max_results {
            let _ = write!(sql, " limit {max}");
        }
        if let Some(first) = self.first_result {
            let _ = write!(sql, " offset {first}");
        }
        sql
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
