use sqlx::{QueryBuilder, Sqlite};

use crate::domain::search::SearchCondition;

/// Column of the member search projection a constraint applies to
///
/// Columns are qualified against the projection's aliases
/// (`member m LEFT JOIN team t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Username,
    TeamName,
    Age,
}

impl Column {
    fn qualified(self) -> &'static str {
        match self {
            Self::Username => "m.username",
            Self::TeamName => "t.name",
            Self::Age => "m.age",
        }
    }
}

/// Comparison operator of an atomic constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Equals,
    GreaterOrEqual,
    LessOrEqual,
}

impl Comparison {
    fn sql(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }
}

/// Constraint value, bound as a query parameter when rendered
#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Text(String),
    Integer(i64),
}

/// One atomic constraint: a column compared against a bound value
///
/// Constraints are only produced by the per-field builder functions in
/// this module, which keeps column and value types consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    column: Column,
    comparison: Comparison,
    value: Value,
}

impl Constraint {
    fn matches(&self, username: Option<&str>, age: i64, team_name: Option<&str>) -> bool {
        match &self.value {
            Value::Text(want) => {
                let actual = match self.column {
                    Column::Username => username,
                    Column::TeamName => team_name,
                    Column::Age => return false,
                };
                // Text columns only carry equality constraints.
                self.comparison == Comparison::Equals && actual == Some(want.as_str())
            }
            Value::Integer(want) => {
                if self.column != Column::Age {
                    return false;
                }
                match self.comparison {
                    Comparison::Equals => age == *want,
                    Comparison::GreaterOrEqual => age >= *want,
                    Comparison::LessOrEqual => age <= *want,
                }
            }
        }
    }
}

/// Equality constraint on the member's username, or no constraint when
/// the parameter is absent
pub fn username_eq(username: Option<&str>) -> Option<Constraint> {
    username.map(|username| Constraint {
        column: Column::Username,
        comparison: Comparison::Equals,
        value: Value::Text(username.to_owned()),
    })
}

/// Equality constraint on the joined team's name, or no constraint when
/// the parameter is absent
pub fn team_name_eq(team_name: Option<&str>) -> Option<Constraint> {
    team_name.map(|team_name| Constraint {
        column: Column::TeamName,
        comparison: Comparison::Equals,
        value: Value::Text(team_name.to_owned()),
    })
}

/// Equality constraint on the member's age, or no constraint when the
/// parameter is absent
pub fn age_eq(age: Option<i64>) -> Option<Constraint> {
    age.map(|age| Constraint {
        column: Column::Age,
        comparison: Comparison::Equals,
        value: Value::Integer(age),
    })
}

/// Inclusive lower bound on the member's age, or no constraint when the
/// parameter is absent
pub fn age_goe(age: Option<i64>) -> Option<Constraint> {
    age.map(|age| Constraint {
        column: Column::Age,
        comparison: Comparison::GreaterOrEqual,
        value: Value::Integer(age),
    })
}

/// Inclusive upper bound on the member's age, or no constraint when the
/// parameter is absent
pub fn age_loe(age: Option<i64>) -> Option<Constraint> {
    age.map(|age| Constraint {
        column: Column::Age,
        comparison: Comparison::LessOrEqual,
        value: Value::Integer(age),
    })
}

/// Conjunction of atomic constraints
///
/// The default value is the identity filter: it constrains nothing and
/// matches every row. Absent constraints never reach the filter, so an
/// unconstrained dimension contributes no SQL at all rather than a
/// vacuous `TRUE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    constraints: Vec<Constraint>,
}

impl Filter {
    /// Appends a constraint when one is present; an absent constraint
    /// leaves the filter unchanged
    #[must_use]
    pub fn and(mut self, constraint: Option<Constraint>) -> Self {
        if let Some(constraint) = constraint {
            self.constraints.push(constraint);
        }
        self
    }

    /// True when no constraint is present (the identity filter)
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Number of constraints held by this filter
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Pushes ` WHERE c1 AND c2 ...` onto the query, or nothing when the
    /// filter is empty. Constraint values become bound parameters.
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        let mut separator = " WHERE ";
        for constraint in &self.constraints {
            builder.push(separator);
            separator = " AND ";
            builder.push(constraint.column.qualified());
            builder.push(" ");
            builder.push(constraint.comparison.sql());
            builder.push(" ");
            match &constraint.value {
                Value::Text(text) => {
                    builder.push_bind(text.clone());
                }
                Value::Integer(value) => {
                    builder.push_bind(*value);
                }
            }
        }
    }

    /// Evaluates the filter against one candidate row view in memory
    ///
    /// Semantically equivalent to the SQL rendered by
    /// [`push_where`](Self::push_where) for a row with the given
    /// username, age and joined team name.
    pub fn matches(&self, username: Option<&str>, age: i64, team_name: Option<&str>) -> bool {
        self.constraints
            .iter()
            .all(|constraint| constraint.matches(username, age, team_name))
    }
}

/// Builds the composed filter for a search condition
///
/// The result is the logical AND of every present criterion; absent
/// criteria are omitted entirely. A condition with no present criteria
/// composes to the identity filter.
pub fn compose_filter(condition: &SearchCondition) -> Filter {
    Filter::default()
        .and(username_eq(condition.username.as_deref()))
        .and(team_name_eq(condition.team_name.as_deref()))
        .and(age_goe(condition.age_goe))
        .and(age_loe(condition.age_loe))
}
