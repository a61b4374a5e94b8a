// Dynamic query filter composition
// Pure construction of composed filters; execution lives in the
// infrastructure layer.

pub mod filter;

pub use filter::{
    age_eq, age_goe, age_loe, compose_filter, team_name_eq, username_eq, Constraint, Filter,
};
