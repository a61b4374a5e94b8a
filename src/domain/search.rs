/// Search criteria for members
///
/// Every field is optional; an absent field places no constraint on that
/// dimension. The default value is the unconstrained condition and
/// matches every member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCondition {
    /// Exact username to match
    pub username: Option<String>,
    /// Exact name of the member's team to match
    pub team_name: Option<String>,
    /// Lower age bound, inclusive ("age greater-or-equal")
    pub age_goe: Option<i64>,
    /// Upper age bound, inclusive ("age less-or-equal")
    pub age_loe: Option<i64>,
}
