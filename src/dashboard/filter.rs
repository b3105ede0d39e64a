use crate::types::Team;

/// Teams whose name contains `query`, ignoring case, in their original order.
pub fn filter_teams<'a>(teams: &'a [Team], query: &str) -> Vec<&'a Team> {
    let needle = query.to_lowercase();
    teams
        .iter()
        .filter(|team| team.name.to_lowercase().contains(&needle))
        .collect()
}
