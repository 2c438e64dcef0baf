//! Competition ranking shared by every component that orders players.
//!
//! Rank is one plus the number of strictly better values, so tied players
//! share a rank and the following rank is skipped.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::models::PlayerId;

/// Players sharing one value, starting at a zero-based rank cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct RankGroup<'a, T> {
    pub cursor: usize,
    pub value: T,
    pub members: Vec<&'a str>,
}

impl<T> RankGroup<'_, T> {
    /// One-based rank shared by every member.
    pub fn rank(&self) -> u8 {
        (self.cursor + 1) as u8
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Groups players by value, best (largest) value first.
pub fn rank_groups<'a, T, I>(values: I) -> Vec<RankGroup<'a, T>>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = (&'a str, T)>,
{
    let mut sorted: Vec<(&'a str, T)> = values.into_iter().collect();
    sorted.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    let mut groups: Vec<RankGroup<'a, T>> = Vec::new();
    for (index, (player, value)) in sorted.into_iter().enumerate() {
        match groups.last_mut() {
            Some(group) if group.value == value => group.members.push(player),
            _ => groups.push(RankGroup {
                cursor: index,
                value,
                members: vec![player],
            }),
        }
    }
    groups
}

/// One-based competition rank per player.
pub fn competition_ranks<'a, T, I>(values: I) -> BTreeMap<PlayerId, u8>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = (&'a str, T)>,
{
    rank_groups(values)
        .iter()
        .flat_map(|group| {
            let rank = group.rank();
            group
                .members
                .iter()
                .map(move |player| (player.to_string(), rank))
        })
        .collect()
}

/// Ranks for a map of raw scores.
pub fn ranks_of(scores: &BTreeMap<PlayerId, i32>) -> BTreeMap<PlayerId, u8> {
    competition_ranks(scores.iter().map(|(id, score)| (id.as_str(), *score)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scores(values: &[(&str, i32)]) -> BTreeMap<PlayerId, i32> {
        values.iter().map(|(p, s)| (p.to_string(), *s)).collect()
    }

    #[rstest]
    #[case(&[("a", 40000), ("b", 30000), ("c", 20000), ("d", 10000)], [1, 2, 3, 4])]
    #[case(&[("a", 35000), ("b", 25000), ("c", 20000), ("d", 20000)], [1, 2, 3, 3])]
    #[case(&[("a", 30000), ("b", 30000), ("c", 30000), ("d", 10000)], [1, 1, 1, 4])]
    #[case(&[("a", 25000), ("b", 25000), ("c", 25000), ("d", 25000)], [1, 1, 1, 1])]
    #[case(&[("a", -2000), ("b", 52000), ("c", 25000), ("d", 25000)], [4, 1, 2, 2])]
    fn assigns_competition_ranks(#[case] values: &[(&str, i32)], #[case] expected: [u8; 4]) {
        let ranks = ranks_of(&scores(values));
        let actual: Vec<u8> = ["a", "b", "c", "d"].iter().map(|p| ranks[*p]).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn groups_carry_cursor_and_members() {
        let values = scores(&[("a", 35000), ("b", 25000), ("c", 20000), ("d", 20000)]);
        let groups = rank_groups(values.iter().map(|(p, s)| (p.as_str(), *s)));

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2].cursor, 2);
        assert_eq!(groups[2].members, vec!["c", "d"]);
        assert_eq!(groups[2].rank(), 3);
    }

    #[test]
    fn ranks_floating_point_values() {
        let ranks = competition_ranks([("a", 10.5), ("b", -3.0), ("c", 10.5), ("d", 0.0)]);
        assert_eq!(ranks["a"], 1);
        assert_eq!(ranks["c"], 1);
        assert_eq!(ranks["d"], 3);
        assert_eq!(ranks["b"], 4);
    }
}
