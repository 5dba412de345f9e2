//! Nesting: partitioning the wide table into per-country groups.
//!
//! Each [`Group`] owns the full sub-table of rows sharing its key, so the
//! union of all groups reconstructs the wide table exactly. Groups come out
//! in first-appearance order of their key; since [`WideTable`] iterates in
//! (country, year) sort order, that is country sort order.

use std::collections::HashMap;

use crate::table::{WideRow, WideTable};

/// Grouping key: country plus its categorical continent attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub country: String,
    pub continent: Option<String>,
}

/// One group with its owned, year-ordered sub-table.
#[derive(Debug, Clone)]
pub struct Group {
    pub key: GroupKey,
    pub rows: Vec<WideRow>,
}

/// Partitions the table by (country, continent).
///
/// A country's continent is whatever its base rows carry; rows contributed
/// only by auxiliary sheets have none, and a country appearing with and
/// without a continent forms two distinct groups (the merge makes this
/// impossible for countries present in the base dataset, because the base
/// join stamps the continent on every matched row).
pub fn nest(table: &WideTable) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for row in table.rows() {
        let key = GroupKey {
            country: row.country.clone(),
            continent: row.continent.clone(),
        };
        match index.get(&key) {
            Some(&i) => groups[i].rows.push(row.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    rows: vec![row.clone()],
                });
            }
        }
    }

    groups
}

/// Flattens groups back into their raw rows, in group order.
///
/// Applied to the output of [`nest`], this reproduces every row of the
/// source table exactly once.
pub fn flatten(groups: &[Group]) -> Vec<WideRow> {
    groups.iter().flat_map(|g| g.rows.iter().cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Observation;
    use crate::table::WideTable;

    fn obs(country: &str, continent: &str, year: i32, life_exp: f64) -> Observation {
        Observation {
            country: country.to_string(),
            continent: continent.to_string(),
            year,
            life_exp,
            pop: 1000.0,
            gdp_per_cap: 500.0,
        }
    }

    fn sample_table() -> WideTable {
        WideTable::merge(
            &[
                obs("Norway", "Europe", 1952, 72.67),
                obs("Norway", "Europe", 1957, 73.44),
                obs("Chad", "Africa", 1952, 38.09),
            ],
            &[],
        )
    }

    #[test]
    fn test_nest_groups_by_country() {
        let groups = nest(&sample_table());

        assert_eq!(groups.len(), 2);
        // (country, year) sort order puts Chad first.
        assert_eq!(groups[0].key.country, "Chad");
        assert_eq!(groups[0].key.continent.as_deref(), Some("Africa"));
        assert_eq!(groups[0].rows.len(), 1);
        assert_eq!(groups[1].key.country, "Norway");
        assert_eq!(groups[1].rows.len(), 2);
    }

    #[test]
    fn test_nest_sub_tables_are_year_ordered() {
        let groups = nest(&sample_table());
        let norway = &groups[1];
        assert_eq!(norway.rows[0].year, 1952);
        assert_eq!(norway.rows[1].year, 1957);
    }

    #[test]
    fn test_flatten_reconstructs_table() {
        let table = sample_table();
        let flattened = flatten(&nest(&table));

        assert_eq!(flattened.len(), table.len());
        for row in &flattened {
            assert_eq!(table.get(&row.country, row.year), Some(row));
        }
    }
}
