//! Long- and wide-format tables and the outer-join merge between them.
//!
//! A [`LongTable`] holds one variable as (country, year, value) rows, the
//! shape every source is normalized into. [`WideTable`] is the merged view:
//! one row per (country, year) carrying every observed measurement. Merging
//! is a full outer join, so no source row is ever dropped; a measurement a
//! source did not supply is simply absent from the row's value map.

use std::collections::BTreeMap;

use crate::parser::Observation;

pub type Year = i32;

/// Column names supplied by the base dataset.
pub const LIFE_EXP: &str = "lifeExp";
pub const POP: &str = "pop";
pub const GDP_PER_CAP: &str = "gdpPercap";

/// One (country, year, value) observation of a single variable.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub country: String,
    pub year: Year,
    pub value: f64,
}

/// A long-format table: one semantic variable, many observations.
#[derive(Debug, Clone)]
pub struct LongTable {
    pub variable: String,
    pub rows: Vec<LongRow>,
}

/// One merged row keyed by (country, year).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideRow {
    pub country: String,
    pub year: Year,
    /// Only the base dataset knows the continent; rows contributed solely
    /// by auxiliary sheets leave it unset.
    pub continent: Option<String>,
    /// variable name -> value. Absent key means the measurement is missing.
    pub values: BTreeMap<String, f64>,
}

impl WideRow {
    fn new(country: &str, year: Year) -> Self {
        WideRow {
            country: country.to_string(),
            year,
            continent: None,
            values: BTreeMap::new(),
        }
    }

    pub fn value(&self, variable: &str) -> Option<f64> {
        self.values.get(variable).copied()
    }
}

/// The merged wide table. Rows are keyed by (country, year) and iterate in
/// key sort order; `columns` records each variable in merge order.
#[derive(Debug, Clone, Default)]
pub struct WideTable {
    columns: Vec<String>,
    rows: BTreeMap<(String, Year), WideRow>,
}

impl WideTable {
    pub fn new() -> Self {
        WideTable::default()
    }

    /// Full outer join with a long table. Existing rows gain the new
    /// variable where the keys match; unmatched long rows become new wide
    /// rows with only that variable set.
    pub fn join_long(&mut self, table: &LongTable) {
        self.register_column(&table.variable);

        for row in &table.rows {
            let wide = self
                .rows
                .entry((row.country.clone(), row.year))
                .or_insert_with(|| WideRow::new(&row.country, row.year));
            wide.values.insert(table.variable.clone(), row.value);
        }
    }

    /// Full outer join with the base dataset, contributing the continent
    /// attribute and the three base measurements per (country, year).
    pub fn join_base(&mut self, observations: &[Observation]) {
        for column in [LIFE_EXP, POP, GDP_PER_CAP] {
            self.register_column(column);
        }

        for obs in observations {
            let wide = self
                .rows
                .entry((obs.country.clone(), obs.year))
                .or_insert_with(|| WideRow::new(&obs.country, obs.year));
            wide.continent = Some(obs.continent.clone());
            wide.values.insert(LIFE_EXP.to_string(), obs.life_exp);
            wide.values.insert(POP.to_string(), obs.pop);
            wide.values.insert(GDP_PER_CAP.to_string(), obs.gdp_per_cap);
        }
    }

    /// Folds the auxiliary tables in input order, then joins the base
    /// dataset, matching how the sources are declared in configuration.
    pub fn merge(base: &[Observation], auxiliary: &[LongTable]) -> Self {
        let mut table = WideTable::new();
        for aux in auxiliary {
            table.join_long(aux);
        }
        table.join_base(base);
        table
    }

    fn register_column(&mut self, name: &str) {
        if !self.columns.iter().any(|c| c == name) {
            self.columns.push(name.to_string());
        }
    }

    /// Variables present in the table, in merge order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in (country, year) sort order.
    pub fn rows(&self) -> impl Iterator<Item = &WideRow> {
        self.rows.values()
    }

    pub fn get(&self, country: &str, year: Year) -> Option<&WideRow> {
        self.rows.get(&(country.to_string(), year))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
