//! Sort stage: stable ordering by a sequence of column descriptors.

use crate::model::{CellValue, ColumnDef, ColumnRegistry};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction for one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn is_desc(self) -> bool {
        matches!(self, SortDirection::Desc)
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// A (column, direction) pair used to order rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Parse `column`, `column:asc` or `column:desc`.
///
/// Only a trailing `:asc` or `:desc` is read as a direction, so column ids
/// that contain a colon (`a:b`, `a:b:desc`) parse as written.
impl FromStr for SortDescriptor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.rsplit_once(':') {
            Some((column, "asc")) => (column, SortDirection::Asc),
            Some((column, "desc")) => (column, SortDirection::Desc),
            _ => (s, SortDirection::Asc),
        };
        if column.trim().is_empty() {
            return Err("sort column must not be empty".to_string());
        }
        Ok(Self {
            column_id: column.trim().to_string(),
            direction,
        })
    }
}

/// Order rows by `descriptors`, each one breaking ties left by the previous.
///
/// Descriptors naming unknown or unsortable columns are skipped. The sort is
/// stable, so rows tied on every descriptor keep their incoming order. An
/// empty (or fully skipped) descriptor list returns `rows` untouched.
pub fn sort<'a, R, P>(
    rows: Vec<&'a R>,
    columns: &ColumnRegistry<R, P>,
    descriptors: &[SortDescriptor],
) -> Vec<&'a R> {
    let keys: Vec<(&ColumnDef<R, P>, bool)> = descriptors
        .iter()
        .filter_map(|d| {
            columns
                .get(&d.column_id)
                .filter(|c| c.is_sortable())
                .map(|c| (c, d.direction.is_desc()))
        })
        .collect();

    if keys.is_empty() {
        return rows;
    }

    // Read every sort key once per row rather than once per comparison.
    let mut decorated: Vec<(Vec<CellValue>, &'a R)> = rows
        .into_iter()
        .map(|row| (keys.iter().map(|(c, _)| c.value(row)).collect(), row))
        .collect();

    decorated.sort_by(|(a, _), (b, _)| compare_keys(a, b, &keys));

    decorated.into_iter().map(|(_, row)| row).collect()
}

fn compare_keys<R, P>(a: &[CellValue], b: &[CellValue], keys: &[(&ColumnDef<R, P>, bool)]) -> Ordering {
    a.iter()
        .zip(b)
        .zip(keys)
        .map(|((x, y), (_, desc))| x.compare(y).resolve(*desc))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        name: &'static str,
        dept: Option<&'static str>,
        salary: Option<i64>,
    }

    fn columns() -> ColumnRegistry<Row> {
        ColumnRegistry::new(vec![
            ColumnDef::new("name", |r: &Row| r.name.into()),
            ColumnDef::new("dept", |r: &Row| r.dept.into()),
            ColumnDef::new("salary", |r: &Row| r.salary.into()),
            ColumnDef::new("locked", |r: &Row| r.name.into()).sortable(false),
        ])
        .unwrap()
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "carla", dept: Some("ops"), salary: Some(300) },
            Row { name: "Ana", dept: None, salary: Some(1200) },
            Row { name: "beto", dept: Some("eng"), salary: None },
            Row { name: "Dora", dept: Some("eng"), salary: Some(90) },
        ]
    }

    fn names(rows: &[&Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    fn sorted(descriptors: &[SortDescriptor]) -> Vec<&'static str> {
        let rows = rows();
        let refs: Vec<&Row> = rows.iter().collect();
        names(&sort(refs, &columns(), descriptors))
    }

    #[test]
    fn empty_descriptors_keep_order() {
        assert_eq!(sorted(&[]), vec!["carla", "Ana", "beto", "Dora"]);
    }

    #[test]
    fn strings_sort_ignoring_case() {
        assert_eq!(
            sorted(&[SortDescriptor::asc("name")]),
            vec!["Ana", "beto", "carla", "Dora"]
        );
    }

    #[test]
    fn desc_reverses_asc() {
        assert_eq!(
            sorted(&[SortDescriptor::desc("name")]),
            vec!["Dora", "carla", "beto", "Ana"]
        );
    }

    #[test]
    fn numbers_sort_numerically() {
        assert_eq!(
            sorted(&[SortDescriptor::asc("salary")]),
            vec!["Dora", "carla", "Ana", "beto"]
        );
    }

    #[test]
    fn nulls_stay_last_in_both_directions() {
        assert_eq!(
            sorted(&[SortDescriptor::desc("salary")]),
            vec!["Ana", "carla", "Dora", "beto"]
        );
        assert_eq!(
            sorted(&[SortDescriptor::asc("dept")]),
            vec!["beto", "Dora", "carla", "Ana"]
        );
        assert_eq!(
            sorted(&[SortDescriptor::desc("dept")]),
            vec!["carla", "beto", "Dora", "Ana"]
        );
    }

    #[test]
    fn later_descriptors_break_ties() {
        assert_eq!(
            sorted(&[SortDescriptor::asc("dept"), SortDescriptor::desc("name")]),
            vec!["Dora", "beto", "carla", "Ana"]
        );
    }

    #[test]
    fn unsortable_and_unknown_columns_are_ignored() {
        assert_eq!(
            sorted(&[SortDescriptor::asc("locked"), SortDescriptor::asc("ghost")]),
            vec!["carla", "Ana", "beto", "Dora"]
        );
    }

    #[test]
    fn ties_keep_incoming_order() {
        // Both "eng" rows tie on dept; beto precedes Dora in the input.
        assert_eq!(
            sorted(&[SortDescriptor::asc("dept")])[..2],
            ["beto", "Dora"]
        );
    }

    #[test]
    fn descriptor_parses_from_str() {
        assert_eq!("name".parse::<SortDescriptor>(), Ok(SortDescriptor::asc("name")));
        assert_eq!(
            "salary:desc".parse::<SortDescriptor>(),
            Ok(SortDescriptor::desc("salary"))
        );
        assert!(":desc".parse::<SortDescriptor>().is_err());
        assert!("".parse::<SortDescriptor>().is_err());
    }

    #[test]
    fn column_id_with_colon_keeps_unrecognised_suffix() {
        assert_eq!("meta:owner".parse::<SortDescriptor>(), Ok(SortDescriptor::asc("meta:owner")));
        assert_eq!(
            "meta:owner:desc".parse::<SortDescriptor>(),
            Ok(SortDescriptor::desc("meta:owner"))
        );
    }

    #[derive(Debug)]
    struct Cell(CellValue);

    fn mixed_values(input: Vec<CellValue>) -> Vec<CellValue> {
        let registry: ColumnRegistry<Cell> =
            ColumnRegistry::new(vec![ColumnDef::new("v", |c: &Cell| c.0.clone())]).unwrap();
        let cells: Vec<Cell> = input.into_iter().map(Cell).collect();
        sort(cells.iter().collect(), &registry, &[SortDescriptor::asc("v")])
            .into_iter()
            .map(|c| c.0.clone())
            .collect()
    }

    #[test]
    fn mixed_numbers_and_text_sort_the_same_from_any_input_order() {
        let expected = vec![
            CellValue::from(9),
            CellValue::from(10),
            CellValue::from(true),
            CellValue::from("5"),
            CellValue::Null,
        ];

        let forward = mixed_values(vec![
            CellValue::from(9),
            CellValue::from(10),
            CellValue::from("5"),
            CellValue::Null,
            CellValue::from(true),
        ]);
        let backward = mixed_values(vec![
            CellValue::from(true),
            CellValue::Null,
            CellValue::from("5"),
            CellValue::from(10),
            CellValue::from(9),
        ]);

        assert_eq!(forward, expected);
        assert_eq!(backward, expected);
    }

    #[test]
    fn large_mixed_column_sorts_without_panicking() {
        let input: Vec<CellValue> = (0..300)
            .map(|i| match i % 3 {
                0 => CellValue::from((i * 7919) % 101),
                1 => CellValue::Text(((i * 31) % 97).to_string()),
                _ => CellValue::from(i % 2 == 0),
            })
            .collect();

        let values = mixed_values(input);

        let first_text = values.iter().position(|v| matches!(v, CellValue::Text(_)));
        let last_number = values.iter().rposition(|v| matches!(v, CellValue::Number(_)));
        assert!(last_number < first_text);
    }

    #[test]
    fn accented_names_sort_with_base_letters() {
        let names: Vec<CellValue> = ["Óscar", "zoe", "Ángel", "beto", "Muñoz", "Murillo"]
            .into_iter()
            .map(CellValue::from)
            .collect();

        let ordered: Vec<String> = mixed_values(names).iter().map(CellValue::to_search_text).collect();

        assert_eq!(ordered, vec!["Ángel", "beto", "Muñoz", "Murillo", "Óscar", "zoe"]);
    }
}
