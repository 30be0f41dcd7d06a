use std::{io::Read, path::Path};

use tracing::{info, warn};

use super::repo_types::ReferenceRow;
use crate::{
    error::{AppError, AppResult},
    parse::lenient_f64,
};

/// Reference foods in file order. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct FoodTable {
    rows: Vec<ReferenceRow>,
}

struct Columns {
    food: usize,
    calories: Option<usize>,
    protein: Option<usize>,
    carbs: Option<usize>,
    fat: Option<usize>,
    fiber: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> AppResult<Self> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |name: &str| names.iter().position(|h| h == name);

        Ok(Self {
            food: find("food").ok_or_else(|| AppError::Table("missing `food` column".into()))?,
            calories: find("calories"),
            protein: find("protein"),
            carbs: find("carbs"),
            fat: find("fat"),
            fiber: find("fiber"),
        })
    }
}

impl FoodTable {
    pub fn new(rows: Vec<ReferenceRow>) -> Self {
        Self { rows }
    }

    /// Load the table from a CSV file on disk.
    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(path = %path.display(), foods = table.len(), "reference table loaded");
        Ok(table)
    }

    /// Parse CSV with a header row. Header names are case-insensitive,
    /// nutrient cells default to 0, rows without a food name are skipped.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let cols = Columns::from_headers(rdr.headers()?)?;

        let mut rows = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record?;
            let food = record.get(cols.food).unwrap_or("").trim();
            if food.is_empty() {
                warn!(row = line + 1, "skipping reference row without a food name");
                continue;
            }
            let cell = |idx: Option<usize>| lenient_f64(idx.and_then(|i| record.get(i)));
            rows.push(ReferenceRow {
                food: food.to_string(),
                calories: cell(cols.calories),
                protein: cell(cols.protein),
                carbs: cell(cols.carbs),
                fat: cell(cols.fat),
                fiber: cell(cols.fiber),
            });
        }
        Ok(Self::new(rows))
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
