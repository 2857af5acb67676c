use std::fs;
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::{MealError, Result};
use crate::models::{Catalog, FoodItem};

const NAME_HEADERS: &[&str] = &["food", "item", "name"];
const CALORIE_HEADERS: &[&str] = &["calories", "kcal", "energy"];
const PROTEIN_HEADERS: &[&str] = &["protein", "prot", "proteins"];
const CARB_HEADERS: &[&str] = &["carbs", "carbohydrates", "carb"];
const FAT_HEADERS: &[&str] = &["fat", "fats"];
const SERVING_HEADERS: &[&str] = &["serving size", "serving", "portion"];
const FIBER_HEADERS: &[&str] = &["fiber", "fibre"];
const VEGAN_HEADERS: &[&str] = &["vegan", "is_vegan", "vegan?"];
const ALLERGEN_HEADERS: &[&str] = &["allergens", "allergy", "contains"];

const VEGAN_TRUTHY: &[&str] = &["y", "yes", "true", "1", "vegan"];

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    pub name: usize,
    pub calories: Option<usize>,
    pub protein: Option<usize>,
    pub carbs: Option<usize>,
    pub fat: Option<usize>,
    pub serving: Option<usize>,
    pub fiber: Option<usize>,
    pub vegan: Option<usize>,
    pub allergens: Option<usize>,
}

impl ColumnMap {
    /// Guess columns from header names (case-insensitive, first option wins).
    ///
    /// The name column falls back to the first column.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(MealError::EmptyCatalog);
        }

        let lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |options: &[&str]| {
            options
                .iter()
                .find_map(|o| lower.iter().position(|h| h == o))
        };

        let map = Self {
            name: find(NAME_HEADERS).unwrap_or(0),
            calories: find(CALORIE_HEADERS),
            protein: find(PROTEIN_HEADERS),
            carbs: find(CARB_HEADERS),
            fat: find(FAT_HEADERS),
            serving: find(SERVING_HEADERS),
            fiber: find(FIBER_HEADERS),
            vegan: find(VEGAN_HEADERS),
            allergens: find(ALLERGEN_HEADERS),
        };

        if map.calories.is_none() && map.protein.is_none() {
            return Err(MealError::MissingColumn("calories or protein".to_string()));
        }
        Ok(map)
    }
}

/// Parse a loosely formatted number such as "12 g"; unparseable is 0.
///
/// Negative and non-finite values become 0.
pub fn coerce_number(raw: &str) -> f64 {
    let raw = raw.trim();
    let value = raw.parse::<f64>().ok().or_else(|| {
        let digits: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        digits.parse::<f64>().ok()
    });

    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Interpret a vegan cell.
pub fn is_truthy(raw: &str) -> bool {
    let raw = raw.trim().to_lowercase();
    VEGAN_TRUTHY.contains(&raw.as_str())
}

fn cell<'r>(record: &'r StringRecord, column: Option<usize>) -> Option<&'r str> {
    column
        .and_then(|c| record.get(c))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn row_to_food(record: &StringRecord, cols: &ColumnMap) -> Option<FoodItem> {
    let name = cell(record, Some(cols.name))?;
    let number = |column| cell(record, column).map(coerce_number).unwrap_or(0.0);

    Some(FoodItem {
        name: name.to_string(),
        calories: number(cols.calories),
        protein_g: number(cols.protein),
        carbs_g: number(cols.carbs),
        fat_g: number(cols.fat),
        fiber_g: number(cols.fiber),
        serving_description: cell(record, cols.serving).map(str::to_string),
        is_vegan: cell(record, cols.vegan).is_some_and(is_truthy),
        allergens: cell(record, cols.allergens).unwrap_or_default().to_string(),
    })
}

/// Parse CSV text into a catalog.
pub fn parse_catalog_csv(content: &str) -> Result<Catalog> {
    if content.trim().is_empty() {
        return Ok(Catalog::default());
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());
    let cols = ColumnMap::from_headers(reader.headers()?)?;
    debug!(?cols, "resolved catalog columns");

    let mut foods = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        match row_to_food(&record, &cols) {
            Some(food) => foods.push(food),
            None => debug!(row = line + 2, "skipping row without a name"),
        }
    }

    Ok(Catalog::new(foods))
}

/// Parse a worksheet into a catalog; the first row holds the headers.
pub fn parse_catalog_range(range: &Range<Data>) -> Result<Catalog> {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|c| c.to_string()).collect::<StringRecord>());

    let Some(headers) = rows.next() else {
        return Ok(Catalog::default());
    };
    let cols = ColumnMap::from_headers(&headers)?;
    debug!(?cols, "resolved worksheet columns");

    let mut foods = Vec::new();
    for (line, record) in rows.enumerate() {
        match row_to_food(&record, &cols) {
            Some(food) => foods.push(food),
            None => debug!(row = line + 2, "skipping row without a name"),
        }
    }

    Ok(Catalog::new(foods))
}

/// Read the first sheet of a workbook. A workbook without sheets is empty.
pub fn load_catalog_spreadsheet<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let mut workbook = open_workbook_auto(path)?;
    match workbook.worksheet_range_at(0) {
        Some(range) => parse_catalog_range(&range?),
        None => Ok(Catalog::default()),
    }
}

/// Parse a JSON array of items into a catalog, dropping invalid ones.
pub fn parse_catalog_json(content: &str) -> Result<Catalog> {
    if content.trim().is_empty() {
        return Ok(Catalog::default());
    }

    let foods: Vec<FoodItem> = serde_json::from_str(content)?;
    let valid = foods
        .into_iter()
        .filter(|food| {
            let ok = !food.name.trim().is_empty() && food.is_valid();
            if !ok {
                warn!(name = %food.name, "skipping item with invalid nutrition values");
            }
            ok
        })
        .collect();

    Ok(Catalog::new(valid))
}

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// Load a catalog by extension: `.json`, a spreadsheet, or CSV otherwise.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        return load_catalog_spreadsheet(path);
    }

    let content = fs::read_to_string(path)?;
    if extension == "json" {
        parse_catalog_json(&content)
    } else {
        parse_catalog_csv(&content)
    }
}
