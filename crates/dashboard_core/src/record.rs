use std::fmt;

use serde_json::{Map, Number, Value};

/// Category value that keeps a record out of the summary chart.
pub const UNCATEGORIZED: &str = "uncategorized";

/// The fixed column schema of the recipes collection, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Id,
    Name,
    Url,
    Category,
    Author,
    Summary,
    Rating,
    RatingCount,
    ReviewCount,
    Ingredients,
    Directions,
    Prep,
    Cook,
    Total,
    Servings,
    Yield,
    Calories,
}

impl Column {
    pub const ALL: [Column; 17] = [
        Column::Id,
        Column::Name,
        Column::Url,
        Column::Category,
        Column::Author,
        Column::Summary,
        Column::Rating,
        Column::RatingCount,
        Column::ReviewCount,
        Column::Ingredients,
        Column::Directions,
        Column::Prep,
        Column::Cook,
        Column::Total,
        Column::Servings,
        Column::Yield,
        Column::Calories,
    ];

    /// Document key, also used as the column header.
    pub fn name(self) -> &'static str {
        match self {
            Column::Id => "_id",
            Column::Name => "name",
            Column::Url => "url",
            Column::Category => "category",
            Column::Author => "author",
            Column::Summary => "summary",
            Column::Rating => "rating",
            Column::RatingCount => "rating_count",
            Column::ReviewCount => "review_count",
            Column::Ingredients => "ingredients",
            Column::Directions => "directions",
            Column::Prep => "prep",
            Column::Cook => "cook",
            Column::Total => "total",
            Column::Servings => "servings",
            Column::Yield => "yield",
            Column::Calories => "calories",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|column| column.name() == name)
    }

    /// The identifier stays in the data but is never shown in the grid.
    pub fn is_hidden(self) -> bool {
        self == Column::Id
    }

    pub fn visible() -> impl Iterator<Item = Column> {
        Column::ALL.into_iter().filter(|column| !column.is_hidden())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field as stored in a document. The JSON type is kept so that a value
/// read and written back unedited is stored exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Bool(bool),
    /// An explicit `null`; displays as the empty string.
    Null,
    /// An array or object, displayed as compact JSON.
    Nested(Value),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Numeric reading of the value; text is parsed leniently after trimming.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => number.as_f64(),
            FieldValue::Text(text) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            FieldValue::Bool(_) | FieldValue::Null | FieldValue::Nested(_) => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(Number::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Bool(flag) => write!(f, "{flag}"),
            FieldValue::Null => Ok(()),
            FieldValue::Nested(value) => write!(f, "{value}"),
        }
    }
}

/// One recipe document. Every field is optional; a missing field displays as
/// the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Store-assigned identifier, already stringified.
    pub id: Option<String>,
    pub name: Option<FieldValue>,
    pub url: Option<FieldValue>,
    pub category: Option<FieldValue>,
    pub author: Option<FieldValue>,
    pub summary: Option<FieldValue>,
    pub rating: Option<FieldValue>,
    pub rating_count: Option<FieldValue>,
    pub review_count: Option<FieldValue>,
    pub ingredients: Option<FieldValue>,
    pub directions: Option<FieldValue>,
    pub prep: Option<FieldValue>,
    pub cook: Option<FieldValue>,
    pub total: Option<FieldValue>,
    pub servings: Option<FieldValue>,
    pub yield_: Option<FieldValue>,
    pub calories: Option<FieldValue>,
    /// Document keys outside the schema, carried through saves untouched.
    pub extra: Map<String, Value>,
}

impl Record {
    /// A row as produced by "Add Row": every field present and empty.
    pub fn blank() -> Self {
        let mut record = Record {
            id: Some(String::new()),
            ..Record::default()
        };
        for column in Column::visible() {
            record.set(column, Some(FieldValue::text("")));
        }
        record
    }

    /// Field value for `column`. The identifier is not a field value and
    /// always yields `None` here; read `id` instead.
    pub fn get(&self, column: Column) -> Option<&FieldValue> {
        match column {
            Column::Id => None,
            _ => self.slot(column).as_ref(),
        }
    }

    /// Replace the value for `column`. For the identifier, the value's
    /// display text becomes the new id.
    pub fn set(&mut self, column: Column, value: Option<FieldValue>) {
        match column {
            Column::Id => self.id = value.map(|v| v.to_string()),
            _ => *self.slot_mut(column) = value,
        }
    }

    /// Whether the record has a non-null value for `column`.
    pub fn has(&self, column: Column) -> bool {
        match column {
            Column::Id => self.id.is_some(),
            _ => !matches!(self.slot(column), None | Some(FieldValue::Null)),
        }
    }

    pub fn display(&self, column: Column) -> String {
        match column {
            Column::Id => self.id.clone().unwrap_or_default(),
            _ => self
                .slot(column)
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }

    /// Display text of every column in schema order.
    pub fn cells(&self) -> Vec<String> {
        Column::ALL.iter().map(|c| self.display(*c)).collect()
    }

    pub fn is_uncategorized(&self) -> bool {
        self.display(Column::Category) == UNCATEGORIZED
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating.as_ref().and_then(FieldValue::as_f64)
    }

    fn slot(&self, column: Column) -> &Option<FieldValue> {
        match column {
            Column::Name => &self.name,
            Column::Url => &self.url,
            Column::Category => &self.category,
            Column::Author => &self.author,
            Column::Summary => &self.summary,
            Column::Rating => &self.rating,
            Column::RatingCount => &self.rating_count,
            Column::ReviewCount => &self.review_count,
            Column::Ingredients => &self.ingredients,
            Column::Directions => &self.directions,
            Column::Prep => &self.prep,
            Column::Cook => &self.cook,
            Column::Total => &self.total,
            Column::Servings => &self.servings,
            Column::Yield => &self.yield_,
            Column::Calories => &self.calories,
            Column::Id => unreachable!("identifier is not stored as a field value"),
        }
    }

    fn slot_mut(&mut self, column: Column) -> &mut Option<FieldValue> {
        match column {
            Column::Name => &mut self.name,
            Column::Url => &mut self.url,
            Column::Category => &mut self.category,
            Column::Author => &mut self.author,
            Column::Summary => &mut self.summary,
            Column::Rating => &mut self.rating,
            Column::RatingCount => &mut self.rating_count,
            Column::ReviewCount => &mut self.review_count,
            Column::Ingredients => &mut self.ingredients,
            Column::Directions => &mut self.directions,
            Column::Prep => &mut self.prep,
            Column::Cook => &mut self.cook,
            Column::Total => &mut self.total,
            Column::Servings => &mut self.servings,
            Column::Yield => &mut self.yield_,
            Column::Calories => &mut self.calories,
            Column::Id => unreachable!("identifier is not stored as a field value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_name(column.name()), Some(column));
        }
        assert_eq!(Column::from_name("nope"), None);
        assert_eq!(Column::visible().count(), 16);
    }

    #[test]
    fn numbers_display_without_trailing_fraction() {
        assert_eq!(FieldValue::from(4).to_string(), "4");
        let half = FieldValue::Number(Number::from_f64(4.5).unwrap());
        assert_eq!(half.to_string(), "4.5");
        assert_eq!(FieldValue::text(" 3.25 ").as_f64(), Some(3.25));
        assert_eq!(FieldValue::text("n/a").as_f64(), None);
    }

    #[test]
    fn json_types_display_as_text() {
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
        assert_eq!(FieldValue::Null.to_string(), "");
        let nested = FieldValue::Nested(serde_json::json!(["salt", "water"]));
        assert_eq!(nested.to_string(), r#"["salt","water"]"#);
        assert_eq!(nested.as_f64(), None);

        let record = Record {
            servings: Some(FieldValue::Null),
            ..Record::default()
        };
        assert!(!record.has(Column::Servings));
        assert_eq!(record.display(Column::Servings), "");
    }
}
