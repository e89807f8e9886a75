//! The edit form's raw input and its parse step.
//!
//! A [`Draft`] holds exactly what the user typed. Nothing in it is trusted until
//! [`Draft::parse`] turns it into [`ProductFields`], collecting every problem it
//! finds into a [`ValidationError`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::{Product, ProductFields};

/// One of the four editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Name,
    Price,
    Description,
    Stock,
}

impl DraftField {
    pub fn as_str(self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Price => "price",
            DraftField::Description => "description",
            DraftField::Stock => "stock",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown draft field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for DraftField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(DraftField::Name),
            "price" => Ok(DraftField::Price),
            "description" => Ok(DraftField::Description),
            "stock" => Ok(DraftField::Stock),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FieldProblem {
    #[error("is required")]
    Missing,
    #[error("is not a number")]
    NotANumber,
    #[error("is not a whole number")]
    NotAnInteger,
    #[error("must not be negative")]
    Negative,
    #[error("is too large")]
    TooLarge,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{field} {problem}")]
pub struct FieldIssue {
    pub field: DraftField,
    pub problem: FieldProblem,
}

/// Every problem found in a draft, in form order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid product draft: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn has(&self, field: DraftField) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// String-typed form state, optionally bound to the product being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Draft {
    name: String,
    price: String,
    description: String,
    stock: String,
    target: Option<String>,
}

impl Draft {
    /// An empty draft for the "add" form.
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft pre-filled from `product` for the "edit" form.
    pub fn for_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            stock: product.stock.to_string(),
            target: Some(product.id.clone()),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, field: DraftField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Price => self.price = value,
            DraftField::Description => self.description = value,
            DraftField::Stock => self.stock = value,
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Price => &self.price,
            DraftField::Description => &self.description,
            DraftField::Stock => &self.stock,
        }
    }

    /// Id of the product being edited; `None` while creating.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Validates the raw input and converts it to typed fields.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] listing every rejected field when the name
    /// is blank, the price is not unsigned decimal notation, or the stock is not
    /// an unsigned integer.
    pub fn parse(&self) -> Result<ProductFields, ValidationError> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(FieldIssue {
                field: DraftField::Name,
                problem: FieldProblem::Missing,
            });
        }
        let price = parse_price(&self.price).map_err(|problem| {
            issues.push(FieldIssue {
                field: DraftField::Price,
                problem,
            })
        });
        let stock = parse_stock(&self.stock).map_err(|problem| {
            issues.push(FieldIssue {
                field: DraftField::Stock,
                problem,
            })
        });

        match (price, stock) {
            (Ok(price), Ok(stock)) if issues.is_empty() => Ok(ProductFields {
                name: self.name.clone(),
                price,
                description: self.description.clone(),
                stock,
            }),
            _ => Err(ValidationError { issues }),
        }
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// `12`, `12.`, `12.5` and `.5`, nothing else.
fn is_decimal(s: &str) -> bool {
    match s.split_once('.') {
        Some((int, frac)) => {
            all_digits(int) && all_digits(frac) && !(int.is_empty() && frac.is_empty())
        }
        None => !s.is_empty() && all_digits(s),
    }
}

fn parse_price(raw: &str) -> Result<f64, FieldProblem> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(FieldProblem::Missing);
    }
    if let Some(rest) = s.strip_prefix('-') {
        return Err(if is_decimal(rest) {
            FieldProblem::Negative
        } else {
            FieldProblem::NotANumber
        });
    }
    if !is_decimal(s) {
        return Err(FieldProblem::NotANumber);
    }
    match s.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(FieldProblem::TooLarge),
        Err(_) => Err(FieldProblem::NotANumber),
    }
}

fn parse_stock(raw: &str) -> Result<u32, FieldProblem> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(FieldProblem::Missing);
    }
    if let Some(rest) = s.strip_prefix('-') {
        return Err(if !rest.is_empty() && all_digits(rest) {
            FieldProblem::Negative
        } else {
            FieldProblem::NotAnInteger
        });
    }
    if !all_digits(s) {
        return Err(FieldProblem::NotAnInteger);
    }
    s.parse::<u32>().map_err(|_| FieldProblem::TooLarge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn draft(name: &str, price: &str, stock: &str) -> Draft {
        Draft::new()
            .with(DraftField::Name, name)
            .with(DraftField::Price, price)
            .with(DraftField::Stock, stock)
    }

    #[test_case("9.99", 9.99 ; "two decimals")]
    #[test_case("10", 10.0 ; "integer notation")]
    #[test_case(".5", 0.5 ; "leading dot")]
    #[test_case(" 3.25 ", 3.25 ; "surrounding whitespace")]
    #[test_case("0", 0.0 ; "zero")]
    fn test_price_accepted(raw: &str, expected: f64) {
        assert_eq!(parse_price(raw), Ok(expected));
    }

    #[test_case("", FieldProblem::Missing ; "empty")]
    #[test_case("   ", FieldProblem::Missing ; "blank")]
    #[test_case("abc", FieldProblem::NotANumber ; "letters")]
    #[test_case("1e3", FieldProblem::NotANumber ; "exponent")]
    #[test_case("inf", FieldProblem::NotANumber ; "infinity")]
    #[test_case("NaN", FieldProblem::NotANumber ; "nan")]
    #[test_case("1.2.3", FieldProblem::NotANumber ; "two dots")]
    #[test_case(".", FieldProblem::NotANumber ; "lone dot")]
    #[test_case("-4.5", FieldProblem::Negative ; "negative")]
    fn test_price_rejected(raw: &str, problem: FieldProblem) {
        assert_eq!(parse_price(raw), Err(problem));
    }

    #[test_case("5", Ok(5) ; "integer")]
    #[test_case("0", Ok(0) ; "zero")]
    #[test_case("", Err(FieldProblem::Missing) ; "empty")]
    #[test_case("2.5", Err(FieldProblem::NotAnInteger) ; "fraction")]
    #[test_case("x", Err(FieldProblem::NotAnInteger) ; "letters")]
    #[test_case("-1", Err(FieldProblem::Negative) ; "negative")]
    #[test_case("99999999999", Err(FieldProblem::TooLarge) ; "overflow")]
    fn test_stock(raw: &str, expected: Result<u32, FieldProblem>) {
        assert_eq!(parse_stock(raw), expected);
    }

    #[test]
    fn test_parse_valid_draft() {
        let fields = draft("Widget", "9.99", "5")
            .with(DraftField::Description, "blue")
            .parse()
            .unwrap();
        assert_eq!(fields.name, "Widget");
        assert_eq!(fields.price, 9.99);
        assert_eq!(fields.stock, 5);
        assert_eq!(fields.description, "blue");
    }

    #[test]
    fn test_parse_reports_every_field() {
        let err = draft(" ", "abc", "").parse().unwrap_err();
        assert_eq!(err.issues.len(), 3);
        assert!(err.has(DraftField::Name));
        assert!(err.has(DraftField::Price));
        assert!(err.has(DraftField::Stock));
        assert_eq!(
            err.to_string(),
            "invalid product draft: name is required, price is not a number, stock is required"
        );
    }

    #[test]
    fn test_for_product_renders_numbers() {
        let product = Product {
            id: "42".into(),
            name: "Lamp".into(),
            price: 10.0,
            description: String::new(),
            stock: 7,
        };
        let draft = Draft::for_product(&product);
        assert_eq!(draft.get(DraftField::Price), "10");
        assert_eq!(draft.get(DraftField::Stock), "7");
        assert_eq!(draft.target(), Some("42"));
        assert_eq!(draft.parse().unwrap().price, 10.0);
    }

    #[test]
    fn test_field_names() {
        assert_eq!("stock".parse::<DraftField>(), Ok(DraftField::Stock));
        assert_eq!(
            "colour".parse::<DraftField>(),
            Err(UnknownField("colour".into()))
        );
    }
}
