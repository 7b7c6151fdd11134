//! Delimited-text catalog parsing.
//!
//! A catalog file holds one record per line, four comma-separated fields:
//!
//! ```text
//! id,name,category,price
//! 1001,Wireless Mouse,Electronics|Accessories,29.99
//! 1002,"Apple iPhone 14, 128GB",Smartphones|Electronics,999.99
//! 1003,"Book: ""The Art of War""",Books|Classics,14.99
//! ```
//!
//! Fields may be double-quoted; a quoted field may contain commas, and a
//! doubled quote (`""`) inside it stands for one literal `"`. There is no
//! header row. Blank lines are skipped, and a malformed line is skipped
//! with a warning rather than aborting the rest of the file.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::product::Product;

/// Every record carries exactly this many fields.
const FIELDS_PER_RECORD: usize = 4;

/// Reasons a single catalog line fails to parse.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseLineError {
    /// The line did not split into exactly four fields.
    FieldCount {
        /// How many fields the line actually had.
        found: usize,
    },
    /// The id field was empty after trimming and unquoting.
    EmptyId,
    /// The price field did not parse as a number.
    InvalidPrice {
        /// The offending field, after trimming and unquoting.
        raw: String,
    },
    /// The price parsed, but was negative.
    NegativePrice {
        /// The parsed value.
        price: f64,
    },
}

impl fmt::Display for ParseLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount { found } => {
                write!(f, "expected {FIELDS_PER_RECORD} fields, found {found}")
            }
            Self::EmptyId => write!(f, "product id cannot be empty"),
            Self::InvalidPrice { raw } => write!(f, "invalid price format: {raw:?}"),
            Self::NegativePrice { price } => write!(f, "price cannot be negative: {price}"),
        }
    }
}

impl std::error::Error for ParseLineError {}

/// Parses one catalog line into a [`Product`].
///
/// # Examples
///
/// ```
/// use cinnabar_tree::catalog::csv::parse_line;
///
/// let product = parse_line(r#"1002,"Apple iPhone 14, 128GB",Smartphones|Electronics,999.99"#)
///     .expect("well-formed line");
/// assert_eq!(product.id(), "1002");
/// assert_eq!(product.name(), "Apple iPhone 14, 128GB");
///
/// assert!(parse_line("1002,Widget,Electronics").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<Product, ParseLineError> {
    let fields = split_fields(line);
    if fields.len() != FIELDS_PER_RECORD {
        return Err(ParseLineError::FieldCount { found: fields.len() });
    }

    let id = clean_field(&fields[0]);
    if id.is_empty() {
        return Err(ParseLineError::EmptyId);
    }
    let name = clean_field(&fields[1]);
    let category = clean_field(&fields[2]);
    let price = parse_price(&fields[3])?;

    Ok(Product::new(id, name, category, price))
}

/// Reads catalog records from a line-oriented reader.
///
/// Blank lines are skipped silently; malformed lines are skipped with a
/// `log::warn!` naming the line number and the reason, and reading
/// continues. Only I/O failures abort.
pub fn read_products<R: BufRead>(reader: R) -> io::Result<Vec<Product>> {
    let mut products = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok(product) => products.push(product),
            Err(err) => log::warn!("skipping malformed record on line {}: {err}", number + 1),
        }
    }
    Ok(products)
}

/// Reads catalog records from a file at `path`.
///
/// # Errors
///
/// Returns any I/O error from opening or reading the file; a missing file
/// is an error, while malformed content is skipped (see
/// [`read_products`]).
pub fn load_products(path: impl AsRef<Path>) -> io::Result<Vec<Product>> {
    let file = File::open(path)?;
    read_products(BufReader::new(file))
}

/// Splits a line on commas, keeping commas that sit inside double-quoted
/// stretches. Quote characters stay in the field for `clean_field`.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push('"');
            }
            ',' if !in_quotes => fields.push(core::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Trims a field, strips one layer of surrounding quotes, and collapses
/// doubled quotes to single ones.
fn clean_field(field: &str) -> String {
    let trimmed = field.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].replace("\"\"", "\"")
    } else {
        String::from(trimmed)
    }
}

fn parse_price(field: &str) -> Result<f64, ParseLineError> {
    let cleaned = clean_field(field);
    let price: f64 = cleaned
        .parse()
        .map_err(|_| ParseLineError::InvalidPrice { raw: cleaned.clone() })?;
    if price < 0.0 {
        return Err(ParseLineError::NegativePrice { price });
    }
    Ok(price)
}
