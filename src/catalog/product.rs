use alloc::string::String;
use core::fmt;

/// A single catalog record: identifier, display name, category tags and
/// price.
///
/// The identifier is the record's identity: two products with the same id
/// compare equal no matter what the other fields say, which is what lets a
/// re-loaded record replace an older one in the index. The category field
/// keeps its pipe-separated tags verbatim (`"Electronics|Accessories"`);
/// nothing in the tree interprets them.
#[derive(Clone, Debug)]
pub struct Product {
    id: String,
    name: String,
    category: String,
    price: f64,
}

impl Product {
    /// Creates a product record from its four fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinnabar_tree::Product;
    ///
    /// let mouse = Product::new("1001", "Wireless Mouse", "Electronics|Accessories", 29.99);
    /// assert_eq!(mouse.id(), "1001");
    /// assert_eq!(mouse.price(), 29.99);
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
        }
    }

    /// Returns the unique product identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the category tags, pipe-separated when there are several.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the price.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Two products are the same product exactly when their ids match.
impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

/// Renders the record as a short report block:
///
/// ```text
/// Product ID: 1001
/// Name: Wireless Mouse
/// Category: Electronics|Accessories
/// Price: $29.99
/// ```
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Product ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Category: {}", self.category)?;
        write!(f, "Price: ${:.2}", self.price)
    }
}
