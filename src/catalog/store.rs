use alloc::string::{String, ToString};
use alloc::vec::Vec;

use std::io;
use std::path::Path;

use super::csv;
use super::product::Product;
use crate::RbTreeMap;

/// A product catalog indexed by product id.
///
/// Thin facade over an [`RbTreeMap`] keyed by the id string: loading a
/// delimited-text file fills the index, and lookups descend the balanced
/// tree. Records loaded twice (same id) replace the earlier version.
///
/// # Examples
///
/// ```no_run
/// use cinnabar_tree::ProductCatalog;
///
/// let mut catalog = ProductCatalog::new();
/// let loaded = catalog.load_csv("amazon-product-data.csv")?;
/// println!("indexed {loaded} products");
///
/// if let Some(product) = catalog.find("1001") {
///     println!("{product}");
/// }
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProductCatalog {
    products: RbTreeMap<String, Product>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: RbTreeMap::new(),
        }
    }

    /// Loads a delimited-text catalog file into the index and returns how
    /// many records were read.
    ///
    /// Malformed lines are skipped (see [`csv::read_products`]); records
    /// whose id is already present replace the existing entry without
    /// growing the index.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from opening or reading the file.
    pub fn load_csv(&mut self, path: impl AsRef<Path>) -> io::Result<usize> {
        let records = csv::load_products(path)?;
        let loaded = records.len();
        for product in records {
            self.insert(product);
        }
        log::info!("loaded {loaded} records, {} distinct products indexed", self.len());
        Ok(loaded)
    }

    /// Inserts a product, keyed by its id. Returns the record it
    /// replaced, if the id was already present.
    pub fn insert(&mut self, product: Product) -> Option<Product> {
        self.products.insert(product.id().to_string(), product)
    }

    /// Looks up a product by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    /// Returns the number of distinct products in the catalog.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` if the catalog holds no products.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns the height of the underlying tree.
    #[must_use]
    pub fn height(&self) -> usize {
        self.products.height()
    }

    /// Audits the structural invariants of the underlying tree.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.products.is_valid()
    }

    /// Iterates over the products in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Returns all product ids in ascending order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.products.keys().map(String::as_str).collect()
    }
}
