use super::RbTreeMap;

impl<K, V> RbTreeMap<K, V> {
    /// Runs every structural check on the tree: root color, node colors,
    /// the no-red-red rule, and equal black-heights.
    ///
    /// All checks hold trivially for an empty map, and hold after every
    /// `insert` by construction; this method exists so callers (and
    /// tests) can audit that independently. It walks the whole tree,
    /// mutates nothing, and is safe to call repeatedly.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinnabar_tree::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// assert!(map.is_valid());
    ///
    /// for key in [50, 25, 75, 10, 30, 60, 80] {
    ///     map.insert(key, ());
    ///     assert!(map.is_valid());
    /// }
    /// ```
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.raw.is_valid()
    }

    /// Checks that the root is black (or that the map is empty).
    ///
    /// # Examples
    ///
    /// ```
    /// use cinnabar_tree::RbTreeMap;
    ///
    /// let mut map = RbTreeMap::new();
    /// assert!(map.root_is_black());
    /// map.insert(1, "a");
    /// assert!(map.root_is_black());
    /// ```
    #[must_use]
    pub fn root_is_black(&self) -> bool {
        self.raw.root_is_black()
    }

    /// Checks that every node's color is one of the two defined colors.
    ///
    /// The color is a two-variant enum, so this cannot fail for this
    /// representation; the walk is kept so each structural rule stays
    /// independently auditable.
    #[must_use]
    pub fn node_colors_valid(&self) -> bool {
        self.raw.node_colors_valid()
    }

    /// Checks that no red node has a red child, anywhere in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinnabar_tree::RbTreeMap;
    ///
    /// let map = RbTreeMap::from_iter((1..=20).map(|k| (k, ())));
    /// assert!(map.no_red_red());
    /// ```
    #[must_use]
    pub fn no_red_red(&self) -> bool {
        self.raw.no_red_red()
    }

    /// Checks that every path from a node down to a vacant leaf position
    /// passes through the same number of black nodes, for every node in
    /// the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinnabar_tree::RbTreeMap;
    ///
    /// let map = RbTreeMap::from_iter((1..=20).map(|k| (k, ())));
    /// assert!(map.black_height_balanced());
    /// ```
    #[must_use]
    pub fn black_height_balanced(&self) -> bool {
        self.raw.black_height_balanced()
    }
}
