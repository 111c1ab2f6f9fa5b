/// Configuration for the attribute-list syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Options {
    /// Permit attribute items with no separating whitespace, e.g.
    /// `.class#id` or `ref#id`.
    ///
    /// Without this, adjacent items require at least one character of
    /// whitespace between them and a glued run fails the whole construct.
    pub allow_no_space_before_name: bool,
    /// Permit `_` inside the trailing characters of an `#id` name.
    pub allow_underscore_in_id: bool,
}

impl Options {
    /// Create a new `OptionsBuilder` for fluent configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use attrlist_parser::Options;
    ///
    /// let options = Options::builder()
    ///     .with_allow_no_space_before_name()
    ///     .build();
    /// assert!(options.allow_no_space_before_name);
    /// ```
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Create a new `Options` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder for `Options`.
#[derive(Debug, Default)]
pub struct OptionsBuilder {
    allow_no_space_before_name: bool,
    allow_underscore_in_id: bool,
}

impl OptionsBuilder {
    #[must_use]
    pub fn with_allow_no_space_before_name(mut self) -> Self {
        self.allow_no_space_before_name = true;
        self
    }

    #[must_use]
    pub fn with_allow_underscore_in_id(mut self) -> Self {
        self.allow_underscore_in_id = true;
        self
    }

    #[must_use]
    pub fn build(self) -> Options {
        Options {
            allow_no_space_before_name: self.allow_no_space_before_name,
            allow_underscore_in_id: self.allow_underscore_in_id,
        }
    }
}
