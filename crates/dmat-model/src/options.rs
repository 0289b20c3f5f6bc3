//! Options controlling normalization.

/// Parameters for a single normalization call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NormalizeOptions {
    /// Prefix used to synthesize column labels for unlabeled input.
    pub var_name: String,
    /// Expected observation count; normalization fails on a mismatch.
    pub nobs: Option<usize>,
    /// Expand categorical columns into 0/1 indicator columns.
    pub convert_dummies: bool,
    /// Drop the first category of each expanded column to avoid collinearity.
    pub drop_first: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            var_name: "x".to_string(),
            nobs: None,
            convert_dummies: true,
            drop_first: true,
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label prefix for unlabeled columns.
    pub fn with_var_name(mut self, name: impl Into<String>) -> Self {
        self.var_name = name.into();
        self
    }

    /// Require the input to have exactly `nobs` rows.
    pub fn with_nobs(mut self, nobs: usize) -> Self {
        self.nobs = Some(nobs);
        self
    }

    /// Control dummy expansion of categorical columns.
    pub fn with_convert_dummies(mut self, convert: bool) -> Self {
        self.convert_dummies = convert;
        self
    }

    /// Control whether the first category of each expansion is dropped.
    pub fn with_drop_first(mut self, drop: bool) -> Self {
        self.drop_first = drop;
        self
    }
}
