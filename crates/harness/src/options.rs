use serde::{Deserialize, Serialize};
use solvebench_backends::StrategyKind;
use solvebench_core::{DEFAULT_SEED, Layout};
use thiserror::Error;

/// How per-strategy times are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultForm {
    /// Mean seconds per call.
    #[default]
    Raw,

    /// Mean time per call divided by the baseline's, so the baseline reports `1.0`.
    Scaled,
}

/// Options for a comparison run.
///
/// Construct with [`Options::new`] or parse a TOML table with
/// [`Options::from_toml`]. Every value is validated on construction, and
/// unrecognized keys are rejected when parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptionsTable", into = "OptionsTable")]
pub struct Options {
    repetitions: usize,
    result_form: ResultForm,
    verbose: bool,
    layout: Layout,
    seed: u64,
    strategies: Vec<StrategyKind>,
}

/// Errors that can occur when validating options.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("repetitions must be at least 1")]
    Repetitions,

    #[error("at least one strategy is required")]
    NoStrategies,

    #[error("strategy `{0}` is listed more than once")]
    DuplicateStrategy(StrategyKind),

    #[error("malformed options table: {0}")]
    Parse(String),
}

impl Default for Options {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(5, ResultForm::Raw, false, Layout::RowMajor).unwrap()
    }
}

impl Options {
    /// Creates options for all shipped strategies with the default seed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Repetitions`] if `repetitions` is zero.
    pub fn new(
        repetitions: usize,
        result_form: ResultForm,
        verbose: bool,
        layout: Layout,
    ) -> Result<Self, ConfigError> {
        if repetitions == 0 {
            return Err(ConfigError::Repetitions);
        }

        Ok(Self {
            repetitions,
            result_form,
            verbose,
            layout,
            seed: DEFAULT_SEED,
            strategies: StrategyKind::ALL.to_vec(),
        })
    }

    /// Parses options from a TOML table.
    ///
    /// Recognized keys are `repetitions`, `result_form` (`"raw"` or
    /// `"scaled"`), `verbose`, `column_major`, `seed`, and `strategies` (a
    /// list of strategy labels). Omitted keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, unknown keys, or
    /// unknown strategy labels, and the matching validation error otherwise.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        toml::from_str::<OptionsTable>(source)
            .map_err(|e| ConfigError::Parse(e.message().to_string()))?
            .try_into()
    }

    /// Returns these options with a different generator seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns these options with a different strategy set and order.
    ///
    /// # Errors
    ///
    /// Returns an error if `strategies` is empty or lists a strategy twice.
    pub fn with_strategies(mut self, strategies: Vec<StrategyKind>) -> Result<Self, ConfigError> {
        if strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        for (i, kind) in strategies.iter().enumerate() {
            if strategies[..i].contains(kind) {
                return Err(ConfigError::DuplicateStrategy(*kind));
            }
        }

        self.strategies = strategies;
        Ok(self)
    }

    /// Returns the number of timed calls per strategy.
    #[must_use]
    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Returns how times are reported.
    #[must_use]
    pub fn result_form(&self) -> ResultForm {
        self.result_form
    }

    /// Returns whether progress is printed to stdout.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Returns the storage layout of the generated matrix.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the generator seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the configured strategies in comparison order.
    #[must_use]
    pub fn strategies(&self) -> &[StrategyKind] {
        &self.strategies
    }
}

/// Serialized form of [`Options`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct OptionsTable {
    repetitions: usize,
    result_form: ResultForm,
    verbose: bool,
    column_major: bool,
    seed: u64,
    strategies: Vec<StrategyKind>,
}

impl Default for OptionsTable {
    fn default() -> Self {
        Options::default().into()
    }
}

impl TryFrom<OptionsTable> for Options {
    type Error = ConfigError;

    fn try_from(table: OptionsTable) -> Result<Self, Self::Error> {
        Options::new(
            table.repetitions,
            table.result_form,
            table.verbose,
            Layout::from_column_major(table.column_major),
        )?
        .with_seed(table.seed)
        .with_strategies(table.strategies)
    }
}

impl From<Options> for OptionsTable {
    fn from(options: Options) -> Self {
        Self {
            repetitions: options.repetitions,
            result_form: options.result_form,
            verbose: options.verbose,
            column_major: options.layout == Layout::ColumnMajor,
            seed: options.seed,
            strategies: options.strategies,
        }
    }
}
