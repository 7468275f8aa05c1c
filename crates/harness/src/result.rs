use serde::{Deserialize, Serialize};

use crate::ResultForm;

/// The time reported for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyTiming {
    /// Label of the strategy.
    pub label: String,

    /// Mean seconds per call, or the ratio to the baseline when scaled.
    pub value: f64,
}

/// The outcome of one comparison run.
///
/// Entries follow the declared strategy order; the first is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingResult {
    /// Problem dimension.
    pub n: usize,

    /// How `entries` are expressed.
    pub form: ResultForm,

    /// One entry per strategy.
    pub entries: Vec<StrategyTiming>,
}

impl TimingResult {
    /// Builds a result from raw mean times, scaling them if `form` asks for it.
    pub(crate) fn new(n: usize, form: ResultForm, entries: Vec<StrategyTiming>) -> Self {
        let raw = Self {
            n,
            form: ResultForm::Raw,
            entries,
        };
        match form {
            ResultForm::Raw => raw,
            ResultForm::Scaled => raw.scaled(),
        }
    }

    /// Returns `[n, value_1, ..., value_k]`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        std::iter::once(self.n as f64)
            .chain(self.entries.iter().map(|e| e.value))
            .collect()
    }

    /// Returns the number of entries in [`to_vec`](Self::to_vec), `1 + k`.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.entries.len()
    }

    /// Always `false`: a result carries at least its dimension.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the baseline entry.
    #[must_use]
    pub fn baseline(&self) -> Option<&StrategyTiming> {
        self.entries.first()
    }

    /// Returns the value reported for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value)
    }

    /// Returns the labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Returns this result relative to its baseline.
    ///
    /// The baseline becomes exactly `1.0`. A zero baseline time yields
    /// infinite (or NaN, for zero over zero) ratios for the other entries.
    /// Scaling an already scaled result returns it unchanged.
    #[must_use]
    pub fn scaled(&self) -> Self {
        let mut out = self.clone();
        if self.form == ResultForm::Scaled {
            return out;
        }

        out.form = ResultForm::Scaled;
        if let Some((first, rest)) = out.entries.split_first_mut() {
            let base = first.value;
            first.value = 1.0;
            for entry in rest {
                entry.value /= base;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(label: &str, value: f64) -> StrategyTiming {
        StrategyTiming {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn vector_form_leads_with_dimension() {
        let result = TimingResult::new(
            5,
            ResultForm::Raw,
            vec![timing("a", 0.25), timing("b", 0.5)],
        );

        assert_eq!(result.to_vec(), vec![5.0, 0.25, 0.5]);
        assert_eq!(result.len(), 3);
        assert_eq!(result.get("b"), Some(0.5));
        assert_eq!(result.labels().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn scaling_divides_by_baseline() {
        let result = TimingResult::new(
            5,
            ResultForm::Scaled,
            vec![timing("a", 0.25), timing("b", 0.5), timing("c", 0.125)],
        );

        assert_eq!(result.form, ResultForm::Scaled);
        assert_eq!(result.to_vec(), vec![5.0, 1.0, 2.0, 0.5]);
        assert_eq!(result.scaled(), result);
    }

    #[test]
    fn zero_baseline_keeps_baseline_at_one() {
        let result = TimingResult::new(
            2,
            ResultForm::Scaled,
            vec![timing("a", 0.0), timing("b", 1.0), timing("c", 0.0)],
        );

        assert_eq!(result.entries[0].value, 1.0);
        assert!(result.entries[1].value.is_infinite());
        assert!(result.entries[2].value.is_nan());
    }
}
