use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Options, ResultForm, compare_solvers};

/// Timing results for a range of problem sizes.
///
/// Each row is a [`TimingResult::to_vec`](crate::TimingResult::to_vec), so
/// column 0 is the dimension and the remaining columns follow `labels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    /// How the times are expressed.
    pub form: ResultForm,

    /// Strategy labels, in column order.
    pub labels: Vec<String>,

    /// One row per size, in the order the sizes were given.
    pub rows: Vec<Vec<f64>>,
}

impl Sweep {
    /// Creates an empty table for the given columns.
    #[must_use]
    pub fn new(form: ResultForm, labels: Vec<String>) -> Self {
        Self {
            form,
            labels,
            rows: Vec::new(),
        }
    }

    /// Returns the column of values for `label`.
    ///
    /// Returns `None` if no such label exists or a row is too short to hold it.
    #[must_use]
    pub fn column(&self, label: &str) -> Option<Vec<f64>> {
        let col = 1 + self.labels.iter().position(|l| l == label)?;
        self.rows.iter().map(|row| row.get(col).copied()).collect()
    }
}

impl fmt::Display for Sweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .labels
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(12);

        write!(f, "{:>6}", "n")?;
        for label in &self.labels {
            write!(f, "  {label:>width$}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            let (n, values) = row.split_first().ok_or(fmt::Error)?;
            write!(f, "{n:>6}")?;
            for value in values {
                match self.form {
                    ResultForm::Raw => write!(f, "  {value:>width$.3e}")?,
                    ResultForm::Scaled => write!(f, "  {value:>width$.4}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Runs [`compare_solvers`] for each size, strictly one after another.
///
/// # Errors
///
/// Returns the first error any size raises; no partial table is returned.
pub fn sweep<I>(sizes: I, options: &Options) -> Result<Sweep, Error>
where
    I: IntoIterator<Item = i64>,
{
    let labels = options
        .strategies()
        .iter()
        .map(|kind| kind.label().to_string())
        .collect();
    let mut table = Sweep::new(options.result_form(), labels);

    for n in sizes {
        let result = compare_solvers(n, options)?;
        tracing::info!(n, "sweep row complete");
        table.rows.push(result.to_vec());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    use solvebench_backends::StrategyKind;
    use solvebench_core::Layout;

    #[test]
    fn rows_follow_sizes_and_labels_follow_strategies() {
        let options = Options::new(1, ResultForm::Scaled, false, Layout::ColumnMajor)
            .unwrap()
            .with_strategies(vec![StrategyKind::GesvWorkspace, StrategyKind::Reference])
            .unwrap();

        let table = sweep([3, 1, 4], &options).unwrap();

        assert_eq!(table.labels, ["gesv_workspace", "reference"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.column("gesv_workspace"), Some(vec![1.0, 1.0, 1.0]));
        let sizes: Vec<f64> = table.rows.iter().map(|row| row[0]).collect();
        assert_eq!(sizes, [3.0, 1.0, 4.0]);
    }

    #[test]
    fn first_failing_size_aborts() {
        let options = Options::default()
            .with_strategies(vec![StrategyKind::Gesv])
            .unwrap();

        assert!(matches!(
            sweep([2, 0, 3], &options),
            Err(Error::InvalidDimension { n: 0 })
        ));
    }

    #[test]
    fn display_renders_a_header_and_one_line_per_row() {
        let mut table = Sweep::new(ResultForm::Scaled, vec!["a".into(), "bb".into()]);
        table.rows.push(vec![10.0, 1.0, 2.5]);
        table.rows.push(vec![20.0, 1.0, 0.5]);

        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with('n'));
        assert!(lines[0].ends_with("bb"));
        assert!(lines[1].contains("2.5000"));
        assert!(lines[2].trim_start().starts_with("20"));
    }

    #[test]
    fn column_of_a_short_row_is_none() {
        let mut table = Sweep::new(ResultForm::Raw, vec!["a".into(), "b".into()]);
        table.rows.push(vec![4.0, 0.5, 0.25]);
        table.rows.push(vec![8.0, 0.75]);

        assert_eq!(table.column("a"), Some(vec![0.5, 0.75]));
        assert_eq!(table.column("b"), None);
        assert_eq!(table.column("c"), None);
    }
}
