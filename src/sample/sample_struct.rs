use std::path::Path;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use polars::prelude::*;

use crate::common::checker;


/// Struct `Sample` holds a batch of multiclass training cases.
///
/// Each case is an input vector of a fixed dimension together with
/// a label row of one entry per class:
/// `+1.0` for the case's true class and `-1.0` everywhere else.
/// A `Sample` is immutable once constructed;
/// the ensemble builders only ever read from it.
#[derive(Debug, Clone)]
pub struct Sample {
    // Row-major, `n_sample * n_input` entries.
    pub(crate) inputs: Vec<f64>,
    // Row-major, `n_sample * n_class` entries in `{-1.0, +1.0}`.
    pub(crate) labels: Vec<f64>,
    pub(crate) n_sample: usize,
    pub(crate) n_input: usize,
    pub(crate) n_class: usize,
}


impl Sample {
    /// Construct a `Sample` from per-case input and label rows.
    /// Every input row must have the same length,
    /// and every label row must contain exactly one `+1`
    /// with `-1` everywhere else.
    pub fn from_rows(inputs: Vec<Vec<f64>>, labels: Vec<Vec<f64>>) -> Self {
        assert_eq!(inputs.len(), labels.len());
        assert!(!inputs.is_empty());

        let n_sample = inputs.len();
        let n_input = inputs[0].len();
        let n_class = labels[0].len();
        assert!(inputs.iter().all(|x| x.len() == n_input));
        assert!(labels.iter().all(|y| y.len() == n_class));
        checker::check_n_class(n_class);

        let inputs = inputs.into_iter().flatten().collect::<Vec<_>>();
        let labels = labels.into_iter().flatten().collect::<Vec<_>>();

        let sample = Self { inputs, labels, n_sample, n_input, n_class };
        checker::check_sample(&sample);
        sample
    }


    /// Construct a `Sample` from a flat array of
    /// `n_input + n_class` values per case,
    /// inputs first and the `{-1, +1}` label row after them.
    pub fn from_flat(flat: &[f64], n_input: usize, n_class: usize) -> Self {
        let width = n_input + n_class;
        assert!(width > 0);
        assert_eq!(flat.len() % width, 0);
        checker::check_n_class(n_class);

        let n_sample = flat.len() / width;
        let mut inputs = Vec::with_capacity(n_sample * n_input);
        let mut labels = Vec::with_capacity(n_sample * n_class);
        for case in flat.chunks_exact(width) {
            inputs.extend_from_slice(&case[..n_input]);
            labels.extend_from_slice(&case[n_input..]);
        }

        let sample = Self { inputs, labels, n_sample, n_input, n_class };
        checker::check_sample(&sample);
        sample
    }


    /// Read a CSV format file into a `Sample`.
    ///
    /// Every line holds the input values followed by a single
    /// trailing column with the 0-based class index,
    /// which is expanded into a `{-1, +1}` label row of
    /// `n_class` entries.
    pub fn from_csv<P>(file: P, has_header: bool, n_class: usize)
        -> io::Result<Self>
        where P: AsRef<Path>,
    {
        checker::check_n_class(n_class);

        let file = File::open(file.as_ref())?;
        let lines = BufReader::new(file).lines();

        let mut inputs = Vec::new();
        let mut labels = Vec::new();
        let mut n_sample = 0_usize;
        let mut n_input = 0_usize;

        for (lineno, line) in lines.enumerate() {
            let line = line?;
            if has_header && lineno == 0 {
                continue;
            }

            let xs = line.split(',')
                .map(|x| {
                    x.trim()
                        .parse::<f64>()
                        .map_err(|e| {
                            io::Error::new(io::ErrorKind::InvalidData, e)
                        })
                })
                .collect::<io::Result<Vec<_>>>()?;
            assert!(xs.len() >= 2, "each line needs inputs and a class");

            if n_sample == 0 {
                n_input = xs.len() - 1;
            }
            assert_eq!(xs.len(), n_input + 1);

            let class = xs[n_input] as usize;
            assert!(class < n_class, "class index out of range");

            inputs.extend_from_slice(&xs[..n_input]);
            labels.extend(
                (0..n_class).map(|c| if c == class { 1.0 } else { -1.0 })
            );
            n_sample += 1;
        }

        let sample = Self { inputs, labels, n_sample, n_input, n_class };
        checker::check_sample(&sample);
        Ok(sample)
    }

    /// Convert `polars::DataFrame` and `polars::Series` into a `Sample`
    /// with `n_class` classes.
    /// The columns of `data` are the input variables;
    /// `target` holds the 0-based class index of each case as `f64`.
    /// `n_class` is explicit rather than inferred from `target`,
    /// so a class absent from this particular frame cannot
    /// silently change the label width.
    /// This method takes the ownership for the given pair
    /// `data` and `target`.
    pub fn from_dataframe(data: DataFrame, target: Series, n_class: usize)
        -> io::Result<Self>
    {
        checker::check_n_class(n_class);

        let (n_sample, n_input) = data.shape();
        let classes = target.f64()
            .expect("The target is not a dtype f64")
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .expect("The target column contains null values");
        assert_eq!(classes.len(), n_sample);

        let columns = data.get_columns()
            .iter()
            .map(|series| {
                series.f64()
                    .expect("A feature column is not a dtype f64")
                    .into_iter()
                    .collect::<Option<Vec<_>>>()
                    .expect("A feature column contains null values")
            })
            .collect::<Vec<_>>();

        let mut inputs = Vec::with_capacity(n_sample * n_input);
        let mut labels = Vec::with_capacity(n_sample * n_class);
        for i in 0..n_sample {
            inputs.extend(columns.iter().map(|col| col[i]));
            let class = classes[i] as usize;
            assert!(class < n_class, "class index out of range");
            labels.extend(
                (0..n_class).map(|c| if c == class { 1.0 } else { -1.0 })
            );
        }

        let sample = Self { inputs, labels, n_sample, n_input, n_class };
        checker::check_sample(&sample);
        Ok(sample)
    }


    /// Returns the pair of the number of cases and
    /// the number of input variables.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_input)
    }


    /// Returns the number of classes.
    pub fn n_class(&self) -> usize {
        self.n_class
    }


    /// Returns the input vector of the `idx`-th case.
    pub fn input(&self, idx: usize) -> &[f64] {
        let start = idx * self.n_input;
        &self.inputs[start..start + self.n_input]
    }


    /// Returns the `{-1, +1}` label row of the `idx`-th case.
    pub fn label(&self, idx: usize) -> &[f64] {
        let start = idx * self.n_class;
        &self.labels[start..start + self.n_class]
    }


    /// Returns the true class index of the `idx`-th case,
    /// the position of the single `+1` in its label row.
    pub fn class_of(&self, idx: usize) -> usize {
        self.label(idx)
            .iter()
            .position(|&y| y > 0.0)
            .expect("label row has no positive entry")
    }


    /// Split `self` into a train/test pair.
    /// The cases at `ix[start..end]` form the test sample,
    /// all remaining entries of `ix` form the training sample.
    pub fn split(&self, ix: &[usize], start: usize, end: usize)
        -> (Self, Self)
    {
        let test_ix = &ix[start..end];
        let train_ix = ix[..start].iter()
            .chain(ix[end..].iter())
            .copied()
            .collect::<Vec<_>>();

        (self.subsample(&train_ix), self.subsample(test_ix))
    }


    fn subsample(&self, ix: &[usize]) -> Self {
        let mut inputs = Vec::with_capacity(ix.len() * self.n_input);
        let mut labels = Vec::with_capacity(ix.len() * self.n_class);
        for &i in ix {
            inputs.extend_from_slice(self.input(i));
            labels.extend_from_slice(self.label(i));
        }
        Self {
            inputs,
            labels,
            n_sample: ix.len(),
            n_input: self.n_input,
            n_class: self.n_class,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flat_matches_from_rows() {
        let flat = [
            0.0, 1.0,  1.0, -1.0,
            2.0, 3.0, -1.0,  1.0,
        ];
        let sample = Sample::from_flat(&flat, 2, 2);
        assert_eq!(sample.shape(), (2, 2));
        assert_eq!(sample.n_class(), 2);
        assert_eq!(sample.input(1), &[2.0, 3.0]);
        assert_eq!(sample.class_of(0), 0);
        assert_eq!(sample.class_of(1), 1);
    }

    #[test]
    fn from_dataframe_keeps_requested_label_width() {
        // Class 2 is absent from this frame; the label width
        // must follow the requested class count anyway.
        let data = df!(
            "x0" => [0.0, 1.0],
            "x1" => [2.0, 3.0],
        )
        .unwrap();
        let target = Series::new("class", vec![0.0, 1.0]);

        let sample = Sample::from_dataframe(data, target, 3).unwrap();
        assert_eq!(sample.shape(), (2, 2));
        assert_eq!(sample.n_class(), 3);
        assert_eq!(sample.label(0), &[1.0, -1.0, -1.0]);
        assert_eq!(sample.label(1), &[-1.0, 1.0, -1.0]);
    }

    #[test]
    #[should_panic]
    fn rejects_label_row_without_positive() {
        let _ = Sample::from_rows(
            vec![vec![0.0]],
            vec![vec![-1.0, -1.0]],
        );
    }

    #[test]
    fn split_partitions_all_cases() {
        let inputs = (0..6).map(|i| vec![i as f64]).collect::<Vec<_>>();
        let labels = (0..6)
            .map(|i| {
                if i % 2 == 0 { vec![1.0, -1.0] } else { vec![-1.0, 1.0] }
            })
            .collect::<Vec<_>>();
        let sample = Sample::from_rows(inputs, labels);

        let ix = (0..6).collect::<Vec<_>>();
        let (train, test) = sample.split(&ix, 2, 4);
        assert_eq!(train.shape().0, 4);
        assert_eq!(test.shape().0, 2);
        assert_eq!(test.input(0), &[2.0]);
    }
}
