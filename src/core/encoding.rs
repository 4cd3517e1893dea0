use serde::{Deserialize, Serialize};

/// Frozen training statistics for one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericColumnStats {
    pub median: f64,
    pub mean: f64,
    pub std: f64,
}

impl NumericColumnStats {
    /// Median-impute, then z-score with the frozen statistics. A frozen
    /// standard deviation of zero divides by 1 instead.
    pub fn standardize(&self, value: Option<f64>) -> f64 {
        let v = value.unwrap_or(self.median);
        let scale = if self.std == 0.0 { 1.0 } else { self.std };
        (v - self.mean) / scale
    }
}

/// Frozen training statistics for one boolean-like categorical column.
/// Known categories are {0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlagColumnStats {
    pub most_frequent: u8,
}

impl FlagColumnStats {
    /// Most-frequent-impute, then one-hot over {0, 1}. A value outside the
    /// known categories yields the all-zero indicator row, never an error.
    pub fn one_hot(&self, value: Option<bool>) -> [f64; 2] {
        let v = match value {
            Some(b) => u8::from(b),
            None => self.most_frequent,
        };
        match v {
            0 => [1.0, 0.0],
            1 => [0.0, 1.0],
            _ => [0.0, 0.0],
        }
    }
}

/// One-hot a label over a fixed category list. Unknown or absent labels
/// produce the all-zero indicator row.
pub fn one_hot_label(categories: &[&str], label: Option<&str>) -> Vec<f64> {
    categories
        .iter()
        .map(|c| if Some(*c) == label { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_present_value() {
        let stats = NumericColumnStats {
            median: 50.0,
            mean: 40.0,
            std: 10.0,
        };
        assert_eq!(stats.standardize(Some(60.0)), 2.0);
        assert_eq!(stats.standardize(Some(40.0)), 0.0);
    }

    #[test]
    fn test_standardize_imputes_median() {
        let stats = NumericColumnStats {
            median: 50.0,
            mean: 40.0,
            std: 10.0,
        };
        assert_eq!(stats.standardize(None), 1.0);
    }

    #[test]
    fn test_standardize_zero_std_divides_by_one() {
        let stats = NumericColumnStats {
            median: 5.0,
            mean: 5.0,
            std: 0.0,
        };
        assert_eq!(stats.standardize(Some(8.0)), 3.0);
    }

    #[test]
    fn test_flag_one_hot() {
        let stats = FlagColumnStats { most_frequent: 0 };
        assert_eq!(stats.one_hot(Some(true)), [0.0, 1.0]);
        assert_eq!(stats.one_hot(Some(false)), [1.0, 0.0]);
    }

    #[test]
    fn test_flag_one_hot_imputes_most_frequent() {
        let yes = FlagColumnStats { most_frequent: 1 };
        assert_eq!(yes.one_hot(None), [0.0, 1.0]);

        let no = FlagColumnStats { most_frequent: 0 };
        assert_eq!(no.one_hot(None), [1.0, 0.0]);
    }

    #[test]
    fn test_flag_one_hot_unknown_category_all_zero() {
        let stats = FlagColumnStats { most_frequent: 7 };
        assert_eq!(stats.one_hot(None), [0.0, 0.0]);
    }

    #[test]
    fn test_one_hot_label() {
        let categories = ["a", "b", "c"];
        assert_eq!(one_hot_label(&categories, Some("b")), vec![0.0, 1.0, 0.0]);
        assert_eq!(one_hot_label(&categories, Some("z")), vec![0.0, 0.0, 0.0]);
        assert_eq!(one_hot_label(&categories, None), vec![0.0, 0.0, 0.0]);
    }
}
