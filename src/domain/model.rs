use serde::{Deserialize, Serialize};

use crate::utils::error::{PredictError, Result};

/// One house listing as submitted through the form.
///
/// Fields the chain imputes from frozen statistics are `Option`-typed; the
/// rest carry the value the form collected. Immutable once built, discarded
/// after the prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub square_meters: Option<f64>,
    pub number_of_rooms: Option<f64>,
    pub has_yard: Option<bool>,
    pub has_pool: Option<bool>,
    pub floor: u32,
    pub city_code: u32,
    pub city_part_range: u32,
    pub num_prev_owners: u32,
    pub made: Option<i32>,
    pub is_new_built: Option<bool>,
    pub has_storm_protector: Option<bool>,
    pub basement: f64,
    pub attic: f64,
    pub garage: f64,
    pub has_storage_room: Option<bool>,
    pub has_guest_room: bool,
}

impl Listing {
    /// Look up a numeric feature by its schema column name.
    ///
    /// Unknown names resolve to `None` and flow through imputation; the
    /// chain only asks for columns it routed, so this is not a validation
    /// surface.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "squareMeters" => self.square_meters,
            "numberOfRooms" => self.number_of_rooms,
            "made" => self.made.map(f64::from),
            _ => None,
        }
    }

    /// Look up an amenity flag by its schema column name.
    pub fn flag(&self, column: &str) -> Option<bool> {
        match column {
            "hasYard" => self.has_yard,
            "hasPool" => self.has_pool,
            "isNewBuilt" => self.is_new_built,
            "hasStormProtector" => self.has_storm_protector,
            "hasStorageRoom" => self.has_storage_room,
            _ => None,
        }
    }
}

/// Ordered feature column list the regressor weights are positionally bound
/// to. Persisted in the artifact at training time and recomputed by the
/// chain; the two must agree exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Compare against another schema, reporting the first divergence.
    pub fn ensure_matches(&self, other: &FeatureSchema) -> Result<()> {
        if self == other {
            return Ok(());
        }

        let message = if self.width() != other.width() {
            format!(
                "expected {} columns, artifact declares {}",
                self.width(),
                other.width()
            )
        } else {
            let mismatch = self
                .columns
                .iter()
                .zip(other.columns.iter())
                .enumerate()
                .find(|(_, (a, b))| a != b);
            match mismatch {
                Some((idx, (ours, theirs))) => format!(
                    "column {} is '{}' here but '{}' in the artifact",
                    idx, ours, theirs
                ),
                None => "schemas differ".to_string(),
            }
        };

        Err(PredictError::SchemaMismatch { message })
    }
}

/// Fully transformed row, aligned with a [`FeatureSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(columns: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn width(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx])
    }
}

/// Scalar outcome of one prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub price: f64,
}

impl Prediction {
    /// Render as a currency amount with thousands separators and two
    /// decimals, e.g. `1,234,567.89 EUR`.
    pub fn display(&self, currency: &str) -> String {
        if !self.price.is_finite() {
            return format!("{:.2} {}", self.price, currency);
        }

        let formatted = format!("{:.2}", self.price.abs());
        let (int_part, frac_part) = formatted
            .split_once('.')
            .unwrap_or((formatted.as_str(), "00"));

        let mut grouped = String::new();
        let digits = int_part.len();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.price < 0.0 { "-" } else { "" };
        format!("{}{}.{} {}", sign, grouped, frac_part, currency)
    }
}
