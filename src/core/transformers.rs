use crate::core::artifact::PreprocessingStats;
use crate::core::encoding::{one_hot_label, FlagColumnStats, NumericColumnStats};
use crate::domain::model::Listing;
use crate::domain::ports::Transformer;
use crate::utils::error::{PredictError, Result};

/// Numeric features routed through median imputation and standardization.
pub const NUM_FEATURES: [&str; 3] = ["squareMeters", "numberOfRooms", "made"];

/// Amenity flags routed through most-frequent imputation and one-hot
/// encoding (and, separately, through the boolean encoder).
pub const CAT_FEATURES: [&str; 5] = [
    "hasYard",
    "hasPool",
    "isNewBuilt",
    "hasStormProtector",
    "hasStorageRoom",
];

/// Previous-owner categories. Counts outside 1..=10 map to no category.
pub const OWNER_CATEGORIES: [&str; 10] = [
    "New_1", "New_2", "New_3", "New_4", "New_5", "New_6", "New_7", "New_8", "New_9", "New_10",
];

fn missing_stat(kind: &str, column: &str) -> PredictError {
    PredictError::ArtifactError {
        message: format!("missing {} statistics for column '{}'", kind, column),
    }
}

/// Median-impute and standardize the numeric features with frozen training
/// statistics.
#[derive(Debug)]
pub struct NumericStandardizer {
    stats: Vec<(&'static str, NumericColumnStats)>,
}

impl NumericStandardizer {
    pub fn from_stats(stats: &PreprocessingStats) -> Result<Self> {
        let mut resolved = Vec::with_capacity(NUM_FEATURES.len());
        for column in NUM_FEATURES {
            let column_stats = stats
                .numeric
                .get(column)
                .copied()
                .ok_or_else(|| missing_stat("numeric", column))?;
            resolved.push((column, column_stats));
        }
        Ok(Self { stats: resolved })
    }
}

impl Transformer for NumericStandardizer {
    fn name(&self) -> &'static str {
        "num"
    }

    fn output_columns(&self) -> Vec<String> {
        self.stats
            .iter()
            .map(|(column, _)| format!("num__{}", column))
            .collect()
    }

    fn transform(&self, listing: &Listing) -> Result<Vec<f64>> {
        Ok(self
            .stats
            .iter()
            .map(|(column, stats)| stats.standardize(listing.numeric(column)))
            .collect())
    }
}

/// Most-frequent-impute and one-hot encode the amenity flags over their
/// known categories {0, 1}.
pub struct CategoricalOneHot {
    stats: Vec<(&'static str, FlagColumnStats)>,
}

impl CategoricalOneHot {
    pub fn from_stats(stats: &PreprocessingStats) -> Result<Self> {
        let mut resolved = Vec::with_capacity(CAT_FEATURES.len());
        for column in CAT_FEATURES {
            let column_stats = stats
                .flags
                .get(column)
                .copied()
                .ok_or_else(|| missing_stat("categorical", column))?;
            resolved.push((column, column_stats));
        }
        Ok(Self { stats: resolved })
    }
}

impl Transformer for CategoricalOneHot {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn output_columns(&self) -> Vec<String> {
        self.stats
            .iter()
            .flat_map(|(column, _)| [format!("cat__{}_0", column), format!("cat__{}_1", column)])
            .collect()
    }

    fn transform(&self, listing: &Listing) -> Result<Vec<f64>> {
        Ok(self
            .stats
            .iter()
            .flat_map(|(column, stats)| stats.one_hot(listing.flag(column)))
            .collect())
    }
}

/// Map the amenity flags to raw {0, 1} indicators.
pub struct BooleanEncoder;

impl BooleanEncoder {
    /// Truthy values map to 1, everything else (including missing) to 0.
    /// Re-applying to its own output is a no-op.
    pub fn encode(value: Option<f64>) -> f64 {
        match value {
            Some(v) if v != 0.0 => 1.0,
            _ => 0.0,
        }
    }
}

impl Transformer for BooleanEncoder {
    fn name(&self) -> &'static str {
        "label"
    }

    fn output_columns(&self) -> Vec<String> {
        CAT_FEATURES
            .iter()
            .map(|column| format!("label__{}", column))
            .collect()
    }

    fn transform(&self, listing: &Listing) -> Result<Vec<f64>> {
        Ok(CAT_FEATURES
            .iter()
            .map(|column| {
                Self::encode(
                    listing
                        .flag(column)
                        .map(|flag| if flag { 1.0 } else { 0.0 }),
                )
            })
            .collect())
    }
}

/// Derive square meters per room from the raw, un-imputed operands.
///
/// A room count of zero yields infinity and a missing operand yields NaN;
/// both propagate into the feature vector unguarded.
pub struct RoomSizeTransformer;

impl Transformer for RoomSizeTransformer {
    fn name(&self) -> &'static str {
        "room_size"
    }

    fn output_columns(&self) -> Vec<String> {
        vec!["room_size__Room_Size".to_string()]
    }

    fn transform(&self, listing: &Listing) -> Result<Vec<f64>> {
        let area = listing.square_meters.unwrap_or(f64::NAN);
        let rooms = listing.number_of_rooms.unwrap_or(f64::NAN);
        Ok(vec![area / rooms])
    }
}

/// Map the previous-owner count to its category and one-hot encode it.
pub struct OwnerCategoryTransformer;

impl OwnerCategoryTransformer {
    /// Explicit lookup: 1 → "New_1" … 10 → "New_10", anything else → None.
    pub fn category(count: u32) -> Option<&'static str> {
        let index = count.checked_sub(1)? as usize;
        OWNER_CATEGORIES.get(index).copied()
    }
}

impl Transformer for OwnerCategoryTransformer {
    fn name(&self) -> &'static str {
        "owner"
    }

    fn output_columns(&self) -> Vec<String> {
        OWNER_CATEGORIES
            .iter()
            .map(|category| format!("owner__Prev_Cat_{}", category))
            .collect()
    }

    fn transform(&self, listing: &Listing) -> Result<Vec<f64>> {
        Ok(one_hot_label(
            &OWNER_CATEGORIES,
            Self::category(listing.num_prev_owners),
        ))
    }
}

/// Decomposed postal code digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityCodeParts {
    pub zone: u32,
    pub sub_zone: u32,
    pub sorting_district: u32,
    pub post_office: u32,
}

/// Zero-pad the city code to five digits and split it into zone, sub-zone,
/// sorting-district and post-office fields.
pub struct CityCodeTransformer;

impl CityCodeTransformer {
    pub fn decompose(code: u32) -> CityCodeParts {
        let padded = format!("{:05}", code);
        let digits: Vec<u32> = padded
            .chars()
            .map(|c| c.to_digit(10).unwrap_or(0))
            .collect();

        CityCodeParts {
            zone: digits[0],
            sub_zone: digits[1],
            sorting_district: digits[..3].iter().fold(0, |acc, d| acc * 10 + d),
            post_office: digits[3..].iter().fold(0, |acc, d| acc * 10 + d),
        }
    }
}

impl Transformer for CityCodeTransformer {
    fn name(&self) -> &'static str {
        "city"
    }

    fn output_columns(&self) -> Vec<String> {
        vec![
            "city__cityCode".to_string(),
            "city__zone".to_string(),
            "city__sub_zone".to_string(),
            "city__sorting_district".to_string(),
            "city__post_office".to_string(),
        ]
    }

    fn transform(&self, listing: &Listing) -> Result<Vec<f64>> {
        let parts = Self::decompose(listing.city_code);
        Ok(vec![
            f64::from(listing.city_code),
            f64::from(parts.zone),
            f64::from(parts.sub_zone),
            f64::from(parts.sorting_district),
            f64::from(parts.post_office),
        ])
    }
}

/// Age relative to the newest construction year seen during training.
///
/// The reference year comes frozen from the artifact; recomputing a maximum
/// from the single incoming record would always yield zero.
pub struct AgeTransformer {
    reference_year: i32,
}

impl AgeTransformer {
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    pub fn age(&self, construction_year: i32) -> f64 {
        f64::from(self.reference_year - construction_year)
    }
}

impl Transformer for AgeTransformer {
    fn name(&self) -> &'static str {
        "age"
    }

    fn output_columns(&self) -> Vec<String> {
        vec!["age__Age".to_string()]
    }

    fn transform(&self, listing: &Listing) -> Result<Vec<f64>> {
        Ok(vec![listing.made.map(|year| self.age(year)).unwrap_or(f64::NAN)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_stats() -> PreprocessingStats {
        let mut numeric = BTreeMap::new();
        numeric.insert(
            "squareMeters".to_string(),
            NumericColumnStats {
                median: 100.0,
                mean: 100.0,
                std: 50.0,
            },
        );
        numeric.insert(
            "numberOfRooms".to_string(),
            NumericColumnStats {
                median: 4.0,
                mean: 4.0,
                std: 2.0,
            },
        );
        numeric.insert(
            "made".to_string(),
            NumericColumnStats {
                median: 2005.0,
                mean: 2005.0,
                std: 10.0,
            },
        );

        let mut flags = BTreeMap::new();
        for column in CAT_FEATURES {
            flags.insert(column.to_string(), FlagColumnStats { most_frequent: 0 });
        }

        PreprocessingStats {
            reference_year: 2021,
            numeric,
            flags,
        }
    }

    fn sample_listing() -> Listing {
        Listing {
            square_meters: Some(150.0),
            number_of_rooms: Some(3.0),
            has_yard: Some(true),
            has_pool: Some(false),
            floor: 2,
            city_code: 75001,
            city_part_range: 3,
            num_prev_owners: 3,
            made: Some(1990),
            is_new_built: Some(false),
            has_storm_protector: Some(true),
            basement: 40.0,
            attic: 10.0,
            garage: 12.0,
            has_storage_room: None,
            has_guest_room: true,
        }
    }

    #[test]
    fn test_boolean_encoder_output_is_binary_and_idempotent() {
        for value in [None, Some(0.0), Some(1.0), Some(42.0), Some(-3.5)] {
            let encoded = BooleanEncoder::encode(value);
            assert!(encoded == 0.0 || encoded == 1.0);
            assert_eq!(BooleanEncoder::encode(Some(encoded)), encoded);
        }
    }

    #[test]
    fn test_boolean_encoder_missing_flag_is_zero() {
        let listing = sample_listing();
        let values = BooleanEncoder.transform(&listing).unwrap();
        // hasYard, hasPool, isNewBuilt, hasStormProtector, hasStorageRoom
        assert_eq!(values, vec![1.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_room_size_is_area_over_rooms() {
        let listing = sample_listing();
        let values = RoomSizeTransformer.transform(&listing).unwrap();
        assert_eq!(values, vec![50.0]);
        assert!(values[0].is_finite() && values[0] > 0.0);
    }

    #[test]
    fn test_room_size_zero_rooms_is_infinite() {
        let mut listing = sample_listing();
        listing.number_of_rooms = Some(0.0);
        let values = RoomSizeTransformer.transform(&listing).unwrap();
        assert!(values[0].is_infinite());
    }

    #[test]
    fn test_room_size_missing_operand_is_nan() {
        let mut listing = sample_listing();
        listing.square_meters = None;
        let values = RoomSizeTransformer.transform(&listing).unwrap();
        assert!(values[0].is_nan());
    }

    #[test]
    fn test_owner_category_lookup() {
        assert_eq!(OwnerCategoryTransformer::category(3), Some("New_3"));
        assert_eq!(OwnerCategoryTransformer::category(1), Some("New_1"));
        assert_eq!(OwnerCategoryTransformer::category(10), Some("New_10"));
        assert_eq!(OwnerCategoryTransformer::category(0), None);
        assert_eq!(OwnerCategoryTransformer::category(11), None);
    }

    #[test]
    fn test_owner_one_hot_unknown_is_all_zero() {
        let mut listing = sample_listing();
        listing.num_prev_owners = 0;
        let values = OwnerCategoryTransformer.transform(&listing).unwrap();
        assert_eq!(values.len(), 10);
        assert!(values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_owner_one_hot_known_category() {
        let listing = sample_listing();
        let values = OwnerCategoryTransformer.transform(&listing).unwrap();
        assert_eq!(values.iter().sum::<f64>(), 1.0);
        assert_eq!(values[2], 1.0); // New_3
    }

    #[test]
    fn test_city_code_decompose_paris() {
        let parts = CityCodeTransformer::decompose(75001);
        assert_eq!(
            parts,
            CityCodeParts {
                zone: 7,
                sub_zone: 5,
                sorting_district: 750,
                post_office: 1,
            }
        );
    }

    #[test]
    fn test_city_code_decompose_zero_pads() {
        let parts = CityCodeTransformer::decompose(1);
        assert_eq!(
            parts,
            CityCodeParts {
                zone: 0,
                sub_zone: 0,
                sorting_district: 0,
                post_office: 1,
            }
        );
    }

    #[test]
    fn test_city_code_transform_keeps_normalized_code() {
        let listing = sample_listing();
        let values = CityCodeTransformer.transform(&listing).unwrap();
        assert_eq!(values, vec![75001.0, 7.0, 5.0, 750.0, 1.0]);
    }

    #[test]
    fn test_age_relative_to_frozen_reference_year() {
        let transformer = AgeTransformer::new(2021);
        assert_eq!(transformer.age(1990), 31.0);
        assert_eq!(transformer.age(2021), 0.0);
    }

    #[test]
    fn test_age_missing_year_is_nan() {
        let mut listing = sample_listing();
        listing.made = None;
        let values = AgeTransformer::new(2021).transform(&listing).unwrap();
        assert!(values[0].is_nan());
    }

    #[test]
    fn test_numeric_standardizer_uses_frozen_stats() {
        let standardizer = NumericStandardizer::from_stats(&sample_stats()).unwrap();
        let values = standardizer.transform(&sample_listing()).unwrap();
        assert_eq!(values[0], 1.0); // (150 - 100) / 50
        assert_eq!(values[1], -0.5); // (3 - 4) / 2
        assert_eq!(values[2], -1.5); // (1990 - 2005) / 10
    }

    #[test]
    fn test_numeric_standardizer_missing_stat_fails_at_build() {
        let mut stats = sample_stats();
        stats.numeric.remove("made");
        let err = NumericStandardizer::from_stats(&stats).unwrap_err();
        assert!(err.to_string().contains("made"));
    }

    #[test]
    fn test_categorical_one_hot_imputes_missing_flag() {
        let encoder = CategoricalOneHot::from_stats(&sample_stats()).unwrap();
        let values = encoder.transform(&sample_listing()).unwrap();
        assert_eq!(values.len(), 10);
        // hasStorageRoom is missing; most_frequent = 0 selects the 0 bucket
        assert_eq!(values[8], 1.0);
        assert_eq!(values[9], 0.0);
    }

    #[test]
    fn test_categorical_one_hot_missing_stat_fails_at_build() {
        let mut stats = sample_stats();
        stats.flags.remove("hasPool");
        assert!(CategoricalOneHot::from_stats(&stats).is_err());
    }

    #[test]
    fn test_output_column_prefixes_follow_dispatch_route() {
        let standardizer = NumericStandardizer::from_stats(&sample_stats()).unwrap();
        assert_eq!(
            standardizer.output_columns(),
            vec!["num__squareMeters", "num__numberOfRooms", "num__made"]
        );
        assert_eq!(
            OwnerCategoryTransformer.output_columns().first().map(String::as_str),
            Some("owner__Prev_Cat_New_1")
        );
    }
}
