//! The standard options families.

use serde::{Deserialize, Serialize};

use super::{FieldSpec, OptionsType};
use crate::datum::{DataType, Scalar};

/// Options for `cast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CastOptions {
    /// Type to cast to.
    pub target_type: Option<DataType>,
    /// Allow integer values to wrap on overflow.
    pub allow_int_overflow: bool,
    /// Allow floats to lose their fractional part.
    pub allow_float_truncate: bool,
    /// Skip UTF-8 validation.
    pub allow_invalid_utf8: bool,
}

impl CastOptions {
    /// A cast that fails on any lossy conversion.
    pub fn safe(target_type: DataType) -> Self {
        Self {
            target_type: Some(target_type),
            allow_int_overflow: false,
            allow_float_truncate: false,
            allow_invalid_utf8: false,
        }
    }

    /// A cast that permits lossy conversions.
    pub fn unsafe_cast(target_type: DataType) -> Self {
        Self {
            target_type: Some(target_type),
            allow_int_overflow: true,
            allow_float_truncate: true,
            allow_invalid_utf8: true,
        }
    }

    /// Whether every lossy conversion is rejected.
    pub fn is_safe(&self) -> bool {
        !(self.allow_int_overflow || self.allow_float_truncate || self.allow_invalid_utf8)
    }
}

impl OptionsType for CastOptions {
    const NAME: &'static str = "CastOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::optional("target_type", Option::<DataType>::None),
            FieldSpec::optional("allow_int_overflow", false),
            FieldSpec::optional("allow_float_truncate", false),
            FieldSpec::optional("allow_invalid_utf8", false),
        ]
    }
}

/// Options for `index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexOptions {
    /// The value to search for.
    pub value: Scalar,
}

impl OptionsType for IndexOptions {
    const NAME: &'static str = "IndexOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::required("value")]
    }
}

/// Options for `take`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TakeOptions {
    /// Check indices against the input length. Without it an out-of-range
    /// index is undefined behavior in the kernel.
    pub boundscheck: bool,
}

impl Default for TakeOptions {
    fn default() -> Self {
        Self { boundscheck: true }
    }
}

impl OptionsType for TakeOptions {
    const NAME: &'static str = "TakeOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::optional("boundscheck", true)]
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// A column name and the direction to order it by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// Column name. Ignored for flat arrays.
    pub name: String,
    /// Direction.
    pub order: SortOrder,
}

impl SortKey {
    /// Create a sort key.
    pub fn new(name: impl Into<String>, order: SortOrder) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }
}

/// Options for `select_k_unstable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectKOptions {
    /// Number of indices to select.
    pub k: usize,
    /// Ordering keys, most significant first.
    pub sort_keys: Vec<SortKey>,
}

impl SelectKOptions {
    /// Create selection options.
    pub fn new(k: usize, sort_keys: Vec<SortKey>) -> Self {
        Self { k, sort_keys }
    }
}

impl OptionsType for SelectKOptions {
    const NAME: &'static str = "SelectKOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::required("k"), FieldSpec::required("sort_keys")]
    }
}

/// Where nulls go in sorted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPlacement {
    /// Nulls first.
    AtStart,
    /// Nulls last.
    #[default]
    AtEnd,
}

/// Options for `array_sort_indices`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArraySortOptions {
    /// Direction.
    pub order: SortOrder,
    /// Null placement.
    pub null_placement: NullPlacement,
}

impl OptionsType for ArraySortOptions {
    const NAME: &'static str = "ArraySortOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::optional("order", SortOrder::Ascending),
            FieldSpec::optional("null_placement", NullPlacement::AtEnd),
        ]
    }
}

/// Tie-breaking rule for `round`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundMode {
    /// Towards negative infinity.
    Down,
    /// Towards positive infinity.
    Up,
    /// Truncate.
    TowardsZero,
    /// Away from zero.
    TowardsInfinity,
    /// Ties go down.
    HalfDown,
    /// Ties go up.
    HalfUp,
    /// Ties go towards zero.
    HalfTowardsZero,
    /// Ties go away from zero.
    HalfTowardsInfinity,
    /// Ties go to the even neighbor.
    #[default]
    HalfToEven,
    /// Ties go to the odd neighbor.
    HalfToOdd,
}

/// Options for `round`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoundOptions {
    /// Digits of precision; negative rounds to tens, hundreds, ...
    pub ndigits: i64,
    /// Tie-breaking rule.
    pub round_mode: RoundMode,
}

impl OptionsType for RoundOptions {
    const NAME: &'static str = "RoundOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::optional("ndigits", 0),
            FieldSpec::optional("round_mode", RoundMode::HalfToEven),
        ]
    }
}

/// Options for scalar aggregates such as `sum`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalarAggregateOptions {
    /// Ignore nulls instead of propagating them.
    pub skip_nulls: bool,
    /// Minimum number of non-null values for a non-null result.
    pub min_count: u32,
}

impl Default for ScalarAggregateOptions {
    fn default() -> Self {
        Self {
            skip_nulls: true,
            min_count: 1,
        }
    }
}

impl OptionsType for ScalarAggregateOptions {
    const NAME: &'static str = "ScalarAggregateOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::optional("skip_nulls", true),
            FieldSpec::optional("min_count", 1),
        ]
    }
}

/// Which values `count` counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// Non-null values.
    #[default]
    OnlyValid,
    /// Null values.
    OnlyNull,
    /// Everything.
    All,
}

/// Options for `count`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountOptions {
    /// Which values to count.
    pub mode: CountMode,
}

impl OptionsType for CountOptions {
    const NAME: &'static str = "CountOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::optional("mode", CountMode::OnlyValid)]
    }
}

/// Options for element-wise aggregates such as `max_element_wise`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementWiseAggregateOptions {
    /// Ignore nulls instead of propagating them.
    pub skip_nulls: bool,
}

impl Default for ElementWiseAggregateOptions {
    fn default() -> Self {
        Self { skip_nulls: true }
    }
}

impl OptionsType for ElementWiseAggregateOptions {
    const NAME: &'static str = "ElementWiseAggregateOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::optional("skip_nulls", true)]
    }
}

/// What `filter` does with a null selection slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullSelectionBehavior {
    /// Drop the row.
    #[default]
    Drop,
    /// Emit a null.
    EmitNull,
}

/// Options for `filter`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterOptions {
    /// Null selection handling.
    pub null_selection_behavior: NullSelectionBehavior,
}

impl OptionsType for FilterOptions {
    const NAME: &'static str = "FilterOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::optional(
            "null_selection_behavior",
            NullSelectionBehavior::Drop,
        )]
    }
}

/// Options for substring matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchSubstringOptions {
    /// Substring to look for.
    pub pattern: String,
    /// Compare case-insensitively.
    pub ignore_case: bool,
}

impl OptionsType for MatchSubstringOptions {
    const NAME: &'static str = "MatchSubstringOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("pattern"),
            FieldSpec::optional("ignore_case", false),
        ]
    }
}

/// Options for `is_null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NullOptions {
    /// Treat floating point NaN as null.
    pub nan_is_null: bool,
}

impl OptionsType for NullOptions {
    const NAME: &'static str = "NullOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::optional("nan_is_null", false)]
    }
}

/// Options for trimming functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrimOptions {
    /// Characters to strip from both ends.
    pub characters: String,
}

impl OptionsType for TrimOptions {
    const NAME: &'static str = "TrimOptions";

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::required("characters")]
    }
}
