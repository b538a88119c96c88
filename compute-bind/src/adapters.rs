//! Hand-written wrappers with extra pre- and post-processing.
//!
//! Each adapter ends in the same [`call_function`] primitive the generated
//! wrappers use.

use compute_core::options::{
    CastOptions, IndexOptions, SelectKOptions, SortKey, SortOrder, TakeOptions,
};
use compute_core::{DataType, Datum, MemoryPool, Operand, Scalar};

use crate::call::call_function;
use crate::error::BindError;
use crate::namespace::Namespace;

/// Sort key name injected for flat arrays, which have no columns.
const SYNTHETIC_SORT_KEY: &str = "dummy";

impl Namespace {
    /// Cast array values to another data type.
    ///
    /// With `safe`, overflows and other lossy conversions are errors. A
    /// `None` target type is rejected before dispatch.
    pub fn cast(
        &self,
        arr: impl Into<Datum>,
        target_type: Option<DataType>,
        safe: bool,
    ) -> Result<Datum, BindError> {
        let target_type = target_type.ok_or_else(|| {
            BindError::invalid_argument("cast", "cast target type must not be None")
        })?;
        let options = if safe {
            CastOptions::safe(target_type)
        } else {
            CastOptions::unsafe_cast(target_type)
        };
        call_function(
            self.engine().as_ref(),
            "cast",
            &[arr.into()],
            Some(&options),
            None,
        )
    }

    /// Find the index of the first occurrence of `value`, or -1.
    ///
    /// `start` and `end` restrict the search to `data[start..end]`; the
    /// returned index still counts from the start of `data`. A plain value,
    /// or a scalar of another type, is converted to the element type of
    /// `data` first.
    pub fn index(
        &self,
        data: impl Into<Datum>,
        value: impl Into<Operand>,
        start: Option<usize>,
        end: Option<usize>,
        pool: Option<&dyn MemoryPool>,
    ) -> Result<Scalar, BindError> {
        let mut data = data.into();
        let data_type = data
            .data_type()
            .ok_or_else(|| BindError::invalid_argument("index", "data must be an array"))?;

        if start.is_some() || end.is_some() {
            let len = data.len().unwrap_or(0);
            let offset = start.unwrap_or(0).min(len);
            let stop = end.unwrap_or(len).clamp(offset, len);
            tracing::trace!(offset, stop, "index: slicing input");
            data = data
                .slice(offset, stop - offset)
                .map_err(|e| BindError::invalid_argument("index", e.to_string()))?;
        }

        let value = match value.into() {
            Operand::Plain(v) => Scalar::new(data_type, v),
            Operand::Datum(Datum::Scalar(s)) if s.data_type == data_type => Ok(s),
            Operand::Datum(Datum::Scalar(s)) => {
                tracing::trace!(
                    from = %s.data_type,
                    to = %data_type,
                    "index: coercing search value"
                );
                s.cast_to(data_type)
            }
            Operand::Datum(other) => {
                return Err(BindError::invalid_argument(
                    "index",
                    format!("search value must be a scalar, got {}", other.kind()),
                ));
            }
        }
        .map_err(|e| BindError::invalid_argument("index", e.to_string()))?;

        let options = IndexOptions { value };
        let result = call_function(
            self.engine().as_ref(),
            "index",
            &[data],
            Some(&options),
            pool,
        )?;
        let found = match &result {
            Datum::Scalar(s) => s.as_i64(),
            _ => None,
        }
        .ok_or_else(|| {
            BindError::invalid_argument(
                "index",
                format!("kernel returned a {} instead of an integer scalar", result.kind()),
            )
        })?;

        let adjusted = match start {
            Some(offset) if found >= 0 => found + i64::try_from(offset).unwrap_or(i64::MAX),
            _ => found,
        };
        Ok(Scalar::int64(adjusted))
    }

    /// Select values (or rows) of `data` at `indices`.
    ///
    /// Null indices emit nulls. With `boundscheck` off the kernel does not
    /// check indices, and an out-of-range index is undefined behavior of
    /// the kernel; this adapter only forwards the flag.
    pub fn take(
        &self,
        data: impl Into<Datum>,
        indices: impl Into<Datum>,
        boundscheck: bool,
        pool: Option<&dyn MemoryPool>,
    ) -> Result<Datum, BindError> {
        let options = TakeOptions { boundscheck };
        call_function(
            self.engine().as_ref(),
            "take",
            &[data.into(), indices.into()],
            Some(&options),
            pool,
        )
    }

    /// Replace each null in `values` with `fill_value`.
    ///
    /// `fill_value` is converted to the element type of `values` when it is
    /// a plain value or of another type. Dispatches to `coalesce`.
    pub fn fill_null(
        &self,
        values: impl Into<Datum>,
        fill_value: impl Into<Operand>,
    ) -> Result<Datum, BindError> {
        let values = values.into();
        let data_type = values.data_type().ok_or_else(|| {
            BindError::invalid_argument("fill_null", "values must be an array or scalar")
        })?;
        let fill_value = match fill_value.into() {
            Operand::Plain(v) => Scalar::new(data_type, v).map(Datum::Scalar),
            Operand::Datum(d) if d.data_type() == Some(data_type) => Ok(d),
            Operand::Datum(Datum::Scalar(s)) => s.cast_to(data_type).map(Datum::Scalar),
            Operand::Datum(Datum::Array(a)) => a.cast_to(data_type).map(Datum::Array),
            Operand::Datum(Datum::Table(_)) => {
                return Err(BindError::invalid_argument(
                    "fill_null",
                    "fill value must be an array or scalar",
                ));
            }
        }
        .map_err(|e| BindError::invalid_argument("fill_null", e.to_string()))?;

        call_function(
            self.engine().as_ref(),
            "coalesce",
            &[values, fill_value],
            None,
            None,
        )
    }

    /// Indices of the `k` largest elements (or rows, ordered by
    /// `sort_keys`). Output order is not stable.
    ///
    /// An array has no columns to name, so for array input `sort_keys` is
    /// ignored and a single `"dummy"` key sorts the values themselves.
    pub fn top_k_unstable(
        &self,
        values: impl Into<Datum>,
        k: usize,
        sort_keys: &[&str],
        pool: Option<&dyn MemoryPool>,
    ) -> Result<Datum, BindError> {
        self.select_k(values.into(), k, sort_keys, SortOrder::Descending, pool)
    }

    /// Indices of the `k` smallest elements (or rows, ordered by
    /// `sort_keys`). Output order is not stable.
    ///
    /// For array input `sort_keys` is ignored, as in
    /// [`top_k_unstable`](Self::top_k_unstable).
    pub fn bottom_k_unstable(
        &self,
        values: impl Into<Datum>,
        k: usize,
        sort_keys: &[&str],
        pool: Option<&dyn MemoryPool>,
    ) -> Result<Datum, BindError> {
        self.select_k(values.into(), k, sort_keys, SortOrder::Ascending, pool)
    }

    fn select_k(
        &self,
        values: Datum,
        k: usize,
        sort_keys: &[&str],
        order: SortOrder,
        pool: Option<&dyn MemoryPool>,
    ) -> Result<Datum, BindError> {
        let keys = if values.is_array_like() {
            tracing::trace!(?order, "select_k: injecting synthetic sort key");
            vec![SortKey::new(SYNTHETIC_SORT_KEY, order)]
        } else {
            sort_keys.iter().map(|name| SortKey::new(*name, order)).collect()
        };
        let options = SelectKOptions::new(k, keys);
        call_function(
            self.engine().as_ref(),
            "select_k_unstable",
            &[values],
            Some(&options),
            pool,
        )
    }
}
