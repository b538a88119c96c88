//! ReferenceEngine: a small, row-at-a-time kernel engine for tests.

use std::cmp::Ordering;

use crate::datum::{Array, DataType, Datum, Scalar, Table, Value};
use crate::error::{DataError, KernelError};
use crate::kernel::KernelEngine;
use crate::options::*;
use crate::pool::MemoryPool;

/// A naive implementation of the functions in
/// [`standard_descriptors`](super::standard_descriptors).
///
/// Values are processed one row at a time; nothing here is meant to be fast.
/// With `boundscheck` disabled, `take` emits null for an out-of-range index
/// where a real engine would read out of bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceEngine;

impl ReferenceEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }
}

impl KernelEngine for ReferenceEngine {
    fn dispatch(
        &self,
        name: &str,
        args: &[Datum],
        options: Option<&dyn FunctionOptions>,
        _pool: Option<&dyn MemoryPool>,
    ) -> Result<Datum, KernelError> {
        match name {
            "cast" => cast(one(name, args)?, required::<CastOptions>(name, options)?),
            "index" => index(
                one(name, args)?,
                required::<IndexOptions>(name, options)?,
            ),
            "take" => {
                let [data, indices] = two(name, args)?;
                take(data, indices, &optional::<TakeOptions>(name, options)?)
            }
            "coalesce" => coalesce(at_least_one(name, args)?),
            "select_k_unstable" => select_k(
                one(name, args)?,
                required::<SelectKOptions>(name, options)?,
            ),
            "array_sort_indices" => array_sort_indices(
                one(name, args)?,
                &optional::<ArraySortOptions>(name, options)?,
            ),
            "add" => {
                let [x, y] = two(name, args)?;
                add(x, y)
            }
            "and" | "or" => {
                let [x, y] = two(name, args)?;
                boolean(name, x, y)
            }
            "round" => round(one(name, args)?, &optional::<RoundOptions>(name, options)?),
            "sum" => sum(
                one(name, args)?,
                &optional::<ScalarAggregateOptions>(name, options)?,
            ),
            "count" => count(one(name, args)?, &optional::<CountOptions>(name, options)?),
            "max_element_wise" => max_element_wise(
                at_least_one(name, args)?,
                &optional::<ElementWiseAggregateOptions>(name, options)?,
            ),
            "filter" => {
                let [values, selection] = two(name, args)?;
                filter(
                    values,
                    selection,
                    &optional::<FilterOptions>(name, options)?,
                )
            }
            "utf8_upper" => map_utf8(
                one(name, args)?,
                |s| Value::Utf8(s.to_uppercase()),
                DataType::Utf8,
            ),
            "match_substring" => {
                let opts = required::<MatchSubstringOptions>(name, options)?;
                let pattern = if opts.ignore_case {
                    opts.pattern.to_lowercase()
                } else {
                    opts.pattern.clone()
                };
                map_utf8(
                    one(name, args)?,
                    |s| {
                        let hit = if opts.ignore_case {
                            s.to_lowercase().contains(&pattern)
                        } else {
                            s.contains(&pattern)
                        };
                        Value::Boolean(hit)
                    },
                    DataType::Boolean,
                )
            }
            "utf8_trim" => {
                let opts = required::<TrimOptions>(name, options)?;
                map_utf8(
                    one(name, args)?,
                    |s| Value::Utf8(s.trim_matches(|c| opts.characters.contains(c)).to_owned()),
                    DataType::Utf8,
                )
            }
            "is_null" => is_null(one(name, args)?, &optional::<NullOptions>(name, options)?),
            "hash_sum" => Err(KernelError::Invalid(
                "hash aggregate functions are only usable inside a group-by".into(),
            )),
            "strptime" => Err(KernelError::NotImplemented {
                function: name.to_owned(),
                inputs: describe(args),
            }),
            _ => Err(KernelError::FunctionNotFound(name.to_owned())),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Argument plumbing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn describe(args: &[Datum]) -> String {
    args.iter()
        .map(|a| match a.data_type() {
            Some(t) => format!("{}<{t}>", a.kind()),
            None => a.kind().to_owned(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn arg_count(name: &str, args: &[Datum], expected: usize) -> Result<(), KernelError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(KernelError::Invalid(format!(
            "function '{name}' accepts {expected} arguments but {} passed",
            args.len()
        )))
    }
}

fn one<'a>(name: &str, args: &'a [Datum]) -> Result<&'a Datum, KernelError> {
    arg_count(name, args, 1)?;
    Ok(&args[0])
}

fn two<'a>(name: &str, args: &'a [Datum]) -> Result<[&'a Datum; 2], KernelError> {
    arg_count(name, args, 2)?;
    Ok([&args[0], &args[1]])
}

fn at_least_one<'a>(name: &str, args: &'a [Datum]) -> Result<&'a [Datum], KernelError> {
    if args.is_empty() {
        return Err(KernelError::Invalid(format!(
            "function '{name}' accepts at least 1 argument but 0 passed"
        )));
    }
    Ok(args)
}

fn required<'a, T: OptionsType>(
    name: &str,
    options: Option<&'a dyn FunctionOptions>,
) -> Result<&'a T, KernelError> {
    let options = options.ok_or_else(|| {
        KernelError::Invalid(format!(
            "function '{name}' cannot be called without options"
        ))
    })?;
    options.downcast_ref::<T>().ok_or_else(|| {
        KernelError::Invalid(format!(
            "function '{name}' expected {} but got {}",
            T::NAME,
            options.type_name()
        ))
    })
}

fn optional<T: OptionsType + Default>(
    name: &str,
    options: Option<&dyn FunctionOptions>,
) -> Result<T, KernelError> {
    match options {
        None => Ok(T::default()),
        Some(_) => required::<T>(name, options).cloned(),
    }
}

fn array<'a>(name: &str, d: &'a Datum) -> Result<&'a Array, KernelError> {
    d.as_array().ok_or_else(|| KernelError::NotImplemented {
        function: name.to_owned(),
        inputs: describe(std::slice::from_ref(d)),
    })
}

/// Common row count of the array arguments; `None` when all are scalars.
fn broadcast_len(args: &[Datum]) -> Result<Option<usize>, KernelError> {
    let mut len = None;
    for arg in args {
        match arg {
            Datum::Scalar(_) => {}
            Datum::Array(a) => match len {
                None => len = Some(a.len()),
                Some(n) if n == a.len() => {}
                Some(n) => {
                    return Err(KernelError::Invalid(format!(
                        "array arguments must all be the same length ({n} vs {})",
                        a.len()
                    )));
                }
            },
            Datum::Table(_) => {
                return Err(KernelError::TypeError(
                    "element-wise functions do not accept tables".into(),
                ));
            }
        }
    }
    Ok(len)
}

fn cell(d: &Datum, row: usize) -> Option<&Value> {
    match d {
        Datum::Scalar(s) => s.value.as_ref(),
        Datum::Array(a) => a.values().get(row).and_then(Option::as_ref),
        Datum::Table(_) => None,
    }
}

/// Assemble an element-wise result: a scalar when every input was scalar.
fn finish(
    data_type: DataType,
    len: Option<usize>,
    mut values: Vec<Option<Value>>,
) -> Result<Datum, KernelError> {
    match len {
        None => Ok(Datum::Scalar(Scalar {
            data_type,
            value: values.pop().flatten(),
        })),
        Some(_) => Ok(Datum::Array(Array::new(data_type, values)?)),
    }
}

fn elementwise(
    args: &[Datum],
    data_type: DataType,
    mut f: impl FnMut(&[Option<&Value>]) -> Result<Option<Value>, KernelError>,
) -> Result<Datum, KernelError> {
    let len = broadcast_len(args)?;
    let rows = len.unwrap_or(1);
    let mut out = Vec::with_capacity(rows);
    let mut row_cells = Vec::with_capacity(args.len());
    for row in 0..rows {
        row_cells.clear();
        row_cells.extend(args.iter().map(|a| cell(a, row)));
        out.push(f(&row_cells)?);
    }
    finish(data_type, len, out)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Kernels
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn cast_value(v: &Value, to: DataType, opts: &CastOptions) -> Result<Value, DataError> {
    if to == DataType::Utf8 {
        return Ok(match v {
            Value::Utf8(s) => Value::Utf8(s.clone()),
            other => Value::Utf8(other.to_string()),
        });
    }
    match (v.coerce(to), v) {
        (Ok(out), _) => Ok(out),
        (Err(_), Value::Float(f)) if opts.allow_float_truncate && to.is_integer() => {
            Value::Float(f.trunc()).coerce(to)
        }
        (Err(e), _) => Err(e),
    }
}

fn cast(data: &Datum, opts: &CastOptions) -> Result<Datum, KernelError> {
    let to = opts
        .target_type
        .ok_or_else(|| KernelError::Invalid("cast target type must not be null".into()))?;
    elementwise(std::slice::from_ref(data), to, |cells| {
        cells[0].map(|v| cast_value(v, to, opts)).transpose().map_err(Into::into)
    })
}

fn index(data: &Datum, opts: &IndexOptions) -> Result<Datum, KernelError> {
    let arr = array("index", data)?;
    let needle = match &opts.value.value {
        None => return Ok(Datum::Scalar(Scalar::int64(-1))),
        Some(v) => v
            .coerce(arr.data_type())
            .map_err(|e| KernelError::TypeError(e.to_string()))?,
    };
    let found = arr
        .values()
        .iter()
        .position(|v| v.as_ref() == Some(&needle))
        .and_then(|i| i64::try_from(i).ok())
        .unwrap_or(-1);
    Ok(Datum::Scalar(Scalar::int64(found)))
}

fn take_rows(arr: &Array, rows: &[Option<usize>]) -> Result<Array, DataError> {
    let values = rows
        .iter()
        .map(|r| r.and_then(|i| arr.values().get(i).cloned().flatten()))
        .collect();
    Array::new(arr.data_type(), values)
}

fn take(data: &Datum, indices: &Datum, opts: &TakeOptions) -> Result<Datum, KernelError> {
    let indices = array("take", indices)?;
    if !indices.data_type().is_integer() && indices.data_type() != DataType::Null {
        return Err(KernelError::TypeError(format!(
            "take indices must be integers, got {}",
            indices.data_type()
        )));
    }
    let len = data.len().ok_or_else(|| KernelError::NotImplemented {
        function: "take".into(),
        inputs: describe(std::slice::from_ref(data)),
    })?;
    let mut rows = Vec::with_capacity(indices.len());
    for idx in indices.values() {
        let Some(idx) = idx.as_ref().and_then(Value::as_i64) else {
            rows.push(None);
            continue;
        };
        let row = usize::try_from(idx).ok().filter(|&r| r < len);
        if row.is_none() && opts.boundscheck {
            return Err(KernelError::IndexOutOfBounds { index: idx, len });
        }
        rows.push(row);
    }
    match data {
        Datum::Array(a) => Ok(Datum::Array(take_rows(a, &rows)?)),
        Datum::Table(t) => {
            let columns = t
                .columns()
                .iter()
                .map(|(n, a)| Ok((n.clone(), take_rows(a, &rows)?)))
                .collect::<Result<Vec<_>, DataError>>()?;
            Ok(Datum::Table(Table::new(columns)?))
        }
        Datum::Scalar(_) => Err(KernelError::NotImplemented {
            function: "take".into(),
            inputs: describe(std::slice::from_ref(data)),
        }),
    }
}

fn coalesce(args: &[Datum]) -> Result<Datum, KernelError> {
    let data_type = args[0].data_type().unwrap_or(DataType::Null);
    if let Some(other) = args
        .iter()
        .filter_map(Datum::data_type)
        .find(|t| *t != data_type && *t != DataType::Null)
    {
        return Err(KernelError::TypeError(format!(
            "coalesce arguments must share a type ({data_type} vs {other})"
        )));
    }
    elementwise(args, data_type, |cells| {
        Ok(cells.iter().find_map(|c| c.cloned()))
    })
}

fn cmp_nullable(a: Option<&Value>, b: Option<&Value>, order: SortOrder) -> Ordering {
    // Nulls sort last in both directions.
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        }
    }
}

fn indices_array(rows: impl IntoIterator<Item = usize>) -> Result<Datum, KernelError> {
    let values = rows
        .into_iter()
        .map(|r| Some(Value::UInt(r as u64)))
        .collect::<Vec<_>>();
    Ok(Datum::Array(Array::new(DataType::UInt64, values)?))
}

fn select_k(data: &Datum, opts: &SelectKOptions) -> Result<Datum, KernelError> {
    if opts.sort_keys.is_empty() {
        return Err(KernelError::Invalid("select_k requires at least one sort key".into()));
    }
    let mut rows: Vec<usize> = (0..data.len().unwrap_or(0)).collect();
    match data {
        Datum::Array(a) => {
            let order = opts.sort_keys[0].order;
            let v = a.values();
            rows.sort_unstable_by(|&x, &y| cmp_nullable(v[x].as_ref(), v[y].as_ref(), order));
        }
        Datum::Table(t) => {
            let keys = opts
                .sort_keys
                .iter()
                .map(|k| {
                    t.column(&k.name)
                        .map(|c| (c, k.order))
                        .ok_or_else(|| DataError::ColumnNotFound(k.name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.sort_unstable_by(|&x, &y| {
                keys.iter()
                    .map(|(c, order)| {
                        cmp_nullable(c.values()[x].as_ref(), c.values()[y].as_ref(), *order)
                    })
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            });
        }
        Datum::Scalar(_) => {
            return Err(KernelError::NotImplemented {
                function: "select_k_unstable".into(),
                inputs: describe(std::slice::from_ref(data)),
            });
        }
    }
    rows.truncate(opts.k);
    indices_array(rows)
}

fn array_sort_indices(data: &Datum, opts: &ArraySortOptions) -> Result<Datum, KernelError> {
    let arr = array("array_sort_indices", data)?;
    let v = arr.values();
    let (mut valid, nulls): (Vec<usize>, Vec<usize>) =
        (0..arr.len()).partition(|&i| v[i].is_some());
    valid.sort_by(|&x, &y| cmp_nullable(v[x].as_ref(), v[y].as_ref(), opts.order));
    let rows = match opts.null_placement {
        NullPlacement::AtStart => nulls.into_iter().chain(valid).collect::<Vec<_>>(),
        NullPlacement::AtEnd => valid.into_iter().chain(nulls).collect(),
    };
    indices_array(rows)
}

fn add(x: &Datum, y: &Datum) -> Result<Datum, KernelError> {
    let (tx, ty) = (x.data_type(), y.data_type());
    let out = match (tx, ty) {
        (Some(a), Some(b)) if a.is_integer() && b.is_integer() => DataType::Int64,
        (Some(a), Some(b)) if a.is_numeric() && b.is_numeric() => DataType::Float64,
        _ => {
            return Err(KernelError::NotImplemented {
                function: "add".into(),
                inputs: describe(&[x.clone(), y.clone()]),
            });
        }
    };
    elementwise(&[x.clone(), y.clone()], out, |cells| {
        let (Some(a), Some(b)) = (cells[0], cells[1]) else {
            return Ok(None);
        };
        Ok(Some(match out {
            DataType::Int64 => {
                let (a, b) = (a.as_i64().unwrap_or(0), b.as_i64().unwrap_or(0));
                Value::Int(a.checked_add(b).ok_or_else(|| {
                    KernelError::Invalid(format!("overflow adding {a} and {b}"))
                })?)
            }
            _ => Value::Float(a.as_f64().unwrap_or(f64::NAN) + b.as_f64().unwrap_or(f64::NAN)),
        }))
    })
}

fn boolean(name: &str, x: &Datum, y: &Datum) -> Result<Datum, KernelError> {
    if x.data_type() != Some(DataType::Boolean) || y.data_type() != Some(DataType::Boolean) {
        return Err(KernelError::NotImplemented {
            function: name.to_owned(),
            inputs: describe(&[x.clone(), y.clone()]),
        });
    }
    let is_and = name == "and";
    elementwise(&[x.clone(), y.clone()], DataType::Boolean, |cells| {
        Ok(match (cells[0].and_then(Value::as_bool), cells[1].and_then(Value::as_bool)) {
            (Some(a), Some(b)) => Some(Value::Boolean(if is_and { a && b } else { a || b })),
            _ => None,
        })
    })
}

fn round_scaled(y: f64, mode: RoundMode) -> f64 {
    let floor = y.floor();
    let diff = y - floor;
    let half = |tie_up: bool| {
        if diff > 0.5 {
            floor + 1.0
        } else if diff < 0.5 {
            floor
        } else if tie_up {
            floor + 1.0
        } else {
            floor
        }
    };
    let floor_is_even = floor.rem_euclid(2.0) == 0.0;
    match mode {
        RoundMode::Down => floor,
        RoundMode::Up => y.ceil(),
        RoundMode::TowardsZero => y.trunc(),
        RoundMode::TowardsInfinity => {
            if y >= 0.0 {
                y.ceil()
            } else {
                floor
            }
        }
        RoundMode::HalfDown => half(false),
        RoundMode::HalfUp => half(true),
        RoundMode::HalfTowardsZero => half(y < 0.0),
        RoundMode::HalfTowardsInfinity => half(y >= 0.0),
        RoundMode::HalfToEven => half(!floor_is_even),
        RoundMode::HalfToOdd => half(floor_is_even),
    }
}

fn round(data: &Datum, opts: &RoundOptions) -> Result<Datum, KernelError> {
    if !data.data_type().is_some_and(DataType::is_numeric) {
        return Err(KernelError::NotImplemented {
            function: "round".into(),
            inputs: describe(std::slice::from_ref(data)),
        });
    }
    let exp = i32::try_from(opts.ndigits)
        .map_err(|_| KernelError::Invalid(format!("ndigits out of range: {}", opts.ndigits)))?;
    let scale = 10f64.powi(exp);
    elementwise(std::slice::from_ref(data), DataType::Float64, |cells| {
        Ok(cells[0]
            .and_then(Value::as_f64)
            .map(|v| Value::Float(round_scaled(v * scale, opts.round_mode) / scale)))
    })
}

fn sum(data: &Datum, opts: &ScalarAggregateOptions) -> Result<Datum, KernelError> {
    let arr = array("sum", data)?;
    let out_type = if arr.data_type().is_integer() {
        DataType::Int64
    } else if arr.data_type() == DataType::Float64 {
        DataType::Float64
    } else {
        return Err(KernelError::NotImplemented {
            function: "sum".into(),
            inputs: describe(std::slice::from_ref(data)),
        });
    };
    let valid: Vec<&Value> = arr.values().iter().flatten().collect();
    let too_few = u32::try_from(valid.len()).is_ok_and(|n| n < opts.min_count);
    if (!opts.skip_nulls && arr.null_count() > 0) || too_few {
        return Ok(Datum::Scalar(Scalar::null(out_type)));
    }
    let value = if out_type == DataType::Int64 {
        Value::Int(valid.iter().filter_map(|v| v.as_i64()).sum())
    } else {
        Value::Float(valid.iter().filter_map(|v| v.as_f64()).sum())
    };
    Ok(Datum::Scalar(Scalar {
        data_type: out_type,
        value: Some(value),
    }))
}

fn count(data: &Datum, opts: &CountOptions) -> Result<Datum, KernelError> {
    let arr = array("count", data)?;
    let n = match opts.mode {
        CountMode::OnlyValid => arr.len() - arr.null_count(),
        CountMode::OnlyNull => arr.null_count(),
        CountMode::All => arr.len(),
    };
    Ok(Datum::Scalar(Scalar::int64(i64::try_from(n).unwrap_or(i64::MAX))))
}

fn max_element_wise(
    args: &[Datum],
    opts: &ElementWiseAggregateOptions,
) -> Result<Datum, KernelError> {
    let data_type = args[0].data_type().unwrap_or(DataType::Null);
    elementwise(args, data_type, |cells| {
        if !opts.skip_nulls && cells.iter().any(Option::is_none) {
            return Ok(None);
        }
        let best = cells.iter().flatten().copied().fold(None::<&Value>, |best, v| {
            match best {
                Some(b) if b.partial_cmp(v) != Some(Ordering::Less) => Some(b),
                _ => Some(v),
            }
        });
        Ok(best.cloned())
    })
}

fn filter(values: &Datum, selection: &Datum, opts: &FilterOptions) -> Result<Datum, KernelError> {
    let arr = array("filter", values)?;
    let mask = array("filter", selection)?;
    if mask.data_type() != DataType::Boolean || mask.len() != arr.len() {
        return Err(KernelError::Invalid(
            "filter selection must be a boolean array of the same length".into(),
        ));
    }
    let mut out = Vec::new();
    for (v, keep) in arr.values().iter().zip(mask.values()) {
        match keep.as_ref().and_then(Value::as_bool) {
            Some(true) => out.push(v.clone()),
            Some(false) => {}
            None => {
                if opts.null_selection_behavior == NullSelectionBehavior::EmitNull {
                    out.push(None);
                }
            }
        }
    }
    Ok(Datum::Array(Array::new(arr.data_type(), out)?))
}

fn map_utf8(
    data: &Datum,
    f: impl Fn(&str) -> Value,
    out: DataType,
) -> Result<Datum, KernelError> {
    if data.data_type() != Some(DataType::Utf8) {
        return Err(KernelError::NotImplemented {
            function: "utf8".into(),
            inputs: describe(std::slice::from_ref(data)),
        });
    }
    elementwise(std::slice::from_ref(data), out, |cells| {
        Ok(cells[0].and_then(Value::as_str).map(&f))
    })
}

fn is_null(data: &Datum, opts: &NullOptions) -> Result<Datum, KernelError> {
    let len = broadcast_len(std::slice::from_ref(data))?;
    let rows = len.unwrap_or(1);
    let out = (0..rows)
        .map(|row| {
            let null = match cell(data, row) {
                None => true,
                Some(Value::Float(f)) => opts.nan_is_null && f.is_nan(),
                Some(_) => false,
            };
            Some(Value::Boolean(null))
        })
        .collect();
    finish(DataType::Boolean, len, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: &str, args: Vec<Datum>, options: Option<&dyn FunctionOptions>) -> Datum {
        ReferenceEngine.dispatch(name, &args, options, None).unwrap()
    }

    #[test]
    fn index_finds_first_match() {
        let arr = Array::utf8([Some("a"), Some("b"), Some("c")]);
        let opts = IndexOptions {
            value: Scalar::utf8("c"),
        };
        assert_eq!(
            run("index", vec![arr.into()], Some(&opts)),
            Datum::Scalar(Scalar::int64(2))
        );
    }

    #[test]
    fn pool_choice_does_not_change_results() {
        let pool = crate::pool::SystemPool::new();
        let args: Vec<Datum> = vec![
            Array::int64([Some(1), None]).into(),
            Array::int64([Some(2), Some(3)]).into(),
        ];
        let with_pool = ReferenceEngine
            .dispatch("add", &args, None, Some(&pool))
            .unwrap();
        assert_eq!(with_pool, run("add", args, None));
        assert_eq!(pool.bytes_allocated(), 0);
    }

    #[test]
    fn take_respects_boundscheck() {
        let arr: Datum = Array::int64([Some(1), Some(2)]).into();
        let idx: Datum = Array::int64([Some(5)]).into();
        let err = ReferenceEngine
            .dispatch("take", &[arr.clone(), idx.clone()], None, None)
            .unwrap_err();
        assert!(matches!(err, KernelError::IndexOutOfBounds { index: 5, len: 2 }));

        let unchecked = TakeOptions { boundscheck: false };
        assert_eq!(
            run("take", vec![arr, idx], Some(&unchecked)),
            Datum::Array(Array::int64([None]))
        );
    }

    #[test]
    fn coalesce_broadcasts_scalars() {
        let arr = Array::int8([Some(1), None]);
        let fill = Scalar::new(DataType::Int8, 5).unwrap();
        assert_eq!(
            run("coalesce", vec![arr.into(), fill.into()], None),
            Datum::Array(Array::int8([Some(1), Some(5)]))
        );
    }

    #[test]
    fn round_half_to_even() {
        let arr = Array::float64([Some(2.5), Some(3.5), Some(-2.5), Some(1.25)]);
        let out = run("round", vec![arr.into()], None);
        assert_eq!(
            out,
            Datum::Array(Array::float64([Some(2.0), Some(4.0), Some(-2.0), Some(1.0)]))
        );
    }

    #[test]
    fn missing_required_options() {
        let err = ReferenceEngine
            .dispatch("match_substring", &[Array::utf8([Some("x")]).into()], None, None)
            .unwrap_err();
        assert!(matches!(err, KernelError::Invalid(_)));
    }

    #[test]
    fn select_k_on_table_uses_named_keys() {
        let t = Table::new([
            ("a", Array::int64([Some(1), Some(3), Some(2)])),
            ("b", Array::utf8([Some("x"), Some("y"), Some("z")])),
        ])
        .unwrap();
        let opts = SelectKOptions::new(2, vec![SortKey::new("a", SortOrder::Descending)]);
        let out = run("select_k_unstable", vec![t.into()], Some(&opts));
        let expected =
            Array::new(DataType::UInt64, vec![Some(1u64.into()), Some(2u64.into())]).unwrap();
        assert_eq!(out, Datum::Array(expected));
    }
}
