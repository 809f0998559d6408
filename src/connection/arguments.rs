use log::warn;
use serde_json::Value;

use crate::error::ConnectionError;

/// Hard ceiling of records a single page may contain.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Validated page size together with the end of the result set it is taken from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageLimit {
    /// Take the first N elements after the `after` anchor.
    First(usize),
    /// Take the last N elements before the `before` anchor.
    Last(usize),
}

impl PageLimit {
    pub fn size(&self) -> usize {
        match self {
            PageLimit::First(size) | PageLimit::Last(size) => *size,
        }
    }
}

/// Who is paginating which connection, used for audit logs and error messages.
#[derive(Debug, Copy, Clone)]
pub struct Audit<'a> {
    /// Key of the calling user.
    pub caller: &'a str,
    /// Name of the loader operation.
    pub operation: &'static str,
    /// GraphQL type name of the connection's nodes.
    pub connection: &'static str,
}

/// Validates the raw `first` and `last` arguments of a connection.
///
/// Rules are checked in order and the first violation wins:
/// exactly one of both must be present, it must be an integer, it must not be
/// negative and it must not exceed [`MAX_PAGE_SIZE`].
/// Violations are logged with the caller and the offending argument.
///
/// * `first` - Raw `first` argument, `Some(Value::Null)` counts as present.
/// * `last` - Raw `last` argument.
/// * `audit` - Caller and operation the arguments belong to.
pub fn validate_page_limit(
    first: Option<&Value>,
    last: Option<&Value>,
    audit: &Audit,
) -> Result<PageLimit, ConnectionError> {
    let result = match (first, last) {
        (None, None) => Err(ConnectionError::MissingFirstOrLast {
            caller: audit.caller.to_string(),
            operation: audit.operation,
            connection: audit.connection,
        }),
        (Some(_), Some(_)) => Err(ConnectionError::FirstAndLastTogether {
            caller: audit.caller.to_string(),
            operation: audit.operation,
            connection: audit.connection,
        }),
        (Some(value), None) => page_size("first", value, audit).map(PageLimit::First),
        (None, Some(value)) => page_size("last", value, audit).map(PageLimit::Last),
    };
    if let Err(error) = &result {
        warn!("{}", error);
    }
    result
}

/// Checks type and range of a single page size argument.
fn page_size(argument: &'static str, value: &Value, audit: &Audit) -> Result<usize, ConnectionError> {
    let Value::Number(number) = value else {
        return Err(ConnectionError::ArgumentType {
            caller: audit.caller.to_string(),
            operation: audit.operation,
            argument,
            actual: runtime_type(value),
        });
    };
    let size = match (number.as_i64(), number.as_u64()) {
        (Some(size), _) => size,
        // Larger than i64::MAX, certainly above the ceiling.
        (None, Some(_)) => i64::MAX,
        (None, None) => {
            return Err(ConnectionError::ArgumentType {
                caller: audit.caller.to_string(),
                operation: audit.operation,
                argument,
                actual: "float",
            });
        }
    };
    if size < 0 {
        return Err(ConnectionError::BelowZero {
            caller: audit.caller.to_string(),
            operation: audit.operation,
            connection: audit.connection,
            argument,
        });
    }
    let size = size as u64;
    if size > MAX_PAGE_SIZE {
        return Err(ConnectionError::AboveLimit {
            caller: audit.caller.to_string(),
            operation: audit.operation,
            connection: audit.connection,
            argument,
            requested: number.to_string(),
            limit: MAX_PAGE_SIZE,
        });
    }
    Ok(size as usize)
}

/// Name of the runtime type of a JSON value, as reported in type errors.
pub fn runtime_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
