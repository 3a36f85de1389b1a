//! Host-side semantics of the imports a mapping module links against

use graphshrew_support::error::{Error, Result};
use graphshrew_support::ethereum::{Call, Value};
use num_bigint::BigInt;
use num_traits::Zero;

/// Target used for messages logged by the guest.
pub const GUEST_LOG_TARGET: &str = "guest";

/// Answers `ethereum.call` requests. `Ok(None)` simulates a reverted call.
pub type CallHandler = Box<dyn FnMut(&Call) -> Result<Option<Vec<Value>>> + Send>;

/// Build the error raised by `env.abort`. Missing strings and zero
/// positions print as `?`.
pub fn abort(message: Option<String>, file: Option<String>, line: u32, column: u32) -> Error {
    let position = |n: u32| if n == 0 { "?".to_string() } else { n.to_string() };
    Error::Abort {
        message: message.unwrap_or_else(|| "?".to_string()),
        file: file.unwrap_or_else(|| "?".to_string()),
        line: position(line),
        column: position(column),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

impl TryFrom<i32> for LogLevel {
    type Error = i32;

    fn try_from(level: i32) -> std::result::Result<Self, i32> {
        Ok(match level {
            0 => LogLevel::Critical,
            1 => LogLevel::Error,
            2 => LogLevel::Warning,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => return Err(level),
        })
    }
}

/// Forward a guest log message. Critical messages are logged and then
/// turned into an error that stops the handler.
pub fn log(level: i32, message: String) -> Result<()> {
    let level = LogLevel::try_from(level)
        .map_err(|level| Error::UnknownLogLevel { level, message: message.clone() })?;
    match level {
        LogLevel::Critical => {
            log::error!(target: GUEST_LOG_TARGET, "CRITICAL: {}", message);
            return Err(Error::CriticalLog(message));
        }
        LogLevel::Error => log::error!(target: GUEST_LOG_TARGET, "{}", message),
        LogLevel::Warning => log::warn!(target: GUEST_LOG_TARGET, "{}", message),
        LogLevel::Info => log::info!(target: GUEST_LOG_TARGET, "{}", message),
        LogLevel::Debug => log::debug!(target: GUEST_LOG_TARGET, "{}", message),
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BigIntOp {
    Plus,
    Minus,
    Times,
    DividedBy,
    Mod,
}

impl BigIntOp {
    pub const ALL: [BigIntOp; 5] = [
        BigIntOp::Plus,
        BigIntOp::Minus,
        BigIntOp::Times,
        BigIntOp::DividedBy,
        BigIntOp::Mod,
    ];

    /// Import name within the `index` namespace.
    pub fn import_name(self) -> &'static str {
        match self {
            BigIntOp::Plus => "bigInt.plus",
            BigIntOp::Minus => "bigInt.minus",
            BigIntOp::Times => "bigInt.times",
            BigIntOp::DividedBy => "bigInt.dividedBy",
            BigIntOp::Mod => "bigInt.mod",
        }
    }

    /// Division and remainder truncate toward zero.
    pub fn apply(self, x: &BigInt, y: &BigInt) -> Result<BigInt> {
        Ok(match self {
            BigIntOp::Plus => x + y,
            BigIntOp::Minus => x - y,
            BigIntOp::Times => x * y,
            BigIntOp::DividedBy | BigIntOp::Mod if y.is_zero() => return Err(Error::DivisionByZero),
            BigIntOp::DividedBy => x / y,
            BigIntOp::Mod => x % y,
        })
    }
}

pub fn pow(x: &BigInt, exponent: i32) -> Result<BigInt> {
    let exponent = u32::try_from(exponent).map_err(|_| Error::InvalidExponent(exponent))?;
    Ok(x.pow(exponent))
}

pub fn big_int_to_string(x: &BigInt) -> String {
    x.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abort_message() {
        let err = abort(Some("boom".into()), Some("mapping.ts".into()), 12, 5);
        assert_eq!(err.to_string(), "aborted \"boom\" at mapping.ts, line 12, column 5");
        let err = abort(None, None, 0, 0);
        assert_eq!(err.to_string(), "aborted \"?\" at ?, line ?, column ?");
    }

    #[test]
    fn test_log_levels() {
        assert!(log(1, "error".into()).is_ok());
        assert!(log(4, "debug".into()).is_ok());
        assert!(matches!(log(0, "fatal".into()), Err(Error::CriticalLog(m)) if m == "fatal"));
        let err = log(7, "what".into()).unwrap_err();
        assert_eq!(err.to_string(), "unknown log level 7 (with message 'what')");
    }

    #[test]
    fn test_arithmetic_truncates() {
        let (x, y) = (BigInt::from(-7), BigInt::from(2));
        assert_eq!(BigIntOp::DividedBy.apply(&x, &y).unwrap(), BigInt::from(-3));
        assert_eq!(BigIntOp::Mod.apply(&x, &y).unwrap(), BigInt::from(-1));
        assert_eq!(BigIntOp::Minus.apply(&x, &y).unwrap(), BigInt::from(-9));
        assert!(matches!(
            BigIntOp::Mod.apply(&x, &BigInt::zero()),
            Err(Error::DivisionByZero)
        ));
        assert_eq!(BigIntOp::Plus.apply(&x, &BigInt::zero()).unwrap(), x);
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(&BigInt::from(10), 18).unwrap().to_string(), "1000000000000000000");
        assert_eq!(pow(&BigInt::from(5), 0).unwrap(), BigInt::from(1));
        assert!(matches!(pow(&BigInt::from(5), -1), Err(Error::InvalidExponent(-1))));
    }
}
