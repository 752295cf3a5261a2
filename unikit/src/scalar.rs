//! Unique scalar derivations for every supported leaf kind.
//!
//! Tests often reach for random values to avoid magic numbers, but random
//! inputs make runs irreproducible. Every derivation here is a fixed formula
//! over the [`Sequencer`](crate::Sequencer) counter, so values are unique
//! across a run yet fully deterministic given the counter state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::sequencer::{Sequencer, global_sequencer};

/// Cycle of symbols backing [`Unique::unique_character`]
const CHAR_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Prefix of every generated string value
const STRING_PREFIX: &str = "testValue";

/// Identifies one scalar leaf kind for kind-indexed dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Integer,
    Long,
    Short,
    Byte,
    Double,
    Float,
    Text,
    Character,
    Boolean,
    Millis,
    Date,
    Instant,
    BigInteger,
    BigDecimal,
    Uuid,
}

/// A scalar produced through kind-indexed dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Integer(i32),
    Long(i64),
    Short(i16),
    Byte(i8),
    Double(f64),
    Float(f32),
    Text(String),
    Character(char),
    Boolean(bool),
    Millis(i64),
    Date(DateTime<Utc>),
    Instant(SystemTime),
    BigInteger(i128),
    BigDecimal(Decimal),
    Uuid(Uuid),
}

/// Scalar source: one derivation per kind, all fed by a shared sequencer.
///
/// Holds the epoch-millis offset captured at construction (anchoring the
/// date/instant series) and the cursor of the cyclic character sequence.
/// Construct with an isolated [`Sequencer`] to get predictable series in
/// tests, or use [`global_unique`] for the process-wide instance.
#[derive(Debug)]
pub struct Unique {
    sequencer: Arc<Sequencer>,
    init_millis: i64,
    char_cursor: AtomicUsize,
}

impl Unique {
    /// Create a scalar source drawing from the given sequencer
    pub fn new(sequencer: Arc<Sequencer>) -> Self {
        Self {
            sequencer,
            init_millis: Utc::now().timestamp_millis(),
            char_cursor: AtomicUsize::new(0),
        }
    }

    /// The sequencer feeding this source
    pub fn sequencer(&self) -> &Arc<Sequencer> {
        &self.sequencer
    }

    /// Unique long: plain counter output, always greater than zero
    pub fn unique_long(&self) -> i64 {
        self.sequencer.next_long()
    }

    /// Unique int: 64-to-32 hash mix of the long value, which avoids the
    /// collision pattern of a naive truncating cast
    pub fn unique_integer(&self) -> i32 {
        let value = self.unique_long() as u64;
        (value ^ (value >> 32)) as i32
    }

    /// Unique short: XOR of the long value with itself shifted right 48
    /// bits, truncated to short width
    pub fn unique_short(&self) -> i16 {
        let value = self.unique_long() as u64;
        (value ^ (value >> 48)) as i16
    }

    /// Unique byte: the short XOR-fold applied once more against byte width
    pub fn unique_byte(&self) -> i8 {
        let value = self.unique_short() as u16;
        (value ^ (value >> 8)) as i8
    }

    /// Unique double: the long value as integral part, its decimal digits as
    /// fractional part. A fraction ending in '0' gets a '1' appended so the
    /// rendered decimal never silently loses a digit. Always positive and
    /// non-integral.
    pub fn unique_double(&self) -> f64 {
        let value = self.unique_long();
        let digits = value.to_string();
        let mut rendered = format!("{digits}.{digits}");
        if digits.ends_with('0') {
            rendered.push('1');
        }
        rendered.parse().unwrap_or(value as f64)
    }

    /// Unique float: narrowing of the unique double
    pub fn unique_float(&self) -> f32 {
        self.unique_double() as f32
    }

    /// Unique string: constant prefix with the long value as suffix; never
    /// empty by construction
    pub fn unique_string(&self) -> String {
        format!("{STRING_PREFIX}{}", self.unique_long())
    }

    /// Unique character: next symbol of the infinite cyclic sequence over
    /// `[a-z][A-Z][0-9]`; the cursor wraps on the alphabet length
    pub fn unique_character(&self) -> char {
        let cursor = self.char_cursor.fetch_add(1, Ordering::Relaxed);
        CHAR_ALPHABET[cursor % CHAR_ALPHABET.len()] as char
    }

    /// Unique boolean: true when the underlying counter value is odd, so
    /// consecutive draws strictly alternate
    pub fn unique_boolean(&self) -> bool {
        self.unique_long() % 2 == 1
    }

    /// Unique millis: construction-time epoch millis plus the long value
    /// times 1000, so consecutive draws are exactly one second apart
    pub fn unique_millis(&self) -> i64 {
        self.init_millis + self.unique_long() * 1000
    }

    /// Unique date from unique millis
    pub fn unique_date(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.unique_millis()).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Unique instant from unique millis
    pub fn unique_instant(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.unique_millis() as u64)
    }

    /// Unique big integer: widening wrap of the long value
    pub fn unique_big_integer(&self) -> i128 {
        self.unique_long() as i128
    }

    /// Unique big decimal: wrap of the long value
    pub fn unique_big_decimal(&self) -> Decimal {
        Decimal::from(self.unique_long())
    }

    /// Unique UUID: the long value's decimal digits right-aligned into a
    /// 32-digit template, hyphenated into canonical 8-4-4-4-12 grouping
    pub fn unique_uuid(&self) -> Uuid {
        let value = self.unique_long();
        let template = format!("{value:032}");
        let hyphenated = format!(
            "{}-{}-{}-{}-{}",
            &template[..8],
            &template[8..12],
            &template[12..16],
            &template[16..20],
            &template[20..]
        );
        Uuid::parse_str(&hyphenated).unwrap_or_else(|_| Uuid::from_u128(value as u128))
    }

    /// Kind-indexed dispatch over all scalar derivations
    pub fn unique_scalar(&self, kind: ScalarKind) -> ScalarValue {
        match kind {
            ScalarKind::Integer => ScalarValue::Integer(self.unique_integer()),
            ScalarKind::Long => ScalarValue::Long(self.unique_long()),
            ScalarKind::Short => ScalarValue::Short(self.unique_short()),
            ScalarKind::Byte => ScalarValue::Byte(self.unique_byte()),
            ScalarKind::Double => ScalarValue::Double(self.unique_double()),
            ScalarKind::Float => ScalarValue::Float(self.unique_float()),
            ScalarKind::Text => ScalarValue::Text(self.unique_string()),
            ScalarKind::Character => ScalarValue::Character(self.unique_character()),
            ScalarKind::Boolean => ScalarValue::Boolean(self.unique_boolean()),
            ScalarKind::Millis => ScalarValue::Millis(self.unique_millis()),
            ScalarKind::Date => ScalarValue::Date(self.unique_date()),
            ScalarKind::Instant => ScalarValue::Instant(self.unique_instant()),
            ScalarKind::BigInteger => ScalarValue::BigInteger(self.unique_big_integer()),
            ScalarKind::BigDecimal => ScalarValue::BigDecimal(self.unique_big_decimal()),
            ScalarKind::Uuid => ScalarValue::Uuid(self.unique_uuid()),
        }
    }
}

/// Process-wide default scalar source
static GLOBAL_UNIQUE: OnceLock<Arc<Unique>> = OnceLock::new();

/// Get the shared process-wide scalar source, initializing it on first use
pub fn global_unique() -> Arc<Unique> {
    GLOBAL_UNIQUE
        .get_or_init(|| Arc::new(Unique::new(global_sequencer())))
        .clone()
}

/// Generate a unique long from the process-wide source
pub fn unique_long() -> i64 {
    global_unique().unique_long()
}

/// Generate a unique int from the process-wide source
pub fn unique_integer() -> i32 {
    global_unique().unique_integer()
}

/// Generate a unique short from the process-wide source
pub fn unique_short() -> i16 {
    global_unique().unique_short()
}

/// Generate a unique byte from the process-wide source
pub fn unique_byte() -> i8 {
    global_unique().unique_byte()
}

/// Generate a unique double from the process-wide source
pub fn unique_double() -> f64 {
    global_unique().unique_double()
}

/// Generate a unique float from the process-wide source
pub fn unique_float() -> f32 {
    global_unique().unique_float()
}

/// Generate a unique string from the process-wide source
pub fn unique_string() -> String {
    global_unique().unique_string()
}

/// Generate a unique character from the process-wide source
pub fn unique_character() -> char {
    global_unique().unique_character()
}

/// Generate a unique boolean from the process-wide source
pub fn unique_boolean() -> bool {
    global_unique().unique_boolean()
}

/// Generate unique epoch millis from the process-wide source
pub fn unique_millis() -> i64 {
    global_unique().unique_millis()
}

/// Generate a unique date from the process-wide source
pub fn unique_date() -> DateTime<Utc> {
    global_unique().unique_date()
}

/// Generate a unique instant from the process-wide source
pub fn unique_instant() -> SystemTime {
    global_unique().unique_instant()
}

/// Generate a unique big integer from the process-wide source
pub fn unique_big_integer() -> i128 {
    global_unique().unique_big_integer()
}

/// Generate a unique big decimal from the process-wide source
pub fn unique_big_decimal() -> Decimal {
    global_unique().unique_big_decimal()
}

/// Generate a unique UUID from the process-wide source
pub fn unique_uuid() -> Uuid {
    global_unique().unique_uuid()
}

/// Kind-indexed dispatch against the process-wide source
pub fn unique_scalar(kind: ScalarKind) -> ScalarValue {
    global_unique().unique_scalar(kind)
}
