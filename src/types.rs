//! Core value types for the party book.
//!
//! Every type here validates itself on construction, so a value that exists
//! is a value that is valid. Commands only ever receive these types.

use crate::error::{BookError, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use uuid::Uuid;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} '.\-]*$").expect("valid name regex"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]([A-Za-z0-9+_.\-]*[A-Za-z0-9])?@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9]$",
    )
    .expect("valid email regex")
});

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}]+$").expect("valid tag regex"));

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").expect("valid amount regex"));

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(3[01]|[12][0-9]|0[1-9])-(1[0-2]|0[1-9])-[0-9]{4}$").expect("valid date regex")
});

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$").expect("valid time regex"));

const DATE_FORMAT: &str = "%d-%m-%Y";

/// Stable identifier for a contact.
///
/// Assigned once at construction and carried through edits, snapshots and
/// save/load. Events reference contacts only through this identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub Uuid);

impl ContactId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        ContactId(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    pub fn parse(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(ContactId)
            .map_err(|e| BookError::invalid("contact id", e.to_string()))
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContactId({})", self.0)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position in a currently visible view (zero-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index(usize);

impl Index {
    pub fn from_zero_based(index: usize) -> Self {
        Index(index)
    }

    /// Build from a one-based position as shown to users. Zero is rejected.
    pub fn from_one_based(index: usize) -> Result<Self> {
        index
            .checked_sub(1)
            .map(Index)
            .ok_or_else(|| BookError::invalid("index", "must be a positive integer"))
    }

    pub fn zero_based(self) -> usize {
        self.0
    }

    pub fn one_based(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

fn validate_name(field: &'static str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if !NAME_PATTERN.is_match(trimmed) {
        return Err(BookError::invalid(
            field,
            format!(
                "`{raw}` must start with a letter or digit and contain only letters, digits, spaces, apostrophes, hyphens or periods"
            ),
        ));
    }
    Ok(trimmed.to_string())
}

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: &str) -> Result<Self> {
                validate_name($field, raw).map($name)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Case-insensitive key used for duplicate detection.
            pub fn identity_key(&self) -> String {
                self.0.to_lowercase()
            }

            /// True when both names denote the same identity.
            pub fn same_identity(&self, other: &Self) -> bool {
                self.identity_key() == other.identity_key()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = BookError;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }
    };
}

name_type!(
    /// A contact's display name. Identity ignores case and surrounding spaces.
    Name,
    "name"
);

name_type!(
    /// A party's name. Identity ignores case and surrounding spaces.
    EventName,
    "party name"
);

/// Phone number: digits only, at least three of them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !PHONE_PATTERN.is_match(trimmed) {
            return Err(BookError::invalid(
                "phone",
                format!("`{raw}` must contain only digits and be at least 3 digits long"),
            ));
        }
        Ok(Phone(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address of the form `local-part@domain`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !EMAIL_PATTERN.is_match(trimmed) {
            return Err(BookError::invalid(
                "email",
                format!("`{raw}` must be of the format local-part@domain"),
            ));
        }
        Ok(Email(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional website. Empty means "none"; otherwise it may not start with whitespace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Website(String);

impl Website {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.chars().next().is_some_and(char::is_whitespace) {
            return Err(BookError::invalid(
                "website",
                "must not be blank or start with whitespace",
            ));
        }
        Ok(Website(raw.to_string()))
    }

    pub fn none() -> Self {
        Website(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Website {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single alphanumeric tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !TAG_PATTERN.is_match(trimmed) {
            return Err(BookError::invalid(
                "tag",
                format!("`{raw}` must be alphanumeric"),
            ));
        }
        Ok(Tag(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative money amount with at most two decimal places, held in cents.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(cents: u64) -> Self {
        Amount(cents)
    }

    /// Whole currency units, e.g. `Amount::whole(500)` is `500.00`.
    pub fn whole(units: u64) -> Self {
        Amount(units.saturating_mul(100))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let invalid = || {
            BookError::invalid(
                "budget",
                format!(
                    "`{raw}` should only contain numbers with up to 2 decimal places, and it should be at least 0"
                ),
            )
        };
        if !AMOUNT_PATTERN.is_match(trimmed) {
            return Err(invalid());
        }

        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Amount)
            .ok_or_else(invalid)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }

    pub fn saturating_add(self, other: Amount) -> Amount {
        Amount(self.0.saturating_add(other.0))
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        self.saturating_add(other)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({self})")
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Amount {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Calendar date of a party, written `dd-MM-yyyy`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventDate(NaiveDate);

impl EventDate {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let invalid = || {
            BookError::invalid(
                "date",
                format!("`{raw}` should be in the format dd-MM-yyyy and be a valid calendar date"),
            )
        };
        if !DATE_PATTERN.is_match(trimmed) {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(EventDate)
            .map_err(|_| invalid())
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        EventDate(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// True when this date at `time` lies strictly before `now`.
    ///
    /// Earlier days are always past; on the same day the time decides.
    pub fn is_in_past(&self, time: EventTime, now: NaiveDateTime) -> bool {
        let today = now.date();
        if self.0 < today {
            return true;
        }
        self.0 == today && time.as_naive() < now.time().with_nanosecond(0).unwrap_or(now.time())
    }
}

impl fmt::Debug for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventDate({self})")
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// Start time of a party, written `HH:mm`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventTime(NaiveTime);

impl EventTime {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let invalid =
            || BookError::invalid("time", format!("`{raw}` should be in the format HH:mm"));
        let caps = TIME_PATTERN.captures(trimmed).ok_or_else(invalid)?;
        let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
        let minute: u32 = caps[2].parse().map_err(|_| invalid())?;
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(EventTime)
            .ok_or_else(invalid)
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        EventTime(time)
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Debug for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventTime({self})")
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Source of "now" for the past-event check.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock local time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Content hash (SHA-256), used as the integrity marker of saved books.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Compute hash from bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Hash(hasher.finalize().into())
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({}...)", &self.to_hex()[..8])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, time: &str) -> NaiveDateTime {
        EventDate::parse(date)
            .unwrap()
            .as_naive()
            .and_time(EventTime::parse(time).unwrap().as_naive())
    }

    #[test]
    fn test_hash_hex() {
        let hash = Hash::from_bytes(b"hello world");
        assert_eq!(
            hash.to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(hash.to_string(), hash.to_hex());
    }

    #[test]
    fn test_name_identity_ignores_case_and_padding() {
        let a = Name::parse("  Alice Tan ").unwrap();
        let b = Name::parse("alice tan").unwrap();
        assert_eq!(a.as_str(), "Alice Tan");
        assert!(a.same_identity(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_name_rules() {
        assert!(EventName::parse("O'Malley").is_ok());
        assert!(EventName::parse("Event-Name").is_ok());
        assert!(EventName::parse("peter the 2nd").is_ok());
        assert!(EventName::parse("").is_err());
        assert!(EventName::parse(" ").is_err());
        assert!(EventName::parse("^").is_err());
        assert!(EventName::parse("peter*").is_err());
    }

    #[test]
    fn test_phone_and_email() {
        assert!(Phone::parse("911").is_ok());
        assert!(Phone::parse("91").is_err());
        assert!(Phone::parse("9011p041").is_err());
        assert!(Email::parse("alice@example.com").is_ok());
        assert!(Email::parse("a+b_c@sub.example.org").is_ok());
        assert!(Email::parse("alice").is_err());
        assert!(Email::parse("alice@example.c").is_err());
        assert!(Email::parse("-alice@example.com").is_err());
    }

    #[test]
    fn test_website_rules() {
        assert!(Website::parse("").unwrap().is_empty());
        assert!(Website::parse("https://www.google.com").is_ok());
        assert!(Website::parse(" ").is_err());
        assert!(Website::parse("  abc").is_err());
    }

    #[test]
    fn test_amount_parse_and_display() {
        assert_eq!(Amount::parse("100").unwrap(), Amount::from_cents(10_000));
        assert_eq!(Amount::parse("0.5").unwrap(), Amount::from_cents(50));
        assert_eq!(Amount::parse("12.34").unwrap().to_string(), "12.34");
        assert_eq!(Amount::whole(500).to_string(), "500.00");
        assert!(Amount::parse("-1").is_err());
        assert!(Amount::parse("1.234").is_err());
        assert!(Amount::parse("abc").is_err());
        assert!(Amount::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_amount_arithmetic() {
        let a = Amount::whole(3);
        let b = Amount::parse("1.50").unwrap();
        assert_eq!(a.checked_sub(b), Some(Amount::parse("1.50").unwrap()));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(vec![a, b].into_iter().sum::<Amount>().to_string(), "4.50");
    }

    #[test]
    fn test_date_strict_calendar() {
        assert_eq!(EventDate::parse("29-02-2024").unwrap().to_string(), "29-02-2024");
        assert!(EventDate::parse("29-02-2023").is_err());
        assert!(EventDate::parse("31-04-2025").is_err());
        assert!(EventDate::parse("2025-12-01").is_err());
        assert!(EventDate::parse("1-12-2025").is_err());
    }

    #[test]
    fn test_time_format() {
        assert_eq!(EventTime::parse("9:05").unwrap().to_string(), "09:05");
        assert_eq!(EventTime::parse("23:59").unwrap().to_string(), "23:59");
        assert!(EventTime::parse("24:00").is_err());
        assert!(EventTime::parse("12:60").is_err());
    }

    #[test]
    fn test_is_in_past() {
        let now = at("15-06-2026", "12:00");
        let date = |s| EventDate::parse(s).unwrap();
        let time = |s| EventTime::parse(s).unwrap();

        assert!(date("14-06-2026").is_in_past(time("23:00"), now));
        assert!(date("15-06-2026").is_in_past(time("11:59"), now));
        assert!(!date("15-06-2026").is_in_past(time("12:00"), now));
        assert!(!date("16-06-2026").is_in_past(time("00:00"), now));
    }

    #[test]
    fn test_index_conversions() {
        let idx = Index::from_one_based(3).unwrap();
        assert_eq!(idx.zero_based(), 2);
        assert_eq!(idx.to_string(), "3");
        assert!(Index::from_one_based(0).is_err());
    }
}
