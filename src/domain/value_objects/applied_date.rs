use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 応募日。ISO-8601 の日時文字列として送受信される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppliedDate(DateTime<Utc>);

impl AppliedDate {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// 暦日を UTC の 0 時として扱う
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(parsed.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(naive.and_utc()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }
        Err(format!("Invalid applied date: {value}"))
    }
}

impl fmt::Display for AppliedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl FromStr for AppliedDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for AppliedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for AppliedDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_rfc3339_naive_and_date_only() {
        let zulu = AppliedDate::parse("2024-01-10T00:00:00.000Z").unwrap();
        let naive = AppliedDate::parse("2024-01-10T00:00:00").unwrap();
        let date_only = AppliedDate::parse("2024-01-10").unwrap();
        assert_eq!(zulu, naive);
        assert_eq!(naive, date_only);
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let shifted = AppliedDate::parse("2024-01-10T09:00:00+09:00").unwrap();
        assert_eq!(shifted, AppliedDate::parse("2024-01-10").unwrap());
    }

    #[test]
    fn serializes_like_an_iso_timestamp() {
        let date = AppliedDate::from_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(
            serde_json::to_string(&date).unwrap(),
            "\"2024-03-01T00:00:00.000Z\""
        );
        assert_eq!(date.date().to_string(), "2024-03-01");
    }

    #[test]
    fn rejects_garbage() {
        assert!(AppliedDate::parse("yesterday").is_err());
        assert!(serde_json::from_str::<AppliedDate>("\"13/45/2024\"").is_err());
    }
}
