use serde::{Deserialize, Serialize};
use std::fmt;

/// 応募ステータス。ワイヤ上では 0..=4 の整数で表現される。
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ApplicationStatus {
    #[default]
    Applied = 0,
    Interview = 1,
    Offer = 2,
    Rejected = 3,
    Accepted = 4,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interview,
        ApplicationStatus::Offer,
        ApplicationStatus::Rejected,
        ApplicationStatus::Accepted,
    ];

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interview => "Interview",
            ApplicationStatus::Offer => "Offer",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Accepted => "Accepted",
        }
    }
}

impl TryFrom<u8> for ApplicationStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ApplicationStatus::Applied),
            1 => Ok(ApplicationStatus::Interview),
            2 => Ok(ApplicationStatus::Offer),
            3 => Ok(ApplicationStatus::Rejected),
            4 => Ok(ApplicationStatus::Accepted),
            other => Err(format!("Unknown application status: {other}")),
        }
    }
}

impl From<ApplicationStatus> for u8 {
    fn from(value: ApplicationStatus) -> Self {
        value.code()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_integer_code() {
        let json = serde_json::to_string(&ApplicationStatus::Offer).unwrap();
        assert_eq!(json, "2");
        let parsed: ApplicationStatus = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, ApplicationStatus::Accepted);
    }

    #[test]
    fn rejects_codes_outside_closed_set() {
        assert!(serde_json::from_str::<ApplicationStatus>("5").is_err());
        assert!(ApplicationStatus::try_from(9).is_err());
    }

    #[test]
    fn all_is_ordered_by_code() {
        for (index, status) in ApplicationStatus::ALL.iter().enumerate() {
            assert_eq!(status.code() as usize, index);
        }
        assert_eq!(ApplicationStatus::Interview.label(), "Interview");
    }
}
