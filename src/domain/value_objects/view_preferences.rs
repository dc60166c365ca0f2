use super::application_status::ApplicationStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

const FILTER_ALL: &str = "all";

/// 一覧表示のステータス絞り込み
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: ApplicationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => *expected == status,
        }
    }

    /// 永続化用の文字列表現（"all" または "0".."4"）
    pub fn as_persisted(&self) -> String {
        match self {
            StatusFilter::All => FILTER_ALL.to_string(),
            StatusFilter::Only(status) => status.code().to_string(),
        }
    }

    /// 永続化された値を解釈する。壊れた値は `None`。
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value == FILTER_ALL {
            return Some(StatusFilter::All);
        }
        value
            .parse::<u8>()
            .ok()
            .and_then(|code| ApplicationStatus::try_from(code).ok())
            .map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_persisted())
    }
}

/// 一覧表示の並び順。未知の値は並べ替えずにそのまま通す。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    DateAsc,
    #[default]
    DateDesc,
    CompanyAsc,
    CompanyDesc,
    Unrecognized(String),
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::DateAsc,
        SortOrder::DateDesc,
        SortOrder::CompanyAsc,
        SortOrder::CompanyDesc,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SortOrder::DateAsc => "dateAsc",
            SortOrder::DateDesc => "dateDesc",
            SortOrder::CompanyAsc => "companyAsc",
            SortOrder::CompanyDesc => "companyDesc",
            SortOrder::Unrecognized(value) => value.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SortOrder::DateAsc => "Applied Date ↑",
            SortOrder::DateDesc => "Applied Date ↓",
            SortOrder::CompanyAsc => "Company ↑",
            SortOrder::CompanyDesc => "Company ↓",
            SortOrder::Unrecognized(value) => value.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, SortOrder::Unrecognized(_))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SortOrder {
    fn from(value: &str) -> Self {
        match value.trim() {
            "dateAsc" => SortOrder::DateAsc,
            "dateDesc" => SortOrder::DateDesc,
            "companyAsc" => SortOrder::CompanyAsc,
            "companyDesc" => SortOrder::CompanyDesc,
            other => SortOrder::Unrecognized(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewPreferences {
    pub filter_status: StatusFilter,
    pub sort_order: SortOrder,
}

impl ViewPreferences {
    pub fn new(filter_status: StatusFilter, sort_order: SortOrder) -> Self {
        Self {
            filter_status,
            sort_order,
        }
    }
}
