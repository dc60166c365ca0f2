use crate::domain::entities::ApplicationRecord;
use crate::domain::value_objects::{SortOrder, ViewPreferences};
use std::cmp::Ordering;

/// コレクションから表示用の一覧を作る（絞り込み → 安定ソート）
///
/// 副作用はなく、同じ入力には常に同じ出力を返す。
/// 認識できない並び順の場合は絞り込み結果をそのまま返す。
pub fn project(records: &[ApplicationRecord], prefs: &ViewPreferences) -> Vec<ApplicationRecord> {
    let mut visible: Vec<ApplicationRecord> = records
        .iter()
        .filter(|record| prefs.filter_status.matches(record.status))
        .cloned()
        .collect();

    // sort_by は安定ソート
    match &prefs.sort_order {
        SortOrder::DateAsc => visible.sort_by(|a, b| a.applied_date.cmp(&b.applied_date)),
        SortOrder::DateDesc => visible.sort_by(|a, b| b.applied_date.cmp(&a.applied_date)),
        SortOrder::CompanyAsc => visible.sort_by(|a, b| locale_compare(&a.company, &b.company)),
        SortOrder::CompanyDesc => visible.sort_by(|a, b| locale_compare(&b.company, &a.company)),
        SortOrder::Unrecognized(_) => {}
    }

    visible
}

/// 大文字小文字を一次比較では同一視し、同順位なら小文字を先に置く
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if primary != Ordering::Equal {
        return primary;
    }

    for (left, right) in a.chars().zip(b.chars()) {
        if left == right {
            continue;
        }
        match (left.is_lowercase(), right.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => return left.cmp(&right),
        }
    }
    a.chars().count().cmp(&b.chars().count())
}
