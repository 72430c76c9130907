use std::collections::BTreeMap;

use super::{QuestDetail, QuestStatus};

fn group_by<K, F>(details: Vec<QuestDetail>, key: F) -> BTreeMap<K, Vec<QuestDetail>>
where
    K: Ord,
    F: Fn(&QuestDetail) -> K,
{
    let mut groups: BTreeMap<K, Vec<QuestDetail>> = BTreeMap::new();
    for detail in details {
        groups.entry(key(&detail)).or_default().push(detail);
    }
    groups
}

/// Groups quests by category, keeping the listing order inside each group.
pub fn group_by_category(details: Vec<QuestDetail>) -> BTreeMap<String, Vec<QuestDetail>> {
    group_by(details, |detail| detail.category.clone())
}

pub fn group_by_status(details: Vec<QuestDetail>) -> BTreeMap<QuestStatus, Vec<QuestDetail>> {
    group_by(details, |detail| detail.status)
}
