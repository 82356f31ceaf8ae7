use std::collections::HashMap;

use crate::model::{Commit, LineRecord};

/// Group normalized line records into commits, one per distinct commit id,
/// in first-encounter order. Every well-formed record ends up owned by
/// exactly one commit, so the summed line counts equal the record count.
pub fn aggregate_commits(records: Vec<LineRecord>, repo_url: Option<&str>) -> Vec<Commit> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<LineRecord>> = Vec::new();

    for record in records {
        match index.get(&record.commit_id) {
            Some(&slot) => groups[slot].push(record),
            None => {
                index.insert(record.commit_id.clone(), groups.len());
                groups.push(vec![record]);
            }
        }
    }

    groups
        .into_iter()
        .filter_map(|group| Commit::from_group(group, repo_url))
        .collect()
}
