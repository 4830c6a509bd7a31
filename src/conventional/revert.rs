use crate::domain::Commit;

/// Whether `candidate` is the commit described by a revert's correspondence map.
///
/// Every recorded key must agree. Hashes may be abbreviated on either side.
fn is_reverted_by(candidate: &Commit, revert: &Commit) -> bool {
    let Some(target) = &revert.revert else {
        return false;
    };
    if target.values().all(Option::is_none) {
        return false;
    }

    target.iter().all(|(key, expected)| {
        let Some(expected) = expected.as_deref() else {
            return true;
        };
        match (key.as_str(), candidate.attribute(key)) {
            ("hash", Some(actual)) if !expected.is_empty() => {
                actual.starts_with(expected) || expected.starts_with(actual)
            }
            (_, Some(actual)) => actual == expected,
            (_, None) => false,
        }
    })
}

/// Drop commits that a later revert commit undoes, together with that revert.
///
/// Revert commits that match nothing in the sequence are kept. Relative order
/// of the surviving commits is preserved.
pub fn filter_reverted(commits: Vec<Commit>) -> Vec<Commit> {
    let reverts: Vec<usize> = commits
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_revert())
        .map(|(i, _)| i)
        .collect();

    let mut removed = vec![false; commits.len()];
    for &r in &reverts {
        if removed[r] {
            continue;
        }
        let target = commits.iter().enumerate().position(|(i, candidate)| {
            i != r && !removed[i] && is_reverted_by(candidate, &commits[r])
        });
        if let Some(t) = target {
            tracing::debug!(
                reverted = commits[t].hash.as_deref().unwrap_or("?"),
                revert = commits[r].hash.as_deref().unwrap_or("?"),
                "dropping reverted commit pair"
            );
            removed[t] = true;
            removed[r] = true;
        }
    }

    commits
        .into_iter()
        .zip(removed)
        .filter_map(|(commit, gone)| (!gone).then_some(commit))
        .collect()
}
