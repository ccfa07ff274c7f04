//! "Did you mean?" suggestions for `UnknownMethod`, ported from the
//! source implementation's edit-distance walk over the receiver's
//! member set.

use rbtc_names::NameRef;
use rbtc_symbols::{GlobalState, SymbolRef};

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cur = row[j + 1];
            row[j + 1] = if ca == cb {
                prev_diag
            } else {
                1 + prev_diag.min(row[j]).min(row[j + 1])
            };
            prev_diag = cur;
        }
    }
    row[b.len()]
}

/// The closest member name of `owner` (walking its ancestors) to `fun`
/// within `max_distance` edits, if any. Ties break toward whichever
/// candidate `find_member_transitive`'s ancestor walk reaches first.
pub fn suggest_method(gs: &GlobalState, owner: SymbolRef, fun: NameRef, max_distance: usize) -> Option<String> {
    let target = gs.names().short_name(fun);
    let mut best: Option<(usize, String)> = None;
    let mut cur = owner;
    for _ in 0..gs.options().max_derives_from_walk {
        for name in gs.class(cur).members.keys() {
            let candidate = gs.names().short_name(*name);
            let distance = levenshtein(&target, &candidate);
            if distance == 0 || distance > max_distance {
                continue;
            }
            let improves = match &best {
                Some((d, _)) => distance < *d,
                None => true,
            };
            if improves {
                best = Some((distance, candidate));
            }
        }
        let next = gs.class(cur).superclass;
        if !next.exists() || next == cur {
            break;
        }
        cur = next;
    }
    best.map(|(_, name)| name)
}

#[cfg(test)]
#[path = "tests/suggest_tests.rs"]
mod tests;
