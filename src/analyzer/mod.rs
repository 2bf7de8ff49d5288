use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::{CanonicalKey, DeclaredRoute, ObservedCall};

/// Outcome of comparing declared routes with observed calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MismatchReport {
    pub declared_keys: BTreeSet<CanonicalKey>,
    pub observed_keys: BTreeSet<CanonicalKey>,
    /// Declared but never called
    pub unused: BTreeSet<CanonicalKey>,
    /// Called but never declared
    pub undefined: BTreeSet<CanonicalKey>,
    /// One call per undefined key, used to point at a file
    pub undefined_origin: BTreeMap<CanonicalKey, ObservedCall>,
}

impl MismatchReport {
    pub fn is_clean(&self) -> bool {
        self.unused.is_empty() && self.undefined.is_empty()
    }

    /// Keys present on both sides
    pub fn matched(&self) -> BTreeSet<CanonicalKey> {
        self.declared_keys
            .intersection(&self.observed_keys)
            .cloned()
            .collect()
    }
}

/// Compare the two sides on their canonical keys.
///
/// Declared paths are used as written; call paths go through
/// [`normalize_path`](crate::url_normalizer::normalize_path). When several
/// calls share an undefined key the last one in `observed` is kept as its
/// origin.
pub fn reconcile(declared: &BTreeSet<DeclaredRoute>, observed: &[ObservedCall]) -> MismatchReport {
    let declared_keys: BTreeSet<CanonicalKey> =
        declared.iter().map(DeclaredRoute::canonical_key).collect();
    let observed_keys: BTreeSet<CanonicalKey> =
        observed.iter().map(ObservedCall::canonical_key).collect();

    let unused: BTreeSet<CanonicalKey> = declared_keys.difference(&observed_keys).cloned().collect();
    let undefined: BTreeSet<CanonicalKey> =
        observed_keys.difference(&declared_keys).cloned().collect();

    let mut undefined_origin = BTreeMap::new();
    for call in observed {
        let key = call.canonical_key();
        if undefined.contains(&key) {
            undefined_origin.insert(key, call.clone());
        }
    }

    MismatchReport {
        declared_keys,
        observed_keys,
        unused,
        undefined,
        undefined_origin,
    }
}
