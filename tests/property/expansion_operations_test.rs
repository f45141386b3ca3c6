//! Property-based tests for ExpansionManager operations.
//!
//! An arbitrary sequence of expand, collapse and collapse-all calls is applied
//! both to the manager and to a plain `BTreeSet` model. After every step the
//! manager, its persisted `openFolder` value and a freshly restored manager
//! must all agree with the model.

use std::collections::BTreeSet;
use std::rc::Rc;

use newtab_tree::database::key_value::keys;
use newtab_tree::database::{KeyValueStore, MemoryStore};
use newtab_tree::managers::expansion_manager::{ExpansionManager, ExpansionManagerTrait};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Expand(String),
    Collapse(String),
    CollapseAll,
}

/// Folder IDs drawn from a small pool so operations collide often.
fn arb_folder_id() -> impl Strategy<Value = String> {
    (0u8..8).prop_map(|n| n.to_string())
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => arb_folder_id().prop_map(Op::Expand),
        3 => arb_folder_id().prop_map(Op::Collapse),
        1 => Just(Op::CollapseAll),
    ]
}

// **Property 1: Expansion set follows its model**
//
// *For any* sequence of operations, `is_expanded(id)` SHALL hold exactly for
// the IDs in the model set, and the persisted list SHALL equal the model.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn expansion_matches_model(ops in prop::collection::vec(arb_op(), 0..40)) {
        let store = Rc::new(MemoryStore::new());
        let mut manager = ExpansionManager::load(store.clone());
        let mut model: BTreeSet<String> = BTreeSet::new();

        for op in &ops {
            match op {
                Op::Expand(id) => {
                    manager.expand(id).unwrap();
                    model.insert(id.clone());
                }
                Op::Collapse(id) => {
                    manager.collapse(id).unwrap();
                    model.remove(id);
                }
                Op::CollapseAll => {
                    manager.collapse_all().unwrap();
                    model.clear();
                }
            }

            for n in 0u8..8 {
                let id = n.to_string();
                prop_assert_eq!(manager.is_expanded(&id), model.contains(&id));
            }

            let persisted: Vec<String> =
                serde_json::from_str(&store.get(keys::OPEN_FOLDER).unwrap().unwrap()).unwrap();
            let persisted: BTreeSet<String> = persisted.into_iter().collect();
            prop_assert_eq!(&persisted, &model);
        }

        // Every mutation is written, even when it changes nothing
        prop_assert_eq!(store.write_log().len(), ops.len());
    }
}

// **Property 2: Expansion state survives a reload**
//
// *For any* sequence of operations, a manager restored from the same store
// SHALL report the same expanded IDs as the manager that wrote them.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn expansion_survives_reload(ops in prop::collection::vec(arb_op(), 1..30)) {
        let store = Rc::new(MemoryStore::new());
        let mut manager = ExpansionManager::load(store.clone());
        for op in &ops {
            match op {
                Op::Expand(id) => manager.expand(id).unwrap(),
                Op::Collapse(id) => manager.collapse(id).unwrap(),
                Op::CollapseAll => manager.collapse_all().unwrap(),
            }
        }

        let restored = ExpansionManager::load(store);
        prop_assert_eq!(restored.expanded_ids(), manager.expanded_ids());
    }
}
