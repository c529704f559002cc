//! Property tests for field and section ordering.

use formwright_fields::{FieldKind, SectionId, TemplateId};
use formwright_store::{FieldDraft, MemoryBlobStore, TemplateStore};
use proptest::prelude::*;

/// An edit applied to a single section.
#[derive(Debug, Clone)]
enum Edit {
    Add,
    Delete(usize),
    Move(usize, usize),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => Just(Edit::Add),
        1 => (0usize..12).prop_map(Edit::Delete),
        2 => (0usize..12, 0usize..12).prop_map(|(from, to)| Edit::Move(from, to)),
    ]
}

fn setup(fields: usize) -> (TemplateStore<MemoryBlobStore>, TemplateId, SectionId) {
    let mut store = TemplateStore::load(MemoryBlobStore::new()).unwrap();
    let template = store.create_template("Props", None).unwrap();
    let section = store
        .add_section(&template.id, "Main")
        .unwrap()
        .applied()
        .unwrap();
    for i in 0..fields {
        store
            .add_field(
                &template.id,
                &section,
                FieldDraft::new(format!("F{i}"), FieldKind::default_for("text").unwrap()),
            )
            .unwrap();
    }
    (store, template.id, section)
}

fn sorted_orders(store: &TemplateStore<MemoryBlobStore>, t: &TemplateId, s: &SectionId) -> Vec<usize> {
    let mut orders: Vec<usize> = store
        .get(t)
        .unwrap()
        .section(s)
        .unwrap()
        .fields
        .iter()
        .map(|f| f.order)
        .collect();
    orders.sort();
    orders
}

proptest! {
    #[test]
    fn reorder_always_leaves_dense_orders(
        edits in prop::collection::vec(edit_strategy(), 0..20),
        from in 0usize..12,
        to in 0usize..12,
    ) {
        let (mut store, t, s) = setup(3);
        let mut counter = 0;
        for edit in edits {
            match edit {
                Edit::Add => {
                    counter += 1;
                    store
                        .add_field(&t, &s, FieldDraft::new(format!("G{counter}"), FieldKind::default_for("number").unwrap()))
                        .unwrap();
                }
                Edit::Delete(index) => {
                    let id = store.get(&t).unwrap().section(&s).unwrap().fields.get(index).map(|f| f.id);
                    if let Some(id) = id {
                        store.delete_field(&t, &s, &id).unwrap();
                    }
                }
                Edit::Move(a, b) => {
                    store.reorder_fields(&t, &s, a, b).unwrap();
                }
            }
        }

        let count = store.get(&t).unwrap().section(&s).unwrap().fields.len();
        prop_assume!(from < count);
        store.reorder_fields(&t, &s, from, to).unwrap();

        let orders = sorted_orders(&store, &t, &s);
        prop_assert_eq!(orders, (0..count).collect::<Vec<_>>());
    }

    #[test]
    fn reorder_moves_the_chosen_field(
        len in 1usize..10,
        from in 0usize..10,
        to in 0usize..10,
    ) {
        prop_assume!(from < len);
        let (mut store, t, s) = setup(len);
        let before: Vec<String> = store.get(&t).unwrap().fields_in_order().iter().map(|f| f.label.clone()).collect();

        store.reorder_fields(&t, &s, from, to).unwrap();
        let after: Vec<String> = store.get(&t).unwrap().fields_in_order().iter().map(|f| f.label.clone()).collect();

        let destination = to.min(len - 1);
        prop_assert_eq!(&after[destination], &before[from]);
        prop_assert_eq!(after.len(), before.len());

        let mut sorted_before = before.clone();
        let mut sorted_after = after.clone();
        sorted_before.sort();
        sorted_after.sort();
        prop_assert_eq!(sorted_before, sorted_after);
    }

    #[test]
    fn out_of_range_source_changes_nothing(len in 0usize..6, extra in 0usize..4, to in 0usize..8) {
        let (mut store, t, s) = setup(len);
        let before = store.get(&t).unwrap().clone();
        let outcome = store.reorder_fields(&t, &s, len + extra, to).unwrap();
        prop_assert!(outcome.is_unchanged());
        prop_assert_eq!(store.get(&t).unwrap(), &before);
    }
}
