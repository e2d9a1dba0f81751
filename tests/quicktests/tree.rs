use classic_ds::{Tree, TreeError};
use quickcheck_macros::quickcheck;

use crate::{TreeOp, init_logging};

/// Level-order positions in pre-order, for a complete tree of `len` nodes.
fn pre_order_positions(len: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(len);
    let mut stack = if len > 0 { vec![0] } else { vec![] };
    while let Some(i) = stack.pop() {
        order.push(i);
        for child in [2 * i + 2, 2 * i + 1] {
            if child < len {
                stack.push(child);
            }
        }
    }
    order
}

/// A complete tree is fully described by its values in level order, so a
/// `Vec` can stand in for it: delete finds the pre-order match and moves the
/// last value into its slot.
fn model_delete<T: PartialEq>(model: &mut Vec<T>, value: &T) -> bool {
    let found = pre_order_positions(model.len())
        .into_iter()
        .find(|&i| model[i] == *value);
    match found {
        Some(i) => {
            model.swap_remove(i);
            true
        }
        None => false,
    }
}

fn is_complete<T>(tree: &Tree<T>) -> bool {
    let nodes = tree.map_bfs(|n| n);
    nodes.len() == tree.size()
        && nodes.iter().enumerate().all(|(i, node)| {
            node.left() == nodes.get(2 * i + 1).copied()
                && node.right() == nodes.get(2 * i + 2).copied()
        })
}

fn parents_point_back<T>(tree: &Tree<T>) -> bool {
    tree.map_nlr(|node| match node.parent() {
        None => tree.root() == Some(node),
        Some(parent) => (parent.left() == Some(node)) ^ (parent.right() == Some(node)),
    })
    .into_iter()
    .all(|ok| ok)
}

#[quickcheck]
fn size_matches_level_order_length(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    tree.size() == xs.len() && tree.list_bfs().len() == tree.size()
}

#[quickcheck]
fn inserts_fill_level_order(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    is_complete(&tree)
        && parents_point_back(&tree)
        && tree.list_bfs().into_iter().eq(xs.iter())
}

#[quickcheck]
fn every_order_visits_every_node(xs: Vec<u16>) -> bool {
    let tree: Tree<u16> = xs.iter().copied().collect();
    let mut expected = xs.clone();
    expected.sort();
    [
        tree.list_nlr(),
        tree.list_lnr(),
        tree.list_lrn(),
    ]
    .into_iter()
    .all(|list| {
        let mut sorted: Vec<u16> = list.into_iter().copied().collect();
        sorted.sort();
        sorted == expected
    })
}

#[quickcheck]
fn operations_match_level_order_model(xs: Vec<i8>, ops: Vec<TreeOp<i8>>) -> bool {
    init_logging();
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    let mut model = xs;

    for op in ops {
        match op {
            TreeOp::Insert(v) => {
                tree.insert(v);
                model.push(v);
            }
            TreeOp::Delete(v) => {
                let size_before = tree.size();
                let expected = model_delete(&mut model, &v);
                match tree.delete(&v).map(|_| ()) {
                    Ok(_) if expected => {
                        if tree.size() != size_before - 1 {
                            return false;
                        }
                    }
                    Err(TreeError::ValueNotFound) if !expected => {
                        if tree.size() != size_before {
                            return false;
                        }
                    }
                    _ => return false,
                }
            }
        }
        if !is_complete(&tree) || !parents_point_back(&tree) {
            return false;
        }
        if !tree.list_bfs().into_iter().eq(model.iter()) {
            return false;
        }
    }
    true
}

#[quickcheck]
fn find_agrees_with_list(xs: Vec<i8>, needle: i8) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let by_bfs = tree.find_bfs(|n| *n.value() == needle).map(|n| *n.value());
    let by_nlr = tree.find_nlr(|n| *n.value() == needle).map(|n| *n.value());
    let present = xs.contains(&needle);
    by_bfs.is_some() == present && by_nlr.is_some() == present
}

#[test]
fn draining_through_delete_empties_the_tree() {
    init_logging();
    let mut tree: Tree<u8> = (0..=40).collect();
    for v in (0..=40).rev() {
        tree.delete(&v).unwrap();
    }
    assert_eq!(tree.size(), 0);
    assert!(tree.root().is_none());
    assert_eq!(tree.delete(&0).unwrap_err(), TreeError::ValueNotFound);
}
