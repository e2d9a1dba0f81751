use classic_ds::{DoublyLinkedList, LinkedList, ListError, ListOps, PersistentList};
use quickcheck_macros::quickcheck;

use crate::{ListOp, init_logging};

fn same_contents<L: ListOps<i8>>(list: &L, model: &[i8]) -> bool {
    list.len() == model.len()
        && list.head() == model.first()
        && list.tail() == model.last()
        && (0..model.len()).all(|i| list.get(i) == model.get(i))
        && (0..model.len())
            .all(|i| list.get_nth_from_last(i) == model.get(model.len() - i - 1))
        && list.get(model.len()).is_none()
}

/// Model check for a list edited in place, against a `Vec`.
macro_rules! in_place_list_matches_vec {
    ($name:ident, $list:ty) => {
        #[quickcheck]
        fn $name(ops: Vec<ListOp<i8>>) -> bool {
            init_logging();
            let mut list = <$list>::new();
            let mut model: Vec<i8> = Vec::new();

            for op in ops {
                let len = model.len();
                match op {
                    ListOp::Append(v) => {
                        list.append(v);
                        model.push(v);
                    }
                    ListOp::Prepend(v) => {
                        list.prepend(v);
                        model.insert(0, v);
                    }
                    ListOp::InsertAt(v, at) => {
                        let at = at % (len + 2);
                        match list.insert_at(v, at) {
                            Ok(_) if at <= len => model.insert(at, v),
                            Err(ListError::IndexOutOfBounds { index, .. })
                                if at > len && index == at => {}
                            _ => return false,
                        }
                    }
                    ListOp::InsertAfter(v, at) => {
                        let at = at % (len + 1);
                        match list.get_node_mut(at) {
                            Some(node) if at < len => {
                                if node.insert_after(v).value() != &v {
                                    return false;
                                }
                                model.insert(at + 1, v);
                            }
                            None if at == len => {}
                            _ => return false,
                        }
                    }
                    ListOp::DeleteAt(at) => {
                        let at = at % (len + 1);
                        match list.delete_at(at) {
                            Ok(v) if at < len => {
                                if v != model.remove(at) {
                                    return false;
                                }
                            }
                            Err(_) if at >= len => {}
                            _ => return false,
                        }
                    }
                    ListOp::DeleteValue(v) => {
                        let expected = model.iter().position(|x| *x == v).map(|i| model.remove(i));
                        if list.delete_value(&v) != expected {
                            return false;
                        }
                    }
                }
                if !same_contents(&list, &model) {
                    return false;
                }
            }
            list.into_iter().eq(model)
        }
    };
}

in_place_list_matches_vec!(linked_list_matches_vec, LinkedList<i8>);
in_place_list_matches_vec!(doubly_linked_list_matches_vec, DoublyLinkedList<i8>);

#[quickcheck]
fn doubly_linked_list_reads_backwards(ops: Vec<ListOp<i8>>) -> bool {
    let mut list = DoublyLinkedList::new();
    for op in ops {
        match op {
            ListOp::Append(v) | ListOp::InsertAfter(v, _) => {
                list.append(v);
            }
            ListOp::Prepend(v) | ListOp::InsertAt(v, _) => {
                list.prepend(v);
            }
            ListOp::DeleteAt(at) => {
                let _ = list.delete_at(at % (list.len() + 1));
            }
            ListOp::DeleteValue(v) => {
                list.delete_value(&v);
            }
        }
    }
    let forward: Vec<i8> = list.iter().copied().collect();
    let backward: Vec<i8> = list.iter().rev().copied().collect();
    let parents_agree = (1..list.len()).all(|i| {
        list.get_node(i).and_then(|n| list.parent(n)) == list.get_node(i - 1)
    });
    forward.iter().rev().eq(backward.iter()) && parents_agree
}

#[quickcheck]
fn persistent_list_keeps_every_version(ops: Vec<ListOp<i8>>) -> bool {
    let mut versions = vec![(PersistentList::new(), Vec::new())];

    for op in ops {
        let Some((list, model)) = versions.last() else {
            return false;
        };
        let len = model.len();
        let mut model = model.clone();
        let next = match op {
            ListOp::Append(v) => {
                model.push(v);
                list.append(v)
            }
            ListOp::Prepend(v) => {
                model.insert(0, v);
                list.prepend(v)
            }
            ListOp::InsertAt(v, at) => {
                let at = at % (len + 2);
                match list.insert_at(v, at) {
                    Ok(next) if at <= len => {
                        model.insert(at, v);
                        next
                    }
                    Err(_) if at > len => continue,
                    _ => return false,
                }
            }
            ListOp::InsertAfter(v, at) => {
                let at = at % (len + 1);
                let Some(node) = list.get_node(at) else {
                    continue;
                };
                model.insert(at + 1, v);
                match list.insert_after(v, node) {
                    Ok(next) => next,
                    Err(_) => return false,
                }
            }
            ListOp::DeleteAt(at) => {
                let at = at % (len + 1);
                match list.delete_at(at) {
                    Ok(next) if at < len => {
                        model.remove(at);
                        next
                    }
                    Err(_) if at >= len => continue,
                    _ => return false,
                }
            }
            ListOp::DeleteValue(v) => {
                if let Some(i) = model.iter().position(|x| *x == v) {
                    model.remove(i);
                }
                list.delete_value(&v)
            }
        };
        versions.push((next, model));
    }

    versions
        .iter()
        .all(|(list, model)| same_contents(list, model))
}

#[quickcheck]
fn find_index_by_value_agrees(xs: Vec<i8>, needle: i8) -> bool {
    let linked: LinkedList<i8> = xs.iter().copied().collect();
    let doubly: DoublyLinkedList<i8> = xs.iter().copied().collect();
    let persistent: PersistentList<i8> = xs.iter().copied().collect();
    let expected = xs.iter().position(|x| *x == needle);
    linked.find_index_by_value(&needle) == expected
        && doubly.find_index_by_value(&needle) == expected
        && persistent.find_index_by_value(&needle) == expected
        && linked.find(|x| *x == needle) == expected.map(|i| &xs[i])
        && doubly.find(|x| *x == needle) == expected.map(|i| &xs[i])
        && persistent.find(|x| *x == needle) == expected.map(|i| &xs[i])
}
