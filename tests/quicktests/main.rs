mod lists;
mod tree;

use quickcheck::{Arbitrary, Gen};
use simplelog::{Config, LevelFilter, TestLogger};

/// Things to do to a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum TreeOp<T> {
    Insert(T),
    Delete(T),
}

impl<T> Arbitrary for TreeOp<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1]).unwrap() {
            0 => TreeOp::Insert(T::arbitrary(g)),
            1 => TreeOp::Delete(T::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

/// Things to do to a list in a quicktest. Positions are reduced modulo a bit
/// more than the list length when applied, so some of them miss on purpose.
#[derive(Copy, Clone, Debug)]
pub(crate) enum ListOp<T> {
    Append(T),
    Prepend(T),
    InsertAt(T, usize),
    /// Insert after the node found at the position.
    InsertAfter(T, usize),
    DeleteAt(usize),
    DeleteValue(T),
}

impl<T> Arbitrary for ListOp<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2, 3, 4, 5]).unwrap() {
            0 => ListOp::Append(T::arbitrary(g)),
            1 => ListOp::Prepend(T::arbitrary(g)),
            2 => ListOp::InsertAt(T::arbitrary(g), usize::arbitrary(g)),
            3 => ListOp::DeleteAt(usize::arbitrary(g)),
            4 => ListOp::DeleteValue(T::arbitrary(g)),
            5 => ListOp::InsertAfter(T::arbitrary(g), usize::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

pub(crate) fn init_logging() {
    // every test thread races to install it; only the first one wins
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}
