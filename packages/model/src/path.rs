//! Path helpers
//!
//! A path is a plain list of child indices from the root. The empty path
//! addresses the root block. `Vec<usize>`'s lexicographic ordering is exactly
//! pre-order document order (an ancestor sorts before its descendants), which
//! `compare` relies on.

use std::cmp::Ordering;

pub type Path = Vec<usize>;

/// Path of the enclosing node (the root is its own parent)
pub fn parent(path: &[usize]) -> Path {
    match path.split_last() {
        Some((_, init)) => init.to_vec(),
        None => Vec::new(),
    }
}

/// Path of the next sibling. Saturates at `usize::MAX`, which no tree can
/// hold a child at.
pub fn increment(path: &[usize]) -> Path {
    let mut next = path.to_vec();
    if let Some(last) = next.last_mut() {
        *last = last.saturating_add(1);
    }
    next
}

/// Path of the previous sibling, `None` for a first child or the root
pub fn decrement(path: &[usize]) -> Option<Path> {
    let (&last, init) = path.split_last()?;
    let index = last.checked_sub(1)?;
    let mut previous = init.to_vec();
    previous.push(index);
    Some(previous)
}

/// Longest shared prefix of two paths
pub fn common_ancestor(a: &[usize], b: &[usize]) -> Path {
    a.iter()
        .zip(b)
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| *x)
        .collect()
}

/// Document-order comparison
pub fn compare(a: &[usize], b: &[usize]) -> Ordering {
    a.cmp(b)
}

/// Joins a base path with a path relative to it
pub fn join(base: &[usize], relative: &[usize]) -> Path {
    let mut path = Vec::with_capacity(base.len() + relative.len());
    path.extend_from_slice(base);
    path.extend_from_slice(relative);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_of_root_is_root() {
        assert_eq!(parent(&[]), Vec::<usize>::new());
        assert_eq!(parent(&[1, 2]), vec![1]);
    }

    #[test]
    fn test_decrement_first_child() {
        assert_eq!(decrement(&[3, 0]), None);
        assert_eq!(decrement(&[3, 2]), Some(vec![3, 1]));
        assert_eq!(decrement(&[]), None);
    }

    #[test]
    fn test_common_ancestor() {
        assert_eq!(common_ancestor(&[0, 1, 2], &[0, 1, 5, 0]), vec![0, 1]);
        assert_eq!(common_ancestor(&[1], &[0]), Vec::<usize>::new());
    }

    #[test]
    fn test_compare_is_document_order() {
        assert_eq!(compare(&[0], &[0, 0]), Ordering::Less);
        assert_eq!(compare(&[0, 5], &[1]), Ordering::Less);
        assert_eq!(compare(&[2, 0], &[2, 0]), Ordering::Equal);
    }

    #[test]
    fn test_increment_saturates() {
        assert_eq!(increment(&[0, 4]), vec![0, 5]);
        assert_eq!(increment(&[usize::MAX]), vec![usize::MAX]);
        assert_eq!(increment(&[]), Vec::<usize>::new());
    }
}
