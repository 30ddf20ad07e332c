use std::cmp::Ordering;

use super::SinglyLinked;

/// Sorts the chain starting at `list` by relinking `next` links in place, returning the new head.
///
/// This is a bottom-up merge sort: each pass merges neighbouring runs of length `run` into runs of
/// twice the length, until a pass performs a single merge. It needs no allocation or recursion, is
/// `O(n log n)` and is stable, because ties are always taken from the earlier run.
///
/// `prev` links, if any, are left stale.
pub(crate) fn merge_sort<'a, N, F>(list: Option<&'a N>, mut cmp: F) -> Option<&'a N>
where
    N: SinglyLinked<'a>,
    F: FnMut(&N, &N) -> Ordering,
{
    let mut list = list?;
    let mut run = 1_usize;

    loop {
        let mut p = Some(list);
        let mut head: Option<&'a N> = None;
        let mut tail: Option<&'a N> = None;
        let mut merges = 0;

        while let Some(start) = p {
            merges += 1;

            // The left run starts at p and the right run at q, up to run nodes after it.
            let mut q = Some(start);
            let mut p_len = 0;
            while p_len < run {
                match q {
                    Some(node) => {
                        p_len += 1;
                        q = node.next();
                    },
                    None => break,
                }
            }
            let mut q_len = run;
            let mut left = Some(start);

            loop {
                let left_node = left.filter(|_| p_len > 0);
                let right_node = q.filter(|_| q_len > 0);

                let take = match (left_node, right_node) {
                    (None, None) => break,
                    (Some(a), Some(b)) if cmp(a, b) != Ordering::Greater => {
                        p_len -= 1;
                        left = a.next();
                        a
                    },
                    (Some(a), None) => {
                        p_len -= 1;
                        left = a.next();
                        a
                    },
                    (_, Some(b)) => {
                        q_len -= 1;
                        q = b.next();
                        b
                    },
                };

                match tail {
                    Some(tail) => tail.set_next(Some(take)),
                    None => head = Some(take),
                }
                tail = Some(take);
            }

            p = q;
        }

        if let Some(tail) = tail {
            tail.set_next(None);
        }

        match head {
            Some(merged) if merges > 1 => {
                list = merged;
                run *= 2;
            },
            _ => return head,
        }
    }
}
