//! Maximum bipartite matching between expected and actual sequence elements.

/// `candidates[e]` lists the actual indexes expected element `e` may pair
/// with. Returns, per expected element, the actual index it was paired with;
/// every actual index is used at most once and the number of pairs is maximal.
///
/// Augmenting paths are searched with an explicit stack, so long sequences do
/// not deepen the call stack.
pub(crate) fn maximum_matching(candidates: &[Vec<usize>], actual_len: usize) -> Vec<Option<usize>> {
    let mut owner: Vec<Option<usize>> = vec![None; actual_len];
    let mut assigned: Vec<Option<usize>> = vec![None; candidates.len()];

    for start in 0..candidates.len() {
        let mut visited = vec![false; actual_len];
        // (expected element, next candidate position)
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        // via[k] is the actual index frame k took to reach frame k + 1.
        let mut via: Vec<usize> = Vec::new();
        let mut free = None;

        while let Some(frame) = stack.last_mut() {
            let e = frame.0;
            if frame.1 >= candidates[e].len() {
                stack.pop();
                via.pop();
                continue;
            }
            let a = candidates[e][frame.1];
            frame.1 += 1;
            if a >= actual_len || visited[a] {
                continue;
            }
            visited[a] = true;
            match owner[a] {
                None => {
                    free = Some(a);
                    break;
                }
                Some(next) => {
                    via.push(a);
                    stack.push((next, 0));
                }
            }
        }

        if let Some(mut target) = free {
            for k in (0..stack.len()).rev() {
                let e = stack[k].0;
                owner[target] = Some(e);
                assigned[e] = Some(target);
                if k > 0 {
                    target = via[k - 1];
                }
            }
        }
    }
    assigned
}
