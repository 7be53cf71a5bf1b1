use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::debug;

use super::DrawStrategy;
use crate::constraints::Constraints;
use crate::error::DrawError;

/// Builds an assignment as a perfect matching between givers and receivers.
///
/// Starts from a random permutation, keeps its allowed pairings and repairs the
/// rest along augmenting paths, scanning receivers in random order.
///
/// This fails only if no valid assignment exists. The result is random but
/// not uniformly distributed over all valid assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomizedMatching;

impl DrawStrategy for RandomizedMatching {
    fn solve(
        &self,
        constraints: &Constraints,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>, DrawError> {
        let len = constraints.len();
        let mut search = Search::new(constraints, rng);

        let mut initial: Vec<usize> = (0..len).collect();
        initial.shuffle(rng);
        let mut unmatched = Vec::new();
        for (giver, receiver) in initial.into_iter().enumerate() {
            if constraints.allows(giver, receiver) {
                search.holder[receiver] = Some(giver);
            } else {
                unmatched.push(giver);
            }
        }
        debug!(unmatched = unmatched.len(), "repairing initial permutation");

        unmatched.shuffle(rng);
        for giver in unmatched {
            if !search.augment(giver) {
                // a giver without an augmenting path never gets one later
                debug!(giver, "no perfect matching exists");
                return Err(DrawError::DrawUnsatisfiable {
                    attempts: 1,
                    exhaustive: true,
                });
            }
        }

        let mut receivers = vec![0; len];
        for (receiver, giver) in search.holder.into_iter().enumerate() {
            if let Some(giver) = giver {
                receivers[giver] = receiver;
            }
        }
        Ok(receivers)
    }
}

struct Frame {
    giver: usize,
    scanned: usize,
    /// The receiver this giver is asked to give up, `None` for the searching giver.
    displaced: Option<usize>,
}

struct Search<'a> {
    constraints: &'a Constraints,
    /// Receivers in the order every giver scans them, each from its own offset.
    order: Vec<usize>,
    offsets: Vec<usize>,
    /// Giver currently holding each receiver.
    holder: Vec<Option<usize>>,
    visited: Vec<u32>,
    round: u32,
}

impl<'a> Search<'a> {
    fn new(constraints: &'a Constraints, rng: &mut dyn RngCore) -> Self {
        let len = constraints.len();
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(rng);
        let offsets = (0..len).map(|_| rng.gen_range(0..len)).collect();
        Self {
            constraints,
            order,
            offsets,
            holder: vec![None; len],
            visited: vec![0; len],
            round: 0,
        }
    }

    /// Depth first search for an augmenting path from the unmatched `root`.
    fn augment(&mut self, root: usize) -> bool {
        let len = self.order.len();
        self.round += 1;
        let mut stack = vec![Frame {
            giver: root,
            scanned: 0,
            displaced: None,
        }];
        while let Some(frame) = stack.last_mut() {
            if frame.scanned == len {
                stack.pop();
                continue;
            }
            let giver = frame.giver;
            let receiver = self.order[(self.offsets[giver] + frame.scanned) % len];
            frame.scanned += 1;
            if self.visited[receiver] == self.round || !self.constraints.allows(giver, receiver) {
                continue;
            }
            self.visited[receiver] = self.round;
            match self.holder[receiver] {
                Some(current) => stack.push(Frame {
                    giver: current,
                    scanned: 0,
                    displaced: Some(receiver),
                }),
                None => {
                    // every giver on the path takes the receiver of the one above it
                    self.holder[receiver] = Some(giver);
                    for (parent, child) in stack.iter().tuple_windows() {
                        if let Some(displaced) = child.displaced {
                            self.holder[displaced] = Some(parent.giver);
                        }
                    }
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::RandomizedMatching;
    use crate::constraints::Constraints;
    use crate::error::DrawError;
    use crate::strategy::DrawStrategy;

    #[test]
    fn solves_a_single_allowed_cycle() {
        // only 0 -> 1 -> 2 -> 3 -> 0 is left
        let mut constraints = Constraints::new(4);
        for giver in 0..4 {
            for receiver in 0..4 {
                if receiver != (giver + 1) % 4 {
                    constraints.forbid(giver, receiver);
                }
            }
        }
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            RandomizedMatching.solve(&constraints, &mut rng),
            Ok(vec![1, 2, 3, 0])
        );
    }

    #[test]
    fn proves_impossibility() {
        let mut constraints = Constraints::new(3);
        // nobody may draw 2
        constraints.forbid(0, 2);
        constraints.forbid(1, 2);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            RandomizedMatching.solve(&constraints, &mut rng),
            Err(DrawError::DrawUnsatisfiable {
                attempts: 1,
                exhaustive: true
            })
        );
    }

    #[test]
    fn handles_large_groups() {
        // nobody may draw the next person
        let len = 200_000;
        let mut constraints = Constraints::new(len);
        for giver in 0..len {
            constraints.forbid(giver, (giver + 1) % len);
        }
        let mut rng = StdRng::seed_from_u64(5);
        let receivers = RandomizedMatching.solve(&constraints, &mut rng).unwrap();
        assert!(constraints.admits(&receivers));
    }

    #[test]
    fn results_are_valid_for_many_seeds() {
        let mut constraints = Constraints::new(8);
        constraints.forbid(0, 1);
        constraints.forbid(1, 0);
        constraints.forbid(2, 3);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let receivers = RandomizedMatching.solve(&constraints, &mut rng).unwrap();
            assert!(constraints.admits(&receivers));
        }
    }
}
