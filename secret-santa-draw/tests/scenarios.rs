use std::collections::HashSet;
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa_draw::{
    draw, Assignment, DrawEngine, DrawError, DrawStrategy, Fallback, Pairing, Participants,
    RandomizedMatching, RejectionSampling,
};

fn pairs(assignment: &Assignment<&'static str>) -> Vec<(&'static str, &'static str)> {
    assignment
        .iter()
        .map(|&Pairing { giver, receiver }| (giver, receiver))
        .collect()
}

#[test]
fn three_people_without_exclusions_form_a_three_cycle() {
    let participants = Participants::from_ids(["a", "b", "c"]).unwrap();
    let clockwise = vec![("a", "b"), ("b", "c"), ("c", "a")];
    let counter_clockwise = vec![("a", "c"), ("b", "a"), ("c", "b")];

    let mut seen = HashSet::new();
    for seed in 0..100 {
        let assignment = DrawEngine::new()
            .draw_with_rng(&participants, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let pairs = pairs(&assignment);
        assert!(pairs == clockwise || pairs == counter_clockwise, "{pairs:?}");
        assert_eq!(assignment.cycles().len(), 1);
        seen.insert(pairs);
    }
    assert_eq!(seen.len(), 2, "both cycles should come up");
}

#[test]
fn two_people_with_one_exclusion_never_succeed() {
    let participants = Participants::new([("a", vec!["b"]), ("b", vec![])]).unwrap();
    for _ in 0..20 {
        assert_eq!(
            draw(&participants),
            Err(DrawError::DrawUnsatisfiable {
                attempts: 250,
                exhaustive: false
            })
        );
    }
}

#[test]
fn couples_never_draw_each_other() {
    let mut participants = Participants::from_ids(["a", "b", "c", "d"]).unwrap();
    participants.exclude_each_other("a", "b").unwrap();
    for seed in 0..500 {
        let assignment = DrawEngine::new()
            .draw_with_rng(&participants, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_ne!(assignment.receiver_of(&"a"), Some(&"b"));
        assert_ne!(assignment.receiver_of(&"b"), Some(&"a"));
        assert_eq!(assignment.verify(&participants), Ok(()));
    }
}

#[test]
fn single_participant_is_rejected() {
    let participants = Participants::from_ids(["a"]).unwrap();
    assert_eq!(
        draw(&participants),
        Err(DrawError::InsufficientParticipants { count: 1 })
    );
}

#[test]
fn everybody_excluding_everybody_is_unsatisfiable() {
    let participants = Participants::new([
        ("a", vec!["b", "c"]),
        ("b", vec!["a", "c"]),
        ("c", vec!["a", "b"]),
    ])
    .unwrap();

    assert_eq!(
        draw(&participants),
        Err(DrawError::DrawUnsatisfiable {
            attempts: 250,
            exhaustive: false
        })
    );
    assert_eq!(
        DrawEngine::with_strategy(RandomizedMatching).draw(&participants),
        Err(DrawError::DrawUnsatisfiable {
            attempts: 1,
            exhaustive: true
        })
    );
}

#[test]
fn sparse_exclusion_holds_over_a_thousand_draws() {
    let participants = Participants::new([
        ("a", vec!["b"]),
        ("b", vec![]),
        ("c", vec![]),
        ("d", vec![]),
        ("e", vec![]),
    ])
    .unwrap();
    for _ in 0..1000 {
        let assignment = draw(&participants).unwrap();
        assert_ne!(assignment.receiver_of(&"a"), Some(&"b"));
        assert_eq!(assignment.len(), 5);
    }
}

#[test]
fn drawing_leaves_the_input_untouched() {
    let mut participants = Participants::from_ids(["a", "b", "c", "d", "e"]).unwrap();
    participants.exclude_each_other("a", "b").unwrap();
    participants.exclude(&"c", "d").unwrap();
    let before = participants.clone();

    let engine = DrawEngine::with_strategy(Fallback::new(
        RejectionSampling::default(),
        RandomizedMatching,
    ));
    engine.draw(&participants).unwrap();
    engine.draw(&participants).unwrap();

    assert_eq!(participants, before);
}

#[test]
fn concurrent_draws_share_one_engine() {
    let participants = Participants::from_ids(0..30_u32).unwrap();
    let engine = DrawEngine::new();
    let (engine, participants) = (&engine, &participants);
    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(move || engine.draw(participants)))
            .collect();
        for handle in handles {
            let assignment = handle.join().unwrap().unwrap();
            assert_eq!(assignment.verify(participants), Ok(()));
        }
    });
}

#[test]
fn boxed_strategies_can_be_chosen_at_runtime() {
    let participants = Participants::from_ids(["a", "b", "c"]).unwrap();
    let strategies: Vec<Box<dyn DrawStrategy + Send + Sync>> =
        vec![Box::new(RejectionSampling::default()), Box::new(RandomizedMatching)];
    for strategy in strategies {
        let assignment = DrawEngine::with_strategy(strategy).draw(&participants).unwrap();
        assert_eq!(assignment.verify(&participants), Ok(()));
    }
}

#[test]
fn large_groups_with_sparse_exclusions() {
    let mut participants = Participants::from_ids(0..200_000_u32).unwrap();
    for couple in (0..2_000_u32).step_by(2) {
        participants.exclude_each_other(couple, couple + 1).unwrap();
    }

    let mut rng = StdRng::seed_from_u64(9);
    let sampled = DrawEngine::new()
        .draw_with_rng(&participants, &mut rng)
        .unwrap();
    assert_eq!(sampled.verify(&participants), Ok(()));

    let matched = DrawEngine::with_strategy(RandomizedMatching)
        .draw_with_rng(&participants, &mut rng)
        .unwrap();
    assert_eq!(matched.verify(&participants), Ok(()));
    assert_ne!(matched.receiver_of(&0), Some(&1));
}
