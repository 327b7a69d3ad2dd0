//! Seeds, size schedule and shrink results observed from outside the crate.

use proviso::{Config, Fun, GenContext, Runner, Shrink, fail, size_for_trial};

#[test]
fn test_entropy_seed_replays_the_same_failure() {
    let prop = |v: Vec<i32>, f: Fun<(i32,), bool>| {
        if v.iter().filter(|x| *f.call(&(**x,))).count() > 2 {
            fail("too many selected");
        }
    };

    let first = Runner::new(Config::default()).run(&prop).unwrap_err();
    let seed = first.seed().expect("falsified runs carry a seed");

    let replay = Runner::new(Config::default().with_seed(seed))
        .run(&prop)
        .unwrap_err();
    assert_eq!(first.to_string(), replay.to_string());
}

#[test]
fn test_passing_runs_report_their_seed() {
    let report = Runner::new(Config::default().with_seed(77).with_num_tests(10))
        .run(&|_: u8| true)
        .unwrap();
    assert_eq!(report.seed, 77);
}

#[test]
fn test_generation_follows_the_size_schedule() {
    // Vec length equals size, so the run observes the schedule directly
    let config = Config::default().with_seed(1).with_num_tests(40).with_max_size(13);
    let lengths = std::cell::RefCell::new(Vec::new());
    Runner::new(config)
        .run(&|v: Vec<bool>| lengths.borrow_mut().push(v.len()))
        .unwrap();

    let expected: Vec<usize> = (0..40).map(|i| size_for_trial(i, 40, 13)).collect();
    assert_eq!(lengths.into_inner(), expected);
}

#[test]
fn test_minimal_counterexample_is_locally_minimal() {
    let prop = |v: Vec<u32>| v.iter().sum::<u32>() < 30;
    let err = Runner::new(Config::default().with_seed(31).with_max_shrinks(10_000))
        .run(&prop)
        .unwrap_err();
    let minimal = err.minimal().expect("falsified").clone();

    assert!(!prop(minimal.0.clone()));
    for candidate in minimal.shrink() {
        assert!(prop(candidate.0));
    }
}

#[test]
fn test_same_seed_same_inputs() {
    let mut a = GenContext::from_seed(2024, 6);
    let mut b = GenContext::from_seed(2024, 6);
    for _ in 0..20 {
        let x: (Vec<i16>, Fun<(u8,), f32>) = proviso::Arbitrary::arbitrary(&mut a);
        let y: (Vec<i16>, Fun<(u8,), f32>) = proviso::Arbitrary::arbitrary(&mut b);
        assert_eq!(x, y);
    }
}
