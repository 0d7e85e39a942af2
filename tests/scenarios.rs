//! End-to-end scheduling scenarios.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use u_enroll::catalog::{Catalog, Course, CourseId, Section, TimeWindow};
use u_enroll::ga::{DegeneratePolicy, GaConfig, Selection};
use u_enroll::schedule::{fitness, Chromosome, Gene, Preferences, Scheduler, INFEASIBLE};
use u_enroll::EnrollError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn section(number: u32, days: &str, start: &str, end: &str) -> Section {
    Section::new(number, "lecture").meeting(days.parse().unwrap(), TimeWindow::parse(start, end).unwrap())
}

/// A second-year term: twelve courses, most offered in two or three
/// sections, with several overlapping slots.
fn term_catalog() -> Catalog {
    let mut catalog: Catalog = [
        Course::new("ENCS2110", 1).with_sections([
            section(1, "F", "08:00", "10:50"),
            section(2, "W", "11:30", "14:20"),
        ]),
        Course::new("ENCS2340", 4).with_sections([
            section(1, "MW", "10:00", "11:25"),
            section(2, "TR", "10:00", "11:25"),
        ]),
        Course::new("ENCS2380", 3).with_sections([
            section(1, "MW", "11:00", "12:25"),
            section(2, "TR", "08:30", "09:55"),
            section(3, "S", "09:00", "11:50").with_instructor("Dr. Nasser"),
        ]),
        Course::new("MATH2311", 3).with_sections([
            section(1, "MW", "08:30", "09:55"),
            section(2, "TR", "11:30", "12:55"),
        ]),
        Course::new("PHYS2111", 1).with_sections([
            section(1, "R", "14:00", "16:50"),
            section(2, "T", "14:00", "16:50"),
        ]),
        Course::new("ENEE2103", 1).with_sections([section(1, "S", "13:00", "15:50")]),
        Course::new("ENCS3310", 3)
            .with_prerequisites(["ENCS2340", "ENCS2110"])
            .with_sections([section(1, "MW", "13:00", "14:25")]),
        Course::new("ENCS3320", 3)
            .with_prerequisites(["ENCS2380", "MATH2311"])
            .with_sections([section(1, "TR", "13:00", "14:25")]),
        Course::new("ENCS3330", 3)
            .with_prerequisites(["ENCS2340", "ENCS2380"])
            .with_sections([section(1, "MW", "14:30", "15:55")]),
        Course::new("ENCS4320", 3)
            .with_prerequisites(["ENCS3320", "PHYS2111"])
            .with_sections([section(1, "TR", "08:00", "09:25")]),
        Course::new("ENEE2304", 3)
            .with_prerequisites(["MATH2311", "ENEE2103"])
            .with_sections([section(1, "TR", "10:00", "11:25")]),
        Course::new("ENEE2103X", 3)
            .with_prerequisites(["ENEE2103"])
            .with_sections([section(1, "F", "09:00", "10:25")]),
    ]
    .into_iter()
    .collect();
    catalog.compute_priorities();
    catalog
}

fn chromosome(genes: &[(&str, usize)]) -> Chromosome {
    genes.iter().map(|&(c, s)| Gene::new(c, s)).collect()
}

// ---- Scoring scenarios ----

#[test]
fn test_two_compatible_courses_beat_one() {
    let catalog = term_catalog();
    let prefs = Preferences::default();
    let one = chromosome(&[("ENCS2340", 0)]);
    let two = chromosome(&[("ENCS2340", 0), ("ENCS2110", 0)]);
    let s1 = fitness(&one, &catalog, &prefs).unwrap();
    let s2 = fitness(&two, &catalog, &prefs).unwrap();
    assert!(s2 > s1, "{s2} <= {s1}");
    assert_eq!(s2, s1 + 1);
}

#[test]
fn test_partial_overlap_is_infeasible_in_both_orders() {
    let catalog = term_catalog();
    let prefs = Preferences::default();
    // ENCS2340 MW 10:00-11:25 against ENCS2380 MW 11:00-12:25.
    let a = chromosome(&[("ENCS2340", 0), ("ENCS2380", 0)]);
    let b = chromosome(&[("ENCS2380", 0), ("ENCS2340", 0)]);
    assert_eq!(fitness(&a, &catalog, &prefs).unwrap(), INFEASIBLE);
    assert_eq!(fitness(&b, &catalog, &prefs).unwrap(), INFEASIBLE);
}

#[test]
fn test_credit_preference_penalizes_distance() {
    let catalog = term_catalog();
    // 4 + 3 + 3 + 3 + 1 + 1 = 15 credit hours, no conflicts.
    let c = chromosome(&[
        ("ENCS2340", 0),
        ("ENCS2380", 1),
        ("MATH2311", 1),
        ("ENEE2304", 0),
        ("PHYS2111", 0),
        ("ENEE2103", 0),
    ]);
    assert_eq!(c.total_credit_hours(&catalog).unwrap(), 15);

    let baseline = fitness(&c, &catalog, &Preferences::default()).unwrap();
    assert!(baseline > 0);
    let with_credit = fitness(&c, &catalog, &Preferences::default().with_credit(12)).unwrap();
    assert_eq!(with_credit - baseline, -3);
}

#[test]
fn test_passed_course_is_infeasible() {
    let mut catalog = term_catalog();
    catalog.complete_course(&CourseId::from("ENCS2110")).unwrap();
    let c = chromosome(&[("ENCS2340", 0), ("ENCS2110", 0)]);
    assert_eq!(fitness(&c, &catalog, &Preferences::default()).unwrap(), INFEASIBLE);
}

#[test]
fn test_preferences_from_json() {
    let catalog = term_catalog();
    let prefs = Preferences::from_json(r#"{"instructor": "Dr. Nasser", "days-off": 2}"#).unwrap();
    // ENCS2380 section 3 meets Saturday only: 5 - 1 = 4 free days, distance 2.
    let c = chromosome(&[("ENCS2380", 2)]);
    let base = fitness(&c, &catalog, &Preferences::default()).unwrap();
    assert_eq!(fitness(&c, &catalog, &prefs).unwrap(), base + 5);
}

// ---- Search scenarios ----

#[test]
fn test_single_course_pool_converges() {
    init_tracing();
    let catalog: Catalog = [Course::new("MATH1411", 4).with_sections([section(1, "MW", "08:00", "09:25")])]
        .into_iter()
        .collect();
    let pool = catalog.eligible_pool();
    let result = Scheduler::new(&catalog)
        .with_config(GaConfig::default().with_seed(42))
        .run(&pool)
        .unwrap();
    assert_eq!(result.best, chromosome(&[("MATH1411", 0)]));
    assert_eq!(result.best_fitness, 0);
    assert_eq!(result.generations, 20);
}

#[test]
fn test_term_search_finds_feasible_schedule() {
    init_tracing();
    let catalog = term_catalog();
    let pool = catalog.eligible_pool();
    assert!(!pool.iter().any(|id| id.as_str() == "ENCS4320"));

    let result = Scheduler::new(&catalog)
        .with_config(GaConfig::default().with_seed(7))
        .run(&pool)
        .unwrap();

    assert!(result.best_fitness > INFEASIBLE);
    let resolved = result.best.resolve(&catalog).unwrap();
    for (i, (_, a)) in resolved.iter().enumerate() {
        for (_, b) in &resolved[i + 1..] {
            assert!(!a.has_conflict(b), "{a} conflicts with {b}");
        }
    }
    for id in result.best.course_ids() {
        assert!(pool.contains(id));
    }
    assert_eq!(result.fitness_history.len(), result.generations);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let catalog = term_catalog();
    let pool = catalog.eligible_pool();
    let config = GaConfig::default()
        .with_seed(11)
        .with_selection(Selection::Tournament(3))
        .with_mutation_rate(0.1);
    let scheduler = Scheduler::new(&catalog)
        .with_preferences(Preferences::default().with_credit(15))
        .with_config(config);
    let r1 = scheduler.run(&pool).unwrap();
    let r2 = scheduler.run(&pool).unwrap();
    assert_eq!(r1.best, r2.best);
    assert_eq!(r1.best_fitness, r2.best_fitness);
}

#[test]
fn test_odd_population_runs() {
    let catalog = term_catalog();
    let result = Scheduler::new(&catalog)
        .with_config(GaConfig::default().with_population_size(7).with_seed(3))
        .run(&catalog.eligible_pool())
        .unwrap();
    assert_eq!(result.generations, 20);
}

#[test]
fn test_unknown_pool_course_is_an_error() {
    let catalog = term_catalog();
    let pool = vec![CourseId::from("ENCS9999")];
    let err = u_enroll::run(&pool, &catalog, &Preferences::default()).unwrap_err();
    assert_eq!(err, EnrollError::UnknownCourse("ENCS9999".into()));
}

#[test]
fn test_all_infeasible_abort_yields_empty() {
    init_tracing();
    // Two courses that always clash, drawn together every time.
    let catalog: Catalog = [
        Course::new("A100", 3).with_sections([section(1, "MW", "09:00", "10:00")]),
        Course::new("B100", 3).with_sections([section(1, "MW", "09:30", "10:30")]),
    ]
    .into_iter()
    .collect();
    let config = GaConfig::default()
        .with_seed(5)
        .with_degenerate_policy(DegeneratePolicy::Abort);
    let result = Scheduler::new(&catalog)
        .with_config(config)
        .run(&catalog.eligible_pool())
        .unwrap();
    assert!(result.aborted);
    assert!(result.best.is_empty());
    assert_eq!(result.best_fitness, INFEASIBLE);
}

#[test]
fn test_all_infeasible_fallback_completes() {
    let catalog: Catalog = [
        Course::new("A100", 3).with_sections([section(1, "MW", "09:00", "10:00")]),
        Course::new("B100", 3).with_sections([section(1, "MW", "09:30", "10:30")]),
    ]
    .into_iter()
    .collect();
    let result = Scheduler::new(&catalog)
        .with_config(GaConfig::default().with_seed(5))
        .run(&catalog.eligible_pool())
        .unwrap();
    assert!(!result.aborted);
    assert!(!result.feasible);
    assert_eq!(result.generations, 20);
    assert_eq!(result.degenerate_generations, 20);
    assert!(result.best.is_empty());
    assert_eq!(result.best_fitness, INFEASIBLE);

    let (best, fitness) = u_enroll::run(&catalog.eligible_pool(), &catalog, &Preferences::default()).unwrap();
    assert!(best.is_empty());
    assert_eq!(fitness, INFEASIBLE);
}

/// `A100` offers a MW section that clashes with `B100` and a TR section that
/// does not; `C100` meets on Friday. With a credit target of 15 every
/// feasible full schedule scores below zero.
fn clash_catalog() -> Catalog {
    [
        Course::new("A100", 3).with_sections([
            section(1, "MW", "09:00", "10:00"),
            section(2, "TR", "09:00", "10:00"),
        ]),
        Course::new("B100", 3).with_sections([section(1, "MW", "09:30", "10:30")]),
        Course::new("C100", 3).with_sections([section(1, "F", "09:00", "10:00")]),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_negative_feasible_beats_conflicting_schedule() {
    let catalog = clash_catalog();
    let prefs = Preferences::default().with_credit(15);
    let full = chromosome(&[("A100", 1), ("B100", 0), ("C100", 0)]);
    assert_eq!(fitness(&full, &catalog, &prefs).unwrap(), -6);

    let pool = catalog.eligible_pool();
    for seed in 0..10 {
        let result = Scheduler::new(&catalog)
            .with_preferences(prefs.clone())
            .with_config(GaConfig::default().with_seed(seed))
            .run(&pool)
            .unwrap();
        assert!(result.feasible, "seed {seed}");
        assert!(!result.best.is_empty(), "seed {seed}");
        let resolved = result.best.resolve(&catalog).unwrap();
        for (i, (_, a)) in resolved.iter().enumerate() {
            for (_, b) in &resolved[i + 1..] {
                assert!(!a.has_conflict(b), "seed {seed}: {a} conflicts with {b}");
            }
        }
        assert_eq!(result.best_fitness, fitness(&result.best, &catalog, &prefs).unwrap());
        assert_eq!(result.degenerate_generations, 0, "seed {seed}");
    }
}

#[test]
fn test_cancelled_run_still_returns() {
    let catalog = term_catalog();
    let cancel = Arc::new(AtomicBool::new(true));
    let result = Scheduler::new(&catalog)
        .with_config(GaConfig::default().with_seed(1))
        .run_with_cancel(&catalog.eligible_pool(), Some(cancel))
        .unwrap();
    assert!(result.cancelled);
    assert_eq!(result.generations, 0);
}
