use exam_assembler::models::mode::mode_priority;
use exam_assembler::services::total_cost;
use exam_assembler::{
    generate_exam, CountMode, DifficultyBand, DifficultyMode, ExamGenerationError, ExamQuota,
    Question, SubQuestion, WarningScope,
};
use std::collections::HashSet;

fn question(mode: &str, unit: &str, rate: &str, subs: usize) -> Question {
    Question::new(
        mode,
        unit,
        (0..subs)
            .map(|i| SubQuestion::new(format!("{}-{}-{}", mode, unit, i), "A", rate))
            .collect(),
    )
}

/// 混合题库：A1/A2 单小题，A3/A4 与 B1 多小题，覆盖四个难度档
fn mixed_pool() -> Vec<Question> {
    let rates = ["90%", "70%", "50%", "30%"];
    let units = ["生理学", "病理学", "药理学"];
    let mut pool = Vec::new();
    for i in 0..24 {
        let rate = rates[i % rates.len()];
        let unit = units[i % units.len()];
        pool.push(question("A1型题", unit, rate, 1));
        if i % 2 == 0 {
            pool.push(question("A2型题", unit, rate, 1));
        }
        if i % 3 == 0 {
            pool.push(question("A3/A4型题", unit, rate, 2 + (i / 3) % 3));
            pool.push(question("B1型题", unit, rate, 2 + i % 2));
        }
    }
    pool
}

fn all_quotas() -> Vec<ExamQuota> {
    let per_mode = [("A1型题", 10), ("A2型题", 5), ("A3/A4型题", 6), ("B1型题", 4)];
    vec![
        ExamQuota::new(30, CountMode::Sub),
        ExamQuota::new(30, CountMode::Sub).with_per_mode(per_mode),
        ExamQuota::new(30, CountMode::Sub).with_difficulty([40, 30, 20, 10], DifficultyMode::Global),
        ExamQuota::new(30, CountMode::Sub)
            .with_per_mode(per_mode)
            .with_difficulty([40, 30, 20, 10], DifficultyMode::PerMode),
        ExamQuota::new(30, CountMode::Sub)
            .with_per_mode(per_mode)
            .with_difficulty([40, 30, 20, 10], DifficultyMode::Global),
    ]
}

#[test]
fn test_scenario_a_question_mode_total() {
    let pool: Vec<Question> = (0..10)
        .map(|i| question("A1型题", &format!("章节{}", i), "75%", 1))
        .collect();
    let quota = ExamQuota::new(7, CountMode::Question).with_seed(42);

    let first = generate_exam(&pool, &quota).unwrap();
    assert_eq!(first.len(), 7);
    assert!(first.warnings.is_empty());
    let distinct: HashSet<usize> = first.picks().iter().map(|p| p.index).collect();
    assert_eq!(distinct.len(), 7);
    assert!(first.questions().all(|s| !s.is_truncated()));

    let second = generate_exam(&pool, &quota).unwrap();
    assert_eq!(first.picks(), second.picks());
}

fn scenario_b_pool(b1_sizes: &[usize]) -> Vec<Question> {
    let mut pool: Vec<Question> = (0..5).map(|_| question("A1型题", "生理学", "80%", 1)).collect();
    pool.extend(b1_sizes.iter().map(|&n| question("B1型题", "病理学", "60%", n)));
    pool
}

#[test]
fn test_scenario_b_per_mode_sub_counting() {
    let pool = scenario_b_pool(&[2, 3, 4]);
    for seed in 0..20 {
        let quota = ExamQuota::new(0, CountMode::Sub)
            .with_per_mode([("A1型题", 4), ("B1型题", 6)])
            .with_seed(seed);
        let paper = generate_exam(&pool, &quota).unwrap();

        let a1: Vec<_> = paper.questions().filter(|s| s.mode() == "A1型题").collect();
        let b1: Vec<_> = paper.questions().filter(|s| s.mode() == "B1型题").collect();
        assert_eq!(a1.len(), 4);
        assert!(a1.iter().all(|s| !s.is_truncated()));
        assert_eq!(b1.iter().map(|s| s.keep).sum::<usize>(), 6);
        assert!(b1.iter().filter(|s| s.is_truncated()).count() <= 1);
        assert_eq!(paper.total_cost(), 10);
        assert!(paper.warnings.is_empty());
    }
}

#[test]
fn test_scenario_b_variant_forces_one_truncation() {
    let pool = scenario_b_pool(&[2, 3, 5]);
    for seed in 0..20 {
        let quota = ExamQuota::new(0, CountMode::Sub)
            .with_per_mode([("B1型题", 6)])
            .with_seed(seed);
        let paper = generate_exam(&pool, &quota).unwrap();

        assert_eq!(paper.total_subs(), 6);
        let truncated: Vec<_> = paper.questions().filter(|s| s.is_truncated()).collect();
        assert_eq!(truncated.len(), 1);
        assert_eq!(truncated[0].sub_questions().len(), 1);
    }
}

#[test]
fn test_scenario_c_missing_band_is_backfilled() {
    let mut pool = Vec::new();
    pool.extend((0..15).map(|_| question("A1型题", "生理学", "90%", 1)));
    pool.extend((0..10).map(|_| question("A1型题", "病理学", "70%", 1)));
    pool.extend((0..6).map(|_| question("A1型题", "药理学", "50%", 1)));

    let quota = ExamQuota::new(20, CountMode::Sub)
        .with_difficulty([50, 30, 15, 5], DifficultyMode::Global)
        .with_seed(3);
    let paper = generate_exam(&pool, &quota).unwrap();

    assert_eq!(paper.total_cost(), 20);
    assert_eq!(paper.warnings.len(), 1);
    let warning = &paper.warnings[0];
    assert_eq!(
        warning.scope,
        WarningScope::Band {
            band: DifficultyBand::Extreme,
            mode: None
        }
    );
    assert_eq!((warning.target, warning.achieved), (1, 0));
}

#[test]
fn test_every_strategy_is_deterministic_with_seed() {
    let pool = mixed_pool();
    for quota in all_quotas() {
        let quota = quota.with_seed(2024);
        let a = generate_exam(&pool, &quota).unwrap();
        let b = generate_exam(&pool, &quota).unwrap();
        assert_eq!(a.strategy, b.strategy);
        assert_eq!(a.picks(), b.picks(), "strategy {}", a.strategy);
        assert_eq!(a.warnings, b.warnings);
    }
}

#[test]
fn test_question_mode_never_truncates() {
    let pool = mixed_pool();
    for quota in all_quotas() {
        let mut quota = quota.with_seed(11);
        quota.count_mode = CountMode::Question;
        let paper = generate_exam(&pool, &quota).unwrap();
        assert!(
            paper.questions().all(|s| !s.is_truncated()),
            "strategy {}",
            paper.strategy
        );
    }
}

#[test]
fn test_selection_never_exceeds_target() {
    let pool = mixed_pool();
    for quota in all_quotas() {
        let quota = quota.with_seed(5);
        let paper = generate_exam(&pool, &quota).unwrap();
        assert!(paper.total_cost() <= quota.effective_total(), "strategy {}", paper.strategy);
        assert_eq!(total_cost(paper.picks(), quota.count_mode), paper.total_cost());

        let distinct: HashSet<usize> = paper.picks().iter().map(|p| p.index).collect();
        assert_eq!(distinct.len(), paper.len());
    }
}

#[test]
fn test_pool_is_not_mutated() {
    let pool = scenario_b_pool(&[2, 3, 5]);
    let before = pool.clone();
    let quota = ExamQuota::new(0, CountMode::Sub)
        .with_per_mode([("B1型题", 6)])
        .with_seed(1);

    let paper = generate_exam(&pool, &quota).unwrap();
    let truncated = paper.to_questions();
    assert_eq!(truncated.iter().map(|q| q.sub_count()).sum::<usize>(), 6);
    drop(paper);
    assert_eq!(pool, before);
}

#[test]
fn test_error_only_when_filtered_pool_is_empty() {
    let pool = mixed_pool();

    let mut empty = ExamQuota::new(10, CountMode::Sub);
    empty.units = vec!["内科学".to_string()];
    let err = generate_exam(&pool, &empty).unwrap_err();
    assert!(matches!(err, ExamGenerationError::EmptyPool { .. }));

    // 配额远超题库只产生警告
    let mut oversized = ExamQuota::new(10_000, CountMode::Sub);
    oversized.units = vec!["生理".to_string()];
    let paper = generate_exam(&pool, &oversized).unwrap();
    assert!(!paper.is_empty());
    assert!(paper
        .warnings
        .iter()
        .any(|w| w.scope == WarningScope::Total && w.target == 10_000));
}

#[test]
fn test_final_order_follows_mode_priority_then_unit() {
    let mut pool = mixed_pool();
    pool.push(question("X型题", "内科学", "70%", 1));
    pool.push(question("案例分析", "外科学", "70%", 3));
    let quota = ExamQuota::new(1_000, CountMode::Question).with_seed(9);

    let paper = generate_exam(&pool, &quota).unwrap();
    assert_eq!(paper.len(), pool.len());

    let keys: Vec<(u8, &str)> = paper
        .questions()
        .map(|s| (mode_priority(s.mode()), s.unit()))
        .collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(paper.questions().last().map(|s| s.mode()), Some("X型题"));
}

#[test]
fn test_global_cross_keeps_per_mode_targets_under_rounding() {
    let mut pool = Vec::new();
    for mode in ["A1型题", "A2型题"] {
        pool.extend((0..6).map(|_| question(mode, "生理学", "90%", 1)));
        pool.extend((0..6).map(|_| question(mode, "生理学", "70%", 1)));
    }
    pool.extend((0..3).map(|_| question("A3/A4型题", "病理学", "70%", 3)));

    for seed in 0..10 {
        let quota = ExamQuota::new(0, CountMode::Sub)
            .with_per_mode([("A1型题", 3), ("A2型题", 1), ("A3/A4型题", 3)])
            .with_difficulty([1, 1, 0, 0], DifficultyMode::Global)
            .with_seed(seed);
        let paper = generate_exam(&pool, &quota).unwrap();

        let cost = |mode: &str| -> usize {
            paper
                .questions()
                .filter(|s| s.mode() == mode)
                .map(|s| s.keep)
                .sum()
        };
        assert_eq!(cost("A1型题"), 3, "seed {}", seed);
        assert_eq!(cost("A2型题"), 1, "seed {}", seed);
        assert_eq!(cost("A3/A4型题"), 3, "seed {}", seed);
        assert!(paper.warnings.is_empty(), "seed {}: {:?}", seed, paper.warnings);
    }
}

#[test]
fn test_global_cross_mode_shortfall_is_always_reported() {
    let pool = mixed_pool();
    let skewed: [&[(&str, usize)]; 4] = [
        &[("A1型题", 7), ("A2型题", 1), ("A3/A4型题", 5), ("B1型题", 3)],
        &[("A1型题", 1), ("A2型题", 9), ("A3/A4型题", 2)],
        &[("A1型题", 3), ("A2型题", 1), ("B1型题", 7)],
        &[("A1型题", 30), ("B1型题", 40)],
    ];

    for per_mode in skewed {
        for seed in 0..10 {
            let quota = ExamQuota::new(0, CountMode::Sub)
                .with_per_mode(per_mode.iter().copied())
                .with_difficulty([3, 1, 0, 1], DifficultyMode::Global)
                .with_seed(seed);
            let paper = generate_exam(&pool, &quota).unwrap();
            assert!(paper.total_cost() <= quota.effective_total());

            for &(mode, target) in per_mode {
                let achieved: usize = paper
                    .questions()
                    .filter(|s| s.mode() == mode)
                    .map(|s| s.keep)
                    .sum();
                let warned = paper.warnings.iter().any(|w| {
                    w.scope
                        == WarningScope::Mode {
                            mode: mode.to_string(),
                        }
                        && w.target == target
                        && w.achieved == achieved
                });
                assert!(
                    achieved == target || (achieved < target && warned),
                    "{} target {} achieved {} seed {}",
                    mode,
                    target,
                    achieved,
                    seed
                );
            }
        }
    }
}
