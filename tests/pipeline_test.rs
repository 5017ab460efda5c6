use exam_assembler::models::load_exam_config;
use exam_assembler::orchestrator::{ExamSummary, RenderRequest, ScoreRule};
use exam_assembler::services::summarize;
use exam_assembler::{generate_exam, DifficultyBand, ExamConfig, Question, Strategy, SubQuestion};
use std::io::Write;

const EXAM_TOML: &str = r#"
title = "生理病理联考"
time_limit = 90
seed = 42
score_per_sub = 2.0
show_answers = true

[per_mode]
"B1型题" = 4
"A1型题" = 5

[difficulty_dist]
easy = 50
medium = 50
"#;

fn pool() -> Vec<Question> {
    let mut pool = Vec::new();
    for i in 0..10 {
        let rate = if i < 5 { "90%" } else { "70%" };
        pool.push(Question::new(
            "A1型题",
            "生理学",
            vec![SubQuestion::new(format!("A1-{}", i), "A", rate)],
        ));
    }
    for i in 0..4 {
        let mut q = Question::new(
            "B1型题",
            "病理学",
            vec![
                SubQuestion::new(format!("B1-{}-1", i), "A", "70%"),
                SubQuestion::new(format!("B1-{}-2", i), "", "70%"),
            ],
        );
        q.shared_options = vec!["A. 坏死".to_string(), "B. 凋亡".to_string()];
        q.sub_questions[1].ai_answer = "B".to_string();
        pool.push(q);
    }
    pool
}

async fn load_config() -> ExamConfig {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(EXAM_TOML.as_bytes()).unwrap();
    load_exam_config(file.path()).await.unwrap()
}

#[tokio::test]
async fn test_config_to_render_request() {
    let config = load_config().await;
    let quota = config.to_quota().unwrap();
    let pool = pool();

    let paper = generate_exam(&pool, &quota).unwrap();
    assert_eq!(paper.strategy, Strategy::GlobalDifficultyThenMode);
    assert!(paper.warnings.is_empty());
    assert_eq!(paper.total_cost(), 9);

    let rule = ScoreRule {
        score_per_sub: config.score_per_sub,
        total_score: config.total_score,
    };
    let summary = ExamSummary::build(&config.title, &paper, rule);
    assert_eq!(summary.total_questions, 7);
    assert_eq!(summary.total_subs, 9);
    assert_eq!(summary.total_score, 18.0);

    let rows: Vec<(&str, usize, usize)> = summary
        .by_mode
        .iter()
        .map(|r| (r.mode.as_str(), r.questions, r.subs))
        .collect();
    assert_eq!(rows, vec![("A1型题", 5, 5), ("B1型题", 2, 4)]);

    assert_eq!(
        summary.by_difficulty,
        Some(vec![
            (DifficultyBand::Easy, 2),
            (DifficultyBand::Medium, 5),
            (DifficultyBand::Hard, 0),
            (DifficultyBand::Extreme, 0),
        ])
    );
    assert!(summary.to_string().contains("每小题 2.00 分"));

    let request = RenderRequest::new(&config, &paper, &summary);
    assert_eq!(request.title, "生理病理联考");
    assert_eq!(request.time_limit, 90);
    assert!(request.show_answers);
    assert!(request.answer_sheet);
    assert_eq!(request.questions.len(), 7);
    assert_eq!(
        request.questions.iter().map(|q| q.number).collect::<Vec<_>>(),
        (1..=7).collect::<Vec<_>>()
    );
    assert!(request.questions[..5].iter().all(|q| q.mode == "A1型题"));

    let b1 = &request.questions[5];
    assert_eq!(b1.shared_options.len(), 2);
    assert_eq!(b1.sub_questions[1].answer, "B");

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["questions"][5]["sub_questions"][1]["answer_source"], "ai");
    assert!(json["questions"][0]["sub_questions"][0].get("discuss_source").is_none());
}

#[tokio::test]
async fn test_even_split_score_without_fixed_rule() {
    let mut config = load_config().await;
    config.score_per_sub = None;
    config.total_score = 90.0;
    let quota = config.to_quota().unwrap();
    let pool = pool();

    let paper = generate_exam(&pool, &quota).unwrap();
    let summary = ExamSummary::build(
        &config.title,
        &paper,
        ScoreRule {
            score_per_sub: config.score_per_sub,
            total_score: config.total_score,
        },
    );
    assert_eq!(summary.score_per_sub, 10.0);
    assert_eq!(summary.total_score, 90.0);
}

#[test]
fn test_pool_stats_report_unknown_and_low_rate() {
    let mut pool = pool();
    pool.push(Question::new(
        "A2型题",
        "药理学",
        vec![SubQuestion::new("无正确率", "C", "")],
    ));
    pool.push(Question::new(
        "A2型题",
        "药理学",
        vec![SubQuestion::new("低正确率", "D", "35%")],
    ));

    let stats = summarize(&pool);
    assert_eq!(stats.total, 16);
    assert_eq!(stats.total_subs, 20);
    assert_eq!(stats.unknown_difficulty, 1);
    assert_eq!(stats.low_rate_count, 1);
    assert_eq!(stats.low_rate_top[0].text, "低正确率");
    assert_eq!(stats.by_mode[0], ("A1型题".to_string(), 10));
}
