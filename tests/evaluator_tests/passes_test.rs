use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use noted::{
    config::EvaluatorConfig,
    eval::{math::RESULT_STYLE, script::ERROR_MARKER, script::OK_MARKER},
    provider::{capability::MockScriptHost, ProviderError},
    EvaluatedLine, EvaluationResult, FormattingPipeline, LinePass, NoteEvaluator,
};
use pretty_assertions::assert_eq;

use super::{offline_capabilities, offline_evaluator, seeded};

struct CountingPass {
    calls: Arc<AtomicUsize>,
}

impl LinePass for CountingPass {
    fn name(&self) -> &str {
        "counting"
    }

    fn process(&self, line: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        line.to_string()
    }
}

fn text(value: &str) -> EvaluationResult {
    EvaluationResult::Single(EvaluatedLine::Text(value.to_string()))
}

#[tokio::test]
async fn test_math_lines() {
    let evaluator = offline_evaluator();
    let cases = [
        ("2 + 2 * 5", "12"),
        ("2^3", "8"),
        ("(1 + 2) * 3", "9"),
        ("10 % 4", "2"),
        ("1,5 + 1", "2.5"),
        ("{exp(0)} + 1", "2"),
        ("{bin(5)}", "101"),
    ];
    for (line, value) in cases {
        let result = evaluator
            .evaluate_with_rng(Some(line), "#fff", &mut seeded())
            .await;
        assert_eq!(
            result,
            text(&format!("{} = <span style=\"{}\">{}</span>", line, RESULT_STYLE, value))
        );
    }
}

#[tokio::test]
async fn test_incomplete_math_is_unchanged() {
    let evaluator = offline_evaluator();
    for line in ["2 + ", "1 / 0", "(2", "2 + two"] {
        let result = evaluator
            .evaluate_with_rng(Some(line), "#fff", &mut seeded())
            .await;
        assert_eq!(result, text(line.trim()));
    }
}

#[tokio::test]
async fn test_emoji_and_brand() {
    let result = offline_evaluator()
        .evaluate_with_rng(Some("NOTED. :) <3 :fire:"), "#fff", &mut seeded())
        .await;
    assert_eq!(
        result,
        text("<span style=\"color: #8B5CF6; font-weight: bold;\">NOTED.</span> 😊 ❤️ 🔥")
    );
}

#[tokio::test]
async fn test_link_and_markdown() {
    let result = offline_evaluator()
        .evaluate_with_rng(Some("**read** https://example.com/x"), "#fff", &mut seeded())
        .await;
    assert_eq!(
        result,
        text("<strong>read</strong> <a href=\"https://example.com/x\" target=\"_blank\" rel=\"noopener noreferrer\" style=\"color: #3B82F6; text-decoration: underline;\">example.com</a>")
    );
}

#[tokio::test]
async fn test_each_formatting_pass_runs_once_per_text_line() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = FormattingPipeline::new(vec![Box::new(CountingPass {
        calls: calls.clone(),
    })]);
    let evaluator = offline_evaluator().with_pipeline(pipeline);

    evaluator
        .evaluate_with_rng(Some("a\n{Memorize(q:a)}\nb\n"), "#fff", &mut seeded())
        .await;

    // "a", "b" and the trailing empty line; the flashcard skips formatting
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_script_markers() {
    let evaluator = offline_evaluator();
    let result = evaluator
        .evaluate_with_rng(Some("{js(1 + 1)}"), "#fff", &mut seeded())
        .await;
    assert_eq!(result, text(&format!("{{js(1 + 1)}}{}", OK_MARKER)));

    let mut failing = MockScriptHost::new();
    failing
        .expect_run()
        .times(1)
        .returning(|_| Err(ProviderError::ScriptFailed("ReferenceError".to_string())));
    let evaluator = NoteEvaluator::new(
        offline_capabilities().with_script(failing),
        &EvaluatorConfig::default(),
    );
    let result = evaluator
        .evaluate_with_rng(Some("{js(nope())}"), "#fff", &mut seeded())
        .await;
    assert_eq!(result, text(&format!("{{js(nope())}}{}", ERROR_MARKER)));
}
