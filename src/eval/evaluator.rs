use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use super::{
    math::MathPass,
    memorize::MemorizePass,
    result::{EvaluatedLine, EvaluationResult},
    script::ScriptPass,
};
use crate::{
    config::EvaluatorConfig,
    formatter::FormattingPipeline,
    modules::{referenced_keys, ModuleResolver},
    provider::capability::Capabilities,
};

/// Turns raw note text into rendered output.
///
/// Every line is trimmed and sent through math, script and memorize. A
/// memorize line ends there as a flashcard; any other line continues through
/// the formatting pipeline and module substitution. No failure reaches the
/// caller: a lookup or script that fails shows up as an `Error.` marker in the
/// rendered text.
pub struct NoteEvaluator {
    math: MathPass,
    script: ScriptPass,
    memorize: MemorizePass,
    pipeline: FormattingPipeline,
    modules: ModuleResolver,
}

impl Default for NoteEvaluator {
    fn default() -> Self {
        Self::from_config(&EvaluatorConfig::default())
    }
}

impl NoteEvaluator {
    pub fn new(capabilities: Capabilities, config: &EvaluatorConfig) -> Self {
        Self {
            math: MathPass::new(),
            script: ScriptPass::new(capabilities.script.clone()),
            memorize: MemorizePass::new(),
            pipeline: FormattingPipeline::default(),
            modules: ModuleResolver::new(capabilities, config),
        }
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self::new(Capabilities::from_config(config), config)
    }

    pub fn with_pipeline(mut self, pipeline: FormattingPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub async fn evaluate(&self, content: Option<&str>, color: &str) -> EvaluationResult {
        let mut rng = StdRng::from_entropy();
        self.evaluate_with_rng(content, color, &mut rng).await
    }

    /// Same as [`Self::evaluate`] with the randomness source supplied by the
    /// caller. Random numbers, hashes and module colors all draw from `rng`.
    #[tracing::instrument(level = "debug", skip(self, content, rng))]
    pub async fn evaluate_with_rng<R: Rng + Send>(
        &self,
        content: Option<&str>,
        color: &str,
        rng: &mut R,
    ) -> EvaluationResult {
        let content = match content {
            Some(content) if !content.is_empty() => content,
            _ => return EvaluationResult::empty(),
        };

        let mut staged = Vec::new();
        for raw in content.split('\n') {
            staged.push(self.stage_line(raw.trim()).await);
        }

        let keys = referenced_keys(staged.iter().filter_map(|line| match line {
            EvaluatedLine::Text(text) => Some(text.as_str()),
            EvaluatedLine::Flashcard(_) => None,
        }));
        debug!("{} lines, {} module keys", staged.len(), keys.len());
        let resolved = self.modules.resolve(&keys, color, rng).await;

        let lines = staged
            .into_iter()
            .map(|line| match line {
                EvaluatedLine::Text(text) => {
                    EvaluatedLine::Text(self.modules.substitute(&text, &resolved, rng))
                }
                card => card,
            })
            .collect();

        EvaluationResult::from_lines(lines)
    }

    /// Every pass except module substitution, which needs the values looked
    /// up for the whole note.
    async fn stage_line(&self, line: &str) -> EvaluatedLine {
        let line = self.math.process(line);
        let line = self.script.process(&line).await;
        match self.memorize.process(&line) {
            Some(card) => EvaluatedLine::Flashcard(card),
            None => EvaluatedLine::Text(self.pipeline.apply(&line)),
        }
    }
}
