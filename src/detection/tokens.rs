//! Token fusion for statistical tagger output
//!
//! Reconstructs contiguous entity spans from a stream of sub-word
//! classification tokens using begin/inside tagging. The merge rules are an
//! explicit three-transition state machine: start a new span, extend the
//! current span, or flush the current span and start a new one.

use crate::domain::{Entity, EntitySource};
use serde::{Deserialize, Serialize};

/// Default floor below which tokens are dropped before accumulation
pub const DEFAULT_SCORE_FLOOR: f32 = 0.5;

/// Prefix marking a sub-word continuation of the previous whole word
const SUBWORD_PREFIX: &str = "##";

/// One classified sub-word token from an external tagger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Raw token text; sub-word continuations carry a `##` prefix
    pub text: String,
    /// Tag such as `B-PER`, `I-PER` or `O`
    pub tag: String,
    /// Explicit begin marker; the `B-` tag prefix is honored as well
    #[serde(default, alias = "isBeginningOfSpan")]
    pub begins_entity: bool,
    /// Tagger confidence in [0, 1]
    pub score: f32,
}

impl TaggedToken {
    /// Outside tokens carry no entity
    fn is_outside(&self) -> bool {
        self.tag.is_empty() || self.tag == "O" || self.tag.eq_ignore_ascii_case("outside")
    }

    fn is_begin(&self) -> bool {
        self.begins_entity || self.tag.starts_with("B-")
    }

    fn is_subword(&self) -> bool {
        self.text.starts_with(SUBWORD_PREFIX)
    }

    /// Token text with the sub-word marker stripped
    fn piece(&self) -> &str {
        self.text.strip_prefix(SUBWORD_PREFIX).unwrap_or(&self.text)
    }

    /// Tag with the begin/inside prefix stripped
    fn kind(&self) -> &str {
        self.tag
            .strip_prefix("B-")
            .or_else(|| self.tag.strip_prefix("I-"))
            .unwrap_or(&self.tag)
    }
}

/// Span accumulator carried between tokens
#[derive(Debug)]
struct Accumulator {
    kind: String,
    text: String,
    score: f32,
}

impl Accumulator {
    fn start(token: &TaggedToken) -> Self {
        Self {
            kind: token.kind().to_string(),
            text: token.piece().to_string(),
            score: token.score,
        }
    }

    fn extend(&mut self, token: &TaggedToken) {
        if token.is_subword() {
            self.text.push_str(token.piece());
        } else {
            self.text.push(' ');
            self.text.push_str(&token.text);
        }
        // Optimistic fusion: one confident sub-token is enough to trust the span
        self.score = self.score.max(token.score);
    }
}

/// Fuses tagger tokens into entity spans
pub struct TokenFusion {
    score_floor: f32,
}

impl TokenFusion {
    pub fn new() -> Self {
        Self {
            score_floor: DEFAULT_SCORE_FLOOR,
        }
    }

    /// Override the token score floor
    pub fn with_score_floor(mut self, floor: f32) -> Self {
        self.score_floor = floor.clamp(0.0, 1.0);
        self
    }

    /// Fuse an ordered token stream into entities
    pub fn fuse(&self, tokens: &[TaggedToken]) -> Vec<Entity> {
        let mut out = Vec::new();
        let mut acc: Option<Accumulator> = None;

        for token in tokens
            .iter()
            .filter(|t| t.score >= self.score_floor && !t.is_outside())
        {
            acc = match acc.take() {
                // Rule 1: empty accumulator starts a new span
                None => Some(Accumulator::start(token)),
                // Rule 3: a begin marker or a tag change closes the previous
                // span, even when the tagger forgot the begin marker
                Some(prev) if token.is_begin() || prev.kind != token.kind() => {
                    Self::flush(&mut out, prev);
                    Some(Accumulator::start(token))
                }
                // Rule 2: continuation extends the span
                Some(mut prev) => {
                    prev.extend(token);
                    Some(prev)
                }
            };
        }

        if let Some(prev) = acc {
            Self::flush(&mut out, prev);
        }
        out
    }

    fn flush(out: &mut Vec<Entity>, acc: Accumulator) {
        if acc.text.chars().count() > 1 {
            out.push(Entity::new(
                acc.text,
                acc.score,
                EntitySource::Tagger,
                acc.kind,
            ));
        }
    }
}

impl Default for TokenFusion {
    fn default() -> Self {
        Self::new()
    }
}
