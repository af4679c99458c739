//! Custom formula engine.
//!
//! Parses user-supplied formulas (from `custom_tests` configuration)
//! into an expression tree once, then evaluates them against a
//! statistics snapshot. The grammar covers `+ - * /`, parentheses,
//! `POWER`, `SQRT`, `ROUND`, `TRUNC`, `FLOOR`, and named statistic
//! references with an optional exclusion mode, e.g.
//! `SentenceCount(GunningFog)`. Syntax errors carry the character
//! offset of the first unmatched or unexpected token.

use crate::error::{TestError, TestOutcome};
use crate::formulas::Context;
use crate::hard_words::StandardCounts;

/// Pack a grade range into one `u64`: lower half in the high 32 bits.
///
/// Packed values stay below 2^37 for real grades, so they survive a
/// round trip through `f64` formula arithmetic losslessly.
pub const fn pack_grade_range(lower: u32, upper: u32) -> u64 {
    ((lower as u64) << 32) | upper as u64
}

/// Unpack a grade range packed by [`pack_grade_range`].
pub const fn unpack_grade_range(packed: u64) -> (u32, u32) {
    ((packed >> 32) as u32, packed as u32)
}

/// Exclusion mode parameter of a statistic reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    /// Whatever the engine-level inclusion policy selects.
    #[default]
    Default,
    /// Whole-document totals.
    All,
    /// Complete sentences and headers only.
    Valid,
    /// Gunning Fog's sentence measure (sentence units).
    GunningFog,
}

/// Named statistic references available to formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Statistic {
    WordCount,
    SentenceCount,
    SentenceUnitCount,
    SyllableCount,
    CharacterCount,
    CharacterPlusPunctuationCount,
    MonosyllabicWordCount,
    PolysyllabicWordCount,
    HardWordCount,
    UniqueHardWordCount,
    FamiliarWordCount,
    ProperNounCount,
    NumeralCount,
    MiniWordCount,
    LongWordCount,
    SixCharacterWordCount,
}

impl Statistic {
    fn parse(name: &str) -> Option<Self> {
        let lowered = name.to_ascii_lowercase();
        Some(match lowered.as_str() {
            "wordcount" => Self::WordCount,
            "sentencecount" => Self::SentenceCount,
            "sentenceunitcount" => Self::SentenceUnitCount,
            "syllablecount" => Self::SyllableCount,
            "charactercount" => Self::CharacterCount,
            "characterpluspunctuationcount" => Self::CharacterPlusPunctuationCount,
            "monosyllabicwordcount" => Self::MonosyllabicWordCount,
            "polysyllabicwordcount" => Self::PolysyllabicWordCount,
            "hardwordcount" => Self::HardWordCount,
            "uniquehardwordcount" => Self::UniqueHardWordCount,
            "familiarwordcount" => Self::FamiliarWordCount,
            "propernouncount" => Self::ProperNounCount,
            "numeralcount" => Self::NumeralCount,
            "miniwordcount" => Self::MiniWordCount,
            "longwordcount" => Self::LongWordCount,
            "sixcharacterwordcount" => Self::SixCharacterWordCount,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Function {
    Power,
    Sqrt,
    Round,
    Trunc,
    Floor,
}

impl Function {
    fn parse(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "power" => Self::Power,
            "sqrt" => Self::Sqrt,
            "round" => Self::Round,
            "trunc" => Self::Trunc,
            "floor" => Self::Floor,
            _ => return None,
        })
    }

    const fn arity(self) -> usize {
        match self {
            Self::Power => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone)]
enum Expr {
    Number(f64),
    Stat(Statistic, Mode),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Call(Function, Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn syntax_error(offset: usize, message: impl Into<String>) -> TestError {
    TestError::FormulaSyntax {
        offset,
        message: message.into(),
    }
}

fn lex(source: &str) -> TestOutcome<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let offsets: Vec<usize> = source
        .char_indices()
        .enumerate()
        .map(|(char_offset, _)| char_offset)
        .collect();
    let mut i = 0;

    while i < chars.len() {
        let (_, c) = chars[i];
        let offset = offsets[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '+' => {
                tokens.push(Token { kind: TokenKind::Plus, offset });
                i += 1;
            }
            '-' => {
                tokens.push(Token { kind: TokenKind::Minus, offset });
                i += 1;
            }
            '*' => {
                tokens.push(Token { kind: TokenKind::Star, offset });
                i += 1;
            }
            '/' => {
                tokens.push(Token { kind: TokenKind::Slash, offset });
                i += 1;
            }
            '(' => {
                tokens.push(Token { kind: TokenKind::LParen, offset });
                i += 1;
            }
            ')' => {
                tokens.push(Token { kind: TokenKind::RParen, offset });
                i += 1;
            }
            ',' => {
                tokens.push(Token { kind: TokenKind::Comma, offset });
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].1.is_ascii_digit() || chars[i].1 == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().map(|(_, c)| *c).collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| syntax_error(offset, format!("invalid number '{text}'")))?;
                tokens.push(Token { kind: TokenKind::Number(value), offset });
            }
            c if c.is_alphabetic() => {
                let start = i;
                while i < chars.len() && (chars[i].1.is_alphanumeric() || chars[i].1 == '_') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().map(|(_, c)| *c).collect();
                tokens.push(Token { kind: TokenKind::Ident(text), offset });
            }
            other => {
                return Err(syntax_error(offset, format!("unexpected character '{other}'")));
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    end_offset: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn current_offset(&self) -> usize {
        self.peek().map_or(self.end_offset, |t| t.offset)
    }

    fn expr(&mut self) -> TestOutcome<Expr> {
        let mut left = self.term()?;
        while let Some(token) = self.peek() {
            let op = match token.kind {
                TokenKind::Plus => true,
                TokenKind::Minus => false,
                _ => break,
            };
            self.position += 1;
            let right = self.term()?;
            left = if op {
                Expr::Add(Box::new(left), Box::new(right))
            } else {
                Expr::Sub(Box::new(left), Box::new(right))
            };
        }
        Ok(left)
    }

    fn term(&mut self) -> TestOutcome<Expr> {
        let mut left = self.factor()?;
        while let Some(token) = self.peek() {
            let mul = match token.kind {
                TokenKind::Star => true,
                TokenKind::Slash => false,
                _ => break,
            };
            self.position += 1;
            let right = self.factor()?;
            left = if mul {
                Expr::Mul(Box::new(left), Box::new(right))
            } else {
                Expr::Div(Box::new(left), Box::new(right))
            };
        }
        Ok(left)
    }

    fn factor(&mut self) -> TestOutcome<Expr> {
        let offset = self.current_offset();
        let Some(token) = self.next() else {
            return Err(syntax_error(offset, "unexpected end of formula"));
        };
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::Minus => Ok(Expr::Neg(Box::new(self.factor()?))),
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.expect_rparen(token.offset)?;
                Ok(inner)
            }
            TokenKind::Ident(name) => self.ident(&name, token.offset),
            _ => Err(syntax_error(token.offset, "expected a value")),
        }
    }

    fn ident(&mut self, name: &str, offset: usize) -> TestOutcome<Expr> {
        if let Some(function) = Function::parse(name) {
            let paren_offset = self.current_offset();
            match self.next() {
                Some(Token { kind: TokenKind::LParen, .. }) => {}
                _ => {
                    return Err(syntax_error(
                        paren_offset,
                        format!("expected '(' after {name}"),
                    ));
                }
            }
            let mut args = vec![self.expr()?];
            while matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Comma)) {
                self.position += 1;
                args.push(self.expr()?);
            }
            self.expect_rparen(paren_offset)?;
            if args.len() != function.arity() {
                return Err(syntax_error(
                    offset,
                    format!("{name} takes {} argument(s)", function.arity()),
                ));
            }
            return Ok(Expr::Call(function, args));
        }

        let Some(statistic) = Statistic::parse(name) else {
            return Err(syntax_error(offset, format!("unknown name '{name}'")));
        };

        // Optional exclusion-mode parameter
        let mode = if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::LParen)) {
            let paren = self.next().map_or(0, |t| t.offset);
            let mode_offset = self.current_offset();
            let mode = match self.next() {
                Some(Token { kind: TokenKind::Ident(m), .. }) => {
                    match m.to_ascii_lowercase().as_str() {
                        "default" => Mode::Default,
                        "all" => Mode::All,
                        "valid" => Mode::Valid,
                        "gunningfog" => Mode::GunningFog,
                        _ => {
                            return Err(syntax_error(
                                mode_offset,
                                format!("unknown exclusion mode '{m}'"),
                            ));
                        }
                    }
                }
                _ => return Err(syntax_error(mode_offset, "expected an exclusion mode")),
            };
            self.expect_rparen(paren)?;
            mode
        } else {
            Mode::Default
        };

        Ok(Expr::Stat(statistic, mode))
    }

    /// Consume a `)`, attributing a missing one to the opening paren.
    fn expect_rparen(&mut self, open_offset: usize) -> TestOutcome<()> {
        match self.next() {
            Some(Token { kind: TokenKind::RParen, .. }) => Ok(()),
            _ => Err(syntax_error(open_offset, "unmatched '('")),
        }
    }
}

/// A formula parsed and validated once, ready for repeated evaluation.
#[derive(Debug, Clone)]
pub struct CompiledFormula {
    source: String,
    ast: Expr,
}

impl CompiledFormula {
    /// Parse a formula. Errors carry the character offset of the first
    /// problem token.
    pub fn parse(source: &str) -> TestOutcome<Self> {
        let tokens = lex(source)?;
        let end_offset = source.chars().count();
        if tokens.is_empty() {
            return Err(syntax_error(0, "empty formula"));
        }
        let mut parser = Parser {
            tokens,
            position: 0,
            end_offset,
        };
        let ast = parser.expr()?;
        if let Some(extra) = parser.peek() {
            return Err(syntax_error(extra.offset, "unexpected trailing input"));
        }
        Ok(Self {
            source: source.to_string(),
            ast,
        })
    }

    /// The original formula text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate against a statistics snapshot.
    ///
    /// `custom_hard` supplies the hard-word counts of the custom test's
    /// own familiar-word standard; without one, `HardWordCount` falls
    /// back to the Fog (3+ syllable) counts.
    pub fn evaluate(
        &self,
        ctx: &Context,
        custom_hard: Option<&StandardCounts>,
        test: &str,
    ) -> TestOutcome<f64> {
        let value = eval(&self.ast, ctx, custom_hard, test)?;
        if value.is_nan() || value.is_infinite() {
            return Err(TestError::ArithmeticDomain {
                test: test.to_string(),
                reason: "formula produced a non-finite value".to_string(),
            });
        }
        Ok(value)
    }
}

fn eval(
    expr: &Expr,
    ctx: &Context,
    custom_hard: Option<&StandardCounts>,
    test: &str,
) -> TestOutcome<f64> {
    Ok(match expr {
        Expr::Number(value) => *value,
        Expr::Stat(statistic, mode) => stat_value(*statistic, *mode, ctx, custom_hard),
        Expr::Neg(inner) => -eval(inner, ctx, custom_hard, test)?,
        Expr::Add(a, b) => eval(a, ctx, custom_hard, test)? + eval(b, ctx, custom_hard, test)?,
        Expr::Sub(a, b) => eval(a, ctx, custom_hard, test)? - eval(b, ctx, custom_hard, test)?,
        Expr::Mul(a, b) => eval(a, ctx, custom_hard, test)? * eval(b, ctx, custom_hard, test)?,
        Expr::Div(a, b) => {
            let denominator = eval(b, ctx, custom_hard, test)?;
            if denominator == 0.0 {
                return Err(TestError::ArithmeticDomain {
                    test: test.to_string(),
                    reason: "division by zero".to_string(),
                });
            }
            eval(a, ctx, custom_hard, test)? / denominator
        }
        Expr::Call(function, args) => {
            let first = eval(&args[0], ctx, custom_hard, test)?;
            match function {
                Function::Power => first.powf(eval(&args[1], ctx, custom_hard, test)?),
                Function::Sqrt => {
                    if first < 0.0 {
                        return Err(TestError::ArithmeticDomain {
                            test: test.to_string(),
                            reason: "square root of a negative value".to_string(),
                        });
                    }
                    first.sqrt()
                }
                Function::Round => first.round(),
                Function::Trunc => first.trunc(),
                Function::Floor => first.floor(),
            }
        }
    })
}

fn stat_value(
    statistic: Statistic,
    mode: Mode,
    ctx: &Context,
    custom_hard: Option<&StandardCounts>,
) -> f64 {
    let totals = match mode {
        Mode::Default | Mode::GunningFog => ctx.totals(),
        Mode::All => &ctx.stats.all,
        Mode::Valid => &ctx.stats.valid,
    };
    let hard = custom_hard.map_or_else(
        || {
            if ctx.use_valid {
                ctx.hard_words.fog.valid
            } else {
                ctx.hard_words.fog.all
            }
        },
        |counts| {
            if mode == Mode::Valid || (mode == Mode::Default && ctx.use_valid) {
                counts.valid
            } else {
                counts.all
            }
        },
    );

    match statistic {
        Statistic::WordCount => totals.words as f64,
        Statistic::SentenceCount => {
            if mode == Mode::GunningFog {
                totals.units as f64
            } else {
                totals.sentences as f64
            }
        }
        Statistic::SentenceUnitCount => totals.units as f64,
        Statistic::SyllableCount => totals.syllables_with(ctx.numeral_policy) as f64,
        Statistic::CharacterCount => totals.chars as f64,
        Statistic::CharacterPlusPunctuationCount => totals.chars_with_punct as f64,
        Statistic::MonosyllabicWordCount => totals.monosyllabic as f64,
        Statistic::PolysyllabicWordCount => totals.polysyllabic as f64,
        Statistic::HardWordCount => f64::from(hard.total),
        Statistic::UniqueHardWordCount => f64::from(hard.unique),
        Statistic::FamiliarWordCount => (totals.words as f64 - f64::from(hard.total)).max(0.0),
        Statistic::ProperNounCount => totals.proper_nouns as f64,
        Statistic::NumeralCount => totals.numerals as f64,
        Statistic::MiniWordCount => totals.mini as f64,
        Statistic::LongWordCount => totals.long_seven as f64,
        Statistic::SixCharacterWordCount => totals.long_six as f64,
    }
}

/// Resolve a named statistic outside formula syntax, for goal subjects.
///
/// Accepts the formula-language names (`WordCount`) and plain aliases
/// (`words`, `sentences`, `syllables`, ...), ignoring case and
/// punctuation. Returns `None` for names that match no statistic.
pub fn statistic_value(name: &str, ctx: &Context) -> Option<f64> {
    let key: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    let statistic = Statistic::parse(&key).or_else(|| match key.as_str() {
        "words" => Some(Statistic::WordCount),
        "sentences" => Some(Statistic::SentenceCount),
        "sentenceunits" | "units" => Some(Statistic::SentenceUnitCount),
        "syllables" => Some(Statistic::SyllableCount),
        "characters" | "chars" => Some(Statistic::CharacterCount),
        "monosyllables" | "monosyllabicwords" => Some(Statistic::MonosyllabicWordCount),
        "polysyllables" | "polysyllabicwords" => Some(Statistic::PolysyllabicWordCount),
        "hardwords" => Some(Statistic::HardWordCount),
        "propernouns" => Some(Statistic::ProperNounCount),
        "numerals" => Some(Statistic::NumeralCount),
        "miniwords" => Some(Statistic::MiniWordCount),
        "longwords" => Some(Statistic::LongWordCount),
        _ => None,
    })?;
    Some(stat_value(statistic, Mode::Default, ctx, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionaries::syllable_dict::NumeralSyllabication;
    use crate::hard_words::HardWordAnalysis;
    use crate::stats::{StatsSnapshot, Totals};

    fn context() -> Context {
        let totals = Totals {
            words: 100,
            sentences: 5,
            units: 8,
            syllables: 150,
            chars: 420,
            chars_with_punct: 440,
            monosyllabic: 60,
            polysyllabic: 10,
            ..Totals::default()
        };
        Context {
            stats: StatsSnapshot {
                all: totals,
                valid: totals,
                ..StatsSnapshot::default()
            },
            hard_words: HardWordAnalysis::default(),
            use_valid: false,
            numeral_policy: NumeralSyllabication::default(),
        }
    }

    fn eval_ok(source: &str) -> f64 {
        CompiledFormula::parse(source)
            .unwrap()
            .evaluate(&context(), None, "custom")
            .unwrap()
    }

    #[test]
    fn arithmetic_and_precedence() {
        assert_eq!(eval_ok("2 + 3 * 4"), 14.0);
        assert_eq!(eval_ok("(2 + 3) * 4"), 20.0);
        assert_eq!(eval_ok("-2 + 10"), 8.0);
        assert_eq!(eval_ok("10 / 4"), 2.5);
    }

    #[test]
    fn functions() {
        assert_eq!(eval_ok("POWER(2, 10)"), 1024.0);
        assert_eq!(eval_ok("SQRT(16)"), 4.0);
        assert_eq!(eval_ok("ROUND(7.5)"), 8.0);
        assert_eq!(eval_ok("TRUNC(7.9)"), 7.0);
        assert_eq!(eval_ok("floor(3.7)"), 3.0);
    }

    #[test]
    fn statistic_references() {
        assert_eq!(eval_ok("WordCount"), 100.0);
        assert_eq!(eval_ok("WordCount(Default) / SentenceCount(Default)"), 20.0);
        assert_eq!(eval_ok("SentenceCount(GunningFog)"), 8.0);
        assert_eq!(eval_ok("SyllableCount / WordCount"), 1.5);
    }

    #[test]
    fn flesch_kincaid_as_custom_formula() {
        let grade = eval_ok(
            "0.39 * (WordCount / SentenceCount) + 11.8 * (SyllableCount / WordCount) - 15.59",
        );
        assert!((grade - 9.91).abs() < 0.001);
    }

    #[test]
    fn unmatched_paren_reports_its_own_offset() {
        let err = CompiledFormula::parse("(3 + 4").unwrap_err();
        assert_eq!(
            err,
            TestError::FormulaSyntax {
                offset: 0,
                message: "unmatched '('".to_string()
            }
        );
    }

    #[test]
    fn unexpected_token_offset() {
        let err = CompiledFormula::parse("3 + * 4").unwrap_err();
        match err {
            TestError::FormulaSyntax { offset, .. } => assert_eq!(offset, 4),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_name_is_a_syntax_error() {
        let err = CompiledFormula::parse("2 * FrobnicationCount").unwrap_err();
        match err {
            TestError::FormulaSyntax { offset, message } => {
                assert_eq!(offset, 4);
                assert!(message.contains("FrobnicationCount"));
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn division_by_zero_is_a_domain_error() {
        let formula = CompiledFormula::parse("1 / (WordCount - 100)").unwrap();
        let err = formula.evaluate(&context(), None, "custom").unwrap_err();
        assert!(matches!(err, TestError::ArithmeticDomain { .. }));
    }

    #[test]
    fn negative_sqrt_is_a_domain_error() {
        let formula = CompiledFormula::parse("SQRT(0 - 4)").unwrap();
        let err = formula.evaluate(&context(), None, "custom").unwrap_err();
        assert!(matches!(err, TestError::ArithmeticDomain { .. }));
    }

    #[test]
    fn grade_range_pack_round_trip() {
        for (lower, upper) in [(0, 0), (1, 4), (7, 8), (13, 15), (16, 19), (u32::MAX, u32::MAX)] {
            assert_eq!(unpack_grade_range(pack_grade_range(lower, upper)), (lower, upper));
        }
    }

    #[test]
    fn packed_real_grades_are_f64_safe() {
        let packed = pack_grade_range(16, 19);
        assert!(packed < (1 << 37));
        let through_f64 = packed as f64 as u64;
        assert_eq!(through_f64, packed);
    }

    #[test]
    fn syllable_count_honors_the_numeral_policy() {
        let mut ctx = context();
        ctx.stats.all.syllables_numerals_full = 180;
        ctx.stats.all.syllables_numerals_ignored = 130;
        let formula = CompiledFormula::parse("SyllableCount").unwrap();
        assert_eq!(formula.evaluate(&ctx, None, "t").unwrap(), 150.0);
        ctx.numeral_policy = NumeralSyllabication::FullySyllabized;
        assert_eq!(formula.evaluate(&ctx, None, "t").unwrap(), 180.0);
        ctx.numeral_policy = NumeralSyllabication::Ignored;
        assert_eq!(formula.evaluate(&ctx, None, "t").unwrap(), 130.0);
    }

    #[test]
    fn statistic_lookup_by_plain_name() {
        let ctx = context();
        assert_eq!(statistic_value("words", &ctx), Some(100.0));
        assert_eq!(statistic_value("WordCount", &ctx), Some(100.0));
        assert_eq!(statistic_value("sentence-units", &ctx), Some(8.0));
        assert_eq!(statistic_value("Syllables", &ctx), Some(150.0));
        assert_eq!(statistic_value("frobnications", &ctx), None);
    }

    #[test]
    fn custom_hard_word_counts_take_priority() {
        let mut ctx = context();
        ctx.hard_words.fog.all.total = 7;
        let counts = StandardCounts {
            all: crate::hard_words::UnfamiliarCounts { unique: 3, total: 12 },
            valid: crate::hard_words::UnfamiliarCounts { unique: 3, total: 12 },
        };
        let formula = CompiledFormula::parse("HardWordCount").unwrap();
        assert_eq!(formula.evaluate(&ctx, Some(&counts), "t").unwrap(), 12.0);
        assert_eq!(formula.evaluate(&ctx, None, "t").unwrap(), 7.0);
    }
}
