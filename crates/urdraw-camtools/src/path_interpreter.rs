//! SVG path data interpreter.
//!
//! Turns the token stream of a `d` attribute into absolute `Move`/`Line`
//! commands. All parser state lives in [`ParserState`] and is advanced one
//! command at a time by [`PathInterpreter::step`], so a partially consumed
//! path can be inspected at any point.
//!
//! Bad input never aborts a path. Unknown tokens are skipped individually, a
//! command with a malformed operand is skipped as a whole, and a command cut
//! short by the end of data or by the next letter is dropped. Every skip is
//! reported as a [`PathDataError`].

use crate::error::PathDataError;
use crate::flattener::CurveFlattener;
use crate::path_tokenizer::{split_flag, tokenize_spanned, PathToken};
use std::ops::Range;
use urdraw_core::{DrawCommand, Point};

/// Control point remembered for smooth-curve reflection.
///
/// `S` only reflects a cubic handle and `T` only a quadratic one; any other
/// command clears it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LastControl {
    Cubic(Point),
    Quadratic(Point),
}

/// Cursor over a tokenized path
#[derive(Debug, Clone)]
pub struct ParserState {
    tokens: Vec<PathToken>,
    /// Source text and token spans, needed to split compact arc flags
    source: String,
    spans: Vec<Range<usize>>,
    position: usize,
    current_command: Option<char>,
    current_point: Point,
    subpath_start: Point,
    subpath_open: bool,
    last_control: Option<LastControl>,
}

impl ParserState {
    pub fn new(data: &str) -> Self {
        let (tokens, spans) = tokenize_spanned(data).into_iter().unzip();
        Self {
            source: data.to_string(),
            spans,
            ..Self::from_tokens(tokens)
        }
    }

    /// Cursor over already tokenized input. Without the source text, arc
    /// flags must be separated from the following number.
    pub fn from_tokens(tokens: Vec<PathToken>) -> Self {
        Self {
            tokens,
            source: String::new(),
            spans: Vec::new(),
            position: 0,
            current_command: None,
            current_point: Point::default(),
            subpath_start: Point::default(),
            subpath_open: false,
            last_control: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_command(&self) -> Option<char> {
        self.current_command
    }

    pub fn current_point(&self) -> Point {
        self.current_point
    }

    pub fn subpath_start(&self) -> Point {
        self.subpath_start
    }

    pub fn last_control(&self) -> Option<LastControl> {
        self.last_control
    }

    fn peek(&self) -> Option<&PathToken> {
        self.tokens.get(self.position)
    }

    /// Absolute point from a coordinate pair, honoring relative commands
    fn resolve(&self, relative: bool, x: f64, y: f64) -> Point {
        if relative {
            self.current_point.offset(&Point::new(x, y))
        } else {
            Point::new(x, y)
        }
    }

    /// If the current token is a number glued to an arc flag, split it in two
    fn split_arc_flag(&mut self) {
        if !matches!(self.peek(), Some(PathToken::Number(_))) {
            return;
        }
        let Some(span) = self.spans.get(self.position).cloned() else {
            return;
        };
        let Some((flag, rest)) = self.source.get(span.clone()).and_then(split_flag) else {
            return;
        };

        let rest_start = span.end - rest.len();
        let (rest_tokens, rest_spans): (Vec<_>, Vec<_>) = tokenize_spanned(rest)
            .into_iter()
            .map(|(token, r)| (token, rest_start + r.start..rest_start + r.end))
            .unzip();

        let at = self.position;
        self.tokens[at] = PathToken::Number(flag);
        self.spans[at] = span.start..rest_start;
        self.tokens.splice(at + 1..at + 1, rest_tokens);
        self.spans.splice(at + 1..at + 1, rest_spans);
    }

    /// Consume up to `arity` operands for `command`
    fn take_operands(&mut self, command: char, arity: usize) -> Operands {
        let mut values = Vec::with_capacity(arity);
        let mut malformed = None;
        for slot in 0..arity {
            // Large-arc and sweep flags
            if command.eq_ignore_ascii_case(&'a') && (slot == 3 || slot == 4) {
                self.split_arc_flag();
            }
            match self.tokens.get(self.position) {
                Some(PathToken::Number(v)) => values.push(*v),
                Some(PathToken::Unknown(token)) => {
                    if malformed.is_none() {
                        malformed = Some(PathDataError::MalformedOperand {
                            command,
                            token: token.clone(),
                            position: self.position,
                        });
                    }
                    values.push(f64::NAN);
                }
                Some(PathToken::Command(_)) | None => {
                    return Operands::Truncated(PathDataError::TruncatedCommand {
                        command,
                        expected: arity,
                        found: values.len(),
                    });
                }
            }
            self.position += 1;
        }
        match malformed {
            Some(err) => Operands::Malformed(err),
            None => Operands::Complete(values),
        }
    }
}

enum Operands {
    Complete(Vec<f64>),
    Malformed(PathDataError),
    Truncated(PathDataError),
}

/// Number of operands one repetition of a command consumes
pub fn command_arity(command: char) -> usize {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => 2,
        'H' | 'V' => 1,
        'S' | 'Q' => 4,
        'C' => 6,
        'A' => 7,
        _ => 0,
    }
}

/// Commands produced from one `d` attribute, plus what was skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathParse {
    pub commands: Vec<DrawCommand>,
    pub diagnostics: Vec<PathDataError>,
}

impl PathParse {
    /// No input was skipped
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Interprets path data, flattening curves as it goes
#[derive(Debug, Clone, Default)]
pub struct PathInterpreter {
    flattener: CurveFlattener,
}

impl PathInterpreter {
    pub fn new(flattener: CurveFlattener) -> Self {
        Self { flattener }
    }

    /// Interpret a complete `d` attribute
    pub fn interpret(&self, data: &str) -> PathParse {
        let mut state = ParserState::new(data);
        let mut parse = PathParse::default();
        while self.step(&mut state, &mut parse) {}

        for diagnostic in &parse.diagnostics {
            tracing::warn!("Path data: {}", diagnostic);
        }
        tracing::debug!(
            "Interpreted path into {} commands ({} skipped inputs)",
            parse.commands.len(),
            parse.diagnostics.len()
        );
        parse
    }

    /// Advance by one token group. Returns `false` once the input is exhausted.
    pub fn step(&self, state: &mut ParserState, out: &mut PathParse) -> bool {
        let Some(token) = state.peek().cloned() else {
            return false;
        };

        match token {
            PathToken::Command(c) => {
                state.position += 1;
                state.current_command = Some(c);
                if c.eq_ignore_ascii_case(&'z') {
                    close_subpath(state, out);
                }
            }
            PathToken::Unknown(text) => {
                out.diagnostics.push(PathDataError::UnknownToken {
                    token: text,
                    position: state.position,
                });
                state.position += 1;
            }
            PathToken::Number(_) => {
                let command = match state.current_command {
                    Some(c) if !c.eq_ignore_ascii_case(&'z') => c,
                    _ => {
                        out.diagnostics.push(PathDataError::MissingCommand {
                            position: state.position,
                        });
                        state.position += 1;
                        return true;
                    }
                };

                match state.take_operands(command, command_arity(command)) {
                    Operands::Complete(values) => self.execute(command, &values, state, out),
                    Operands::Malformed(err) | Operands::Truncated(err) => {
                        out.diagnostics.push(err)
                    }
                }

                // Extra coordinate pairs after a move are implicit line-tos
                match command {
                    'M' => state.current_command = Some('L'),
                    'm' => state.current_command = Some('l'),
                    _ => {}
                }
            }
        }
        true
    }

    fn execute(&self, command: char, v: &[f64], state: &mut ParserState, out: &mut PathParse) {
        let relative = command.is_ascii_lowercase();
        let upper = command.to_ascii_uppercase();

        if upper == 'M' {
            let target = state.resolve(relative, v[0], v[1]);
            out.commands.push(DrawCommand::Move(target));
            state.current_point = target;
            state.subpath_start = target;
            state.subpath_open = true;
            state.last_control = None;
            return;
        }

        open_implicit_subpath(state, out);
        let from = state.current_point;

        let (end, last_control) = match upper {
            'L' => {
                let end = state.resolve(relative, v[0], v[1]);
                out.commands.push(DrawCommand::Line(end));
                (end, None)
            }
            'H' => {
                let x = if relative { from.x + v[0] } else { v[0] };
                let end = Point::new(x, from.y);
                out.commands.push(DrawCommand::Line(end));
                (end, None)
            }
            'V' => {
                let y = if relative { from.y + v[0] } else { v[0] };
                let end = Point::new(from.x, y);
                out.commands.push(DrawCommand::Line(end));
                (end, None)
            }
            'C' => {
                let ctrl1 = state.resolve(relative, v[0], v[1]);
                let ctrl2 = state.resolve(relative, v[2], v[3]);
                let end = state.resolve(relative, v[4], v[5]);
                push_lines(out, self.flattener.cubic(from, ctrl1, ctrl2, end));
                (end, Some(LastControl::Cubic(ctrl2)))
            }
            'S' => {
                let ctrl1 = match state.last_control {
                    Some(LastControl::Cubic(previous)) => from.reflect(&previous),
                    _ => from,
                };
                let ctrl2 = state.resolve(relative, v[0], v[1]);
                let end = state.resolve(relative, v[2], v[3]);
                push_lines(out, self.flattener.cubic(from, ctrl1, ctrl2, end));
                (end, Some(LastControl::Cubic(ctrl2)))
            }
            'Q' => {
                let ctrl = state.resolve(relative, v[0], v[1]);
                let end = state.resolve(relative, v[2], v[3]);
                push_lines(out, self.flattener.quadratic(from, ctrl, end));
                (end, Some(LastControl::Quadratic(ctrl)))
            }
            'T' => {
                let ctrl = match state.last_control {
                    Some(LastControl::Quadratic(previous)) => from.reflect(&previous),
                    _ => from,
                };
                let end = state.resolve(relative, v[0], v[1]);
                push_lines(out, self.flattener.quadratic(from, ctrl, end));
                (end, Some(LastControl::Quadratic(ctrl)))
            }
            'A' => {
                let end = state.resolve(relative, v[5], v[6]);
                let points = self
                    .flattener
                    .arc(from, v[0], v[1], v[2], v[3] != 0.0, v[4] != 0.0, end);
                push_lines(out, points);
                (end, None)
            }
            _ => return,
        };

        state.current_point = end;
        state.last_control = last_control;
    }
}

/// Drawing without a preceding move starts a subpath at the current point
fn open_implicit_subpath(state: &mut ParserState, out: &mut PathParse) {
    if !state.subpath_open {
        out.commands.push(DrawCommand::Move(state.current_point));
        state.subpath_start = state.current_point;
        state.subpath_open = true;
    }
}

fn close_subpath(state: &mut ParserState, out: &mut PathParse) {
    if state.current_point != state.subpath_start {
        out.commands.push(DrawCommand::Line(state.subpath_start));
    }
    state.current_point = state.subpath_start;
    state.last_control = None;
}

fn push_lines(out: &mut PathParse, points: Vec<Point>) {
    out.commands.extend(points.into_iter().map(DrawCommand::Line));
}
