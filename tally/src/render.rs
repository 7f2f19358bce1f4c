//! Renderer
//!
//! Turns evaluated lines into the markup shown next to the editor: one `div`
//! per line holding the tokenized code and a hint with the result or error.

use crate::line::{INDENT_UNIT, Line};
use std::fmt::{self, Write};
use tally_interpreter::{Oracle, Value};

/// How a line's hint is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Nothing worth showing
    Empty,
    Error,
    Result,
}

impl LineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineType::Empty => "empty",
            LineType::Error => "error",
            LineType::Result => "result",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Number,
    Operator,
    String,
    Comment,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Number => "number",
            TokenClass::Operator => "operator",
            TokenClass::String => "string",
            TokenClass::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub class: TokenClass,
    pub text: String,
}

/// Render model for one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub line_type: LineType,
    pub highlight: bool,
    pub tokens: Vec<Token>,

    /// Text placed before the hint, `" "` or `" // "` for errors
    pub prefix: String,

    /// Hint text: the formatted result or the error message
    pub data: String,
}

impl RenderedLine {
    /// Write the markup fragment for this line
    pub fn write_markup(&self, out: &mut String) {
        let highlight = if self.highlight { " highlight" } else { "" };
        let _ = write!(out, "<div class=\"{}{}\">", self.line_type, highlight);

        let mut first = true;
        for token in &self.tokens {
            if !first {
                out.push_str("&nbsp;");
            }
            first = false;
            let _ = write!(
                out,
                "<span class=\"code {}\" data-code=\"{}\"></span>",
                token.class.as_str(),
                escape(&token.text)
            );
        }

        let _ = write!(
            out,
            "<span class=\"flex-1\"></span><span class=\"hint\" data-prefix=\"{}\">{}</span></div>",
            escape(&self.prefix),
            escape(&self.data)
        );
    }
}

/// Renders lines into markup
#[derive(Debug, Clone)]
pub struct Renderer {
    precision: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Renderer {
    /// Renderer showing numbers rounded to `precision` decimal places
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    pub fn render<O>(&self, lines: &[Line], oracle: &O) -> String
    where
        O: Oracle + ?Sized,
    {
        let mut markup = String::new();
        for rendered in self.render_model(lines, oracle) {
            rendered.write_markup(&mut markup);
        }
        markup
    }

    /// Plain-text rendering: each line of code followed by its hint
    pub fn render_text<O>(&self, lines: &[Line], oracle: &O) -> String
    where
        O: Oracle + ?Sized,
    {
        let width = lines
            .iter()
            .map(|line| line.code.chars().count())
            .max()
            .unwrap_or(0);

        let mut text = String::new();
        for (line, rendered) in lines.iter().zip(self.render_model(lines, oracle)) {
            let code = &line.code;
            let _ = match rendered.line_type {
                LineType::Empty => writeln!(text, "{code}"),
                LineType::Result => writeln!(text, "{code:<width$}  = {}", rendered.data),
                LineType::Error => writeln!(text, "{code:<width$}  // {}", rendered.data),
            };
        }
        text
    }

    pub fn render_model<O>(&self, lines: &[Line], oracle: &O) -> Vec<RenderedLine>
    where
        O: Oracle + ?Sized,
    {
        lines
            .iter()
            .map(|line| self.render_line(line, lines, oracle))
            .collect()
    }

    fn render_line<O>(&self, line: &Line, lines: &[Line], oracle: &O) -> RenderedLine
    where
        O: Oracle + ?Sized,
    {
        let line_type = classify(line, lines, oracle);

        let mut code = if line.code.is_empty() {
            " ".to_string()
        } else {
            line.code.clone()
        };
        for _ in 0..line.indent {
            code = mark_indent(&code);
        }

        // Checked after marking, so an indented comment is split like code
        let tokens = if code.trim().starts_with('#') {
            vec![Token {
                class: TokenClass::Comment,
                text: code,
            }]
        } else {
            code.split(' ')
                .map(|text| Token {
                    class: classify_token(text),
                    text: text.to_string(),
                })
                .collect()
        };

        let data = match line_type {
            LineType::Result => line
                .result
                .as_ref()
                .map(|value| format_value(value, self.precision))
                .unwrap_or_default(),
            LineType::Error => line.error.clone(),
            LineType::Empty => String::new(),
        };

        RenderedLine {
            line_type,
            highlight: line.is_selected(),
            tokens,
            prefix: if line_type == LineType::Error { " // " } else { " " }.to_string(),
            data: data.replace('\n', "\\n"),
        }
    }
}

/// Decide how a line's hint is shown
pub fn classify<O>(line: &Line, lines: &[Line], oracle: &O) -> LineType
where
    O: Oracle + ?Sized,
{
    if line.has_error() {
        let child_failed = line.is_block()
            && line
                .children
                .iter()
                .any(|&child| lines.get(child).is_some_and(Line::has_error));

        return if line.is_selected() || child_failed {
            LineType::Empty
        } else {
            LineType::Error
        };
    }

    if line.is_block() {
        return LineType::Result;
    }
    if line.result.is_none() {
        return LineType::Empty;
    }
    if line
        .parsed
        .as_ref()
        .is_some_and(|parsed| oracle.is_declaration(parsed))
    {
        return LineType::Empty;
    }
    LineType::Result
}

/// Classify one space-separated token of code
pub fn classify_token(token: &str) -> TokenClass {
    if numeric_token(token).is_some_and(|n| n != 0.0 && !n.is_nan()) {
        TokenClass::Number
    } else if token.to_lowercase() == token.to_uppercase() {
        TokenClass::Operator
    } else {
        TokenClass::String
    }
}

/// Numeric reading of a token, accepting decimal, scientific and hex forms
fn numeric_token(token: &str) -> Option<f64> {
    let (sign, digits) = match token.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, token.strip_prefix('+').unwrap_or(token)),
    };

    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        // Hex digits never carry a sign
        if sign < 0.0 || digits.len() != token.len() {
            return None;
        }
        return u64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }

    if digits == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    // Rejects spellings like `inf` and `NaN` that only Rust would accept
    if digits
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }
    digits.parse::<f64>().ok().map(|n| sign * n)
}

/// Replace the first indentation unit not yet marked with `| `
fn mark_indent(code: &str) -> String {
    for (position, _) in code.char_indices() {
        let rest = &code[position..];
        if let Some(tail) = rest.strip_prefix("| ").and_then(|r| r.strip_prefix(INDENT_UNIT)) {
            return format!("{}| | {}", &code[..position], tail);
        }
        if let Some(tail) = rest.strip_prefix(INDENT_UNIT) {
            return format!("{}| {}", &code[..position], tail);
        }
    }
    code.to_string()
}

/// Display form of a line result
pub fn format_value(value: &Value, precision: usize) -> String {
    match value {
        Value::Number(n) => format_number(*n, precision),
        other => other.to_string(),
    }
}

/// Round to `precision` decimal places and drop trailing zeros
///
/// Magnitudes of at least 1e21, or below 1e-6, switch to exponent form such
/// as `1e+21` or `1.5e-7`.
pub fn format_number(n: f64, precision: usize) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let mut text = format!("{n:.precision$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    let rounded = text.parse::<f64>().unwrap_or(n);
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.abs() >= 1e21 || rounded.abs() < 1e-6 {
        return exponent_form(rounded);
    }
    text
}

/// Shortest exponent form with an explicit sign on the exponent
fn exponent_form(n: f64) -> String {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}

/// Escape text for use inside markup and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
