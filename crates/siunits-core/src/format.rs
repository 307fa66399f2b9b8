//! Rendering of units, quantities and dimensions as plain text or LaTeX.
//!
//! The algebra never depends on these strings; they exist for `Display` and
//! for callers that want a specific style or number precision.

use itertools::Itertools;

use crate::complex::ComplexUnit;

pub const SMALL_SPACE: &str = "\u{2009}";
pub const MULTIPLY_SIGN: &str = "\u{22C5}";
pub const LATEX_SMALL_SPACE: &str = r" \, ";
pub const LATEX_MULTIPLY_SIGN: &str = r" \cdot ";

/// Magnitude from which numbers switch to scientific notation.
const SCIENTIFIC_THRESHOLD: f64 = 1e8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatStyle {
    /// `kg⋅m / s^2`
    #[default]
    Plain,
    /// `kg⋅m / s²`
    Unicode,
    /// `$\mathrm {\dfrac{kg \cdot m}{s^{2}}}$`
    Latex,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Digits after the decimal point for non-integer numbers.
    pub precision: Option<usize>,
    pub style: FormatStyle,
}

impl FormatOptions {
    pub fn latex() -> Self {
        Self {
            style: FormatStyle::Latex,
            ..Default::default()
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }
}

pub fn format_unit(unit: &ComplexUnit, options: &FormatOptions) -> String {
    match options.style {
        FormatStyle::Plain => format_plain(unit, options.precision),
        FormatStyle::Unicode => {
            let parts = split(records(unit), |exp| {
                superscript(exp).unwrap_or_else(|| format!("^{}", pretty(exp, None, false)))
            });
            fraction(parts, SMALL_SPACE, unit.multiplier(), options.precision)
        }
        FormatStyle::Latex => format_latex_with(unit, options.precision),
    }
}

/// `kg⋅m / s^2`, with the multiplier in front when it is not 1.
pub fn format_plain(unit: &ComplexUnit, precision: Option<usize>) -> String {
    plain_formula(records(unit), unit.multiplier(), precision)
}

pub fn format_latex(unit: &ComplexUnit) -> String {
    format_latex_with(unit, None)
}

fn format_latex_with(unit: &ComplexUnit, precision: Option<usize>) -> String {
    format!("$\\mathrm {{{}}}$", latex_body(unit, precision))
}

fn latex_body(unit: &ComplexUnit, precision: Option<usize>) -> String {
    let terms = unit
        .records()
        .iter()
        .map(|(u, exp)| (u.latex_symbol(), exp));
    latex_formula_with(terms, unit.multiplier(), precision)
}

/// `value unit`; just the value when the unit has no records.
pub fn format_quantity(value: f64, unit: &ComplexUnit, options: &FormatOptions) -> String {
    let latex = options.style == FormatStyle::Latex;
    let value = pretty(value, options.precision, latex);
    if unit.records().is_empty() {
        return if latex { format!("$\\mathrm {{{value}}}$") } else { value };
    }
    if latex {
        let body = latex_body(&unit.with_multiplier(1.0), options.precision);
        format!("$\\mathrm {{{value}{LATEX_SMALL_SPACE}{body}}}$")
    } else {
        format!("{value} {}", format_unit(&unit.with_multiplier(1.0), options))
    }
}

fn records(unit: &ComplexUnit) -> impl Iterator<Item = (&str, f64)> {
    unit.records().iter().map(|(u, exp)| (u.symbol(), exp))
}

/// Splits terms into numerator and denominator, rendering each with
/// `render_exponent` when its absolute exponent is not 1.
fn split<'a>(
    terms: impl IntoIterator<Item = (&'a str, f64)>,
    render_exponent: impl Fn(f64) -> String,
) -> (Vec<String>, Vec<String>) {
    let mut front = Vec::new();
    let mut back = Vec::new();
    for (symbol, exp) in terms {
        let (side, exp) = match exp {
            e if e > 0.0 => (&mut front, e),
            e if e < 0.0 => (&mut back, -e),
            _ => continue,
        };
        if exp == 1.0 {
            side.push(symbol.to_string());
        } else {
            side.push(format!("{symbol}{}", render_exponent(exp)));
        }
    }
    (front, back)
}

fn fraction(
    (front, back): (Vec<String>, Vec<String>),
    space: &str,
    multiplier: f64,
    precision: Option<usize>,
) -> String {
    let sep = format!("{space}{MULTIPLY_SIGN}{space}");
    let lead = pretty(multiplier, precision, false);
    let prefixed = |formula: String| {
        if multiplier != 1.0 {
            format!("{lead}{space}{formula}")
        } else {
            formula
        }
    };
    match (front.is_empty(), back.is_empty()) {
        (false, false) => prefixed(format!(
            "{}{space}/{space}{}",
            front.join(&sep),
            back.join(&sep)
        )),
        (false, true) => prefixed(front.join(&sep)),
        (true, false) => format!("{lead}{space}/{space}{}", back.join(&sep)),
        (true, true) => lead,
    }
}

pub(crate) fn plain_formula<'a>(
    terms: impl IntoIterator<Item = (&'a str, f64)>,
    multiplier: f64,
    precision: Option<usize>,
) -> String {
    let parts = split(terms, |exp| format!("^{}", pretty(exp, None, false)));
    fraction(parts, SMALL_SPACE, multiplier, precision)
}

pub(crate) fn latex_formula<'a>(
    terms: impl IntoIterator<Item = (&'a str, f64)>,
    multiplier: f64,
) -> String {
    latex_formula_with(terms, multiplier, None)
}

fn latex_formula_with<'a>(
    terms: impl IntoIterator<Item = (&'a str, f64)>,
    multiplier: f64,
    precision: Option<usize>,
) -> String {
    let (front, back) = split(terms, |exp| format!("^{{{}}}", pretty(exp, None, true)));
    let lead = pretty(multiplier, precision, true);
    let num = front.iter().join(LATEX_MULTIPLY_SIGN);
    let den = back.iter().join(LATEX_MULTIPLY_SIGN);
    let prefixed = |formula: String| {
        if multiplier != 1.0 {
            format!("{lead}{LATEX_SMALL_SPACE}{formula}")
        } else {
            formula
        }
    };
    match (front.is_empty(), back.is_empty()) {
        (false, false) => prefixed(format!("\\dfrac{{{num}}}{{{den}}}")),
        (false, true) => prefixed(num),
        (true, false) => format!("\\dfrac{{{lead}}}{{{den}}}"),
        (true, true) => lead,
    }
}

/// Human-friendly number: integral values without a fraction, scientific
/// notation from 1e8 upwards, `\times 10^{n}` instead of `e` for LaTeX.
pub fn pretty(n: f64, precision: Option<usize>, latex: bool) -> String {
    let formatted = if !n.is_finite() {
        n.to_string()
    } else if n.abs() >= SCIENTIFIC_THRESHOLD {
        scientific(n, precision)
    } else if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else if let Some(p) = precision {
        let fixed = format!("{n:.p$}");
        let all_zero = fixed
            .split_once('.')
            .is_none_or(|(_, frac)| frac.bytes().all(|b| b == b'0'));
        if all_zero { scientific(n, precision) } else { fixed }
    } else {
        n.to_string()
    };

    match (latex, formatted.split_once('e')) {
        (true, Some((mantissa, exp))) => {
            let exp = exp.trim_start_matches('+');
            format!("{mantissa} \\times 10^{{{exp}}}")
        }
        _ => formatted,
    }
}

fn scientific(n: f64, precision: Option<usize>) -> String {
    let raw = match precision {
        Some(p) => format!("{n:.p$e}"),
        None => format!("{n:e}"),
    };
    match raw.split_once('e') {
        Some((mantissa, exp)) if mantissa.contains('.') => {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            format!("{mantissa}e{exp}")
        }
        _ => raw,
    }
}

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
const SUPERSCRIPT_MINUS: char = '⁻';
const SUPERSCRIPT_SLASH: char = '⸍';

/// Largest denominator tried when writing a fractional exponent.
const MAX_DENOMINATOR: i64 = 1000;

/// Superscript form of an exponent: integers directly, other values as the
/// nearest small fraction (`0.5` → `¹⸍²`). `None` when no fraction with a
/// denominator up to 1000 matches, or when the value does not fit an `i64`.
pub fn superscript(n: f64) -> Option<String> {
    fn digits(n: i64) -> String {
        let mut out = String::new();
        if n < 0 {
            out.push(SUPERSCRIPT_MINUS);
        }
        out.extend(
            n.unsigned_abs()
                .to_string()
                .bytes()
                .map(|b| SUPERSCRIPT_DIGITS[(b - b'0') as usize]),
        );
        out
    }

    if !n.is_finite() || n.abs() >= i64::MAX as f64 {
        return None;
    }
    if n.fract() == 0.0 {
        return Some(digits(n as i64));
    }
    (2..=MAX_DENOMINATOR).find_map(|den| {
        let num = (n * den as f64).round();
        ((num / den as f64 - n).abs() < 1e-9)
            .then(|| format!("{}{SUPERSCRIPT_SLASH}{}", digits(num as i64), digits(den)))
    })
}
