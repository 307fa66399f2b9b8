use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::{fmt, ops};

use crate::format;

/// Exponents of the seven SI base quantities.
///
/// Dimensions form an additive group under `+`/`-` and are scaled by plain
/// numbers with `*`/`/`. Two dimensions are equal only when every component
/// matches exactly; there is no tolerance.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dimension {
    pub length: f64,
    pub mass: f64,
    pub time: f64,
    pub current: f64,
    pub temperature: f64,
    pub amount: f64,
    pub intensity: f64,
}

const SYMBOLS: [&str; 7] = ["L", "M", "T", "I", "Θ", "N", "J"];
const LATEX_SYMBOLS: [&str; 7] = ["L", "M", "T", "I", "\\theta", "N", "J"];

impl Dimension {
    pub const DIMENSIONLESS: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    pub const LENGTH: Self = Self::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    pub const MASS: Self = Self::new(0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    pub const TIME: Self = Self::new(0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
    pub const CURRENT: Self = Self::new(0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0);
    pub const TEMPERATURE: Self = Self::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    pub const AMOUNT: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0);
    pub const INTENSITY: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0);

    pub const fn new(
        length: f64,
        mass: f64,
        time: f64,
        current: f64,
        temperature: f64,
        amount: f64,
        intensity: f64,
    ) -> Self {
        Self {
            length,
            mass,
            time,
            current,
            temperature,
            amount,
            intensity,
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMENSIONLESS
    }

    /// Components in declaration order (L, M, T, I, Θ, N, J).
    pub fn components(&self) -> [f64; 7] {
        [
            self.length,
            self.mass,
            self.time,
            self.current,
            self.temperature,
            self.amount,
            self.intensity,
        ]
    }

    fn from_components(c: [f64; 7]) -> Self {
        Self::new(c[0], c[1], c[2], c[3], c[4], c[5], c[6])
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_components(self.components().map(f))
    }

    fn zip_with(self, rhs: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let (a, b) = (self.components(), rhs.components());
        Self::from_components(std::array::from_fn(|i| f(a[i], b[i])))
    }

    fn terms<'a>(&self, symbols: &'a [&'a str; 7]) -> impl Iterator<Item = (&'a str, f64)> {
        symbols.iter().copied().zip(self.components())
    }

    pub fn to_latex(&self) -> String {
        let formula = format::latex_formula(self.terms(&LATEX_SYMBOLS), 1.0);
        format!("$\\mathrm{{Dimension\\left[ {formula} \\right]}}$")
    }
}

/// Total comparison of two floats that agrees with `==` (so `-0.0` and `0.0`
/// compare equal); NaN falls back to `total_cmp`.
pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Bit pattern of a float with negative zero folded into positive zero.
pub(crate) fn f64_key(x: f64) -> u64 {
    (x + 0.0).to_bits()
}

impl PartialEq for Dimension {
    fn eq(&self, other: &Self) -> bool {
        self.components() == other.components()
    }
}

impl Eq for Dimension {}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.components() {
            f64_key(c).hash(state);
        }
    }
}

impl PartialOrd for Dimension {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Dimension {
    fn cmp(&self, other: &Self) -> Ordering {
        self.components()
            .into_iter()
            .zip(other.components())
            .map(|(a, b)| cmp_f64(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl ops::Add for Dimension {
    type Output = Dimension;
    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl ops::Sub for Dimension {
    type Output = Dimension;
    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl ops::Neg for Dimension {
    type Output = Dimension;
    fn neg(self) -> Self::Output {
        self.map(|a| -a)
    }
}

impl ops::Mul<f64> for Dimension {
    type Output = Dimension;
    fn mul(self, rhs: f64) -> Self::Output {
        self.map(|a| a * rhs)
    }
}

impl ops::Mul<Dimension> for f64 {
    type Output = Dimension;
    fn mul(self, rhs: Dimension) -> Self::Output {
        rhs * self
    }
}

impl ops::Div<f64> for Dimension {
    type Output = Dimension;
    fn div(self, rhs: f64) -> Self::Output {
        self.map(|a| a / rhs)
    }
}

/// Component-wise product.
impl ops::Mul for Dimension {
    type Output = Dimension;
    fn mul(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a * b)
    }
}

/// Component-wise quotient.
impl ops::Div for Dimension {
    type Output = Dimension;
    fn div(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a / b)
    }
}

impl std::iter::Sum for Dimension {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::DIMENSIONLESS, |acc, d| acc + d)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::plain_formula(self.terms(&SYMBOLS), 1.0, None))
    }
}
