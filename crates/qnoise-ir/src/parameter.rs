//! Gate angles.
//!
//! An angle is either a concrete value or built from a named symbol that is
//! bound later. Noise only ever shifts or negates an angle, so those are the
//! only operations kept symbolic; everything else folds to a constant.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A gate angle, concrete or symbolic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterExpression {
    /// Concrete value in radians.
    Constant(f64),
    /// Named symbol bound later.
    Symbol(String),
    /// `-expr`
    Neg(Box<ParameterExpression>),
    /// `expr + delta`
    Offset(Box<ParameterExpression>, f64),
}

impl ParameterExpression {
    /// Concrete angle.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Symbolic angle.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParameterExpression::Symbol(name.into())
    }

    /// π.
    pub fn pi() -> Self {
        ParameterExpression::Constant(std::f64::consts::PI)
    }

    /// True if any symbol is still unbound.
    pub fn is_symbolic(&self) -> bool {
        self.as_f64().is_none()
    }

    /// Value in radians, if concrete.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Symbol(_) => None,
            ParameterExpression::Neg(inner) => inner.as_f64().map(|v| -v),
            ParameterExpression::Offset(inner, delta) => inner.as_f64().map(|v| v + delta),
        }
    }

    /// Unbound symbol names.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                ParameterExpression::Constant(_) => {}
                ParameterExpression::Symbol(name) => {
                    names.insert(name.clone());
                }
                ParameterExpression::Neg(inner) | ParameterExpression::Offset(inner, _) => {
                    stack.push(inner);
                }
            }
        }
        names
    }

    /// Substitute `value` for `name`, folding whatever becomes concrete.
    #[must_use]
    pub fn bind(&self, name: &str, value: f64) -> Self {
        let bound = match self {
            ParameterExpression::Symbol(n) if n == name => return Self::constant(value),
            ParameterExpression::Constant(_) | ParameterExpression::Symbol(_) => {
                return self.clone();
            }
            ParameterExpression::Neg(inner) => {
                ParameterExpression::Neg(Box::new(inner.bind(name, value)))
            }
            ParameterExpression::Offset(inner, delta) => {
                ParameterExpression::Offset(Box::new(inner.bind(name, value)), *delta)
            }
        };
        match bound.as_f64() {
            Some(v) => Self::constant(v),
            None => bound,
        }
    }

    /// Shift by `delta`.
    ///
    /// Concrete angles fold; offsets on a symbolic angle accumulate into one
    /// term.
    #[must_use]
    pub fn offset(&self, delta: f64) -> Self {
        match self {
            ParameterExpression::Offset(inner, d) => {
                ParameterExpression::Offset(inner.clone(), d + delta)
            }
            _ => match self.as_f64() {
                Some(v) => Self::constant(v + delta),
                None => ParameterExpression::Offset(Box::new(self.clone()), delta),
            },
        }
    }

    /// Negated angle.
    #[must_use]
    pub fn negated(&self) -> Self {
        match self {
            ParameterExpression::Neg(inner) => (**inner).clone(),
            _ => match self.as_f64() {
                Some(v) => Self::constant(-v),
                None => ParameterExpression::Neg(Box::new(self.clone())),
            },
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Symbol(name) => f.write_str(name),
            ParameterExpression::Neg(inner) => write!(f, "-{inner}"),
            ParameterExpression::Offset(inner, delta) if *delta < 0.0 => {
                write!(f, "({inner} - {})", -delta)
            }
            ParameterExpression::Offset(inner, delta) => write!(f, "({inner} + {delta})"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl From<&str> for ParameterExpression {
    fn from(name: &str) -> Self {
        Self::symbol(name)
    }
}
