// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The cQASM type lattice and the single-character parameter-type shorthand
// used when registering instructions and error models.

use std::fmt;

use boolenum::BoolEnum;
use thiserror::Error;

/// Whether an operand slot of this type accepts an lvalue, i.e. may be
/// mutated by the instruction. Qubits are always references, so `Qubit`
/// carries no flag.
#[derive(BoolEnum, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IsAssignable {
    True,
    False,
}

/// Matrix dimensions as constrained by a type. A negative count means
/// unconstrained.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MatrixDims {
    pub num_rows: i64,
    pub num_cols: i64,
}

impl MatrixDims {
    pub fn new(num_rows: i64, num_cols: i64) -> MatrixDims {
        MatrixDims { num_rows, num_cols }
    }

    pub fn unconstrained() -> MatrixDims {
        MatrixDims {
            num_rows: -1,
            num_cols: -1,
        }
    }

    /// Whether a concrete shape satisfies this constraint.
    pub fn matches(&self, num_rows: usize, num_cols: usize) -> bool {
        (self.num_rows < 0 || self.num_rows == num_rows as i64)
            && (self.num_cols < 0 || self.num_cols == num_cols as i64)
    }
}

/// A cQASM type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Qubit,
    Bool(IsAssignable),
    Axis(IsAssignable),
    Int(IsAssignable),
    Real(IsAssignable),
    Complex(IsAssignable),
    RealMatrix(MatrixDims, IsAssignable),
    ComplexMatrix(MatrixDims, IsAssignable),
    String(IsAssignable),
    Json(IsAssignable),
}

impl Type {
    /// Returns `true` if operand slots of this type accept an lvalue.
    pub fn is_assignable(&self) -> bool {
        use Type::*;
        match self {
            Qubit => true,
            Bool(assignable)
            | Axis(assignable)
            | Int(assignable)
            | Real(assignable)
            | Complex(assignable)
            | RealMatrix(_, assignable)
            | ComplexMatrix(_, assignable)
            | String(assignable)
            | Json(assignable) => matches!(*assignable, IsAssignable::True),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Qubit => "qubit",
            Type::Bool(_) => "bool",
            Type::Axis(_) => "axis",
            Type::Int(_) => "int",
            Type::Real(_) => "real",
            Type::Complex(_) => "complex",
            Type::RealMatrix(..) => "real matrix",
            Type::ComplexMatrix(..) => "complex matrix",
            Type::String(_) => "string",
            Type::Json(_) => "json",
        };
        write!(f, "{name}")
    }
}

/// An unknown character in a parameter-type shorthand string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown type code `{0}` in parameter type specification")]
pub struct SpecError(pub char);

/// Parses the parameter-type shorthand: one character per parameter.
///
/// - `q` = qubit
/// - `a` = axis (x, y, or z)
/// - `b` = bit/boolean
/// - `i` = integer
/// - `r` = real
/// - `c` = complex
/// - `u` = complex matrix of size 2^n by 2^n, where n is the number of
///   qubits in the parameter list
/// - `s` = (quoted) string
/// - `j` = json
///
/// An uppercase character marks the parameter as assignable (mutated by
/// the instruction).
pub fn from_spec(spec: &str) -> Result<Vec<Type>, SpecError> {
    let num_qubits = spec.chars().filter(|c| matches!(c, 'q' | 'Q')).count() as u32;
    let mut types = Vec::with_capacity(spec.len());
    for c in spec.chars() {
        let assignable = IsAssignable::from(c.is_ascii_uppercase());
        let typ = match c.to_ascii_lowercase() {
            'q' => Type::Qubit,
            'a' => Type::Axis(assignable),
            'b' => Type::Bool(assignable),
            'i' => Type::Int(assignable),
            'r' => Type::Real(assignable),
            'c' => Type::Complex(assignable),
            's' => Type::String(assignable),
            'j' => Type::Json(assignable),
            'u' => {
                let dim = 1i64 << num_qubits;
                Type::ComplexMatrix(MatrixDims::new(dim, dim), assignable)
            }
            _ => return Err(SpecError(c)),
        };
        types.push(typ);
    }
    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spec_basic() {
        let types = from_spec("qbr").unwrap();
        assert_eq!(
            types,
            vec![
                Type::Qubit,
                Type::Bool(IsAssignable::False),
                Type::Real(IsAssignable::False),
            ]
        );
    }

    #[test]
    fn test_from_spec_uppercase_is_assignable() {
        let types = from_spec("qB").unwrap();
        assert_eq!(types, vec![Type::Qubit, Type::Bool(IsAssignable::True)]);
        assert!(types[1].is_assignable());
    }

    #[test]
    fn test_from_spec_unitary_size_follows_qubit_count() {
        // Two qubits, so the matrix must be 4x4.
        let types = from_spec("qqu").unwrap();
        assert_eq!(
            types[2],
            Type::ComplexMatrix(MatrixDims::new(4, 4), IsAssignable::False)
        );
        // Uppercase qubits count as well.
        let types = from_spec("Qu").unwrap();
        assert_eq!(
            types[1],
            Type::ComplexMatrix(MatrixDims::new(2, 2), IsAssignable::False)
        );
    }

    #[test]
    fn test_from_spec_rejects_unknown_codes() {
        assert_eq!(from_spec("qx"), Err(SpecError('x')));
    }

    #[test]
    fn test_matrix_dims_wildcards() {
        assert!(MatrixDims::unconstrained().matches(3, 7));
        assert!(MatrixDims::new(2, -1).matches(2, 9));
        assert!(!MatrixDims::new(2, -1).matches(3, 9));
        assert!(MatrixDims::new(2, 2).matches(2, 2));
    }
}
