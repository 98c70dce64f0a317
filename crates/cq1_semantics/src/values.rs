// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// cQASM values: constants known at analysis time plus the two runtime
// reference kinds (qubit and bit register selections). Value promotion is
// implemented here; it is the only coercion mechanism in the language.

use cq1_tree::{Annotated, Annotations, Axis, CMatrix, Complex, Many, Node, RMatrix};

use crate::types::{MatrixDims, Type};

macro_rules! impl_annotated {
    ($($name:ident),* $(,)?) => {
        $(
            impl Annotated for $name {
                fn meta(&self) -> &Annotations {
                    &self.meta
                }

                fn meta_mut(&mut self) -> &mut Annotations {
                    &mut self.meta
                }
            }
        )*
    };
}

/// A cQASM value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    ConstBool(ConstBool),
    ConstAxis(ConstAxis),
    ConstInt(ConstInt),
    ConstReal(ConstReal),
    ConstComplex(ConstComplex),
    ConstRealMatrix(ConstRealMatrix),
    ConstComplexMatrix(ConstComplexMatrix),
    ConstString(ConstString),
    ConstJson(ConstJson),
    QubitRefs(QubitRefs),
    BitRefs(BitRefs),
}

impl Value {
    /// The type of this value. Matrix types carry the concrete shape;
    /// register references report as assignable, constants do not.
    pub fn value_type(&self) -> Type {
        use crate::types::IsAssignable::{False, True};
        match self {
            Value::ConstBool(_) => Type::Bool(False),
            Value::ConstAxis(_) => Type::Axis(False),
            Value::ConstInt(_) => Type::Int(False),
            Value::ConstReal(_) => Type::Real(False),
            Value::ConstComplex(_) => Type::Complex(False),
            Value::ConstRealMatrix(matrix) => Type::RealMatrix(
                MatrixDims::new(
                    matrix.value.num_rows() as i64,
                    matrix.value.num_cols() as i64,
                ),
                False,
            ),
            Value::ConstComplexMatrix(matrix) => Type::ComplexMatrix(
                MatrixDims::new(
                    matrix.value.num_rows() as i64,
                    matrix.value.num_cols() as i64,
                ),
                False,
            ),
            Value::ConstString(_) => Type::String(False),
            Value::ConstJson(_) => Type::Json(False),
            Value::QubitRefs(_) => Type::Qubit,
            Value::BitRefs(_) => Type::Bool(True),
        }
    }
}

impl Node for Value {
    fn is_complete(&self) -> bool {
        match self {
            Value::QubitRefs(refs) => refs.is_complete(),
            Value::BitRefs(refs) => refs.is_complete(),
            _ => true,
        }
    }
}

impl Annotated for Value {
    fn meta(&self) -> &Annotations {
        match self {
            Value::ConstBool(node) => node.meta(),
            Value::ConstAxis(node) => node.meta(),
            Value::ConstInt(node) => node.meta(),
            Value::ConstReal(node) => node.meta(),
            Value::ConstComplex(node) => node.meta(),
            Value::ConstRealMatrix(node) => node.meta(),
            Value::ConstComplexMatrix(node) => node.meta(),
            Value::ConstString(node) => node.meta(),
            Value::ConstJson(node) => node.meta(),
            Value::QubitRefs(node) => node.meta(),
            Value::BitRefs(node) => node.meta(),
        }
    }

    fn meta_mut(&mut self) -> &mut Annotations {
        match self {
            Value::ConstBool(node) => node.meta_mut(),
            Value::ConstAxis(node) => node.meta_mut(),
            Value::ConstInt(node) => node.meta_mut(),
            Value::ConstReal(node) => node.meta_mut(),
            Value::ConstComplex(node) => node.meta_mut(),
            Value::ConstRealMatrix(node) => node.meta_mut(),
            Value::ConstComplexMatrix(node) => node.meta_mut(),
            Value::ConstString(node) => node.meta_mut(),
            Value::ConstJson(node) => node.meta_mut(),
            Value::QubitRefs(node) => node.meta_mut(),
            Value::BitRefs(node) => node.meta_mut(),
        }
    }
}

macro_rules! const_value_node {
    ($(#[$doc:meta] $name:ident($payload:ty)),* $(,)?) => {
        $(
            #[$doc]
            #[derive(Clone, Debug, PartialEq)]
            pub struct $name {
                pub value: $payload,
                pub meta: Annotations,
            }

            impl $name {
                pub fn new<T: Into<$payload>>(value: T) -> $name {
                    $name {
                        value: value.into(),
                        meta: Annotations::new(),
                    }
                }

                pub fn to_value(self) -> Value {
                    Value::$name(self)
                }
            }

            impl Node for $name {}
        )*
    };
}

const_value_node!(
    /// A constant boolean.
    ConstBool(bool),
    /// A constant axis.
    ConstAxis(Axis),
    /// A constant integer.
    ConstInt(i64),
    /// A constant real number.
    ConstReal(f64),
    /// A constant complex number.
    ConstComplex(Complex),
    /// A constant real matrix.
    ConstRealMatrix(RMatrix),
    /// A constant complex matrix.
    ConstComplexMatrix(CMatrix),
    /// A constant string.
    ConstString(String),
    /// A constant JSON blob, stored verbatim.
    ConstJson(String),
);

/// An ordered, possibly repeating selection of whole-register qubit
/// indices.
#[derive(Clone, Debug, PartialEq)]
pub struct QubitRefs {
    pub index: Many<ConstInt>,
    pub meta: Annotations,
}

impl QubitRefs {
    pub fn new(index: Many<ConstInt>) -> QubitRefs {
        QubitRefs {
            index,
            meta: Annotations::new(),
        }
    }

    pub fn to_value(self) -> Value {
        Value::QubitRefs(self)
    }
}

impl Node for QubitRefs {
    fn is_complete(&self) -> bool {
        self.index.is_complete()
    }
}

/// An ordered, possibly repeating selection of whole-register measurement
/// bit indices.
#[derive(Clone, Debug, PartialEq)]
pub struct BitRefs {
    pub index: Many<ConstInt>,
    pub meta: Annotations,
}

impl BitRefs {
    pub fn new(index: Many<ConstInt>) -> BitRefs {
        BitRefs {
            index,
            meta: Annotations::new(),
        }
    }

    pub fn to_value(self) -> Value {
        Value::BitRefs(self)
    }
}

impl Node for BitRefs {
    fn is_complete(&self) -> bool {
        self.index.is_complete()
    }
}

impl_annotated!(
    ConstBool,
    ConstAxis,
    ConstInt,
    ConstReal,
    ConstComplex,
    ConstRealMatrix,
    ConstComplexMatrix,
    ConstString,
    ConstJson,
    QubitRefs,
    BitRefs,
);

/// Type-checks and (if necessary) promotes `value` to `target`. Returns a
/// freshly constructed value carrying `value`'s source location, or `None`
/// when no rule applies.
///
/// The rules are exhaustive: the widening lattice is int < real < complex
/// (never narrowing), register references only promote to their own kind,
/// and matrix dimension wildcards resolve against the concrete side.
pub fn promote(value: &Value, target: &Type) -> Option<Value> {
    let mut result = match target {
        Type::Qubit => match value {
            Value::QubitRefs(refs) => Some(refs.clone().to_value()),
            _ => None,
        },

        Type::Bool(_) => match value {
            Value::BitRefs(refs) => Some(refs.clone().to_value()),
            Value::ConstBool(node) => Some(ConstBool::new(node.value).to_value()),
            _ => None,
        },

        Type::Axis(_) => match value {
            Value::ConstAxis(node) => Some(ConstAxis::new(node.value).to_value()),
            _ => None,
        },

        Type::Int(_) => match value {
            Value::ConstInt(node) => Some(ConstInt::new(node.value).to_value()),
            _ => None,
        },

        Type::Real(_) => match value {
            Value::ConstInt(node) => Some(ConstReal::new(node.value as f64).to_value()),
            Value::ConstReal(node) => Some(ConstReal::new(node.value).to_value()),
            _ => None,
        },

        Type::Complex(_) => match value {
            Value::ConstInt(node) => {
                Some(ConstComplex::new(Complex::new(node.value as f64, 0.0)).to_value())
            }
            Value::ConstReal(node) => {
                Some(ConstComplex::new(Complex::new(node.value, 0.0)).to_value())
            }
            Value::ConstComplex(node) => Some(ConstComplex::new(node.value).to_value()),
            _ => None,
        },

        Type::RealMatrix(dims, _) => match value {
            Value::ConstRealMatrix(node)
                if dims.matches(node.value.num_rows(), node.value.num_cols()) =>
            {
                Some(ConstRealMatrix::new(node.value.clone()).to_value())
            }
            _ => None,
        },

        Type::ComplexMatrix(dims, _) => promote_to_complex_matrix(value, dims),

        Type::String(_) => match value {
            Value::ConstString(node) => Some(ConstString::new(node.value.clone()).to_value()),
            _ => None,
        },

        Type::Json(_) => match value {
            Value::ConstJson(node) => Some(ConstJson::new(node.value.clone()).to_value()),
            _ => None,
        },
    };
    if let Some(result) = &mut result {
        result.copy_location_from(value);
    }
    result
}

fn promote_to_complex_matrix(value: &Value, dims: &MatrixDims) -> Option<Value> {
    match value {
        Value::ConstComplexMatrix(node)
            if dims.matches(node.value.num_rows(), node.value.num_cols()) =>
        {
            Some(ConstComplexMatrix::new(node.value.clone()).to_value())
        }

        Value::ConstRealMatrix(node) => {
            let matrix = &node.value;
            if dims.matches(matrix.num_rows(), matrix.num_cols()) {
                // Widen elementwise to complex.
                let data = matrix
                    .row_major()
                    .iter()
                    .map(|&re| Complex::new(re, 0.0))
                    .collect();
                let widened = CMatrix::from_row_major(data, matrix.num_cols());
                return Some(ConstComplexMatrix::new(widened).to_value());
            }
            // Legacy rule, for backwards compatibility with programs from
            // before the language knew about complex numbers: a flat
            // 1-by-2n^2 real vector of alternating real/imaginary parts
            // may stand in for a square n-by-n complex matrix.
            if dims.num_rows == dims.num_cols && dims.num_rows > 0 {
                let size = dims.num_rows as usize;
                let num_elements = 2 * size * size;
                if matrix.num_rows() == 1 && matrix.num_cols() == num_elements {
                    let data = matrix
                        .row_major()
                        .chunks(2)
                        .map(|pair| Complex::new(pair[0], pair[1]))
                        .collect();
                    let folded = CMatrix::from_row_major(data, size);
                    return Some(ConstComplexMatrix::new(folded).to_value());
                }
            }
            None
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IsAssignable::False;
    use cq1_tree::SourceLocation;

    fn int(value: i64) -> Value {
        ConstInt::new(value).to_value()
    }

    #[test]
    fn test_promote_to_own_type_never_fails() {
        let values = vec![
            ConstBool::new(true).to_value(),
            ConstAxis::new(Axis::Y).to_value(),
            int(7),
            ConstReal::new(1.5).to_value(),
            ConstComplex::new(Complex::new(1.0, 2.0)).to_value(),
            ConstRealMatrix::new(RMatrix::from_row_major(vec![1.0, 2.0], 2)).to_value(),
            ConstComplexMatrix::new(CMatrix::from_row_major(
                vec![Complex::new(1.0, 0.0)],
                1,
            ))
            .to_value(),
            ConstString::new("s").to_value(),
            ConstJson::new("{}").to_value(),
            QubitRefs::new([ConstInt::new(0)].into_iter().collect()).to_value(),
            BitRefs::new([ConstInt::new(0)].into_iter().collect()).to_value(),
        ];
        for value in values {
            let promoted = promote(&value, &value.value_type());
            assert_eq!(promoted, Some(value));
        }
    }

    #[test]
    fn test_promote_widens_but_never_narrows() {
        assert_eq!(
            promote(&int(3), &Type::Real(False)),
            Some(ConstReal::new(3.0).to_value())
        );
        assert_eq!(
            promote(&int(3), &Type::Complex(False)),
            Some(ConstComplex::new(Complex::new(3.0, 0.0)).to_value())
        );
        assert_eq!(
            promote(&ConstReal::new(1.5).to_value(), &Type::Int(False)),
            None
        );
        assert_eq!(
            promote(
                &ConstComplex::new(Complex::new(1.0, 0.0)).to_value(),
                &Type::Real(False)
            ),
            None
        );
    }

    #[test]
    fn test_promote_is_idempotent() {
        let target = Type::Complex(False);
        let once = promote(&int(2), &target).unwrap();
        let twice = promote(&once, &target).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_promote_copies_source_location() {
        let location = SourceLocation::new("f.cq", 2, 1, 2, 3);
        let mut value = int(3);
        value.set_source_location(location.clone());
        let promoted = promote(&value, &Type::Real(False)).unwrap();
        assert_eq!(promoted.source_location(), Some(&location));
    }

    #[test]
    fn test_matrix_dims_wildcard_promotion() {
        let matrix = ConstRealMatrix::new(RMatrix::from_row_major(vec![1.0, 2.0, 3.0], 3));
        let value = matrix.to_value();
        assert!(promote(
            &value,
            &Type::RealMatrix(MatrixDims::unconstrained(), False)
        )
        .is_some());
        assert!(promote(&value, &Type::RealMatrix(MatrixDims::new(1, 3), False)).is_some());
        assert!(promote(&value, &Type::RealMatrix(MatrixDims::new(3, 1), False)).is_none());
    }

    #[test]
    fn test_real_matrix_widens_to_complex() {
        let value = ConstRealMatrix::new(RMatrix::from_row_major(vec![1.0, 0.0, 0.0, 1.0], 2))
            .to_value();
        let promoted = promote(
            &value,
            &Type::ComplexMatrix(MatrixDims::new(2, 2), False),
        )
        .unwrap();
        match promoted {
            Value::ConstComplexMatrix(matrix) => {
                assert_eq!(*matrix.value.at(1, 1), Complex::new(1.0, 0.0));
                assert_eq!(*matrix.value.at(1, 2), Complex::new(0.0, 0.0));
                assert_eq!(*matrix.value.at(2, 2), Complex::new(1.0, 0.0));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_legacy_flattened_unitary_rule_roundtrips() {
        // Interleave the real/imaginary parts of a 2x2 complex matrix into
        // a flat 1x8 real vector, then promote back.
        let original = CMatrix::from_row_major(
            vec![
                Complex::new(0.0, 1.0),
                Complex::new(1.0, 0.0),
                Complex::new(-1.0, 0.0),
                Complex::new(0.0, -1.0),
            ],
            2,
        );
        let flat: Vec<f64> = original
            .row_major()
            .iter()
            .flat_map(|c| [c.re, c.im])
            .collect();
        let value = ConstRealMatrix::new(RMatrix::from_row_major(flat, 8)).to_value();
        let promoted = promote(
            &value,
            &Type::ComplexMatrix(MatrixDims::new(2, 2), False),
        )
        .unwrap();
        assert_eq!(
            promoted,
            ConstComplexMatrix::new(original).to_value()
        );
    }

    #[test]
    fn test_register_refs_promote_to_their_own_kind_only() {
        let qubits = QubitRefs::new([ConstInt::new(0)].into_iter().collect()).to_value();
        assert!(promote(&qubits, &Type::Qubit).is_some());
        assert!(promote(&qubits, &Type::Bool(False)).is_none());
        let bits = BitRefs::new([ConstInt::new(0)].into_iter().collect()).to_value();
        assert!(promote(&bits, &Type::Bool(False)).is_some());
        assert!(promote(&bits, &Type::Qubit).is_none());
    }
}
