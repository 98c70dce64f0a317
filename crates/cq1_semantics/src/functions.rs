// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The default constant-folding function set. Unary and binary operators in
// expressions are lowered to calls on synthetic `operator…` names, so
// these are ordinary function-table entries; hosts can extend or replace
// them through the same registration path.

use cq1_tree::Complex;

use crate::resolver::FunctionTable;
use crate::types::{IsAssignable, Type};
use crate::values::{ConstComplex, ConstInt, ConstReal, Value};

fn int_type() -> Type {
    Type::Int(IsAssignable::False)
}

fn real_type() -> Type {
    Type::Real(IsAssignable::False)
}

fn complex_type() -> Type {
    Type::Complex(IsAssignable::False)
}

// The table promises arguments of the registered types, so these
// projections cannot fail.
fn as_int(value: &Value) -> i64 {
    match value {
        Value::ConstInt(node) => node.value,
        _ => unreachable!("argument was promoted to int"),
    }
}

fn as_real(value: &Value) -> f64 {
    match value {
        Value::ConstReal(node) => node.value,
        _ => unreachable!("argument was promoted to real"),
    }
}

fn as_complex(value: &Value) -> Complex {
    match value {
        Value::ConstComplex(node) => node.value,
        _ => unreachable!("argument was promoted to complex"),
    }
}

/// Registers the operators used by constant expression evaluation:
/// `operator+`, `operator-` (unary and binary), and `operator*` over int,
/// real, and complex; `operator/` and `operator**` over real and complex.
/// Integer overloads are registered before the wider ones, so integer
/// arithmetic stays exact where an integer overload exists.
pub fn register_default_functions(table: &mut FunctionTable) {
    table.add("operator+", vec![int_type(), int_type()], |args| {
        Ok(ConstInt::new(as_int(&args[0]).wrapping_add(as_int(&args[1]))).to_value())
    });
    table.add("operator+", vec![real_type(), real_type()], |args| {
        Ok(ConstReal::new(as_real(&args[0]) + as_real(&args[1])).to_value())
    });
    table.add("operator+", vec![complex_type(), complex_type()], |args| {
        Ok(ConstComplex::new(as_complex(&args[0]) + as_complex(&args[1])).to_value())
    });

    table.add("operator-", vec![int_type(), int_type()], |args| {
        Ok(ConstInt::new(as_int(&args[0]).wrapping_sub(as_int(&args[1]))).to_value())
    });
    table.add("operator-", vec![real_type(), real_type()], |args| {
        Ok(ConstReal::new(as_real(&args[0]) - as_real(&args[1])).to_value())
    });
    table.add("operator-", vec![complex_type(), complex_type()], |args| {
        Ok(ConstComplex::new(as_complex(&args[0]) - as_complex(&args[1])).to_value())
    });

    // Unary negation.
    table.add("operator-", vec![int_type()], |args| {
        Ok(ConstInt::new(as_int(&args[0]).wrapping_neg()).to_value())
    });
    table.add("operator-", vec![real_type()], |args| {
        Ok(ConstReal::new(-as_real(&args[0])).to_value())
    });
    table.add("operator-", vec![complex_type()], |args| {
        Ok(ConstComplex::new(-as_complex(&args[0])).to_value())
    });

    table.add("operator*", vec![int_type(), int_type()], |args| {
        Ok(ConstInt::new(as_int(&args[0]).wrapping_mul(as_int(&args[1]))).to_value())
    });
    table.add("operator*", vec![real_type(), real_type()], |args| {
        Ok(ConstReal::new(as_real(&args[0]) * as_real(&args[1])).to_value())
    });
    table.add("operator*", vec![complex_type(), complex_type()], |args| {
        Ok(ConstComplex::new(as_complex(&args[0]) * as_complex(&args[1])).to_value())
    });

    // No integer division: integer operands promote to real.
    table.add("operator/", vec![real_type(), real_type()], |args| {
        Ok(ConstReal::new(as_real(&args[0]) / as_real(&args[1])).to_value())
    });
    table.add("operator/", vec![complex_type(), complex_type()], |args| {
        Ok(ConstComplex::new(as_complex(&args[0]) / as_complex(&args[1])).to_value())
    });

    table.add("operator**", vec![real_type(), real_type()], |args| {
        Ok(ConstReal::new(as_real(&args[0]).powf(as_real(&args[1]))).to_value())
    });
    table.add("operator**", vec![complex_type(), complex_type()], |args| {
        Ok(ConstComplex::new(as_complex(&args[0]).powc(as_complex(&args[1]))).to_value())
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64) -> Value {
        ConstInt::new(value).to_value()
    }

    fn real(value: f64) -> Value {
        ConstReal::new(value).to_value()
    }

    fn table() -> FunctionTable {
        let mut table = FunctionTable::new();
        register_default_functions(&mut table);
        table
    }

    #[test]
    fn test_integer_arithmetic_stays_integer() {
        let table = table();
        assert_eq!(
            table.call("operator+", &[int(2), int(3)]).unwrap(),
            int(5)
        );
        assert_eq!(
            table.call("operator*", &[int(4), int(5)]).unwrap(),
            int(20)
        );
        assert_eq!(table.call("operator-", &[int(7)]).unwrap(), int(-7));
    }

    #[test]
    fn test_mixed_arithmetic_widens() {
        let table = table();
        // One real operand forces the real overload.
        assert_eq!(
            table.call("operator+", &[int(2), real(0.5)]).unwrap(),
            real(2.5)
        );
    }

    #[test]
    fn test_division_promotes_ints_to_real() {
        let table = table();
        assert_eq!(
            table.call("operator/", &[int(6), int(4)]).unwrap(),
            real(1.5)
        );
    }

    #[test]
    fn test_power() {
        let table = table();
        assert_eq!(
            table.call("operator**", &[real(2.0), real(10.0)]).unwrap(),
            real(1024.0)
        );
    }
}
