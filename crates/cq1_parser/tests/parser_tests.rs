// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cq1_ast::ast;
use cq1_parser::parse_source;
use cq1_tree::{Annotated, Node};

fn parse_ok(source: &str) -> ast::Program {
    let output = parse_source(source, Some("test.cq"));
    assert!(
        output.errors.is_empty(),
        "unexpected errors: {:?}",
        output.errors
    );
    output
        .root
        .get()
        .as_program()
        .expect("expected a program root")
        .clone()
}

fn only_instruction(program: &ast::Program) -> &ast::Instruction {
    let statements = program.statements.get();
    assert_eq!(statements.items.len(), 1);
    match &statements.items[0] {
        ast::Statement::Bundle(bundle) => {
            assert_eq!(bundle.items.len(), 1);
            &bundle.items[0]
        }
        other => panic!("expected a bundle, got {other:?}"),
    }
}

#[test]
fn test_minimal_program() {
    let program = parse_ok("version 1.0\nqubits 1\nh q[0]");
    assert!(program.is_complete());
    assert_eq!(program.version.get().items, vec![1, 0]);
    let instruction = only_instruction(&program);
    assert_eq!(instruction.name.get().name, "h");
    assert!(instruction.condition.is_empty());
    let operands = &instruction.operands.get().items;
    assert_eq!(operands.len(), 1);
    assert!(matches!(operands[0], ast::Expression::Index(_)));
}

#[test]
fn test_version_with_many_components() {
    let program = parse_ok("version 1.0.3\nqubits 1\n");
    assert_eq!(program.version.get().items, vec![1, 0, 3]);
    let program = parse_ok("version 2\nqubits 1\n");
    assert_eq!(program.version.get().items, vec![2]);
}

#[test]
fn test_conditional_instruction() {
    let program = parse_ok("version 1.0\nqubits 2\nC-X b[0], q[0]");
    let instruction = only_instruction(&program);
    assert_eq!(instruction.name.get().name, "X");
    assert!(!instruction.condition.is_empty());
    assert_eq!(instruction.operands.get().items.len(), 1);
}

#[test]
fn test_spaced_c_minus_is_not_conditional() {
    // `c - x` must stay an ordinary instruction named `c` with operand -x.
    let program = parse_ok("version 1.0\nqubits 1\nc - x");
    let instruction = only_instruction(&program);
    assert_eq!(instruction.name.get().name, "c");
    assert!(instruction.condition.is_empty());
    assert!(matches!(
        instruction.operands.get().items[0],
        ast::Expression::Negate(_)
    ));
}

#[test]
fn test_single_line_bundle() {
    let program = parse_ok("version 1.0\nqubits 2\nx q[0] | y q[1]");
    let statements = program.statements.get();
    match &statements.items[0] {
        ast::Statement::Bundle(bundle) => assert_eq!(bundle.items.len(), 2),
        other => panic!("expected a bundle, got {other:?}"),
    }
}

#[test]
fn test_braced_bundle_across_lines() {
    let source = "version 1.0\nqubits 2\n{\n  x q[0] | h q[1]\n  y q[1]\n}";
    let program = parse_ok(source);
    let statements = program.statements.get();
    assert_eq!(statements.items.len(), 1);
    match &statements.items[0] {
        ast::Statement::Bundle(bundle) => assert_eq!(bundle.items.len(), 3),
        other => panic!("expected a bundle, got {other:?}"),
    }
}

#[test]
fn test_mapping_statement() {
    let program = parse_ok("version 1.0\nqubits 2\nmap q[0], ancilla");
    let statements = program.statements.get();
    match &statements.items[0] {
        ast::Statement::Mapping(mapping) => {
            assert_eq!(mapping.alias.get().name, "ancilla");
            assert!(matches!(mapping.expr.get(), ast::Expression::Index(_)));
        }
        other => panic!("expected a mapping, got {other:?}"),
    }
}

#[test]
fn test_subcircuit_header() {
    let program = parse_ok("version 1.0\nqubits 1\n.init\n.loop(3)");
    let statements = program.statements.get();
    match &statements.items[0] {
        ast::Statement::Subcircuit(subcircuit) => {
            assert_eq!(subcircuit.name.get().name, "init");
            assert!(subcircuit.iterations.is_empty());
        }
        other => panic!("expected a subcircuit, got {other:?}"),
    }
    match &statements.items[1] {
        ast::Statement::Subcircuit(subcircuit) => {
            assert_eq!(subcircuit.name.get().name, "loop");
            assert!(matches!(
                subcircuit.iterations.get(),
                ast::Expression::IntegerLiteral(_)
            ));
        }
        other => panic!("expected a subcircuit, got {other:?}"),
    }
}

#[test]
fn test_annotations_on_instruction() {
    let program = parse_ok("version 1.0\nqubits 1\nh q[0] @qx.weight(2) @sim.skip");
    let instruction = only_instruction(&program);
    assert_eq!(instruction.annotations.len(), 2);
    let first = &instruction.annotations[0];
    assert_eq!(first.interface.get().name, "qx");
    assert_eq!(first.operation.get().name, "weight");
    assert_eq!(first.operands.get().items.len(), 1);
    let second = &instruction.annotations[1];
    assert_eq!(second.operation.get().name, "skip");
    assert!(second.operands.is_empty());
}

#[test]
fn test_matrix_literal_forms() {
    // Flat pair form.
    let program = parse_ok("version 1.0\nqubits 1\nu q[0], [[1.0, 0.0]]");
    let instruction = only_instruction(&program);
    match &instruction.operands.get().items[1] {
        ast::Expression::MatrixLiteral1(matrix) => {
            assert_eq!(matrix.pairs.get().items.len(), 2);
        }
        other => panic!("expected MatrixLiteral1, got {other:?}"),
    }

    // Row form in double brackets.
    let program = parse_ok("version 1.0\nqubits 1\nu q[0], [[1, 0; 0, 1]]");
    let instruction = only_instruction(&program);
    match &instruction.operands.get().items[1] {
        ast::Expression::MatrixLiteral2(matrix) => {
            assert_eq!(matrix.rows.len(), 2);
            assert_eq!(matrix.rows[0].items.len(), 2);
        }
        other => panic!("expected MatrixLiteral2, got {other:?}"),
    }

    // Row form in single brackets.
    let program = parse_ok("version 1.0\nqubits 1\nu q[0], [3.5]");
    let instruction = only_instruction(&program);
    match &instruction.operands.get().items[1] {
        ast::Expression::MatrixLiteral2(matrix) => {
            assert_eq!(matrix.rows.len(), 1);
            assert_eq!(matrix.rows[0].items.len(), 1);
        }
        other => panic!("expected MatrixLiteral2, got {other:?}"),
    }
}

#[test]
fn test_json_literal_kept_verbatim() {
    let source = "version 1.0\nqubits 1\nload q[0], {\"a\": {\"b\": [1, 2]}, \"c\": \"}\"}";
    let program = parse_ok(source);
    let instruction = only_instruction(&program);
    match &instruction.operands.get().items[1] {
        ast::Expression::JsonLiteral(json) => {
            assert_eq!(json.value, "{\"a\": {\"b\": [1, 2]}, \"c\": \"}\"}");
        }
        other => panic!("expected JsonLiteral, got {other:?}"),
    }
}

#[test]
fn test_string_escapes_resolved() {
    let program = parse_ok("version 1.0\nqubits 1\nnote \"a\\tb\\n\"");
    let instruction = only_instruction(&program);
    match &instruction.operands.get().items[0] {
        ast::Expression::StringLiteral(string) => assert_eq!(string.value, "a\tb\n"),
        other => panic!("expected StringLiteral, got {other:?}"),
    }
}

#[test]
fn test_operator_precedence() {
    let program = parse_ok("version 1.0\nqubits 1\nmap 1 + 2 * 3, a");
    let statements = program.statements.get();
    let expr = match &statements.items[0] {
        ast::Statement::Mapping(mapping) => mapping.expr.get(),
        other => panic!("expected a mapping, got {other:?}"),
    };
    match expr {
        ast::Expression::Add(add) => {
            assert!(matches!(
                add.lhs.get(),
                ast::Expression::IntegerLiteral(_)
            ));
            assert!(matches!(add.rhs.get(), ast::Expression::Multiply(_)));
        }
        other => panic!("expected Add at the top, got {other:?}"),
    }
}

#[test]
fn test_power_is_right_associative() {
    let program = parse_ok("version 1.0\nqubits 1\nmap 2**3**2, a");
    let statements = program.statements.get();
    let expr = match &statements.items[0] {
        ast::Statement::Mapping(mapping) => mapping.expr.get(),
        other => panic!("expected a mapping, got {other:?}"),
    };
    match expr {
        ast::Expression::Power(power) => {
            assert!(matches!(
                power.lhs.get(),
                ast::Expression::IntegerLiteral(_)
            ));
            assert!(matches!(power.rhs.get(), ast::Expression::Power(_)));
        }
        other => panic!("expected Power at the top, got {other:?}"),
    }
}

#[test]
fn test_index_ranges() {
    let program = parse_ok("version 1.0\nqubits 4\nh q[0, 2:3]");
    let instruction = only_instruction(&program);
    let index = match &instruction.operands.get().items[0] {
        ast::Expression::Index(index) => index,
        other => panic!("expected Index, got {other:?}"),
    };
    let entries = &index.indices.get().items;
    assert_eq!(entries.len(), 2);
    assert!(matches!(entries[0], ast::IndexEntry::Item(_)));
    assert!(matches!(entries[1], ast::IndexEntry::Range(_)));
}

#[test]
fn test_statement_recovery() {
    let source = "version 1.0\nqubits 2\nh q[0]\nh q[\nx q[1]";
    let output = parse_source(source, Some("test.cq"));
    assert_eq!(output.errors.len(), 1);
    let program = output.root.get().as_program().unwrap().clone();
    assert!(!program.is_complete());
    let statements = program.statements.get();
    assert_eq!(statements.items.len(), 3);
    assert!(matches!(statements.items[0], ast::Statement::Bundle(_)));
    assert!(matches!(statements.items[1], ast::Statement::Erroneous(_)));
    assert!(matches!(statements.items[2], ast::Statement::Bundle(_)));
}

#[test]
fn test_missing_version_is_erroneous_program() {
    let output = parse_source("qubits 1\nh q[0]", Some("test.cq"));
    assert_eq!(output.errors.len(), 1);
    assert!(matches!(
        output.root.get(),
        ast::Root::Erroneous(_)
    ));
}

#[test]
fn test_source_locations() {
    let program = parse_ok("version 1.0\nqubits 1\nh q[0]");
    let instruction = only_instruction(&program);
    let location = instruction.source_location().unwrap();
    assert_eq!(location.file_name, "test.cq");
    assert_eq!(location.first_line, 3);
    assert_eq!(location.first_column, 1);
    assert_eq!(location.last_line, 3);
    let name_location = instruction.name.get().source_location().unwrap();
    assert_eq!((name_location.first_line, name_location.first_column), (3, 1));
}

#[test]
fn test_comments_are_trivia() {
    let program = parse_ok("# header\nversion 1.0 # trailing\nqubits 1\n\n# blank\nh q[0]");
    assert_eq!(program.version.get().items, vec![1, 0]);
    assert_eq!(program.statements.get().items.len(), 1);
}
