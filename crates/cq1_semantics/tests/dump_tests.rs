// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use cq1_semantics::Analyzer;
use cq1_tree::dump_to_string;
use expect_test::expect;

#[test]
fn test_semantic_tree_dump() {
    let mut analyzer = Analyzer::with_defaults();
    analyzer.register_instruction("h", "q", true, true, false).unwrap();
    let result = analyzer.analyze("version 1.0\nqubits 1\nh q[0]", Some("demo.cq"));
    assert!(result.is_ok(), "unexpected errors: {:?}", result.errors);
    let dump = dump_to_string(result.program().unwrap());
    let expected = expect![[r#"
        Program( # demo.cq:1:1..3:7
          version: 1.0
          num_qubits: 1
          error_model: -
          subcircuits: [
            Subcircuit(
              name: default
              iterations: 1
              bundles: [
                Bundle( # demo.cq:3:1..3:7
                  items: [
                    Instruction( # demo.cq:3:1..3:7
                      name: h
                      condition: <
                        ConstBool(
                          value: true
                        )
                      >
                      operands: [
                        QubitRefs( # demo.cq:3:3..3:7
                          index: [
                            ConstInt( # demo.cq:3:5..3:6
                              value: 0
                            )
                          ]
                        )
                      ]
                      annotations: []
                    )
                  ]
                  annotations: []
                )
              ]
              annotations: []
            )
          ]
        )
    "#]];
    expected.assert_eq(&dump);
}

#[test]
fn test_syntactic_tree_dump_marks_incomplete_nodes() {
    use cq1_source_file::parse_source_string;

    let unit = parse_source_string("version 1.0\nqubits 1\nh q[\n", Some("demo.cq"));
    assert!(unit.has_errors());
    let dump = dump_to_string(unit.ast().get());
    // The erroneous statement leaves its mark on the whole tree.
    assert!(dump.starts_with("!Program("));
    assert!(dump.contains("!ErroneousStatement("));
}
