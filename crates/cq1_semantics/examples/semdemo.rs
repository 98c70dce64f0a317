// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use cq1_lexer::{tokenize, Token};
use cq1_semantics::Analyzer;
use cq1_source_file::parse_source_string;
use cq1_tree::dump_to_string;

#[derive(Parser)]
#[command(name = "semdemo")]
#[command(about = "Demo that parses and analyzes a cQASM file and prints the result.")]
#[command(long_about = "
Demo that parses and analyzes a cQASM file and prints the result.

Commands are `lex`, `parse`, and `semantic`. `lex` prints a stream of
tokens. `parse` prints the syntactic tree. `semantic` analyzes against a
small demo gate set and prints the semantic tree or the diagnostics.
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze file to a semantic tree
    Semantic {
        #[arg(value_name = "FILENAME")]
        /// file name to read
        file_name: PathBuf,
    },

    /// Parse file to a syntactic tree
    Parse {
        #[arg(value_name = "FILENAME")]
        /// file name to read
        file_name: PathBuf,
    },

    /// Lex file to `Token`s
    Lex {
        #[arg(value_name = "FILENAME")]
        file_name: PathBuf,
    },
}

// A gate set similar to what a simulator would register.
fn demo_analyzer() -> Analyzer {
    let mut analyzer = Analyzer::with_defaults();
    for gate in ["h", "x", "y", "z"] {
        analyzer.register_instruction(gate, "q", true, true, false).unwrap();
    }
    for gate in ["rx", "ry", "rz"] {
        analyzer.register_instruction(gate, "qr", true, true, false).unwrap();
    }
    analyzer.register_instruction("cnot", "qq", true, true, false).unwrap();
    analyzer.register_instruction("u", "qu", true, true, false).unwrap();
    analyzer.register_instruction("measure_all", "", false, false, true).unwrap();
    analyzer.register_error_model("depolarizing_channel", "r").unwrap();
    analyzer
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Semantic { file_name }) => {
            let source = read_example_source(file_name);
            let name = file_name.display().to_string();
            let result = demo_analyzer().analyze(&source, Some(&name));
            if !result.is_ok() {
                println!("Found {} errors:", result.errors.len());
                for error in &result.errors {
                    println!("{error}");
                }
            }
            if let Some(program) = result.program() {
                print!("{}", dump_to_string(program));
            }
        }

        Some(Commands::Parse { file_name }) => {
            let source = read_example_source(file_name);
            let name = file_name.display().to_string();
            let unit = parse_source_string(&source, Some(&name));
            println!("Found {} parse errors", unit.errors().len());
            unit.print_errors();
            print!("{}", dump_to_string(unit.ast().get()));
        }

        Some(Commands::Lex { file_name }) => {
            let tokens: Vec<Token> = tokenize(&read_example_source(file_name)).collect();
            for tok in tokens {
                println!("{tok:?}");
            }
        }

        None => {
            println!("Commands are semantic, parse, and lex")
        }
    }
}

fn read_example_source(file_path: &PathBuf) -> String {
    fs::read_to_string(file_path)
        .unwrap_or_else(|_| panic!("Unable to read file {:?}", file_path))
}
