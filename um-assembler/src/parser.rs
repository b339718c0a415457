//! Assembly parser
//!
//! Turns one line of source into labels plus at most one statement. Operands
//! that name labels stay symbolic until the assembler resolves them.

use crate::error::{AssemblerError, Result};
use crate::lexer::Token;
use logos::Logos;
use um_spec::{Instruction, Opcode, Register, Word, MAX_IMMEDIATE};

/// An instruction operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Immediate(i64),
    Label(String),
}

/// Something that occupies one word of the image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Instruction {
        mnemonic: String,
        operands: Vec<Operand>,
    },
    /// `.word` directive
    Word(Operand),
}

/// A parsed source line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    pub labels: Vec<String>,
    pub statement: Option<Statement>,
}

fn syntax_error(line: usize, column: usize, message: impl Into<String>) -> AssemblerError {
    AssemblerError::SyntaxError {
        line,
        column,
        message: message.into(),
    }
}

/// Parse a single source line
pub fn parse_line(text: &str, number: usize) -> Result<Line> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(text);
    while let Some(token) = lexer.next() {
        let column = lexer.span().start + 1;
        match token {
            Ok(Token::Newline) => break,
            Ok(token) => tokens.push((token, column)),
            Err(()) => {
                return Err(syntax_error(
                    number,
                    column,
                    format!("unexpected input '{}'", lexer.slice()),
                ))
            }
        }
    }

    let mut line = Line {
        number,
        ..Line::default()
    };
    let mut pos = 0;

    // Leading labels
    while let (Some((Token::Identifier(name), _)), Some((Token::Colon, _))) =
        (tokens.get(pos), tokens.get(pos + 1))
    {
        line.labels.push(name.clone());
        pos += 2;
    }

    let Some((head, column)) = tokens.get(pos) else {
        return Ok(line);
    };
    let operands = parse_operands(&tokens[pos + 1..], number)?;

    line.statement = Some(match head {
        Token::Identifier(mnemonic) => Statement::Instruction {
            mnemonic: mnemonic.to_lowercase(),
            operands,
        },
        Token::Directive(name) if name.eq_ignore_ascii_case("word") => {
            if operands.len() != 1 {
                return Err(AssemblerError::OperandCount {
                    line: number,
                    mnemonic: ".word".to_string(),
                    expected: 1,
                    found: operands.len(),
                });
            }
            let value = operands.into_iter().next().unwrap_or(Operand::Immediate(0));
            if matches!(value, Operand::Register(_)) {
                return Err(syntax_error(number, *column, ".word takes a number or label"));
            }
            Statement::Word(value)
        }
        Token::Directive(name) => {
            return Err(AssemblerError::InvalidDirective {
                line: number,
                name: name.clone(),
            })
        }
        other => {
            return Err(syntax_error(
                number,
                *column,
                format!("expected instruction, found {:?}", other),
            ))
        }
    });

    Ok(line)
}

/// Comma-separated operand list
fn parse_operands(tokens: &[(Token, usize)], line: usize) -> Result<Vec<Operand>> {
    let mut operands = Vec::new();
    let mut expect_operand = true;

    for (token, column) in tokens {
        if !expect_operand {
            if *token != Token::Comma {
                return Err(syntax_error(line, *column, "expected ','"));
            }
            expect_operand = true;
            continue;
        }

        let operand = match token {
            Token::Register(index) => Operand::Register(Register::from_bits(*index as u32)),
            Token::Number(value) => Operand::Immediate(*value),
            Token::Hex(value) | Token::Binary(value) => {
                let value = i64::try_from(*value)
                    .map_err(|_| syntax_error(line, *column, "number too large"))?;
                Operand::Immediate(value)
            }
            Token::Char(value) => Operand::Immediate(*value as i64),
            Token::Identifier(name) => Operand::Label(name.clone()),
            other => {
                return Err(syntax_error(
                    line,
                    *column,
                    format!("expected operand, found {:?}", other),
                ))
            }
        };
        operands.push(operand);
        expect_operand = false;
    }

    if expect_operand && !operands.is_empty() {
        let column = tokens.last().map(|(_, c)| *c).unwrap_or(0);
        return Err(syntax_error(line, column, "trailing ','"));
    }

    Ok(operands)
}

/// Parse register name (r0-r7)
pub fn parse_register(name: &str) -> Result<Register> {
    let name = name.trim().to_lowercase();
    name.strip_prefix('r')
        .filter(|digits| digits.len() == 1)
        .and_then(|digits| digits.parse::<usize>().ok())
        .and_then(Register::from_index)
        .ok_or(AssemblerError::InvalidRegister { line: 0, name })
}

/// Parse a single instruction from assembly text
///
/// Label operands are rejected since there is no symbol table to resolve them.
pub fn parse_instruction(text: &str) -> Result<Instruction> {
    let line = parse_line(text, 1)?;
    match line.statement {
        Some(Statement::Instruction { mnemonic, operands }) => {
            build_instruction(&mnemonic, &operands, 1, |_| None)
        }
        Some(Statement::Word(_)) => Err(syntax_error(1, 1, "expected instruction, found .word")),
        None => Err(syntax_error(1, 1, "Empty instruction")),
    }
}

/// Convert an immediate to a full word, as `.word` accepts it
///
/// Negative values are stored in two's complement.
pub(crate) fn word_value(value: i64, line: usize) -> Result<Word> {
    if (i32::MIN as i64..=u32::MAX as i64).contains(&value) {
        Ok(value as u32)
    } else {
        Err(AssemblerError::InvalidImmediate { line, value })
    }
}

/// Build a typed instruction from a mnemonic and resolved operands
pub(crate) fn build_instruction(
    mnemonic: &str,
    operands: &[Operand],
    line: usize,
    resolve: impl Fn(&str) -> Option<u32>,
) -> Result<Instruction> {
    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| {
        AssemblerError::UnknownInstruction {
            line,
            mnemonic: mnemonic.to_string(),
        }
    })?;

    let expected = match opcode {
        Opcode::Halt => 0,
        Opcode::Abandonment | Opcode::Output | Opcode::Input => 1,
        Opcode::Allocation | Opcode::LoadProgram | Opcode::Orthography => 2,
        _ => 3,
    };
    if operands.len() != expected {
        return Err(AssemblerError::OperandCount {
            line,
            mnemonic: mnemonic.to_string(),
            expected,
            found: operands.len(),
        });
    }

    let reg = |i: usize| -> Result<Register> {
        match &operands[i] {
            Operand::Register(r) => Ok(*r),
            Operand::Immediate(_) => Err(syntax_error(
                line,
                0,
                format!("operand {} of {} must be a register", i + 1, mnemonic),
            )),
            Operand::Label(name) => Err(AssemblerError::InvalidRegister {
                line,
                name: name.clone(),
            }),
        }
    };

    let instr = match opcode {
        Opcode::ConditionalMove => Instruction::ConditionalMove { a: reg(0)?, b: reg(1)?, c: reg(2)? },
        Opcode::ArrayIndex => Instruction::ArrayIndex { a: reg(0)?, b: reg(1)?, c: reg(2)? },
        Opcode::ArrayAmendment => Instruction::ArrayAmendment { a: reg(0)?, b: reg(1)?, c: reg(2)? },
        Opcode::Addition => Instruction::Addition { a: reg(0)?, b: reg(1)?, c: reg(2)? },
        Opcode::Multiplication => Instruction::Multiplication { a: reg(0)?, b: reg(1)?, c: reg(2)? },
        Opcode::Division => Instruction::Division { a: reg(0)?, b: reg(1)?, c: reg(2)? },
        Opcode::NotAnd => Instruction::NotAnd { a: reg(0)?, b: reg(1)?, c: reg(2)? },
        Opcode::Halt => Instruction::Halt,
        Opcode::Allocation => Instruction::Allocation { b: reg(0)?, c: reg(1)? },
        Opcode::Abandonment => Instruction::Abandonment { c: reg(0)? },
        Opcode::Output => Instruction::Output { c: reg(0)? },
        Opcode::Input => Instruction::Input { c: reg(0)? },
        Opcode::LoadProgram => Instruction::LoadProgram { b: reg(0)?, c: reg(1)? },
        Opcode::Orthography => {
            let a = reg(0)?;
            let value = match &operands[1] {
                Operand::Immediate(value) => {
                    if !(0..=MAX_IMMEDIATE as i64).contains(value) {
                        return Err(AssemblerError::InvalidImmediate { line, value: *value });
                    }
                    *value as u32
                }
                Operand::Label(name) => resolve(name).ok_or_else(|| {
                    AssemblerError::UndefinedLabel {
                        line,
                        name: name.clone(),
                    }
                })?,
                Operand::Register(r) => {
                    return Err(syntax_error(
                        line,
                        0,
                        format!("ortho takes an immediate, found register {}", r),
                    ))
                }
            };
            Instruction::orthography(a, value).map_err(|_| AssemblerError::InvalidImmediate {
                line,
                value: value as i64,
            })?
        }
    };

    Ok(instr)
}
