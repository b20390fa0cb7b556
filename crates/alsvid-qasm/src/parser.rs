//! Recursive descent parser building circuits from QASM source.

use alsvid_ir::{Circuit, ClbitId, Instruction, ParameterExpression, QubitId, StandardGate};
use rustc_hash::FxHashMap;

use crate::error::{ParseError, ParseResult};
use crate::lexer::{tokenize, Token};

/// Parse `OpenQASM` 2.0 source into a circuit.
///
/// All quantum registers are concatenated into one flat qubit index
/// space in declaration order, and likewise for classical registers.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

#[derive(Debug, Clone, Copy)]
struct Register {
    offset: u32,
    size: u32,
}

#[derive(Debug, Clone)]
enum Operand {
    Whole(String),
    Indexed(String, u64),
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    qregs: FxHashMap<String, Register>,
    cregs: FxHashMap<String, Register>,
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl Parser {
    fn new(source: &str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        let mut line = 1;
        let mut cursor = 0;

        for result in tokenize(source) {
            match result {
                Ok(spanned) => {
                    line += source[cursor..spanned.span.start].matches('\n').count();
                    cursor = spanned.span.start;
                    tokens.push((spanned.token, line));
                }
                Err((span, message)) => {
                    line += source[cursor..span.start].matches('\n').count();
                    return Err(ParseError::Lexer { line, message });
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            qregs: FxHashMap::default(),
            cregs: FxHashMap::default(),
            num_qubits: 0,
            num_clbits: 0,
            instructions: vec![],
        })
    }

    // =========================================================================
    // Token stream helpers
    // =========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos.min(self.tokens.len().saturating_sub(1)))
            .map_or(1, |(_, l)| *l)
    }

    fn advance(&mut self) -> ParseResult<Token> {
        let token = self
            .tokens
            .get(self.pos)
            .map(|(t, _)| t.clone())
            .ok_or(ParseError::UnexpectedEof)?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> ParseResult<()> {
        let line = self.line();
        let token = self.advance()?;
        if token == *expected {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                line,
                expected: expected.to_string(),
                found: token.to_string(),
            })
        }
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        let line = self.line();
        match self.advance()? {
            Token::Identifier(name) => Ok(name),
            token => Err(ParseError::UnexpectedToken {
                line,
                expected: "identifier".into(),
                found: token.to_string(),
            }),
        }
    }

    fn expect_int(&mut self) -> ParseResult<u64> {
        let line = self.line();
        match self.advance()? {
            Token::IntLiteral(v) => Ok(v),
            token => Err(ParseError::UnexpectedToken {
                line,
                expected: "integer".into(),
                found: token.to_string(),
            }),
        }
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn parse_program(&mut self) -> ParseResult<Circuit> {
        self.parse_version()?;

        while self.peek().is_some() {
            self.parse_statement()?;
        }

        let mut circuit = Circuit::with_size("main", self.num_qubits, self.num_clbits);
        circuit.set_instructions(std::mem::take(&mut self.instructions))?;
        Ok(circuit)
    }

    fn parse_version(&mut self) -> ParseResult<()> {
        if !matches!(self.peek(), Some(Token::OpenQasm)) {
            return Err(ParseError::MissingVersion);
        }
        self.advance()?;

        let version = self.advance()?;
        let value = match version {
            Token::FloatLiteral(v) => v,
            _ => return Err(ParseError::MissingVersion),
        };
        if (value - 2.0).abs() > f64::EPSILON {
            return Err(ParseError::UnsupportedVersion {
                version: value.to_string(),
            });
        }
        self.expect(&Token::Semicolon)
    }

    fn parse_statement(&mut self) -> ParseResult<()> {
        let line = self.line();
        match self.peek().cloned().ok_or(ParseError::UnexpectedEof)? {
            Token::Include => {
                self.advance()?;
                let token = self.advance()?;
                if !matches!(token, Token::StringLiteral(_)) {
                    return Err(ParseError::UnexpectedToken {
                        line,
                        expected: "string literal".into(),
                        found: token.to_string(),
                    });
                }
                self.expect(&Token::Semicolon)
            }
            Token::Qreg => self.parse_register_decl(true),
            Token::Creg => self.parse_register_decl(false),
            Token::Measure => self.parse_measure(),
            Token::Reset => self.parse_reset(),
            Token::Barrier => self.parse_barrier(),
            Token::Gate => Err(ParseError::Unsupported {
                line,
                construct: "gate definition".into(),
            }),
            Token::Opaque => Err(ParseError::Unsupported {
                line,
                construct: "opaque declaration".into(),
            }),
            Token::If => Err(ParseError::Unsupported {
                line,
                construct: "classical conditional".into(),
            }),
            Token::Identifier(name) => {
                self.advance()?;
                self.parse_gate_call(&name, line)
            }
            token => Err(ParseError::UnexpectedToken {
                line,
                expected: "statement".into(),
                found: token.to_string(),
            }),
        }
    }

    fn parse_register_decl(&mut self, quantum: bool) -> ParseResult<()> {
        let line = self.line();
        self.advance()?;
        let name = self.expect_identifier()?;
        self.expect(&Token::LBracket)?;
        let size = self.expect_int()?;
        self.expect(&Token::RBracket)?;
        self.expect(&Token::Semicolon)?;

        if self.qregs.contains_key(&name) || self.cregs.contains_key(&name) {
            return Err(ParseError::DuplicateDeclaration { line, name });
        }

        let size = u32::try_from(size).map_err(|_| ParseError::IndexOutOfBounds {
            line,
            register: name.clone(),
            index: size,
            size: u32::MAX,
        })?;

        if quantum {
            self.qregs.insert(
                name,
                Register {
                    offset: self.num_qubits,
                    size,
                },
            );
            self.num_qubits += size;
        } else {
            self.cregs.insert(
                name,
                Register {
                    offset: self.num_clbits,
                    size,
                },
            );
            self.num_clbits += size;
        }
        Ok(())
    }

    fn parse_operand(&mut self) -> ParseResult<Operand> {
        let name = self.expect_identifier()?;
        if matches!(self.peek(), Some(Token::LBracket)) {
            self.advance()?;
            let index = self.expect_int()?;
            self.expect(&Token::RBracket)?;
            Ok(Operand::Indexed(name, index))
        } else {
            Ok(Operand::Whole(name))
        }
    }

    fn expand_qubits(&self, operand: &Operand, line: usize) -> ParseResult<Vec<QubitId>> {
        let (name, index) = match operand {
            Operand::Whole(name) => (name, None),
            Operand::Indexed(name, index) => (name, Some(*index)),
        };
        let reg = self
            .qregs
            .get(name)
            .ok_or_else(|| ParseError::UndefinedIdentifier {
                line,
                name: name.clone(),
            })?;
        expand_register(*reg, name, index, line).map(|v| v.into_iter().map(QubitId).collect())
    }

    fn expand_clbits(&self, operand: &Operand, line: usize) -> ParseResult<Vec<ClbitId>> {
        let (name, index) = match operand {
            Operand::Whole(name) => (name, None),
            Operand::Indexed(name, index) => (name, Some(*index)),
        };
        let reg = self
            .cregs
            .get(name)
            .ok_or_else(|| ParseError::UndefinedIdentifier {
                line,
                name: name.clone(),
            })?;
        expand_register(*reg, name, index, line).map(|v| v.into_iter().map(ClbitId).collect())
    }

    fn parse_measure(&mut self) -> ParseResult<()> {
        let line = self.line();
        self.advance()?;
        let src = self.parse_operand()?;
        self.expect(&Token::Arrow)?;
        let dst = self.parse_operand()?;
        self.expect(&Token::Semicolon)?;

        let qubits = self.expand_qubits(&src, line)?;
        let clbits = self.expand_clbits(&dst, line)?;
        if qubits.len() != clbits.len() {
            return Err(ParseError::BroadcastMismatch { line });
        }
        for (qubit, clbit) in qubits.into_iter().zip(clbits) {
            self.instructions.push(Instruction::measure(qubit, clbit));
        }
        Ok(())
    }

    fn parse_reset(&mut self) -> ParseResult<()> {
        let line = self.line();
        self.advance()?;
        let operand = self.parse_operand()?;
        self.expect(&Token::Semicolon)?;

        for qubit in self.expand_qubits(&operand, line)? {
            self.instructions.push(Instruction::reset(qubit));
        }
        Ok(())
    }

    fn parse_barrier(&mut self) -> ParseResult<()> {
        let line = self.line();
        self.advance()?;

        let mut qubits = Vec::new();
        loop {
            let operand = self.parse_operand()?;
            qubits.extend(self.expand_qubits(&operand, line)?);
            if matches!(self.peek(), Some(Token::Comma)) {
                self.advance()?;
            } else {
                break;
            }
        }
        self.expect(&Token::Semicolon)?;

        self.instructions.push(Instruction::barrier(qubits));
        Ok(())
    }

    fn parse_gate_call(&mut self, name: &str, line: usize) -> ParseResult<()> {
        let mut params = Vec::new();
        if matches!(self.peek(), Some(Token::LParen)) {
            self.advance()?;
            loop {
                params.push(self.parse_expr()?);
                if matches!(self.peek(), Some(Token::Comma)) {
                    self.advance()?;
                } else {
                    break;
                }
            }
            self.expect(&Token::RParen)?;
        }

        let gate = build_gate(name, params, line)?;

        let mut operands = Vec::new();
        loop {
            let operand = self.parse_operand()?;
            operands.push(self.expand_qubits(&operand, line)?);
            if matches!(self.peek(), Some(Token::Comma)) {
                self.advance()?;
            } else {
                break;
            }
        }
        self.expect(&Token::Semicolon)?;

        // Broadcast: whole-register operands must agree in size; indexed
        // operands are repeated across the broadcast.
        let mut width = 1;
        for ops in &operands {
            if ops.len() > 1 {
                if width > 1 && ops.len() != width {
                    return Err(ParseError::BroadcastMismatch { line });
                }
                width = ops.len();
            }
        }

        for k in 0..width {
            let qubits: Vec<QubitId> = operands
                .iter()
                .map(|ops| if ops.len() == 1 { ops[0] } else { ops[k] })
                .collect();
            self.instructions.push(Instruction::gate(gate.clone(), qubits));
        }
        Ok(())
    }

    // =========================================================================
    // Parameter expressions
    // =========================================================================

    fn parse_expr(&mut self) -> ParseResult<ParameterExpression> {
        let mut lhs = self.parse_term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance()?;
                    lhs = lhs + self.parse_term()?;
                }
                Some(Token::Minus) => {
                    self.advance()?;
                    lhs = lhs - self.parse_term()?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_term(&mut self) -> ParseResult<ParameterExpression> {
        let mut lhs = self.parse_factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance()?;
                    lhs = lhs * self.parse_factor()?;
                }
                Some(Token::Slash) => {
                    self.advance()?;
                    lhs = lhs / self.parse_factor()?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn parse_factor(&mut self) -> ParseResult<ParameterExpression> {
        let line = self.line();
        match self.advance()? {
            Token::Minus => {
                // Fold a leading minus on a literal so "-0.5" parses to
                // the same expression the emitter prints it from.
                match self.parse_factor()? {
                    ParameterExpression::Constant(v) => Ok(ParameterExpression::constant(-v)),
                    expr => Ok(-expr),
                }
            }
            Token::Pi => Ok(ParameterExpression::pi()),
            Token::FloatLiteral(v) => Ok(ParameterExpression::constant(v)),
            #[allow(clippy::cast_precision_loss)]
            Token::IntLiteral(v) => Ok(ParameterExpression::constant(v as f64)),
            Token::LParen => {
                let expr = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(expr)
            }
            Token::Identifier(name) => Err(ParseError::UndefinedIdentifier { line, name }),
            token => Err(ParseError::UnexpectedToken {
                line,
                expected: "expression".into(),
                found: token.to_string(),
            }),
        }
    }
}

fn expand_register(
    reg: Register,
    name: &str,
    index: Option<u64>,
    line: usize,
) -> ParseResult<Vec<u32>> {
    match index {
        Some(index) => {
            if index >= u64::from(reg.size) {
                return Err(ParseError::IndexOutOfBounds {
                    line,
                    register: name.to_string(),
                    index,
                    size: reg.size,
                });
            }
            #[allow(clippy::cast_possible_truncation)]
            let index = index as u32;
            Ok(vec![reg.offset + index])
        }
        None => Ok((reg.offset..reg.offset + reg.size).collect()),
    }
}

fn build_gate(
    name: &str,
    mut params: Vec<ParameterExpression>,
    line: usize,
) -> ParseResult<StandardGate> {
    let check = |expected: usize| -> ParseResult<()> {
        if params.len() == expected {
            Ok(())
        } else {
            Err(ParseError::WrongParameterCount {
                line,
                gate: name.to_string(),
                expected,
                got: params.len(),
            })
        }
    };

    let gate = match name {
        "id" => {
            check(0)?;
            StandardGate::I
        }
        "x" => {
            check(0)?;
            StandardGate::X
        }
        "y" => {
            check(0)?;
            StandardGate::Y
        }
        "z" => {
            check(0)?;
            StandardGate::Z
        }
        "h" => {
            check(0)?;
            StandardGate::H
        }
        "s" => {
            check(0)?;
            StandardGate::S
        }
        "sdg" => {
            check(0)?;
            StandardGate::Sdg
        }
        "t" => {
            check(0)?;
            StandardGate::T
        }
        "tdg" => {
            check(0)?;
            StandardGate::Tdg
        }
        "sx" => {
            check(0)?;
            StandardGate::SX
        }
        "sxdg" => {
            check(0)?;
            StandardGate::SXdg
        }
        "rx" => {
            check(1)?;
            StandardGate::Rx(params.remove(0))
        }
        "ry" => {
            check(1)?;
            StandardGate::Ry(params.remove(0))
        }
        "rz" => {
            check(1)?;
            StandardGate::Rz(params.remove(0))
        }
        "p" | "u1" => {
            check(1)?;
            StandardGate::P(params.remove(0))
        }
        "u" | "u3" => {
            check(3)?;
            let lambda = params.remove(2);
            let phi = params.remove(1);
            let theta = params.remove(0);
            StandardGate::U(theta, phi, lambda)
        }
        "u2" => {
            check(2)?;
            let lambda = params.remove(1);
            let phi = params.remove(0);
            let half_pi = ParameterExpression::pi() / 2.into();
            StandardGate::U(half_pi, phi, lambda)
        }
        "cx" | "CX" => {
            check(0)?;
            StandardGate::CX
        }
        "cy" => {
            check(0)?;
            StandardGate::CY
        }
        "cz" => {
            check(0)?;
            StandardGate::CZ
        }
        "swap" => {
            check(0)?;
            StandardGate::Swap
        }
        "crz" => {
            check(1)?;
            StandardGate::CRz(params.remove(0))
        }
        "cp" | "cu1" => {
            check(1)?;
            StandardGate::CP(params.remove(0))
        }
        _ => {
            return Err(ParseError::UnknownGate {
                line,
                name: name.to_string(),
            })
        }
    };
    Ok(gate)
}
