//! Parser for `OpenQASM` 2.
//!
//! Lowers directly into a [`Circuit`]: update circuits are flat gate
//! lists, so no intermediate AST is kept.

use std::collections::HashMap;

use pqca_ir::{Circuit, ClbitId, Instruction, QubitId, StandardGate};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse a QASM source string into a Circuit.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    Parser::new(source)?.parse_program()
}

/// Reference to one qubit or clbit, or to a whole register.
#[derive(Debug, Clone)]
enum RegRef {
    Indexed(String, usize),
    Whole(String),
}

/// Parser state.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    /// Size of the single quantum register, once declared.
    qreg: Option<(String, usize)>,
    /// Classical registers, name to (offset, size).
    cregs: HashMap<String, (usize, usize)>,
    num_clbits: usize,
}

impl Parser {
    fn new(source: &str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, msg)) => {
                    return Err(ParseError::LexerError {
                        position: span.start,
                        message: msg,
                    });
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            qreg: None,
            cregs: HashMap::new(),
            num_clbits: 0,
        })
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<Token> {
        if self.is_eof() {
            return None;
        }
        let token = self.tokens[self.pos].token.clone();
        self.pos += 1;
        Some(token)
    }

    fn expect(&mut self, expected: &Token) -> ParseResult<()> {
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(format!("expected {expected}")))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(expected) {
            return Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn parse_identifier(&mut self) -> ParseResult<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s),
            Some(other) => Err(ParseError::UnexpectedToken {
                expected: "identifier".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("identifier".into())),
        }
    }

    fn parse_int_literal(&mut self) -> ParseResult<usize> {
        match self.advance() {
            Some(Token::IntLiteral(v)) => Ok(v as usize),
            Some(other) => Err(ParseError::UnexpectedToken {
                expected: "integer".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("integer".into())),
        }
    }

    fn parse_program(&mut self) -> ParseResult<Circuit> {
        self.expect(&Token::OpenQasm)?;
        match self.advance() {
            Some(Token::FloatLiteral(v)) if (v - 2.0).abs() < f64::EPSILON => {}
            Some(other) => return Err(ParseError::InvalidVersion(other.to_string())),
            None => return Err(ParseError::UnexpectedEof("version number".into())),
        }
        self.expect(&Token::Semicolon)?;

        // The circuit is created when the qreg is declared; gates
        // before the qreg are an error. Standard emitters declare
        // registers first.
        let mut circuit: Option<Circuit> = None;

        while !self.is_eof() {
            let token = self
                .peek()
                .cloned()
                .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

            match token {
                Token::Include => self.parse_include()?,
                Token::Qreg => {
                    let (name, size) = self.parse_qreg_decl()?;
                    circuit = Some(Circuit::with_clbits(
                        name,
                        size as u32,
                        self.num_clbits as u32,
                    ));
                }
                Token::Creg => {
                    let before = self.num_clbits;
                    self.parse_creg_decl()?;
                    if let Some(c) = circuit.as_mut() {
                        c.add_clbits((self.num_clbits - before) as u32);
                    }
                }
                Token::Gate | Token::Opaque => {
                    return Err(ParseError::Unsupported("gate definitions".into()));
                }
                Token::If => {
                    return Err(ParseError::Unsupported("classical control flow".into()));
                }
                _ => {
                    let circuit = circuit
                        .as_mut()
                        .ok_or_else(|| ParseError::UndefinedIdentifier("qreg".into()))?;
                    self.parse_operation(circuit)?;
                }
            }
        }

        circuit.ok_or_else(|| ParseError::UnexpectedEof("qreg declaration".into()))
    }

    fn parse_include(&mut self) -> ParseResult<()> {
        self.expect(&Token::Include)?;
        match self.advance() {
            Some(Token::StringLiteral(_)) => {}
            Some(other) => {
                return Err(ParseError::UnexpectedToken {
                    expected: "string literal".into(),
                    found: other.to_string(),
                });
            }
            None => return Err(ParseError::UnexpectedEof("include path".into())),
        }
        self.expect(&Token::Semicolon)?;
        Ok(())
    }

    fn parse_qreg_decl(&mut self) -> ParseResult<(String, usize)> {
        self.expect(&Token::Qreg)?;
        let name = self.parse_identifier()?;
        self.expect(&Token::LBracket)?;
        let size = self.parse_int_literal()?;
        self.expect(&Token::RBracket)?;
        self.expect(&Token::Semicolon)?;

        if self.qreg.is_some() {
            return Err(ParseError::TooManyQuantumRegisters(name));
        }
        self.qreg = Some((name.clone(), size));
        Ok((name, size))
    }

    fn parse_creg_decl(&mut self) -> ParseResult<()> {
        self.expect(&Token::Creg)?;
        let name = self.parse_identifier()?;
        self.expect(&Token::LBracket)?;
        let size = self.parse_int_literal()?;
        self.expect(&Token::RBracket)?;
        self.expect(&Token::Semicolon)?;

        if self.cregs.contains_key(&name) {
            return Err(ParseError::DuplicateDeclaration(name));
        }
        self.cregs.insert(name, (self.num_clbits, size));
        self.num_clbits += size;
        Ok(())
    }

    /// Parse one operation (gate call, measure, reset, or barrier) and
    /// append it to the circuit.
    fn parse_operation(&mut self, circuit: &mut Circuit) -> ParseResult<()> {
        let token = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("operation".into()))?;

        match token {
            Token::Measure => self.parse_measure(circuit),
            Token::Reset => self.parse_reset(circuit),
            Token::Barrier => self.parse_barrier(circuit),
            Token::GateU => self.parse_gate_call("u".into(), circuit),
            Token::GateCX => self.parse_gate_call("cx".into(), circuit),
            Token::Identifier(name) => self.parse_gate_call(name, circuit),
            other => Err(ParseError::UnexpectedToken {
                expected: "operation".into(),
                found: other.to_string(),
            }),
        }
    }

    fn parse_measure(&mut self, circuit: &mut Circuit) -> ParseResult<()> {
        let source = self.parse_reg_ref()?;
        self.expect(&Token::Arrow)?;
        let target = self.parse_reg_ref()?;
        self.expect(&Token::Semicolon)?;

        let qubits = self.expand_qubits(&source)?;
        let clbits = self.expand_clbits(&target)?;
        if qubits.len() != clbits.len() {
            return Err(ParseError::WrongQubitCount {
                gate: "measure".into(),
                expected: clbits.len(),
                got: qubits.len(),
            });
        }

        for (q, c) in qubits.into_iter().zip(clbits) {
            circuit.measure(q, c)?;
        }
        Ok(())
    }

    fn parse_reset(&mut self, circuit: &mut Circuit) -> ParseResult<()> {
        let target = self.parse_reg_ref()?;
        self.expect(&Token::Semicolon)?;
        for q in self.expand_qubits(&target)? {
            circuit.reset(q)?;
        }
        Ok(())
    }

    fn parse_barrier(&mut self, circuit: &mut Circuit) -> ParseResult<()> {
        let mut qubits = Vec::new();
        loop {
            let r = self.parse_reg_ref()?;
            qubits.extend(self.expand_qubits(&r)?);
            if !self.consume(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::Semicolon)?;
        circuit.append(Instruction::barrier(qubits))?;
        Ok(())
    }

    fn parse_gate_call(&mut self, name: String, circuit: &mut Circuit) -> ParseResult<()> {
        let params = if self.consume(&Token::LParen) {
            let mut params = vec![self.parse_expression()?];
            while self.consume(&Token::Comma) {
                params.push(self.parse_expression()?);
            }
            self.expect(&Token::RParen)?;
            params
        } else {
            vec![]
        };

        let mut args = vec![self.parse_reg_ref()?];
        while self.consume(&Token::Comma) {
            args.push(self.parse_reg_ref()?);
        }
        self.expect(&Token::Semicolon)?;

        let gate = lookup_gate(&name, &params)?;
        let arity = gate.num_qubits() as usize;
        if args.len() != arity {
            return Err(ParseError::WrongQubitCount {
                gate: name,
                expected: arity,
                got: args.len(),
            });
        }

        // Whole-register broadcast applies to single-qubit gates only.
        if arity == 1 {
            for q in self.expand_qubits(&args[0])? {
                circuit.append(Instruction::single_qubit_gate(gate.clone(), q))?;
            }
            return Ok(());
        }

        let qubits: Vec<QubitId> = args
            .iter()
            .map(|r| match r {
                RegRef::Indexed(_, _) => Ok(self.expand_qubits(r)?[0]),
                RegRef::Whole(reg) => Err(ParseError::Unsupported(format!(
                    "whole-register argument '{reg}' to multi-qubit gate"
                ))),
            })
            .collect::<ParseResult<_>>()?;
        circuit.append(Instruction::gate(gate, qubits))?;
        Ok(())
    }

    fn parse_reg_ref(&mut self) -> ParseResult<RegRef> {
        let name = self.parse_identifier()?;
        if self.consume(&Token::LBracket) {
            let index = self.parse_int_literal()?;
            self.expect(&Token::RBracket)?;
            Ok(RegRef::Indexed(name, index))
        } else {
            Ok(RegRef::Whole(name))
        }
    }

    fn expand_qubits(&self, r: &RegRef) -> ParseResult<Vec<QubitId>> {
        let (qreg_name, qreg_size) = self
            .qreg
            .as_ref()
            .ok_or_else(|| ParseError::UndefinedIdentifier("qreg".into()))?;

        match r {
            RegRef::Indexed(name, index) => {
                if name != qreg_name {
                    return Err(ParseError::UndefinedIdentifier(name.clone()));
                }
                if *index >= *qreg_size {
                    return Err(ParseError::IndexOutOfBounds {
                        register: name.clone(),
                        index: *index,
                        size: *qreg_size,
                    });
                }
                Ok(vec![QubitId(*index as u32)])
            }
            RegRef::Whole(name) => {
                if name != qreg_name {
                    return Err(ParseError::UndefinedIdentifier(name.clone()));
                }
                Ok((0..*qreg_size).map(|i| QubitId(i as u32)).collect())
            }
        }
    }

    fn expand_clbits(&self, r: &RegRef) -> ParseResult<Vec<ClbitId>> {
        let name = match r {
            RegRef::Indexed(name, _) | RegRef::Whole(name) => name,
        };
        let (offset, size) = self
            .cregs
            .get(name)
            .ok_or_else(|| ParseError::UndefinedIdentifier(name.clone()))?;

        match r {
            RegRef::Indexed(_, index) => {
                if *index >= *size {
                    return Err(ParseError::IndexOutOfBounds {
                        register: name.clone(),
                        index: *index,
                        size: *size,
                    });
                }
                Ok(vec![ClbitId((offset + index) as u32)])
            }
            RegRef::Whole(_) => Ok((*offset..offset + size).map(|i| ClbitId(i as u32)).collect()),
        }
    }

    /// Parse a constant parameter expression.
    fn parse_expression(&mut self) -> ParseResult<f64> {
        let mut value = self.parse_term()?;
        loop {
            if self.consume(&Token::Plus) {
                value += self.parse_term()?;
            } else if self.consume(&Token::Minus) {
                value -= self.parse_term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_term(&mut self) -> ParseResult<f64> {
        let mut value = self.parse_factor()?;
        loop {
            if self.consume(&Token::Star) {
                value *= self.parse_factor()?;
            } else if self.consume(&Token::Slash) {
                value /= self.parse_factor()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_factor(&mut self) -> ParseResult<f64> {
        match self.advance() {
            Some(Token::Minus) => Ok(-self.parse_factor()?),
            Some(Token::Pi) => Ok(std::f64::consts::PI),
            Some(Token::FloatLiteral(v)) => Ok(v),
            Some(Token::IntLiteral(v)) => Ok(v as f64),
            Some(Token::LParen) => {
                let value = self.parse_expression()?;
                self.expect(&Token::RParen)?;
                Ok(value)
            }
            Some(other) => Err(ParseError::UnexpectedToken {
                expected: "parameter expression".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("parameter expression".into())),
        }
    }
}

fn lookup_gate(name: &str, params: &[f64]) -> ParseResult<StandardGate> {
    let expect_params = |n: usize| -> ParseResult<()> {
        if params.len() == n {
            Ok(())
        } else {
            Err(ParseError::WrongParameterCount {
                gate: name.to_string(),
                expected: n,
                got: params.len(),
            })
        }
    };

    let gate = match name {
        "id" => StandardGate::I,
        "x" => StandardGate::X,
        "y" => StandardGate::Y,
        "z" => StandardGate::Z,
        "h" => StandardGate::H,
        "s" => StandardGate::S,
        "sdg" => StandardGate::Sdg,
        "t" => StandardGate::T,
        "tdg" => StandardGate::Tdg,
        "sx" => StandardGate::SX,
        "sxdg" => StandardGate::SXdg,
        "rx" => {
            expect_params(1)?;
            StandardGate::Rx(params[0])
        }
        "ry" => {
            expect_params(1)?;
            StandardGate::Ry(params[0])
        }
        "rz" => {
            expect_params(1)?;
            StandardGate::Rz(params[0])
        }
        "p" | "u1" => {
            expect_params(1)?;
            StandardGate::P(params[0])
        }
        "u" | "u3" => {
            expect_params(3)?;
            StandardGate::U(params[0], params[1], params[2])
        }
        "cx" => StandardGate::CX,
        "cy" => StandardGate::CY,
        "cz" => StandardGate::CZ,
        "ch" => StandardGate::CH,
        "swap" => StandardGate::Swap,
        "iswap" => StandardGate::ISwap,
        "crx" => {
            expect_params(1)?;
            StandardGate::CRx(params[0])
        }
        "cry" => {
            expect_params(1)?;
            StandardGate::CRy(params[0])
        }
        "crz" => {
            expect_params(1)?;
            StandardGate::CRz(params[0])
        }
        "cp" | "cu1" => {
            expect_params(1)?;
            StandardGate::CP(params[0])
        }
        "ccx" => StandardGate::CCX,
        "cswap" => StandardGate::CSwap,
        _ => return Err(ParseError::UnknownGate(name.to_string())),
    };

    // Parameterless gates reject stray parameter lists.
    if !matches!(
        name,
        "rx" | "ry" | "rz" | "p" | "u1" | "u" | "u3" | "crx" | "cry" | "crz" | "cp" | "cu1"
    ) {
        expect_params(0)?;
    }

    Ok(gate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_parse_bell() {
        let qasm = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[2];
            creg c[2];
            h q[0];
            cx q[0], q[1];
            measure q -> c;
        "#;
        let circuit = parse(qasm).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.count_ops().get("h"), Some(&1));
        assert_eq!(circuit.count_ops().get("cx"), Some(&1));
        assert_eq!(circuit.count_ops().get("measure"), Some(&2));
    }

    #[test]
    fn test_parse_parameterized() {
        let qasm = "OPENQASM 2.0; qreg q[1]; rx(pi/2) q[0];";
        let circuit = parse(qasm).unwrap();
        let gate = circuit.instructions().next().unwrap().as_gate().unwrap();
        match gate {
            StandardGate::Rx(theta) => assert!((theta - PI / 2.0).abs() < 1e-12),
            other => panic!("unexpected gate: {other:?}"),
        }
    }

    #[test]
    fn test_parse_expression_precedence() {
        let qasm = "OPENQASM 2.0; qreg q[1]; rz(1 + 2 * 3) q[0];";
        let circuit = parse(qasm).unwrap();
        let gate = circuit.instructions().next().unwrap().as_gate().unwrap();
        match gate {
            StandardGate::Rz(theta) => assert!((theta - 7.0).abs() < 1e-12),
            other => panic!("unexpected gate: {other:?}"),
        }
    }

    #[test]
    fn test_broadcast_single_qubit_gate() {
        let qasm = "OPENQASM 2.0; qreg q[3]; h q;";
        let circuit = parse(qasm).unwrap();
        assert_eq!(circuit.count_ops().get("h"), Some(&3));
    }

    #[test]
    fn test_second_qreg_rejected() {
        let qasm = "OPENQASM 2.0; qreg q[2]; qreg r[2];";
        let err = parse(qasm);
        assert!(matches!(err, Err(ParseError::TooManyQuantumRegisters(_))));
    }

    #[test]
    fn test_unknown_gate_rejected() {
        let qasm = "OPENQASM 2.0; qreg q[1]; foo q[0];";
        assert!(matches!(parse(qasm), Err(ParseError::UnknownGate(_))));
    }

    #[test]
    fn test_index_out_of_bounds() {
        let qasm = "OPENQASM 2.0; qreg q[2]; h q[5];";
        assert!(matches!(
            parse(qasm),
            Err(ParseError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_wrong_version_rejected() {
        let qasm = "OPENQASM 3.0; qreg q[1];";
        assert!(matches!(parse(qasm), Err(ParseError::InvalidVersion(_))));
    }

    #[test]
    fn test_gate_def_unsupported() {
        let qasm = "OPENQASM 2.0; gate foo a { h a; } qreg q[1];";
        assert!(matches!(parse(qasm), Err(ParseError::Unsupported(_))));
    }

    #[test]
    fn test_builtin_cx_uppercase() {
        let qasm = "OPENQASM 2.0; qreg q[2]; CX q[0], q[1];";
        let circuit = parse(qasm).unwrap();
        assert_eq!(circuit.count_ops().get("cx"), Some(&1));
    }
}
