//! # Lexer for Universal Machine Assembly Language

use logos::Logos;

/// Tokens for UM assembly
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip whitespace (not newlines)
#[logos(skip r"[;#][^\n]*")] // Skip comments
pub enum Token {
    /// Identifier (instruction mnemonics, labels)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Register (r0-r7)
    #[regex(r"[rR][0-7]", |lex| lex.slice()[1..].parse::<u8>().ok())]
    Register(u8),

    /// Decimal number
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    /// Hexadecimal number
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| u64::from_str_radix(&lex.slice()[2..], 16).ok())]
    Hex(u64),

    /// Binary number
    #[regex(r"0[bB][01]+", |lex| u64::from_str_radix(&lex.slice()[2..], 2).ok())]
    Binary(u64),

    /// Character literal ('A', '\n')
    #[regex(r"'([^'\\\n]|\\.)'", |lex| char_literal(lex.slice()))]
    Char(u32),

    /// Directive (.word)
    #[regex(r"\.[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice()[1..].to_string())]
    Directive(String),

    /// Comma
    #[token(",")]
    Comma,

    /// Colon (for labels)
    #[token(":")]
    Colon,

    /// Newline
    #[regex(r"\n")]
    Newline,
}

fn char_literal(slice: &str) -> Option<u32> {
    let inner = &slice[1..slice.len() - 1];
    let mut chars = inner.chars();
    let value = match chars.next()? {
        '\\' => match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '\'' => '\'',
            _ => return None,
        },
        c => c,
    };
    Some(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_registers() {
        let mut lex = Token::lexer("r0 r7 R3");
        assert_eq!(lex.next(), Some(Ok(Token::Register(0))));
        assert_eq!(lex.next(), Some(Ok(Token::Register(7))));
        assert_eq!(lex.next(), Some(Ok(Token::Register(3))));
    }

    #[test]
    fn test_lexer_r8_is_identifier() {
        let mut lex = Token::lexer("r8 r10");
        assert_eq!(lex.next(), Some(Ok(Token::Identifier("r8".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::Identifier("r10".to_string()))));
    }

    #[test]
    fn test_lexer_numbers() {
        let mut lex = Token::lexer("42 -10 0x1A 0b1010");
        assert_eq!(lex.next(), Some(Ok(Token::Number(42))));
        assert_eq!(lex.next(), Some(Ok(Token::Number(-10))));
        assert_eq!(lex.next(), Some(Ok(Token::Hex(0x1A))));
        assert_eq!(lex.next(), Some(Ok(Token::Binary(0b1010))));
    }

    #[test]
    fn test_lexer_char_literals() {
        let mut lex = Token::lexer(r"'H' '\n' '\''");
        assert_eq!(lex.next(), Some(Ok(Token::Char(72))));
        assert_eq!(lex.next(), Some(Ok(Token::Char(10))));
        assert_eq!(lex.next(), Some(Ok(Token::Char(39))));
    }

    #[test]
    fn test_lexer_directive() {
        let mut lex = Token::lexer(".word 7");
        assert_eq!(lex.next(), Some(Ok(Token::Directive("word".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::Number(7))));
    }

    #[test]
    fn test_lexer_instruction() {
        let mut lex = Token::lexer("add r1, r2, r3 ; trailing comment");
        assert_eq!(lex.next(), Some(Ok(Token::Identifier("add".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::Register(1))));
        assert_eq!(lex.next(), Some(Ok(Token::Comma)));
        assert_eq!(lex.next(), Some(Ok(Token::Register(2))));
        assert_eq!(lex.next(), Some(Ok(Token::Comma)));
        assert_eq!(lex.next(), Some(Ok(Token::Register(3))));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_lexer_label() {
        let mut lex = Token::lexer("loop: halt");
        assert_eq!(lex.next(), Some(Ok(Token::Identifier("loop".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::Colon)));
        assert_eq!(lex.next(), Some(Ok(Token::Identifier("halt".to_string()))));
    }

    #[test]
    fn test_lexer_rejects_stray_symbol() {
        let mut lex = Token::lexer("@");
        assert_eq!(lex.next(), Some(Err(())));
    }
}
