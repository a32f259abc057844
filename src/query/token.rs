//! Токены языка фильтров advisorydb
//!
//! Язык фильтров записывается в обратной польской нотации: операнды
//! разделены пробелами, операторы следуют за своими аргументами.

use std::collections::HashMap;
use std::fmt;

/// Позиция токена в исходном тексте
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Порядковый номер токена
    pub index: usize,
    /// Байтовое смещение начала токена
    pub offset: usize,
}

impl Position {
    pub fn new(index: usize, offset: usize) -> Self {
        Self { index, offset }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.index, self.offset)
    }
}

/// Токен с позицией и значением
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: String, position: Position) -> Self {
        Self {
            kind,
            value,
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}('{}') at {}", self.kind, self.value, self.position)
    }
}

/// Типы токенов языка фильтров
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Ссылка на поле (`$имя`)
    Field,
    /// Литерал (слово или строка в кавычках)
    Literal,

    // Булевы константы
    True,
    False,

    // Логические связки
    And,
    Or,
    Not,

    // Операторы сравнения
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Метки приведения типа литерала
    CastInt,
    CastString,
    CastBool,
    CastTime,
    CastWorkflow,
    CastTlp,
}

impl TokenKind {
    /// Проверяет, является ли токен оператором сравнения
    pub fn is_compare(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::Ne
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Gt
                | TokenKind::Ge
        )
    }

    /// Проверяет, является ли токен меткой приведения типа
    pub fn is_cast(&self) -> bool {
        matches!(
            self,
            TokenKind::CastInt
                | TokenKind::CastString
                | TokenKind::CastBool
                | TokenKind::CastTime
                | TokenKind::CastWorkflow
                | TokenKind::CastTlp
        )
    }

    /// Проверяет, является ли токен логической связкой
    pub fn is_logical(&self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Or | TokenKind::Not)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Field => "FIELD",
            TokenKind::Literal => "LITERAL",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Eq => "=",
            TokenKind::Ne => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::CastInt => "int",
            TokenKind::CastString => "string",
            TokenKind::CastBool => "bool",
            TokenKind::CastTime => "time",
            TokenKind::CastWorkflow => "workflow",
            TokenKind::CastTlp => "tlp",
        };
        write!(f, "{}", name)
    }
}

/// Карта ключевых слов и операторов для классификации слов
pub fn keyword_map() -> HashMap<&'static str, TokenKind> {
    let mut map = HashMap::new();

    map.insert("true", TokenKind::True);
    map.insert("false", TokenKind::False);

    map.insert("and", TokenKind::And);
    map.insert("or", TokenKind::Or);
    map.insert("not", TokenKind::Not);

    map.insert("=", TokenKind::Eq);
    map.insert("!=", TokenKind::Ne);
    map.insert("<", TokenKind::Lt);
    map.insert("<=", TokenKind::Le);
    map.insert(">", TokenKind::Gt);
    map.insert(">=", TokenKind::Ge);

    map.insert("int", TokenKind::CastInt);
    map.insert("string", TokenKind::CastString);
    map.insert("bool", TokenKind::CastBool);
    map.insert("time", TokenKind::CastTime);
    map.insert("workflow", TokenKind::CastWorkflow);
    map.insert("tlp", TokenKind::CastTlp);

    map
}
