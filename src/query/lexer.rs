//! Лексический анализатор языка фильтров advisorydb
//!
//! Преобразует входной текст в последовательность токенов. Токены
//! разделяются пробельными символами; литералы с пробелами берутся
//! в двойные кавычки, экранирование через `\`.

use crate::common::{Error, Result};
use crate::query::token::{keyword_map, Position, Token, TokenKind};
use std::collections::HashMap;

/// Лексический анализатор языка фильтров
pub struct Lexer {
    /// Исходный текст
    input: Vec<char>,
    /// Текущая позиция в тексте
    position: usize,
    /// Порядковый номер следующего токена
    index: usize,
    /// Карта ключевых слов
    keywords: HashMap<&'static str, TokenKind>,
}

impl Lexer {
    /// Создает новый лексический анализатор
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            index: 0,
            keywords: keyword_map(),
        }
    }

    /// Разбирает весь вход в последовательность токенов
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Возвращает следующий токен или `None` в конце входа
    fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace();
        let Some(&c) = self.input.get(self.position) else {
            return Ok(None);
        };
        let start = self.position;
        let token = match c {
            '$' => self.read_field(start)?,
            '"' => self.read_quoted(start)?,
            _ => self.read_word(start),
        };
        self.index += 1;
        Ok(Some(token))
    }

    fn skip_whitespace(&mut self) {
        while self
            .input
            .get(self.position)
            .is_some_and(|c| c.is_whitespace())
        {
            self.position += 1;
        }
    }

    /// Читает ссылку на поле: `$` и имя из букв, цифр и `_`
    fn read_field(&mut self, start: usize) -> Result<Token> {
        self.position += 1; // пропускаем '$'
        let mut name = String::new();
        while let Some(&c) = self.input.get(self.position) {
            if c.is_alphanumeric() || c == '_' {
                name.push(c);
                self.position += 1;
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(Error::parse(format!(
                "empty field name at offset {}",
                start
            )));
        }
        Ok(Token::new(
            TokenKind::Field,
            name,
            Position::new(self.index, start),
        ))
    }

    /// Читает литерал в двойных кавычках с `\`-экранированием
    fn read_quoted(&mut self, start: usize) -> Result<Token> {
        self.position += 1; // пропускаем открывающую кавычку
        let mut value = String::new();
        loop {
            match self.input.get(self.position) {
                Some('"') => {
                    self.position += 1;
                    break;
                }
                Some('\\') => {
                    self.position += 1;
                    match self.input.get(self.position) {
                        Some(&escaped) => {
                            value.push(escaped);
                            self.position += 1;
                        }
                        None => {
                            return Err(Error::parse(format!(
                                "unterminated string starting at offset {}",
                                start
                            )));
                        }
                    }
                }
                Some(&c) => {
                    value.push(c);
                    self.position += 1;
                }
                None => {
                    return Err(Error::parse(format!(
                        "unterminated string starting at offset {}",
                        start
                    )));
                }
            }
        }
        Ok(Token::new(
            TokenKind::Literal,
            value,
            Position::new(self.index, start),
        ))
    }

    /// Читает слово до пробельного символа и классифицирует его
    fn read_word(&mut self, start: usize) -> Token {
        let mut word = String::new();
        while let Some(&c) = self.input.get(self.position) {
            if c.is_whitespace() {
                break;
            }
            word.push(c);
            self.position += 1;
        }
        let kind = self
            .keywords
            .get(word.as_str())
            .copied()
            .unwrap_or(TokenKind::Literal);
        Token::new(kind, word, Position::new(self.index, start))
    }
}
