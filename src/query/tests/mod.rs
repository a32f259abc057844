//! Тесты для языка фильтров

pub mod lexer_tests;
pub mod parser_tests;
