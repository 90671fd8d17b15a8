use log::debug;

use crate::counter::CounterScope;

/// Разобранный плейсхолдер вида `{<key>[+<increment>][,<width>]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub key: Key,

    /// На сколько продвигается счётчик. Бывает только у счётчиков.
    pub increment: Option<i64>,

    /// Ширина, до которой значение добивается нулями слева.
    /// `None` если ширина не задана или задана некорректно.
    pub width: Option<usize>,
}

/// Что подставляется вместо плейсхолдера.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Date(DateField),
    Counter(CounterScope),
}

/// Части даты документа.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// `date`, дата целиком в виде `yymmdd`.
    Date,
    /// `Y`, год из 4 цифр.
    LongYear,
    /// `y`, год из 2 цифр.
    ShortYear,
    /// `M`, месяц с ведущим нулём.
    PaddedMonth,
    /// `m`, месяц без ведущего нуля.
    Month,
    /// `D`, день с ведущим нулём.
    PaddedDay,
    /// `d`, день без ведущего нуля.
    Day,
}

impl Token {
    /// Разбирает содержимое плейсхолдера (без фигурных скобок).
    /// Возвращает `None`, если это не известный нам плейсхолдер.
    pub fn parse(body: &str) -> Option<Self> {
        match placeholder::token(body) {
            Ok(t) => Some(t),
            Err(e) => {
                debug!("Skip placeholder {{{}}}: {}", body, e);
                None
            }
        }
    }
}

/// Ширина принимается только если это непустая последовательность цифр.
/// Во всех остальных случаях значение выводится как есть.
fn parse_width(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

peg::parser! {
    grammar placeholder() for str {
        pub rule token() -> Token
            = k:counter_key() i:increment()? w:width()? {
                Token { key: Key::Counter(k), increment: i, width: w.flatten() }
            }
            / f:date_field() w:width()? {
                Token { key: Key::Date(f), increment: None, width: w.flatten() }
            }

        // Более длинные ключи должны идти раньше.
        rule counter_key() -> CounterScope
            = "ccy" { CounterScope::CustomerYear }
            / "ccm" { CounterScope::CustomerMonth }
            / "ccd" { CounterScope::CustomerDay }
            / "cc" { CounterScope::CustomerAll }
            / "cy" { CounterScope::Year }
            / "cm" { CounterScope::Month }
            / "cd" { CounterScope::Day }
            / "c" { CounterScope::All }

        rule date_field() -> DateField
            = "date" { DateField::Date }
            / "Y" { DateField::LongYear }
            / "y" { DateField::ShortYear }
            / "M" { DateField::PaddedMonth }
            / "m" { DateField::Month }
            / "D" { DateField::PaddedDay }
            / "d" { DateField::Day }

        rule increment() -> i64
            = "+" n:$("-"? digit()+) {? n.parse().or(Err("increment")) }

        rule width() -> Option<usize>
            = "," w:$([_]*) { parse_width(w) }

        rule digit() = ['0'..='9']
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(scope: CounterScope, increment: Option<i64>, width: Option<usize>) -> Token {
        Token {
            key: Key::Counter(scope),
            increment,
            width,
        }
    }

    fn date(field: DateField, width: Option<usize>) -> Token {
        Token {
            key: Key::Date(field),
            increment: None,
            width,
        }
    }

    macro_rules! parse_tests_success {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (expected, input) = $value;
                assert_eq!(Some(expected), Token::parse(input));
            }
        )*
        }
    }

    parse_tests_success! {
        parse_date: (date(DateField::Date, None), "date"),
        parse_long_year: (date(DateField::LongYear, None), "Y"),
        parse_short_year: (date(DateField::ShortYear, None), "y"),
        parse_padded_month: (date(DateField::PaddedMonth, Some(3)), "M,3"),
        parse_month: (date(DateField::Month, None), "m"),
        parse_padded_day: (date(DateField::PaddedDay, None), "D"),
        parse_day: (date(DateField::Day, Some(0)), "d,0"),
        parse_all: (counter(CounterScope::All, None, None), "c"),
        parse_year: (counter(CounterScope::Year, None, Some(5)), "cy,5"),
        parse_month_counter: (counter(CounterScope::Month, Some(-1), Some(2)), "cm+-1,2"),
        parse_day_counter: (counter(CounterScope::Day, Some(111), None), "cd+111"),
        parse_customer_all: (counter(CounterScope::CustomerAll, None, Some(2)), "cc,2"),
        parse_customer_year: (counter(CounterScope::CustomerYear, Some(1), Some(2)), "ccy+1,2"),
        parse_customer_month: (counter(CounterScope::CustomerMonth, Some(0), None), "ccm+0"),
        parse_customer_day: (counter(CounterScope::CustomerDay, None, None), "ccd"),
        parse_invalid_width_symbol: (date(DateField::LongYear, None), "Y,!"),
        parse_invalid_width_letter: (counter(CounterScope::Year, None, None), "cy,o"),
        parse_invalid_width_signed: (counter(CounterScope::All, None, None), "c,+5"),
        parse_invalid_width_list: (counter(CounterScope::All, None, None), "c,5,3"),
        parse_empty_width: (date(DateField::Date, None), "date,"),
    }

    macro_rules! parse_tests_fail {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                assert_eq!(None, Token::parse($value));
            }
        )*
        }
    }

    parse_tests_fail! {
        parse_unknown: "unknownkey",
        parse_empty: "",
        parse_date_with_increment: "Y+1",
        parse_missing_increment: "c+",
        parse_letter_increment: "c+x,2",
        parse_overflow_increment: "c+99999999999999999999",
        parse_trailing_garbage: "ccx",
        parse_partial_date: "dat",
        parse_whitespace: " Y ",
        parse_wrong_case: "C",
    }
}
