use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use log::debug;
use regex::{Captures, Regex};

use crate::counter::CounterSource;
use crate::model::CustomerId;

use super::token::{DateField, Key, Token};

/// Плейсхолдер начинается с `{` и заканчивается первой же `}`, вложенности нет.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]*)\}").expect("placeholder pattern"));

/// Данные, по которым вычисляется номер.
///
/// Дата и источник счётчиков обязательны, заказчик нужен только для
/// счётчиков по заказчику.
#[derive(Default, Clone, Copy)]
pub struct Context<'a> {
    date: Option<NaiveDate>,
    counters: Option<&'a dyn CounterSource>,
    customer: Option<&'a CustomerId>,
}

impl<'a> Context<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_counters(mut self, counters: &'a dyn CounterSource) -> Self {
        self.counters = Some(counters);
        self
    }

    pub fn with_customer(mut self, customer: Option<&'a CustomerId>) -> Self {
        self.customer = customer;
        self
    }
}

/// Формирует номер по шаблону.
///
/// Неизвестные и некорректные плейсхолдеры остаются в результате как есть,
/// ошибкой считается только неполный контекст.
pub fn format(template: &str, ctx: &Context) -> Result {
    let date = ctx.date.ok_or(Error::InvalidContext("reference date"))?;
    let counters = ctx.counters.ok_or(Error::InvalidContext("counter source"))?;

    let resolver = Resolver {
        date,
        counters,
        customer: ctx.customer,
    };

    let result = PLACEHOLDER.replace_all(template, |caps: &Captures| {
        match Token::parse(&caps[1]) {
            Some(token) => resolver.resolve(&token),
            None => caps[0].to_owned(),
        }
    });

    debug!("Formatted {:?} as {:?}", template, result);

    Ok(result.into_owned())
}

/// Проверяет, есть ли в шаблоне счётчики по заказчику.
pub fn needs_customer(template: &str) -> bool {
    PLACEHOLDER.captures_iter(template).any(|caps| {
        matches!(
            Token::parse(&caps[1]),
            Some(Token { key: Key::Counter(scope), .. }) if scope.per_customer()
        )
    })
}

struct Resolver<'a> {
    date: NaiveDate,
    counters: &'a dyn CounterSource,
    customer: Option<&'a CustomerId>,
}

impl Resolver<'_> {
    fn resolve(&self, token: &Token) -> String {
        let value = match token.key {
            Key::Date(field) => self.date_value(field),
            Key::Counter(scope) => {
                let stored = self.counters.counter(scope, self.customer);
                // Счётчик всегда продвигается хотя бы на единицу.
                let increment = token.increment.unwrap_or(1).max(1).unsigned_abs();
                stored.saturating_add(increment).to_string()
            }
        };

        match token.width {
            Some(width) => pad(value, width),
            None => value,
        }
    }

    fn date_value(&self, field: DateField) -> String {
        match field {
            DateField::Date => self.date.format("%y%m%d").to_string(),
            DateField::LongYear => self.date.format("%Y").to_string(),
            DateField::ShortYear => self.date.format("%y").to_string(),
            DateField::PaddedMonth => self.date.format("%m").to_string(),
            DateField::Month => self.date.month().to_string(),
            DateField::PaddedDay => self.date.format("%d").to_string(),
            DateField::Day => self.date.day().to_string(),
        }
    }
}

/// Добивает значение нулями слева до ширины, но никогда не обрезает.
fn pad(value: String, width: usize) -> String {
    let missing = width.saturating_sub(value.chars().count());
    if missing == 0 {
        return value;
    }

    let mut padded = "0".repeat(missing);
    padded.push_str(&value);
    padded
}

pub type Result = std::result::Result<String, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid context: {0} is missing")]
    InvalidContext(&'static str),
}
