use std::{cell::RefCell, collections::HashMap, fs, io, path::Path};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::counter::{CounterScope, CounterSource, Period};
use crate::model::{CustomerId, IssuedNumber};

/// Журнал выданных номеров.
/// Хранится между запусками и служит источником счётчиков.
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct Ledger {
    #[serde(default)]
    pub issued: Vec<IssuedNumber>,
}

impl Ledger {
    /// Возвращает счётчики на указанную дату документа.
    pub fn counters_at(&self, date: NaiveDate) -> LedgerCounters<'_> {
        LedgerCounters {
            ledger: self,
            date,
            cache: RefCell::default(),
        }
    }

    /// Проверяет, выдавался ли уже такой номер.
    pub fn contains(&self, number: &str) -> bool {
        self.issued.iter().any(|i| i.number == number)
    }

    /// Добавляет выданный номер в журнал.
    /// Это и есть продвижение счётчиков.
    pub fn record(&mut self, issued: IssuedNumber) -> RecordResult {
        if self.contains(&issued.number) {
            return Err(RecordError::Duplicate(issued.number));
        }

        self.issued.push(issued);

        Ok(())
    }
}

pub type RecordResult = std::result::Result<(), RecordError>;

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("number {0} was already issued")]
    Duplicate(String),
}

/// Счётчики журнала на конкретную дату.
///
/// Значение счётчика равно количеству выданных номеров в том же периоде, что и
/// дата документа. Посчитанные значения запоминаются.
pub struct LedgerCounters<'a> {
    ledger: &'a Ledger,
    date: NaiveDate,
    cache: RefCell<HashMap<(CounterScope, Option<CustomerId>), u64>>,
}

impl LedgerCounters<'_> {
    fn count(&self, scope: CounterScope, customer: Option<&CustomerId>) -> u64 {
        let same_period = |d: NaiveDate| match scope.period() {
            Period::All => true,
            Period::Year => d.year() == self.date.year(),
            Period::Month => d.year() == self.date.year() && d.month() == self.date.month(),
            Period::Day => d == self.date,
        };

        let n = self
            .ledger
            .issued
            .iter()
            .filter(|i| same_period(i.date))
            .filter(|i| !scope.per_customer() || i.customer.as_ref() == customer)
            .count();

        n as u64
    }
}

impl CounterSource for LedgerCounters<'_> {
    fn counter(&self, scope: CounterScope, customer: Option<&CustomerId>) -> u64 {
        // Для общих счётчиков заказчик не важен.
        let customer = customer.filter(|_| scope.per_customer()).cloned();
        let key = (scope, customer);

        if let Some(n) = self.cache.borrow().get(&key) {
            return *n;
        }

        let n = self.count(scope, key.1.as_ref());
        self.cache.borrow_mut().insert(key, n);
        n
    }
}

/// Загружает журнал из указанного файла.
pub fn load(path: &Path) -> LoadResult {
    if !path.exists() {
        return Ok(Ledger::default());
    }

    let path = path.canonicalize()?;

    let content = fs::read_to_string(path)?;

    let ledger: Ledger = serde_json::from_str(&content)?;

    Ok(ledger)
}

pub type LoadResult = std::result::Result<Ledger, LoadError>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("read ledger file")]
    ReadFile(#[from] io::Error),

    #[error("deserialize")]
    Deserialize(#[from] serde_json::Error),
}

/// Сохраняет журнал в указанный файл.
pub fn save(ledger: &Ledger, path: &Path) -> SaveResult {
    let content = serde_json::to_string_pretty(ledger)?;

    fs::create_dir_all(path.parent().unwrap_or(Path::new("")))?;

    fs::write(path, content)?;

    Ok(())
}

pub type SaveResult = std::result::Result<(), SaveError>;

#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("write ledger file")]
    WriteFile(#[from] io::Error),

    #[error("serialize")]
    Serialize(#[from] serde_json::Error),
}
