use chrono::{NaiveDate, Utc};
use log::{debug, info};

use crate::model::{CustomerId, IssuedNumber};
use crate::state::Ledger;
use crate::template::formatter::{self, Context};

/// Идентификатор генератора номеров по настраиваемому шаблону.
pub const GENERATOR_ID: &str = "default";

/// Вычисляет следующий номер, ничего не записывая в журнал.
pub fn next_number(
    ledger: &Ledger,
    template: &str,
    date: NaiveDate,
    customer: Option<&CustomerId>,
) -> formatter::Result {
    let counters = ledger.counters_at(date);

    let ctx = Context::new()
        .with_date(date)
        .with_counters(&counters)
        .with_customer(customer);

    formatter::format(template, &ctx)
}

/// Вычисляет следующий номер и записывает его в журнал.
///
/// Сохранение журнала остаётся на вызывающей стороне. Два процесса, работающие
/// с одним журналом одновременно, могут получить одинаковый номер, второй из
/// них получит ошибку при записи только если увидит запись первого.
pub fn issue(
    ledger: &mut Ledger,
    template: &str,
    date: NaiveDate,
    customer: Option<&CustomerId>,
) -> anyhow::Result<IssuedNumber> {
    debug!("Issue number with {} generator", GENERATOR_ID);

    let number = next_number(ledger, template, date, customer)?;

    let issued = IssuedNumber {
        number,
        date,
        customer: customer.cloned(),
        issued_at: Utc::now(),
    };

    ledger.record(issued.clone())?;

    info!("Issued number {} for {}", issued.number, date);

    Ok(issued)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RecordError;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sequence_within_year() {
        let mut ledger = Ledger::default();
        let template = "{Y}-{cy,3}";

        let numbers: Vec<String> = [ymd(2024, 1, 2), ymd(2024, 5, 6), ymd(2024, 12, 31)]
            .into_iter()
            .map(|d| issue(&mut ledger, template, d, None).unwrap().number)
            .collect();
        assert_eq!(vec!["2024-001", "2024-002", "2024-003"], numbers);

        // Новый год, новый счётчик.
        let next = issue(&mut ledger, template, ymd(2025, 1, 1), None).unwrap();
        assert_eq!("2025-001", next.number);
    }

    #[test]
    fn customer_sequence() {
        let mut ledger = Ledger::default();
        let template = "{ccy}/{c}";
        let acme = CustomerId::new("acme").unwrap();
        let globex = CustomerId::new("globex").unwrap();
        let date = ymd(2024, 3, 7);

        assert_eq!("1/1", issue(&mut ledger, template, date, Some(&acme)).unwrap().number);
        assert_eq!("1/2", issue(&mut ledger, template, date, Some(&globex)).unwrap().number);
        assert_eq!("2/3", issue(&mut ledger, template, date, Some(&acme)).unwrap().number);
    }

    #[test]
    fn preview_does_not_advance() {
        let ledger = Ledger::default();
        let date = ymd(2024, 3, 7);

        assert_eq!("1", next_number(&ledger, "{c}", date, None).unwrap());
        assert_eq!("1", next_number(&ledger, "{c}", date, None).unwrap());
        assert!(ledger.issued.is_empty());
    }

    #[test]
    fn increment_skips_numbers() {
        let mut ledger = Ledger::default();
        let date = ymd(2024, 3, 7);

        issue(&mut ledger, "{c}", date, None).unwrap();
        assert_eq!("14", next_number(&ledger, "{c+13,2}", date, None).unwrap());
    }

    #[test]
    fn template_without_counters_repeats() {
        let mut ledger = Ledger::default();
        let date = ymd(2024, 3, 7);

        issue(&mut ledger, "{date}", date, None).unwrap();
        let err = issue(&mut ledger, "{date}", date, None).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RecordError>(),
            Some(RecordError::Duplicate(n)) if n == "240307"
        ));
        assert_eq!(1, ledger.issued.len());
    }
}
