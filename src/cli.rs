use enum_iterator::all;
use inquire::validator::Validation;
use inquire::{Confirm, Text};

use crate::{
    counter::{CounterScope, CounterSource},
    model::CustomerId,
    state::Ledger,
};

/// Запрашивает заказчика, если шаблону он нужен, а его не передали.
pub fn ask_customer() -> anyhow::Result<CustomerId> {
    let prompt = Text::new("Заказчик").with_validator(|s: &str| {
        if let Err(e) = CustomerId::new(s) {
            return Ok(Validation::Invalid(e.to_string().into()));
        };
        Ok(Validation::Valid)
    });

    let val = prompt.prompt()?;

    CustomerId::new(&val)
}

/// Спрашивает подтверждение перед тем как выдать номер.
pub fn confirm(number: &str) -> anyhow::Result<bool> {
    let title = format!("Выдать номер \"{}\"?", number);

    let ok = Confirm::new(&title).with_default(true).prompt()?;

    Ok(ok)
}

/// Печатает значения всех счётчиков.
pub fn print_counters(counters: &dyn CounterSource, customer: Option<&CustomerId>) {
    for scope in all::<CounterScope>() {
        println!("{}: {}", scope, counters.counter(scope, customer));
    }
}

/// Печатает все выданные номера.
pub fn print_ledger(ledger: &Ledger) {
    for i in ledger.issued.iter() {
        let customer = i.customer.as_ref().map(CustomerId::as_str).unwrap_or("");
        println!("{}\t{}\t{}", i.date, i.number, customer);
    }
}
