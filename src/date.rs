use chrono::{Days, Local, NaiveDate};

/// Вычисляет дату документа из выражения, переданного пользователем.
///
/// Поддерживаются `today`, `yesterday`, `tomorrow` и даты в формате
/// `YYYY-MM-DD`.
pub fn resolve(expr: &str) -> Result {
    let expr = expr.trim();
    let today = Local::now().date_naive();

    let date = match expr {
        "today" => Some(today),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        _ => NaiveDate::parse_from_str(expr, "%Y-%m-%d").ok(),
    };

    date.ok_or_else(|| Error::InvalidDate(expr.to_owned()))
}

pub type Result = std::result::Result<NaiveDate, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid date \"{0}\", expected today, yesterday, tomorrow or YYYY-MM-DD")]
    InvalidDate(String),
}
