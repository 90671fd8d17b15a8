use crate::model::CustomerId;

/// Период, за который считается счётчик.
#[derive(Debug, Clone, Copy, PartialEq, Eq, std::hash::Hash)]
pub enum Period {
    All,
    Year,
    Month,
    Day,
}

/// Все счётчики, которые можно использовать в шаблоне номера.
/// Отображаются так же, как записываются в шаблоне.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    std::hash::Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
pub enum CounterScope {
    #[display(fmt = "c")]
    All,
    #[display(fmt = "cy")]
    Year,
    #[display(fmt = "cm")]
    Month,
    #[display(fmt = "cd")]
    Day,
    #[display(fmt = "cc")]
    CustomerAll,
    #[display(fmt = "ccy")]
    CustomerYear,
    #[display(fmt = "ccm")]
    CustomerMonth,
    #[display(fmt = "ccd")]
    CustomerDay,
}

impl CounterScope {
    pub fn period(&self) -> Period {
        match self {
            Self::All | Self::CustomerAll => Period::All,
            Self::Year | Self::CustomerYear => Period::Year,
            Self::Month | Self::CustomerMonth => Period::Month,
            Self::Day | Self::CustomerDay => Period::Day,
        }
    }

    /// Считается ли счётчик только по текущему заказчику.
    pub fn per_customer(&self) -> bool {
        matches!(
            self,
            Self::CustomerAll | Self::CustomerYear | Self::CustomerMonth | Self::CustomerDay
        )
    }
}

/// Источник значений счётчиков.
///
/// Возвращает последнее использованное значение, то есть сколько номеров уже
/// было выдано в данном периоде. Сам источник ничего не изменяет.
pub trait CounterSource {
    fn counter(&self, scope: CounterScope, customer: Option<&CustomerId>) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use enum_iterator::{all, cardinality};

    #[test]
    fn eight_scopes() {
        assert_eq!(8, cardinality::<CounterScope>());
        assert_eq!(4, all::<CounterScope>().filter(|s| s.per_customer()).count());
    }

    macro_rules! display_tests {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (expected, scope, period) = $value;
                assert_eq!(expected, scope.to_string());
                assert_eq!(period, scope.period());
            }
        )*
        }
    }

    display_tests! {
        display_all: ("c", CounterScope::All, Period::All),
        display_year: ("cy", CounterScope::Year, Period::Year),
        display_month: ("cm", CounterScope::Month, Period::Month),
        display_day: ("cd", CounterScope::Day, Period::Day),
        display_customer_all: ("cc", CounterScope::CustomerAll, Period::All),
        display_customer_year: ("ccy", CounterScope::CustomerYear, Period::Year),
        display_customer_month: ("ccm", CounterScope::CustomerMonth, Period::Month),
        display_customer_day: ("ccd", CounterScope::CustomerDay, Period::Day),
    }
}
