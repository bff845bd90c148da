use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("BRL")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateFormatStyle {
    /// `dd/mm/yyyy`
    DayMonthYear,
    /// `mm/dd/yyyy`
    MonthDayYear,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MonthNames {
    Portuguese,
    English,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: Option<char>,
    pub date_format: DateFormatStyle,
    pub month_names: MonthNames,
}

impl LocaleConfig {
    /// Brazilian Portuguese: `1234,50`, `01/03/2025`.
    pub fn pt_br() -> Self {
        Self {
            language_tag: "pt-BR".into(),
            decimal_separator: ',',
            grouping_separator: None,
            date_format: DateFormatStyle::DayMonthYear,
            month_names: MonthNames::Portuguese,
        }
    }

    pub fn en_us() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: Some(','),
            date_format: DateFormatStyle::MonthDayYear,
            month_names: MonthNames::English,
        }
    }

    /// Resolves a language tag to a preset, falling back to `pt-BR`.
    pub fn for_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Self::en_us(),
            _ => Self::pt_br(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::pt_br()
    }
}

/// Formats amounts the way reports and listings display them.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountFormatter {
    pub code: CurrencyCode,
    pub locale: LocaleConfig,
}

impl AmountFormatter {
    pub fn new(code: CurrencyCode, locale: LocaleConfig) -> Self {
        Self { code, locale }
    }

    pub fn amount(&self, value: f64) -> String {
        format_currency_value(value, &self.code, &self.locale)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        format_date(&self.locale, date)
    }
}

impl Default for AmountFormatter {
    fn default() -> Self {
        Self::new(CurrencyCode::default(), LocaleConfig::default())
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "BRL" => "R$".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part)),
        None => (body.clone(), None),
    };
    let int_part = match locale.grouping_separator {
        Some(separator) => group_digits(&int_part, separator),
        None => int_part,
    };
    match frac_part {
        Some(frac) => format!("{}{}{}", int_part, locale.decimal_separator, frac),
        None => int_part,
    }
}

fn group_digits(int_part: &str, separator: char) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    format!("{}{}", sign, grouped)
}

/// `R$ 200,50`. The sign stays next to the digits: `R$ -15,00`.
pub fn format_currency_value(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount, precision);
    format!("{} {}", symbol_for(code.as_str()), body)
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::DayMonthYear => date.format("%d/%m/%Y").to_string(),
        DateFormatStyle::MonthDayYear => date.format("%m/%d/%Y").to_string(),
    }
}

pub fn month_name(names: MonthNames, month: u32) -> &'static str {
    const PORTUGUESE: [&str; 12] = [
        "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto",
        "Setembro", "Outubro", "Novembro", "Dezembro",
    ];
    const ENGLISH: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ];
    let table = match names {
        MonthNames::Portuguese => &PORTUGUESE,
        MonthNames::English => &ENGLISH,
    };
    month
        .checked_sub(1)
        .and_then(|index| table.get(index as usize))
        .copied()
        .unwrap_or("")
}

/// Default label offered when starting a period: `Março/2025`.
pub fn suggested_period_label(locale: &LocaleConfig, today: NaiveDate) -> String {
    format!(
        "{}/{}",
        month_name(locale.month_names, today.month()),
        today.year()
    )
}
