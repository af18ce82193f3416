use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static GOLD: Lazy<Regex> = Lazy::new(|| denomination("金币"));
static SILVER: Lazy<Regex> = Lazy::new(|| denomination("银币"));
static COPPER: Lazy<Regex> = Lazy::new(|| denomination("铜币"));

// ASCII digits only: full-width numerals do not parse as amounts.
fn denomination(label: &str) -> Regex {
    Regex::new(&format!(r"([0-9]+){}", regex::escape(label))).expect("valid regex")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub gold: u64,
    pub silver: u64,
    pub copper: u64,
}

// Extracts gold/silver/copper amounts from free text such as "拾取了20金币和3银币".
// Only the first amount of each denomination counts; anything missing or unparsable is 0.
pub fn parse_currency(description: &str) -> Currency {
    Currency {
        gold: first_amount(&GOLD, description),
        silver: first_amount(&SILVER, description),
        copper: first_amount(&COPPER, description),
    }
}

fn first_amount(pattern: &Regex, text: &str) -> u64 {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|amount| amount.as_str().parse().ok())
        .unwrap_or(0)
}
