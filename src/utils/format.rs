use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::vacancy::{Location, Salary};

pub const CURRENCY_SYMBOL: &str = "₹";
pub const SKILL_PREVIEW_LIMIT: usize = 4;
pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;

/// Groups the integer part in thousands: `1234567.5` -> `1,234,567.5`.
pub fn group_thousands(amount: Decimal) -> String {
    let normalized = amount.normalize().to_string();
    let (sign, unsigned) = match normalized.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", normalized.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn money(amount: Decimal) -> String {
    format!("{}{}", CURRENCY_SYMBOL, group_thousands(amount))
}

/// Renders a salary range; `None` when neither bound is set. Zero counts as
/// unset.
pub fn salary_range(salary: &Salary) -> Option<String> {
    let min = salary.min.filter(|v| !v.is_zero());
    let max = salary.max.filter(|v| !v.is_zero());
    match (min, max) {
        (Some(min), Some(max)) => Some(format!("{} - {}", money(min), money(max))),
        (Some(min), None) => Some(format!("{}+", money(min))),
        (None, Some(max)) => Some(format!("Up to {}", money(max))),
        (None, None) => None,
    }
}

/// "City, State", either part alone, or `None` when both are blank.
pub fn location_label(location: &Location) -> Option<String> {
    let city = location.city.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let state = location.state.as_deref().map(str::trim).filter(|s| !s.is_empty());
    match (city, state) {
        (Some(c), Some(s)) => Some(format!("{}, {}", c, s)),
        (Some(c), None) => Some(c.to_string()),
        (None, Some(s)) => Some(s.to_string()),
        (None, None) => None,
    }
}

/// First few skills plus a "+N more" marker for the rest.
pub fn skill_preview(skills: &[String]) -> (Vec<String>, Option<String>) {
    let shown = skills.iter().take(SKILL_PREVIEW_LIMIT).cloned().collect();
    let more = (skills.len() > SKILL_PREVIEW_LIMIT)
        .then(|| format!("+{} more", skills.len() - SKILL_PREVIEW_LIMIT));
    (shown, more)
}

pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        let head: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// `01 April 2024`
pub fn deadline_label(deadline: DateTime<Utc>) -> String {
    deadline.format("%d %B %Y").to_string()
}

/// Badge for the number of applicants; nothing for zero or unknown.
pub fn applied_badge(counts: &HashMap<String, u64>, job_id: &str) -> Option<String> {
    match counts.get(job_id).copied() {
        None | Some(0) => None,
        Some(1) => Some("1 person applied".to_string()),
        Some(n) => Some(format!("{} people applied", n)),
    }
}

pub fn roles_pill(total: u64) -> String {
    if total == 1 {
        "1 role".to_string()
    } else {
        format!("{} roles", total)
    }
}
