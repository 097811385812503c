use crate::domain::model::Country;

const MISSING: &str = "N/A";

/// Renders the six-line summary shown for a matched country.
pub fn format_summary(country: &Country) -> String {
    let capital = match country.capital.as_deref() {
        Some(capitals) if !capitals.is_empty() => capitals.join(", "),
        _ => MISSING.to_string(),
    };
    let subregion = country.subregion.as_deref().unwrap_or(MISSING);

    [
        format!("Country: {}", country.name.common),
        format!("Official Name: {}", country.name.official),
        format!("Capital: {}", capital),
        format!("Population: {}", group_thousands(country.population)),
        format!("Region: {}", country.region),
        format!("Subregion: {}", subregion),
    ]
    .join("\n")
}

pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
