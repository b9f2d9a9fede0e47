/// Rubles per USD-equivalent unit
pub const USD_TO_RUB: f64 = 100.0;

const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';

pub fn usd_to_rub(usd: f64) -> i64 {
    (usd * USD_TO_RUB).round() as i64
}

#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub decimals: usize,
    /// Treat the input as USD-equivalent and convert to rubles first
    pub convert: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimals: 0,
            convert: true,
        }
    }
}

/// Groups the integer digits in threes separated by a no-break space
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a number the way ru-RU displays it: `1 234,50`
pub fn format_number(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rendered.as_str(), None),
    };

    let mut out = String::new();
    if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(fraction);
    }
    out
}

pub fn format_rubles(value: f64, options: FormatOptions) -> String {
    let value = if options.convert {
        usd_to_rub(value) as f64
    } else {
        value
    };
    format!("{} ₽", format_number(value, options.decimals))
}
