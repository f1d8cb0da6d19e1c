//! Lead form field value objects and input masks

/// Number of digits in a US ZIP code
pub const ZIP_LENGTH: usize = 5;

/// Number of digits in a US phone number (without country code)
pub const PHONE_DIGITS: usize = 10;

/// Draft fields the controller accepts input for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    ZipCode,
    AgeRange,
    Name,
    Phone,
}

impl LeadField {
    /// Field label shown above the input
    pub fn label(&self) -> &'static str {
        match self {
            Self::ZipCode => "Código Postal (ZIP Code)",
            Self::AgeRange => "Rango de edad",
            Self::Name => "Tu Nombre",
            Self::Phone => "Número de Teléfono",
        }
    }

    /// Example value rendered while the input is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::ZipCode => "Ej: 33101",
            Self::AgeRange => "",
            Self::Name => "Ej: María García",
            Self::Phone => "(555) 123-4567",
        }
    }

    /// Normalize a raw input value the way the draft stores it
    pub fn sanitize(&self, raw: &str) -> String {
        match self {
            Self::ZipCode => sanitize_zip(raw),
            Self::Phone => format_phone(raw),
            Self::AgeRange | Self::Name => raw.to_string(),
        }
    }

    /// Raw value after typing `c` at the end of `current`
    pub fn with_char(&self, current: &str, c: char) -> String {
        let mut raw = current.to_string();
        raw.push(c);
        raw
    }

    /// Raw value after a backspace on `current`.
    ///
    /// Masked phone numbers drop their last digit rather than the last mask
    /// character, otherwise deleting the `)` or `-` would be reformatted away.
    pub fn without_last(&self, current: &str) -> String {
        match self {
            Self::Phone => {
                let mut digits = digits_only(current);
                digits.pop();
                digits
            }
            _ => {
                let mut raw = current.to_string();
                raw.pop();
                raw
            }
        }
    }
}

/// Keep only ASCII digits
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Strip non-digits and cap at five characters
pub fn sanitize_zip(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(ZIP_LENGTH)
        .collect()
}

/// Apply the positional `(ddd) ddd-dddd` mask to the digits of `raw`.
///
/// Digits past the tenth are dropped.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_DIGITS)
        .collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}
