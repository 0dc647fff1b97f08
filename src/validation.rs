//! validation.rs
//! Reglas de validación por campo (email, CURP, teléfono, URL, pagos...) y un
//! acumulador que junta todos los errores de una petición.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::Serialize;

macro_rules! field_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

field_pattern!(
    RE_EMAIL,
    r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9\-]+(?:\.[a-zA-Z0-9\-]+)*\.[a-zA-Z]{2,}$"
);
field_pattern!(RE_CURP, r"^[A-Z0-9]{18}$");
field_pattern!(RE_PHONE, r"^\+?[0-9\s\-()]+$");
field_pattern!(RE_URL, r"^https?://[A-Za-z0-9\-._~%]+(?::\d{1,5})?(?:[/?#]\S*)?$");
field_pattern!(RE_GRADO_GRUPO, r"^[1-3][A-Z]$");
field_pattern!(RE_MODALIDAD, r"^[A-Z]{1,2}$");
field_pattern!(RE_USERNAME, r"^[\w.@+\-]{1,150}$");

fn matches(re: &LazyLock<Option<Regex>>, value: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(value))
}

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_URL_LEN: usize = 200;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_TIPO_INSCRIPCION_LEN: usize = 10;
pub const MAX_USERNAME_LEN: usize = 150;
pub const MAX_GROUP_NAME_LEN: usize = 150;
pub const MIN_PASSWORD_LEN: usize = 8;

/// 10 dígitos con 2 decimales, como el `DecimalField(max_digits=10, decimal_places=2)`.
pub const MAX_MONTO: f64 = 99_999_999.99;

/// Formas de pago del catálogo del SAT aceptadas por la escuela.
pub const PAYMENT_METHODS: &[(&str, &str)] = &[
    ("01", "Efectivo"),
    ("02", "Cheque nominativo"),
    ("03", "Transferencia electrónica de fondos"),
    ("04", "Tarjeta de crédito"),
    ("28", "Tarjeta de débito"),
    ("99", "Por definir"),
];

pub const SEXOS: &[&str] = &["H", "M"];

/// D = diestro, Z = zurdo, A = ambidiestro
pub const LATERALIDADES: &[&str] = &["D", "Z", "A"];

pub type RuleResult = Result<(), String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        ValidationErrors(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Acumula el resultado de cada regla y falla una sola vez al final.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, field: &str, result: RuleResult) -> &mut Self {
        if let Err(message) = result {
            self.errors.push(FieldError {
                field: field.to_string(),
                message,
            });
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(std::mem::take(&mut self.errors)))
        }
    }
}

// ----------------------------------------------------------------------------
// Normalización
// ----------------------------------------------------------------------------

pub fn normalize_code(value: &str) -> String {
    value.trim().to_uppercase()
}

pub fn normalize_text(value: &str) -> String {
    value.trim().to_string()
}

// ----------------------------------------------------------------------------
// Reglas
// ----------------------------------------------------------------------------

pub fn required_text(value: &str, max_len: usize) -> RuleResult {
    let value = value.trim();
    if value.is_empty() {
        return Err("no puede estar vacío".to_string());
    }
    if value.chars().count() > max_len {
        return Err(format!("no puede exceder {} caracteres", max_len));
    }
    Ok(())
}

pub fn email(value: &str) -> RuleResult {
    let value = value.trim();
    if value.len() > MAX_EMAIL_LEN {
        return Err(format!("no puede exceder {} caracteres", MAX_EMAIL_LEN));
    }
    if !matches(&RE_EMAIL, value) {
        return Err(format!("'{}' no es un correo electrónico válido", value));
    }
    Ok(())
}

pub fn curp(value: &str) -> RuleResult {
    let value = normalize_code(value);
    if value.chars().count() != 18 {
        return Err(format!(
            "la CURP debe tener 18 caracteres (tiene {})",
            value.chars().count()
        ));
    }
    if !matches(&RE_CURP, &value) {
        return Err("la CURP solo admite letras y dígitos".to_string());
    }
    Ok(())
}

pub fn phone(value: &str) -> RuleResult {
    let value = value.trim();
    if value.len() > MAX_PHONE_LEN {
        return Err(format!("no puede exceder {} caracteres", MAX_PHONE_LEN));
    }
    if !matches(&RE_PHONE, value) {
        return Err(format!("'{}' no es un teléfono válido", value));
    }
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !(10..=15).contains(&digits) {
        return Err(format!(
            "el teléfono debe tener entre 10 y 15 dígitos (tiene {})",
            digits
        ));
    }
    Ok(())
}

pub fn url(value: &str) -> RuleResult {
    let value = value.trim();
    if value.len() > MAX_URL_LEN {
        return Err(format!("no puede exceder {} caracteres", MAX_URL_LEN));
    }
    if !matches(&RE_URL, value) {
        return Err(format!("'{}' no es una URL http(s) válida", value));
    }
    Ok(())
}

/// Igual que `url`, pero la cadena vacía es válida.
pub fn optional_url(value: &str) -> RuleResult {
    if value.trim().is_empty() {
        Ok(())
    } else {
        url(value)
    }
}

pub fn sexo(value: &str) -> RuleResult {
    one_of(&normalize_code(value), SEXOS)
}

pub fn lateralidad(value: &str) -> RuleResult {
    one_of(&normalize_code(value), LATERALIDADES)
}

pub fn grado_grupo(value: &str) -> RuleResult {
    if matches(&RE_GRADO_GRUPO, &normalize_code(value)) {
        Ok(())
    } else {
        Err(format!(
            "'{}' no es un grado/grupo válido (ej. 1A, 3C)",
            value.trim()
        ))
    }
}

pub fn payment_method(value: &str) -> RuleResult {
    let value = value.trim();
    if PAYMENT_METHODS.iter().any(|(code, _)| *code == value) {
        Ok(())
    } else {
        let codes: Vec<&str> = PAYMENT_METHODS.iter().map(|(code, _)| *code).collect();
        Err(format!(
            "'{}' no es un método de pago válido; use uno de {}",
            value,
            codes.join(", ")
        ))
    }
}

pub fn earliest_payment_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

pub fn payment_date(value: NaiveDate) -> RuleResult {
    payment_date_at(value, Local::now().date_naive())
}

pub fn payment_date_at(value: NaiveDate, today: NaiveDate) -> RuleResult {
    let earliest = earliest_payment_date();
    if value < earliest {
        return Err(format!("la fecha de pago no puede ser anterior a {}", earliest));
    }
    if value > today {
        return Err(format!("la fecha de pago {} está en el futuro", value));
    }
    Ok(())
}

pub fn amount(value: f64) -> RuleResult {
    if !value.is_finite() {
        return Err("el monto debe ser un número finito".to_string());
    }
    if value <= 0.0 {
        return Err("el monto debe ser mayor a 0".to_string());
    }
    if value > MAX_MONTO {
        return Err(format!("el monto no puede exceder {:.2}", MAX_MONTO));
    }
    let cents = value * 100.0;
    if (cents - cents.round()).abs() > 1e-6 {
        return Err("el monto admite como máximo 2 decimales".to_string());
    }
    Ok(())
}

/// Redondea a centavos.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn discount(value: i64) -> RuleResult {
    if (0..=100).contains(&value) {
        Ok(())
    } else {
        Err(format!("el descuento debe estar entre 0 y 100 (recibido {})", value))
    }
}

pub fn positive_id(value: i64) -> RuleResult {
    if value > 0 {
        Ok(())
    } else {
        Err(format!("debe ser un entero positivo (recibido {})", value))
    }
}

pub fn modalidad_pago(value: &str) -> RuleResult {
    if matches(&RE_MODALIDAD, &normalize_code(value)) {
        Ok(())
    } else {
        Err(format!("'{}' no es una modalidad de pago válida", value.trim()))
    }
}

pub fn username(value: &str) -> RuleResult {
    if matches(&RE_USERNAME, value) {
        Ok(())
    } else {
        Err(format!(
            "el usuario debe tener entre 1 y {} caracteres: letras, dígitos y @.+-_",
            MAX_USERNAME_LEN
        ))
    }
}

pub fn password(value: &str) -> RuleResult {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "la contraseña debe tener al menos {} caracteres",
            MIN_PASSWORD_LEN
        ));
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        return Err("la contraseña no puede ser solo numérica".to_string());
    }
    Ok(())
}

fn one_of(value: &str, allowed: &[&str]) -> RuleResult {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "'{}' no es válido; use uno de {}",
            value,
            allowed.join(", ")
        ))
    }
}
