//! Mint form state: raw text fields parsed into a mint request on submit.

use bevy::prelude::*;

use crate::data::MintRequest;

#[derive(Resource, Clone, Debug, PartialEq, Eq)]
pub struct MintForm {
    pub name: String,
    pub w: String,
    pub h: String,
    pub d: String,
    pub x: String,
    pub y: String,
    pub z: String,
}

impl Default for MintForm {
    fn default() -> Self {
        let defaults = MintRequest::default();
        Self {
            name: defaults.name,
            w: defaults.w.to_string(),
            h: defaults.h.to_string(),
            d: defaults.d.to_string(),
            x: defaults.x.to_string(),
            y: defaults.y.to_string(),
            z: defaults.z.to_string(),
        }
    }
}

impl MintForm {
    /// Numeric fields that do not parse become 0.
    pub fn to_request(&self) -> MintRequest {
        MintRequest {
            name: self.name.clone(),
            w: parse_int(&self.w),
            h: parse_int(&self.h),
            d: parse_int(&self.d),
            x: parse_int(&self.x),
            y: parse_int(&self.y),
            z: parse_int(&self.z),
        }
    }

    /// Labelled numeric fields in display order.
    pub fn numeric_fields_mut(&mut self) -> [(&'static str, &mut String); 6] {
        [
            ("Width", &mut self.w),
            ("Height", &mut self.h),
            ("Depth", &mut self.d),
            ("X", &mut self.x),
            ("Y", &mut self.y),
            ("Z", &mut self.z),
        ]
    }
}

/// Leading-integer parse: optional sign, then digits; anything else is 0.
fn parse_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().map(|value| sign * value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unit_box_at_origin() {
        let request = MintForm::default().to_request();

        assert_eq!(request, MintRequest::default());
        assert_eq!((request.w, request.h, request.d), (1, 1, 1));
        assert_eq!((request.x, request.y, request.z), (0, 0, 0));
    }

    #[test]
    fn integer_parsing_matches_lenient_form_input() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("  -7"), -7);
        assert_eq!(parse_int("+3"), 3);
        assert_eq!(parse_int("12px"), 12);
        assert_eq!(parse_int("3.9"), 3);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int("-"), 0);
    }

    #[test]
    fn unparsable_fields_fall_back_to_zero() {
        let form = MintForm {
            name: "Tower".into(),
            w: "2".into(),
            h: "ten".into(),
            ..MintForm::default()
        };

        let request = form.to_request();

        assert_eq!(request.name, "Tower");
        assert_eq!(request.w, 2);
        assert_eq!(request.h, 0);
        assert_eq!(request.d, 1);
    }
}
