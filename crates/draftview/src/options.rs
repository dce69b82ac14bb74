//! Batch options and unit conversion.
//!
//! Lengths are entered in millimeters and meters and converted once, here,
//! into the host's internal unit. Everything downstream works in internal
//! units only.

use draftview_drafting::SectionKind;
use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Internal units per meter when the host works in feet.
pub const FEET_PER_METER: f64 = 3.280_839_895;

/// How generated views are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    /// `{type name}_{element id}`.
    #[default]
    TypeAndId,
    /// `{element name}_{level name}`.
    ElementAndLevel,
}

/// Options for one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Kind of view to generate.
    pub kind: SectionKind,
    /// Padding across the view (mm).
    pub offset_mm: f64,
    /// Distance within which an existing view counts as a duplicate (m).
    pub tolerance_m: f64,
    /// Frame linked model instances as context.
    pub include_links: bool,
    /// Half side of the plan window searched for context elements (m).
    pub search_half_length_m: f64,
    /// Section view type to create views from; the first available when
    /// unset.
    pub section_type: Option<String>,
    /// View template applied to new views.
    pub view_template: Option<String>,
    /// Put each new view on a new sheet.
    pub place_on_sheets: bool,
    /// Prefix of generated sheet numbers.
    pub sheet_prefix: String,
    /// View naming scheme.
    pub naming: NamingScheme,
    /// Host internal length units per meter.
    pub units_per_meter: f64,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            kind: SectionKind::Cross,
            offset_mm: 300.0,
            tolerance_m: 0.5,
            include_links: true,
            search_half_length_m: 50.0,
            section_type: None,
            view_template: None,
            place_on_sheets: true,
            sheet_prefix: "DV".to_string(),
            naming: NamingScheme::TypeAndId,
            units_per_meter: FEET_PER_METER,
        }
    }
}

impl BatchOptions {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Validate options.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.units_per_meter.is_finite() && self.units_per_meter > 0.0) {
            return Err(OptionsError::InvalidUnits(self.units_per_meter));
        }
        if !(self.tolerance_m.is_finite() && self.tolerance_m > 0.0) {
            return Err(OptionsError::InvalidTolerance(self.tolerance_m));
        }
        if !(self.offset_mm.is_finite() && self.offset_mm >= 0.0) {
            return Err(OptionsError::InvalidOffset(self.offset_mm));
        }
        if !(self.search_half_length_m.is_finite() && self.search_half_length_m > 0.0) {
            return Err(OptionsError::InvalidSearchLength(self.search_half_length_m));
        }
        Ok(())
    }

    /// Offset in internal units.
    pub fn offset(&self) -> f64 {
        self.offset_mm / 1000.0 * self.units_per_meter
    }

    /// Dedup tolerance in internal units.
    pub fn tolerance(&self) -> f64 {
        self.tolerance_m * self.units_per_meter
    }

    /// Context search half length in internal units.
    pub fn search_half_length(&self) -> f64 {
        self.search_half_length_m * self.units_per_meter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let options = BatchOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.kind, SectionKind::Cross);
        assert!(options.include_links);
    }

    #[test]
    fn test_conversion_to_feet() {
        let options = BatchOptions::default();
        assert_relative_eq!(options.offset(), 0.3 * FEET_PER_METER);
        assert_relative_eq!(options.tolerance(), 0.5 * FEET_PER_METER);
        assert_relative_eq!(options.search_half_length(), 50.0 * FEET_PER_METER);
    }

    #[test]
    fn test_conversion_to_meters() {
        let options = BatchOptions {
            units_per_meter: 1.0,
            ..BatchOptions::default()
        };
        assert_relative_eq!(options.offset(), 0.3);
        assert_relative_eq!(options.tolerance(), 0.5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            BatchOptions {
                tolerance_m: 0.0,
                ..BatchOptions::default()
            },
            BatchOptions {
                tolerance_m: f64::NAN,
                ..BatchOptions::default()
            },
            BatchOptions {
                offset_mm: -1.0,
                ..BatchOptions::default()
            },
            BatchOptions {
                search_half_length_m: 0.0,
                ..BatchOptions::default()
            },
            BatchOptions {
                units_per_meter: 0.0,
                ..BatchOptions::default()
            },
        ];
        for options in bad {
            assert!(options.validate().is_err(), "{options:?}");
        }
    }

    #[test]
    fn test_from_json_partial() {
        let options = BatchOptions::from_json(
            r#"{ "kind": "elevation", "offset_mm": 150, "naming": "element_and_level" }"#,
        )
        .unwrap();
        assert_eq!(options.kind, SectionKind::Elevation);
        assert_eq!(options.offset_mm, 150.0);
        assert_eq!(options.naming, NamingScheme::ElementAndLevel);
        assert_eq!(options.tolerance_m, 0.5);
        assert_eq!(options.sheet_prefix, "DV");

        let options = BatchOptions::from_json(r#"{ "kind": "section" }"#).unwrap();
        assert_eq!(options.kind, SectionKind::Cross);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            BatchOptions::from_json("{ not json"),
            Err(OptionsError::Parse(_))
        ));
        assert!(matches!(
            BatchOptions::from_json(r#"{ "tolerance_m": -2 }"#),
            Err(OptionsError::InvalidTolerance(_))
        ));
    }
}
