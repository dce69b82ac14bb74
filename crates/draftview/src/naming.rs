//! Names for generated views and sheets.

use draftview_drafting::SectionKind;
use draftview_ir::Level;

use crate::host::ElementInfo;
use crate::options::NamingScheme;

/// How many candidate names are tried before giving up.
pub const MAX_NAME_ATTEMPTS: usize = 10;

/// Level name used when the model has no levels.
pub const DEFAULT_LEVEL: &str = "L0";

/// Human label of a view kind.
pub fn kind_label(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Cross => "Section",
        SectionKind::Elevation => "Elevation",
    }
}

/// Type name, falling back to the category.
pub fn type_label(info: &ElementInfo) -> &str {
    info.type_name.as_deref().unwrap_or(&info.category)
}

/// Level the element belongs to: its own level, else the level closest to
/// `elevation`, else [`DEFAULT_LEVEL`].
pub fn level_name(info: &ElementInfo, levels: &[Level], elevation: f64) -> String {
    if let Some(level) = &info.level {
        return level.clone();
    }
    levels
        .iter()
        .min_by(|a, b| {
            let da = (a.elevation - elevation).abs();
            let db = (b.elevation - elevation).abs();
            da.total_cmp(&db)
        })
        .map_or_else(|| DEFAULT_LEVEL.to_string(), |l| l.name.clone())
}

/// Base name of the view generated for an element.
pub fn view_name(
    scheme: NamingScheme,
    info: &ElementInfo,
    levels: &[Level],
    elevation: f64,
) -> String {
    match scheme {
        NamingScheme::TypeAndId => format!("{}_{}", type_label(info), info.id),
        NamingScheme::ElementAndLevel => {
            let element = info
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .or(info.family_name.as_deref())
                .unwrap_or(&info.category);
            format!(
                "{}_{}",
                element.replace(' ', "_"),
                level_name(info, levels, elevation)
            )
        }
    }
}

/// Number of the sheet holding an element's view.
pub fn sheet_number(prefix: &str, info: &ElementInfo) -> String {
    format!("{}_{}_{}", prefix, type_label(info), info.id)
}

/// Name of the sheet holding an element's view.
pub fn sheet_name(kind: SectionKind, info: &ElementInfo) -> String {
    format!("{} - {}", info.category, kind_label(kind))
}

/// Candidate names: `base`, then `base*`, `base**`, ...
pub fn name_candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    (0..MAX_NAME_ATTEMPTS).map(move |stars| format!("{base}{}", "*".repeat(stars)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftview_drafting::PlacementTopology;

    fn door() -> ElementInfo {
        ElementInfo {
            id: 42,
            category: "Doors".to_string(),
            name: None,
            type_id: Some(7),
            type_name: Some("Single 900".to_string()),
            family_name: Some("Single Flush Door".to_string()),
            topology: PlacementTopology::HostedOnLinearHost,
            height_param: None,
            rotation: None,
            facing_flipped: None,
            host: None,
            level: None,
            view_specific: false,
        }
    }

    fn levels() -> Vec<Level> {
        vec![
            Level {
                name: "Ground".to_string(),
                elevation: 0.0,
            },
            Level {
                name: "First".to_string(),
                elevation: 10.0,
            },
        ]
    }

    #[test]
    fn test_type_and_id() {
        assert_eq!(
            view_name(NamingScheme::TypeAndId, &door(), &[], 0.0),
            "Single 900_42"
        );
        let mut untyped = door();
        untyped.type_name = None;
        assert_eq!(view_name(NamingScheme::TypeAndId, &untyped, &[], 0.0), "Doors_42");
    }

    #[test]
    fn test_element_and_level() {
        // No instance name: family name, spaces replaced, nearest level.
        assert_eq!(
            view_name(NamingScheme::ElementAndLevel, &door(), &levels(), 7.0),
            "Single_Flush_Door_First"
        );

        let mut named = door();
        named.name = Some("Front door".to_string());
        named.level = Some("Level 2".to_string());
        assert_eq!(
            view_name(NamingScheme::ElementAndLevel, &named, &levels(), 0.0),
            "Front_door_Level 2"
        );
    }

    #[test]
    fn test_level_fallback() {
        assert_eq!(level_name(&door(), &[], 3.0), DEFAULT_LEVEL);
        assert_eq!(level_name(&door(), &levels(), 4.9), "Ground");
    }

    #[test]
    fn test_sheet_identity() {
        assert_eq!(sheet_number("DV", &door()), "DV_Single 900_42");
        assert_eq!(sheet_name(SectionKind::Cross, &door()), "Doors - Section");
        assert_eq!(sheet_name(SectionKind::Elevation, &door()), "Doors - Elevation");
    }

    #[test]
    fn test_name_candidates() {
        let names: Vec<_> = name_candidates("A").collect();
        assert_eq!(names.len(), MAX_NAME_ATTEMPTS);
        assert_eq!(names[0], "A");
        assert_eq!(names[2], "A**");
    }
}
