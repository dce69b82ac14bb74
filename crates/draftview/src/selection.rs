//! Element selection by category.

use std::collections::BTreeSet;

use draftview_drafting::PlacementTopology;
use draftview_ir::{ElementId, ViewId};

use crate::host::{ElementInfo, GeometryQuery};

/// Name of the group that admits every loadable family instance.
pub const LOADABLE_FAMILIES: &str = "All Loadable Families";

/// Preset category groups offered when picking elements.
pub const CATEGORY_GROUPS: &[(&str, &[&str])] = &[
    ("Walls", &["Walls"]),
    ("Windows", &["Windows"]),
    ("Doors", &["Doors"]),
    ("Columns", &["Columns", "Structural Columns"]),
    ("Beams/Framing", &["Structural Framing"]),
    ("Furniture", &["Furniture", "Furniture Systems"]),
    ("Plumbing Fixtures", &["Furniture", "Plumbing Fixtures"]),
    ("Generic Models", &["Generic Models"]),
    ("Casework", &["Casework"]),
    ("Curtain Walls", &["Walls"]),
    ("Lighting Fixtures", &["Lighting Fixtures"]),
    ("Mass", &["Mass"]),
    ("Parking", &["Parking"]),
    (
        "Electrical Fixtures, Equipment, Circuits",
        &["Electrical Fixtures", "Electrical Equipment", "Electrical Circuits"],
    ),
];

/// Decides which elements may be picked for view generation.
///
/// View-specific elements are never allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Allowed category names; `None` allows every category.
    categories: Option<BTreeSet<String>>,
    /// Admit every element that is not a linear host.
    loadable_families: bool,
}

impl CategoryFilter {
    /// Filter admitting every model element.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter from group or category names.
    ///
    /// Names of [`CATEGORY_GROUPS`] expand to their categories,
    /// [`LOADABLE_FAMILIES`] admits all loadable family instances, and any
    /// other name is taken as a category name.
    pub fn from_groups<S: AsRef<str>>(names: &[S]) -> Self {
        let mut categories = BTreeSet::new();
        let mut loadable_families = false;
        for name in names {
            let name = name.as_ref();
            if name == LOADABLE_FAMILIES {
                loadable_families = true;
            } else if let Some((_, members)) = CATEGORY_GROUPS.iter().find(|(g, _)| *g == name) {
                categories.extend(members.iter().map(|m| m.to_string()));
            } else {
                categories.insert(name.to_string());
            }
        }
        Self {
            categories: Some(categories),
            loadable_families,
        }
    }

    /// Whether `info` may be picked.
    pub fn allows(&self, info: &ElementInfo) -> bool {
        if info.view_specific {
            return false;
        }
        let Some(categories) = &self.categories else {
            return true;
        };
        categories.contains(&info.category)
            || (self.loadable_families && info.topology != PlacementTopology::LinearHost)
    }
}

/// Elements in `view` that pass `filter`, in the order the host lists them.
pub fn select<D: GeometryQuery + ?Sized>(
    doc: &D,
    filter: &CategoryFilter,
    view: Option<ViewId>,
) -> Vec<ElementId> {
    doc.elements_in_view(view)
        .into_iter()
        .filter(|&id| doc.element_info(id).is_some_and(|info| filter.allows(&info)))
        .collect()
}
