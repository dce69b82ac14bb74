//! Scene document for the draftview ecosystem.
//!
//! A scene is a declarative snapshot of the parts of a building model that
//! view generation reads and writes: element placements and bounding boxes,
//! element types, levels, existing views and sheets. It is the JSON file
//! format consumed by the CLI and by the in-memory host used in tests.
//!
//! Coordinates are in the host's internal length unit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a model element.
pub type ElementId = u64;

/// Identifier of an element type.
pub type TypeId = u64;

/// Identifier of a view.
pub type ViewId = u64;

/// Identifier of a sheet.
pub type SheetId = u64;

/// 3D vector with f64 components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned box stored as two corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Box3 {
    /// Create a box from two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}

/// A bounded location curve, start to end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// First endpoint.
    pub start: Vec3,
    /// Second endpoint.
    pub end: Vec3,
}

/// How an element instance is located in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Placement {
    /// Wall-like element located by its curve, with a height attribute.
    LinearHost,
    /// Single insertion point plus the type's bounding box.
    PointBased,
    /// Located by a bounded curve.
    CurveBased,
    /// Hosted by a linear host (doors, windows).
    HostedOnLinearHost,
    /// Placement not recognized.
    #[default]
    Unclassified,
}

/// A model element instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Unique identifier.
    pub id: ElementId,
    /// Instance name, if any.
    #[serde(default)]
    pub name: Option<String>,
    /// Category name (e.g. "Walls", "Doors").
    pub category: String,
    /// Element type, if any.
    #[serde(default)]
    pub type_id: Option<TypeId>,
    /// Placement rule.
    #[serde(default)]
    pub placement: Placement,
    /// World-space bounding box, absent when the element has no geometry.
    #[serde(default)]
    pub bbox: Option<Box3>,
    /// Location curve for curve-located elements.
    #[serde(default)]
    pub curve: Option<Curve>,
    /// Explicit height attribute.
    #[serde(default)]
    pub height: Option<f64>,
    /// Instance rotation about the vertical axis, in radians.
    #[serde(default)]
    pub rotation: Option<f64>,
    /// Whether the instance faces the opposite way along its host.
    #[serde(default)]
    pub facing_flipped: Option<bool>,
    /// Host element for hosted instances.
    #[serde(default)]
    pub host: Option<ElementId>,
    /// Name of the associated level.
    #[serde(default)]
    pub level: Option<String>,
    /// View-specific elements (annotations) are never selectable.
    #[serde(default)]
    pub view_specific: bool,
    /// Instance of a linked model; contributes context geometry only.
    #[serde(default)]
    pub linked: bool,
}

impl ElementRecord {
    /// Create a record with only the required fields set.
    pub fn new(id: ElementId, category: impl Into<String>, placement: Placement) -> Self {
        Self {
            id,
            name: None,
            category: category.into(),
            type_id: None,
            placement,
            bbox: None,
            curve: None,
            height: None,
            rotation: None,
            facing_flipped: None,
            host: None,
            level: None,
            view_specific: false,
            linked: false,
        }
    }
}

/// An element type (family symbol).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRecord {
    /// Unique identifier.
    pub id: TypeId,
    /// Type name.
    pub name: String,
    /// Family name, if any.
    #[serde(default)]
    pub family: Option<String>,
    /// Bounding box in the type's local coordinates.
    #[serde(default)]
    pub bbox: Option<Box3>,
}

/// A named elevation datum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level name.
    pub name: String,
    /// Elevation in internal units.
    pub elevation: f64,
}

/// Kind of a view in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewKind {
    /// Plan view.
    Plan,
    /// Section view.
    Section,
    /// Elevation view.
    Elevation,
    /// 3D view.
    ThreeD,
}

/// A view in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    /// Unique identifier.
    pub id: ViewId,
    /// View name.
    pub name: String,
    /// View kind.
    pub kind: ViewKind,
    /// Section view type the view was created from.
    #[serde(default)]
    pub view_type: Option<String>,
    /// Crop box, if the view is cropped.
    #[serde(default)]
    pub crop: Option<Box3>,
    /// Direction the view looks in, for sections and elevations.
    #[serde(default)]
    pub direction: Option<Vec3>,
    /// Applied view template name.
    #[serde(default)]
    pub template: Option<String>,
}

/// A view placed on a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Placed view.
    pub view: ViewId,
    /// Sheet-normalized position, origin at the sheet center.
    pub position: [f64; 2],
}

/// A drawing sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRecord {
    /// Unique identifier.
    pub id: SheetId,
    /// Sheet number, unique within the scene.
    pub number: String,
    /// Sheet name.
    pub name: String,
    /// Title block used to create the sheet.
    #[serde(default)]
    pub title_block: Option<String>,
    /// Placed views.
    #[serde(default)]
    pub viewports: Vec<Viewport>,
}

/// A draftview scene, stored as a `.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Format version string (e.g. "0.1").
    pub version: String,
    /// All elements, keyed by [`ElementId`].
    #[serde(default)]
    pub elements: BTreeMap<ElementId, ElementRecord>,
    /// Element types, keyed by [`TypeId`].
    #[serde(default)]
    pub types: BTreeMap<TypeId, TypeRecord>,
    /// Levels.
    #[serde(default)]
    pub levels: Vec<Level>,
    /// Available section view type names.
    #[serde(default)]
    pub section_view_types: Vec<String>,
    /// Available view template names.
    #[serde(default)]
    pub view_templates: Vec<String>,
    /// Available title block names; the first one is the default.
    #[serde(default)]
    pub title_blocks: Vec<String>,
    /// Views.
    #[serde(default)]
    pub views: Vec<ViewRecord>,
    /// Sheets.
    #[serde(default)]
    pub sheets: Vec<SheetRecord>,
    /// View the user is working in; context geometry is gathered from it.
    #[serde(default)]
    pub active_view: Option<ViewId>,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            elements: BTreeMap::new(),
            types: BTreeMap::new(),
            levels: Vec::new(),
            section_view_types: Vec::new(),
            view_templates: Vec::new(),
            title_blocks: Vec::new(),
            views: Vec::new(),
            sheets: Vec::new(),
            active_view: None,
        }
    }
}

impl SceneDocument {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Insert an element, replacing any element with the same id.
    pub fn add_element(&mut self, element: ElementRecord) {
        self.elements.insert(element.id, element);
    }

    /// Insert a type, replacing any type with the same id.
    pub fn add_type(&mut self, ty: TypeRecord) {
        self.types.insert(ty.id, ty);
    }

    /// Next free identifier shared by elements, views and sheets.
    pub fn next_id(&self) -> u64 {
        let elements = self.elements.keys().copied();
        let views = self.views.iter().map(|v| v.id);
        let sheets = self.sheets.iter().map(|s| s.id);
        elements.chain(views).chain(sheets).max().map_or(1, |id| id + 1)
    }

    /// Look up a view by id.
    pub fn view(&self, id: ViewId) -> Option<&ViewRecord> {
        self.views.iter().find(|v| v.id == id)
    }

    /// Mutable access to a view by id.
    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut ViewRecord> {
        self.views.iter_mut().find(|v| v.id == id)
    }

    /// Mutable access to a sheet by id.
    pub fn sheet_mut(&mut self, id: SheetId) -> Option<&mut SheetRecord> {
        self.sheets.iter_mut().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(id: ElementId) -> ElementRecord {
        let mut wall = ElementRecord::new(id, "Walls", Placement::LinearHost);
        wall.curve = Some(Curve {
            start: Vec3::new(0.0, 0.0, 0.0),
            end: Vec3::new(10.0, 0.0, 0.0),
        });
        wall.bbox = Some(Box3::new(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(10.0, 0.5, 3.0),
        ));
        wall.height = Some(3.0);
        wall
    }

    #[test]
    fn roundtrip_document() {
        let mut doc = SceneDocument::new();
        doc.add_element(wall(1));
        doc.add_type(TypeRecord {
            id: 100,
            name: "Door 900".to_string(),
            family: Some("Single Door".to_string()),
            bbox: Some(Box3::new(
                Vec3::new(-0.45, -0.1, 0.0),
                Vec3::new(0.45, 0.1, 2.1),
            )),
        });
        doc.levels.push(Level {
            name: "Level 1".to_string(),
            elevation: 0.0,
        });
        doc.views.push(ViewRecord {
            id: 5,
            name: "Section 1".to_string(),
            kind: ViewKind::Section,
            view_type: Some("Building Section".to_string()),
            crop: Some(Box3::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0))),
            direction: Some(Vec3::new(1.0, 0.0, 0.0)),
            template: None,
        });

        let json = doc.to_json().expect("serialize");
        let restored = SceneDocument::from_json(&json).expect("deserialize");

        assert_eq!(doc, restored);
        assert_eq!(restored.elements.len(), 1);
        assert_eq!(restored.types.len(), 1);
        assert_eq!(restored.views.len(), 1);
    }

    #[test]
    fn empty_document() {
        let doc = SceneDocument::new();
        assert_eq!(doc.version, "0.1");
        assert!(doc.elements.is_empty());
        assert!(doc.views.is_empty());
        assert_eq!(doc.next_id(), 1);
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let json = r#"{
            "version": "0.1",
            "elements": {
                "7": { "id": 7, "category": "Furniture" }
            }
        }"#;
        let doc = SceneDocument::from_json(json).unwrap();
        let el = &doc.elements[&7];
        assert_eq!(el.placement, Placement::Unclassified);
        assert!(el.bbox.is_none());
        assert!(!el.view_specific);
        assert!(doc.sheets.is_empty());
    }

    #[test]
    fn next_id_spans_all_collections() {
        let mut doc = SceneDocument::new();
        doc.add_element(wall(3));
        doc.sheets.push(SheetRecord {
            id: 12,
            number: "A-101".to_string(),
            name: "Plan".to_string(),
            title_block: None,
            viewports: Vec::new(),
        });
        assert_eq!(doc.next_id(), 13);
        doc.sheet_mut(12).unwrap().name = "Ground Plan".to_string();
        assert_eq!(doc.sheets[0].name, "Ground Plan");
        assert!(doc.view(12).is_none());
        assert!(doc.view_mut(12).is_none());
    }

    #[test]
    fn box_center() {
        let b = Box3::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 3.0));
        assert_eq!(b.center(), Vec3::new(2.0, 1.0, 1.5));
    }
}
