//! Interfaces to the design host.
//!
//! The batch runner never reaches for ambient session state: everything it
//! reads or mutates goes through these traits on an explicitly passed
//! document. Host calls are not reentrant and are made from one thread.

use draftview_drafting::{
    BoundingBox, NormalizedPosition, OutlineRegion, PlacementTopology, SectionKind,
};
use draftview_ir::{ElementId, Level, SheetId, TypeId, ViewId};
use draftview_math::{Point3, Vec3};

use crate::error::HostError;

/// Non-geometric facts about an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInfo {
    /// Element id.
    pub id: ElementId,
    /// Category name.
    pub category: String,
    /// Instance name, if the element has one.
    pub name: Option<String>,
    /// Element type.
    pub type_id: Option<TypeId>,
    /// Type name.
    pub type_name: Option<String>,
    /// Family name of the type.
    pub family_name: Option<String>,
    /// Placement rule.
    pub topology: PlacementTopology,
    /// Explicit height attribute.
    pub height_param: Option<f64>,
    /// Rotation about the vertical axis, in radians.
    pub rotation: Option<f64>,
    /// Whether the instance is flipped along its host.
    pub facing_flipped: Option<bool>,
    /// Host element, for hosted instances.
    pub host: Option<ElementId>,
    /// Associated level name.
    pub level: Option<String>,
    /// Annotation-like elements that only exist in one view.
    pub view_specific: bool,
}

/// Read access to element geometry.
pub trait GeometryQuery {
    /// Facts about `element`, or `None` when it does not exist.
    fn element_info(&self, element: ElementId) -> Option<ElementInfo>;

    /// World bounding box of `element` as seen in `view` (whole model when
    /// `None`).
    fn bounding_box_of(&self, element: ElementId, view: Option<ViewId>) -> Option<BoundingBox>;

    /// Location curve of `element` as `(start, end)`.
    fn location_curve_of(&self, element: ElementId) -> Option<(Point3, Point3)>;

    /// Bounding box of an element type in its local coordinates.
    fn type_bounding_box_of(&self, type_id: TypeId) -> Option<BoundingBox>;

    /// Model elements visible in `view` (all model elements when `None`).
    fn elements_in_view(&self, view: Option<ViewId>) -> Vec<ElementId>;

    /// Bounding boxes of linked model instances as seen in `view`.
    fn linked_model_boxes(&self, view: Option<ViewId>) -> Vec<BoundingBox>;
}

/// Read access to views and drafting resources.
pub trait ViewRegistry {
    /// Crop centers of every existing section and elevation view.
    fn section_view_crop_centers(&self) -> Vec<Point3>;

    /// Names of the section view types views can be created from.
    fn section_view_types(&self) -> Vec<String>;

    /// Names of the available view templates.
    fn view_templates(&self) -> Vec<String>;

    /// Levels of the model.
    fn levels(&self) -> Vec<Level>;

    /// Title block used for new sheets.
    fn default_title_block(&self) -> Option<String>;

    /// View the user is working in.
    fn active_view(&self) -> Option<ViewId>;
}

/// Creation and modification of views and sheets.
pub trait ViewFactory {
    /// Create a view cropped to `region`, looking along `direction`.
    fn create_section_view(
        &mut self,
        region: &OutlineRegion,
        direction: &Vec3,
        view_type: &str,
        kind: SectionKind,
    ) -> Result<ViewId, HostError>;

    /// Rename a view. Fails when the name is taken.
    fn rename_view(&mut self, view: ViewId, name: &str) -> Result<(), HostError>;

    /// Apply a view template by name.
    fn apply_view_template(&mut self, view: ViewId, template: &str) -> Result<(), HostError>;

    /// Create an empty sheet.
    fn create_sheet(&mut self, title_block: Option<&str>) -> Result<SheetId, HostError>;

    /// Place `view` on `sheet`. Returns `false` when the view cannot be
    /// placed, e.g. because it already sits on a sheet.
    fn place_view(
        &mut self,
        sheet: SheetId,
        view: ViewId,
        position: NormalizedPosition,
    ) -> Result<bool, HostError>;

    /// Set a sheet's number and name. Fails when the number is taken.
    fn set_sheet_identity(
        &mut self,
        sheet: SheetId,
        number: &str,
        name: &str,
    ) -> Result<(), HostError>;
}

/// Atomic grouping of document mutations.
pub trait TransactionScope {
    /// Start a transaction.
    fn begin(&mut self, name: &str) -> Result<(), HostError>;

    /// Make every mutation since [`TransactionScope::begin`] permanent.
    fn commit(&mut self) -> Result<(), HostError>;

    /// Discard every mutation since [`TransactionScope::begin`].
    fn rollback(&mut self);
}

/// A host document the batch runner can work against.
pub trait Document: GeometryQuery + ViewRegistry + ViewFactory + TransactionScope {}

impl<T: GeometryQuery + ViewRegistry + ViewFactory + TransactionScope> Document for T {}
