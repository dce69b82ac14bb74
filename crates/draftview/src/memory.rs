//! In-memory host backed by a [`SceneDocument`].
//!
//! Reads see the staged state while a transaction is open. Mutations are only
//! allowed inside a transaction and become visible in [`MemoryDocument::scene`]
//! once committed. The scene has no per-view visibility, so every view shows
//! every model element.

use draftview_drafting::{
    BoundingBox, NormalizedPosition, OutlineRegion, PlacementTopology, SectionKind,
};
use draftview_ir::{
    Box3, ElementId, Level, Placement, SceneDocument, SheetId, SheetRecord, TypeId, ViewId,
    ViewKind, ViewRecord, Viewport,
};
use draftview_math::{Point3, Vec3};

use crate::error::HostError;
use crate::host::{ElementInfo, GeometryQuery, TransactionScope, ViewFactory, ViewRegistry};

/// Host document held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    scene: SceneDocument,
    staged: Option<SceneDocument>,
    transaction: Option<String>,
    commit_failure: Option<String>,
}

impl MemoryDocument {
    /// Wrap a scene.
    pub fn new(scene: SceneDocument) -> Self {
        Self {
            scene,
            staged: None,
            transaction: None,
            commit_failure: None,
        }
    }

    /// Committed state.
    pub fn scene(&self) -> &SceneDocument {
        &self.scene
    }

    /// Consume the document, returning the committed state.
    pub fn into_scene(self) -> SceneDocument {
        self.scene
    }

    /// Name of the open transaction.
    pub fn transaction(&self) -> Option<&str> {
        self.transaction.as_deref()
    }

    /// Make the next commit fail with `message`.
    pub fn fail_next_commit(&mut self, message: impl Into<String>) {
        self.commit_failure = Some(message.into());
    }

    fn current(&self) -> &SceneDocument {
        self.staged.as_ref().unwrap_or(&self.scene)
    }

    fn staged_mut(&mut self) -> Result<&mut SceneDocument, HostError> {
        self.staged.as_mut().ok_or(HostError::NoTransaction)
    }
}

fn to_point(v: &draftview_ir::Vec3) -> Point3 {
    Point3::new(v.x, v.y, v.z)
}

fn to_bbox(b: &Box3) -> BoundingBox {
    BoundingBox::new(to_point(&b.min), to_point(&b.max))
}

fn to_box3(min: &Point3, max: &Point3) -> Box3 {
    Box3::new(
        draftview_ir::Vec3::new(min.x, min.y, min.z),
        draftview_ir::Vec3::new(max.x, max.y, max.z),
    )
}

fn topology_of(placement: Placement) -> PlacementTopology {
    match placement {
        Placement::LinearHost => PlacementTopology::LinearHost,
        Placement::PointBased => PlacementTopology::PointBased,
        Placement::CurveBased => PlacementTopology::CurveBased,
        Placement::HostedOnLinearHost => PlacementTopology::HostedOnLinearHost,
        Placement::Unclassified => PlacementTopology::Unclassified,
    }
}

impl GeometryQuery for MemoryDocument {
    fn element_info(&self, element: ElementId) -> Option<ElementInfo> {
        let scene = self.current();
        let record = scene.elements.get(&element)?;
        let ty = record.type_id.and_then(|t| scene.types.get(&t));
        Some(ElementInfo {
            id: record.id,
            category: record.category.clone(),
            name: record.name.clone(),
            type_id: record.type_id,
            type_name: ty.map(|t| t.name.clone()),
            family_name: ty.and_then(|t| t.family.clone()),
            topology: topology_of(record.placement),
            height_param: record.height,
            rotation: record.rotation,
            facing_flipped: record.facing_flipped,
            host: record.host,
            level: record.level.clone(),
            view_specific: record.view_specific,
        })
    }

    fn bounding_box_of(&self, element: ElementId, _view: Option<ViewId>) -> Option<BoundingBox> {
        self.current()
            .elements
            .get(&element)
            .and_then(|e| e.bbox.as_ref())
            .map(to_bbox)
    }

    fn location_curve_of(&self, element: ElementId) -> Option<(Point3, Point3)> {
        let curve = self.current().elements.get(&element)?.curve?;
        Some((to_point(&curve.start), to_point(&curve.end)))
    }

    fn type_bounding_box_of(&self, type_id: TypeId) -> Option<BoundingBox> {
        self.current()
            .types
            .get(&type_id)
            .and_then(|t| t.bbox.as_ref())
            .map(to_bbox)
    }

    fn elements_in_view(&self, _view: Option<ViewId>) -> Vec<ElementId> {
        self.current()
            .elements
            .values()
            .filter(|e| !e.linked)
            .map(|e| e.id)
            .collect()
    }

    fn linked_model_boxes(&self, _view: Option<ViewId>) -> Vec<BoundingBox> {
        self.current()
            .elements
            .values()
            .filter(|e| e.linked)
            .filter_map(|e| e.bbox.as_ref())
            .map(to_bbox)
            .collect()
    }
}

impl ViewRegistry for MemoryDocument {
    fn section_view_crop_centers(&self) -> Vec<Point3> {
        self.current()
            .views
            .iter()
            .filter(|v| matches!(v.kind, ViewKind::Section | ViewKind::Elevation))
            .filter_map(|v| v.crop.as_ref())
            .map(|crop| to_point(&crop.center()))
            .collect()
    }

    fn section_view_types(&self) -> Vec<String> {
        self.current().section_view_types.clone()
    }

    fn view_templates(&self) -> Vec<String> {
        self.current().view_templates.clone()
    }

    fn levels(&self) -> Vec<Level> {
        self.current().levels.clone()
    }

    fn default_title_block(&self) -> Option<String> {
        self.current().title_blocks.first().cloned()
    }

    fn active_view(&self) -> Option<ViewId> {
        self.current().active_view
    }
}

impl ViewFactory for MemoryDocument {
    fn create_section_view(
        &mut self,
        region: &OutlineRegion,
        direction: &Vec3,
        view_type: &str,
        kind: SectionKind,
    ) -> Result<ViewId, HostError> {
        let scene = self.staged_mut()?;
        if !scene.section_view_types.iter().any(|t| t == view_type) {
            return Err(HostError::UnknownResource {
                kind: "section view type",
                name: view_type.to_string(),
            });
        }
        let id = scene.next_id();
        let kind = match kind {
            SectionKind::Cross => ViewKind::Section,
            SectionKind::Elevation => ViewKind::Elevation,
        };
        scene.views.push(ViewRecord {
            id,
            name: format!("{view_type} {id}"),
            kind,
            view_type: Some(view_type.to_string()),
            crop: Some(to_box3(&region.min, &region.max)),
            direction: Some(draftview_ir::Vec3::new(direction.x, direction.y, direction.z)),
            template: None,
        });
        Ok(id)
    }

    fn rename_view(&mut self, view: ViewId, name: &str) -> Result<(), HostError> {
        let scene = self.staged_mut()?;
        if scene.views.iter().any(|v| v.id != view && v.name == name) {
            return Err(HostError::DuplicateName(name.to_string()));
        }
        let record = scene
            .view_mut(view)
            .ok_or(HostError::NotFound { kind: "view", id: view })?;
        record.name = name.to_string();
        Ok(())
    }

    fn apply_view_template(&mut self, view: ViewId, template: &str) -> Result<(), HostError> {
        let scene = self.staged_mut()?;
        if !scene.view_templates.iter().any(|t| t == template) {
            return Err(HostError::UnknownResource {
                kind: "view template",
                name: template.to_string(),
            });
        }
        let record = scene
            .view_mut(view)
            .ok_or(HostError::NotFound { kind: "view", id: view })?;
        record.template = Some(template.to_string());
        Ok(())
    }

    fn create_sheet(&mut self, title_block: Option<&str>) -> Result<SheetId, HostError> {
        let scene = self.staged_mut()?;
        let id = scene.next_id();
        scene.sheets.push(SheetRecord {
            id,
            number: format!("#{id}"),
            name: "Unnamed".to_string(),
            title_block: title_block.map(str::to_string),
            viewports: Vec::new(),
        });
        Ok(id)
    }

    fn place_view(
        &mut self,
        sheet: SheetId,
        view: ViewId,
        position: NormalizedPosition,
    ) -> Result<bool, HostError> {
        let scene = self.staged_mut()?;
        if scene.view(view).is_none() {
            return Err(HostError::NotFound { kind: "view", id: view });
        }
        if scene
            .sheets
            .iter()
            .any(|s| s.viewports.iter().any(|vp| vp.view == view))
        {
            return Ok(false);
        }
        let record = scene
            .sheet_mut(sheet)
            .ok_or(HostError::NotFound { kind: "sheet", id: sheet })?;
        record.viewports.push(Viewport {
            view,
            position: [position.x, position.y],
        });
        Ok(true)
    }

    fn set_sheet_identity(
        &mut self,
        sheet: SheetId,
        number: &str,
        name: &str,
    ) -> Result<(), HostError> {
        let scene = self.staged_mut()?;
        if scene.sheets.iter().any(|s| s.id != sheet && s.number == number) {
            return Err(HostError::DuplicateName(number.to_string()));
        }
        let record = scene
            .sheet_mut(sheet)
            .ok_or(HostError::NotFound { kind: "sheet", id: sheet })?;
        record.number = number.to_string();
        record.name = name.to_string();
        Ok(())
    }
}

impl TransactionScope for MemoryDocument {
    fn begin(&mut self, name: &str) -> Result<(), HostError> {
        if self.staged.is_some() {
            return Err(HostError::TransactionActive);
        }
        tracing::debug!(transaction = name, "begin");
        self.staged = Some(self.scene.clone());
        self.transaction = Some(name.to_string());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), HostError> {
        let staged = self.staged.take().ok_or(HostError::NoTransaction)?;
        let name = self.transaction.take().unwrap_or_default();
        if let Some(message) = self.commit_failure.take() {
            tracing::debug!(transaction = %name, "commit refused");
            return Err(HostError::CommitFailed(message));
        }
        tracing::debug!(transaction = %name, "commit");
        self.scene = staged;
        Ok(())
    }

    fn rollback(&mut self) {
        if self.staged.take().is_some() {
            tracing::debug!(transaction = ?self.transaction, "rollback");
        }
        self.transaction = None;
    }
}
