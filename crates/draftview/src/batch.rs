//! Batch view generation.
//!
//! Elements are processed one at a time inside a single transaction. A
//! failure on one element skips it; only a failed transaction aborts the
//! batch.

use std::sync::atomic::{AtomicBool, Ordering};

use draftview_drafting::{
    classify_detailed, find_nearby, layout, project, search_window, BoundingBox, Classification,
    ExistingViewRecord, GeometryBundle, HostGeometry, SectionBox, SectionKind,
};
use draftview_ir::{ElementId, SheetId, ViewId};
use draftview_math::{horizontal, perpendicular_xy, Vec3};

use crate::error::{BatchError, DraftError, Result};
use crate::host::{Document, ElementInfo, GeometryQuery, ViewFactory};
use crate::naming;
use crate::options::BatchOptions;
use crate::report::{BatchReport, ReportRow, SkippedElement};

/// Classified element, as shown by `draftview inspect`.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    /// Element facts.
    pub info: ElementInfo,
    /// Gathered geometry.
    pub geometry: GeometryBundle,
    /// Derived profile and any fallback taken.
    pub classification: Classification,
}

/// Gather what the classifier needs to know about an element.
pub fn gather_geometry<D: GeometryQuery + ?Sized>(
    doc: &D,
    info: &ElementInfo,
    view: Option<ViewId>,
) -> GeometryBundle {
    let host = info.host.map(|host| HostGeometry {
        location_curve: doc.location_curve_of(host),
        type_box: doc
            .element_info(host)
            .and_then(|h| h.type_id)
            .and_then(|t| doc.type_bounding_box_of(t)),
    });
    GeometryBundle {
        own_box: doc.bounding_box_of(info.id, view),
        type_box: info.type_id.and_then(|t| doc.type_bounding_box_of(t)),
        location_curve: doc.location_curve_of(info.id),
        height_param: info.height_param,
        rotation: info.rotation,
        facing_flipped: info.facing_flipped,
        host,
    }
}

/// Classify one element.
pub fn inspect<D: GeometryQuery + ?Sized>(
    doc: &D,
    element: ElementId,
    view: Option<ViewId>,
) -> Result<Inspection> {
    let info = doc
        .element_info(element)
        .ok_or(DraftError::UnknownElement(element))?;
    let geometry = gather_geometry(doc, &info, view);
    let classification = classify_detailed(info.topology, &geometry);
    Ok(Inspection {
        info,
        geometry,
        classification,
    })
}

/// Horizontal direction a view of `kind` looks in for an element running
/// along `direction`.
pub fn view_direction(direction: &Vec3, kind: SectionKind) -> Vec3 {
    match kind {
        SectionKind::Cross => horizontal(direction),
        SectionKind::Elevation => perpendicular_xy(direction),
    }
}

/// Boxes framed by the view of `element`: elements in `view` whose plan
/// footprint meets the search window, plus linked models when enabled.
fn context_boxes<D: GeometryQuery + ?Sized>(
    doc: &D,
    window: &BoundingBox,
    view: Option<ViewId>,
    include_links: bool,
) -> Vec<BoundingBox> {
    let mut boxes: Vec<BoundingBox> = doc
        .elements_in_view(view)
        .into_iter()
        .filter_map(|id| doc.bounding_box_of(id, view))
        .filter(|b| b.overlaps_xy(window))
        .collect();
    if include_links {
        boxes.extend(
            doc.linked_model_boxes(view)
                .into_iter()
                .filter(|b| b.overlaps_xy(window)),
        );
    }
    boxes
}

/// Run one batch over `elements`.
///
/// `cancel` is checked before each element; a cancelled batch still commits
/// the elements processed so far.
pub fn run_batch<D: Document + ?Sized>(
    doc: &mut D,
    elements: &[ElementId],
    options: &BatchOptions,
    cancel: &AtomicBool,
) -> std::result::Result<BatchReport, BatchError> {
    options.validate()?;

    let view_types = doc.section_view_types();
    let view_type = match &options.section_type {
        Some(name) if view_types.contains(name) => name.clone(),
        requested => {
            if let Some(name) = requested {
                tracing::warn!(view_type = %name, "section view type not found, using the first");
            }
            view_types
                .first()
                .cloned()
                .ok_or(BatchError::NoSectionViewType)?
        }
    };
    let template = options.view_template.as_ref().filter(|name| {
        let found = doc.view_templates().contains(*name);
        if !found {
            tracing::warn!(template = %name, "view template not found");
        }
        found
    });

    let label = naming::kind_label(options.kind);
    doc.begin(&format!("Generate {}s", label.to_lowercase()))
        .map_err(|e| BatchError::TransactionFailure(e.to_string()))?;

    let runner = Runner {
        options,
        view_type: &view_type,
        template: template.map(String::as_str),
        view: doc.active_view(),
    };
    let mut report = BatchReport::new(options.kind);
    for (n, &element) in elements.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            tracing::info!(processed = n, total = elements.len(), "batch cancelled");
            report.cancelled = true;
            break;
        }
        tracing::debug!(element, progress = n + 1, total = elements.len(), "processing element");
        match runner.process(doc, element) {
            Ok(row) => report.rows.push(row),
            Err(reason) => {
                tracing::warn!(element, %reason, "element skipped");
                report.skipped.push(SkippedElement { element, reason });
            }
        }
    }

    if let Err(e) = doc.commit() {
        doc.rollback();
        tracing::error!(error = %e, "batch transaction failed, all changes discarded");
        return Err(BatchError::TransactionFailure(e.to_string()));
    }
    tracing::info!(
        created = report.rows.len(),
        skipped = report.skipped.len(),
        "batch finished"
    );
    Ok(report)
}

/// Per-batch settings resolved once before the element loop.
struct Runner<'a> {
    options: &'a BatchOptions,
    view_type: &'a str,
    template: Option<&'a str>,
    view: Option<ViewId>,
}

impl Runner<'_> {
    fn process<D: Document + ?Sized>(&self, doc: &mut D, element: ElementId) -> Result<ReportRow> {
        let Inspection {
            info,
            geometry,
            classification,
        } = inspect(&*doc, element, self.view)?;
        if geometry.own_box.is_none() {
            return Err(DraftError::MissingGeometry(element));
        }
        let profile = classification.profile;

        let existing: Vec<ExistingViewRecord> = doc
            .section_view_crop_centers()
            .into_iter()
            .map(|crop_center| ExistingViewRecord { crop_center })
            .collect();
        if let Some(found) = find_nearby(&profile.origin, self.options.tolerance(), &existing) {
            return Err(DraftError::ExistingViewNearby {
                element,
                distance: (found.crop_center - profile.origin).norm(),
            });
        }

        let direction = view_direction(&profile.plan_direction(), self.options.kind);
        let window = search_window(&profile.origin, self.options.search_half_length());
        let mut candidates = context_boxes(&*doc, &window, self.view, self.options.include_links);
        if candidates.is_empty() {
            candidates.push(SectionBox::for_profile(&profile, self.options.kind).world_bounds());
        }
        let region = project(&profile.origin, &direction, &candidates, self.options.offset());

        let view =
            doc.create_section_view(&region, &direction, self.view_type, self.options.kind)?;
        let base = naming::view_name(self.options.naming, &info, &doc.levels(), profile.origin.z);
        let view_name = rename(doc, view, &base);
        if let Some(template) = self.template {
            if let Err(e) = doc.apply_view_template(view, template) {
                tracing::warn!(view, error = %e, "could not apply view template");
            }
        }

        let sheet = if self.options.place_on_sheets {
            place_on_new_sheet(doc, self.options, &info, view)
        } else {
            None
        };

        Ok(ReportRow {
            type_name: naming::type_label(&info).to_string(),
            category: info.category,
            element,
            sheet,
            view,
            view_name,
        })
    }
}

/// Rename `view` to the first free candidate of `base`, returning the name
/// the view ends up with.
fn rename<D: Document + ?Sized>(doc: &mut D, view: ViewId, base: &str) -> String {
    for name in naming::name_candidates(base) {
        match doc.rename_view(view, &name) {
            Ok(()) => return name,
            Err(e) => tracing::debug!(view, %name, error = %e, "view name rejected"),
        }
    }
    tracing::warn!(view, %base, "no free view name, keeping the default");
    format!("{base} ({view})")
}

/// Put `view` on a new sheet and number it. Returns the sheet number, or
/// `None` when the sheet could not be created.
fn place_on_new_sheet<D: Document + ?Sized>(
    doc: &mut D,
    options: &BatchOptions,
    info: &ElementInfo,
    view: ViewId,
) -> Option<String> {
    let title_block = doc.default_title_block();
    let sheet = match doc.create_sheet(title_block.as_deref()) {
        Ok(sheet) => sheet,
        Err(e) => {
            tracing::warn!(view, error = %e, "could not create sheet");
            return None;
        }
    };
    let position = layout(1).into_iter().next().unwrap_or_default();
    match doc.place_view(sheet, view, position) {
        Ok(true) => {}
        Ok(false) => tracing::warn!(view, sheet, "view cannot be placed on the sheet"),
        Err(e) => tracing::warn!(view, sheet, error = %e, "could not place view"),
    }
    Some(number_sheet(doc, sheet, options, info))
}

fn number_sheet<D: ViewFactory + ?Sized>(
    doc: &mut D,
    sheet: SheetId,
    options: &BatchOptions,
    info: &ElementInfo,
) -> String {
    let base = naming::sheet_number(&options.sheet_prefix, info);
    let name = naming::sheet_name(options.kind, info);
    for number in naming::name_candidates(&base) {
        match doc.set_sheet_identity(sheet, &number, &name) {
            Ok(()) => return number,
            Err(e) => tracing::debug!(sheet, %number, error = %e, "sheet number rejected"),
        }
    }
    tracing::warn!(sheet, %base, "no free sheet number, keeping the default");
    format!("#{sheet}")
}
