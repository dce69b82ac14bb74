//! Classify a wall and frame a cross section and an elevation for it.
//!
//! Run with: cargo run -p draftview-drafting --example frame_wall

use draftview_drafting::{
    classify, layout, project, BoundingBox, GeometryBundle, PlacementTopology, SectionBox,
    SectionKind,
};
use draftview_math::{perpendicular_xy, Point3};

fn main() {
    let wall_box = BoundingBox::new(Point3::new(0.0, 3.0, 0.0), Point3::new(8.0, 9.0, 3.0));
    let neighbour = BoundingBox::new(Point3::new(9.0, 8.0, 0.0), Point3::new(10.0, 10.0, 2.5));

    let geometry = GeometryBundle {
        own_box: Some(wall_box),
        location_curve: Some((Point3::new(0.0, 3.0, 0.0), Point3::new(8.0, 9.0, 0.0))),
        height_param: Some(3.0),
        ..GeometryBundle::default()
    };
    let profile = classify(PlacementTopology::LinearHost, &geometry);
    println!("Profile:");
    println!(
        "  origin ({:.2}, {:.2}, {:.2})",
        profile.origin.x, profile.origin.y, profile.origin.z
    );
    println!(
        "  direction ({:.3}, {:.3}, {:.3})",
        profile.direction.x, profile.direction.y, profile.direction.z
    );
    println!(
        "  width {:.2}, height {:.2}, depth {:.2}",
        profile.width, profile.height, profile.depth
    );

    for kind in [SectionKind::Cross, SectionKind::Elevation] {
        let view_dir = match kind {
            SectionKind::Cross => profile.plan_direction(),
            SectionKind::Elevation => perpendicular_xy(&profile.plan_direction()),
        };
        let region = project(&profile.origin, &view_dir, &[wall_box, neighbour], 1.0);
        let frame = SectionBox::for_profile(&profile, kind).world_bounds();
        println!("\n{kind:?}:");
        println!(
            "  region ({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
            region.min.x, region.min.y, region.min.z, region.max.x, region.max.y, region.max.z
        );
        println!(
            "  element frame ({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
            frame.min.x, frame.min.y, frame.min.z, frame.max.x, frame.max.y, frame.max.z
        );
    }

    println!("\nSheet positions for two views:");
    for p in layout(2) {
        println!("  ({:+.2}, {:+.2})", p.x, p.y);
    }
}
