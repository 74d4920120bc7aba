//! End-to-end run over a closed room surveyed from the reference scan positions.

#![allow(clippy::unwrap_used)]

use panoproj::host::{FaceId, MemoryMesh, MeshHost};
use panoproj::math::{Point3, Vector3};
use panoproj::operations::{AssignScans, ProjectScans, NO_SCAN_GROUP};
use panoproj::scan::{reference_survey, ScanPose};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Adds a grid of quads spanning `u` and `v` from `origin`, facing `u x v`.
fn add_grid(mesh: &mut MemoryMesh, origin: Point3, u: Vector3, v: Vector3, nu: u32, nv: u32) -> Vec<FaceId> {
    let mut ids = Vec::new();
    for j in 0..=nv {
        for i in 0..=nu {
            let p = origin + u * (f64::from(i) / f64::from(nu)) + v * (f64::from(j) / f64::from(nv));
            ids.push(mesh.add_vertex(p));
        }
    }
    let at = |i: u32, j: u32| ids[(j * (nu + 1) + i) as usize];
    let mut faces = Vec::new();
    for j in 0..nv {
        for i in 0..nu {
            let quad = [at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)];
            faces.push(mesh.add_face(&quad).unwrap());
        }
    }
    faces
}

/// A 15 x 16 x 7 room around the survey, every face pointing inwards.
fn room() -> MemoryMesh {
    let mut mesh = MemoryMesh::new();
    let (x0, x1, y0, y1, z0, z1) = (-6.0, 9.0, -6.0, 10.0, -3.0, 4.0);
    let (dx, dy, dz) = (x1 - x0, y1 - y0, z1 - z0);
    let (x, y, z) = (Vector3::x(), Vector3::y(), Vector3::z());

    add_grid(&mut mesh, Point3::new(x0, y0, z0), x * dx, y * dy, 15, 16);
    add_grid(&mut mesh, Point3::new(x0, y0, z1), y * dy, x * dx, 16, 15);
    add_grid(&mut mesh, Point3::new(x0, y0, z0), y * dy, z * dz, 16, 7);
    add_grid(&mut mesh, Point3::new(x1, y0, z0), z * dz, y * dy, 7, 16);
    add_grid(&mut mesh, Point3::new(x0, y0, z0), z * dz, x * dx, 7, 15);
    add_grid(&mut mesh, Point3::new(x0, y1, z0), x * dx, z * dz, 15, 7);
    mesh
}

#[test]
fn every_face_in_the_room_has_an_owner() {
    init_tracing();
    let mut mesh = room();
    let scans = reference_survey();
    let assignment = AssignScans::new(&scans).execute(&mut mesh).unwrap();

    assert_eq!(assignment.owners.len(), mesh.face_count());
    assert!(assignment.bucket(NO_SCAN_GROUP).unwrap().vertices.is_empty());
    let counts = assignment.face_counts();
    assert_eq!(counts.iter().sum::<usize>(), mesh.face_count());
    assert!(counts.iter().filter(|&&c| c > 0).count() > 1, "one scan took everything: {counts:?}");

    let mut names = mesh.vertex_group_names();
    names.sort_unstable();
    let mut expected: Vec<&str> = scans.iter().map(ScanPose::name).chain([NO_SCAN_GROUP]).collect();
    expected.sort_unstable();
    assert_eq!(names, expected);
}

#[test]
fn assignment_is_stable_across_runs() {
    init_tracing();
    let mut mesh = room();
    let scans = reference_survey();
    let first = AssignScans::new(&scans).execute(&mut mesh).unwrap();
    ProjectScans::new(&scans).with_scans(["scan1"]).execute(&mut mesh).unwrap();
    let second = AssignScans::new(&scans).execute(&mut mesh).unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_loop_gets_a_uv_in_every_channel() {
    init_tracing();
    let mut mesh = room();
    let scans = reference_survey();
    let assignment = AssignScans::new(&scans).execute(&mut mesh).unwrap();
    let reports = ProjectScans::new(&scans).with_seed(2024).execute(&mut mesh).unwrap();

    assert_eq!(reports.len(), scans.len());
    let counts = assignment.face_counts();
    for ((name, report), owned) in reports.iter().zip(&counts) {
        assert_eq!(
            report.projected + report.rejected + report.unselected,
            mesh.face_count(),
            "scan {name}"
        );
        assert!(report.projected + report.rejected >= *owned, "scan {name}");
    }

    for scan in &scans {
        let channel = mesh.uv_channel(scan.name()).unwrap();
        for face in mesh.faces() {
            for corner in mesh.face_loops(face).unwrap() {
                let uv = mesh.loop_uv(channel, corner).unwrap();
                assert!((0.0..=1.0).contains(&uv.v), "{}: v = {}", scan.name(), uv.v);
                assert!((-1.0..=2.0).contains(&uv.u), "{}: u = {}", scan.name(), uv.u);
            }
        }
    }
    for face in mesh.faces() {
        assert!(!mesh.is_selected(face).unwrap());
    }
}
